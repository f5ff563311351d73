//! The coordinate and partition engine for an isometric tile map.
//!
//! A [Grid] is built once from the tile-rendering engine's description of the map and the viewport, and is
//! immutable afterward.  It converts between three spaces:
//!
//! - cells, the logical `(x, y)` units of the map, addressed either by coordinate or by a flattened [CellId];
//! - world pixels, the map's own pixel space with `y` up, in which cell `(0, 0)` sits at the top corner of the
//!   diamond;
//! - map-local pixels, world pixels translated by the map's anchor offset.
//!
//! It also partitions the map into square areas of cells, the unit of streaming.  Nothing here clamps: coordinates
//! outside the map flow through the arithmetic and must be rejected with the `is_valid_*` predicates.
mod config;
mod errors;
mod ids;
mod partition;
mod projection;
#[cfg(test)]
mod tests;
mod viewport;

pub use config::*;
pub use errors::*;
pub use ids::*;
pub use partition::*;
pub use viewport::*;

pub use isostream_geometry::{CellRect, V2};
