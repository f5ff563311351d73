//! Small geometric primitives shared by the grid and streaming crates: a 2D vector and a half-open rectangle of
//! cells.
mod errors;
mod rect;
mod v2;

pub use errors::*;
pub use rect::*;
pub use v2::*;
