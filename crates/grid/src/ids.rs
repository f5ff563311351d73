//! Flattened cell and area identifiers.
//!
//! Ids are `x + y * width` over their grid.  Arithmetic that would overflow produces [INVALID_ID] rather than a
//! wrapped value, so a bad input can never masquerade as a plausible id.
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::*;

/// Sentinel for an id that could not be computed.  Never valid in any grid.
pub const INVALID_ID: i32 = -1;

#[derive(
    Copy, Clone, Debug, Display, Eq, Ord, PartialEq, PartialOrd, Hash, Serialize, Deserialize,
)]
#[display(fmt = "cell {}", _0)]
#[serde(transparent)]
pub struct CellId(pub i32);

#[derive(
    Copy, Clone, Debug, Display, Eq, Ord, PartialEq, PartialOrd, Hash, Serialize, Deserialize,
)]
#[display(fmt = "area {}", _0)]
#[serde(transparent)]
pub struct AreaId(pub i32);

/// Flatten `(x, y)` over a grid `width` wide.
pub fn flat_id(x: i32, y: i32, width: i32) -> i32 {
    y.checked_mul(width)
        .and_then(|row| row.checked_add(x))
        .unwrap_or(INVALID_ID)
}

/// Recover `(x, y)` from a flattened id, with floor semantics for negative ids.
pub fn flat_coord(id: i32, width: i32) -> V2<i32> {
    V2::new(id.rem_euclid(width), id.div_euclid(width))
}

/// The 3x3 block of ids around `id` in a grid `width` wide, row by row, with `id` itself 5th.
///
/// This is raw arithmetic: at the edges of a grid the results may be negative, past the end, or wrapped onto the
/// neighbouring row.  Filter before use.
pub fn neighbors9(id: i32, width: i32) -> [i32; 9] {
    let mut out = [INVALID_ID; 9];
    for (i, dest) in out.iter_mut().enumerate() {
        let dy = i as i32 / 3 - 1;
        let dx = i as i32 % 3 - 1;
        *dest = width
            .checked_mul(dy)
            .and_then(|row| row.checked_add(dx))
            .and_then(|offset| id.checked_add(offset))
            .unwrap_or(INVALID_ID);
    }
    out
}

impl Grid {
    pub fn cell_id(&self, x: i32, y: i32) -> CellId {
        CellId(flat_id(x, y, self.config.get_map_cells()))
    }

    pub fn cell_coord(&self, id: CellId) -> V2<i32> {
        flat_coord(id.0, self.config.get_map_cells())
    }

    pub fn area_id(&self, x: i32, y: i32) -> AreaId {
        AreaId(flat_id(x, y, self.areas.get_areas_per_side()))
    }

    pub fn area_coord(&self, id: AreaId) -> V2<i32> {
        flat_coord(id.0, self.areas.get_areas_per_side())
    }

    pub fn is_valid_cell(&self, x: i32, y: i32) -> bool {
        let cells = self.config.get_map_cells();
        (0..cells).contains(&x) && (0..cells).contains(&y)
    }

    pub fn is_valid_cell_id(&self, id: CellId) -> bool {
        let cells = self.config.get_map_cells();
        (0..cells * cells).contains(&id.0)
    }

    pub fn is_valid_area(&self, x: i32, y: i32) -> bool {
        let areas = self.areas.get_areas_per_side();
        (0..areas).contains(&x) && (0..areas).contains(&y)
    }

    pub fn is_valid_area_id(&self, id: AreaId) -> bool {
        (0..self.areas.get_area_count()).contains(&id.0)
    }

    pub fn cell_neighbors9(&self, id: CellId) -> [CellId; 9] {
        neighbors9(id.0, self.config.get_map_cells()).map(CellId)
    }

    pub fn area_neighbors9(&self, id: AreaId) -> [AreaId; 9] {
        neighbors9(id.0, self.areas.get_areas_per_side()).map(AreaId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_id_overflow_is_invalid() {
        assert_eq!(flat_id(0, i32::MAX, 2), INVALID_ID);
        assert_eq!(flat_id(i32::MAX, 1, 1), INVALID_ID);
        assert_eq!(flat_id(3, 2, 10), 23);
    }

    #[test]
    fn test_flat_coord_floors() {
        assert_eq!(flat_coord(23, 10), V2::new(3, 2));
        assert_eq!(flat_coord(-1, 10), V2::new(9, -1));
    }

    #[test]
    fn test_neighbors9() {
        assert_eq!(neighbors9(11, 10), [0, 1, 2, 10, 11, 12, 20, 21, 22]);
        assert_eq!(neighbors9(0, 3), [-4, -3, -2, -1, 0, 1, 2, 3, 4]);
        assert_eq!(neighbors9(i32::MAX, 1)[8], INVALID_ID);
    }
}
