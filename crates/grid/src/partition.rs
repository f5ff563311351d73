//! Carving the map into areas.
use arrayvec::ArrayVec;
use smallvec::SmallVec;

use crate::*;

/// Valid members of a 3x3 block; at most 9.
pub type Neighbors9<T> = ArrayVec<T, 9>;

/// Offsets of a 3x3 block in row-major order, center 5th.
const BLOCK_OFFSETS: [(i32, i32); 9] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (0, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

impl Grid {
    /// The area containing a cell.  Only meaningful for valid cells: a cell past the right edge of the map lands in
    /// an area id belonging to the next row.
    pub fn area_of_cell(&self, x: i32, y: i32) -> AreaId {
        let side = self.areas.get_side();
        self.area_id(x.div_euclid(side), y.div_euclid(side))
    }

    /// The rectangle of cells an area spans: `[start, start + side)` on both axes.
    ///
    /// The last row and column of areas may extend past the map when the side does not divide it.
    pub fn area_cell_bounds(&self, area_x: i32, area_y: i32) -> Option<CellRect> {
        let side = self.areas.get_side();
        let start = V2::new(area_x.checked_mul(side)?, area_y.checked_mul(side)?);
        CellRect::square(start, side).ok()
    }

    /// The valid areas of the 3x3 block around `id`.
    ///
    /// Filtering is by coordinate, so neighbours which would wrap onto an adjacent row are dropped along with
    /// those past the edges.
    pub fn valid_area_neighbors9(&self, id: AreaId) -> Neighbors9<AreaId> {
        if !self.is_valid_area_id(id) {
            return Neighbors9::new();
        }

        let center = self.area_coord(id);
        BLOCK_OFFSETS
            .iter()
            .map(|(dx, dy)| (center.x + dx, center.y + dy))
            .filter(|(x, y)| self.is_valid_area(*x, *y))
            .map(|(x, y)| self.area_id(x, y))
            .collect()
    }

    /// The valid cells of the 3x3 block around `id`.
    pub fn valid_cell_neighbors9(&self, id: CellId) -> Neighbors9<CellId> {
        if !self.is_valid_cell_id(id) {
            return Neighbors9::new();
        }

        let center = self.cell_coord(id);
        BLOCK_OFFSETS
            .iter()
            .map(|(dx, dy)| (center.x + dx, center.y + dy))
            .filter(|(x, y)| self.is_valid_cell(*x, *y))
            .map(|(x, y)| self.cell_id(x, y))
            .collect()
    }

    /// The distinct valid areas under a set of map-local pixels, in order of first appearance.
    pub fn valid_areas_covering_points(&self, points: &[V2<f64>]) -> SmallVec<[AreaId; 8]> {
        let mut out: SmallVec<[AreaId; 8]> = SmallVec::new();
        for cell in points.iter().filter_map(|p| self.map_pixel_to_cell(*p)) {
            if !self.is_valid_cell(cell.x, cell.y) {
                continue;
            }
            let area = self.area_of_cell(cell.x, cell.y);
            if !out.contains(&area) {
                out.push(area);
            }
        }
        out
    }
}
