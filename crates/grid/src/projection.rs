//! The isometric projection between cells and pixels.
//!
//! The map is a diamond.  Cell `(0, 0)` is the top corner, `x` grows down and to the right, and `y` grows down and
//! to the left.  Pixel `y` grows upward.
use crate::*;

impl Grid {
    /// Project a world pixel onto the two skewed map axes and floor to the containing cell.
    ///
    /// Returns `None` only if the answer is not representable; cells outside the map are returned as-is.
    pub fn world_pixel_to_cell(&self, world: V2<f64>) -> Option<V2<i32>> {
        let tile = self.config.get_tile_size();
        let cells = self.config.get_map_cells() as f64;
        let u = world.x / tile.x;
        let v = world.y / tile.y;
        V2::new(0.5 * cells + u - v, 1.5 * cells - u - v).floor_to_i32()
    }

    /// The world pixel at the center of a cell.
    pub fn cell_to_world_pixel(&self, cell: V2<i32>) -> V2<f64> {
        let tile = self.config.get_tile_size();
        let origin = self.config.get_origin();
        let x = cell.x as f64;
        let y = cell.y as f64;
        V2::new(
            origin.x - (y - x) * tile.x / 2.0,
            origin.y - (x + y) * tile.y / 2.0,
        )
    }

    pub fn map_local_to_world(&self, local: V2<f64>) -> V2<f64> {
        local + self.config.get_anchor_offset()
    }

    pub fn world_to_map_local(&self, world: V2<f64>) -> V2<f64> {
        world - self.config.get_anchor_offset()
    }

    /// The map-local pixel at the center of a cell.
    pub fn cell_to_map_pixel(&self, cell: V2<i32>) -> V2<f64> {
        self.world_to_map_local(self.cell_to_world_pixel(cell))
    }

    pub fn map_pixel_to_cell(&self, local: V2<f64>) -> Option<V2<i32>> {
        self.world_pixel_to_cell(self.map_local_to_world(local))
    }
}
