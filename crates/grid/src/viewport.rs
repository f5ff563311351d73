//! Turning pointer input into a viewport center.
use std::sync::Arc;

use log::*;

use crate::*;

/// Where the viewport is after some input.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportMove {
    /// The cell under the center of the viewport.  `None` if the center has run off anything representable.
    pub cell: Option<V2<i32>>,

    /// The center of the viewport, in map-local pixels.
    pub pixel: V2<f64>,
}

/// A rectangular window onto the map, tracked by its center in map-local pixels.
///
/// Screen coordinates have their origin at the bottom left of the viewport with `y` up, matching the map.
#[derive(Debug, Clone)]
pub struct Viewport {
    grid: Arc<Grid>,
    center: V2<f64>,
}

impl Viewport {
    pub fn new(grid: Arc<Grid>, center: V2<f64>) -> Viewport {
        Viewport { grid, center }
    }

    pub fn centered_on_cell(grid: Arc<Grid>, cell: V2<i32>) -> Viewport {
        let center = grid.cell_to_map_pixel(cell);
        Viewport::new(grid, center)
    }

    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    pub fn get_center(&self) -> V2<f64> {
        self.center
    }

    pub fn center_cell(&self) -> Option<V2<i32>> {
        self.grid.map_pixel_to_cell(self.center)
    }

    pub fn current(&self) -> ViewportMove {
        ViewportMove {
            cell: self.center_cell(),
            pixel: self.center,
        }
    }

    /// Apply a pointer drag of `delta` screen pixels.  The map follows the pointer, so the center moves the other
    /// way.
    pub fn drag(&mut self, delta: V2<f64>) -> ViewportMove {
        self.center -= delta;
        trace!("Viewport dragged by {} to {}", delta, self.center);
        self.current()
    }

    /// Re-center on a cell, e.g. when jumping to a search result.
    pub fn jump_to_cell(&mut self, cell: V2<i32>) -> ViewportMove {
        self.center = self.grid.cell_to_map_pixel(cell);
        debug!("Viewport jumped to {} at {}", cell, self.center);
        self.current()
    }

    pub fn screen_to_map_pixel(&self, screen: V2<f64>) -> V2<f64> {
        let half = self.grid.get_viewport_size() / 2.0;
        self.center + screen - half
    }

    /// The cell under a tap, if it is on the map.
    pub fn tap(&self, screen: V2<f64>) -> Option<V2<i32>> {
        self.grid
            .map_pixel_to_cell(self.screen_to_map_pixel(screen))
            .filter(|c| self.grid.is_valid_cell(c.x, c.y))
    }

    /// The four corners of the viewport in map-local pixels: top left, top right, bottom left, bottom right.
    pub fn corners(&self) -> [V2<f64>; 4] {
        viewport_corners(self.center, self.grid.get_viewport_size())
    }
}

/// Corners of a viewport of `size` centered on `center`, in the same order as [Viewport::corners].
pub fn viewport_corners(center: V2<f64>, size: V2<f64>) -> [V2<f64>; 4] {
    let hw = size.x / 2.0;
    let hh = size.y / 2.0;
    [
        center + V2::new(-hw, hh),
        center + V2::new(hw, hh),
        center + V2::new(-hw, -hh),
        center + V2::new(hw, -hh),
    ]
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn grid() -> Arc<Grid> {
        Arc::new(
            GridBuilder::new()
                .tile_size(256.0, 128.0)
                .map_cells(20, 20)
                .anchor_offset(-2560.0, -1280.0)
                .viewport_size(1280.0, 720.0)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_drag_moves_against_pointer() {
        let mut v = Viewport::centered_on_cell(grid(), V2::new(5, 5));
        let start = v.get_center();
        let m = v.drag(V2::new(10.0, -4.0));
        assert_relative_eq!(m.pixel.x, start.x - 10.0);
        assert_relative_eq!(m.pixel.y, start.y + 4.0);
        assert_eq!(m.cell, Some(V2::new(5, 5)));

        // Dragging the map up and left by one tile step exposes the next cell along x.
        let m = v.drag(V2::new(-128.0, 64.0));
        assert_eq!(m.cell, Some(V2::new(6, 5)));
    }

    #[test]
    fn test_tap() {
        let v = Viewport::centered_on_cell(grid(), V2::new(5, 5));
        assert_eq!(v.tap(V2::new(640.0, 360.0)), Some(V2::new(5, 5)));
        // One tile step down and right of the center.
        assert_eq!(v.tap(V2::new(768.0, 296.0)), Some(V2::new(6, 5)));
        // Far off the top of the diamond.
        let v = Viewport::centered_on_cell(grid(), V2::new(0, 0));
        assert_eq!(v.tap(V2::new(640.0, 720.0)), None);
    }

    #[test]
    fn test_jump_and_corners() {
        let mut v = Viewport::new(grid(), V2::new(0.0, 0.0));
        let m = v.jump_to_cell(V2::new(10, 3));
        assert_eq!(m.cell, Some(V2::new(10, 3)));
        let [tl, tr, bl, br] = v.corners();
        assert_relative_eq!(tr.x - tl.x, 1280.0);
        assert_relative_eq!(tl.y - bl.y, 720.0);
        assert_relative_eq!((br.x + tl.x) / 2.0, m.pixel.x);
    }
}
