use isostream_grid::{AreaId, CellRect, Grid, V2};

use crate::*;

/// What the cache knows about one area.  Created the first time the area is referenced and kept forever.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct AreaDescriptor {
    id: AreaId,
    coord: V2<i32>,
    bounds: CellRect,
    /// `None` until the first permitted query.
    last_query_ms: Option<u64>,
}

impl AreaDescriptor {
    /// Describe an area of `grid`, or `None` if the id isn't one.
    pub fn new(grid: &Grid, id: AreaId) -> Option<AreaDescriptor> {
        if !grid.is_valid_area_id(id) {
            return None;
        }

        let coord = grid.area_coord(id);
        let bounds = grid.area_cell_bounds(coord.x, coord.y)?;
        Some(AreaDescriptor {
            id,
            coord,
            bounds,
            last_query_ms: None,
        })
    }

    pub fn get_id(&self) -> AreaId {
        self.id
    }

    /// Position in the area grid.
    pub fn get_coord(&self) -> V2<i32> {
        self.coord
    }

    pub fn get_bounds(&self) -> CellRect {
        self.bounds
    }

    pub fn get_start_cell(&self) -> V2<i32> {
        self.bounds.get_start()
    }

    pub fn get_end_cell(&self) -> V2<i32> {
        self.bounds.get_end()
    }

    pub fn get_side(&self) -> i32 {
        self.bounds.get_width()
    }

    /// When this area was last queried, or 0 if it never was.
    pub fn get_last_query_ms(&self) -> u64 {
        self.last_query_ms.unwrap_or(0)
    }

    /// Whether two areas are close enough that moving between them is a pan rather than a jump.
    pub fn fuzzy_eq(&self, other: &AreaDescriptor, tolerance: i32) -> bool {
        (self.coord.x - other.coord.x).abs() <= tolerance
            && (self.coord.y - other.coord.y).abs() <= tolerance
    }

    /// Claim the right to fetch this area at `now_ms`, with the default interval.
    pub fn try_mark_queried(&mut self, now_ms: u64) -> bool {
        self.try_mark_queried_every(now_ms, DEFAULT_QUERY_INTERVAL_MS)
    }

    /// Claim the right to fetch this area at `now_ms`.
    ///
    /// Succeeds if the area was never queried or at least `interval_ms` have passed since it last was, and records
    /// `now_ms` as the new query time.  On failure nothing changes.
    pub fn try_mark_queried_every(&mut self, now_ms: u64, interval_ms: u64) -> bool {
        if let Some(last) = self.last_query_ms {
            if now_ms.saturating_sub(last) < interval_ms {
                return false;
            }
        }
        self.last_query_ms = Some(now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use isostream_grid::GridBuilder;

    use super::*;

    fn grid() -> Grid {
        GridBuilder::new()
            .tile_size(256.0, 128.0)
            .map_cells(100, 100)
            .viewport_size(1280.0, 720.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_new() {
        let g = grid();
        let d = AreaDescriptor::new(&g, g.area_id(2, 3)).unwrap();
        assert_eq!(d.get_coord(), V2::new(2, 3));
        assert_eq!(d.get_start_cell(), V2::new(16, 24));
        assert_eq!(d.get_end_cell(), V2::new(24, 32));
        assert_eq!(d.get_side(), 8);
        assert_eq!(d.get_last_query_ms(), 0);
        assert!(AreaDescriptor::new(&g, AreaId(-1)).is_none());
        assert!(AreaDescriptor::new(&g, AreaId(13 * 13)).is_none());
    }

    #[test]
    fn test_throttle() {
        let g = grid();
        let mut d = AreaDescriptor::new(&g, AreaId(0)).unwrap();
        assert!(d.try_mark_queried(1_000_000));
        assert_eq!(d.get_last_query_ms(), 1_000_000);

        // 5 seconds later is too soon, and doesn't push the window out.
        assert!(!d.try_mark_queried(1_005_000));
        assert_eq!(d.get_last_query_ms(), 1_000_000);

        assert!(d.try_mark_queried(1_011_000));
        assert_eq!(d.get_last_query_ms(), 1_011_000);

        // Exactly one interval later is allowed.
        assert!(d.try_mark_queried(1_021_000));
    }

    #[test]
    fn test_throttle_first_query_at_zero() {
        let g = grid();
        let mut d = AreaDescriptor::new(&g, AreaId(0)).unwrap();
        assert!(d.try_mark_queried_every(0, 2000));
        assert!(!d.try_mark_queried_every(1999, 2000));
        assert!(d.try_mark_queried_every(2000, 2000));
    }

    #[test]
    fn test_clock_going_backward_is_throttled() {
        let g = grid();
        let mut d = AreaDescriptor::new(&g, AreaId(0)).unwrap();
        assert!(d.try_mark_queried(50_000));
        assert!(!d.try_mark_queried(10_000));
    }

    #[test]
    fn test_fuzzy_eq() {
        let g = grid();
        let a = AreaDescriptor::new(&g, g.area_id(0, 0)).unwrap();
        let b = AreaDescriptor::new(&g, g.area_id(3, 3)).unwrap();
        let c = AreaDescriptor::new(&g, g.area_id(4, 0)).unwrap();
        assert!(a.fuzzy_eq(&b, 3));
        assert!(!a.fuzzy_eq(&c, 3));
        assert!(c.fuzzy_eq(&b, 3));
    }
}
