//! A half-open rectangle of cells.
use crate::*;

/// A rectangle of cells specified by its inclusive start corner and exclusive end corner.
///
/// Rectangles can never be empty.
#[derive(Debug, Copy, Clone, Eq, Ord, PartialEq, PartialOrd, Hash, derive_more::Display)]
#[display(fmt = "[{}, {})", start, end)]
pub struct CellRect {
    start: V2<i32>,
    end: V2<i32>,
}

impl CellRect {
    pub fn from_points(start: V2<i32>, end: V2<i32>) -> Result<CellRect, RectError> {
        if start.x >= end.x || start.y >= end.y {
            return Err(RectError::InvalidDims);
        }

        Ok(CellRect { start, end })
    }

    /// A square of `side` cells whose lower corner is `start`.
    pub fn square(start: V2<i32>, side: i32) -> Result<CellRect, RectError> {
        let end_x = start.x.checked_add(side).ok_or(RectError::InvalidDims)?;
        let end_y = start.y.checked_add(side).ok_or(RectError::InvalidDims)?;
        CellRect::from_points(start, V2::new(end_x, end_y))
    }

    pub fn get_start(&self) -> V2<i32> {
        self.start
    }

    pub fn get_end(&self) -> V2<i32> {
        self.end
    }

    pub fn get_width(&self) -> i32 {
        self.end.x - self.start.x
    }

    pub fn get_height(&self) -> i32 {
        self.end.y - self.start.y
    }

    pub fn contains(&self, cell: V2<i32>) -> bool {
        (self.start.x..self.end.x).contains(&cell.x) && (self.start.y..self.end.y).contains(&cell.y)
    }

    /// Intersect with another rectangle, if they overlap at all.
    pub fn intersection(&self, other: &CellRect) -> Option<CellRect> {
        let start = V2::new(self.start.x.max(other.start.x), self.start.y.max(other.start.y));
        let end = V2::new(self.end.x.min(other.end.x), self.end.y.min(other.end.y));
        CellRect::from_points(start, end).ok()
    }

    /// Visit all cells of this rectangle by rows of x starting from the minimum y:
    ///
    /// `(1, 1), (2, 1), ... (1, 2), (2, 2),...`
    pub fn iter_cells(&self) -> impl Iterator<Item = V2<i32>> {
        let (sx, ex) = (self.start.x, self.end.x);
        (self.start.y..self.end.y).flat_map(move |y| (sx..ex).map(move |x| V2::new(x, y)))
    }
}
