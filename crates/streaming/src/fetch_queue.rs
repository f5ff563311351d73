use std::collections::VecDeque;

use isostream_grid::{AreaId, CellRect, V2};

/// Areas waiting to be fetched, oldest first.
///
/// The cache only ever appends; the network layer pops from the front.  Nothing here deduplicates.
#[derive(Clone, Debug, Default)]
pub struct FetchQueue {
    pending: VecDeque<AreaId>,
}

impl FetchQueue {
    pub fn new() -> FetchQueue {
        Default::default()
    }

    pub fn push(&mut self, area: AreaId) {
        self.pending.push_back(area);
    }

    pub fn pop(&mut self) -> Option<AreaId> {
        self.pending.pop_front()
    }

    pub fn peek(&self) -> Option<AreaId> {
        self.pending.front().copied()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = AreaId> + '_ {
        self.pending.iter().copied()
    }

    /// Take everything, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = AreaId> + '_ {
        self.pending.drain(..)
    }
}

impl Extend<AreaId> for FetchQueue {
    fn extend<I: IntoIterator<Item = AreaId>>(&mut self, iter: I) {
        self.pending.extend(iter)
    }
}

/// What the network layer needs to ask the server for one area.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FetchRequest {
    pub area: AreaId,
    pub bounds: CellRect,
}

impl FetchRequest {
    pub fn get_start_cell(&self) -> V2<i32> {
        self.bounds.get_start()
    }

    pub fn get_end_cell(&self) -> V2<i32> {
        self.bounds.get_end()
    }

    pub fn get_side(&self) -> i32 {
        self.bounds.get_width()
    }
}
