use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use log::*;
use smallvec::SmallVec;

use isostream_grid::{viewport_corners, AreaId, Grid, Neighbors9, V2};

use crate::*;

/// What a call to [AreaStreamingCache::set_center] did.
#[derive(Clone, Debug, PartialEq)]
pub enum CenterUpdate {
    /// Same cell as before, or an invalid cell; nothing happened.
    Unchanged,
    /// The center moved within the same area.
    Moved,
    /// The center crossed into a new area.
    AreaChanged(VisibleAreasChanged),
}

/// Tracks the viewport center, the resident 3x3 window of areas around it, and the areas waiting to be fetched.
pub struct AreaStreamingCache {
    grid: Arc<Grid>,
    config: StreamingConfig,
    descriptors: HashMap<AreaId, AreaDescriptor>,
    center_cell: Option<V2<i32>>,
    center_pixel: V2<f64>,
    center_area: Option<AreaId>,
    resident: Neighbors9<AreaId>,
    fetch_queue: FetchQueue,
    observers: Vec<Box<dyn StreamingObserver>>,
}

impl AreaStreamingCache {
    pub fn new(grid: Arc<Grid>) -> AreaStreamingCache {
        AreaStreamingCache {
            grid,
            config: Default::default(),
            descriptors: Default::default(),
            center_cell: None,
            center_pixel: Default::default(),
            center_area: None,
            resident: Default::default(),
            fetch_queue: Default::default(),
            observers: vec![],
        }
    }

    pub fn with_config(grid: Arc<Grid>, config: StreamingConfig) -> Result<AreaStreamingCache> {
        config.validate()?;
        let mut cache = AreaStreamingCache::new(grid);
        cache.config = config;
        Ok(cache)
    }

    pub fn add_observer(&mut self, observer: Box<dyn StreamingObserver>) {
        self.observers.push(observer);
    }

    pub fn grid(&self) -> &Arc<Grid> {
        &self.grid
    }

    pub fn config(&self) -> &StreamingConfig {
        &self.config
    }

    pub fn center_cell(&self) -> Option<V2<i32>> {
        self.center_cell
    }

    /// The map-local pixel given with the last accepted center.
    pub fn center_pixel(&self) -> V2<f64> {
        self.center_pixel
    }

    pub fn center_area(&self) -> Option<AreaId> {
        self.center_area
    }

    /// The valid 3x3 window around the center area.
    pub fn resident_areas(&self) -> &[AreaId] {
        &self.resident
    }

    pub fn is_resident(&self, area: AreaId) -> bool {
        self.resident.contains(&area)
    }

    /// Look at a descriptor without creating it.
    pub fn descriptor(&self, area: AreaId) -> Option<&AreaDescriptor> {
        self.descriptors.get(&area)
    }

    /// How many areas have been referenced so far.
    pub fn descriptor_count(&self) -> usize {
        self.descriptors.len()
    }

    pub fn fetch_queue(&self) -> &FetchQueue {
        &self.fetch_queue
    }

    /// For network layers which want to drain ids themselves and call [AreaStreamingCache::try_mark_queried].
    pub fn fetch_queue_mut(&mut self) -> &mut FetchQueue {
        &mut self.fetch_queue
    }

    /// Get the descriptor for an area, creating it on first use.  `None` for ids outside the area grid.
    fn materialize(&mut self, area: AreaId) -> Option<&mut AreaDescriptor> {
        match self.descriptors.entry(area) {
            Entry::Occupied(e) => Some(e.into_mut()),
            Entry::Vacant(e) => {
                let descriptor = AreaDescriptor::new(&self.grid, area)?;
                trace!("Materialized descriptor for {}", area);
                Some(e.insert(descriptor))
            }
        }
    }

    fn notify(&mut self, event: &StreamingEvent) {
        for o in self.observers.iter_mut() {
            o.on_event(event);
        }
    }

    /// Move the viewport center to `cell`, whose map-local pixel position is `pixel`.
    ///
    /// Cheap enough to call on every pointer sample: repeated calls with the same cell do nothing, and moves within
    /// an area only notify.  Crossing into a new area diffs the resident window, queues fetches for the areas which
    /// appeared, and notifies observers with the change.
    pub fn set_center(&mut self, cell: V2<i32>, pixel: V2<f64>) -> CenterUpdate {
        let valid = self.grid.is_valid_cell(cell.x, cell.y);
        debug_assert!(valid, "Viewport center {} is outside the map", cell);
        if !valid {
            warn!("Ignoring viewport center {} outside the map", cell);
            return CenterUpdate::Unchanged;
        }

        if self.center_cell == Some(cell) {
            return CenterUpdate::Unchanged;
        }

        self.center_cell = Some(cell);
        self.center_pixel = pixel;
        trace!("Viewport center moved to {} at {}", cell, pixel);
        self.notify(&StreamingEvent::CenterChanged { cell, pixel });

        let new_area = self.grid.area_of_cell(cell.x, cell.y);
        if self.center_area == Some(new_area) {
            return CenterUpdate::Moved;
        }

        let change = self.change_area(cell, pixel, new_area);
        self.notify(&StreamingEvent::VisibleAreasChanged(change.clone()));
        CenterUpdate::AreaChanged(change)
    }

    fn change_area(&mut self, cell: V2<i32>, pixel: V2<f64>, new_area: AreaId) -> VisibleAreasChanged {
        let new_descriptor = self.materialize(new_area).copied();
        let previous = self.center_area;
        let previous_descriptor = previous.and_then(|p| self.descriptors.get(&p).copied());

        let jump = match (previous_descriptor, new_descriptor) {
            (Some(p), Some(n)) => !p.fuzzy_eq(&n, self.config.jump_tolerance),
            _ => true,
        };

        let new_ids = self.grid.valid_area_neighbors9(new_area);
        let (added, removed): (Neighbors9<AreaId>, Neighbors9<AreaId>) = match previous {
            Some(previous) if !jump => {
                let old_ids = self.grid.valid_area_neighbors9(previous);
                (
                    new_ids.iter().copied().filter(|i| !old_ids.contains(i)).collect(),
                    old_ids.iter().copied().filter(|i| !new_ids.contains(i)).collect(),
                )
            }
            _ => (new_ids.clone(), Default::default()),
        };

        // Whatever is on screen right now goes to the front of the queue.
        let priority: SmallVec<[AreaId; 8]> = if jump {
            let [tl, tr, bl, br] = viewport_corners(pixel, self.grid.get_viewport_size());
            self.grid.valid_areas_covering_points(&[pixel, tl, tr, bl, br])
        } else if added.contains(&new_area) {
            smallvec::smallvec![new_area]
        } else {
            SmallVec::new()
        };

        let queued_before = self.fetch_queue.len();
        self.fetch_queue.extend(priority.iter().copied());
        self.fetch_queue
            .extend(added.iter().copied().filter(|i| !priority.contains(i)));

        debug!(
            "Center area {} -> {} ({}): added {:?}, removed {:?}, queued {} with priority {:?}",
            previous.map_or_else(|| "none".to_string(), |p| p.to_string()),
            new_area,
            if jump { "jump" } else { "pan" },
            added,
            removed,
            self.fetch_queue.len() - queued_before,
            priority
        );

        self.center_area = Some(new_area);
        self.resident = new_ids;

        VisibleAreasChanged {
            cell,
            center_area: new_area,
            added,
            removed,
            jump,
        }
    }

    /// Claim the right to fetch `area` now, per the configured query interval.
    ///
    /// Network layers draining [AreaStreamingCache::fetch_queue_mut] themselves must call this right before each
    /// request and skip the request if it returns false.
    pub fn try_mark_queried(&mut self, area: AreaId, now_ms: u64) -> bool {
        debug_assert!(
            self.grid.is_valid_area_id(area),
            "Attempted to query invalid {}",
            area
        );
        let interval = self.config.query_interval_ms;
        self.materialize(area)
            .map_or(false, |d| d.try_mark_queried_every(now_ms, interval))
    }

    /// Build the request for an area without touching its throttle.
    pub fn fetch_request_for(&mut self, area: AreaId) -> Option<FetchRequest> {
        self.materialize(area).map(|d| FetchRequest {
            area: d.get_id(),
            bounds: d.get_bounds(),
        })
    }

    /// Pop queued areas until one may be fetched at `now_ms`.  Throttled areas are dropped from the queue.
    pub fn next_fetch_request(&mut self, now_ms: u64) -> Option<FetchRequest> {
        while let Some(area) = self.fetch_queue.pop() {
            if !self.try_mark_queried(area, now_ms) {
                trace!("Not fetching {}: queried too recently", area);
                continue;
            }
            return self.fetch_request_for(area);
        }
        None
    }

    /// Everything in the queue which may be fetched at `now_ms`, in queue order.
    pub fn drain_fetch_requests(&mut self, now_ms: u64) -> Vec<FetchRequest> {
        std::iter::from_fn(|| self.next_fetch_request(now_ms)).collect()
    }

    /// Accept content from the server and pass it on to observers unchanged.
    ///
    /// Content may arrive for an area which has since scrolled away; it is still forwarded, and the render layer
    /// decides whether to keep it.
    pub fn ingest(&mut self, update: AreaContentUpdate) {
        if !self.is_resident(update.area) {
            debug!(
                "Received content for {}, which is no longer resident",
                update.area
            );
        }
        debug!(
            "Ingesting {}: {} added, {} removed, {} updated",
            update.area,
            update.added.len(),
            update.removed.len(),
            update.updated.len()
        );
        self.notify(&StreamingEvent::AreaContentUpdated(update));
    }
}
