use crossbeam::channel as chan;
use log::*;

use isostream_grid::{AreaId, Neighbors9, V2};

use crate::*;

/// The window of resident areas moved.
#[derive(Clone, Debug, PartialEq)]
pub struct VisibleAreasChanged {
    /// The new center cell.
    pub cell: V2<i32>,
    pub center_area: AreaId,
    /// Areas which just became resident, in row-major order.
    pub added: Neighbors9<AreaId>,
    /// Areas which are no longer resident.  Always empty after a jump: the render layer is expected to drop
    /// whatever it no longer needs on its own.
    pub removed: Neighbors9<AreaId>,
    /// Whether this was a discontinuous jump rather than a pan.
    pub jump: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum StreamingEvent {
    /// The viewport center moved to another cell.
    CenterChanged { cell: V2<i32>, pixel: V2<f64> },
    VisibleAreasChanged(VisibleAreasChanged),
    /// Content arrived for an area, passed on as received.
    AreaContentUpdated(AreaContentUpdate),
}

/// Receives notifications from the cache.  Fire and forget.
pub trait StreamingObserver: Send {
    fn on_event(&mut self, event: &StreamingEvent);
}

impl<F: FnMut(&StreamingEvent) + Send> StreamingObserver for F {
    fn on_event(&mut self, event: &StreamingEvent) {
        (self)(event)
    }
}

/// An observer which forwards every event over a crossbeam channel, for render layers on another thread.
///
/// If the channel is full or disconnected, the event is dropped.
pub struct ChannelObserver {
    sender: chan::Sender<StreamingEvent>,
}

impl ChannelObserver {
    pub fn new(sender: chan::Sender<StreamingEvent>) -> ChannelObserver {
        ChannelObserver { sender }
    }

    pub fn unbounded() -> (ChannelObserver, chan::Receiver<StreamingEvent>) {
        let (sender, receiver) = chan::unbounded();
        (ChannelObserver::new(sender), receiver)
    }
}

impl StreamingObserver for ChannelObserver {
    fn on_event(&mut self, event: &StreamingEvent) {
        if let Err(e) = self.sender.try_send(event.clone()) {
            debug!("Could not send streaming event: {:?}", e);
        }
    }
}
