//! Streaming the areas of a large map around a moving viewport.
//!
//! The [AreaStreamingCache] is told where the viewport center is with [AreaStreamingCache::set_center].  When the
//! center crosses into a new area it works out which areas of the 3x3 window around it became visible and which
//! went away, tells its observers, and queues fetches for the new ones with the areas actually on screen first.
//! The network layer drains the queue through [AreaStreamingCache::next_fetch_request], which throttles each area
//! to one request per query interval, and hands responses back through [AreaStreamingCache::ingest].
//!
//! Everything here is in-memory bookkeeping on one thread.  Hosts that network on worker threads either put the
//! cache behind a mutex or forward its events with a [ChannelObserver].
mod cache;
mod clock;
mod config;
mod content;
mod descriptor;
mod errors;
mod events;
mod fetch_queue;

pub use cache::*;
pub use clock::*;
pub use config::*;
pub use content::*;
pub use descriptor::*;
pub use errors::*;
pub use events::*;
pub use fetch_queue::*;
