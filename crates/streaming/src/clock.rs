use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Something which can say what time it is, in milliseconds since the Unix epoch.
///
/// Throttling only ever compares two readings from the same source, so a source which isn't actually anchored to
/// the epoch (e.g. in tests) works fine as long as it doesn't go backward.
pub trait TimeSource {
    fn now_millis(&self) -> u64;
}

/// The wall clock.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A clock which only moves when told to.
#[derive(Debug, Default)]
pub struct ManualTimeSource {
    now: AtomicU64,
}

impl ManualTimeSource {
    pub fn new(start_millis: u64) -> ManualTimeSource {
        ManualTimeSource {
            now: AtomicU64::new(start_millis),
        }
    }

    pub fn set(&self, millis: u64) {
        self.now.store(millis, Ordering::Relaxed);
    }

    pub fn advance(&self, millis: u64) {
        self.now.fetch_add(millis, Ordering::Relaxed);
    }
}

impl TimeSource for ManualTimeSource {
    fn now_millis(&self) -> u64 {
        self.now.load(Ordering::Relaxed)
    }
}
