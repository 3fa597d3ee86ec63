use std::sync::Arc;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering::SeqCst;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use ClockSource::{FixedOffset, Mock, System};

/// A source of time for issuing and checking credential expiry.
#[derive(Debug, Clone, Default)]
pub enum ClockSource {
    /// Clock source based on the system clock.
    #[default]
    System,

    /// Maintains a fixed number of seconds offset (positive or negative) from the system clock.
    /// Useful to simulate clock skew between issuer and verifier.
    FixedOffset(i64),

    /// Only for testing and benchmarking.
    Mock(Arc<AtomicI64>),
}

impl ClockSource {
    pub fn new_mock(now: i64) -> ClockSource {
        Mock(Arc::new(AtomicI64::new(now)))
    }

    /// Returns the number of non-leap seconds since the start of 1970 UTC.
    ///
    /// Credential expiry timestamps are signed: a negative TTL can legitimately produce a
    /// value before "now", and a system clock set before 1970 is reported as negative rather
    /// than aborting.
    pub fn epoch_seconds(&self) -> i64 {
        match self {
            System => match SystemTime::now().duration_since(UNIX_EPOCH) {
                Ok(n) => n.as_secs() as i64,
                Err(e) => -(e.duration().as_secs() as i64),
            },
            FixedOffset(offset) => System.epoch_seconds().saturating_add(*offset),
            Mock(now) => now.load(SeqCst),
        }
    }

    /// Sets the current time of this Mock clock.
    ///
    /// # Panics
    ///
    /// Panics unless this is a [`Mock`] clock; the system clock cannot be set.
    pub fn set_time(&mut self, now: i64) {
        match self {
            Mock(n) => n.store(now, SeqCst),
            System | FixedOffset(_) => panic!("set_time called on a non-mock clock: {self:?}"),
        }
    }

    /// Increases the current time of this Mock clock by the given duration, saturating at
    /// `i64::MAX`.
    ///
    /// # Panics
    ///
    /// Panics unless this is a [`Mock`] clock; the system clock cannot be advanced.
    pub fn advance(&mut self, delta: Duration) {
        match self {
            Mock(n) => {
                let secs = i64::try_from(delta.as_secs()).unwrap_or(i64::MAX);
                // the closure always returns Some, so the update cannot fail
                let _ = n.fetch_update(SeqCst, SeqCst, |now| Some(now.saturating_add(secs)));
            }
            System | FixedOffset(_) => panic!("advance called on a non-mock clock: {self:?}"),
        }
    }
}
