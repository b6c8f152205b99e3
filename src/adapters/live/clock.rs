//! System clock adapter.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Reads wall-clock time; used to stamp and time real builds.
pub struct LiveClock;

impl Clock for LiveClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_timing_is_never_negative() {
        let started = LiveClock.now();
        let finished = LiveClock.now();

        assert!((finished - started).num_milliseconds() >= 0);
    }
}
