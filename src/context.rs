//! Service context bundling all port trait objects.

use chrono::{DateTime, Duration, Utc};

use crate::adapters::memory::{MemoryFileSystem, SteppingClock};
use crate::ports::clock::Clock;
use crate::ports::filesystem::FileSystem;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire up
/// different adapter implementations (live, in-memory).
pub struct ServiceContext {
    /// Clock for timing the build.
    pub clock: Box<dyn Clock>,
    /// Filesystem for source reads, backups and the bundle write.
    pub fs: Box<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, clock: Box<dyn Clock>) -> Self {
        Self { clock, fs }
    }

    /// Creates a live context with real disk and system clock.
    #[must_use]
    pub fn live() -> Self {
        use crate::adapters::live::clock::LiveClock;
        use crate::adapters::live::filesystem::LiveFileSystem;

        Self::new(Box::new(LiveFileSystem), Box::new(LiveClock))
    }

    /// Creates a context over an in-memory filesystem with a clock that
    /// advances one second per reading.
    #[must_use]
    pub fn in_memory(fs: MemoryFileSystem) -> Self {
        let start: DateTime<Utc> = DateTime::UNIX_EPOCH;
        Self::new(Box::new(fs), Box::new(SteppingClock::new(start, Duration::seconds(1))))
    }
}
