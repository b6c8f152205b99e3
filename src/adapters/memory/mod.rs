//! In-memory adapters.
//!
//! Used by the unit tests and by callers that want to bundle a source tree
//! that never touches disk.

pub mod clock;
pub mod filesystem;

pub use clock::SteppingClock;
pub use filesystem::MemoryFileSystem;
