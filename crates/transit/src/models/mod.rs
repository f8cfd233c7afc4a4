//! Stop data models and load errors.

pub mod types;

// Re-exports for convenience
pub use types::{LoadError, Position, RawId, RawStopRecord, Result, Stop};
