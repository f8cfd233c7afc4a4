//! Stop catalog loading and lookup.

pub mod source;
pub mod static_catalog;

pub use source::{InMemorySource, StopSource};
pub use static_catalog::StopCatalog;
