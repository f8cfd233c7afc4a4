//! # fermata-transit
//!
//! Read-only query layer over a static stop dataset.
//!
//! ## Features
//!
//! - **Tolerant loading**: malformed records are dropped, partial datasets
//!   are accepted, missing ids are synthesized from load order
//! - **Diacritic-insensitive search**: substring matching over normalized
//!   names, with a capped suggestion list and a bounding box for
//!   map-extent fitting
//! - **Nearest stop**: Haversine distance over the whole catalog with
//!   deterministic tie-breaks
//! - **Pluggable sources**: implement [`StopSource`] to fetch the dataset
//!   from anywhere
//!
//! ## Example
//!
//! ```
//! use fermata_transit::prelude::*;
//!
//! let catalog = StopCatalog::from_slice(
//!     r#"[
//!         {"id": 1, "name": "Piazza Duomo", "lat": 38.19, "lon": 15.55},
//!         {"id": 2, "name": "Stazione Università", "lat": 38.11, "lon": 15.65}
//!     ]"#
//!     .as_bytes(),
//! )
//! .unwrap();
//!
//! let index = SearchIndex::new(&catalog);
//! let results = index.search("universita");
//! assert_eq!(results.matches().len(), 1);
//!
//! let nearest = nearest_stop(&catalog, &Position::new(38.12, 15.64)).unwrap();
//! assert_eq!(nearest.id, StopIdentifier::new("2"));
//! ```

pub mod catalog;
pub mod identifiers;
pub mod models;
pub mod normalize;
pub mod search;
pub mod spatial;

// Re-exports for convenience
pub mod prelude {
    pub use crate::catalog::{InMemorySource, StopCatalog, StopSource};
    pub use crate::identifiers::{StopIdentifier, ZoneIdentifier};
    pub use crate::models::{LoadError, Position, RawStopRecord, Stop};
    pub use crate::normalize::normalize;
    pub use crate::search::{SearchIndex, SearchResults, SUGGESTION_LIMIT};
    pub use crate::spatial::{haversine_distance, nearest_stop, BoundingBox};
}

pub use prelude::*;
