//! # fermata-engine
//!
//! Stateful application layer over [`fermata_transit`]: a persisted
//! per-scope favorites set, the locate-me request lifecycle, and the
//! view-surface fan-out, tied together by [`StopEngine`].
//!
//! The engine performs no rendering and no internal concurrency. Searches
//! and favorite mutations are synchronous; catalog loading and position
//! acquisition are single-shot awaits on external collaborators.

pub mod engine;
pub mod favorites;
pub mod locate;
pub mod scope;
pub mod sync;

// Re-export the data layer under a stable name
pub use fermata_transit as transit;

pub use engine::{EngineError, StopEngine};
pub use favorites::{
    FavoriteGroup, FavoritesBackend, FavoritesStore, JsonFileBackend, MemoryBackend, StoreError,
};
pub use locate::{LocateOutcome, LocateSession, LocateTicket, PositionError};
pub use scope::Scope;
pub use sync::{ViewEvent, ViewSurface, ViewSync};
