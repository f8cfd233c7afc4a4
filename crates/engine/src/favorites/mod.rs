//! Persisted favorites with pluggable storage.

pub mod backend;
pub mod store;

pub use backend::{FavoritesBackend, JsonFileBackend, MemoryBackend, StoreError};
pub use store::{FavoriteGroup, FavoritesStore};
