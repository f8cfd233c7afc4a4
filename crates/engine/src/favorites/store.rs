//! The persisted favorites set.
//!
//! Favorites are an ordered set of stop-id strings per scope. Every
//! mutation writes the full list through the backend before returning, so
//! a reader in the same process immediately observes the new state. Ids
//! are weak references into the catalog: a favorite whose stop vanished
//! from the dataset is skipped when listing, never an error.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use fermata_transit::catalog::StopCatalog;
use fermata_transit::identifiers::{StopIdentifier, ZoneIdentifier};
use fermata_transit::models::Stop;

use crate::favorites::backend::{FavoritesBackend, Result};
use crate::scope::Scope;

/// Favorited stops of one zone, for a grouped listing.
#[derive(Clone, Debug)]
pub struct FavoriteGroup {
    pub zone: ZoneIdentifier,
    pub stops: Vec<Arc<Stop>>,
}

/// Scope-addressed favorites over an injected persistence backend.
pub struct FavoritesStore {
    backend: Box<dyn FavoritesBackend>,
}

impl FavoritesStore {
    pub fn new<B: FavoritesBackend + 'static>(backend: B) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// Store backed by process memory only; favorites last for the session.
    pub fn in_memory() -> Self {
        Self::new(crate::favorites::backend::MemoryBackend::new())
    }

    pub fn is_favorite(&self, scope: &Scope, id: &StopIdentifier) -> Result<bool> {
        let ids = self.backend.read(scope)?;
        Ok(ids.iter().any(|stored| stored == id.as_str()))
    }

    /// Flip membership and return the new state.
    ///
    /// An involution: toggling twice restores the original state.
    pub fn toggle(&self, scope: &Scope, id: &StopIdentifier) -> Result<bool> {
        let mut ids = self.backend.read(scope)?;

        let now_favorite = match ids.iter().position(|stored| stored == id.as_str()) {
            Some(index) => {
                ids.remove(index);
                false
            }
            None => {
                ids.push(id.as_str().to_string());
                true
            }
        };

        self.backend.write(scope, &ids)?;
        debug!(scope = %scope, id = %id, now_favorite, "favorite toggled");
        Ok(now_favorite)
    }

    /// Add explicitly. Returns `false` if the id was already a favorite.
    pub fn add(&self, scope: &Scope, id: &StopIdentifier) -> Result<bool> {
        let mut ids = self.backend.read(scope)?;
        if ids.iter().any(|stored| stored == id.as_str()) {
            return Ok(false);
        }

        ids.push(id.as_str().to_string());
        self.backend.write(scope, &ids)?;
        Ok(true)
    }

    /// Remove explicitly. Returns `false` if the id was not a favorite.
    pub fn remove(&self, scope: &Scope, id: &StopIdentifier) -> Result<bool> {
        let mut ids = self.backend.read(scope)?;
        let Some(index) = ids.iter().position(|stored| stored == id.as_str()) else {
            return Ok(false);
        };

        ids.remove(index);
        self.backend.write(scope, &ids)?;
        Ok(true)
    }

    /// Favorite ids in insertion order, as persisted.
    pub fn list(&self, scope: &Scope) -> Result<Vec<StopIdentifier>> {
        let ids = self.backend.read(scope)?;
        Ok(ids.iter().map(StopIdentifier::new).collect())
    }

    /// Favorites resolved against the catalog and grouped by zone.
    ///
    /// Zone groups appear in first-catalog-appearance order and stops keep
    /// catalog order within each group. Dangling ids (no matching stop)
    /// are skipped.
    pub fn list_grouped(&self, scope: &Scope, catalog: &StopCatalog) -> Result<Vec<FavoriteGroup>> {
        let ids = self.backend.read(scope)?;
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();

        let mut groups: Vec<FavoriteGroup> = Vec::new();
        for stop in catalog.all() {
            if !wanted.contains(stop.id.as_str()) {
                continue;
            }

            match groups.iter_mut().find(|g| g.zone == stop.zone) {
                Some(group) => group.stops.push(stop.clone()),
                None => groups.push(FavoriteGroup {
                    zone: stop.zone.clone(),
                    stops: vec![stop.clone()],
                }),
            }
        }

        let resolved: usize = groups.iter().map(|g| g.stops.len()).sum();
        if resolved < wanted.len() {
            warn!(
                scope = %scope,
                dangling = wanted.len() - resolved,
                "skipping favorites with no catalog entry"
            );
        }

        Ok(groups)
    }
}
