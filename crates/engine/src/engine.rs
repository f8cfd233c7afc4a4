//! The engine facade.
//!
//! Wires the catalog, search index, favorites store, locate lifecycle,
//! and view fan-out into the operation set the UI layer calls. All
//! operations are synchronous except catalog loading, which awaits the
//! external source exactly once.

use tracing::{info, warn};

use fermata_transit::catalog::{StopCatalog, StopSource};
use fermata_transit::identifiers::StopIdentifier;
use fermata_transit::models::{LoadError, Position};
use fermata_transit::search::{SearchIndex, SearchResults};
use fermata_transit::spatial::nearest_stop;

use crate::favorites::{FavoriteGroup, FavoritesStore, StoreError};
use crate::locate::{LocateOutcome, LocateSession, LocateTicket, PositionError};
use crate::scope::Scope;
use crate::sync::{ViewEvent, ViewSurface, ViewSync};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Position(#[from] PositionError),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Stop query & favorites engine.
///
/// Starts degraded (empty catalog) until [`load_catalog`](Self::load_catalog)
/// succeeds; every query is well-defined in the degraded state.
pub struct StopEngine {
    catalog: StopCatalog,
    index: SearchIndex,
    favorites: FavoritesStore,
    views: ViewSync,
    locate: LocateSession,
}

impl StopEngine {
    pub fn new(favorites: FavoritesStore) -> Self {
        let catalog = StopCatalog::new();
        let index = SearchIndex::new(&catalog);

        Self {
            catalog,
            index,
            favorites,
            views: ViewSync::new(),
            locate: LocateSession::new(),
        }
    }

    /// Attach a rendering surface; it receives every subsequent event.
    pub fn attach_view(&mut self, surface: Box<dyn ViewSurface>) {
        self.views.attach(surface);
    }

    pub fn catalog(&self) -> &StopCatalog {
        &self.catalog
    }

    // ---- Catalog ----

    /// Load (or reload) the catalog from a source.
    ///
    /// On failure the engine keeps serving an empty catalog until a later
    /// reload succeeds; the error is returned for the caller to surface.
    pub async fn load_catalog(&mut self, source: &dyn StopSource) -> Result<usize> {
        match StopCatalog::load(source).await {
            Ok(catalog) => {
                info!(stops = catalog.len(), "catalog loaded");
                self.index = SearchIndex::new(&catalog);
                self.catalog = catalog;
                let stop_count = self.catalog.len();
                self.views.publish(&ViewEvent::CatalogLoaded { stop_count });
                Ok(stop_count)
            }
            Err(e) => {
                warn!(error = %e, "catalog load failed, continuing with empty catalog");
                self.catalog = StopCatalog::new();
                self.index = SearchIndex::new(&self.catalog);
                self.views.publish(&ViewEvent::CatalogLoaded { stop_count: 0 });
                Err(e.into())
            }
        }
    }

    // ---- Search ----

    /// Run a search and publish the result to attached surfaces.
    ///
    /// Cheap enough to call on every (debounced) keystroke.
    pub fn search(&mut self, raw_query: &str) -> SearchResults {
        let results = self.index.search(raw_query);

        self.views.publish(&ViewEvent::SearchCompleted {
            query: raw_query.to_string(),
            matches: results.matches().to_vec(),
            suggestions: results.suggestions().to_vec(),
            bounds: results.bounds(),
        });

        results
    }

    // ---- Locate ----

    /// Start a locate-me request; the caller now asks its position
    /// provider for one reading and feeds it to
    /// [`complete_locate`](Self::complete_locate).
    pub fn begin_locate(&mut self) -> LocateTicket {
        self.locate.begin()
    }

    /// Abandon the in-flight locate request; a reading that still arrives
    /// for it will be ignored.
    pub fn cancel_locate(&mut self) {
        self.locate.cancel();
    }

    /// Feed the provider's reading (or failure) back to the engine.
    ///
    /// Stale tickets yield [`LocateOutcome::Ignored`] without publishing.
    /// Provider failures pass through verbatim; the engine never retries.
    pub fn complete_locate(
        &mut self,
        ticket: LocateTicket,
        reading: std::result::Result<Position, PositionError>,
    ) -> Result<LocateOutcome> {
        if !self.locate.finish(ticket) {
            return Ok(LocateOutcome::Ignored);
        }

        let position = reading?;
        let stop = nearest_stop(&self.catalog, &position);
        self.views.publish(&ViewEvent::NearestResolved { stop: stop.clone() });

        Ok(match stop {
            Some(stop) => LocateOutcome::Nearest(stop),
            None => LocateOutcome::NoStops,
        })
    }

    // ---- Favorites ----

    pub fn is_favorite(&self, scope: &Scope, id: &StopIdentifier) -> Result<bool> {
        Ok(self.favorites.is_favorite(scope, id)?)
    }

    /// Flip a stop's favorite state; returns the new state.
    pub fn toggle_favorite(&mut self, scope: &Scope, id: &StopIdentifier) -> Result<bool> {
        let is_favorite = self.favorites.toggle(scope, id)?;
        self.publish_favorite_change(scope, id, is_favorite)?;
        Ok(is_favorite)
    }

    /// Explicit add, for affordances that are not toggles.
    pub fn add_favorite(&mut self, scope: &Scope, id: &StopIdentifier) -> Result<bool> {
        let changed = self.favorites.add(scope, id)?;
        if changed {
            self.publish_favorite_change(scope, id, true)?;
        }
        Ok(changed)
    }

    /// Explicit remove, e.g. the delete button in a favorites panel.
    pub fn remove_favorite(&mut self, scope: &Scope, id: &StopIdentifier) -> Result<bool> {
        let changed = self.favorites.remove(scope, id)?;
        if changed {
            self.publish_favorite_change(scope, id, false)?;
        }
        Ok(changed)
    }

    /// Grouped favorites listing for a panel redraw.
    pub fn favorites_grouped(&self, scope: &Scope) -> Result<Vec<FavoriteGroup>> {
        Ok(self.favorites.list_grouped(scope, &self.catalog)?)
    }

    fn publish_favorite_change(
        &mut self,
        scope: &Scope,
        id: &StopIdentifier,
        is_favorite: bool,
    ) -> Result<()> {
        self.views.publish(&ViewEvent::FavoriteToggled {
            scope: scope.clone(),
            id: id.clone(),
            is_favorite,
        });

        let groups = self.favorites.list_grouped(scope, &self.catalog)?;
        self.views.publish(&ViewEvent::FavoritesRefreshed {
            scope: scope.clone(),
            groups,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fermata_transit::catalog::InMemorySource;

    const DATASET: &str = r#"[
        {"id": 1, "name": "Piazza Duomo", "lat": 38.19, "lon": 15.55},
        {"id": 2, "name": "Stazione Università", "lat": 38.11, "lon": 15.65}
    ]"#;

    fn engine() -> StopEngine {
        StopEngine::new(FavoritesStore::in_memory())
    }

    async fn loaded_engine() -> StopEngine {
        let mut engine = engine();
        engine
            .load_catalog(&InMemorySource::new(DATASET))
            .await
            .unwrap();
        engine
    }

    struct FailingSource;

    impl StopSource for FailingSource {
        fn fetch<'a>(
            &'a self,
        ) -> std::pin::Pin<
            Box<
                dyn std::future::Future<Output = fermata_transit::models::Result<Vec<u8>>>
                    + Send
                    + 'a,
            >,
        > {
            Box::pin(std::future::ready(Err(LoadError::SourceUnavailable(
                "connection refused".into(),
            ))))
        }
    }

    #[tokio::test]
    async fn test_failed_load_degrades_to_empty_catalog() {
        let mut engine = loaded_engine().await;
        assert_eq!(engine.catalog().len(), 2);

        let err = engine.load_catalog(&FailingSource).await.unwrap_err();
        assert!(matches!(
            err,
            EngineError::Load(LoadError::SourceUnavailable(_))
        ));

        // Degraded, not broken: queries answer over the empty catalog.
        assert!(engine.catalog().is_empty());
        assert!(engine.search("duomo").is_empty());
        let ticket = engine.begin_locate();
        assert!(matches!(
            engine
                .complete_locate(ticket, Ok(Position::new(38.0, 15.0)))
                .unwrap(),
            LocateOutcome::NoStops
        ));
    }

    #[tokio::test]
    async fn test_locate_resolves_nearest() {
        let mut engine = loaded_engine().await;

        let ticket = engine.begin_locate();
        let outcome = engine
            .complete_locate(ticket, Ok(Position::new(38.12, 15.64)))
            .unwrap();

        match outcome {
            LocateOutcome::Nearest(stop) => assert_eq!(stop.id, StopIdentifier::new("2")),
            other => panic!("expected nearest stop, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_late_reading_after_cancel_is_ignored() {
        let mut engine = loaded_engine().await;

        let ticket = engine.begin_locate();
        engine.cancel_locate();

        let outcome = engine
            .complete_locate(ticket, Ok(Position::new(38.12, 15.64)))
            .unwrap();
        assert!(matches!(outcome, LocateOutcome::Ignored));
    }

    #[tokio::test]
    async fn test_provider_failure_passes_through() {
        let mut engine = loaded_engine().await;

        let ticket = engine.begin_locate();
        let err = engine
            .complete_locate(ticket, Err(PositionError::PermissionDenied))
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Position(PositionError::PermissionDenied)
        ));
    }

    #[tokio::test]
    async fn test_favorite_flow() {
        let mut engine = loaded_engine().await;
        let scope = Scope::default();
        let id = StopIdentifier::new("1");

        assert!(engine.toggle_favorite(&scope, &id).unwrap());
        assert!(engine.is_favorite(&scope, &id).unwrap());

        let groups = engine.favorites_grouped(&scope).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(&*groups[0].stops[0].name, "Piazza Duomo");

        assert!(!engine.toggle_favorite(&scope, &id).unwrap());
        assert!(engine.favorites_grouped(&scope).unwrap().is_empty());
    }
}
