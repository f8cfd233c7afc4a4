//! View synchronization contract.
//!
//! The engine renders nothing. Completed queries and favorite mutations
//! are published as plain-data events; rendering surfaces (map markers, a
//! suggestions dropdown, a favorites panel, popup toggles) attach as
//! [`ViewSurface`]s and fully refresh whatever the event affects. No
//! incremental diffs are promised or required.

use std::sync::Arc;

use fermata_transit::identifiers::StopIdentifier;
use fermata_transit::models::Stop;
use fermata_transit::spatial::BoundingBox;

use crate::favorites::FavoriteGroup;
use crate::scope::Scope;

/// One engine-side change a surface may need to reflect.
#[derive(Clone, Debug)]
pub enum ViewEvent {
    /// A catalog finished loading (or a failed load left it empty).
    CatalogLoaded { stop_count: usize },

    /// A search completed. `matches` is the unbounded set for marker
    /// filtering, `suggestions` the capped list for a dropdown, `bounds`
    /// the extent to fit the viewport to.
    SearchCompleted {
        query: String,
        matches: Vec<Arc<Stop>>,
        suggestions: Vec<Arc<Stop>>,
        bounds: Option<BoundingBox>,
    },

    /// A locate request resolved. `None` means the catalog was empty.
    NearestResolved { stop: Option<Arc<Stop>> },

    /// One stop's favorite state changed; popup stars and marker badges
    /// update from this.
    FavoriteToggled {
        scope: Scope,
        id: StopIdentifier,
        is_favorite: bool,
    },

    /// The full grouped listing after any favorites mutation; the
    /// favorites panel redraws from this.
    FavoritesRefreshed {
        scope: Scope,
        groups: Vec<FavoriteGroup>,
    },
}

/// A rendering surface fed by the engine.
pub trait ViewSurface: Send {
    fn apply(&mut self, event: &ViewEvent);
}

/// Fan-out of engine events to attached surfaces.
#[derive(Default)]
pub struct ViewSync {
    surfaces: Vec<Box<dyn ViewSurface>>,
}

impl ViewSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, surface: Box<dyn ViewSurface>) {
        self.surfaces.push(surface);
    }

    pub fn publish(&mut self, event: &ViewEvent) {
        for surface in &mut self.surfaces {
            surface.apply(event);
        }
    }
}
