//! Substring search over normalized stop names.
//!
//! The index is a derived snapshot of the catalog: rebuilt whenever the
//! catalog reloads, never persisted. Searching is synchronous and
//! side-effect-free so callers can debounce keystrokes however they like
//! (150-250 ms works well); nothing here holds timers or state between
//! calls.

use std::sync::Arc;

use crate::catalog::StopCatalog;
use crate::models::types::Stop;
use crate::normalize::normalize;
use crate::spatial::BoundingBox;

/// How many matches are surfaced as dropdown suggestions.
pub const SUGGESTION_LIMIT: usize = 10;

struct IndexEntry {
    stop: Arc<Stop>,
    normalized_name: String,
}

/// Search index over a catalog snapshot, in catalog order.
pub struct SearchIndex {
    entries: Vec<IndexEntry>,
}

impl SearchIndex {
    pub fn new(catalog: &StopCatalog) -> Self {
        let entries = catalog
            .all()
            .iter()
            .map(|stop| IndexEntry {
                stop: stop.clone(),
                normalized_name: normalize(&stop.name),
            })
            .collect();

        Self { entries }
    }

    /// Filter stops whose normalized name contains the normalized query.
    ///
    /// A blank query matches everything: the caller should show the full
    /// catalog, not an empty map. Matches keep catalog order; there is no
    /// relevance ranking.
    pub fn search(&self, raw_query: &str) -> SearchResults {
        let query = normalize(raw_query.trim());

        let matches: Vec<Arc<Stop>> = if query.is_empty() {
            self.entries.iter().map(|e| e.stop.clone()).collect()
        } else {
            self.entries
                .iter()
                .filter(|e| e.normalized_name.contains(&query))
                .map(|e| e.stop.clone())
                .collect()
        };

        SearchResults::new(matches)
    }
}

/// The outcome of one search: the full match set plus derived views.
///
/// Callers need both the capped suggestion list (for a dropdown) and the
/// unbounded match set with its bounding box (for fitting the map extent).
#[derive(Clone, Debug)]
pub struct SearchResults {
    matches: Vec<Arc<Stop>>,
    bounds: Option<BoundingBox>,
}

impl SearchResults {
    fn new(matches: Vec<Arc<Stop>>) -> Self {
        let bounds = BoundingBox::from_points(matches.iter().map(|s| s.location));
        Self { matches, bounds }
    }

    /// Every matching stop, in catalog order.
    pub fn matches(&self) -> &[Arc<Stop>] {
        &self.matches
    }

    /// The first [`SUGGESTION_LIMIT`] matches.
    pub fn suggestions(&self) -> &[Arc<Stop>] {
        &self.matches[..self.matches.len().min(SUGGESTION_LIMIT)]
    }

    /// Bounding box of the full match set; `None` when nothing matched.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}
