//! In-memory stop catalog built from a raw dataset.
//!
//! The catalog is read-only after construction: search and spatial queries
//! may read it concurrently without coordination.

use std::collections::HashMap;
use std::sync::Arc;

use geo::Point;
use tracing::{debug, info, warn};

use crate::catalog::source::StopSource;
use crate::identifiers::{StopIdentifier, ZoneIdentifier};
use crate::models::types::{LoadError, RawStopRecord, Result, Stop};

/// In-memory stop catalog with id lookup.
///
/// Insertion order is preserved: it is the basis for synthesized ids and
/// for deterministic first-match-wins tie-breaks in queries. This type is
/// cheap to clone since all stops are stored in `Arc`s.
#[derive(Clone, Default)]
pub struct StopCatalog {
    stops: Vec<Arc<Stop>>,
    stop_map: HashMap<StopIdentifier, Arc<Stop>>,
}

impl StopCatalog {
    /// Create an empty catalog (the degraded state after a failed load).
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from raw records.
    ///
    /// Records missing a name or either coordinate are dropped silently;
    /// partial datasets are accepted. Missing ids are synthesized from the
    /// record's position in the source sequence. A record whose explicit id
    /// duplicates an earlier one is dropped to keep ids unique.
    pub fn from_records(records: Vec<RawStopRecord>) -> Self {
        let total = records.len();
        let mut stops = Vec::new();
        let mut stop_map: HashMap<StopIdentifier, Arc<Stop>> = HashMap::new();

        for (position, record) in records.into_iter().enumerate() {
            let Some(stop) = validate(position, record) else {
                continue;
            };

            if stop_map.contains_key(&stop.id) {
                warn!(id = %stop.id, "dropping record with duplicate id");
                continue;
            }

            let stop = Arc::new(stop);
            stop_map.insert(stop.id.clone(), stop.clone());
            stops.push(stop);
        }

        if stops.len() < total {
            debug!(dropped = total - stops.len(), "filtered invalid records");
        }
        info!(stops = stops.len(), "stop catalog built");

        Self { stops, stop_map }
    }

    /// Parse a JSON dataset. The top level must be an array of records.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_slice(bytes).map_err(|_| LoadError::NotAList)?;

        let serde_json::Value::Array(elements) = value else {
            return Err(LoadError::NotAList);
        };

        // Elements that are not record-shaped are dropped like any other
        // invalid record.
        let records = elements
            .into_iter()
            .map(|el| serde_json::from_value(el).unwrap_or_default())
            .collect();

        Ok(Self::from_records(records))
    }

    /// Fetch the dataset from a source and build the catalog.
    pub async fn load(source: &dyn StopSource) -> Result<Self> {
        let bytes = source.fetch().await?;
        Self::from_slice(&bytes)
    }

    pub fn get(&self, id: &StopIdentifier) -> Option<Arc<Stop>> {
        self.stop_map.get(id).cloned()
    }

    /// All stops in insertion order.
    pub fn all(&self) -> &[Arc<Stop>] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

/// Apply the load-time validation policy to one record.
fn validate(position: usize, record: RawStopRecord) -> Option<Stop> {
    let name = record.name?;
    if name.trim().is_empty() {
        return None;
    }

    let (lat, lon) = (record.lat?, record.lon?);
    if !coordinates_plausible(lat, lon) {
        return None;
    }

    let id = match record.id {
        Some(raw) => StopIdentifier::new(raw.into_string()),
        None => StopIdentifier::from_position(position),
    };

    let zone = match record.zone {
        Some(zone) if !zone.trim().is_empty() => ZoneIdentifier::new(zone),
        _ => ZoneIdentifier::fallback(),
    };

    Some(Stop {
        id,
        name: name.into(),
        location: Point::new(lon, lat),
        detail_url: record.url.map(Into::into),
        zone,
    })
}

fn coordinates_plausible(lat: f64, lon: f64) -> bool {
    lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 && lon.abs() <= 180.0
}
