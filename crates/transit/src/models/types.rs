//! Core data types for the stop catalog.

use std::sync::Arc;

use geo::Point;
use serde::Deserialize;

use crate::identifiers::{StopIdentifier, ZoneIdentifier};

// ============================================================================
// Data Structures
// ============================================================================

/// A single stop in the catalog. Immutable after load.
///
/// `location` follows the geo convention: x = longitude, y = latitude.
#[derive(Clone, Debug)]
pub struct Stop {
    pub id: StopIdentifier,
    pub name: Arc<str>,
    pub location: Point,
    pub detail_url: Option<Arc<str>>,
    pub zone: ZoneIdentifier,
}

impl Stop {
    pub fn latitude(&self) -> f64 {
        self.location.y()
    }

    pub fn longitude(&self) -> f64 {
        self.location.x()
    }
}

/// A single position reading from an external geolocation provider.
///
/// The engine never acquires positions itself; one reading arrives per
/// locate request, or a failure in its place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy_m: Option<f64>,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m: None,
        }
    }

    pub fn with_accuracy(latitude: f64, longitude: f64, accuracy_m: f64) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_m: Some(accuracy_m),
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.longitude, self.latitude)
    }
}

// ============================================================================
// Raw Dataset Records
// ============================================================================

/// A source id as it appears in the dataset: string or number.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    pub fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// One element of the raw dataset, before validation.
///
/// Every field is optional at this stage; records missing the required
/// pieces are filtered out during catalog construction rather than
/// failing the whole load.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawStopRecord {
    pub id: Option<RawId>,
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub url: Option<String>,
    pub zone: Option<String>,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The dataset could not be fetched. Callers fall back to an empty
    /// catalog rather than crashing.
    #[error("stop dataset unavailable: {0}")]
    SourceUnavailable(String),

    /// The dataset was fetched but is not a top-level list of records.
    #[error("stop dataset is not a list of records")]
    NotAList,
}

pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_id_string_form() {
        assert_eq!(RawId::Text("a1".into()).into_string(), "a1");
        assert_eq!(RawId::Number(17).into_string(), "17");
    }

    #[test]
    fn test_raw_record_tolerates_missing_fields() {
        let record: RawStopRecord = serde_json::from_str(r#"{"name":"Porto"}"#).unwrap();
        assert_eq!(record.name.as_deref(), Some("Porto"));
        assert!(record.lat.is_none());
        assert!(record.id.is_none());
    }

    #[test]
    fn test_raw_record_numeric_and_string_ids() {
        let numeric: RawStopRecord =
            serde_json::from_str(r#"{"id":3,"name":"a","lat":1.0,"lon":2.0}"#).unwrap();
        let textual: RawStopRecord =
            serde_json::from_str(r#"{"id":"3","name":"a","lat":1.0,"lon":2.0}"#).unwrap();

        assert_eq!(numeric.id.unwrap().into_string(), "3");
        assert_eq!(textual.id.unwrap().into_string(), "3");
    }

    #[test]
    fn test_position_point_axis_order() {
        let pos = Position::new(38.19, 15.55);
        assert_eq!(pos.point().x(), 15.55); // longitude on x
        assert_eq!(pos.point().y(), 38.19); // latitude on y
    }
}
