//! Spatial queries over the catalog.
//!
//! Uses Haversine distance on the WGS-84 sphere approximation. Planar
//! distance on raw degree values is not an acceptable substitute: a degree
//! of longitude shrinks with latitude, so Euclidean comparisons rank
//! nearest stops incorrectly.

use std::sync::Arc;

use geo::{HaversineDistance, Point};

use crate::catalog::StopCatalog;
use crate::models::types::{Position, Stop};

/// Haversine distance between two points in meters.
pub fn haversine_distance(p1: Point, p2: Point) -> f64 {
    p1.haversine_distance(&p2)
}

/// Resolve the stop nearest to a position.
///
/// Linear scan over the catalog; at the expected scale (low hundreds of
/// stops) this is bounded and cheap. Ties resolve to the earliest catalog
/// entry. Returns `None` on an empty catalog.
pub fn nearest_stop(catalog: &StopCatalog, position: &Position) -> Option<Arc<Stop>> {
    let here = position.point();

    let mut best: Option<(&Arc<Stop>, f64)> = None;
    for stop in catalog.all() {
        let d = haversine_distance(here, stop.location);
        match best {
            Some((_, min)) if d >= min => {}
            _ => best = Some((stop, d)),
        }
    }

    best.map(|(stop, _)| stop.clone())
}

/// Latitude/longitude bounding box of a result set, for map-extent fitting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub south_west: Point,
    pub north_east: Point,
}

impl BoundingBox {
    /// Smallest box containing every point. `None` for an empty set.
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;

        let mut bounds = Self {
            south_west: first,
            north_east: first,
        };
        for p in points {
            bounds.south_west = Point::new(
                bounds.south_west.x().min(p.x()),
                bounds.south_west.y().min(p.y()),
            );
            bounds.north_east = Point::new(
                bounds.north_east.x().max(p.x()),
                bounds.north_east.y().max(p.y()),
            );
        }
        Some(bounds)
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.south_west.x() + self.north_east.x()) / 2.0,
            (self.south_west.y() + self.north_east.y()) / 2.0,
        )
    }
}
