use geo::{Contains, Coord, HaversineDistance, LineString, MultiPolygon, Point, Polygon};
use serde::{Deserialize, Serialize};

use crate::constants::EARTH_RADIUS_KM;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn distance_to(&self, other: Location) -> f64 {
        distance_km(*self, other)
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

// Longitude is x, latitude is y
impl From<Location> for Coord<f64> {
    fn from(location: Location) -> Self {
        Coord {
            x: location.lon,
            y: location.lat,
        }
    }
}

impl From<Location> for Point<f64> {
    fn from(location: Location) -> Self {
        Point(location.into())
    }
}

/// Country boundary: one polygon per ring.
pub type Boundary = MultiPolygon<f64>;

/// Great-circle surface distance in kilometers (haversine).
pub fn distance_km(a: Location, b: Location) -> f64 {
    let meters = Point::from(a).haversine_distance(&Point::from(b));
    // Rounding can push near-antipodal points to NaN; min() keeps the other operand
    (meters / 1000.0).min(std::f64::consts::PI * EARTH_RADIUS_KM)
}

/// Builds a boundary from rings of at least three points. Open rings are
/// closed; shorter rings are left out.
pub fn boundary(rings: &[Vec<Location>]) -> Boundary {
    let polygons = rings
        .iter()
        .filter(|ring| ring.len() >= 3)
        .map(|ring| polygon(ring))
        .collect();
    MultiPolygon(polygons)
}

fn polygon(ring: &[Location]) -> Polygon<f64> {
    let coords: Vec<Coord<f64>> = ring.iter().copied().map(Coord::from).collect();
    Polygon::new(LineString::from(coords), vec![])
}

/// Containment test against one ring, longitude as x and latitude as y.
///
/// The ring may be given open or closed (first point repeated at the end).
/// Rings with fewer than three points contain nothing, and points on the
/// ring itself count as outside.
pub fn point_in_ring(point: Location, ring: &[Location]) -> bool {
    ring.len() >= 3 && polygon(ring).contains(&Point::from(point))
}

/// Containment against a multi-ring boundary: true if any ring contains the point.
pub fn point_in_rings(point: Location, rings: &Boundary) -> bool {
    rings.contains(&Point::from(point))
}
