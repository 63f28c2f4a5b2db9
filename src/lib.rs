//! Earthquake map engine.
//!
//! Classifies each earthquake as land or ocean by point-in-polygon against the
//! country boundaries, relates quakes and cities through a magnitude-driven
//! threat circle, and keeps the hover/click/hide state of the map markers.
//! Rendering, feed fetching and GeoJSON decoding live elsewhere; this crate
//! consumes decoded features and produces per-frame marker views.

pub mod constants;
pub mod correlation;
pub mod error;
pub mod features;
pub mod frame;
pub mod geo;
pub mod interaction;
pub mod marker;
pub mod processing;
pub mod ranking;
pub mod session;
pub mod settings;
pub mod store;
pub mod utils;

pub use error::InvalidFeature;
pub use features::{FeatureSet, PointFeature, PolygonFeature, PropertyTable};
pub use frame::{CityInfo, Frame, MarkerView};
pub use crate::geo::{boundary, distance_km, point_in_ring, point_in_rings, Boundary, Location};
pub use interaction::{HitTest, InputEvent, InteractionState, ProximityHitTest};
pub use marker::{
    AgeBucket, Category, CityMarker, CountryMarker, DepthBucket, EarthquakeMarker, MagnitudeClass,
    QuakeOrigin,
};
pub use processing::{load_markers, LoadReport};
pub use session::MapSession;
pub use settings::Settings;
pub use store::{MarkerId, MarkerRef, MarkerSet};
