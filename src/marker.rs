use serde::{Deserialize, Serialize};

use crate::constants::{
    CITY_MARKER_SIZE, QUAKE_RADIUS_PER_MAGNITUDE, THRESHOLD_DEEP, THRESHOLD_INTERMEDIATE,
    THRESHOLD_LIGHT, THRESHOLD_MODERATE,
};
use crate::correlation;
use crate::error::InvalidFeature;
use crate::features::{self, PointFeature, PolygonFeature, PropertyTable};
use crate::geo::{boundary, point_in_rings, Boundary, Location};

/// Coarse recency of an event. Ordered most recent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeBucket {
    PastHour = 1,
    PastDay = 2,
    PastWeek = 3,
    PastMonth = 4,
}

impl AgeBucket {
    /// Classifies a feed label such as "Past Hour" or "past week".
    /// Anything unrecognised counts as the oldest bucket.
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("hour") {
            AgeBucket::PastHour
        } else if label.contains("day") {
            AgeBucket::PastDay
        } else if label.contains("week") {
            AgeBucket::PastWeek
        } else {
            AgeBucket::PastMonth
        }
    }

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// Events from the last hour or day get the cross overlay.
    pub fn is_recent(self) -> bool {
        matches!(self, AgeBucket::PastHour | AgeBucket::PastDay)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepthBucket {
    Shallow,
    Intermediate,
    Deep,
}

impl DepthBucket {
    pub fn from_depth(depth_km: f64) -> Self {
        if depth_km < THRESHOLD_INTERMEDIATE {
            DepthBucket::Shallow
        } else if depth_km < THRESHOLD_DEEP {
            DepthBucket::Intermediate
        } else {
            DepthBucket::Deep
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MagnitudeClass {
    Light,
    Moderate,
    Strong,
}

impl MagnitudeClass {
    pub fn from_magnitude(magnitude: f64) -> Self {
        if magnitude < THRESHOLD_LIGHT {
            MagnitudeClass::Light
        } else if magnitude < THRESHOLD_MODERATE {
            MagnitudeClass::Moderate
        } else {
            MagnitudeClass::Strong
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    LandQuake,
    OceanQuake,
    City,
}

/// Where a quake originated, fixed once at load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuakeOrigin {
    Land { country: String },
    Ocean,
}

#[derive(Debug, Clone)]
pub struct CountryMarker {
    name: String,
    boundary: Boundary,
    properties: PropertyTable,
}

impl CountryMarker {
    pub fn from_feature(feature: &PolygonFeature) -> Result<Self, InvalidFeature> {
        let name = features::text(&feature.properties, "name")?;
        let rings: Vec<Vec<Location>> = feature
            .rings
            .iter()
            .filter(|ring| ring.len() >= 3 && ring.iter().all(Location::is_finite))
            .cloned()
            .collect();
        if rings.is_empty() {
            return Err(InvalidFeature::EmptyBoundary(name));
        }
        Ok(Self {
            name,
            boundary: boundary(&rings),
            properties: feature.properties.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn properties(&self) -> &PropertyTable {
        &self.properties
    }

    pub fn contains(&self, point: Location) -> bool {
        point_in_rings(point, &self.boundary)
    }
}

#[derive(Debug, Clone)]
pub struct CityMarker {
    location: Location,
    name: String,
    country: String,
    population: f64,
    properties: PropertyTable,
    pub(crate) hidden: bool,
    pub(crate) ocean_threat_selected: bool,
}

impl CityMarker {
    pub fn from_feature(feature: &PointFeature) -> Result<Self, InvalidFeature> {
        let location = feature.require_location()?;
        let props = &feature.properties;
        Ok(Self {
            location,
            name: features::text(props, "name")?,
            country: features::optional_text(props, "country")?.unwrap_or_default(),
            population: features::optional_number(props, "population")?.unwrap_or(0.0),
            properties: props.clone(),
            hidden: false,
            ocean_threat_selected: false,
        })
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// Population in millions.
    pub fn population(&self) -> f64 {
        self.population
    }

    pub fn properties(&self) -> &PropertyTable {
        &self.properties
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Set while a clicked ocean quake threatens this city.
    pub fn ocean_threat_selected(&self) -> bool {
        self.ocean_threat_selected
    }

    pub fn display_radius(&self) -> f64 {
        CITY_MARKER_SIZE
    }

    /// "<name>, <country>", or just the name when the country is unknown.
    pub fn label(&self) -> String {
        if self.country.is_empty() {
            self.name.clone()
        } else {
            format!("{}, {}", self.name, self.country)
        }
    }

    pub fn popup_lines(&self) -> Vec<String> {
        vec![
            self.label(),
            format!("Population: {} Million", self.population),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct EarthquakeMarker {
    location: Location,
    magnitude: f64,
    depth: f64,
    age: AgeBucket,
    title: String,
    origin: QuakeOrigin,
    properties: PropertyTable,
    pub(crate) hidden: bool,
}

impl EarthquakeMarker {
    /// Builds the marker and classifies it against the country set.
    pub fn from_feature(
        feature: &PointFeature,
        countries: &[CountryMarker],
    ) -> Result<Self, InvalidFeature> {
        let location = feature.require_location()?;
        let props = &feature.properties;
        let magnitude = features::number(props, "magnitude")?;
        let depth = features::number(props, "depth")?;
        let age = features::optional_text(props, "age")?
            .map(|label| AgeBucket::from_label(&label))
            .unwrap_or(AgeBucket::PastMonth);
        let title = features::optional_text(props, "title")?.unwrap_or_default();

        let origin = match correlation::attribute_country(location, countries) {
            Some(country) => QuakeOrigin::Land {
                country: country.to_string(),
            },
            None => QuakeOrigin::Ocean,
        };

        Ok(Self {
            location,
            magnitude,
            depth,
            age,
            title,
            origin,
            properties: props.clone(),
            hidden: false,
        })
    }

    pub fn location(&self) -> Location {
        self.location
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Depth in km.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    pub fn age(&self) -> AgeBucket {
        self.age
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn origin(&self) -> &QuakeOrigin {
        &self.origin
    }

    pub fn properties(&self) -> &PropertyTable {
        &self.properties
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_on_land(&self) -> bool {
        matches!(self.origin, QuakeOrigin::Land { .. })
    }

    /// Attributed country for land quakes.
    pub fn country(&self) -> Option<&str> {
        match &self.origin {
            QuakeOrigin::Land { country } => Some(country),
            QuakeOrigin::Ocean => None,
        }
    }

    pub fn category(&self) -> Category {
        match self.origin {
            QuakeOrigin::Land { .. } => Category::LandQuake,
            QuakeOrigin::Ocean => Category::OceanQuake,
        }
    }

    /// Drawn size, not to be confused with the threat circle.
    pub fn display_radius(&self) -> f64 {
        QUAKE_RADIUS_PER_MAGNITUDE * self.magnitude
    }

    pub fn threat_circle(&self) -> f64 {
        correlation::threat_circle(self.magnitude)
    }

    pub fn depth_bucket(&self) -> DepthBucket {
        DepthBucket::from_depth(self.depth)
    }

    pub fn magnitude_class(&self) -> MagnitudeClass {
        MagnitudeClass::from_magnitude(self.magnitude)
    }
}
