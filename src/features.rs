use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::InvalidFeature;
use crate::geo::Location;
use crate::interaction::InputEvent;

/// Free-form key/value table carried by every feature and marker.
pub type PropertyTable = serde_json::Map<String, Value>;

/// An already-decoded point record (earthquake or city).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointFeature {
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub properties: PropertyTable,
}

/// An already-decoded country boundary: one or more rings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PolygonFeature {
    #[serde(default)]
    pub rings: Vec<Vec<Location>>,
    #[serde(default)]
    pub properties: PropertyTable,
}

/// Everything a scene file carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureSet {
    #[serde(default)]
    pub countries: Vec<PolygonFeature>,
    #[serde(default)]
    pub cities: Vec<PointFeature>,
    #[serde(default)]
    pub earthquakes: Vec<PointFeature>,
    #[serde(default)]
    pub events: Vec<InputEvent>,
}

impl PointFeature {
    pub fn new(location: Location) -> Self {
        Self {
            location: Some(location),
            properties: PropertyTable::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    pub fn require_location(&self) -> Result<Location, InvalidFeature> {
        match self.location {
            Some(location) if location.is_finite() => Ok(location),
            Some(location) => Err(InvalidFeature::NotNumeric {
                field: "location",
                value: format!("({}, {})", location.lat, location.lon),
            }),
            None => Err(InvalidFeature::MissingField("location")),
        }
    }
}

impl PolygonFeature {
    pub fn new(name: &str, rings: Vec<Vec<Location>>) -> Self {
        let mut properties = PropertyTable::new();
        properties.insert("name".to_string(), Value::from(name));
        Self { rings, properties }
    }
}

/// Reads a numeric property. The upstream feed stores numbers as text, so
/// numeric strings are accepted too.
pub fn number(properties: &PropertyTable, field: &'static str) -> Result<f64, InvalidFeature> {
    let value = properties
        .get(field)
        .ok_or(InvalidFeature::MissingField(field))?;
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => Ok(n),
        _ => Err(InvalidFeature::NotNumeric {
            field,
            value: value.to_string(),
        }),
    }
}

pub fn optional_number(
    properties: &PropertyTable,
    field: &'static str,
) -> Result<Option<f64>, InvalidFeature> {
    match properties.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => number(properties, field).map(Some),
    }
}

pub fn text(properties: &PropertyTable, field: &'static str) -> Result<String, InvalidFeature> {
    optional_text(properties, field)?.ok_or(InvalidFeature::MissingField(field))
}

pub fn optional_text(
    properties: &PropertyTable,
    field: &'static str,
) -> Result<Option<String>, InvalidFeature> {
    match properties.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(InvalidFeature::NotText {
            field,
            value: other.to_string(),
        }),
    }
}
