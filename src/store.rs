use serde::Serialize;

use crate::geo::Location;
use crate::marker::{Category, CityMarker, CountryMarker, EarthquakeMarker};

/// Handle to an interactive marker: an index into its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "lowercase")]
pub enum MarkerId {
    Quake(usize),
    City(usize),
}

/// Borrowed view of one interactive marker.
#[derive(Debug, Clone, Copy)]
pub enum MarkerRef<'a> {
    Quake(&'a EarthquakeMarker),
    City(&'a CityMarker),
}

impl MarkerRef<'_> {
    pub fn location(&self) -> Location {
        match self {
            MarkerRef::Quake(quake) => quake.location(),
            MarkerRef::City(city) => city.location(),
        }
    }

    pub fn is_hidden(&self) -> bool {
        match self {
            MarkerRef::Quake(quake) => quake.is_hidden(),
            MarkerRef::City(city) => city.is_hidden(),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            MarkerRef::Quake(quake) => quake.category(),
            MarkerRef::City(_) => Category::City,
        }
    }

    pub fn display_radius(&self) -> f64 {
        match self {
            MarkerRef::Quake(quake) => quake.display_radius(),
            MarkerRef::City(city) => city.display_radius(),
        }
    }
}

/// Every marker of a session. Countries are static boundaries; quakes and
/// cities are the interactive set. Nothing is removed once added.
#[derive(Debug, Clone, Default)]
pub struct MarkerSet {
    countries: Vec<CountryMarker>,
    quakes: Vec<EarthquakeMarker>,
    cities: Vec<CityMarker>,
}

impl MarkerSet {
    pub fn new(
        countries: Vec<CountryMarker>,
        quakes: Vec<EarthquakeMarker>,
        cities: Vec<CityMarker>,
    ) -> Self {
        Self {
            countries,
            quakes,
            cities,
        }
    }

    pub fn countries(&self) -> &[CountryMarker] {
        &self.countries
    }

    pub fn quakes(&self) -> &[EarthquakeMarker] {
        &self.quakes
    }

    pub fn cities(&self) -> &[CityMarker] {
        &self.cities
    }

    pub fn len(&self) -> usize {
        self.quakes.len() + self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: MarkerId) -> Option<MarkerRef<'_>> {
        match id {
            MarkerId::Quake(i) => self.quakes.get(i).map(MarkerRef::Quake),
            MarkerId::City(i) => self.cities.get(i).map(MarkerRef::City),
        }
    }

    /// Interactive markers in scan order: quakes first, then cities.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerId, MarkerRef<'_>)> {
        let quakes = self
            .quakes
            .iter()
            .enumerate()
            .map(|(i, quake)| (MarkerId::Quake(i), MarkerRef::Quake(quake)));
        let cities = self
            .cities
            .iter()
            .enumerate()
            .map(|(i, city)| (MarkerId::City(i), MarkerRef::City(city)));
        quakes.chain(cities)
    }

    pub(crate) fn set_hidden(&mut self, id: MarkerId, hidden: bool) {
        match id {
            MarkerId::Quake(i) => {
                if let Some(quake) = self.quakes.get_mut(i) {
                    quake.hidden = hidden;
                }
            }
            MarkerId::City(i) => {
                if let Some(city) = self.cities.get_mut(i) {
                    city.hidden = hidden;
                }
            }
        }
    }

    pub(crate) fn set_ocean_threat_selected(&mut self, city: usize, selected: bool) {
        if let Some(city) = self.cities.get_mut(city) {
            city.ocean_threat_selected = selected;
        }
    }

    pub(crate) fn hide_all(&mut self) {
        self.quakes.iter_mut().for_each(|quake| quake.hidden = true);
        self.cities.iter_mut().for_each(|city| city.hidden = true);
    }

    /// Shows everything again and drops every ocean-threat mark.
    pub(crate) fn unhide_all(&mut self) {
        self.quakes.iter_mut().for_each(|quake| quake.hidden = false);
        for city in &mut self.cities {
            city.hidden = false;
            city.ocean_threat_selected = false;
        }
    }
}
