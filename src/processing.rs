use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::features::FeatureSet;
use crate::marker::{CityMarker, CountryMarker, EarthquakeMarker};
use crate::store::MarkerSet;

/// Load statistics, reported once per scene.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub countries: usize,
    pub cities: usize,
    pub quakes: usize,
    pub land_quakes: usize,
    pub ocean_quakes: usize,
    pub skipped: usize,
}

/// Turns decoded features into markers.
///
/// Countries are built first so every quake can be classified as land or
/// ocean. Malformed records are logged and skipped; the rest still load.
pub fn load_markers(features: &FeatureSet) -> (MarkerSet, LoadReport) {
    let mut report = LoadReport::default();

    let mut countries = Vec::with_capacity(features.countries.len());
    for (index, feature) in features.countries.iter().enumerate() {
        match CountryMarker::from_feature(feature) {
            Ok(country) => countries.push(country),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed country feature");
                report.skipped += 1;
            }
        }
    }

    // collect keeps feature order
    let built: Vec<_> = features
        .earthquakes
        .par_iter()
        .map(|feature| EarthquakeMarker::from_feature(feature, &countries))
        .collect();

    let mut quakes = Vec::with_capacity(built.len());
    for (index, result) in built.into_iter().enumerate() {
        match result {
            Ok(quake) => {
                if quake.is_on_land() {
                    report.land_quakes += 1;
                } else {
                    report.ocean_quakes += 1;
                }
                quakes.push(quake);
            }
            Err(e) => {
                warn!(index, error = %e, "skipping malformed earthquake feature");
                report.skipped += 1;
            }
        }
    }

    let mut cities = Vec::with_capacity(features.cities.len());
    for (index, feature) in features.cities.iter().enumerate() {
        match CityMarker::from_feature(feature) {
            Ok(city) => cities.push(city),
            Err(e) => {
                warn!(index, error = %e, "skipping malformed city feature");
                report.skipped += 1;
            }
        }
    }

    report.countries = countries.len();
    report.cities = cities.len();
    report.quakes = quakes.len();

    info!(
        countries = report.countries,
        cities = report.cities,
        quakes = report.quakes,
        land = report.land_quakes,
        ocean = report.ocean_quakes,
        skipped = report.skipped,
        "markers loaded"
    );
    debug!(interactive = quakes.len() + cities.len(), "marker set ready");

    (MarkerSet::new(countries, quakes, cities), report)
}
