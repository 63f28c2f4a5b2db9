use std::cmp::Ordering;

use crate::correlation::nearby_quakes;
use crate::marker::{CityMarker, EarthquakeMarker};
use crate::utils::round_to_hundredths;

/// Strongest first.
pub fn compare_by_magnitude(a: &EarthquakeMarker, b: &EarthquakeMarker) -> Ordering {
    b.magnitude().total_cmp(&a.magnitude())
}

/// All quakes by descending magnitude; equal magnitudes keep input order.
pub fn rank_by_magnitude(quakes: &[EarthquakeMarker]) -> Vec<&EarthquakeMarker> {
    let mut ranked: Vec<&EarthquakeMarker> = quakes.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| compare_by_magnitude(a, b));
    ranked
}

/// The `limit` strongest quakes (fewer if there are not that many).
pub fn top_quakes(quakes: &[EarthquakeMarker], limit: usize) -> Vec<&EarthquakeMarker> {
    let mut ranked = rank_by_magnitude(quakes);
    ranked.truncate(limit);
    ranked
}

/// Quakes threatening one city, summarised.
///
/// When `count` is zero `avg_magnitude` is 0 and `most_recent` is `None`.
#[derive(Debug, Clone)]
pub struct CityAggregate<'a> {
    pub count: usize,
    pub avg_magnitude: f64,
    pub most_recent: Option<&'a EarthquakeMarker>,
}

impl CityAggregate<'_> {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

pub fn city_aggregate<'a>(city: &CityMarker, quakes: &'a [EarthquakeMarker]) -> CityAggregate<'a> {
    let nearby = nearby_quakes(city, quakes);
    if nearby.is_empty() {
        return CityAggregate {
            count: 0,
            avg_magnitude: 0.0,
            most_recent: None,
        };
    }

    let total: f64 = nearby.iter().map(|quake| quake.magnitude()).sum();
    let avg_magnitude = round_to_hundredths(total / nearby.len() as f64);

    // min_by_key returns the first of equal minimums
    let most_recent = nearby.iter().copied().min_by_key(|quake| quake.age());

    CityAggregate {
        count: nearby.len(),
        avg_magnitude,
        most_recent,
    }
}
