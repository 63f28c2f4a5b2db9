use serde::Serialize;

use crate::constants::{KM_PER_MILE, THREAT_BASE_MILES, THREAT_GROWTH};
use crate::geo::{distance_km, Location};
use crate::marker::{CityMarker, CountryMarker, EarthquakeMarker};

/// First country, in enumeration order, whose rings contain the point.
/// `None` means the event happened at sea.
pub fn attribute_country(location: Location, countries: &[CountryMarker]) -> Option<&str> {
    countries
        .iter()
        .find(|country| country.contains(location))
        .map(CountryMarker::name)
}

/// Radius in km within which a quake of this magnitude threatens a city.
pub fn threat_circle(magnitude: f64) -> f64 {
    let miles = THREAT_BASE_MILES * THREAT_GROWTH.powf(2.0 * magnitude - 5.0);
    miles * KM_PER_MILE
}

/// The one distance test behind both directions of the city/quake relation.
pub fn threatens(quake: &EarthquakeMarker, location: Location) -> bool {
    distance_km(quake.location(), location) <= quake.threat_circle()
}

pub fn nearby_quake_indices(city: &CityMarker, quakes: &[EarthquakeMarker]) -> Vec<usize> {
    quakes
        .iter()
        .enumerate()
        .filter(|(_, quake)| threatens(quake, city.location()))
        .map(|(index, _)| index)
        .collect()
}

pub fn threatened_city_indices(quake: &EarthquakeMarker, cities: &[CityMarker]) -> Vec<usize> {
    city_indices_within(quake, cities, quake.threat_circle())
}

fn city_indices_within(
    quake: &EarthquakeMarker,
    cities: &[CityMarker],
    threshold_km: f64,
) -> Vec<usize> {
    cities
        .iter()
        .enumerate()
        .filter(|(_, city)| distance_km(quake.location(), city.location()) <= threshold_km)
        .map(|(index, _)| index)
        .collect()
}

/// Every quake whose threat circle reaches the city, in input order.
pub fn nearby_quakes<'a>(
    city: &CityMarker,
    quakes: &'a [EarthquakeMarker],
) -> Vec<&'a EarthquakeMarker> {
    nearby_quake_indices(city, quakes)
        .into_iter()
        .map(|index| &quakes[index])
        .collect()
}

/// Every city inside the quake's threat circle, in input order.
pub fn threatens_city<'a>(
    quake: &EarthquakeMarker,
    cities: &'a [CityMarker],
) -> Vec<&'a CityMarker> {
    threatens_city_within(quake, cities, quake.threat_circle())
}

/// Like [`threatens_city`] with an explicit radius in km.
pub fn threatens_city_within<'a>(
    quake: &EarthquakeMarker,
    cities: &'a [CityMarker],
    threshold_km: f64,
) -> Vec<&'a CityMarker> {
    city_indices_within(quake, cities, threshold_km)
        .into_iter()
        .map(|index| &cities[index])
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuakeBreakdown {
    /// Countries with at least one quake, in order of first appearance.
    /// Boundaries sharing a name are counted as one country.
    pub by_country: Vec<(String, usize)>,
    pub ocean: usize,
}

/// Counts land quakes per country name and ocean quakes separately.
pub fn country_breakdown(
    countries: &[CountryMarker],
    quakes: &[EarthquakeMarker],
) -> QuakeBreakdown {
    let mut by_country: Vec<(String, usize)> = Vec::new();
    for country in countries {
        if by_country.iter().any(|(name, _)| name == country.name()) {
            continue;
        }
        let count = quakes
            .iter()
            .filter(|quake| quake.country() == Some(country.name()))
            .count();
        if count > 0 {
            by_country.push((country.name().to_string(), count));
        }
    }

    QuakeBreakdown {
        by_country,
        ocean: quakes.iter().filter(|quake| !quake.is_on_land()).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{PointFeature, PolygonFeature};

    fn box_country(name: &str, min_lat: f64, min_lon: f64, size: f64) -> CountryMarker {
        let ring = vec![
            Location::new(min_lat, min_lon),
            Location::new(min_lat, min_lon + size),
            Location::new(min_lat + size, min_lon + size),
            Location::new(min_lat + size, min_lon),
        ];
        CountryMarker::from_feature(&PolygonFeature::new(name, vec![ring])).unwrap()
    }

    fn quake_at(
        lat: f64,
        lon: f64,
        magnitude: f64,
        countries: &[CountryMarker],
    ) -> EarthquakeMarker {
        let feature = PointFeature::new(Location::new(lat, lon))
            .with_property("magnitude", magnitude)
            .with_property("depth", 10.0);
        EarthquakeMarker::from_feature(&feature, countries).unwrap()
    }

    fn city_at(name: &str, lat: f64, lon: f64) -> CityMarker {
        let feature = PointFeature::new(Location::new(lat, lon)).with_property("name", name);
        CityMarker::from_feature(&feature).unwrap()
    }

    #[test]
    fn threat_circle_matches_formula() {
        let expected = 20.0 * 1.8_f64.powi(9) * 1.6;
        assert!((threat_circle(7.0) - expected).abs() < 1e-9);
        assert!((threat_circle(7.0) - 6347.5).abs() < 0.1);
        assert!((threat_circle(2.5) - 32.0).abs() < 1e-9);
    }

    #[test]
    fn threat_circle_strictly_increases() {
        let mut previous = threat_circle(0.0);
        for step in 1..=100 {
            let current = threat_circle(step as f64 * 0.1);
            assert!(current > previous);
            previous = current;
        }
    }

    #[test]
    fn first_matching_country_wins() {
        let countries = vec![
            box_country("First", 0.0, 0.0, 10.0),
            box_country("Overlap", 5.0, 5.0, 10.0),
        ];
        assert_eq!(attribute_country(Location::new(7.0, 7.0), &countries), Some("First"));
        assert_eq!(attribute_country(Location::new(12.0, 12.0), &countries), Some("Overlap"));
        assert_eq!(attribute_country(Location::new(-5.0, -5.0), &countries), None);
    }

    #[test]
    fn attribution_is_idempotent() {
        let countries = vec![box_country("A", 0.0, 0.0, 10.0)];
        let point = Location::new(3.0, 3.0);
        assert_eq!(
            attribute_country(point, &countries),
            attribute_country(point, &countries)
        );
    }

    #[test]
    fn multi_ring_country() {
        let island = vec![
            Location::new(20.0, 20.0),
            Location::new(20.0, 21.0),
            Location::new(21.0, 21.0),
            Location::new(21.0, 20.0),
        ];
        let main = vec![
            Location::new(0.0, 0.0),
            Location::new(0.0, 1.0),
            Location::new(1.0, 1.0),
            Location::new(1.0, 0.0),
        ];
        let archipelago = PolygonFeature::new("Archipelago", vec![main, island]);
        let countries = vec![CountryMarker::from_feature(&archipelago).unwrap()];
        assert_eq!(
            attribute_country(Location::new(20.5, 20.5), &countries),
            Some("Archipelago")
        );
    }

    #[test]
    fn city_500km_from_magnitude_7_is_threatened() {
        let city = city_at("Origin", 0.0, 0.0);
        // 4.5 degrees of longitude on the equator is about 500 km
        let quake = quake_at(0.0, 4.5, 7.0, &[]);
        assert!((distance_km(city.location(), quake.location()) - 500.0).abs() < 1.0);
        let quakes = vec![quake];
        assert_eq!(nearby_quakes(&city, &quakes).len(), 1);
    }

    #[test]
    fn small_quake_does_not_reach_distant_city() {
        let city = city_at("Origin", 0.0, 0.0);
        // threat_circle(3.0) is about 57.6 km
        let quakes = vec![quake_at(0.0, 1.0, 3.0, &[])];
        assert!(nearby_quakes(&city, &quakes).is_empty());
    }

    #[test]
    fn relation_is_symmetric() {
        let cities = vec![
            city_at("Near", 0.0, 0.5),
            city_at("Far", 40.0, 40.0),
            city_at("Middle", 0.0, 3.0),
        ];
        let quakes = vec![
            quake_at(0.0, 0.0, 5.0, &[]),
            quake_at(0.0, 0.0, 6.5, &[]),
            quake_at(10.0, 10.0, 4.0, &[]),
        ];
        for city in &cities {
            for quake in &quakes {
                let from_city = nearby_quakes(city, std::slice::from_ref(quake)).len() == 1;
                let from_quake = threatens_city(quake, std::slice::from_ref(city)).len() == 1;
                assert_eq!(from_city, from_quake, "{} vs M{}", city.name(), quake.magnitude());
            }
        }
    }

    #[test]
    fn explicit_threshold_overrides_circle() {
        let cities = vec![city_at("Near", 0.0, 0.5), city_at("Farther", 0.0, 2.0)];
        let quake = quake_at(0.0, 0.0, 7.0, &[]);
        assert_eq!(threatens_city(&quake, &cities).len(), 2);
        let close = threatens_city_within(&quake, &cities, 100.0);
        assert_eq!(close.len(), 1);
        assert_eq!(close[0].name(), "Near");
    }

    #[test]
    fn nearby_quakes_keeps_input_order() {
        let city = city_at("Origin", 0.0, 0.0);
        let quakes = vec![
            quake_at(0.0, 0.1, 5.0, &[]),
            quake_at(30.0, 30.0, 3.0, &[]),
            quake_at(0.0, -0.1, 6.0, &[]),
        ];
        let nearby = nearby_quakes(&city, &quakes);
        assert_eq!(nearby.len(), 2);
        assert_eq!(nearby[0].magnitude(), 5.0);
        assert_eq!(nearby[1].magnitude(), 6.0);
        assert_eq!(nearby_quake_indices(&city, &quakes), vec![0, 2]);
    }

    #[test]
    fn breakdown_counts_land_and_ocean() {
        let countries = vec![
            box_country("Alpha", 0.0, 0.0, 10.0),
            box_country("Empty", 50.0, 50.0, 1.0),
            box_country("Beta", 20.0, 20.0, 10.0),
        ];
        let quakes = vec![
            quake_at(1.0, 1.0, 5.0, &countries),
            quake_at(21.0, 21.0, 5.0, &countries),
            quake_at(2.0, 2.0, 5.0, &countries),
            quake_at(-40.0, -40.0, 5.0, &countries),
        ];
        let breakdown = country_breakdown(&countries, &quakes);
        assert_eq!(
            breakdown.by_country,
            vec![("Alpha".to_string(), 2), ("Beta".to_string(), 1)]
        );
        assert_eq!(breakdown.ocean, 1);
    }

    #[test]
    fn breakdown_merges_boundaries_with_the_same_name() {
        let countries = vec![
            box_country("Split", 0.0, 0.0, 10.0),
            box_country("Other", 20.0, 20.0, 10.0),
            box_country("Split", 40.0, 40.0, 10.0),
        ];
        let quakes = vec![
            quake_at(1.0, 1.0, 5.0, &countries),
            quake_at(41.0, 41.0, 5.0, &countries),
            quake_at(21.0, 21.0, 5.0, &countries),
            quake_at(-40.0, -40.0, 5.0, &countries),
        ];
        let breakdown = country_breakdown(&countries, &quakes);
        assert_eq!(
            breakdown.by_country,
            vec![("Split".to_string(), 2), ("Other".to_string(), 1)]
        );
        assert_eq!(breakdown.ocean, 1);

        let on_land: usize = breakdown.by_country.iter().map(|(_, count)| count).sum();
        assert_eq!(on_land + breakdown.ocean, quakes.len());
    }

    #[test]
    fn breakdown_with_one_quake_and_duplicate_names() {
        let countries = vec![box_country("A", 0.0, 0.0, 10.0), box_country("A", 0.0, 0.0, 10.0)];
        let quakes = vec![quake_at(5.0, 5.0, 5.0, &countries)];
        let breakdown = country_breakdown(&countries, &quakes);
        assert_eq!(breakdown.by_country, vec![("A".to_string(), 1)]);
        assert_eq!(breakdown.ocean, 0);
    }

    #[test]
    fn index_and_reference_queries_agree() {
        let cities = vec![
            city_at("Near", 0.0, 0.5),
            city_at("Far", 40.0, 40.0),
            city_at("Middle", 0.0, 3.0),
        ];
        let quakes = vec![
            quake_at(0.0, 0.0, 5.0, &[]),
            quake_at(0.0, 0.0, 6.5, &[]),
            quake_at(10.0, 10.0, 4.0, &[]),
        ];
        for city in &cities {
            let by_index: Vec<f64> = nearby_quake_indices(city, &quakes)
                .into_iter()
                .map(|i| quakes[i].magnitude())
                .collect();
            let by_ref: Vec<f64> = nearby_quakes(city, &quakes)
                .iter()
                .map(|quake| quake.magnitude())
                .collect();
            assert_eq!(by_index, by_ref, "{}", city.name());
        }
        for quake in &quakes {
            let by_index: Vec<&str> = threatened_city_indices(quake, &cities)
                .into_iter()
                .map(|i| cities[i].name())
                .collect();
            let by_ref: Vec<&str> = threatens_city(quake, &cities)
                .iter()
                .map(|city| city.name())
                .collect();
            assert_eq!(by_index, by_ref, "M{}", quake.magnitude());
        }
    }
}
