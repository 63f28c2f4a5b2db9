use serde::Serialize;

use crate::geo::Location;
use crate::interaction::InteractionState;
use crate::marker::{Category, DepthBucket, MagnitudeClass};
use crate::ranking::city_aggregate;
use crate::store::{MarkerId, MarkerRef, MarkerSet};

/// What the renderer needs to paint one marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub id: MarkerId,
    pub category: Category,
    pub location: Location,
    pub hovered: bool,
    pub clicked: bool,
    pub hidden: bool,
    pub display_radius: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<DepthBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude_class: Option<MagnitudeClass>,
    /// Quake from the past hour or day.
    pub recent: bool,
    pub ocean_threat_selected: bool,
    pub popup: Vec<String>,
}

/// Info panel shown for a clicked city with at least one nearby quake.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityInfo {
    pub city: String,
    pub count: usize,
    pub avg_magnitude: f64,
    pub most_recent_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub markers: Vec<MarkerView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_info: Option<CityInfo>,
}

impl Frame {
    pub fn capture(markers: &MarkerSet, state: &InteractionState) -> Self {
        let views = markers
            .iter()
            .map(|(id, marker)| marker_view(id, marker, state))
            .collect();
        Frame {
            markers: views,
            city_info: city_info(markers, state),
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &MarkerView> {
        self.markers.iter().filter(|view| !view.hidden)
    }

    pub fn view(&self, id: MarkerId) -> Option<&MarkerView> {
        self.markers.iter().find(|view| view.id == id)
    }
}

fn marker_view(id: MarkerId, marker: MarkerRef<'_>, state: &InteractionState) -> MarkerView {
    let mut view = MarkerView {
        id,
        category: marker.category(),
        location: marker.location(),
        hovered: state.is_hovered(id),
        clicked: state.is_clicked(id),
        hidden: marker.is_hidden(),
        display_radius: marker.display_radius(),
        depth: None,
        magnitude_class: None,
        recent: false,
        ocean_threat_selected: false,
        popup: Vec::new(),
    };
    match marker {
        MarkerRef::Quake(quake) => {
            view.depth = Some(quake.depth_bucket());
            view.magnitude_class = Some(quake.magnitude_class());
            view.recent = quake.age().is_recent();
            view.popup = vec![quake.title().to_string()];
        }
        MarkerRef::City(city) => {
            view.ocean_threat_selected = city.ocean_threat_selected();
            view.popup = city.popup_lines();
        }
    }
    view
}

fn city_info(markers: &MarkerSet, state: &InteractionState) -> Option<CityInfo> {
    let MarkerId::City(index) = state.clicked()? else {
        return None;
    };
    let city = markers.cities().get(index)?;
    let aggregate = city_aggregate(city, markers.quakes());
    let most_recent = aggregate.most_recent?;
    Some(CityInfo {
        city: city.label(),
        count: aggregate.count,
        avg_magnitude: aggregate.avg_magnitude,
        most_recent_title: most_recent.title().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::PointFeature;
    use crate::interaction::ProximityHitTest;
    use crate::marker::{CityMarker, EarthquakeMarker};

    fn set() -> MarkerSet {
        let quake = |title: &str, lat: f64, magnitude: f64, depth: f64, age: &str| {
            let feature = PointFeature::new(Location::new(lat, 0.0))
                .with_property("magnitude", magnitude)
                .with_property("depth", depth)
                .with_property("age", age)
                .with_property("title", title);
            EarthquakeMarker::from_feature(&feature, &[]).unwrap()
        };
        let city = |name: &str, lat: f64| {
            let feature = PointFeature::new(Location::new(lat, 0.0))
                .with_property("name", name)
                .with_property("country", "Peru")
                .with_property("population", 9.7);
            CityMarker::from_feature(&feature).unwrap()
        };
        MarkerSet::new(
            vec![],
            vec![
                quake("shallow", 0.0, 4.0, 10.0, "Past Hour"),
                quake("deep", 0.5, 6.0, 500.0, "Past Week"),
            ],
            vec![city("Lima", 0.2), city("Cusco", 40.0)],
        )
    }

    #[test]
    fn quiet_frame_shows_everything() {
        let markers = set();
        let frame = Frame::capture(&markers, &InteractionState::new());
        assert_eq!(frame.markers.len(), 4);
        assert_eq!(frame.visible().count(), 4);
        assert!(frame.city_info.is_none());

        let shallow = frame.view(MarkerId::Quake(0)).unwrap();
        assert_eq!(shallow.depth, Some(DepthBucket::Shallow));
        assert_eq!(shallow.magnitude_class, Some(MagnitudeClass::Moderate));
        assert!(shallow.recent);
        assert_eq!(shallow.popup, vec!["shallow".to_string()]);
        assert_eq!(shallow.category, Category::OceanQuake);

        let deep = frame.view(MarkerId::Quake(1)).unwrap();
        assert_eq!(deep.depth, Some(DepthBucket::Deep));
        assert!(!deep.recent);

        let lima = frame.view(MarkerId::City(0)).unwrap();
        assert_eq!(lima.category, Category::City);
        assert_eq!(lima.depth, None);
        assert_eq!(lima.popup[0], "Lima, Peru");
    }

    #[test]
    fn clicked_city_gets_info_panel() {
        let mut markers = set();
        let mut state = InteractionState::new();
        let hit = ProximityHitTest { tolerance_km: 1.0 };
        state.hover(&markers, &hit, Location::new(0.2, 0.0));
        state.click(&mut markers, &hit, Location::new(0.2, 0.0));
        let frame = Frame::capture(&markers, &state);

        let lima = frame.view(MarkerId::City(0)).unwrap();
        assert!(lima.clicked && lima.hovered && !lima.hidden);
        assert!(frame.view(MarkerId::City(1)).unwrap().hidden);

        let info = frame.city_info.unwrap();
        assert_eq!(info.city, "Lima, Peru");
        assert_eq!(info.count, 2);
        assert_eq!(info.avg_magnitude, 5.0);
        assert_eq!(info.most_recent_title, "shallow");
    }

    #[test]
    fn clicked_city_without_quakes_has_no_panel() {
        let mut markers = set();
        let mut state = InteractionState::new();
        state.click(
            &mut markers,
            &ProximityHitTest { tolerance_km: 1.0 },
            Location::new(40.0, 0.0),
        );
        let frame = Frame::capture(&markers, &state);
        assert_eq!(state.clicked(), Some(MarkerId::City(1)));
        assert!(frame.city_info.is_none());
        assert_eq!(frame.visible().count(), 1);
    }

    #[test]
    fn frame_serializes() {
        let markers = set();
        let frame = Frame::capture(&markers, &InteractionState::new());
        let json = serde_json::to_value(frame).unwrap();
        assert_eq!(json["markers"][0]["id"]["kind"], "quake");
        assert_eq!(json["markers"][0]["depth"], "shallow");
        assert_eq!(json["markers"][2]["category"], "city");
        assert!(json.get("city_info").is_none());
    }
}
