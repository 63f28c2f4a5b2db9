use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::DEFAULT_HIT_RADIUS_KM;
use crate::correlation;
use crate::geo::{distance_km, Location};
use crate::store::{MarkerId, MarkerRef, MarkerSet};

/// Decides whether a query point lands on a marker.
///
/// Screen-space picking belongs to the renderer; the engine only asks yes or no.
pub trait HitTest {
    fn hit(&self, marker: MarkerRef<'_>, point: Location) -> bool;
}

impl<F> HitTest for F
where
    F: Fn(MarkerRef<'_>, Location) -> bool,
{
    fn hit(&self, marker: MarkerRef<'_>, point: Location) -> bool {
        self(marker, point)
    }
}

/// World-space picking: a marker is hit when the point is within `tolerance_km`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityHitTest {
    pub tolerance_km: f64,
}

impl Default for ProximityHitTest {
    fn default() -> Self {
        Self {
            tolerance_km: DEFAULT_HIT_RADIUS_KM,
        }
    }
}

impl HitTest for ProximityHitTest {
    fn hit(&self, marker: MarkerRef<'_>, point: Location) -> bool {
        distance_km(marker.location(), point) <= self.tolerance_km
    }
}

/// A cursor move or click at a query point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum InputEvent {
    Hover { at: Location },
    Click { at: Location },
}

/// The hovered and clicked singletons. Holding them as ids rather than
/// per-marker booleans keeps "at most one of each" true by construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionState {
    hovered: Option<MarkerId>,
    clicked: Option<MarkerId>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.hovered
    }

    pub fn clicked(&self) -> Option<MarkerId> {
        self.clicked
    }

    pub fn is_hovered(&self, id: MarkerId) -> bool {
        self.hovered == Some(id)
    }

    pub fn is_clicked(&self, id: MarkerId) -> bool {
        self.clicked == Some(id)
    }

    /// Moves the hover to the first marker under the point, quakes before
    /// cities, or clears it when nothing is hit.
    pub fn hover(
        &mut self,
        markers: &MarkerSet,
        hit_test: &impl HitTest,
        point: Location,
    ) -> Option<MarkerId> {
        self.hovered = first_hit(markers, hit_test, point);
        self.hovered
    }

    /// Releases any previous click, then focuses the view on the marker under
    /// the point: everything is hidden except the marker and the markers it
    /// is related to through the threat circle.
    pub fn click(
        &mut self,
        markers: &mut MarkerSet,
        hit_test: &impl HitTest,
        point: Location,
    ) -> Option<MarkerId> {
        if self.clicked.take().is_some() {
            markers.unhide_all();
        }

        let hit = first_hit(markers, hit_test, point)?;
        markers.hide_all();
        self.clicked = Some(hit);
        markers.set_hidden(hit, false);

        let revealed = reveal_related(markers, hit);
        debug!(marker = ?hit, revealed, "marker clicked");
        Some(hit)
    }
}

fn first_hit(markers: &MarkerSet, hit_test: &impl HitTest, point: Location) -> Option<MarkerId> {
    markers
        .iter()
        .find(|(_, marker)| hit_test.hit(*marker, point))
        .map(|(id, _)| id)
}

/// Un-hides whatever the clicked marker is related to; returns how many.
fn reveal_related(markers: &mut MarkerSet, clicked: MarkerId) -> usize {
    match clicked {
        MarkerId::Quake(q) => {
            let Some(quake) = markers.quakes().get(q) else {
                return 0;
            };
            let from_ocean = !quake.is_on_land();
            let cities = correlation::threatened_city_indices(quake, markers.cities());
            for &c in &cities {
                markers.set_hidden(MarkerId::City(c), false);
                if from_ocean {
                    markers.set_ocean_threat_selected(c, true);
                }
            }
            cities.len()
        }
        MarkerId::City(c) => {
            let Some(city) = markers.cities().get(c) else {
                return 0;
            };
            let quakes = correlation::nearby_quake_indices(city, markers.quakes());
            for &q in &quakes {
                markers.set_hidden(MarkerId::Quake(q), false);
            }
            quakes.len()
        }
    }
}
