use crate::correlation::{self, QuakeBreakdown};
use crate::features::FeatureSet;
use crate::frame::Frame;
use crate::geo::Location;
use crate::interaction::{HitTest, InputEvent, InteractionState};
use crate::marker::EarthquakeMarker;
use crate::processing::{load_markers, LoadReport};
use crate::ranking;
use crate::store::{MarkerId, MarkerSet};

/// One map session: the marker set and the interaction state that is its
/// only writer. Events are applied one at a time, each to completion.
///
/// Hosts with several threads should keep the session behind a single lock
/// and hold it for the whole event.
#[derive(Debug, Clone, Default)]
pub struct MapSession {
    markers: MarkerSet,
    state: InteractionState,
}

impl MapSession {
    pub fn new(markers: MarkerSet) -> Self {
        Self {
            markers,
            state: InteractionState::new(),
        }
    }

    pub fn load(features: &FeatureSet) -> (Self, LoadReport) {
        let (markers, report) = load_markers(features);
        (Self::new(markers), report)
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn hover(&mut self, hit_test: &impl HitTest, point: Location) -> Option<MarkerId> {
        self.state.hover(&self.markers, hit_test, point)
    }

    pub fn click(&mut self, hit_test: &impl HitTest, point: Location) -> Option<MarkerId> {
        self.state.click(&mut self.markers, hit_test, point)
    }

    pub fn apply(&mut self, event: InputEvent, hit_test: &impl HitTest) -> Option<MarkerId> {
        match event {
            InputEvent::Hover { at } => self.hover(hit_test, at),
            InputEvent::Click { at } => self.click(hit_test, at),
        }
    }

    pub fn frame(&self) -> Frame {
        Frame::capture(&self.markers, &self.state)
    }

    pub fn breakdown(&self) -> QuakeBreakdown {
        correlation::country_breakdown(self.markers.countries(), self.markers.quakes())
    }

    pub fn top_quakes(&self, limit: usize) -> Vec<&EarthquakeMarker> {
        ranking::top_quakes(self.markers.quakes(), limit)
    }
}
