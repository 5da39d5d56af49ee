use crate::geo::{LatLng, LatLngBounds, Radius, RADIUS_MAX_KM, RADIUS_MIN_KM, RADIUS_STEP_KM};
use serde::Serialize;

/// What the widget needs from the mapping library.
///
/// Markers and circles live on a dedicated overlay layer so they can be
/// cleared without touching the tile layer.
pub trait MapSurface {
    type Marker: Clone + std::fmt::Debug;
    type Circle: Clone + std::fmt::Debug;

    fn clear_overlay(&mut self);
    fn add_marker(&mut self, at: LatLng) -> Self::Marker;
    fn add_circle(&mut self, center: LatLng, radius_m: f64) -> Self::Circle;
    fn set_circle_radius(&mut self, circle: &Self::Circle, radius_m: f64);
    fn circle_bounds(&self, circle: &Self::Circle) -> LatLngBounds;
    fn fit_bounds(&mut self, bounds: LatLngBounds);
    fn set_view(&mut self, center: LatLng, zoom: u8);
    /// Bind a popup holding `control` to the marker and open it right away.
    fn open_popup(&mut self, marker: &Self::Marker, control: &RadiusControl, options: PopupOptions);
}

/// Popup behavior; the default keeps the popup pinned open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupOptions {
    pub close_button: bool,
    pub auto_close: bool,
    pub close_on_escape_key: bool,
}

/// The numeric radius input shown inside the marker popup.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusControl {
    pub id: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub autocomplete: bool,
    pub unit_label: &'static str,
    pub value: Radius,
}

impl RadiusControl {
    pub fn new(value: Radius) -> Self {
        Self {
            id: "distance",
            min: RADIUS_MIN_KM,
            max: RADIUS_MAX_KM,
            step: RADIUS_STEP_KM,
            autocomplete: false,
            unit_label: "km",
            value,
        }
    }

    /// Text the input element starts with.
    pub fn value_text(&self) -> String {
        self.value.km().to_string()
    }
}
