//! In-memory page and map.
//!
//! Headless implementations of [`Page`] and [`MapSurface`] that record every
//! mutation, used by the unit tests and by hosts without a browser.

use crate::geo::{circle_bounds, LatLng, LatLngBounds};
use crate::page::{Control, Page};
use crate::ui::map::{MapSurface, PopupOptions, RadiusControl};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ControlState {
    pub id: String,
    pub classes: Vec<String>,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
    pub required: bool,
    pub display: String,
}

/// Shared handle to one control; clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryControl(Rc<RefCell<ControlState>>);

impl MemoryControl {
    pub fn state(&self) -> ControlState {
        self.0.borrow().clone()
    }
}

impl Control for MemoryControl {
    fn value(&self) -> String {
        self.0.borrow().value.clone()
    }
    fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = value.to_string();
    }
    fn checked(&self) -> bool {
        self.0.borrow().checked
    }
    fn set_checked(&self, checked: bool) {
        self.0.borrow_mut().checked = checked;
    }
    fn disabled(&self) -> bool {
        self.0.borrow().disabled
    }
    fn set_disabled(&self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }
    fn required(&self) -> bool {
        self.0.borrow().required
    }
    fn set_required(&self, required: bool) {
        self.0.borrow_mut().required = required;
    }
    fn display(&self) -> String {
        self.0.borrow().display.clone()
    }
    fn set_display(&self, display: &str) {
        self.0.borrow_mut().display = display.to_string();
    }
}

#[derive(Debug, Default)]
pub struct MemoryPage {
    controls: RefCell<Vec<MemoryControl>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: &str) -> MemoryControl {
        self.insert_state(ControlState {
            id: id.to_string(),
            ..ControlState::default()
        })
    }

    pub fn insert_with_class(&self, id: &str, class: &str) -> MemoryControl {
        self.insert_state(ControlState {
            id: id.to_string(),
            classes: vec![class.to_string()],
            ..ControlState::default()
        })
    }

    pub fn insert_state(&self, state: ControlState) -> MemoryControl {
        let control = MemoryControl(Rc::new(RefCell::new(state)));
        self.controls.borrow_mut().push(control.clone());
        control
    }
}

impl Page for MemoryPage {
    type Control = MemoryControl;

    fn by_id(&self, id: &str) -> Option<MemoryControl> {
        self.controls
            .borrow()
            .iter()
            .find(|c| c.0.borrow().id == id)
            .cloned()
    }

    fn by_class(&self, class: &str) -> Vec<MemoryControl> {
        self.controls
            .borrow()
            .iter()
            .filter(|c| c.0.borrow().classes.iter().any(|k| k == class))
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupState {
    pub control: RadiusControl,
    pub options: PopupOptions,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerState {
    pub at: LatLng,
    pub popup: Option<PopupState>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleState {
    pub center: LatLng,
    pub radius_m: f64,
}

/// Last camera operation applied to the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Camera {
    Bounds(LatLngBounds),
    View { center: LatLng, zoom: u8 },
}

// Handles remember the overlay generation they were created in; handles from a
// cleared overlay no longer affect the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerHandle {
    generation: u32,
    index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleHandle {
    generation: u32,
    index: usize,
    center: LatLng,
}

#[derive(Debug, Default)]
pub struct MemoryMap {
    generation: u32,
    markers: Vec<MarkerState>,
    circles: Vec<CircleState>,
    camera: Option<Camera>,
}

impl MemoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn markers(&self) -> &[MarkerState] {
        &self.markers
    }

    pub fn circles(&self) -> &[CircleState] {
        &self.circles
    }

    pub fn camera(&self) -> Option<Camera> {
        self.camera
    }

    fn circle_mut(&mut self, h: &CircleHandle) -> Option<&mut CircleState> {
        if h.generation != self.generation {
            return None;
        }
        self.circles.get_mut(h.index)
    }
}

impl MapSurface for MemoryMap {
    type Marker = MarkerHandle;
    type Circle = CircleHandle;

    fn clear_overlay(&mut self) {
        self.markers.clear();
        self.circles.clear();
        self.generation += 1;
    }

    fn add_marker(&mut self, at: LatLng) -> MarkerHandle {
        self.markers.push(MarkerState { at, popup: None });
        MarkerHandle {
            generation: self.generation,
            index: self.markers.len() - 1,
        }
    }

    fn add_circle(&mut self, center: LatLng, radius_m: f64) -> CircleHandle {
        self.circles.push(CircleState { center, radius_m });
        CircleHandle {
            generation: self.generation,
            index: self.circles.len() - 1,
            center,
        }
    }

    fn set_circle_radius(&mut self, circle: &CircleHandle, radius_m: f64) {
        if let Some(c) = self.circle_mut(circle) {
            c.radius_m = radius_m;
        }
    }

    fn circle_bounds(&self, circle: &CircleHandle) -> LatLngBounds {
        let radius_m = if circle.generation == self.generation {
            self.circles.get(circle.index).map_or(0.0, |c| c.radius_m)
        } else {
            0.0
        };
        circle_bounds(circle.center, radius_m)
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds) {
        self.camera = Some(Camera::Bounds(bounds));
    }

    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.camera = Some(Camera::View { center, zoom });
    }

    fn open_popup(
        &mut self,
        marker: &MarkerHandle,
        control: &RadiusControl,
        options: PopupOptions,
    ) {
        if marker.generation != self.generation {
            return;
        }
        if let Some(m) = self.markers.get_mut(marker.index) {
            m.popup = Some(PopupState {
                control: control.clone(),
                options,
                open: true,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_lookup_by_id_and_class() {
        let page = MemoryPage::new();
        page.insert("a");
        page.insert_with_class("b", "group");
        page.insert_with_class("c", "group");
        assert!(page.by_id("a").is_some());
        assert!(page.by_id("zzz").is_none());
        let ids: Vec<String> = page.by_class("group").iter().map(|c| c.state().id).collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn control_handles_share_state() {
        let page = MemoryPage::new();
        let held = page.insert("radius");
        page.by_id("radius").unwrap().set_value("12");
        assert_eq!(held.value(), "12");
    }

    #[test]
    fn stale_handles_are_ignored_after_clear() {
        let mut map = MemoryMap::new();
        let old = map.add_circle(LatLng::new(0.0, 0.0), 1000.0);
        map.clear_overlay();
        let fresh = map.add_circle(LatLng::new(1.0, 1.0), 2000.0);
        map.set_circle_radius(&old, 9999.0);
        assert_eq!(map.circles().len(), 1);
        assert_eq!(map.circles()[0].radius_m, 2000.0);
        assert_eq!(
            map.circle_bounds(&fresh),
            circle_bounds(LatLng::new(1.0, 1.0), 2000.0)
        );
    }
}
