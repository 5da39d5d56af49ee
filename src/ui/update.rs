use crate::error::{Error, Result};
use crate::geo::{LatLng, Radius};
use crate::numeric::to_number;
use crate::page::{Control, Field, Page};
use crate::ui::map::MapSurface;
use crate::ui::model::RadiusWidget;
use crate::ui::Msg;

pub fn handle_update<M: MapSurface, P: Page>(
    w: &mut RadiusWidget<M>,
    map: &mut M,
    page: &P,
    msg: Msg,
) -> Result<()> {
    match msg {
        Msg::LocationResolved(at) => handle_location_resolved(w, map, page, at),
        Msg::RadiusInput(raw) => handle_radius_input(w, map, page, &raw),
    }
}

fn handle_location_resolved<M: MapSurface, P: Page>(
    w: &mut RadiusWidget<M>,
    map: &mut M,
    page: &P,
    at: LatLng,
) -> Result<()> {
    // clear before repopulating so only one marker/circle pair exists
    map.clear_overlay();
    w.overlay = None;
    let radius = w.default_radius;
    w.populate(map, at, radius);

    page.require(Field::Latitude.id())?.set_value(&at.lat.to_string());
    page.require(Field::Longitude.id())?.set_value(&at.lng.to_string());
    Ok(())
}

// Circle, camera and radius field are all updated before returning.
fn handle_radius_input<M: MapSurface, P: Page>(
    w: &mut RadiusWidget<M>,
    map: &mut M,
    page: &P,
    raw: &str,
) -> Result<()> {
    let Some(overlay) = w.overlay.as_mut() else {
        log::debug!("radius input without a location, ignoring");
        return Ok(());
    };
    let km = to_number(raw).ok_or_else(|| Error::InvalidNumber {
        field: overlay.control.id.to_string(),
        value: raw.to_string(),
    })?;
    let radius = Radius::from_km(km);

    map.set_circle_radius(&overlay.circle, radius.meters());
    let bounds = map.circle_bounds(&overlay.circle);
    map.fit_bounds(bounds);
    overlay.control.value = radius;

    page.require(Field::Radius.id())?.set_value(raw);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MapConfig;
    use crate::geo::circle_bounds;
    use crate::memory::{Camera, MemoryMap, MemoryPage};

    fn form_page() -> MemoryPage {
        let page = MemoryPage::new();
        page.insert("latitude");
        page.insert("longitude");
        page.insert("radius");
        page
    }

    fn value(page: &MemoryPage, id: &str) -> String {
        page.by_id(id).unwrap().value()
    }

    #[test]
    fn geocode_populates_overlay_and_fields() {
        let page = form_page();
        let mut map = MemoryMap::new();
        let mut w = RadiusWidget::new(&MapConfig::default());

        w.update(&mut map, &page, Msg::LocationResolved(LatLng::new(52.52, 13.405)))
            .unwrap();

        assert_eq!(map.markers().len(), 1);
        assert_eq!(map.circles().len(), 1);
        assert_eq!(map.circles()[0].radius_m, 50_000.0);
        assert_eq!(value(&page, "latitude"), "52.52");
        assert_eq!(value(&page, "longitude"), "13.405");

        let popup = map.markers()[0].popup.as_ref().unwrap();
        assert!(popup.open);
        assert_eq!(popup.options, crate::ui::PopupOptions::default());
        assert_eq!(popup.control.value_text(), "50");

        let expected = circle_bounds(LatLng::new(52.52, 13.405), 50_000.0);
        assert_eq!(map.camera(), Some(Camera::Bounds(expected)));
    }

    #[test]
    fn second_geocode_replaces_overlay() {
        let page = form_page();
        let mut map = MemoryMap::new();
        let mut w = RadiusWidget::new(&MapConfig::default());

        w.update(&mut map, &page, Msg::LocationResolved(LatLng::new(1.0, 2.0)))
            .unwrap();
        w.update(&mut map, &page, Msg::RadiusInput("120".into())).unwrap();
        w.update(&mut map, &page, Msg::LocationResolved(LatLng::new(3.0, 4.0)))
            .unwrap();

        assert_eq!(map.markers().len(), 1);
        assert_eq!(map.circles().len(), 1);
        assert_eq!(map.markers()[0].at, LatLng::new(3.0, 4.0));
        // a new location starts from the default radius again
        assert_eq!(map.circles()[0].radius_m, 50_000.0);
        assert_eq!(w.overlay().unwrap().radius(), Radius::from_km(50.0));
    }

    #[test]
    fn radius_edits_keep_control_field_and_circle_in_sync() {
        let page = form_page();
        let mut map = MemoryMap::new();
        let mut w = RadiusWidget::new(&MapConfig::default());
        w.update(&mut map, &page, Msg::LocationResolved(LatLng::new(10.0, 20.0)))
            .unwrap();

        for edit in ["1", "7", "250", "1000", "42"] {
            w.update(&mut map, &page, Msg::RadiusInput(edit.into())).unwrap();
            let km: f64 = edit.parse().unwrap();
            let overlay = w.overlay().unwrap();
            assert_eq!(overlay.control.value.km(), km);
            assert_eq!(value(&page, "radius"), edit);
            assert_eq!(map.circles()[0].radius_m, km * 1000.0);
            let expected = circle_bounds(LatLng::new(10.0, 20.0), km * 1000.0);
            assert_eq!(map.camera(), Some(Camera::Bounds(expected)));
        }
    }

    #[test]
    fn unparseable_radius_changes_nothing() {
        let page = form_page();
        let mut map = MemoryMap::new();
        let mut w = RadiusWidget::new(&MapConfig::default());
        w.update(&mut map, &page, Msg::LocationResolved(LatLng::new(0.0, 0.0)))
            .unwrap();
        w.update(&mut map, &page, Msg::RadiusInput("30".into())).unwrap();

        let err = w
            .update(&mut map, &page, Msg::RadiusInput("3O".into()))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { .. }));
        assert_eq!(map.circles()[0].radius_m, 30_000.0);
        assert_eq!(value(&page, "radius"), "30");
    }

    #[test]
    fn radius_input_without_location_is_ignored() {
        let page = form_page();
        let mut map = MemoryMap::new();
        let mut w = RadiusWidget::new(&MapConfig::default());
        w.update(&mut map, &page, Msg::RadiusInput("5".into())).unwrap();
        assert!(map.circles().is_empty());
        assert_eq!(value(&page, "radius"), "");
    }

    #[test]
    fn geocode_without_fields_still_draws() {
        let page = MemoryPage::new();
        let mut map = MemoryMap::new();
        let mut w = RadiusWidget::new(&MapConfig::default());
        let err = w
            .update(&mut map, &page, Msg::LocationResolved(LatLng::new(5.0, 5.0)))
            .unwrap_err();
        assert!(matches!(err, Error::MissingElement(id) if id == "latitude"));
        assert_eq!(map.markers().len(), 1);
    }

    #[test]
    fn configured_default_radius_is_used() {
        let page = form_page();
        let mut map = MemoryMap::new();
        let config = MapConfig {
            default_radius_km: 5.0,
            ..MapConfig::default()
        };
        let mut w = RadiusWidget::new(&config);
        w.update(&mut map, &page, Msg::LocationResolved(LatLng::new(0.0, 0.0)))
            .unwrap();
        assert_eq!(map.circles()[0].radius_m, 5000.0);
    }

    #[test]
    fn bootstrap_from_prefilled_fields() {
        let page = form_page();
        page.by_id("latitude").unwrap().set_value("48.8566");
        page.by_id("longitude").unwrap().set_value("2.3522");
        page.by_id("radius").unwrap().set_value("10");
        let mut map = MemoryMap::new();
        let mut w = RadiusWidget::new(&MapConfig::default());

        assert!(w.bootstrap(&mut map, &page).unwrap());
        assert_eq!(map.markers().len(), 1);
        assert_eq!(map.markers()[0].at, LatLng::new(48.8566, 2.3522));
        assert_eq!(map.circles()[0].radius_m, 10_000.0);
        assert_eq!(w.overlay().unwrap().control.value_text(), "10");
    }

    #[test]
    fn bootstrap_skips_when_a_field_is_empty_or_missing() {
        let page = form_page();
        page.by_id("latitude").unwrap().set_value("48.8566");
        page.by_id("longitude").unwrap().set_value("2.3522");
        let mut map = MemoryMap::new();
        let mut w = RadiusWidget::new(&MapConfig::default());
        assert!(!w.bootstrap(&mut map, &page).unwrap());
        assert!(map.markers().is_empty());

        let bare = MemoryPage::new();
        assert!(!w.bootstrap(&mut map, &bare).unwrap());
        assert!(w.overlay().is_none());
    }

    #[test]
    fn bootstrap_rejects_garbage_coordinates() {
        let page = form_page();
        page.by_id("latitude").unwrap().set_value("north");
        page.by_id("longitude").unwrap().set_value("2.3522");
        page.by_id("radius").unwrap().set_value("10");
        let mut map = MemoryMap::new();
        let mut w = RadiusWidget::new(&MapConfig::default());
        let err = w.bootstrap(&mut map, &page).unwrap_err();
        assert!(matches!(err, Error::InvalidNumber { field, .. } if field == "latitude"));
        assert!(map.markers().is_empty());
    }
}
