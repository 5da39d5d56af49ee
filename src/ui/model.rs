use crate::config::MapConfig;
use crate::error::{Error, Result};
use crate::geo::{LatLng, Radius};
use crate::numeric::to_number;
use crate::page::{Control, Field, Page};
use crate::ui::map::{MapSurface, PopupOptions, RadiusControl};

/// The marker and circle currently shown for the active location.
#[derive(Debug, Clone)]
pub struct Overlay<M: MapSurface> {
    pub center: LatLng,
    pub marker: M::Marker,
    pub circle: M::Circle,
    pub control: RadiusControl,
}

impl<M: MapSurface> Overlay<M> {
    pub fn radius(&self) -> Radius {
        self.control.value
    }
}

/// Location + radius picker. At most one location is shown at a time.
#[derive(Debug)]
pub struct RadiusWidget<M: MapSurface> {
    pub(crate) overlay: Option<Overlay<M>>,
    pub(crate) default_radius: Radius,
}

impl<M: MapSurface> RadiusWidget<M> {
    pub fn new(config: &MapConfig) -> Self {
        Self {
            overlay: None,
            default_radius: Radius::from_km(config.default_radius_km),
        }
    }

    pub fn overlay(&self) -> Option<&Overlay<M>> {
        self.overlay.as_ref()
    }

    // wrapper update that delegates to the update module
    pub fn update<P: Page>(&mut self, map: &mut M, page: &P, msg: crate::ui::Msg) -> Result<()> {
        crate::ui::update::handle_update(self, map, page, msg)
    }

    /// Place marker and circle, fit the camera and open the radius popup.
    ///
    /// Does not clear the overlay; callers replacing a location clear first.
    pub fn populate(&mut self, map: &mut M, center: LatLng, radius: Radius) {
        let marker = map.add_marker(center);
        let circle = map.add_circle(center, radius.meters());
        let bounds = map.circle_bounds(&circle);
        map.fit_bounds(bounds);

        let control = RadiusControl::new(radius);
        map.open_popup(&marker, &control, PopupOptions::default());
        log::debug!(
            "showing {},{} with radius {} km",
            center.lat,
            center.lng,
            radius.km()
        );
        self.overlay = Some(Overlay {
            center,
            marker,
            circle,
            control,
        });
    }

    /// Populate from pre-filled `latitude`, `longitude` and `radius` fields.
    ///
    /// Returns `Ok(false)` when any field is missing or empty.
    pub fn bootstrap<P: Page>(&mut self, map: &mut M, page: &P) -> Result<bool> {
        let fields = [Field::Latitude, Field::Longitude, Field::Radius];
        let Some(values) = prefilled(page, &fields) else {
            log::debug!("no pre-filled location, waiting for geocoder");
            return Ok(false);
        };
        let lat = parse_field(Field::Latitude, &values[0])?;
        let lng = parse_field(Field::Longitude, &values[1])?;
        let km = parse_field(Field::Radius, &values[2])?;
        self.populate(map, LatLng::new(lat, lng), Radius::from_km(km));
        Ok(true)
    }
}

/// Values of `fields` when every one of them exists and is non-empty.
pub(crate) fn prefilled<P: Page>(page: &P, fields: &[Field]) -> Option<Vec<String>> {
    fields
        .iter()
        .map(|f| page.by_id(f.id()).map(|c| c.value()).filter(|v| !v.is_empty()))
        .collect()
}

pub(crate) fn parse_field(field: Field, value: &str) -> Result<f64> {
    to_number(value).ok_or_else(|| Error::InvalidNumber {
        field: field.id().to_string(),
        value: value.to_string(),
    })
}
