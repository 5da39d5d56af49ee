// Read-only map for a single stored location (event detail pages).

use crate::error::Result;
use crate::geo::LatLng;
use crate::page::{Field, Page};
use crate::ui::map::MapSurface;
use crate::ui::model::{parse_field, prefilled};

/// Mark the location held by the `latitude`/`longitude` fields and center on it.
pub fn show_event_location<M: MapSurface, P: Page>(
    map: &mut M,
    page: &P,
    zoom: u8,
) -> Result<bool> {
    let Some(values) = prefilled(page, &[Field::Latitude, Field::Longitude]) else {
        return Ok(false);
    };
    let at = LatLng::new(
        parse_field(Field::Latitude, &values[0])?,
        parse_field(Field::Longitude, &values[1])?,
    );
    map.add_marker(at);
    map.set_view(at, zoom);
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{Camera, MemoryMap, MemoryPage};
    use crate::page::Control;

    #[test]
    fn marks_and_centers_stored_location() {
        let page = MemoryPage::new();
        page.insert("latitude").set_value("40.4168");
        page.insert("longitude").set_value("-3.7038");
        let mut map = MemoryMap::new();

        assert!(show_event_location(&mut map, &page, 13).unwrap());
        assert_eq!(map.markers().len(), 1);
        assert!(map.markers()[0].popup.is_none());
        assert_eq!(
            map.camera(),
            Some(Camera::View {
                center: LatLng::new(40.4168, -3.7038),
                zoom: 13
            })
        );
    }

    #[test]
    fn nothing_without_coordinates() {
        let page = MemoryPage::new();
        page.insert("latitude");
        let mut map = MemoryMap::new();
        assert!(!show_event_location(&mut map, &page, 13).unwrap());
        assert!(map.markers().is_empty());
        assert_eq!(map.camera(), None);
    }
}
