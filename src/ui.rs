// UI module root: the radius widget split into focused submodules under `ui/`

pub mod location;
pub mod map;
pub mod model;
pub mod update;

pub use location::show_event_location;
pub use map::{MapSurface, PopupOptions, RadiusControl};
pub use model::{Overlay, RadiusWidget};
pub use update::handle_update;

use crate::geo::LatLng;

// Events the widget reacts to; the event sources belong to the caller
#[derive(Clone, Debug, PartialEq)]
pub enum Msg {
    /// The geocoder resolved a search to a coordinate pair
    LocationResolved(LatLng),
    /// The popup's numeric control changed; carries the raw control text
    RadiusInput(String),
}
