use crate::error::Result;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const DEFAULT_ATTRIBUTION: &str =
    "&copy; <a href=\"http://www.openstreetmap.org/copyright\">OpenStreetMap</a>";

/// Map settings, read from the container's `data-map-config` JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    pub container_id: String,
    pub tile_url: String,
    pub max_zoom: u8,
    pub attribution: String,
    /// Radius applied to a freshly geocoded location
    pub default_radius_km: f64,
    /// Zoom used when centering on a single location
    pub location_zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            container_id: "map".to_string(),
            tile_url: DEFAULT_TILE_URL.to_string(),
            max_zoom: 19,
            attribution: DEFAULT_ATTRIBUTION.to_string(),
            default_radius_km: 50.0,
            location_zoom: 13,
        }
    }
}

impl MapConfig {
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
