use serde::{Deserialize, Serialize};

/// Sphere radius of the Earth CRS used by the map library, in meters.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

pub const RADIUS_MIN_KM: f64 = 1.0;
pub const RADIUS_MAX_KM: f64 = 1000.0;
pub const RADIUS_STEP_KM: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south_west.lat
            && p.lat <= self.north_east.lat
            && p.lng >= self.south_west.lng
            && p.lng <= self.north_east.lng
    }
}

/// Bounds of a circle as the map library computes them on the Earth CRS.
pub fn circle_bounds(center: LatLng, radius_m: f64) -> LatLngBounds {
    let d = std::f64::consts::PI / 180.0;
    let lat_r = (radius_m / EARTH_RADIUS_M) / d;
    let lng_r = lat_r / (d * center.lat).cos();
    LatLngBounds::new(
        LatLng::new(center.lat - lat_r, center.lng - lng_r),
        LatLng::new(center.lat + lat_r, center.lng + lng_r),
    )
}

/// A search radius in kilometers.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Radius(f64);

impl Radius {
    pub fn from_km(km: f64) -> Self {
        Self(km)
    }

    pub fn km(self) -> f64 {
        self.0
    }

    /// Rendered circles are sized in meters.
    pub fn meters(self) -> f64 {
        self.0 * 1000.0
    }
}
