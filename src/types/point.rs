use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Distance from the rotation axis below which height recovery is
/// ill-conditioned (metres).
pub const POLAR_AXIS_EPSILON_M: f64 = 1e-3;

/// Geodetic position on the WGS-84 ellipsoid.
///
/// Latitude and longitude are in **degrees**, height in metres above the
/// ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeodeticPoint {
    pub lat: f64,
    pub lon: f64,
    pub height: f64,
}

impl GeodeticPoint {
    pub fn new(lat: f64, lon: f64, height: f64) -> Self {
        Self { lat, lon, height }
    }

    pub fn lat_rad(&self) -> f64 {
        self.lat.to_radians()
    }

    pub fn lon_rad(&self) -> f64 {
        self.lon.to_radians()
    }

    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite() && self.height.is_finite()
    }

    pub fn to_tuple(self) -> (f64, f64, f64) {
        (self.lat, self.lon, self.height)
    }
}

impl From<[f64; 3]> for GeodeticPoint {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Earth-centred, Earth-fixed Cartesian position in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EcefPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EcefPoint {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Distance from the Earth's rotation axis.
    pub fn axis_distance(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// True when the point sits so close to the polar axis that the
    /// `p / cos(lat)` height recovery loses precision.
    pub fn is_near_polar_axis(&self) -> bool {
        self.axis_distance() < POLAR_AXIS_EPSILON_M
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.x, self.y, self.z)
    }
}

impl From<DVec3> for EcefPoint {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

/// Local tangent-plane position (metres) relative to a reference frame.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnuPoint {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

impl EnuPoint {
    pub fn new(east: f64, north: f64, up: f64) -> Self {
        Self { east, north, up }
    }

    pub fn is_finite(&self) -> bool {
        self.east.is_finite() && self.north.is_finite() && self.up.is_finite()
    }

    pub fn as_dvec3(&self) -> DVec3 {
        DVec3::new(self.east, self.north, self.up)
    }

    pub fn to_tuple(self) -> (f64, f64, f64) {
        (self.east, self.north, self.up)
    }
}

impl From<DVec3> for EnuPoint {
    fn from(v: DVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<[f64; 3]> for EnuPoint {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}
