use std::sync::LazyLock;

/// WGS84 semi-major axis in metres.
const WGS84_A: f64 = 6_378_137.0;
/// WGS84 first eccentricity squared.
const WGS84_E2: f64 = 6.694_379_990_14e-3;

/// The WGS84 ellipsoid, derived once on first use.
pub static WGS84: LazyLock<Ellipsoid> =
    LazyLock::new(|| Ellipsoid::from_a_e2(WGS84_A, WGS84_E2));

/// Reference ellipsoid parameters.
///
/// Only `a` and `e²` are primary; `b` and `e'²` are derived from them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    e2: f64,
    b: f64,
    ep2: f64,
}

impl Ellipsoid {
    fn from_a_e2(a: f64, e2: f64) -> Self {
        let b = a * (1.0 - e2).sqrt();
        let ep2 = (a * a - b * b) / (b * b);
        Self { a, e2, b, ep2 }
    }

    /// Semi-major axis (metres).
    pub fn a(&self) -> f64 {
        self.a
    }

    /// First eccentricity squared.
    pub fn e2(&self) -> f64 {
        self.e2
    }

    /// Semi-minor axis (metres).
    pub fn b(&self) -> f64 {
        self.b
    }

    /// Second eccentricity squared.
    pub fn ep2(&self) -> f64 {
        self.ep2
    }

    /// Radius of curvature in the prime vertical at the given latitude (radians).
    #[inline]
    pub fn prime_vertical_radius(&self, lat_rad: f64) -> f64 {
        let sin_lat = lat_rad.sin();
        self.a / (1.0 - self.e2 * sin_lat * sin_lat).sqrt()
    }
}
