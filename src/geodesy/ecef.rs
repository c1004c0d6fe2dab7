use crate::types::{EcefPoint, GeodeticPoint};

use super::ellipsoid::Ellipsoid;

/// Convert geodetic (latitude, longitude, height) to ECEF XYZ.
///
/// Angles are in **radians**, height in metres. Valid at the poles, where
/// `cos(lat) = 0` yields `x = y = 0`.
pub fn geodetic_to_ecef(
    lat_rad: f64,
    lon_rad: f64,
    height: f64,
    ellipsoid: &Ellipsoid,
) -> EcefPoint {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    // Radius of curvature in the prime vertical
    let n = ellipsoid.prime_vertical_radius(lat_rad);

    let x = (n + height) * cos_lat * cos_lon;
    let y = (n + height) * cos_lat * sin_lon;
    let z = (n * (1.0 - ellipsoid.e2()) + height) * sin_lat;

    EcefPoint::new(x, y, z)
}

/// Recover geodetic coordinates from an ECEF point with Bowring's
/// closed-form approximation (no iteration).
///
/// Returns latitude/longitude in **degrees**. Near the polar axis the
/// `p / cos(lat)` height term is ill-conditioned and is returned as computed;
/// see [`EcefPoint::is_near_polar_axis`].
pub fn ecef_to_geodetic(ecef: EcefPoint, ellipsoid: &Ellipsoid) -> GeodeticPoint {
    let a = ellipsoid.a();
    let b = ellipsoid.b();
    let e2 = ellipsoid.e2();
    let ep2 = ellipsoid.ep2();

    let p = ecef.axis_distance();
    // Parametric (reduced) latitude
    let theta = (ecef.z * a).atan2(p * b);
    let sin_theta = theta.sin();
    let cos_theta = theta.cos();

    let lat = (ecef.z + ep2 * b * sin_theta * sin_theta * sin_theta)
        .atan2(p - e2 * a * cos_theta * cos_theta * cos_theta);
    let lon = ecef.y.atan2(ecef.x);

    let n = ellipsoid.prime_vertical_radius(lat);
    let height = p / lat.cos() - n;

    GeodeticPoint::new(lat.to_degrees(), lon.to_degrees(), height)
}
