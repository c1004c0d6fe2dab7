use glam::{DMat3, DMat4, DVec3};
use tracing::warn;

use crate::types::{EcefPoint, EnuPoint, GeodeticPoint};

use super::ecef::{ecef_to_geodetic, geodetic_to_ecef};
use super::ellipsoid::WGS84;
use super::enu::{ecef_to_enu, enu_to_ecef};

/// Numeric conditions under which a converted value is unreliable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Degeneracy {
    /// The ECEF point lies within `POLAR_AXIS_EPSILON_M` of the rotation axis.
    pub polar_axis: bool,
    /// The result has a NaN or infinite component.
    pub non_finite: bool,
}

impl Degeneracy {
    pub fn any(&self) -> bool {
        self.polar_axis || self.non_finite
    }
}

/// A local East-North-Up frame anchored at a geodetic point.
///
/// The rotation is derived from the anchor on construction and never edited
/// afterwards; replacing the anchor means building a new frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceFrame {
    anchor: GeodeticPoint,
    ecef: EcefPoint,
    rotation: DMat3,
}

impl ReferenceFrame {
    /// Build a frame from an anchor given in degrees and metres.
    pub fn new(lat_deg: f64, lon_deg: f64, height: f64) -> Self {
        let anchor = GeodeticPoint::new(lat_deg, lon_deg, height);
        let lat_rad = anchor.lat_rad();
        let lon_rad = anchor.lon_rad();
        let ecef = geodetic_to_ecef(lat_rad, lon_rad, height, &WGS84);

        Self {
            anchor,
            ecef,
            rotation: enu_rotation(lat_rad, lon_rad),
        }
    }

    /// Anchor position (degrees, metres).
    pub fn anchor(&self) -> GeodeticPoint {
        self.anchor
    }

    /// Anchor position in ECEF.
    pub fn ecef(&self) -> EcefPoint {
        self.ecef
    }

    /// ECEF → ENU rotation; rows are the East, North and Up unit vectors.
    pub fn rotation(&self) -> DMat3 {
        self.rotation
    }

    /// Geodetic point (degrees, metres) → ENU offset from the anchor.
    ///
    /// Non-finite results are returned unchanged, with a warning.
    pub fn to_enu(&self, point: GeodeticPoint) -> EnuPoint {
        let (enu, flags) = self.to_enu_checked(point);
        if flags.non_finite {
            warn!(
                lat = point.lat,
                lon = point.lon,
                height = point.height,
                "Non-finite ENU result"
            );
        }
        enu
    }

    /// ENU offset from the anchor → geodetic point (degrees, metres).
    ///
    /// Results near the polar axis or from non-finite input are returned
    /// unchanged, with a warning.
    pub fn to_llh(&self, enu: EnuPoint) -> GeodeticPoint {
        let (llh, flags) = self.to_llh_checked(enu);
        if flags.polar_axis {
            warn!(
                east = enu.east,
                north = enu.north,
                up = enu.up,
                "Point lies on the polar axis; recovered height is unreliable"
            );
        }
        if flags.non_finite {
            warn!(east = enu.east, north = enu.north, up = enu.up, "Non-finite geodetic result");
        }
        llh
    }

    /// [`to_enu`](Self::to_enu) without logging, reporting degeneracies instead.
    pub fn to_enu_checked(&self, point: GeodeticPoint) -> (EnuPoint, Degeneracy) {
        let ecef = geodetic_to_ecef(point.lat_rad(), point.lon_rad(), point.height, &WGS84);
        let enu = ecef_to_enu(ecef, self);
        let flags = Degeneracy {
            polar_axis: false,
            non_finite: !enu.is_finite(),
        };
        (enu, flags)
    }

    /// [`to_llh`](Self::to_llh) without logging, reporting degeneracies instead.
    pub fn to_llh_checked(&self, enu: EnuPoint) -> (GeodeticPoint, Degeneracy) {
        let ecef = enu_to_ecef(enu, self);
        let llh = ecef_to_geodetic(ecef, &WGS84);
        let flags = Degeneracy {
            polar_axis: ecef.is_near_polar_axis(),
            non_finite: !llh.is_finite(),
        };
        (llh, flags)
    }

    /// Column-major 4×4 matrix mapping ENU-local coordinates to ECEF.
    ///
    /// Columns 0-2 are the East, North and Up axes, column 3 is the anchor.
    /// Suitable for a 3D Tiles `root.transform`.
    pub fn local_to_ecef_matrix(&self) -> [f64; 16] {
        let axes = self.rotation.transpose();
        DMat4::from_cols(
            axes.x_axis.extend(0.0),
            axes.y_axis.extend(0.0),
            axes.z_axis.extend(0.0),
            self.ecef.as_dvec3().extend(1.0),
        )
        .to_cols_array()
    }
}

/// Build the ECEF → ENU rotation for an anchor in radians.
///
/// ENU basis vectors expressed in ECEF:
///   East  = (-sin_lon,          cos_lon,         0       )
///   North = (-sin_lat*cos_lon, -sin_lat*sin_lon, cos_lat )
///   Up    = ( cos_lat*cos_lon,  cos_lat*sin_lon, sin_lat )
fn enu_rotation(lat_rad: f64, lon_rad: f64) -> DMat3 {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = DVec3::new(-sin_lon, cos_lon, 0.0);
    let north = DVec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
    let up = DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);

    // glam stores columns; transpose so the basis vectors become rows
    DMat3::from_cols(east, north, up).transpose()
}
