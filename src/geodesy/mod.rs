//! WGS-84 geodetic, ECEF and local East-North-Up conversions.

pub mod ecef;
pub mod ellipsoid;
pub mod enu;
pub mod frame;

pub use ecef::{ecef_to_geodetic, geodetic_to_ecef};
pub use ellipsoid::{Ellipsoid, WGS84};
pub use enu::{ecef_to_enu, enu_to_ecef};
pub use frame::{Degeneracy, ReferenceFrame};
