use crate::types::{EcefPoint, EnuPoint};

use super::frame::ReferenceFrame;

/// Express an ECEF point in the frame's ENU axes: `R · (p − anchor)`.
pub fn ecef_to_enu(point: EcefPoint, frame: &ReferenceFrame) -> EnuPoint {
    let d = point.as_dvec3() - frame.ecef().as_dvec3();
    EnuPoint::from(frame.rotation() * d)
}

/// Map an ENU offset back to ECEF: `anchor + Rᵀ · enu`.
pub fn enu_to_ecef(enu: EnuPoint, frame: &ReferenceFrame) -> EcefPoint {
    let d = frame.rotation().transpose() * enu.as_dvec3();
    EcefPoint::from(frame.ecef().as_dvec3() + d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn anchor_maps_to_origin() {
        let frame = ReferenceFrame::new(0.1, -0.2, 35.0);
        let enu = ecef_to_enu(frame.ecef(), &frame);
        assert_eq!(enu, EnuPoint::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn round_trip_at_equator() {
        let frame = ReferenceFrame::new(0.0, 0.0, 0.0);
        let enu = EnuPoint::new(15.0, -8.0, 2.5);
        let back = ecef_to_enu(enu_to_ecef(enu, &frame), &frame);
        assert_abs_diff_eq!(back.east, enu.east, epsilon = 1e-9);
        assert_abs_diff_eq!(back.north, enu.north, epsilon = 1e-9);
        assert_abs_diff_eq!(back.up, enu.up, epsilon = 1e-9);
    }

    #[test]
    fn round_trip_mid_latitude() {
        let frame = ReferenceFrame::new(35.681_236, 139.767_125, 40.0);
        let enu = EnuPoint::new(-1234.5, 987.25, -12.0);
        let back = ecef_to_enu(enu_to_ecef(enu, &frame), &frame);
        assert_abs_diff_eq!(back.east, enu.east, epsilon = 1e-8);
        assert_abs_diff_eq!(back.north, enu.north, epsilon = 1e-8);
        assert_abs_diff_eq!(back.up, enu.up, epsilon = 1e-8);
    }

    #[test]
    fn axes_at_equator_prime_meridian() {
        // East = +Y, North = +Z, Up = +X in ECEF
        let frame = ReferenceFrame::new(0.0, 0.0, 0.0);
        let origin = frame.ecef();

        let e = ecef_to_enu(EcefPoint::new(origin.x, origin.y + 10.0, origin.z), &frame);
        assert_abs_diff_eq!(e.east, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(e.north, 0.0, epsilon = 1e-9);

        let n = ecef_to_enu(EcefPoint::new(origin.x, origin.y, origin.z + 10.0), &frame);
        assert_abs_diff_eq!(n.north, 10.0, epsilon = 1e-9);

        let u = ecef_to_enu(EcefPoint::new(origin.x + 10.0, origin.y, origin.z), &frame);
        assert_abs_diff_eq!(u.up, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn inverse_preserves_length() {
        let frame = ReferenceFrame::new(-45.0, 170.0, 0.0);
        let enu = EnuPoint::new(300.0, 400.0, 0.0);
        let ecef = enu_to_ecef(enu, &frame);
        let d = ecef.as_dvec3() - frame.ecef().as_dvec3();
        assert_abs_diff_eq!(d.length(), 500.0, epsilon = 1e-8);
    }
}
