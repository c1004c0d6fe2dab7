pub mod point;

pub use point::{EcefPoint, EnuPoint, GeodeticPoint, POLAR_AXIS_EPSILON_M};
