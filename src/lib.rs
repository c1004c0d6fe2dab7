pub mod config;
pub mod engine;
pub mod error;
pub mod geodesy;
pub mod pipeline;
pub mod types;

pub use config::{CircleConfig, Mode, OutputFormat, PipelineConfig};
pub use engine::GeodeticEngine;
pub use error::{GeodeticError, Result};
pub use geodesy::{Degeneracy, ReferenceFrame};
pub use pipeline::Pipeline;
pub use types::{EcefPoint, EnuPoint, GeodeticPoint};
