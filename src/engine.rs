use std::sync::{Arc, PoisonError, RwLock};

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::error::{GeodeticError, Result};
use crate::geodesy::{Degeneracy, ReferenceFrame};
use crate::types::{EnuPoint, GeodeticPoint};

/// Geodetic ⇄ ENU conversion against a single, replaceable reference frame.
///
/// The frame is published as an immutable `Arc` snapshot. `set_reference`
/// builds the new frame before taking the write lock, and every conversion
/// clones the current snapshot once, so readers always see one complete
/// frame.
#[derive(Debug, Default)]
pub struct GeodeticEngine {
    frame: RwLock<Option<Arc<ReferenceFrame>>>,
}

impl GeodeticEngine {
    /// Create an engine with no reference frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine already anchored at the given point.
    pub fn with_reference(lat_deg: f64, lon_deg: f64, height: f64) -> Self {
        let engine = Self::new();
        engine.set_reference(lat_deg, lon_deg, height);
        engine
    }

    /// Replace the reference frame. Degrees and metres.
    pub fn set_reference(&self, lat_deg: f64, lon_deg: f64, height: f64) {
        let frame = Arc::new(ReferenceFrame::new(lat_deg, lon_deg, height));
        debug!(lat = lat_deg, lon = lon_deg, height, "Reference frame set");

        let mut slot = self.frame.write().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(frame);
    }

    /// Snapshot of the current frame.
    pub fn frame(&self) -> Result<Arc<ReferenceFrame>> {
        self.frame
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(GeodeticError::UninitializedFrame)
    }

    /// Geodetic (degrees, metres) → `(east, north, up)` in metres.
    pub fn to_enu(&self, lat_deg: f64, lon_deg: f64, height: f64) -> Result<(f64, f64, f64)> {
        let frame = self.frame()?;
        Ok(frame.to_enu(GeodeticPoint::new(lat_deg, lon_deg, height)).to_tuple())
    }

    /// `(east, north, up)` in metres → geodetic `(lat, lon, height)`.
    pub fn to_llh(&self, east: f64, north: f64, up: f64) -> Result<(f64, f64, f64)> {
        let frame = self.frame()?;
        Ok(frame.to_llh(EnuPoint::new(east, north, up)).to_tuple())
    }

    /// Convert many geodetic points in parallel against one frame snapshot.
    ///
    /// Degenerate results are returned unchanged and reported in a single
    /// summary warning.
    pub fn to_enu_batch(&self, points: &[GeodeticPoint]) -> Result<Vec<EnuPoint>> {
        let frame = self.frame()?;
        debug!(count = points.len(), "Converting batch to ENU");
        let (converted, flags): (Vec<_>, Vec<_>) =
            points.par_iter().map(|p| frame.to_enu_checked(*p)).unzip();
        warn_degenerate("to-enu", &flags);
        Ok(converted)
    }

    /// Convert many ENU points in parallel against one frame snapshot.
    ///
    /// Degenerate results are returned unchanged and reported in a single
    /// summary warning.
    pub fn to_llh_batch(&self, points: &[EnuPoint]) -> Result<Vec<GeodeticPoint>> {
        let frame = self.frame()?;
        debug!(count = points.len(), "Converting batch to LLH");
        let (converted, flags): (Vec<_>, Vec<_>) =
            points.par_iter().map(|p| frame.to_llh_checked(*p)).unzip();
        warn_degenerate("to-llh", &flags);
        Ok(converted)
    }
}

/// Tally of degenerate results in one batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct DegenerateCounts {
    polar_axis: usize,
    non_finite: usize,
}

impl DegenerateCounts {
    fn tally(flags: &[Degeneracy]) -> Self {
        flags.iter().fold(Self::default(), |mut acc, d| {
            acc.polar_axis += usize::from(d.polar_axis);
            acc.non_finite += usize::from(d.non_finite);
            acc
        })
    }
}

fn warn_degenerate(direction: &str, flags: &[Degeneracy]) {
    let counts = DegenerateCounts::tally(flags);
    if counts.polar_axis > 0 || counts.non_finite > 0 {
        warn!(
            direction,
            total = flags.len(),
            polar_axis = counts.polar_axis,
            non_finite = counts.non_finite,
            "Degenerate points in batch; values returned unchanged"
        );
    }
}
