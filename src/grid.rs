use crate::error::{CmutError, Result};

/// Decimal digits kept on every generated grid value
pub const GRID_DECIMALS: i32 = 4;

/// Half-open range of one dimension axis, in micrometers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimensionRange {
    pub start_um: f64,
    pub stop_um: f64,
}

impl DimensionRange {
    pub const fn new(start_um: f64, stop_um: f64) -> DimensionRange {
        DimensionRange { start_um, stop_um }
    }

    /// Samples `count` values over the range with [`linspace_exclusive`]
    pub fn samples(&self, count: usize) -> Result<Vec<f64>> {
        linspace_exclusive(self.start_um, self.stop_um, count)
    }
}

fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Generates `count` evenly spaced values starting at `start`, with step
/// `(stop - start) / count`. The stop value itself is never produced.
///
/// Each value is rounded to [`GRID_DECIMALS`] decimal digits.
pub fn linspace_exclusive(start: f64, stop: f64, count: usize) -> Result<Vec<f64>> {
    if count == 0 {
        return Err(CmutError::Configuration(
            "Grid length must be at least 1".to_owned(),
        ));
    }
    if !start.is_finite() || !stop.is_finite() || start >= stop {
        return Err(CmutError::Configuration(format!(
            "Invalid grid range [{start}, {stop})"
        )));
    }

    let step = (stop - start) / count as f64;
    let values: Vec<f64> = (0..count)
        .map(|i| round_to_decimals(start + step * i as f64, GRID_DECIMALS))
        .collect();

    // Rounding must keep the samples distinct and below stop
    if values.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(CmutError::Configuration(format!(
            "Grid range [{start}, {stop}) is too narrow for {count} samples at {GRID_DECIMALS} decimals"
        )));
    }
    if values.last().map_or(false, |last| *last >= stop) {
        return Err(CmutError::Configuration(format!(
            "Grid range [{start}, {stop}) rounds onto its stop value with {count} samples"
        )));
    }

    Ok(values)
}
