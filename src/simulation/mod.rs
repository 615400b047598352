pub mod engine;
pub mod rng;

use crate::errors::{PredictorError, PredictorResult};
use crate::models::gbm::{GbmParams, PathGenerator};

/// All Monte Carlo sampling schemes implement this trait.
/// Each consumes the shared generator and yields one price sample for the
/// same GBM parameters, so schemes are interchangeable inside the engine.
pub trait SamplingStrategy {
    fn name(&self) -> &'static str;

    /// Draw a sample of at most `n` terminal prices.
    fn sample(
        &self,
        generator: &mut PathGenerator,
        params: &GbmParams,
        n: usize,
    ) -> PredictorResult<Vec<f64>>;
}

/// Empty price buffer with room for exactly `len` values.
///
/// Allocation failure is reported with the requested size instead of
/// aborting the process.
pub fn sample_buffer(len: usize) -> PredictorResult<Vec<f64>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| PredictorError::Allocation { len })?;
    Ok(buffer)
}
