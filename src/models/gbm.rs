use crate::errors::{PredictorError, PredictorResult};
use crate::simulation::rng::RandomSource;
use crate::simulation::sample_buffer;

/// Minutes from the session's reference point (open + offset) to the 1 PM
/// target. A policy constant, not read from the wall clock.
pub const MINUTES_TO_TARGET: f64 = 207.0;

/// Horizon to the target as a fraction of a trading year:
/// T = 207 / (trading_days * minutes_per_day)
#[inline]
pub fn time_to_target(trading_days: u32, minutes_per_day: u32) -> f64 {
    MINUTES_TO_TARGET / (f64::from(trading_days) * f64::from(minutes_per_day))
}

/// Geometric Brownian Motion parameters.
///
/// ```text
/// dS = mu S dt + sigma S dW
/// S_T = S_0 exp((mu - sigma^2/2) T + sigma sqrt(T) Z)
/// ```
///
/// The drift and diffusion coefficients of the closed form are precomputed
/// once; every sampling strategy reuses them through [`GbmParams::price_at`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GbmParams {
    /// Initial price S_0.
    pub spot: f64,
    /// Horizon T in years.
    pub horizon: f64,
    /// Annualised drift mu.
    pub drift: f64,
    /// Annualised volatility sigma.
    pub volatility: f64,
    drift_term: f64,
    diffusion_scale: f64,
}

impl GbmParams {
    pub fn new(spot: f64, horizon: f64, drift: f64, volatility: f64) -> PredictorResult<Self> {
        if !(spot > 0.0) || !spot.is_finite() {
            return Err(PredictorError::Model(format!("spot must be positive, got {spot}")));
        }
        if !(horizon >= 0.0) || !horizon.is_finite() {
            return Err(PredictorError::Model(format!(
                "horizon must be non-negative, got {horizon}"
            )));
        }
        if !drift.is_finite() || !(volatility >= 0.0) || !volatility.is_finite() {
            return Err(PredictorError::Model(format!(
                "drift/volatility must be finite with volatility >= 0, got {drift}/{volatility}"
            )));
        }

        Ok(Self {
            spot,
            horizon,
            drift,
            volatility,
            drift_term: (drift - 0.5 * volatility * volatility) * horizon,
            diffusion_scale: volatility * horizon.sqrt(),
        })
    }

    /// (mu - sigma^2/2) T
    #[inline]
    pub fn drift_term(&self) -> f64 {
        self.drift_term
    }

    /// sigma sqrt(T)
    #[inline]
    pub fn diffusion_scale(&self) -> f64 {
        self.diffusion_scale
    }

    /// Terminal price for a given standard normal shock.
    #[inline]
    pub fn price_at(&self, z: f64) -> f64 {
        self.spot * (self.drift_term + self.diffusion_scale * z).exp()
    }

    /// Known mean of ln S_T, used as a control-variate target.
    #[inline]
    pub fn log_price_mean(&self) -> f64 {
        self.spot.ln() + self.drift_term
    }
}

/// GBM sampler. Owns the random source for the run.
#[derive(Debug, Clone)]
pub struct PathGenerator {
    rng: RandomSource,
}

impl PathGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RandomSource::new(seed),
        }
    }

    /// Shared access for strategies that need raw uniforms or normals.
    #[inline]
    pub fn rng_mut(&mut self) -> &mut RandomSource {
        &mut self.rng
    }

    /// One closed-form terminal draw.
    #[inline]
    pub fn terminal(&mut self, params: &GbmParams) -> f64 {
        let z = self.rng.normal();
        params.price_at(z)
    }

    /// Full path of `steps + 1` prices, `path[0] = S_0`, each step multiplied
    /// by exp((mu - sigma^2/2) dt + sigma sqrt(dt) Z_i) with dt = T / steps.
    /// Zero steps yields just the starting price.
    pub fn path(&mut self, params: &GbmParams, steps: usize) -> PredictorResult<Vec<f64>> {
        let mut path = sample_buffer(steps + 1)?;
        path.push(params.spot);
        if steps == 0 {
            return Ok(path);
        }

        let dt = params.horizon / steps as f64;
        let sigma = params.volatility;
        let drift_dt = (params.drift - 0.5 * sigma * sigma) * dt;
        let vol_sqrt_dt = sigma * dt.sqrt();

        let mut price = params.spot;
        for _ in 0..steps {
            price *= (drift_dt + vol_sqrt_dt * self.rng.normal()).exp();
            path.push(price);
        }

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_time_to_target_default_calendar() {
        let t = time_to_target(252, 390);
        assert_relative_eq!(t, 207.0 / 98_280.0);
        assert!((t - 0.002_106_2).abs() < 1e-6);
    }

    #[test]
    fn test_params_reject_bad_spot() {
        assert!(GbmParams::new(0.0, 1.0, 0.05, 0.2).is_err());
        assert!(GbmParams::new(f64::NAN, 1.0, 0.05, 0.2).is_err());
        assert!(GbmParams::new(100.0, -1.0, 0.05, 0.2).is_err());
        assert!(GbmParams::new(100.0, 1.0, 0.05, -0.2).is_err());
    }

    #[test]
    fn test_zero_shock_is_median() {
        let p = GbmParams::new(100.0, 1.0, 0.05, 0.2).unwrap();
        assert_relative_eq!(p.price_at(0.0), 100.0 * (0.05_f64 - 0.02).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_path_shape() {
        let params = GbmParams::new(100.0, 0.5, 0.05, 0.2).unwrap();
        let mut generator = PathGenerator::new(42);
        let path = generator.path(&params, 100).unwrap();
        assert_eq!(path.len(), 101);
        assert_eq!(path[0], 100.0);
        assert!(path.iter().all(|p| *p > 0.0 && p.is_finite()));
    }

    #[test]
    fn test_path_zero_steps() {
        let params = GbmParams::new(100.0, 0.5, 0.05, 0.2).unwrap();
        let mut generator = PathGenerator::new(42);
        assert_eq!(generator.path(&params, 0).unwrap(), vec![100.0]);
    }

    #[test]
    fn test_zero_volatility_path_is_deterministic() {
        let params = GbmParams::new(100.0, 1.0, 0.05, 0.0).unwrap();
        let mut generator = PathGenerator::new(1);
        let path = generator.path(&params, 10).unwrap();
        assert_relative_eq!(path[10], 100.0 * 0.05_f64.exp(), epsilon = 1e-10);
    }

    #[test]
    fn test_terminal_mean_matches_drift() {
        let params = GbmParams::new(100.0, 0.25, 0.08, 0.2).unwrap();
        let mut generator = PathGenerator::new(11);
        let n = 50_000;
        let mean = (0..n).map(|_| generator.terminal(&params)).sum::<f64>() / n as f64;
        let expected = 100.0 * (0.08_f64 * 0.25).exp();
        // sd of S_T ~ 10, so the standard error is ~0.045
        assert!((mean - expected).abs() < 0.25, "mean={mean} expected={expected}");
    }

    #[test]
    fn test_path_and_terminal_agree_in_distribution() {
        let params = GbmParams::new(50.0, 1.0, 0.0, 0.3).unwrap();
        let mut generator = PathGenerator::new(8);
        let n = 4_000;
        let mut total = 0.0;
        for _ in 0..n {
            total += generator.path(&params, 8).unwrap()[8];
        }
        let mean = total / n as f64;
        // driftless: E[S_T] = S_0; sd of S_T ~ 15.5, standard error ~0.25
        assert!((mean - 50.0).abs() < 1.25, "path terminal mean={mean}");
    }
}
