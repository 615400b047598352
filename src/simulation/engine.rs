use crate::errors::PredictorResult;
use crate::models::gbm::{GbmParams, PathGenerator};
use crate::models::normal;
use crate::numerics::statistics::{self, ControlVariateEstimate};
use crate::simulation::{sample_buffer, SamplingStrategy};

/// Default number of equal-probability bins for stratified sampling.
pub const DEFAULT_STRATA: usize = 10;

/// `n` independent closed-form terminal draws.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl SamplingStrategy for Plain {
    #[inline]
    fn name(&self) -> &'static str {
        "Plain"
    }

    fn sample(
        &self,
        generator: &mut PathGenerator,
        params: &GbmParams,
        n: usize,
    ) -> PredictorResult<Vec<f64>> {
        let mut prices = sample_buffer(n)?;
        for _ in 0..n {
            prices.push(generator.terminal(params));
        }
        Ok(prices)
    }
}

/// Antithetic variates: `n / 2` normal draws, each used as Z and -Z.
///
/// Layout is `[f(Z_0) .. f(Z_{h-1}), f(-Z_0) .. f(-Z_{h-1})]` with
/// h = n / 2, so an odd `n` yields `n - 1` prices.
#[derive(Debug, Clone, Copy, Default)]
pub struct Antithetic;

impl SamplingStrategy for Antithetic {
    #[inline]
    fn name(&self) -> &'static str {
        "Antithetic"
    }

    fn sample(
        &self,
        generator: &mut PathGenerator,
        params: &GbmParams,
        n: usize,
    ) -> PredictorResult<Vec<f64>> {
        let half = n / 2;
        let mut prices = sample_buffer(2 * half)?;
        let mut shocks = sample_buffer(half)?;

        for _ in 0..half {
            let z = generator.rng_mut().normal();
            shocks.push(z);
            prices.push(params.price_at(z));
        }
        prices.extend(shocks.iter().map(|z| params.price_at(-z)));

        Ok(prices)
    }
}

/// Stratified sampling over `n_strata` equal-probability bins of [0, 1).
///
/// Each bin gets `n / n_strata` uniforms confined to it, mapped through the
/// normal quantile. The `n % n_strata` remainder is not drawn, so the
/// sample may be slightly shorter than `n`.
#[derive(Debug, Clone, Copy)]
pub struct Stratified {
    pub n_strata: usize,
}

impl Default for Stratified {
    fn default() -> Self {
        Self {
            n_strata: DEFAULT_STRATA,
        }
    }
}

impl SamplingStrategy for Stratified {
    #[inline]
    fn name(&self) -> &'static str {
        "Stratified"
    }

    fn sample(
        &self,
        generator: &mut PathGenerator,
        params: &GbmParams,
        n: usize,
    ) -> PredictorResult<Vec<f64>> {
        let n_strata = self.n_strata.max(1);
        let per_stratum = n / n_strata;
        let mut prices = sample_buffer(per_stratum * n_strata)?;

        for s in 0..n_strata {
            for _ in 0..per_stratum {
                let u = stratum_point(s, n_strata, generator.rng_mut().uniform());
                prices.push(params.price_at(normal::quantile(u)));
            }
        }

        Ok(prices)
    }
}

/// Maps a uniform `u` in [0, 1) into stratum `s` of `n_strata`, kept inside
/// the open interval (0, 1) so the quantile stays finite.
#[inline]
pub fn stratum_point(s: usize, n_strata: usize, u: f64) -> f64 {
    let width = 1.0 / n_strata as f64;
    (s as f64 * width + width * u).clamp(f64::EPSILON, 1.0 - f64::EPSILON)
}

/// Monte Carlo engine for one run. Owns the generator (and so the random
/// source); strategies run sequentially against the same stream.
#[derive(Debug, Clone)]
pub struct MonteCarloEngine {
    generator: PathGenerator,
    params: GbmParams,
}

impl MonteCarloEngine {
    pub fn new(params: GbmParams, seed: u64) -> Self {
        Self {
            generator: PathGenerator::new(seed),
            params,
        }
    }

    pub fn run<S>(&mut self, strategy: &S, n: usize) -> PredictorResult<Vec<f64>>
    where
        S: SamplingStrategy + ?Sized,
    {
        let prices = strategy.sample(&mut self.generator, &self.params, n)?;
        tracing::debug!(
            strategy = strategy.name(),
            requested = n,
            produced = prices.len(),
            "sample drawn"
        );
        Ok(prices)
    }

    pub fn simulate_plain(&mut self, n: usize) -> PredictorResult<Vec<f64>> {
        self.run(&Plain, n)
    }

    pub fn simulate_antithetic(&mut self, n: usize) -> PredictorResult<Vec<f64>> {
        self.run(&Antithetic, n)
    }

    pub fn simulate_stratified(&mut self, n: usize, n_strata: usize) -> PredictorResult<Vec<f64>> {
        self.run(&Stratified { n_strata }, n)
    }

    /// Estimate E[S_T] from `n` plain draws using ln S_T as the control.
    /// Its mean ln S_0 + (mu - sigma^2/2) T is known exactly.
    pub fn simulate_control_variate(&mut self, n: usize) -> PredictorResult<ControlVariateEstimate> {
        let mut prices = sample_buffer(n)?;
        let mut controls = sample_buffer(n)?;
        let log_spot = self.params.spot.ln();

        for _ in 0..n {
            let z = self.generator.rng_mut().normal();
            prices.push(self.params.price_at(z));
            controls.push(log_spot + self.params.drift_term() + self.params.diffusion_scale() * z);
        }

        Ok(statistics::control_variate_estimate(
            &prices,
            &controls,
            self.params.log_price_mean(),
        ))
    }
}

/// Per-pair means (f(Z) + f(-Z)) / 2 of an antithetic sample laid out as
/// produced by [`Antithetic`].
pub fn antithetic_pair_means(sample: &[f64]) -> Vec<f64> {
    let half = sample.len() / 2;
    sample[..half]
        .iter()
        .zip(&sample[half..2 * half])
        .map(|(up, down)| 0.5 * (up + down))
        .collect()
}

/// Sample-variance ratio Var(plain) / Var(antithetic) over the raw prices.
///
/// The pooled antithetic sample has about the same spread as the plain one,
/// so this sits near 1 and may fall below it.
pub fn variance_reduction(plain: &[f64], antithetic: &[f64]) -> f64 {
    ratio_or_degenerate(statistics::variance(plain), statistics::variance(antithetic))
}

/// Per-draw variance of the plain estimator over that of the antithetic
/// estimator: Var(plain) / (2 Var(pair means)). At least 1 whenever the
/// payoff is monotone in the shock.
pub fn per_draw_variance_reduction(plain: &[f64], antithetic: &[f64]) -> f64 {
    ratio_or_degenerate(
        statistics::variance(plain),
        2.0 * statistics::variance(&antithetic_pair_means(antithetic)),
    )
}

/// 1.0 when both variances vanish, +inf when only the denominator does.
fn ratio_or_degenerate(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else if numerator > 0.0 {
        f64::INFINITY
    } else {
        1.0
    }
}
