use crate::config::MarketConfig;
use crate::errors::PredictorResult;
use crate::models::black_scholes::{self, Greeks};
use crate::models::gbm::{self, GbmParams};
use crate::models::taylor;
use crate::numerics::statistics::{self, ControlVariateEstimate, SampleSummary, Z_95};
use crate::simulation::engine::{self, MonteCarloEngine, DEFAULT_STRATA};

/// Everything one run produces. Built once per [`Predictor::run`] and
/// handed to the caller; nothing keeps a reference to it.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct PredictionResults {
    /// Horizon T in years.
    pub time_to_target: f64,
    pub plain: SampleSummary,
    pub antithetic: SampleSummary,
    pub stratified: SampleSummary,
    /// Var(plain) / Var(antithetic) over the raw samples.
    pub variance_reduction: f64,
    /// Var(plain) / (2 Var(antithetic pair means)), the per-draw efficiency
    /// gain of the antithetic estimator.
    pub variance_reduction_per_draw: f64,
    pub control_variate: ControlVariateEstimate,
    /// S_0 e^(mu T)
    pub analytical_expected: f64,
    /// S_0 e^((mu - sigma^2/2) T), the Ito step with no shock.
    pub ito_median: f64,
    pub taylor_price: f64,
    /// Unweighted mean of the analytic value and every non-empty strategy
    /// mean.
    pub combined_mean: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    /// At-the-money (K = S_0) Greeks at the run horizon.
    pub greeks: Greeks,
}

/// Wires config -> engine -> statistics -> results.
///
/// Holds only a borrowed config; each call to [`Predictor::run`] builds a
/// fresh engine seeded from it, so repeated runs are identical.
pub struct Predictor<'a> {
    config: &'a MarketConfig,
}

impl<'a> Predictor<'a> {
    pub fn new(config: &'a MarketConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn time_to_target(&self) -> f64 {
        gbm::time_to_target(self.config.trading_days(), self.config.minutes_per_day())
    }

    pub fn run(&self) -> PredictorResult<PredictionResults> {
        let cfg = self.config;
        let spot = cfg.current_price();
        let t = self.time_to_target();
        let n = cfg.simulation_count();

        tracing::info!(
            spot,
            horizon = t,
            simulations = n,
            seed = cfg.random_seed(),
            "starting prediction run"
        );

        let params = GbmParams::new(spot, t, cfg.drift(), cfg.volatility())?;
        let mut mc = MonteCarloEngine::new(params, cfg.random_seed());

        // Strategies share one random stream, in this order.
        let plain_prices = mc.simulate_plain(n)?;
        let antithetic_prices = mc.simulate_antithetic(n)?;
        let stratified_prices = mc.simulate_stratified(n, DEFAULT_STRATA)?;
        let control_variate = mc.simulate_control_variate(n)?;

        let plain = SampleSummary::from_sample(&plain_prices);
        let antithetic = SampleSummary::from_sample(&antithetic_prices);
        let stratified = SampleSummary::from_sample(&stratified_prices);
        let variance_reduction = engine::variance_reduction(&plain_prices, &antithetic_prices);
        let variance_reduction_per_draw =
            engine::per_draw_variance_reduction(&plain_prices, &antithetic_prices);

        for (name, summary) in [
            ("plain", &plain),
            ("antithetic", &antithetic),
            ("stratified", &stratified),
        ] {
            tracing::debug!(
                strategy = name,
                count = summary.count,
                mean = summary.mean,
                std_dev = summary.std_dev,
                "strategy summary"
            );
        }

        let greeks =
            black_scholes::black_scholes_greeks(spot, spot, t, cfg.risk_free_rate(), cfg.volatility());
        let analytical_expected = black_scholes::analytical_expected(spot, cfg.drift(), t);
        let ito_median = black_scholes::ito_log_step(spot, t, 0.0, cfg.drift(), cfg.volatility()).new_price;
        let taylor_price = taylor::taylor_price(
            spot,
            taylor::expected_displacement(spot, cfg.drift(), t),
            taylor::DEFAULT_ORDER,
        );

        // Small runs can leave a strategy empty; its 0.0 mean is not an estimate.
        let estimates: Vec<f64> = [&plain, &antithetic, &stratified]
            .into_iter()
            .filter(|summary| summary.count > 0)
            .map(|summary| summary.mean)
            .chain(std::iter::once(analytical_expected))
            .collect();
        let combined_mean = statistics::mean(&estimates);

        let ci_basis = if antithetic.count > 0 { &antithetic } else { &plain };
        let (ci_lower, ci_upper) =
            statistics::confidence_interval(ci_basis.mean, ci_basis.std_dev, n, Z_95);

        tracing::info!(
            combined_mean,
            ci_lower,
            ci_upper,
            variance_reduction,
            variance_reduction_per_draw,
            "prediction run complete"
        );

        Ok(PredictionResults {
            time_to_target: t,
            plain,
            antithetic,
            stratified,
            variance_reduction,
            variance_reduction_per_draw,
            control_variate,
            analytical_expected,
            ito_median,
            taylor_price,
            combined_mean,
            ci_lower,
            ci_upper,
            greeks,
        })
    }
}
