use std::fmt;

use crate::config::MarketConfig;
use crate::errors::PredictorResult;
use crate::predictor::PredictionResults;

const WIDTH: usize = 70;

/// Human-readable report for one run. Rendered through `Display`.
pub struct TextReport<'a> {
    config: &'a MarketConfig,
    results: &'a PredictionResults,
}

impl<'a> TextReport<'a> {
    pub fn new(config: &'a MarketConfig, results: &'a PredictionResults) -> Self {
        Self { config, results }
    }
}

fn rule(f: &mut fmt::Formatter<'_>, ch: char) -> fmt::Result {
    writeln!(f, "{}", ch.to_string().repeat(WIDTH))
}

fn heading(f: &mut fmt::Formatter<'_>, ch: char, title: &str) -> fmt::Result {
    rule(f, ch)?;
    writeln!(f, "{title}")?;
    rule(f, ch)?;
    writeln!(f)
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cfg = self.config;
        let r = self.results;

        writeln!(f)?;
        heading(f, '=', "      PRICE PREDICTION REPORT")?;
        writeln!(f, "Current Price:    ${:>12.2}", cfg.current_price())?;
        writeln!(f, "Volatility:       {:>12.2}%", cfg.volatility() * 100.0)?;
        writeln!(f, "Drift:            {:>12.2}%", cfg.drift() * 100.0)?;
        writeln!(f, "Risk-free Rate:   {:>12.2}%", cfg.risk_free_rate() * 100.0)?;
        writeln!(f, "Horizon (years):  {:>12.7}", r.time_to_target)?;
        writeln!(f, "Simulations:      {:>12}", cfg.simulation_count())?;
        writeln!(f, "Seed:             {:>12}", cfg.random_seed())?;
        writeln!(f)?;

        heading(f, '-', "PREDICTION RESULTS")?;

        writeln!(f, "1. Geometric Brownian Motion:")?;
        writeln!(f, "   Mean:           ${:>12.2}", r.plain.mean)?;
        writeln!(f, "   Std Dev:        ${:>12.2}", r.plain.std_dev)?;
        writeln!(f, "   90% Range:      ${:>12.2} - ${:.2}", r.plain.p5, r.plain.p95)?;
        writeln!(f)?;

        writeln!(f, "2. Antithetic Variates:")?;
        writeln!(f, "   Mean:           ${:>12.2}", r.antithetic.mean)?;
        writeln!(f, "   Std Dev:        ${:>12.2}", r.antithetic.std_dev)?;
        writeln!(f, "   Var Reduction:  {:>13.2}x", r.variance_reduction)?;
        writeln!(f, "   Per-draw Gain:  {:>13.2}x", r.variance_reduction_per_draw)?;
        writeln!(f)?;

        writeln!(f, "3. Stratified Sampling:")?;
        writeln!(f, "   Mean:           ${:>12.2}", r.stratified.mean)?;
        writeln!(f, "   Std Dev:        ${:>12.2}", r.stratified.std_dev)?;
        writeln!(f)?;

        writeln!(f, "4. Analytical:")?;
        writeln!(f, "   Expected:       ${:>12.2}", r.analytical_expected)?;
        writeln!(f, "   Ito Median:     ${:>12.2}", r.ito_median)?;
        writeln!(f)?;

        writeln!(f, "5. Taylor Expansion:")?;
        writeln!(f, "   Approximation:  ${:>12.2}", r.taylor_price)?;
        writeln!(f)?;

        writeln!(f, "6. Control Variate (ln S_T):")?;
        writeln!(f, "   Mean:           ${:>12.2}", r.control_variate.mean)?;
        writeln!(f, "   Std Error:      ${:>12.4}", r.control_variate.std_error)?;
        writeln!(f)?;

        heading(f, '=', "COMBINED PREDICTION")?;
        writeln!(f, "   Close:          ${:>12.2}", r.combined_mean)?;
        writeln!(f, "   95% CI:         ${:>12.2} - ${:.2}", r.ci_lower, r.ci_upper)?;
        writeln!(f)?;

        heading(f, '-', "BLACK-SCHOLES GREEKS (ATM)")?;
        let g = &r.greeks;
        writeln!(f, "   Call:           ${:>12.2}", g.call_price)?;
        writeln!(f, "   Put:            ${:>12.2}", g.put_price)?;
        writeln!(f, "   Delta:          {:>13.4}", g.delta)?;
        writeln!(f, "   Gamma:          {:>13.6}", g.gamma)?;
        writeln!(f, "   Theta:          {:>13.4}", g.theta)?;
        writeln!(f, "   Vega:           {:>13.4}", g.vega)?;
        writeln!(f, "   Rho:            {:>13.4}", g.rho)?;
        writeln!(f)?;
        rule(f, '=')
    }
}

pub fn render_text(config: &MarketConfig, results: &PredictionResults) -> String {
    TextReport::new(config, results).to_string()
}

/// Pretty-printed JSON of the full result set.
pub fn render_json(results: &PredictionResults) -> PredictorResult<String> {
    Ok(serde_json::to_string_pretty(results)?)
}
