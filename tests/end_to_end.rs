use std::collections::HashMap;

use approx::assert_abs_diff_eq;
use price_oracle::config::{AppConfig, MarketConfig, ReportFormat};
use price_oracle::predictor::Predictor;
use price_oracle::report;

#[test]
fn default_run_matches_closed_form() {
    let cfg = MarketConfig::default();
    let results = Predictor::new(&cfg).run().unwrap();

    assert_abs_diff_eq!(results.time_to_target, 207.0 / (252.0 * 390.0), epsilon = 1e-12);
    assert_abs_diff_eq!(results.analytical_expected, 44_004.634, epsilon = 0.01);

    // Terminal sd is ~$300, so every estimator lands within a few dollars.
    assert!((results.combined_mean - results.analytical_expected).abs() < 10.0);
    assert!((results.antithetic.mean - results.analytical_expected).abs() < 5.0);
    assert!((results.control_variate.mean - results.analytical_expected).abs() < 5.0);

    assert!(results.variance_reduction_per_draw >= 1.0);
    assert!(results.variance_reduction > 0.8 && results.variance_reduction < 1.25);
    assert!(results.ci_lower < results.antithetic.mean);
    assert!(results.antithetic.mean < results.ci_upper);
    assert!(results.plain.p5 < results.plain.mean && results.plain.mean < results.plain.p95);

    assert!(results.ito_median < results.analytical_expected);
    assert_abs_diff_eq!(results.taylor_price, results.analytical_expected, epsilon = 1e-3);

    let g = results.greeks;
    assert!(g.delta > 0.5 && g.delta < 1.0);
    assert!(g.gamma > 0.0 && g.vega > 0.0 && g.rho > 0.0);
    assert!(g.theta < 0.0);
}

#[test]
fn repeated_runs_are_identical() {
    let cfg = MarketConfig::default();
    let a = Predictor::new(&cfg).run().unwrap();
    let b = Predictor::new(&cfg.clone()).run().unwrap();
    assert_eq!(a, b);
}

#[test]
fn environment_drives_the_run() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("DJI_PRICE", "100"),
        ("VOLATILITY", "0.2"),
        ("SIMULATIONS", "2000"),
        ("RANDOM_SEED", "7"),
        ("REPORT_FORMAT", "json"),
        ("DRIFT", "not-a-number"),
    ]);
    let app = AppConfig::from_lookup(|key| env.get(key).map(|v| v.to_string()));

    assert_eq!(app.report_format, ReportFormat::Json);
    assert_eq!(app.market.simulation_count(), 2_000);
    assert_eq!(app.market.drift(), MarketConfig::default().drift());

    let results = Predictor::new(&app.market).run().unwrap();
    assert_eq!(results.plain.count, 2_000);

    let json = report::render_json(&results).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert!(value["ci_lower"].as_f64().unwrap() < value["ci_upper"].as_f64().unwrap());

    let text = report::render_text(&app.market, &results);
    assert!(text.contains("COMBINED PREDICTION"));
}
