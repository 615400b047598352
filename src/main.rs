use price_oracle::config::{AppConfig, ReportFormat};
use price_oracle::predictor::Predictor;
use price_oracle::report;

fn main() {
    // Structured logging to stderr; stdout carries only the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cfg = AppConfig::from_env();
    tracing::info!(format = %cfg.report_format, "price_oracle starting");

    let results = match Predictor::new(&cfg.market).run() {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("prediction failed: {e}");
            std::process::exit(1);
        }
    };

    let rendered = match cfg.report_format {
        ReportFormat::Text => report::render_text(&cfg.market, &results),
        ReportFormat::Json => match report::render_json(&results) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("report rendering failed: {e}");
                std::process::exit(1);
            }
        },
    };

    println!("{rendered}");
}
