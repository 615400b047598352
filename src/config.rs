use crate::errors::{PredictorError, PredictorResult};
use std::fmt::Display;
use std::str::FromStr;

/// Hard ceiling on sample count; keeps the three sample buffers bounded.
pub const MAX_SIMULATIONS: usize = 1_000_000;

/// Environment floor on sample count. Programmatic callers may go lower.
pub const MIN_ENV_SIMULATIONS: usize = 100;

pub const DEFAULT_PRICE: f64 = 44_000.0;
pub const DEFAULT_VOLATILITY: f64 = 0.15;
pub const DEFAULT_DRIFT: f64 = 0.05;
pub const DEFAULT_RISK_FREE_RATE: f64 = 0.045;
pub const DEFAULT_TRADING_DAYS: u32 = 252;
pub const DEFAULT_MINUTES_PER_DAY: u32 = 390;
pub const DEFAULT_SIMULATIONS: usize = 10_000;
pub const DEFAULT_SEED: u64 = 42;

/// Market and simulation inputs for one prediction run.
///
/// Fields are private so every instance has passed validation, either
/// through [`MarketConfig::new`] or through the clamped environment loader.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MarketConfig {
    current_price: f64,
    volatility: f64,
    drift: f64,
    risk_free_rate: f64,
    trading_days: u32,
    minutes_per_day: u32,
    simulation_count: usize,
    random_seed: u64,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            current_price: DEFAULT_PRICE,
            volatility: DEFAULT_VOLATILITY,
            drift: DEFAULT_DRIFT,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
            trading_days: DEFAULT_TRADING_DAYS,
            minutes_per_day: DEFAULT_MINUTES_PER_DAY,
            simulation_count: DEFAULT_SIMULATIONS,
            random_seed: DEFAULT_SEED,
        }
    }
}

impl MarketConfig {
    /// Validated constructor for programmatic use. Unlike the environment
    /// loader this rejects bad input instead of substituting defaults.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        current_price: f64,
        volatility: f64,
        drift: f64,
        risk_free_rate: f64,
        trading_days: u32,
        minutes_per_day: u32,
        simulation_count: usize,
        random_seed: u64,
    ) -> PredictorResult<Self> {
        if !current_price.is_finite() || current_price <= 0.0 {
            return Err(PredictorError::Config(format!(
                "current_price must be positive and finite, got {current_price}"
            )));
        }
        if !volatility.is_finite() || volatility <= 0.0 {
            return Err(PredictorError::Config(format!(
                "volatility must be positive and finite, got {volatility}"
            )));
        }
        if !drift.is_finite() {
            return Err(PredictorError::Config(format!("drift must be finite, got {drift}")));
        }
        if !risk_free_rate.is_finite() || risk_free_rate < 0.0 {
            return Err(PredictorError::Config(format!(
                "risk_free_rate must be non-negative and finite, got {risk_free_rate}"
            )));
        }
        if trading_days == 0 || minutes_per_day == 0 {
            return Err(PredictorError::Config(format!(
                "trading calendar must be non-empty, got {trading_days} days x {minutes_per_day} minutes"
            )));
        }
        if simulation_count == 0 || simulation_count > MAX_SIMULATIONS {
            return Err(PredictorError::Config(format!(
                "simulation_count must be in [1, {MAX_SIMULATIONS}], got {simulation_count}"
            )));
        }

        Ok(Self {
            current_price,
            volatility,
            drift,
            risk_free_rate,
            trading_days,
            minutes_per_day,
            simulation_count,
            random_seed,
        })
    }

    /// Load from the process environment (and `.env` if present).
    /// Never fails: each bad value is logged and replaced by its default.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Split out from [`Self::from_env`]
    /// so tests don't have to touch process-wide state.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            current_price: parse_or_default(&lookup, "DJI_PRICE", DEFAULT_PRICE, |v| {
                (0.01..=1e9).contains(v)
            }),
            volatility: parse_or_default(&lookup, "VOLATILITY", DEFAULT_VOLATILITY, |v| {
                (0.001..=5.0).contains(v)
            }),
            drift: parse_or_default(&lookup, "DRIFT", DEFAULT_DRIFT, |v| (-1.0..=1.0).contains(v)),
            risk_free_rate: parse_or_default(
                &lookup,
                "RISK_FREE_RATE",
                DEFAULT_RISK_FREE_RATE,
                |v| (0.0..=1.0).contains(v),
            ),
            trading_days: parse_or_default(&lookup, "TRADING_DAYS", DEFAULT_TRADING_DAYS, |v| {
                (1..=366).contains(v)
            }),
            minutes_per_day: parse_or_default(
                &lookup,
                "MINUTES_PER_DAY",
                DEFAULT_MINUTES_PER_DAY,
                |v| (1..=1440).contains(v),
            ),
            simulation_count: parse_or_default(&lookup, "SIMULATIONS", DEFAULT_SIMULATIONS, |v| {
                (MIN_ENV_SIMULATIONS..=MAX_SIMULATIONS).contains(v)
            }),
            random_seed: parse_or_default(&lookup, "RANDOM_SEED", DEFAULT_SEED, |_| true),
        }
    }

    #[inline]
    pub fn current_price(&self) -> f64 {
        self.current_price
    }

    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    #[inline]
    pub fn drift(&self) -> f64 {
        self.drift
    }

    #[inline]
    pub fn risk_free_rate(&self) -> f64 {
        self.risk_free_rate
    }

    #[inline]
    pub fn trading_days(&self) -> u32 {
        self.trading_days
    }

    #[inline]
    pub fn minutes_per_day(&self) -> u32 {
        self.minutes_per_day
    }

    #[inline]
    pub fn simulation_count(&self) -> usize {
        self.simulation_count
    }

    #[inline]
    pub fn random_seed(&self) -> u64 {
        self.random_seed
    }
}

/// How the binary renders a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = PredictorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(PredictorError::Config(format!("unknown report format: {other}"))),
        }
    }
}

impl Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// Everything the binary reads at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub market: MarketConfig,
    pub report_format: ReportFormat,
}

impl AppConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let report_format = match lookup("REPORT_FORMAT") {
            None => ReportFormat::default(),
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!(key = "REPORT_FORMAT", value = %raw, "{e}, using text");
                ReportFormat::default()
            }),
        };

        Self {
            market: MarketConfig::from_lookup(&lookup),
            report_format,
        }
    }
}

fn parse_or_default<T, F, V>(lookup: &F, key: &str, default: T, valid: V) -> T
where
    T: FromStr + Display + Copy,
    F: Fn(&str) -> Option<String>,
    V: Fn(&T) -> bool,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if valid(&value) => value,
        Ok(_) => {
            tracing::warn!(key, value = %raw, default = %default, "out of range, using default");
            default
        }
        Err(_) => {
            tracing::warn!(key, value = %raw, default = %default, "unparseable, using default");
            default
        }
    }
}
