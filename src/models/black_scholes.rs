use crate::models::normal;

/// Black-Scholes European option values and sensitivities.
///
/// d1 = (ln(S/K) + (r + sigma^2/2) T) / (sigma sqrt(T))
/// d2 = d1 - sigma sqrt(T)
///
/// Depends only on (S, K, T, r, sigma), never on simulated samples.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct Greeks {
    pub d1: f64,
    pub d2: f64,
    pub call_price: f64,
    pub put_price: f64,
    pub delta: f64,
    pub gamma: f64,
    pub theta: f64,
    pub vega: f64,
    pub rho: f64,
}

impl Greeks {
    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Closed-form Greeks for a call struck at `strike`.
///
/// Degenerate inputs (expired or negative horizon, non-positive volatility,
/// spot or strike) return the all-zero struct instead of failing.
pub fn black_scholes_greeks(spot: f64, strike: f64, t: f64, r: f64, sigma: f64) -> Greeks {
    if !(t > 0.0) || !(sigma > 0.0) || !(spot > 0.0) || !(strike > 0.0) {
        return Greeks::default();
    }

    let sqrt_t = t.sqrt();
    let sigma_sqrt_t = sigma * sqrt_t;
    let d1 = ((spot / strike).ln() + (r + 0.5 * sigma * sigma) * t) / sigma_sqrt_t;
    let d2 = d1 - sigma_sqrt_t;

    let nd1 = normal::cdf(d1);
    let nd2 = normal::cdf(d2);
    let phi_d1 = normal::pdf(d1);
    let discounted_strike = strike * (-r * t).exp();

    Greeks {
        d1,
        d2,
        call_price: spot * nd1 - discounted_strike * nd2,
        put_price: discounted_strike * (1.0 - nd2) - spot * (1.0 - nd1),
        delta: nd1,
        gamma: phi_d1 / (spot * sigma_sqrt_t),
        theta: -(spot * phi_d1 * sigma) / (2.0 * sqrt_t) - r * discounted_strike * nd2,
        vega: spot * sqrt_t * phi_d1,
        rho: strike * t * (-r * t).exp() * nd2,
    }
}

/// Deterministic expectation under the drift assumption: S_0 e^(mu T).
#[inline]
pub fn analytical_expected(spot: f64, drift: f64, t: f64) -> f64 {
    spot * (drift * t).exp()
}

/// One Ito step of f(S) = ln S under GBM.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct ItoStep {
    /// (mu - sigma^2/2) dt
    pub drift_term: f64,
    /// sigma dW
    pub diffusion_term: f64,
    /// d ln S
    pub d_log_price: f64,
    pub new_price: f64,
    pub price_change: f64,
}

/// Apply Ito's lemma to ln S:
/// d(ln S) = (mu - sigma^2/2) dt + sigma dW
pub fn ito_log_step(spot: f64, dt: f64, dw: f64, mu: f64, sigma: f64) -> ItoStep {
    let drift_term = (mu - 0.5 * sigma * sigma) * dt;
    let diffusion_term = sigma * dw;
    let d_log_price = drift_term + diffusion_term;
    let new_price = spot * d_log_price.exp();

    ItoStep {
        drift_term,
        diffusion_term,
        d_log_price,
        new_price,
        price_change: new_price - spot,
    }
}
