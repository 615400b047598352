use crate::errors::PredictorResult;
use crate::simulation::rng::RandomSource;
use crate::simulation::sample_buffer;

/// Prices never drop below this after a jump step.
const PRICE_FLOOR: f64 = 1e-9;

/// Compound-Poisson jump parameters for the Merton model.
///
/// Log jump sizes are N(mean, std_dev^2); jumps arrive at `intensity`
/// per year.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpParams {
    pub intensity: f64,
    pub mean: f64,
    pub std_dev: f64,
}

impl Default for JumpParams {
    fn default() -> Self {
        Self {
            intensity: 0.1,
            mean: 0.0,
            std_dev: 0.1,
        }
    }
}

impl JumpParams {
    /// kappa = E[e^J] - 1, the mean relative jump size.
    #[inline]
    pub fn kappa(&self) -> f64 {
        (self.mean + 0.5 * self.std_dev * self.std_dev).exp() - 1.0
    }
}

/// Merton jump-diffusion path.
///
/// dS/S = (mu - lambda kappa) dt + sigma dW + dJ
///
/// Euler steps; each step draws a Poisson(lambda dt) jump count and sums
/// e^J - 1 over the jumps. Returns `steps + 1` prices starting at `spot`.
pub fn merton_jump_path(
    rng: &mut RandomSource,
    spot: f64,
    t: f64,
    steps: usize,
    mu: f64,
    sigma: f64,
    jumps: &JumpParams,
) -> PredictorResult<Vec<f64>> {
    let mut path = sample_buffer(steps + 1)?;
    path.push(spot);
    if steps == 0 {
        return Ok(path);
    }

    let dt = t / steps as f64;
    let sqrt_dt = dt.sqrt();
    let compensated_drift = (mu - jumps.intensity * jumps.kappa()) * dt;

    let mut price = spot;
    for _ in 0..steps {
        let dw = sqrt_dt * rng.normal();

        let n_jumps = rng.poisson(jumps.intensity * dt);
        let mut jump = 0.0;
        for _ in 0..n_jumps {
            let size = jumps.mean + jumps.std_dev * rng.normal();
            jump += size.exp() - 1.0;
        }

        price += price * (compensated_drift + sigma * dw + jump);
        price = price.max(PRICE_FLOOR);
        path.push(price);
    }

    Ok(path)
}

/// Ornstein-Uhlenbeck mean-reverting path.
///
/// dS = theta (mu_eq - S) dt + sigma dW, Euler-Maruyama discretised.
/// Unlike GBM this is additive, so prices may go negative.
pub fn ornstein_uhlenbeck_path(
    rng: &mut RandomSource,
    spot: f64,
    theta: f64,
    mu_eq: f64,
    sigma: f64,
    t: f64,
    steps: usize,
) -> PredictorResult<Vec<f64>> {
    let mut path = sample_buffer(steps + 1)?;
    path.push(spot);
    if steps == 0 {
        return Ok(path);
    }

    let dt = t / steps as f64;
    let sqrt_dt = dt.sqrt();

    let mut level = spot;
    for _ in 0..steps {
        let dw = sqrt_dt * rng.normal();
        level += theta * (mu_eq - level) * dt + sigma * dw;
        path.push(level);
    }

    Ok(path)
}
