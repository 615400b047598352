//! Seeded random source for the simulation engine.
//!
//! [`RandomSource`] owns its generator state and the spare variate left over
//! from each Box-Muller pair. One instance belongs to one engine; callers
//! that want concurrency must seed an independent instance per thread.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};

/// Deterministic uniform/normal generator.
///
/// The same seed always yields the same sequence of uniforms and normals.
///
/// # Examples
///
/// ```rust
/// use price_oracle::simulation::rng::RandomSource;
///
/// let mut a = RandomSource::new(7);
/// let mut b = RandomSource::new(7);
/// assert_eq!(a.normal(), b.normal());
/// ```
#[derive(Debug, Clone)]
pub struct RandomSource {
    inner: StdRng,
    seed: u64,
    /// Second variate of the last polar Box-Muller pair, not yet handed out.
    spare: Option<f64>,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed,
            spare: None,
        }
    }

    /// Reset to the start of the sequence for `seed`, discarding any cached
    /// spare variate.
    pub fn seed(&mut self, seed: u64) {
        self.inner = StdRng::seed_from_u64(seed);
        self.seed = seed;
        self.spare = None;
    }

    #[inline]
    pub fn current_seed(&self) -> u64 {
        self.seed
    }

    /// Uniform variate in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Standard normal variate via the polar Box-Muller method.
    ///
    /// Each accepted `(u, v)` pair yields two independent normals; the second
    /// is cached and returned by the next call.
    pub fn normal(&mut self) -> f64 {
        if let Some(spare) = self.spare.take() {
            return spare;
        }

        loop {
            let u = 2.0 * self.uniform() - 1.0;
            let v = 2.0 * self.uniform() - 1.0;
            let s = u * u + v * v;
            if s > 0.0 && s < 1.0 {
                let scale = (-2.0 * s.ln() / s).sqrt();
                self.spare = Some(v * scale);
                return u * scale;
            }
        }
    }

    /// Poisson count with mean `lambda`. Non-positive or non-finite means
    /// yield zero events.
    pub fn poisson(&mut self, lambda: f64) -> u64 {
        if !(lambda > 0.0) || !lambda.is_finite() {
            return 0;
        }
        match Poisson::new(lambda) {
            Ok(dist) => {
                let draw: f64 = dist.sample(&mut self.inner);
                draw as u64
            }
            Err(_) => 0,
        }
    }
}
