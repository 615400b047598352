//! Sample statistics over price samples.
//! All functions are pure: inputs are borrowed and never reordered.

/// z-score of the two-sided 95% normal interval.
pub const Z_95: f64 = 1.96;

/// Arithmetic mean; 0.0 for an empty slice.
#[inline]
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Sample variance (divides by n - 1); 0.0 with fewer than two values.
pub fn variance(data: &[f64]) -> f64 {
    if data.len() < 2 {
        return 0.0;
    }
    let m = mean(data);
    let sum_sq: f64 = data.iter().map(|x| (x - m) * (x - m)).sum();
    sum_sq / (data.len() - 1) as f64
}

#[inline]
pub fn std_dev(data: &[f64]) -> f64 {
    variance(data).sqrt()
}

/// Linearly interpolated percentile, `p` in [0, 1].
///
/// Sorts a copy, takes the fractional rank p (n - 1) and interpolates
/// between the floor and ceiling entries. 0.0 for an empty slice.
pub fn percentile(data: &[f64], p: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let rank = p.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    if lower == upper {
        return sorted[lower];
    }

    let frac = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

/// Mean / spread / tail band of one strategy's sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub variance: f64,
    pub p5: f64,
    pub p95: f64,
}

impl SampleSummary {
    pub fn from_sample(data: &[f64]) -> Self {
        let variance = variance(data);
        Self {
            count: data.len(),
            mean: mean(data),
            std_dev: variance.sqrt(),
            variance,
            p5: percentile(data, 0.05),
            p95: percentile(data, 0.95),
        }
    }

    /// Standard error of the mean, std / sqrt(n).
    #[inline]
    pub fn std_error(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.std_dev / (self.count as f64).sqrt()
    }
}

/// Normal-approximation interval `center +/- z * spread / sqrt(n)`.
#[inline]
pub fn confidence_interval(center: f64, spread: f64, n: usize, z: f64) -> (f64, f64) {
    if n == 0 {
        return (center, center);
    }
    let half_width = z * spread / (n as f64).sqrt();
    (center - half_width, center + half_width)
}

/// Output of a control-variate adjustment.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize)]
pub struct ControlVariateEstimate {
    pub mean: f64,
    pub std_error: f64,
    /// Optimal coefficient c* = Cov(Y, C) / Var(C).
    pub coefficient: f64,
}

/// Control-variate estimate of E[Y] given paired control draws `c` whose
/// true mean `c_mean` is known.
///
/// Y_adj = Y - c* (C - E[C]). The coefficient is 0 when the control has no
/// variance, which reduces to the plain estimator. Only the common prefix
/// of `y` and `c` is used.
pub fn control_variate_estimate(y: &[f64], c: &[f64], c_mean: f64) -> ControlVariateEstimate {
    let n = y.len().min(c.len());
    if n == 0 {
        return ControlVariateEstimate::default();
    }
    let (y, c) = (&y[..n], &c[..n]);

    let y_bar = mean(y);
    let c_bar = mean(c);
    let var_c = variance(c);
    let coefficient = if var_c > 0.0 {
        let cov: f64 = y
            .iter()
            .zip(c)
            .map(|(yi, ci)| (yi - y_bar) * (ci - c_bar))
            .sum::<f64>()
            / (n - 1) as f64;
        cov / var_c
    } else {
        0.0
    };

    let adjusted: Vec<f64> = y
        .iter()
        .zip(c)
        .map(|(yi, ci)| yi - coefficient * (ci - c_mean))
        .collect();

    ControlVariateEstimate {
        mean: mean(&adjusted),
        std_error: std_dev(&adjusted) / (n as f64).sqrt(),
        coefficient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_mean_and_variance() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&data), 5.0);
        assert_relative_eq!(variance(&data), 32.0 / 7.0);
        assert_relative_eq!(std_dev(&data), (32.0_f64 / 7.0).sqrt());
    }

    #[test]
    fn test_empty_and_singleton() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(variance(&[]), 0.0);
        assert_eq!(variance(&[3.0]), 0.0);
        assert_eq!(percentile(&[], 0.5), 0.0);
        assert_eq!(percentile(&[3.0], 0.9), 3.0);
    }

    #[test]
    fn test_percentile_interpolation() {
        assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.5), 3.0);
        assert_eq!(percentile(&[1.0, 2.0, 3.0, 4.0], 0.5), 2.5);
        assert_eq!(percentile(&[10.0, 20.0], 0.25), 12.5);
    }

    #[test]
    fn test_percentile_does_not_mutate() {
        let data = vec![5.0, 1.0, 4.0, 2.0, 3.0];
        let copy = data.clone();
        let _ = percentile(&data, 0.3);
        assert_eq!(data, copy);
    }

    #[test]
    fn test_summary_fields() {
        let data: Vec<f64> = (1..=101).map(f64::from).collect();
        let s = SampleSummary::from_sample(&data);
        assert_eq!(s.count, 101);
        assert_relative_eq!(s.mean, 51.0);
        assert_relative_eq!(s.p5, 6.0);
        assert_relative_eq!(s.p95, 96.0);
        assert_relative_eq!(s.std_error(), s.std_dev / 101.0_f64.sqrt());
    }

    #[test]
    fn test_confidence_interval() {
        let (lo, hi) = confidence_interval(100.0, 10.0, 100, Z_95);
        assert_relative_eq!(lo, 98.04, epsilon = 1e-12);
        assert_relative_eq!(hi, 101.96, epsilon = 1e-12);
        assert_eq!(confidence_interval(5.0, 1.0, 0, Z_95), (5.0, 5.0));
    }

    #[test]
    fn test_control_variate_perfect_control() {
        // Y = 2C + 1 exactly, E[C] = 0 known: estimate collapses onto 1.
        let c = [-1.5, -0.5, 0.25, 0.75, 1.0];
        let y: Vec<f64> = c.iter().map(|ci| 2.0 * ci + 1.0).collect();
        let est = control_variate_estimate(&y, &c, 0.0);
        assert_relative_eq!(est.coefficient, 2.0, epsilon = 1e-12);
        assert_relative_eq!(est.mean, 1.0, epsilon = 1e-12);
        assert!(est.std_error < 1e-12);
    }

    #[test]
    fn test_control_variate_constant_control_is_plain() {
        let y = [1.0, 2.0, 3.0];
        let est = control_variate_estimate(&y, &[4.0, 4.0, 4.0], 4.0);
        assert_eq!(est.coefficient, 0.0);
        assert_relative_eq!(est.mean, 2.0);
    }

    proptest! {
        #[test]
        fn prop_percentile_within_bounds(
            data in prop::collection::vec(-1e6f64..1e6, 1..200),
            p in 0.0f64..=1.0,
        ) {
            let lo = data.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            let q = percentile(&data, p);
            prop_assert!(q >= lo - 1e-6 && q <= hi + 1e-6);
        }

        #[test]
        fn prop_percentile_monotone_in_p(
            data in prop::collection::vec(-1e3f64..1e3, 2..100),
            a in 0.0f64..=1.0,
            b in 0.0f64..=1.0,
        ) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(percentile(&data, lo) <= percentile(&data, hi) + 1e-9);
        }

        #[test]
        fn prop_variance_non_negative(data in prop::collection::vec(-1e4f64..1e4, 0..100)) {
            prop_assert!(variance(&data) >= 0.0);
        }
    }
}
