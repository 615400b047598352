//! Taylor expansion of ln(S) around S_0, exponentiated back to a price.

pub const DEFAULT_ORDER: u32 = 4;

/// ln(S_0 + dS) ~ ln(S_0) + sum_{n=1}^{order} f^(n)(S_0) dS^n / n!
/// with f^(n)(S_0) = (-1)^(n-1) (n-1)! / S_0^n, so each term reduces to
/// (-1)^(n-1) (dS/S_0)^n / n.
pub fn taylor_price(spot: f64, displacement: f64, order: u32) -> f64 {
    let ratio = displacement / spot;
    let mut log_price = spot.ln();
    let mut ratio_pow = 1.0;

    for n in 1..=order {
        ratio_pow *= ratio;
        let sign = if n % 2 == 0 { -1.0 } else { 1.0 };
        log_price += sign * ratio_pow / f64::from(n);
    }

    log_price.exp()
}

/// Expected displacement under the drift assumption: S_0 mu T.
#[inline]
pub fn expected_displacement(spot: f64, drift: f64, t: f64) -> f64 {
    spot * drift * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_order_zero_is_spot() {
        assert_relative_eq!(taylor_price(250.0, 30.0, 0), 250.0, epsilon = 1e-10);
    }

    #[test]
    fn test_order_one_is_linear() {
        assert_relative_eq!(taylor_price(100.0, 5.0, 1), 100.0 * 0.05_f64.exp(), epsilon = 1e-10);
    }

    #[test]
    fn test_converges_to_displaced_price() {
        let (spot, ds) = (100.0, 10.0);
        let exact = spot + ds;
        let errors: Vec<f64> = (2..=4).map(|order| (taylor_price(spot, ds, order) - exact).abs()).collect();
        assert!(errors[0] > errors[1], "order 3 should beat order 2: {errors:?}");
        assert!(errors[1] > errors[2], "order 4 should beat order 3: {errors:?}");
        assert!(errors[2] < 1e-3);
    }

    #[test]
    fn test_higher_order_closer_to_analytic_expectation() {
        let (spot, mu) = (44_000.0, 0.05);
        let t = 207.0 / (252.0 * 390.0);
        let ds = expected_displacement(spot, mu, t);
        let analytic = crate::models::black_scholes::analytical_expected(spot, mu, t);

        let second = (taylor_price(spot, ds, 2) - analytic).abs();
        let fourth = (taylor_price(spot, ds, 4) - analytic).abs();
        assert!(fourth < second, "order 4 err={fourth} order 2 err={second}");
    }

    #[test]
    fn test_short_horizon_matches_analytic_expectation() {
        let t = 207.0 / (252.0 * 390.0);
        let ds = expected_displacement(44_000.0, 0.05, t);
        let approx_price = taylor_price(44_000.0, ds, DEFAULT_ORDER);
        let analytic = crate::models::black_scholes::analytical_expected(44_000.0, 0.05, t);
        assert!((approx_price - analytic).abs() < 0.01, "taylor={approx_price} analytic={analytic}");
    }
}
