//! Quadrature rules over a closed interval [a, b].
//!
//! Integrands are any `Fn(f64) -> f64`. Malformed bounds or counts are the
//! caller's responsibility; nothing here fails.

/// 5-point Gauss-Legendre nodes on [-1, 1].
const GL5_NODES: [f64; 5] = [
    -0.906_179_845_938_664,
    -0.538_469_310_105_683_1,
    0.0,
    0.538_469_310_105_683_1,
    0.906_179_845_938_664,
];

const GL5_WEIGHTS: [f64; 5] = [
    0.236_926_885_056_189_1,
    0.478_628_670_499_366_5,
    0.568_888_888_888_888_9,
    0.478_628_670_499_366_5,
    0.236_926_885_056_189_1,
];

/// Upper bound on Romberg rows; the last row already uses 2^(MAX - 2)
/// midpoint evaluations.
pub const MAX_ROMBERG_LEVELS: usize = 24;

/// Composite Simpson's rule with `n` subintervals, bumped to the next even
/// number (and to at least 2).
pub fn simpsons_rule<F>(f: F, a: f64, b: f64, n: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let n = match n {
        0 => 2,
        n if n % 2 == 1 => n + 1,
        n => n,
    };

    let h = (b - a) / n as f64;
    let mut sum = f(a) + f(b);
    for i in 1..n {
        let weight = if i % 2 == 0 { 2.0 } else { 4.0 };
        sum += weight * f(a + i as f64 * h);
    }

    h * sum / 3.0
}

/// Fixed 5-node Gauss-Legendre rule, exact for polynomials up to degree 9.
pub fn gauss_legendre_5<F>(f: F, a: f64, b: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let scale = 0.5 * (b - a);
    let shift = 0.5 * (a + b);

    let sum: f64 = GL5_NODES
        .iter()
        .zip(GL5_WEIGHTS.iter())
        .map(|(x, w)| w * f(scale * x + shift))
        .sum();

    scale * sum
}

/// Romberg integration: trapezoid rule on 1, 2, 4, ... panels with
/// Richardson extrapolation.
///
/// Stops when two consecutive diagonal entries differ by less than `tol`, or
/// after `max_levels` rows (clamped to [2, MAX_ROMBERG_LEVELS]), returning
/// the last diagonal entry either way.
pub fn romberg<F>(f: F, a: f64, b: f64, tol: f64, max_levels: usize) -> f64
where
    F: Fn(f64) -> f64,
{
    let max_levels = max_levels.clamp(2, MAX_ROMBERG_LEVELS);
    let mut prev_row: Vec<f64> = Vec::with_capacity(max_levels);
    let mut row: Vec<f64> = Vec::with_capacity(max_levels);

    let mut h = b - a;
    prev_row.push(0.5 * h * (f(a) + f(b)));

    for level in 1..max_levels {
        h *= 0.5;
        let panels = 1usize << (level - 1);
        let midpoints: f64 = (0..panels).map(|k| f(a + (2 * k + 1) as f64 * h)).sum();

        row.clear();
        row.push(0.5 * prev_row[0] + h * midpoints);

        let mut factor = 1.0;
        for j in 1..=level {
            factor *= 4.0;
            let refined = row[j - 1] + (row[j - 1] - prev_row[j - 1]) / (factor - 1.0);
            row.push(refined);
        }

        if (row[level] - prev_row[level - 1]).abs() < tol {
            return row[level];
        }
        std::mem::swap(&mut prev_row, &mut row);
    }

    prev_row[prev_row.len() - 1]
}
