//! Standardized rank-difference z-values and their p-values.
//!
//! The standard error of a mean-rank difference under the Friedman null is
//! `sqrt(k(k+1)/(6n))`. The all-pairs mode reports |z| for every unordered
//! pair in (i < j) lexicographic order; the control mode reports *signed*
//! z-values with the control rank as the first argument, over the
//! non-control rows in their original order. The sign asymmetry between the
//! two modes is intentional and relied on downstream.

use crate::stats::distributions::normal_sf;

/// z-value for the difference of two mean ranks among k algorithms over n
/// benchmarks.
pub fn z_value(mean_rank_a: f64, mean_rank_b: f64, k: usize, n: usize) -> f64 {
    let standard_error = (k as f64 * (k as f64 + 1.0) / (6.0 * n as f64)).sqrt();
    (mean_rank_a - mean_rank_b) / standard_error
}

/// |z| for every unordered pair (i, j), i < j, in lexicographic index order.
///
/// Returns `((i, j), |z|)` tuples; the order is the canonical pair order
/// every later stage (corrections, tables, significance matrices) iterates
/// in.
pub fn pairwise_z_values(mean_ranks: &[f64], n: usize) -> Vec<((usize, usize), f64)> {
    let k = mean_ranks.len();
    let mut z_values = Vec::with_capacity(k * (k - 1) / 2);
    for i in 0..k {
        for j in (i + 1)..k {
            let z = z_value(mean_ranks[i], mean_ranks[j], k, n).abs();
            z_values.push(((i, j), z));
        }
    }
    z_values
}

/// Signed z-values of the control algorithm against every other algorithm.
///
/// The control rank is always the first argument, so the sign says which
/// side of the control each algorithm falls on; no absolute value is taken.
/// `other_ranks` must be the non-control mean ranks in original row order.
pub fn control_z_values(control_rank: f64, other_ranks: &[f64], k: usize, n: usize) -> Vec<f64> {
    other_ranks
        .iter()
        .map(|&rank| z_value(control_rank, rank, k, n))
        .collect()
}

/// Two-sided p-value for a z-value via the normal tail.
pub fn p_from_z(z: f64) -> f64 {
    2.0 * normal_sf(z.abs())
}
