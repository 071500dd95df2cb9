//! Nemenyi post-hoc test over the per-block rank matrix.
//!
//! Unlike the scalar Holm correction, the Nemenyi procedure is its own
//! post-hoc test: per-benchmark tie-averaged ranks, mean rank differences
//! standardized by the Friedman standard error, and p-values from the
//! studentized range distribution with k groups and infinite degrees of
//! freedom (`q = |z|·√2`).

use crate::error::AnalysisError;
use crate::stats::distributions::studentized_range_sf;
use crate::stats::ranking::column_ranks;
use crate::stats::z_values::z_value;
use crate::types::{OptimizationDirection, PValueMatrix, ValueMatrix};

/// Compute the k×k Nemenyi-adjusted p-value matrix for a k×n value block.
///
/// The result is symmetric with a unit diagonal. The matrix is invariant
/// under rank reversal, so the optimization direction cannot change the
/// p-values; it is applied anyway so the intermediate ranks agree with the
/// ranking engine's.
///
/// # Errors
///
/// [`AnalysisError::Degenerate`] for fewer than 2 algorithms or an empty
/// benchmark set.
pub fn nemenyi_adjusted_p(
    values: &ValueMatrix,
    direction: OptimizationDirection,
) -> Result<PValueMatrix, AnalysisError> {
    let (k, n) = values.shape();
    if k < 2 {
        return Err(AnalysisError::Degenerate(format!(
            "Nemenyi test requires at least 2 algorithms, got {k}"
        )));
    }
    if n == 0 {
        return Err(AnalysisError::Degenerate(
            "Nemenyi test requires at least 1 benchmark".to_string(),
        ));
    }

    let ranks = column_ranks(values, direction);
    let mean_ranks: Vec<f64> = (0..k)
        .map(|i| (0..n).map(|j| ranks[(i, j)]).sum::<f64>() / n as f64)
        .collect();

    let mut p_matrix = PValueMatrix::from_element(k, k, 1.0);
    for i in 0..k {
        for j in (i + 1)..k {
            let q = z_value(mean_ranks[i], mean_ranks[j], k, n).abs() * 2f64.sqrt();
            let p = studentized_range_sf(q, k);
            p_matrix[(i, j)] = p;
            p_matrix[(j, i)] = p;
        }
    }
    Ok(p_matrix)
}
