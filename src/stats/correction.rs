//! Multiple-testing correction and the pair-comparison record.
//!
//! The Holm step-down adjustment operates on sorted p-values but the table
//! consumers need results back in the original pair order, so the record
//! type [`PairComparison`] carries every stage of one comparison (z,
//! unadjusted p, adjusted p per method) in a single ordered list instead of
//! parallel arrays keyed by iteration order.

use crate::stats::z_values::p_from_z;

/// One pairwise comparison threaded through every correction stage.
#[derive(Debug, Clone)]
pub struct PairComparison {
    /// Row index of the first algorithm (i < j).
    pub i: usize,
    /// Row index of the second algorithm.
    pub j: usize,
    /// Display label, `"A vs B"`.
    pub label: String,
    /// z-value (unsigned in all mode, signed in control mode).
    pub z: f64,
    /// Two-sided unadjusted p-value.
    pub p_unadjusted: f64,
    /// Holm-adjusted p-value.
    pub p_holm: f64,
    /// Nemenyi-adjusted p-value (all mode only).
    pub p_nemenyi: Option<f64>,
}

impl PairComparison {
    /// Build a comparison record from an index pair and z-value; the
    /// unadjusted p comes from the two-sided normal tail, the adjusted
    /// slots start equal to it until the corrections fill them in.
    pub fn from_z(i: usize, j: usize, label: String, z: f64) -> Self {
        let p = p_from_z(z);
        Self {
            i,
            j,
            label,
            z,
            p_unadjusted: p,
            p_holm: p,
            p_nemenyi: None,
        }
    }

    /// Null-hypothesis outcome for an adjusted p-value at `alpha`.
    pub fn outcome(p_adjusted: f64, alpha: f64) -> &'static str {
        if p_adjusted < alpha {
            "Rejected"
        } else {
            "Retained"
        }
    }
}

/// Holm step-down adjustment.
///
/// Sorts the p-values ascending, multiplies the i-th smallest (0-based) by
/// `m − i`, enforces monotonicity with a running maximum, clamps at 1.0,
/// and maps the adjusted values back to their original positions.
pub fn holm_adjust(p_values: &[f64]) -> Vec<f64> {
    let m = p_values.len();
    if m == 0 {
        return Vec::new();
    }

    let mut order: Vec<usize> = (0..m).collect();
    order.sort_by(|&a, &b| p_values[a].total_cmp(&p_values[b]));

    let mut adjusted = vec![0.0; m];
    let mut running_max = 0.0f64;
    for (rank, &idx) in order.iter().enumerate() {
        let scaled = p_values[idx] * (m - rank) as f64;
        running_max = running_max.max(scaled);
        adjusted[idx] = running_max.min(1.0);
    }
    adjusted
}

/// Apply the Holm correction in place across a list of comparisons.
pub fn apply_holm(comparisons: &mut [PairComparison]) {
    let p_values: Vec<f64> = comparisons.iter().map(|c| c.p_unadjusted).collect();
    let adjusted = holm_adjust(&p_values);
    for (comparison, p_holm) in comparisons.iter_mut().zip(adjusted) {
        comparison.p_holm = p_holm;
    }
}
