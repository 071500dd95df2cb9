//! Control-vs-rest analysis pipeline.

use crate::cd_plot::{control_significance_matrix, CdPlotInput, CdPlotRenderer};
use crate::error::{AnalysisError, AnalysisKind};
use crate::format::{signed_or_scientific, stat_or_scientific};
use crate::matrix::ExperimentMatrix;
use crate::result::{ControlAnalysisResult, ControlPairRow};
use crate::stats::{
    control_z_values, friedman_test, holm_adjust, p_from_z, ranks_table, PairComparison,
};
use crate::types::OptimizationDirection;
use tracing::debug;

/// Run the control-vs-rest analysis: Friedman ranking, signed z-values of
/// the control algorithm against every other (control rank first, original
/// row order), Holm correction, rows sorted by ascending adjusted p-value,
/// and a single Holm CD plot payload with the control listed first.
///
/// # Errors
///
/// [`AnalysisError::InvalidSelection`] when `control_row` is out of range
/// (the "exactly one selected row" boundary); otherwise the same failures
/// as the all analysis.
pub fn run_control_analysis<R: CdPlotRenderer + ?Sized>(
    matrix: &ExperimentMatrix,
    control_row: usize,
    direction: OptimizationDirection,
    alpha: f64,
    renderer: &R,
) -> Result<ControlAnalysisResult, AnalysisError> {
    let k = matrix.k();
    let n = matrix.n();
    if control_row >= k {
        return Err(AnalysisError::InvalidSelection {
            analysis: AnalysisKind::Control,
            message: format!(
                "exactly one control row in 0..{k} must be selected, got index {control_row}"
            ),
        });
    }
    debug!(k, n, control_row, ?direction, alpha, "running control analysis");

    let friedman = friedman_test(matrix.values(), direction)?;
    let names = matrix.algorithms();
    let table = ranks_table(names, &friedman.mean_ranks);

    let control_name = names[control_row].clone();
    let others: Vec<usize> = (0..k).filter(|&i| i != control_row).collect();
    let other_ranks: Vec<f64> = others.iter().map(|&i| friedman.mean_ranks[i]).collect();

    // Signed, control-first z-values over the others in original order.
    let z_values = control_z_values(friedman.mean_ranks[control_row], &other_ranks, k, n);
    let p_unadjusted: Vec<f64> = z_values.iter().map(|&z| p_from_z(z)).collect();
    let p_adjusted = holm_adjust(&p_unadjusted);

    // Sort the display rows by ascending adjusted p; the CD matrix below
    // keeps the original (unsorted) order.
    let mut order: Vec<usize> = (0..others.len()).collect();
    order.sort_by(|&a, &b| p_adjusted[a].total_cmp(&p_adjusted[b]));

    let mut rows = Vec::with_capacity(others.len());
    let mut significant_algorithms = Vec::new();
    for &idx in &order {
        let label = format!("{control_name} vs {}", names[others[idx]]);
        let outcome = PairComparison::outcome(p_adjusted[idx], alpha);
        if outcome == "Rejected" {
            significant_algorithms.push(label.clone());
        }
        rows.push(ControlPairRow {
            pair: label,
            z_value: signed_or_scientific(z_values[idx]),
            p_unadjusted: stat_or_scientific(p_unadjusted[idx]),
            p_adjusted: stat_or_scientific(p_adjusted[idx]),
            null_hypothesis: outcome.to_string(),
        });
    }

    // CD ranks list the control first, then the others in original order.
    let mut ranks_for_cd = Vec::with_capacity(k);
    ranks_for_cd.push((control_name.clone(), friedman.mean_ranks[control_row]));
    for (&other, &rank) in others.iter().zip(&other_ranks) {
        ranks_for_cd.push((names[other].clone(), rank));
    }

    let holm_plot = renderer.render(&CdPlotInput {
        ranks: ranks_for_cd,
        significance: control_significance_matrix(&p_adjusted),
        method: "Holm".to_string(),
    })?;

    let mut description = super::friedman_description(&friedman, "Holm", alpha, k, n);
    description.significant_algorithms = significant_algorithms;
    description.control_algorithm = Some(control_name);

    debug!(
        comparisons = rows.len(),
        significant = description.significant_algorithms.len(),
        "control analysis complete"
    );

    Ok(ControlAnalysisResult {
        ranks_table: table,
        comparisons: rows,
        description,
        cd_plots: vec![holm_plot],
    })
}
