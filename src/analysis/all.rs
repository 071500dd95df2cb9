//! All-vs-all analysis pipeline.

use crate::cd_plot::{significance_matrix, CdPlotInput, CdPlotRenderer};
use crate::error::AnalysisError;
use crate::format::significant_5;
use crate::matrix::ExperimentMatrix;
use crate::result::{AllAnalysisResult, AllPairRow};
use crate::stats::{
    apply_holm, friedman_test, nemenyi_adjusted_p, pairwise_z_values, ranks_table, PairComparison,
};
use crate::types::OptimizationDirection;
use tracing::debug;

/// Run the all-vs-all analysis: Friedman ranking, every pairwise z-value,
/// Holm and Nemenyi corrections in parallel, and one CD plot payload per
/// correction (`[Holm, Nemenyi]`).
///
/// # Errors
///
/// Propagates ranking degeneracies ([`AnalysisError::Degenerate`]) and
/// renderer failures.
pub fn run_all_analysis<R: CdPlotRenderer + ?Sized>(
    matrix: &ExperimentMatrix,
    direction: OptimizationDirection,
    alpha: f64,
    renderer: &R,
) -> Result<AllAnalysisResult, AnalysisError> {
    let k = matrix.k();
    let n = matrix.n();
    debug!(k, n, ?direction, alpha, "running all-vs-all analysis");

    let friedman = friedman_test(matrix.values(), direction)?;
    let names = matrix.algorithms();
    let table = ranks_table(names, &friedman.mean_ranks);

    // Ordered pair records: z, unadjusted p, then both corrections.
    let mut comparisons: Vec<PairComparison> = pairwise_z_values(&friedman.mean_ranks, n)
        .into_iter()
        .map(|((i, j), z)| {
            PairComparison::from_z(i, j, format!("{} vs {}", names[i], names[j]), z)
        })
        .collect();
    apply_holm(&mut comparisons);

    let nemenyi = nemenyi_adjusted_p(matrix.values(), direction)?;
    for comparison in &mut comparisons {
        comparison.p_nemenyi = Some(nemenyi[(comparison.i, comparison.j)]);
    }

    let mut rows = Vec::with_capacity(comparisons.len());
    let mut significant_nemenyi = Vec::new();
    let mut significant_holm = Vec::new();
    for comparison in &comparisons {
        let p_nemenyi = comparison.p_nemenyi.unwrap_or(1.0);
        let nemenyi_outcome = PairComparison::outcome(p_nemenyi, alpha);
        if nemenyi_outcome == "Rejected" {
            significant_nemenyi.push(comparison.label.clone());
        }
        let holm_outcome = PairComparison::outcome(comparison.p_holm, alpha);
        if holm_outcome == "Rejected" {
            significant_holm.push(comparison.label.clone());
        }
        rows.push(AllPairRow {
            pair: comparison.label.clone(),
            z_value: significant_5(comparison.z),
            p_value: significant_5(comparison.p_unadjusted),
            apv_holm: significant_5(comparison.p_holm),
            apv_nemenyi: significant_5(p_nemenyi),
            holm_null_hypothesis: holm_outcome.to_string(),
            nemenyi_null_hypothesis: nemenyi_outcome.to_string(),
        });
    }

    let ranks_for_cd: Vec<(String, f64)> = names
        .iter()
        .cloned()
        .zip(friedman.mean_ranks.iter().copied())
        .collect();

    // Holm sits at index 0 in both Friedman-based analyses.
    let holm_plot = renderer.render(&CdPlotInput {
        ranks: ranks_for_cd.clone(),
        significance: significance_matrix(&comparisons, k, |c| c.p_holm),
        method: "Holm".to_string(),
    })?;
    let nemenyi_plot = renderer.render(&CdPlotInput {
        ranks: ranks_for_cd,
        significance: significance_matrix(&comparisons, k, |c| c.p_nemenyi.unwrap_or(1.0)),
        method: "Nemenyi".to_string(),
    })?;

    let mut description = super::friedman_description(&friedman, "Nemenyi", alpha, k, n);
    // Union of both methods' significant pairs; a pair significant under
    // both appears once per method.
    description.significant_algorithms = significant_nemenyi
        .iter()
        .chain(&significant_holm)
        .cloned()
        .collect();
    description.significant_algorithms_nemenyi = Some(significant_nemenyi);
    description.significant_algorithms_holm = Some(significant_holm);

    debug!(
        pairs = rows.len(),
        significant = description.significant_algorithms.len(),
        "all-vs-all analysis complete"
    );

    Ok(AllAnalysisResult {
        ranks_table: table,
        comparisons: rows,
        description,
        cd_plots: vec![holm_plot, nemenyi_plot],
    })
}
