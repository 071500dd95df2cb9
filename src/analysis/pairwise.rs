//! Pairwise Wilcoxon analysis pipeline.

use crate::error::AnalysisError;
use crate::format::stat_or_scientific;
use crate::matrix::AlgorithmSeries;
use crate::result::{CriticalValueRow, PairwiseAnalysisResult, PairwiseDescription, WilcoxonRow};
use crate::stats::{signed_rank_zsplit, CriticalValueTable};
use tracing::debug;

/// Run the pairwise analysis with the bundled critical-value table.
///
/// See [`run_pairwise_analysis_with_table`].
pub fn run_pairwise_analysis(
    algorithm_one: &AlgorithmSeries,
    algorithm_two: &AlgorithmSeries,
    alpha: f64,
) -> Result<PairwiseAnalysisResult, AnalysisError> {
    run_pairwise_analysis_with_table(
        algorithm_one,
        algorithm_two,
        alpha,
        CriticalValueTable::bundled()?,
    )
}

/// Run the pairwise Wilcoxon analysis on two raw series.
///
/// No ranking step is involved: the two series go straight into the
/// signed-rank test, and the exact critical-value table contributes an
/// independent per-alpha decision that may disagree with the asymptotic
/// p-value; both are reported.
///
/// # Errors
///
/// - [`AnalysisError::InvalidSelection`] for mismatched or empty series
///   (the "exactly two selected rows" boundary belongs to the host; the
///   shape of those two rows is checked here).
/// - [`AnalysisError::MissingCriticalValues`] when the table has no row
///   for this sample size.
/// - [`AnalysisError::Degenerate`] on zero rank variance.
pub fn run_pairwise_analysis_with_table(
    algorithm_one: &AlgorithmSeries,
    algorithm_two: &AlgorithmSeries,
    alpha: f64,
    table: &CriticalValueTable,
) -> Result<PairwiseAnalysisResult, AnalysisError> {
    let n = algorithm_one.len();
    debug!(
        algorithm_one = %algorithm_one.name,
        algorithm_two = %algorithm_two.name,
        n,
        alpha,
        "running pairwise analysis"
    );

    let outcome = signed_rank_zsplit(&algorithm_one.values, &algorithm_two.values, alpha)?;
    let decisions = table.decisions(outcome.t, n)?;

    let comparison = format!("{} vs {}", algorithm_one.name, algorithm_two.name);
    let wilcoxon_table = vec![WilcoxonRow {
        comparison: comparison.clone(),
        r_plus: format!("{}", outcome.r_plus),
        r_minus: format!("{}", outcome.r_minus),
        p_value: format!("{}", outcome.p_value),
    }];

    let critical_value_table = decisions
        .into_iter()
        .map(|decision| CriticalValueRow {
            alpha: decision.alpha,
            critical_value: decision.critical_value.to_string(),
            null_hypothesis: decision.outcome.to_string(),
        })
        .collect();

    let comparison_results = if outcome.significant {
        format!(
            "There is a significant difference between {} and {}.",
            algorithm_one.name, algorithm_two.name
        )
    } else {
        format!(
            "There is no significant difference between {} and {}.",
            algorithm_one.name, algorithm_two.name
        )
    };

    let description = PairwiseDescription {
        test_applied: "Wilcoxon Signed-ranks Test".to_string(),
        algorithm_one: algorithm_one.name.clone(),
        algorithm_two: algorithm_two.name.clone(),
        comparison_results,
        r_plus: format!("{}", outcome.r_plus),
        r_minus: format!("{}", outcome.r_minus),
        p_value: stat_or_scientific(outcome.p_value),
        significant: outcome.significant,
        alpha: format!("{alpha}"),
        t: format!("{}", outcome.t),
        benchmark_cardinality: n,
    };

    debug!(significant = outcome.significant, "pairwise analysis complete");

    Ok(PairwiseAnalysisResult {
        wilcoxon_table,
        critical_value_table,
        description,
    })
}
