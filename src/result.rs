//! Analysis result types and related structures.
//!
//! Everything here is a flat serde struct shaped for the consumers of the
//! original payloads: formatted strings stay strings (ranks, statistics,
//! p-values), booleans stay booleans, and mode-specific description fields
//! are optional so each analysis serializes only what it produces.

use crate::cd_plot::CdPlotData;
use serde::{Deserialize, Serialize};

/// One row of the ranks table, best algorithm first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RankEntry {
    /// Algorithm name.
    pub algorithm: String,
    /// Mean rank over all benchmarks, fixed-5 formatted and trimmed.
    pub mean_rank: String,
    /// Ordinal rank (1 = best under the active direction), trimmed.
    pub ordinal_rank: String,
}

/// One row of the all-vs-all comparison table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllPairRow {
    /// `"A vs B"` label.
    pub pair: String,
    /// |z| formatted with 5 significant digits.
    pub z_value: String,
    /// Unadjusted p-value, 5 significant digits.
    pub p_value: String,
    /// Holm-adjusted p-value, 5 significant digits.
    pub apv_holm: String,
    /// Nemenyi-adjusted p-value, 5 significant digits.
    pub apv_nemenyi: String,
    /// Holm null-hypothesis outcome ("Rejected"/"Retained").
    pub holm_null_hypothesis: String,
    /// Nemenyi null-hypothesis outcome.
    pub nemenyi_null_hypothesis: String,
}

/// One row of the control comparison table, sorted by adjusted p-value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlPairRow {
    /// `"control vs other"` label.
    pub pair: String,
    /// Signed z-value (control rank first).
    pub z_value: String,
    /// Unadjusted p-value.
    pub p_unadjusted: String,
    /// Holm-adjusted p-value.
    pub p_adjusted: String,
    /// Null-hypothesis outcome at the requested alpha.
    pub null_hypothesis: String,
}

/// The single data row of the Wilcoxon result table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WilcoxonRow {
    /// `"A vs B"` label.
    pub comparison: String,
    /// Reported R⁺, identified with the statistic T.
    pub r_plus: String,
    /// Reported R⁻, the complement `n(n+1)/2 − T`.
    pub r_minus: String,
    /// Two-sided p-value.
    pub p_value: String,
}

/// One row of the Wilcoxon critical-value table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalValueRow {
    /// Alpha level as tabulated.
    pub alpha: String,
    /// Exact critical T value.
    pub critical_value: String,
    /// `"Rejected"` when T ≤ critical value, else `"Retained"`.
    pub null_hypothesis: String,
}

/// Description block for the Friedman-based analyses (all and control).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FriedmanDescription {
    /// Name of the omnibus test.
    pub test_applied: String,
    /// Post-hoc method(s) applied.
    pub post_hoc: String,
    /// Friedman chi-square statistic, formatted.
    pub friedman_stat: String,
    /// Friedman p-value, formatted.
    pub p_value: String,
    /// Whether p < alpha.
    pub significant: bool,
    /// Human-readable comparison, `"p-value < alpha"` or `"p-value > alpha"`.
    pub significance_test: String,
    /// Alpha, 5 significant digits.
    pub alpha: String,
    /// Significant pairs. For the all analysis this is the concatenation of
    /// the Nemenyi and Holm lists; a pair significant under both appears
    /// twice (consumers display the per-method lists for deduplicated
    /// views).
    pub significant_algorithms: Vec<String>,
    /// Nemenyi-significant pairs (all analysis only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub significant_algorithms_nemenyi: Option<Vec<String>>,
    /// Holm-significant pairs (all analysis only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub significant_algorithms_holm: Option<Vec<String>>,
    /// Number of algorithms (k).
    pub algorithm_cardinality: usize,
    /// Number of benchmarks (n).
    pub benchmark_cardinality: usize,
    /// F critical value for the Iman–Davenport extension, formatted.
    pub iman_davenport_critical: String,
    /// Iman–Davenport statistic, formatted.
    pub iman_davenport_stat: String,
    /// Control algorithm name (control analysis only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub control_algorithm: Option<String>,
}

/// Description block for the pairwise Wilcoxon analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairwiseDescription {
    /// Name of the test.
    pub test_applied: String,
    /// First algorithm name.
    pub algorithm_one: String,
    /// Second algorithm name.
    pub algorithm_two: String,
    /// Sentence summarizing the comparison outcome.
    pub comparison_results: String,
    /// Reported R⁺ (identified with T).
    pub r_plus: String,
    /// Reported R⁻ (`n(n+1)/2 − T`).
    pub r_minus: String,
    /// Formatted p-value.
    pub p_value: String,
    /// Whether p < alpha.
    pub significant: bool,
    /// Alpha as requested.
    pub alpha: String,
    /// Test statistic T.
    pub t: String,
    /// Number of paired observations.
    pub benchmark_cardinality: usize,
}

/// Complete result of the all-vs-all analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllAnalysisResult {
    /// Ranks table, best algorithm first.
    pub ranks_table: Vec<RankEntry>,
    /// Pairwise comparison rows in (i < j) lexicographic pair order.
    pub comparisons: Vec<AllPairRow>,
    /// Summary description.
    pub description: FriedmanDescription,
    /// CD plot payloads: `[Holm, Nemenyi]`.
    pub cd_plots: Vec<CdPlotData>,
}

/// Complete result of the control-vs-rest analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlAnalysisResult {
    /// Ranks table, best algorithm first.
    pub ranks_table: Vec<RankEntry>,
    /// Control comparison rows sorted by ascending adjusted p-value.
    pub comparisons: Vec<ControlPairRow>,
    /// Summary description.
    pub description: FriedmanDescription,
    /// CD plot payloads: `[Holm]`.
    pub cd_plots: Vec<CdPlotData>,
}

/// Complete result of the pairwise Wilcoxon analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairwiseAnalysisResult {
    /// The Wilcoxon result row.
    pub wilcoxon_table: Vec<WilcoxonRow>,
    /// Exact critical values with per-alpha decisions.
    pub critical_value_table: Vec<CriticalValueRow>,
    /// Summary description.
    pub description: PairwiseDescription,
}
