//! Analysis orchestrators.
//!
//! Three pure pipelines compose the statistical engines into the public
//! analysis results:
//!
//! 1. **All-vs-all** ([`all`]): Friedman ranking, pairwise z-values, Holm and
//!    Nemenyi corrections in parallel, two CD plot payloads
//! 2. **Control-vs-rest** ([`control`]): signed control-first z-values, Holm
//!    only, rows sorted by adjusted p-value, one CD plot payload
//! 3. **Pairwise** ([`pairwise`]): Wilcoxon signed-rank on two raw series,
//!    no ranking step and no CD plot
//!
//! Each call is synchronous, deterministic, and allocates its own
//! intermediates; nothing is shared across invocations except the bundled
//! read-only critical-value table.

mod all;
mod control;
mod pairwise;

pub use all::run_all_analysis;
pub use control::run_control_analysis;
pub use pairwise::{run_pairwise_analysis, run_pairwise_analysis_with_table};

use crate::format::{significant_5, stat_or_scientific};
use crate::result::FriedmanDescription;
use crate::stats::ranking::{f_critical_value, iman_davenport_stat};
use crate::stats::FriedmanResult;

/// Description fields shared by the Friedman-based analyses.
///
/// Mode-specific fields (per-method significant lists, control algorithm)
/// start empty/None and are filled in by the orchestrator.
pub(crate) fn friedman_description(
    friedman: &FriedmanResult,
    post_hoc: &str,
    alpha: f64,
    k: usize,
    n: usize,
) -> FriedmanDescription {
    let significant = friedman.p_value < alpha;
    FriedmanDescription {
        test_applied: "Standard Friedman Test".to_string(),
        post_hoc: post_hoc.to_string(),
        friedman_stat: stat_or_scientific(friedman.statistic),
        p_value: stat_or_scientific(friedman.p_value),
        significant,
        significance_test: format!("p-value {} alpha", if significant { "<" } else { ">" }),
        alpha: significant_5(alpha),
        significant_algorithms: Vec::new(),
        significant_algorithms_nemenyi: None,
        significant_algorithms_holm: None,
        algorithm_cardinality: k,
        benchmark_cardinality: n,
        iman_davenport_critical: stat_or_scientific(f_critical_value(k, n, alpha)),
        iman_davenport_stat: stat_or_scientific(iman_davenport_stat(friedman.statistic, k, n)),
        control_algorithm: None,
    }
}
