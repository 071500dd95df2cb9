//! Statistical engines for algorithm comparison.
//!
//! This module provides the core statistical infrastructure:
//! - Tie-averaged ranking and the Friedman test
//! - Standardized rank-difference z-values (all-pairs and control modes)
//! - Holm step-down correction over ordered pair records
//! - The Nemenyi post-hoc test on the per-block rank matrix
//! - The Wilcoxon signed-rank test with exact critical-value lookup
//! - The scalar distribution functions backing all of the above

pub mod correction;
pub mod distributions;
pub mod nemenyi;
pub mod ranking;
pub mod wilcoxon;
pub mod z_values;

pub use correction::{apply_holm, holm_adjust, PairComparison};
pub use nemenyi::nemenyi_adjusted_p;
pub use ranking::{
    column_ranks, f_critical_value, friedman_test, iman_davenport_stat, rank_with_ties,
    ranks_table, FriedmanResult,
};
pub use wilcoxon::{signed_rank_zsplit, CriticalDecision, CriticalValueTable, SignedRankOutcome};
pub use z_values::{control_z_values, p_from_z, pairwise_z_values, z_value};
