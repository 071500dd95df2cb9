//! # rankstat
//!
//! Statistically compare the performance of multiple algorithms across
//! multiple benchmark problems using nonparametric hypothesis tests.
//!
//! The crate provides three analysis pipelines over an experiment matrix
//! (rows = algorithms, columns = benchmarks):
//! - **All-vs-all**: Friedman ranking, pairwise z-values, Holm and Nemenyi
//!   corrections, critical-difference plot data for both
//! - **Control-vs-rest**: signed z-values against a designated control
//!   algorithm with Holm correction
//! - **Pairwise**: Wilcoxon signed-rank test on two raw series with exact
//!   critical-value lookup
//!
//! ## Quick Start
//!
//! ```
//! use rankstat::{
//!     run_all_analysis, ExperimentMatrix, OptimizationDirection, PlaceholderRenderer,
//! };
//!
//! let cells: Vec<Vec<String>> = vec![
//!     vec!["", "b1", "b2", "b3"],
//!     vec!["alg-a", "0.10", "0.20", "0.15"],
//!     vec!["alg-b", "0.30", "0.25", "0.35"],
//!     vec!["alg-c", "0.50", "0.45", "0.55"],
//! ]
//! .into_iter()
//! .map(|row| row.into_iter().map(String::from).collect())
//! .collect();
//!
//! let matrix = ExperimentMatrix::from_cells(&cells).unwrap();
//! let result = run_all_analysis(
//!     &matrix,
//!     OptimizationDirection::Minimize,
//!     0.05,
//!     &PlaceholderRenderer,
//! )
//! .unwrap();
//!
//! assert_eq!(result.ranks_table[0].algorithm, "alg-a");
//! ```
//!
//! ## Design notes
//!
//! Every analysis call is synchronous, deterministic, and side-effect-free
//! over its inputs; fresh intermediates are allocated per call, so calls may
//! run concurrently from a hosting process without coordination. The only
//! shared state is the bundled read-only Wilcoxon critical-value table.
//!
//! The crate emits `tracing` events but never installs a subscriber; hosts
//! initialize logging once at startup.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
mod error;
mod format;
mod matrix;
mod result;
mod types;

// Functional modules
pub mod analysis;
pub mod cd_plot;
pub mod output;
pub mod stats;

// Re-exports for public API
pub use analysis::{
    run_all_analysis, run_control_analysis, run_pairwise_analysis,
    run_pairwise_analysis_with_table,
};
pub use cd_plot::{CdPlotData, CdPlotInput, CdPlotRenderer, PlaceholderRenderer};
pub use error::{AnalysisError, AnalysisKind};
pub use matrix::{AlgorithmSeries, ExperimentMatrix};
pub use result::{
    AllAnalysisResult, AllPairRow, ControlAnalysisResult, ControlPairRow, CriticalValueRow,
    FriedmanDescription, PairwiseAnalysisResult, PairwiseDescription, RankEntry, WilcoxonRow,
};
pub use stats::{CriticalValueTable, FriedmanResult, SignedRankOutcome};
pub use types::{OptimizationDirection, PValueMatrix, ValueMatrix};
