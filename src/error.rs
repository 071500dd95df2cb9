//! Error taxonomy for analysis failures.
//!
//! Every failure in the crate is a returned [`AnalysisError`]; nothing here
//! panics or terminates the hosting process. Selection and validation errors
//! are user-correctable (a host typically maps them to HTTP 400), the rest
//! indicate missing data or numeric degeneracy (HTTP 500 territory).

use thiserror::Error;

/// Which analysis pipeline raised a selection error.
///
/// The all-vs-all analysis has no row selection to get wrong, so only the
/// two selecting pipelines appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    /// Control-vs-rest comparison.
    Control,
    /// Two-algorithm Wilcoxon comparison.
    Pairwise,
}

impl std::fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisKind::Control => write!(f, "control"),
            AnalysisKind::Pairwise => write!(f, "pairwise"),
        }
    }
}

/// Failure reasons from the statistical comparison engine.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Wrong row selection for the requested analysis (e.g. control index
    /// out of range, mismatched pairwise series lengths).
    #[error("invalid selection for {analysis} analysis: {message}")]
    InvalidSelection {
        /// Pipeline that rejected the selection.
        analysis: AnalysisKind,
        /// What was wrong with it.
        message: String,
    },

    /// A matrix cell failed numeric parsing. Coordinates are in the original
    /// matrix including the header row/column.
    #[error("cell [{row}][{col}] must be numeric, got {value:?}")]
    Validation {
        /// Row index in the full matrix.
        row: usize,
        /// Column index in the full matrix.
        col: usize,
        /// Offending cell content.
        value: String,
    },

    /// The matrix is not a usable rectangular grid.
    #[error("malformed experiment matrix: {0}")]
    Shape(String),

    /// The critical-value table has no row for this sample size.
    #[error("no critical values available for n={n}")]
    MissingCriticalValues {
        /// Number of paired observations.
        n: usize,
    },

    /// The critical-value table file could not be read or parsed.
    #[error("critical-value table error: {0}")]
    CriticalValueTable(String),

    /// A statistic could not be computed (zero variance, empty block, ...).
    #[error("degenerate input: {0}")]
    Degenerate(String),

    /// The rendering collaborator failed to produce a CD plot payload.
    #[error("critical-difference renderer error: {0}")]
    Renderer(String),
}

impl AnalysisError {
    /// Whether the error is user-correctable input (a host would answer 400).
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::InvalidSelection { .. }
                | AnalysisError::Validation { .. }
                | AnalysisError::Shape(_)
        )
    }
}
