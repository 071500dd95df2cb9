//! Type aliases and common types.

use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

/// k×n numeric block (one row per algorithm, one column per benchmark).
pub type ValueMatrix = DMatrix<f64>;

/// k×k matrix of adjusted p-values (diagonal = 1, symmetric).
pub type PValueMatrix = DMatrix<f64>;

/// Direction in which raw benchmark values are considered "better".
///
/// The direction is consumed through [`OptimizationDirection::value_key`] at
/// ranking time and nowhere else; callers never branch on the variant
/// directly, which keeps the sign convention in one place. Downstream of the
/// ranking step every mean rank is already oriented so that rank 1 means
/// best, so ordinal ordering, z-values, and corrections are
/// direction-agnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizationDirection {
    /// Lower raw values are better (error rates, runtimes).
    Minimize,
    /// Higher raw values are better (accuracy, throughput).
    Maximize,
}

impl OptimizationDirection {
    /// Orientation key applied to raw values before ranking.
    ///
    /// Under `Maximize` values are negated so that rank 1 always means
    /// "best" in the raw-value direction; under `Minimize` values pass
    /// through unchanged.
    pub fn value_key(self, value: f64) -> f64 {
        match self {
            OptimizationDirection::Minimize => value,
            OptimizationDirection::Maximize => -value,
        }
    }
}
