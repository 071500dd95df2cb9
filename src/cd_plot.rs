//! Critical-difference plot data assembly and the renderer seam.
//!
//! The core's responsibility ends at building the renderer's input: the
//! (algorithm, mean rank) pairs and a symmetric significance matrix with a
//! unit diagonal. Pixel drawing belongs to an external collaborator behind
//! the [`CdPlotRenderer`] trait, which returns the encoded-image payload
//! the result types carry verbatim.

use crate::error::AnalysisError;
use crate::stats::PairComparison;
use crate::types::PValueMatrix;
use serde::{Deserialize, Serialize};

/// Input contract for the critical-difference renderer.
#[derive(Debug, Clone)]
pub struct CdPlotInput {
    /// Algorithm names paired with their mean ranks, in display order.
    pub ranks: Vec<(String, f64)>,
    /// Symmetric k×k adjusted p-value matrix, diagonal = 1, indexed in the
    /// same order as `ranks`.
    pub significance: PValueMatrix,
    /// Post-hoc method name ("Holm" or "Nemenyi"), used for the title.
    pub method: String,
}

/// Rendered plot payload as consumed by frontends.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CdPlotData {
    /// Base64-encoded image bytes.
    pub image_data: String,
    /// Plot title, `"Critical Difference Plot: <method>"`.
    pub title: String,
}

/// External rendering collaborator.
///
/// Implementations draw the critical-difference diagram from ranks and the
/// significance matrix and return it encoded; the core treats them as a
/// black box.
pub trait CdPlotRenderer {
    /// Render one diagram.
    fn render(&self, input: &CdPlotInput) -> Result<CdPlotData, AnalysisError>;
}

/// Renderer for hosts without a plotting backend.
///
/// Produces an empty image with the standard title, so result payloads stay
/// structurally complete and deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRenderer;

impl CdPlotRenderer for PlaceholderRenderer {
    fn render(&self, input: &CdPlotInput) -> Result<CdPlotData, AnalysisError> {
        Ok(CdPlotData {
            image_data: String::new(),
            title: format!("Critical Difference Plot: {}", input.method),
        })
    }
}

/// Build a symmetric significance matrix from pair records.
///
/// Starts from all-ones (diagonal included), then mirrors each pair's
/// adjusted p-value into `[i][j]` and `[j][i]`. The selector picks which
/// correction's value to use.
pub fn significance_matrix<F>(comparisons: &[PairComparison], k: usize, select: F) -> PValueMatrix
where
    F: Fn(&PairComparison) -> f64,
{
    let mut matrix = PValueMatrix::from_element(k, k, 1.0);
    for comparison in comparisons {
        let p = select(comparison);
        matrix[(comparison.i, comparison.j)] = p;
        matrix[(comparison.j, comparison.i)] = p;
    }
    matrix
}

/// Build the control-mode significance matrix: the control algorithm sits
/// at index 0 and only control-vs-other cells carry adjusted p-values.
pub fn control_significance_matrix(adjusted_p: &[f64]) -> PValueMatrix {
    let k = adjusted_p.len() + 1;
    let mut matrix = PValueMatrix::from_element(k, k, 1.0);
    for (offset, &p) in adjusted_p.iter().enumerate() {
        let other = offset + 1;
        matrix[(0, other)] = p;
        matrix[(other, 0)] = p;
    }
    matrix
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(i: usize, j: usize, p_holm: f64, p_nemenyi: f64) -> PairComparison {
        PairComparison {
            i,
            j,
            label: format!("{i} vs {j}"),
            z: 1.0,
            p_unadjusted: p_holm / 2.0,
            p_holm,
            p_nemenyi: Some(p_nemenyi),
        }
    }

    #[test]
    fn matrix_is_symmetric_with_unit_diagonal() {
        let comparisons = vec![pair(0, 1, 0.02, 0.04), pair(0, 2, 0.5, 0.6), pair(1, 2, 0.9, 1.0)];
        let matrix = significance_matrix(&comparisons, 3, |c| c.p_holm);
        for i in 0..3 {
            assert_eq!(matrix[(i, i)], 1.0);
            for j in 0..3 {
                assert_eq!(matrix[(i, j)], matrix[(j, i)]);
            }
        }
        assert_eq!(matrix[(0, 1)], 0.02);
        assert_eq!(matrix[(2, 1)], 0.9);
    }

    #[test]
    fn selector_picks_the_correction() {
        let comparisons = vec![pair(0, 1, 0.02, 0.04)];
        let holm = significance_matrix(&comparisons, 2, |c| c.p_holm);
        let nemenyi = significance_matrix(&comparisons, 2, |c| c.p_nemenyi.unwrap_or(1.0));
        assert_eq!(holm[(0, 1)], 0.02);
        assert_eq!(nemenyi[(0, 1)], 0.04);
    }

    #[test]
    fn control_matrix_fills_first_row_and_column_only() {
        let matrix = control_significance_matrix(&[0.01, 0.2]);
        assert_eq!(matrix.nrows(), 3);
        assert_eq!(matrix[(0, 1)], 0.01);
        assert_eq!(matrix[(1, 0)], 0.01);
        assert_eq!(matrix[(0, 2)], 0.2);
        assert_eq!(matrix[(1, 2)], 1.0);
        assert_eq!(matrix[(2, 2)], 1.0);
    }

    #[test]
    fn placeholder_renderer_titles_by_method() {
        let input = CdPlotInput {
            ranks: vec![("a".to_string(), 1.0)],
            significance: PValueMatrix::from_element(1, 1, 1.0),
            method: "Holm".to_string(),
        };
        let data = PlaceholderRenderer.render(&input).unwrap();
        assert_eq!(data.title, "Critical Difference Plot: Holm");
        assert!(data.image_data.is_empty());
    }
}
