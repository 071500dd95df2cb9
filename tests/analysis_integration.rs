//! End-to-end tests for the three analysis pipelines.

use std::cell::RefCell;

use rankstat::{
    run_all_analysis, run_control_analysis, run_pairwise_analysis, AlgorithmSeries, AnalysisError,
    CdPlotData, CdPlotInput, CdPlotRenderer, ExperimentMatrix, OptimizationDirection,
    PlaceholderRenderer,
};
use rust_decimal_macros::dec;

/// Renderer that records every input it was handed.
#[derive(Default)]
struct CapturingRenderer {
    inputs: RefCell<Vec<CdPlotInput>>,
}

impl CdPlotRenderer for CapturingRenderer {
    fn render(&self, input: &CdPlotInput) -> Result<CdPlotData, AnalysisError> {
        self.inputs.borrow_mut().push(input.clone());
        Ok(CdPlotData {
            image_data: "ZmFrZQ==".to_string(),
            title: format!("Critical Difference Plot: {}", input.method),
        })
    }
}

fn matrix_from(rows: &[&[&str]]) -> ExperimentMatrix {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    ExperimentMatrix::from_cells(&cells).unwrap()
}

/// Three identical algorithms over four benchmarks.
fn identical_matrix() -> ExperimentMatrix {
    matrix_from(&[
        &["", "b1", "b2", "b3", "b4"],
        &["a", "1", "2", "3", "4"],
        &["b", "1", "2", "3", "4"],
        &["c", "1", "2", "3", "4"],
    ])
}

/// Three algorithms perfectly ordered on every benchmark (a best).
fn ordered_matrix(n: usize) -> ExperimentMatrix {
    let header: Vec<String> = std::iter::once(String::new())
        .chain((0..n).map(|j| format!("b{j}")))
        .collect();
    let mut cells = vec![header];
    for (name, value) in [("a", "1"), ("b", "2"), ("c", "3")] {
        let mut row = vec![name.to_string()];
        row.extend(std::iter::repeat(value.to_string()).take(n));
        cells.push(row);
    }
    ExperimentMatrix::from_cells(&cells).unwrap()
}

#[test]
fn identical_algorithms_round_trip() {
    let result = run_all_analysis(
        &identical_matrix(),
        OptimizationDirection::Minimize,
        0.05,
        &PlaceholderRenderer,
    )
    .unwrap();

    for entry in &result.ranks_table {
        assert_eq!(entry.mean_rank, "2");
    }
    assert_eq!(result.description.friedman_stat, "0.00000e+00");
    assert_eq!(result.description.p_value, "1.00000");
    assert!(!result.description.significant);
    assert_eq!(result.description.significance_test, "p-value > alpha");
    assert!(result.description.significant_algorithms.is_empty());
}

#[test]
fn direction_switch_inverts_ordinal_ranks() {
    let matrix = ordered_matrix(4);
    let min = run_all_analysis(
        &matrix,
        OptimizationDirection::Minimize,
        0.05,
        &PlaceholderRenderer,
    )
    .unwrap();
    let max = run_all_analysis(
        &matrix,
        OptimizationDirection::Maximize,
        0.05,
        &PlaceholderRenderer,
    )
    .unwrap();

    let min_order: Vec<&str> = min.ranks_table.iter().map(|e| e.algorithm.as_str()).collect();
    let max_order: Vec<&str> = max.ranks_table.iter().map(|e| e.algorithm.as_str()).collect();
    assert_eq!(min_order, vec!["a", "b", "c"]);
    assert_eq!(max_order, vec!["c", "b", "a"]);
    // Rank 1 under Minimize becomes rank k under Maximize
    assert_eq!(min.ranks_table[0].ordinal_rank, "1");
    let a_under_max = max.ranks_table.iter().find(|e| e.algorithm == "a").unwrap();
    assert_eq!(a_under_max.ordinal_rank, "3");
}

#[test]
fn all_analysis_pair_order_and_holm_dominance() {
    let matrix = matrix_from(&[
        &["", "b1", "b2", "b3", "b4", "b5"],
        &["a", "1", "2", "1", "3", "2"],
        &["b", "2", "1", "3", "1", "3"],
        &["c", "3", "3", "2", "2", "1"],
        &["d", "4", "4", "4", "4", "4"],
    ]);
    let result = run_all_analysis(
        &matrix,
        OptimizationDirection::Minimize,
        0.05,
        &PlaceholderRenderer,
    )
    .unwrap();

    let pairs: Vec<&str> = result.comparisons.iter().map(|r| r.pair.as_str()).collect();
    assert_eq!(
        pairs,
        vec!["a vs b", "a vs c", "a vs d", "b vs c", "b vs d", "c vs d"]
    );
    for row in &result.comparisons {
        let p: f64 = row.p_value.parse().unwrap();
        let holm: f64 = row.apv_holm.parse().unwrap();
        assert!(holm >= p - 1e-9, "{}: {holm} < {p}", row.pair);
        assert!(holm <= 1.0);
    }
}

#[test]
fn all_analysis_significance_matrices_are_symmetric() {
    let renderer = CapturingRenderer::default();
    let matrix = ordered_matrix(12);
    let result = run_all_analysis(
        &matrix,
        OptimizationDirection::Minimize,
        0.05,
        &renderer,
    )
    .unwrap();

    assert_eq!(result.cd_plots.len(), 2);
    assert_eq!(result.cd_plots[0].title, "Critical Difference Plot: Holm");
    assert_eq!(result.cd_plots[1].title, "Critical Difference Plot: Nemenyi");

    let inputs = renderer.inputs.borrow();
    assert_eq!(inputs.len(), 2);
    for input in inputs.iter() {
        let m = &input.significance;
        let k = m.nrows();
        assert_eq!(k, 3);
        for i in 0..k {
            assert_eq!(m[(i, i)], 1.0);
            for j in 0..k {
                assert_eq!(m[(i, j)], m[(j, i)]);
            }
        }
    }
}

#[test]
fn all_analysis_union_keeps_duplicates() {
    // Perfect ordering over 12 benchmarks: every pair is significant under
    // both corrections, so the union has one entry per pair per method.
    let result = run_all_analysis(
        &ordered_matrix(12),
        OptimizationDirection::Minimize,
        0.05,
        &PlaceholderRenderer,
    )
    .unwrap();

    let nemenyi = result
        .description
        .significant_algorithms_nemenyi
        .as_ref()
        .unwrap();
    let holm = result
        .description
        .significant_algorithms_holm
        .as_ref()
        .unwrap();
    assert_eq!(nemenyi.len(), 3);
    assert_eq!(holm.len(), 3);
    assert_eq!(
        result.description.significant_algorithms.len(),
        nemenyi.len() + holm.len()
    );
    assert!(result.description.significant_algorithms.contains(&"a vs c".to_string()));
}

#[test]
fn control_analysis_rejects_out_of_range_row() {
    let err = run_control_analysis(
        &identical_matrix(),
        7,
        OptimizationDirection::Minimize,
        0.05,
        &PlaceholderRenderer,
    )
    .unwrap_err();
    assert!(matches!(err, AnalysisError::InvalidSelection { .. }));
    assert!(err.is_user_error());
}

#[test]
fn control_analysis_sorts_by_adjusted_p_and_keeps_sign() {
    let matrix = matrix_from(&[
        &["", "b1", "b2", "b3", "b4", "b5", "b6"],
        &["base", "3", "3", "3", "3", "3", "3"],
        &["fast", "1", "1", "1", "1", "1", "2"],
        &["slow", "4", "4", "4", "4", "4", "4"],
        &["mid", "2", "2", "2", "2", "2", "1"],
    ]);
    let renderer = CapturingRenderer::default();
    let result = run_control_analysis(
        &matrix,
        0,
        OptimizationDirection::Minimize,
        0.05,
        &renderer,
    )
    .unwrap();

    assert_eq!(result.description.control_algorithm.as_deref(), Some("base"));
    assert_eq!(result.description.post_hoc, "Holm");

    // Rows sorted by ascending adjusted p-value
    let adjusted: Vec<f64> = result
        .comparisons
        .iter()
        .map(|r| r.p_adjusted.parse().unwrap())
        .collect();
    assert!(adjusted.windows(2).all(|w| w[0] <= w[1]));

    // Signed z-values: control (rank 3) vs fast (rank ~1.2) is positive,
    // vs slow (rank 4) negative.
    let fast = result.comparisons.iter().find(|r| r.pair == "base vs fast").unwrap();
    let slow = result.comparisons.iter().find(|r| r.pair == "base vs slow").unwrap();
    assert!(fast.z_value.parse::<f64>().unwrap() > 0.0);
    assert!(slow.z_value.parse::<f64>().unwrap() < 0.0);

    // One Holm CD payload, control listed first
    assert_eq!(result.cd_plots.len(), 1);
    let inputs = renderer.inputs.borrow();
    assert_eq!(inputs[0].ranks[0].0, "base");
    assert_eq!(inputs[0].significance.nrows(), 4);
}

#[test]
fn pairwise_analysis_reports_both_decision_sources() {
    let a = AlgorithmSeries {
        name: "a".to_string(),
        values: vec![dec!(5), dec!(2), dec!(6), dec!(8), dec!(4), dec!(9)],
    };
    let b = AlgorithmSeries {
        name: "b".to_string(),
        values: vec![dec!(3), dec!(4), dec!(1), dec!(7), dec!(4), dec!(5)],
    };
    let result = run_pairwise_analysis(&a, &b, 0.05).unwrap();

    // R+ + R- = n(n+1)/2 = 21, with R+ identified with T
    let r_plus: f64 = result.description.r_plus.parse().unwrap();
    let r_minus: f64 = result.description.r_minus.parse().unwrap();
    assert!((r_plus + r_minus - 21.0).abs() < 1e-9);
    assert_eq!(result.description.r_plus, result.description.t);
    assert_eq!(result.description.r_plus, "4");
    assert_eq!(result.description.r_minus, "17");

    assert_eq!(result.wilcoxon_table.len(), 1);
    assert_eq!(result.wilcoxon_table[0].comparison, "a vs b");

    // n=6 has entries for alpha 0.1 and 0.05 only
    let alphas: Vec<&str> = result
        .critical_value_table
        .iter()
        .map(|r| r.alpha.as_str())
        .collect();
    assert_eq!(alphas, vec!["0.1", "0.05"]);
    for row in &result.critical_value_table {
        assert!(row.null_hypothesis == "Rejected" || row.null_hypothesis == "Retained");
    }

    // Deterministic across runs
    let again = run_pairwise_analysis(&a, &b, 0.05).unwrap();
    assert_eq!(
        result.wilcoxon_table[0].p_value,
        again.wilcoxon_table[0].p_value
    );
}

#[test]
fn matrix_rows_feed_the_pairwise_analysis() {
    let matrix = matrix_from(&[
        &["", "b1", "b2", "b3", "b4", "b5", "b6"],
        &["a", "5", "2", "6", "8", "4", "9"],
        &["b", "3", "4", "1", "7", "4", "5"],
    ]);
    let a = matrix.series(0).unwrap();
    let b = matrix.series(1).unwrap();
    assert_eq!(a.name, "a");
    assert_eq!(b.len(), 6);

    let result = run_pairwise_analysis(&a, &b, 0.05).unwrap();
    assert_eq!(result.wilcoxon_table[0].comparison, "a vs b");
    assert_eq!(result.description.r_plus, result.description.t);
}

#[test]
fn pairwise_analysis_without_table_row_fails_diagnosably() {
    let a = AlgorithmSeries {
        name: "a".to_string(),
        values: vec![dec!(5), dec!(2), dec!(6), dec!(8)],
    };
    let b = AlgorithmSeries {
        name: "b".to_string(),
        values: vec![dec!(3), dec!(4), dec!(1), dec!(7)],
    };
    // n=4 is below the tabulated range
    let err = run_pairwise_analysis(&a, &b, 0.05).unwrap_err();
    assert!(matches!(err, AnalysisError::MissingCriticalValues { n: 4 }));
}

#[test]
fn pairwise_analysis_rejects_mismatched_lengths() {
    let a = AlgorithmSeries {
        name: "a".to_string(),
        values: vec![dec!(1), dec!(2)],
    };
    let b = AlgorithmSeries {
        name: "b".to_string(),
        values: vec![dec!(1)],
    };
    let err = run_pairwise_analysis(&a, &b, 0.05).unwrap_err();
    assert!(err.is_user_error());
}

#[test]
fn results_serialize_with_expected_keys() {
    let result = run_all_analysis(
        &ordered_matrix(6),
        OptimizationDirection::Minimize,
        0.05,
        &PlaceholderRenderer,
    )
    .unwrap();
    let json = rankstat::output::json::to_json(&result).unwrap();
    assert!(json.contains("\"ranks_table\""));
    assert!(json.contains("\"imageData\""));
    assert!(json.contains("\"significant_algorithms_nemenyi\""));
    assert!(json.contains("\"test_applied\":\"Standard Friedman Test\""));
}
