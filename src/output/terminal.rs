//! Terminal output formatting with colors.

use colored::Colorize;

use crate::result::{AllAnalysisResult, ControlAnalysisResult, PairwiseAnalysisResult};

/// Format an all-vs-all result for human-readable terminal output.
pub fn format_all_result(result: &AllAnalysisResult) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str("rankstat \u{2014} all-vs-all comparison\n");
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    output.push_str(&format!(
        "  {} ({} algorithms, {} benchmarks)\n",
        result.description.test_applied,
        result.description.algorithm_cardinality,
        result.description.benchmark_cardinality
    ));
    output.push_str(&format!(
        "  Friedman statistic: {}  p-value: {}\n",
        result.description.friedman_stat, result.description.p_value
    ));
    output.push_str(&format!("  {}\n\n", verdict_line(result.description.significant)));

    output.push_str("  Ranks (best first):\n");
    for entry in &result.ranks_table {
        output.push_str(&format!(
            "    {:>2}. {} [{}]\n",
            entry.ordinal_rank, entry.algorithm, entry.mean_rank
        ));
    }
    output.push('\n');

    output.push_str("  Pairwise comparisons (APV = adjusted p-value):\n");
    for row in &result.comparisons {
        output.push_str(&format!(
            "    {}  z={}  p={}  holm={} ({})  nemenyi={} ({})\n",
            row.pair,
            row.z_value,
            row.p_value,
            row.apv_holm,
            outcome_colored(&row.holm_null_hypothesis),
            row.apv_nemenyi,
            outcome_colored(&row.nemenyi_null_hypothesis),
        ));
    }

    output.push('\n');
    output.push_str(&sep);
    output.push('\n');
    output
}

/// Format a control-vs-rest result for terminal output.
pub fn format_control_result(result: &ControlAnalysisResult) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    let control = result
        .description
        .control_algorithm
        .as_deref()
        .unwrap_or("?");
    output.push_str(&format!("rankstat \u{2014} control comparison ({control})\n"));
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    output.push_str(&format!(
        "  Friedman statistic: {}  p-value: {}\n",
        result.description.friedman_stat, result.description.p_value
    ));
    output.push_str(&format!("  {}\n\n", verdict_line(result.description.significant)));

    output.push_str("  Comparisons (sorted by adjusted p-value):\n");
    for row in &result.comparisons {
        output.push_str(&format!(
            "    {}  z={}  p={}  adjusted={} ({})\n",
            row.pair,
            row.z_value,
            row.p_unadjusted,
            row.p_adjusted,
            outcome_colored(&row.null_hypothesis),
        ));
    }

    output.push('\n');
    output.push_str(&sep);
    output.push('\n');
    output
}

/// Format a pairwise Wilcoxon result for terminal output.
pub fn format_pairwise_result(result: &PairwiseAnalysisResult) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);

    output.push_str("rankstat \u{2014} pairwise Wilcoxon comparison\n");
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    output.push_str(&format!("  {}\n", result.description.test_applied));
    if let Some(row) = result.wilcoxon_table.first() {
        output.push_str(&format!(
            "  {}  R\u{207A}={}  R\u{207B}={}  p={}\n",
            row.comparison, row.r_plus, row.r_minus, row.p_value
        ));
    }
    output.push_str(&format!("  {}\n\n", result.description.comparison_results));

    output.push_str("  Exact critical values:\n");
    for row in &result.critical_value_table {
        output.push_str(&format!(
            "    alpha={}  T\u{2264}{}  {}\n",
            row.alpha,
            row.critical_value,
            outcome_colored(&row.null_hypothesis),
        ));
    }

    output.push('\n');
    output.push_str(&sep);
    output.push('\n');
    output
}

fn verdict_line(significant: bool) -> String {
    if significant {
        "\u{2713} Significant differences detected"
            .green()
            .bold()
            .to_string()
    } else {
        "No significant differences detected".yellow().to_string()
    }
}

fn outcome_colored(outcome: &str) -> String {
    if outcome == "Rejected" {
        outcome.red().to_string()
    } else {
        outcome.normal().to_string()
    }
}
