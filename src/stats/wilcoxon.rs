//! Wilcoxon signed-rank test with zero-split tie handling and the exact
//! critical-value table.
//!
//! Pair differences are computed in exact decimal arithmetic and cross into
//! floating point exactly once, right before ranking; this keeps boundary
//! cases (differences that should be exactly zero) from being smeared by
//! binary cancellation.

use crate::error::AnalysisError;
use crate::stats::distributions::normal_sf;
use crate::stats::ranking::{rank_with_ties, tie_term};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::OnceLock;

/// Bundled critical-value table (two-sided, n = 5..=30).
const BUNDLED_TABLE: &str = include_str!("../../data/wilcoxon_t_distribution.csv");

/// Sentinel in the CSV for (n, alpha) cells with no tabulated value.
const NOT_APPLICABLE: &str = "x";

/// Signed-rank test outcome.
///
/// The reported rank sums follow the payload convention consumers rely on:
/// R⁺ is identified with the two-sided statistic T (the smaller of the two
/// signed rank sums) and R⁻ is the complement `n(n+1)/2 − T`, so
/// `r_plus + r_minus == n(n+1)/2` always holds.
#[derive(Debug, Clone)]
pub struct SignedRankOutcome {
    /// Test statistic T = min of the signed rank sums.
    pub t: f64,
    /// Reported R⁺, identified with T.
    pub r_plus: f64,
    /// Reported R⁻, the complementary sum `n(n+1)/2 − T`.
    pub r_minus: f64,
    /// Two-sided p-value from the normal approximation.
    pub p_value: f64,
    /// Whether `p_value < alpha`.
    pub significant: bool,
}

/// Run the Wilcoxon signed-rank test on two paired series.
///
/// Differences are taken in `Decimal`; observations with an exactly zero
/// difference are kept and their ranks split evenly between the positive
/// and negative rank sums (zero-split policy) rather than discarded. The
/// p-value uses the normal approximation with tie correction and no
/// continuity correction.
///
/// # Errors
///
/// - [`AnalysisError::InvalidSelection`] when the series lengths differ or
///   are zero.
/// - [`AnalysisError::Degenerate`] when the rank variance is zero (all
///   differences identical in magnitude and fully tied), which would make
///   the standardized statistic undefined.
pub fn signed_rank_zsplit(
    a: &[Decimal],
    b: &[Decimal],
    alpha: f64,
) -> Result<SignedRankOutcome, AnalysisError> {
    if a.len() != b.len() || a.is_empty() {
        return Err(AnalysisError::InvalidSelection {
            analysis: crate::error::AnalysisKind::Pairwise,
            message: format!(
                "paired series must have equal non-zero lengths, got {} and {}",
                a.len(),
                b.len()
            ),
        });
    }

    let n = a.len();
    let differences: Vec<Decimal> = a.iter().zip(b).map(|(x, y)| x - y).collect();

    // Single conversion boundary: Decimal -> f64 for the rank machinery.
    let diffs_f64: Vec<f64> = differences
        .iter()
        .map(|d| d.to_f64().unwrap_or(0.0))
        .collect();
    let abs_diffs: Vec<f64> = diffs_f64.iter().map(|d| d.abs()).collect();
    let ranks = rank_with_ties(&abs_diffs);

    let mut positive_sum = 0.0;
    let mut negative_sum = 0.0;
    for (difference, rank) in differences.iter().zip(&ranks) {
        if difference.is_zero() {
            positive_sum += 0.5 * rank;
            negative_sum += 0.5 * rank;
        } else if difference > &Decimal::ZERO {
            positive_sum += rank;
        } else {
            negative_sum += rank;
        }
    }

    let t = positive_sum.min(negative_sum);

    let nf = n as f64;
    let mean = nf * (nf + 1.0) / 4.0;
    let variance = (nf * (nf + 1.0) * (2.0 * nf + 1.0) - 0.5 * tie_term(&abs_diffs)) / 24.0;
    if variance <= 0.0 {
        return Err(AnalysisError::Degenerate(
            "Wilcoxon rank variance is zero; all differences are tied".to_string(),
        ));
    }

    let z = (t - mean) / variance.sqrt();
    let p_value = (2.0 * normal_sf(z.abs())).min(1.0);

    // Reported convention: R+ is identified with T, R- is the complement.
    Ok(SignedRankOutcome {
        t,
        r_plus: t,
        r_minus: nf * (nf + 1.0) / 2.0 - t,
        p_value,
        significant: p_value < alpha,
    })
}

/// Per-alpha decision from the exact critical-value table.
#[derive(Debug, Clone, PartialEq)]
pub struct CriticalDecision {
    /// Alpha level as it appears in the table header (e.g. `"0.05"`).
    pub alpha: String,
    /// Critical T value for this (n, alpha).
    pub critical_value: u32,
    /// `"Rejected"` when T ≤ critical value, else `"Retained"`.
    pub outcome: &'static str,
}

/// Static lookup table of exact Wilcoxon critical T values.
///
/// Rows are keyed by sample size n with one column per alpha level; cells
/// marked with the `x` sentinel have no tabulated value and are dropped
/// from lookups (never coerced to zero). The table is read-only and safe to
/// share across calls.
#[derive(Debug, Clone)]
pub struct CriticalValueTable {
    alphas: Vec<String>,
    rows: BTreeMap<usize, Vec<Option<u32>>>,
}

impl CriticalValueTable {
    /// The table bundled with the crate, parsed once and cached.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::CriticalValueTable`] if the compiled-in CSV fails to
    /// parse (a packaging defect); the parse error is preserved rather than
    /// masked behind per-lookup misses.
    pub fn bundled() -> Result<&'static CriticalValueTable, AnalysisError> {
        static TABLE: OnceLock<Result<CriticalValueTable, String>> = OnceLock::new();
        TABLE
            .get_or_init(|| {
                CriticalValueTable::from_csv_str(BUNDLED_TABLE).map_err(|e| match e {
                    AnalysisError::CriticalValueTable(message) => message,
                    other => other.to_string(),
                })
            })
            .as_ref()
            .map_err(|message| {
                AnalysisError::CriticalValueTable(format!("bundled table: {message}"))
            })
    }

    /// Parse a table from CSV text (`n,<alpha>,<alpha>,...` header).
    ///
    /// # Errors
    ///
    /// [`AnalysisError::CriticalValueTable`] on malformed headers, rows, or
    /// cells.
    pub fn from_csv_str(csv: &str) -> Result<Self, AnalysisError> {
        let mut lines = csv.lines().filter(|l| !l.trim().is_empty());
        let header = lines
            .next()
            .ok_or_else(|| AnalysisError::CriticalValueTable("empty table".to_string()))?;
        let alphas: Vec<String> = header
            .split(',')
            .skip(1)
            .map(|s| s.trim().to_string())
            .collect();
        if alphas.is_empty() {
            return Err(AnalysisError::CriticalValueTable(
                "header has no alpha columns".to_string(),
            ));
        }

        let mut rows = BTreeMap::new();
        for line in lines {
            let mut cells = line.split(',').map(str::trim);
            let n: usize = cells
                .next()
                .unwrap_or("")
                .parse()
                .map_err(|_| {
                    AnalysisError::CriticalValueTable(format!("bad sample-size cell in {line:?}"))
                })?;
            let values: Vec<Option<u32>> = cells
                .map(|cell| {
                    if cell == NOT_APPLICABLE {
                        Ok(None)
                    } else {
                        cell.parse::<u32>().map(Some).map_err(|_| {
                            AnalysisError::CriticalValueTable(format!(
                                "bad critical value {cell:?} for n={n}"
                            ))
                        })
                    }
                })
                .collect::<Result<_, _>>()?;
            if values.len() != alphas.len() {
                return Err(AnalysisError::CriticalValueTable(format!(
                    "row for n={n} has {} cells, expected {}",
                    values.len(),
                    alphas.len()
                )));
            }
            rows.insert(n, values);
        }
        Ok(Self { alphas, rows })
    }

    /// Load a table from a CSV file on disk.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::CriticalValueTable`] when the file is missing or
    /// unreadable, plus everything [`from_csv_str`] can return.
    ///
    /// [`from_csv_str`]: CriticalValueTable::from_csv_str
    pub fn from_csv_path(path: &Path) -> Result<Self, AnalysisError> {
        let csv = std::fs::read_to_string(path).map_err(|e| {
            AnalysisError::CriticalValueTable(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_csv_str(&csv)
    }

    /// Critical values for sample size `n`, with not-applicable cells
    /// dropped. Pairs are (alpha label, critical value) in column order.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::MissingCriticalValues`] when the table has no row
    /// for `n`.
    pub fn critical_values(&self, n: usize) -> Result<Vec<(String, u32)>, AnalysisError> {
        let row = self
            .rows
            .get(&n)
            .ok_or(AnalysisError::MissingCriticalValues { n })?;
        Ok(self
            .alphas
            .iter()
            .zip(row)
            .filter_map(|(alpha, value)| value.map(|v| (alpha.clone(), v)))
            .collect())
    }

    /// Per-alpha hypothesis decisions for an observed statistic `t` at
    /// sample size `n`: Rejected when `t ≤ critical value`.
    ///
    /// # Errors
    ///
    /// Same as [`critical_values`].
    ///
    /// [`critical_values`]: CriticalValueTable::critical_values
    pub fn decisions(&self, t: f64, n: usize) -> Result<Vec<CriticalDecision>, AnalysisError> {
        Ok(self
            .critical_values(n)?
            .into_iter()
            .map(|(alpha, critical_value)| CriticalDecision {
                alpha,
                critical_value,
                outcome: if t <= critical_value as f64 {
                    "Rejected"
                } else {
                    "Retained"
                },
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn series(values: &[Decimal]) -> Vec<Decimal> {
        values.to_vec()
    }

    #[test]
    fn rank_sums_are_complementary() {
        let a = series(&[dec!(5), dec!(2), dec!(6), dec!(8)]);
        let b = series(&[dec!(3), dec!(4), dec!(1), dec!(7)]);
        let outcome = signed_rank_zsplit(&a, &b, 0.05).unwrap();
        let n = 4.0;
        assert!((outcome.r_plus + outcome.r_minus - n * (n + 1.0) / 2.0).abs() < 1e-9);
        assert_eq!(outcome.t, outcome.r_plus.min(outcome.r_minus));
    }

    #[test]
    fn spec_scenario_differences_2_m2_5_1() {
        // Differences [2, -2, 5, 1]: |d| ranks are [2.5, 2.5, 4, 1], the
        // negative sum 2.5 is the smaller one, so T = R+ = 2.5.
        let a = series(&[dec!(5), dec!(2), dec!(6), dec!(8)]);
        let b = series(&[dec!(3), dec!(4), dec!(1), dec!(7)]);
        let outcome = signed_rank_zsplit(&a, &b, 0.05).unwrap();
        assert!((outcome.r_plus - 2.5).abs() < 1e-9);
        assert!((outcome.r_minus - 7.5).abs() < 1e-9);
        assert!(!outcome.significant);
        // Deterministic across runs
        let again = signed_rank_zsplit(&a, &b, 0.05).unwrap();
        assert_eq!(outcome.p_value, again.p_value);
    }

    #[test]
    fn reported_r_plus_is_identified_with_t() {
        // Positive differences dominate here (true positive rank sum 17),
        // yet the reported R+ stays the statistic T = 4 with R- the
        // complement, matching the payload convention.
        let a = series(&[dec!(5), dec!(2), dec!(6), dec!(8), dec!(4), dec!(9)]);
        let b = series(&[dec!(3), dec!(4), dec!(1), dec!(7), dec!(4), dec!(5)]);
        let outcome = signed_rank_zsplit(&a, &b, 0.05).unwrap();
        assert_eq!(outcome.r_plus, outcome.t);
        assert!((outcome.t - 4.0).abs() < 1e-9);
        assert!((outcome.r_minus - 17.0).abs() < 1e-9);
    }

    #[test]
    fn zero_differences_are_split_not_dropped() {
        let a = series(&[dec!(1), dec!(2), dec!(3), dec!(4)]);
        let b = series(&[dec!(1), dec!(1), dec!(1), dec!(1)]);
        // Differences [0, 1, 2, 3]; the zero's rank (1) splits 0.5/0.5, so
        // the smaller sum (and T) is 0.5 rather than the 0 a dropped zero
        // would give.
        let outcome = signed_rank_zsplit(&a, &b, 0.05).unwrap();
        assert!((outcome.t - 0.5).abs() < 1e-9);
        assert!((outcome.r_plus - 0.5).abs() < 1e-9);
        assert!((outcome.r_minus - 9.5).abs() < 1e-9);
    }

    #[test]
    fn exact_decimal_differences_cancel_to_zero() {
        // 0.1 + 0.2 - 0.3 is not zero in f64, but is in Decimal
        let a = series(&[dec!(0.3), dec!(1.5)]);
        let b = series(&[dec!(0.1) + dec!(0.2), dec!(1.0)]);
        let outcome = signed_rank_zsplit(&a, &b, 0.05).unwrap();
        // First difference is exactly zero -> its rank 1 splits, so the
        // smaller sum is 0.5 instead of the 0 an f64 residue would give.
        assert!((outcome.t - 0.5).abs() < 1e-9);
        assert!((outcome.r_minus - 2.5).abs() < 1e-9);
    }

    #[test]
    fn mismatched_lengths_are_a_selection_error() {
        let a = series(&[dec!(1), dec!(2)]);
        let b = series(&[dec!(1)]);
        assert!(matches!(
            signed_rank_zsplit(&a, &b, 0.05),
            Err(AnalysisError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn all_zero_differences_yield_p_one() {
        let a = series(&[dec!(1), dec!(2), dec!(3)]);
        // All |d| tied at zero: both rank sums split evenly, T sits at the
        // null mean, z = 0 and p = 1.
        let outcome = signed_rank_zsplit(&a, &a, 0.05).unwrap();
        assert!((outcome.p_value - 1.0).abs() < 1e-7);
        assert!(!outcome.significant);
    }

    #[test]
    fn bundled_table_parses_cleanly() {
        assert!(CriticalValueTable::bundled().is_ok());
    }

    #[test]
    fn bundled_table_has_expected_rows() {
        let table = CriticalValueTable::bundled().unwrap();
        let values = table.critical_values(10).unwrap();
        assert_eq!(
            values,
            vec![
                ("0.1".to_string(), 10),
                ("0.05".to_string(), 8),
                ("0.02".to_string(), 5),
                ("0.01".to_string(), 3),
            ]
        );
    }

    #[test]
    fn not_applicable_cells_are_dropped() {
        let table = CriticalValueTable::bundled().unwrap();
        let values = table.critical_values(5).unwrap();
        // n=5 only has a 0.1 column entry
        assert_eq!(values, vec![("0.1".to_string(), 0)]);
    }

    #[test]
    fn missing_row_is_a_structured_error() {
        let table = CriticalValueTable::bundled().unwrap();
        assert!(matches!(
            table.critical_values(4),
            Err(AnalysisError::MissingCriticalValues { n: 4 })
        ));
        assert!(matches!(
            table.critical_values(1000),
            Err(AnalysisError::MissingCriticalValues { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_structured_error() {
        let err = CriticalValueTable::from_csv_path(Path::new("/no/such/file.csv")).unwrap_err();
        assert!(matches!(err, AnalysisError::CriticalValueTable(_)));
    }

    #[test]
    fn decisions_reject_at_or_below_critical() {
        let table = CriticalValueTable::bundled().unwrap();
        let decisions = table.decisions(8.0, 10).unwrap();
        let at_05 = decisions.iter().find(|d| d.alpha == "0.05").unwrap();
        assert_eq!(at_05.outcome, "Rejected"); // T = critical = 8
        let at_01 = decisions.iter().find(|d| d.alpha == "0.01").unwrap();
        assert_eq!(at_01.outcome, "Retained"); // 8 > 3
    }

    #[test]
    fn malformed_csv_is_rejected() {
        assert!(CriticalValueTable::from_csv_str("").is_err());
        assert!(CriticalValueTable::from_csv_str("n,0.05\nfoo,1").is_err());
        assert!(CriticalValueTable::from_csv_str("n,0.05\n10,bad").is_err());
        assert!(CriticalValueTable::from_csv_str("n,0.05,0.01\n10,1").is_err());
    }
}
