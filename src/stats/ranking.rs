//! Ranking engine: tie-averaged ranks, mean ranks, and the Friedman test.
//!
//! Ranks are assigned per benchmark column across the k algorithms using
//! competition ranking with tie-averaging, so each column's ranks are a
//! permutation of 1..k up to tie averages and always sum to k(k+1)/2.

use crate::error::AnalysisError;
use crate::format::fixed_5_trimmed;
use crate::result::RankEntry;
use crate::stats::distributions::{chi_square_sf, f_ppf};
use crate::types::{OptimizationDirection, ValueMatrix};

/// Output of the Friedman ranking test.
#[derive(Debug, Clone)]
pub struct FriedmanResult {
    /// Mean rank per algorithm (row order of the input matrix).
    pub mean_ranks: Vec<f64>,
    /// Friedman chi-square statistic (tie-corrected).
    pub statistic: f64,
    /// Two-sided p-value from the chi-square distribution, df = k−1.
    pub p_value: f64,
}

/// Assign competition ranks with tie-averaging.
///
/// Equal values receive the average of the ranks they would jointly occupy,
/// so the returned ranks always sum to n(n+1)/2 for n input values.
pub fn rank_with_ties(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; n];
    let mut i = 0;
    while i < n {
        // Extend over the tie group [i, j)
        let mut j = i + 1;
        while j < n && values[order[j]] == values[order[i]] {
            j += 1;
        }
        // Average of ranks i+1 ..= j
        let avg = (i + j + 1) as f64 / 2.0;
        for &idx in &order[i..j] {
            ranks[idx] = avg;
        }
        i = j;
    }
    ranks
}

/// Rank every benchmark column of a direction-adjusted value block.
///
/// Returns a k×n matrix of ranks; column `j` holds the ranks of the k
/// algorithms on benchmark `j`.
pub fn column_ranks(values: &ValueMatrix, direction: OptimizationDirection) -> ValueMatrix {
    let (k, n) = values.shape();
    let mut ranks = ValueMatrix::zeros(k, n);
    for j in 0..n {
        let column: Vec<f64> = (0..k).map(|i| direction.value_key(values[(i, j)])).collect();
        let col_ranks = rank_with_ties(&column);
        for i in 0..k {
            ranks[(i, j)] = col_ranks[i];
        }
    }
    ranks
}

/// Run the Friedman test over a k×n value block.
///
/// Values are oriented by `direction` before ranking, per-column ranks are
/// averaged into mean ranks, and the chi-square statistic carries the
/// standard tie correction `c = 1 − Σ(t³−t) / (n(k³−k))`. When every block
/// is fully tied the correction degenerates to 0/0; the uncorrected
/// statistic is exactly 0 in that case and is reported as such with p = 1.
///
/// # Errors
///
/// [`AnalysisError::Degenerate`] when fewer than 3 algorithms or fewer than
/// 1 benchmark are present; the Friedman test is undefined there.
pub fn friedman_test(
    values: &ValueMatrix,
    direction: OptimizationDirection,
) -> Result<FriedmanResult, AnalysisError> {
    let (k, n) = values.shape();
    if k < 3 {
        return Err(AnalysisError::Degenerate(format!(
            "Friedman test requires at least 3 algorithms, got {k}"
        )));
    }
    if n == 0 {
        return Err(AnalysisError::Degenerate(
            "Friedman test requires at least 1 benchmark".to_string(),
        ));
    }

    let ranks = column_ranks(values, direction);

    let mean_ranks: Vec<f64> = (0..k)
        .map(|i| (0..n).map(|j| ranks[(i, j)]).sum::<f64>() / n as f64)
        .collect();

    // Sum of squared rank sums over algorithms
    let ssbn: f64 = (0..k)
        .map(|i| {
            let row_sum: f64 = (0..n).map(|j| ranks[(i, j)]).sum();
            row_sum * row_sum
        })
        .sum();

    let kf = k as f64;
    let nf = n as f64;
    let mut statistic = 12.0 * ssbn / (kf * nf * (kf + 1.0)) - 3.0 * nf * (kf + 1.0);

    // Tie correction over every column's tie groups
    let mut ties = 0.0;
    for j in 0..n {
        let column: Vec<f64> = (0..k).map(|i| ranks[(i, j)]).collect();
        ties += tie_term(&column);
    }
    let c = 1.0 - ties / (nf * (kf * kf * kf - kf));
    if c > 0.0 {
        statistic /= c;
    } else {
        // Every block fully tied: the uncorrected statistic is exactly 0.
        statistic = 0.0;
    }

    let p_value = chi_square_sf(statistic, kf - 1.0);

    Ok(FriedmanResult {
        mean_ranks,
        statistic,
        p_value,
    })
}

/// Σ(t³ − t) over the tie groups of a slice of values.
pub(crate) fn tie_term(ranks: &[f64]) -> f64 {
    let mut sorted = ranks.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mut total = 0.0;
    let mut i = 0;
    while i < sorted.len() {
        let mut j = i + 1;
        while j < sorted.len() && sorted[j] == sorted[i] {
            j += 1;
        }
        let t = (j - i) as f64;
        total += t * t * t - t;
        i = j;
    }
    total
}

/// Build the ranks table: algorithms sorted best-first with formatted mean
/// and ordinal ranks.
///
/// Mean ranks arrive already oriented (rank 1 = best under the active
/// direction), so ascending order lists the best algorithm first and
/// switching the direction inverts the ordinal order. The sort is stable,
/// so algorithms with equal mean ranks keep their original row order.
pub fn ranks_table(names: &[String], mean_ranks: &[f64]) -> Vec<RankEntry> {
    let mut order: Vec<usize> = (0..names.len()).collect();
    order.sort_by(|&a, &b| mean_ranks[a].total_cmp(&mean_ranks[b]));

    order
        .iter()
        .enumerate()
        .map(|(pos, &idx)| RankEntry {
            algorithm: names[idx].clone(),
            mean_rank: fixed_5_trimmed(mean_ranks[idx]),
            ordinal_rank: fixed_5_trimmed((pos + 1) as f64),
        })
        .collect()
}

/// Iman–Davenport extension of the Friedman statistic.
///
/// `F = ((n−1)·χ²) / (n(k−1) − χ²)`. A perfectly consistent ordering drives
/// the denominator to 0; the statistic is reported as infinity in that case
/// rather than failing the whole analysis (the formatted output shows
/// `inf`, matching how the value degrades everywhere else).
pub fn iman_davenport_stat(friedman_statistic: f64, k: usize, n: usize) -> f64 {
    let denom = n as f64 * (k as f64 - 1.0) - friedman_statistic;
    if denom <= 0.0 {
        return f64::INFINITY;
    }
    friedman_statistic * (n as f64 - 1.0) / denom
}

/// Critical value for the F distribution at significance `alpha` with
/// numerator df `dfn` and denominator df `dfd`.
pub fn f_critical_value(dfn: usize, dfd: usize, alpha: f64) -> f64 {
    f_ppf(1.0 - alpha, dfn as f64, dfd as f64)
}
