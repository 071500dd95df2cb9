//! Experiment matrix parsing and the pairwise series input type.
//!
//! The raw experiment grid arrives as strings: row 0 holds benchmark headers,
//! column 0 holds algorithm names, and every other cell is a numeric result.
//! Header-format validation (the cell regex rules) belongs to the validation
//! collaborator upstream; this module only strips the header row/column and
//! parses the numeric block, reporting the first offending cell with its
//! coordinates in the *full* grid so errors line up with what the user typed.

use crate::error::AnalysisError;
use crate::types::ValueMatrix;
use rust_decimal::Decimal;
use std::str::FromStr;

/// A parsed experiment: algorithm names, benchmark names, and the k×n
/// numeric block with headers already stripped.
///
/// The matrix is read-only after construction; every analysis call works on
/// its own intermediate copies.
#[derive(Debug, Clone)]
pub struct ExperimentMatrix {
    algorithms: Vec<String>,
    benchmarks: Vec<String>,
    values: ValueMatrix,
}

impl ExperimentMatrix {
    /// Parse a full grid (headers included) into an experiment matrix.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Shape`] for empty, ragged, or too-small
    /// grids (at least one algorithm row and one benchmark column are
    /// required), and [`AnalysisError::Validation`] with the offending
    /// full-grid coordinates when a data cell fails numeric parsing.
    pub fn from_cells(cells: &[Vec<String>]) -> Result<Self, AnalysisError> {
        if cells.len() < 2 {
            return Err(AnalysisError::Shape(format!(
                "expected at least 2 rows (header + data), got {}",
                cells.len()
            )));
        }
        let cols = cells[0].len();
        if cols < 2 {
            return Err(AnalysisError::Shape(format!(
                "expected at least 2 columns (header + data), got {cols}"
            )));
        }
        for (i, row) in cells.iter().enumerate() {
            if row.len() != cols {
                return Err(AnalysisError::Shape(format!(
                    "row {i} has {} cells, expected {cols}",
                    row.len()
                )));
            }
        }

        let benchmarks: Vec<String> = cells[0][1..].to_vec();
        let algorithms: Vec<String> = cells[1..].iter().map(|r| r[0].clone()).collect();

        let k = algorithms.len();
        let n = benchmarks.len();
        let mut values = ValueMatrix::zeros(k, n);
        for i in 0..k {
            for j in 0..n {
                let cell = &cells[i + 1][j + 1];
                let parsed = cell.trim().parse::<f64>().map_err(|_| {
                    AnalysisError::Validation {
                        row: i + 1,
                        col: j + 1,
                        value: cell.clone(),
                    }
                })?;
                values[(i, j)] = parsed;
            }
        }

        Ok(Self {
            algorithms,
            benchmarks,
            values,
        })
    }

    /// Number of algorithms (rows of the numeric block).
    pub fn k(&self) -> usize {
        self.algorithms.len()
    }

    /// Number of benchmarks (columns of the numeric block).
    pub fn n(&self) -> usize {
        self.benchmarks.len()
    }

    /// Algorithm names in row order.
    pub fn algorithms(&self) -> &[String] {
        &self.algorithms
    }

    /// Benchmark names in column order.
    pub fn benchmarks(&self) -> &[String] {
        &self.benchmarks
    }

    /// The k×n numeric block.
    pub fn values(&self) -> &ValueMatrix {
        &self.values
    }

    /// One algorithm's results across all benchmarks.
    pub fn row(&self, index: usize) -> Vec<f64> {
        self.values.row(index).iter().copied().collect()
    }

    /// Extract one algorithm row as a decimal series for the pairwise
    /// analysis.
    ///
    /// Values are lifted from the stored f64 block with their binary
    /// representation retained. Hosts that still have the original cell
    /// text should prefer [`AlgorithmSeries::from_strs`], which preserves
    /// the exact decimal the user entered.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Shape`] if `index` is out of range;
    /// [`AnalysisError::Validation`] (full-grid coordinates) for cells that
    /// have no decimal representation (non-finite or out of range), which
    /// f64 parsing admits but the signed-rank test cannot consume.
    pub fn series(&self, index: usize) -> Result<AlgorithmSeries, AnalysisError> {
        if index >= self.k() {
            return Err(AnalysisError::Shape(format!(
                "row index {index} out of range for {} algorithms",
                self.k()
            )));
        }
        let mut values = Vec::with_capacity(self.n());
        for (j, &v) in self.values.row(index).iter().enumerate() {
            let value = Decimal::from_f64_retain(v).ok_or(AnalysisError::Validation {
                row: index + 1,
                col: j + 1,
                value: v.to_string(),
            })?;
            values.push(value);
        }
        Ok(AlgorithmSeries {
            name: self.algorithms[index].clone(),
            values,
        })
    }
}

/// One algorithm's named result sequence with exact-precision values,
/// the input to the pairwise Wilcoxon analysis.
#[derive(Debug, Clone)]
pub struct AlgorithmSeries {
    /// Algorithm name as it appeared in the header column.
    pub name: String,
    /// Benchmark results in column order.
    pub values: Vec<Decimal>,
}

impl AlgorithmSeries {
    /// Build a series from raw cell text, parsing each value as `Decimal`.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::Validation`] (with the position in `values` as the
    /// column) when a cell does not parse as a decimal number.
    pub fn from_strs(name: &str, values: &[&str]) -> Result<Self, AnalysisError> {
        let parsed = values
            .iter()
            .enumerate()
            .map(|(j, v)| {
                Decimal::from_str(v.trim()).map_err(|_| AnalysisError::Validation {
                    row: 0,
                    col: j + 1,
                    value: (*v).to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.to_string(),
            values: parsed,
        })
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
