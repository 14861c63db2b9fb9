//! Two-year smoothing of solved Domar weights.
//!
//! Weights are averaged after inversion, year `t` with year `t - 1`, over the
//! series already stitched across vintages. The first year has no smoothed
//! weight, and an industry without a weight in `t - 1` is left out of year `t`.

use serde::Serialize;

use crate::domain::DomarWeightVector;
use crate::error::{DecompError, Result};

/// Smoothed Domar weights keyed by year.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DomarSeries {
    weights: Vec<DomarWeightVector>,
}

impl DomarSeries {
    /// Smooth a year-ordered series of raw weights.
    ///
    /// A year is kept only when the previous year is also present.
    pub fn smoothed(raw: &[DomarWeightVector]) -> Self {
        let weights = raw
            .windows(2)
            .filter(|w| w[1].year == w[0].year + 1)
            .map(|w| average(&w[0], &w[1]))
            .collect();
        Self { weights }
    }

    pub fn get(&self, year: i32) -> Option<&DomarWeightVector> {
        self.weights
            .binary_search_by_key(&year, |w| w.year)
            .ok()
            .map(|i| &self.weights[i])
    }

    /// `(lambda_k, lambda_l)` for one year.
    pub fn factor_weights(&self, year: i32) -> Result<(f64, f64)> {
        self.get(year)
            .map(|w| (w.capital, w.labor))
            .ok_or(DecompError::MissingDomarWeights { year })
    }

    pub fn iter(&self) -> impl Iterator<Item = &DomarWeightVector> {
        self.weights.iter()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

fn average(prev: &DomarWeightVector, cur: &DomarWeightVector) -> DomarWeightVector {
    DomarWeightVector {
        year: cur.year,
        industries: cur
            .industries
            .iter()
            .filter_map(|&(code, x)| prev.weight(code).map(|p| (code, 0.5 * (p + x))))
            .collect(),
        capital: 0.5 * (prev.capital + cur.capital),
        labor: 0.5 * (prev.labor + cur.labor),
        wedge: cur.wedge.clone(),
    }
}
