//! Shared domain types.
//!
//! These records are immutable once computed and serializable so the
//! reporting layer can consume them without going through this crate:
//!
//! - per-industry observations (`IndustryObservation`)
//! - per-year aggregates from the labor-productivity pass (`YearlyAggregate`)
//! - per-subperiod TFP decompositions (`DecompositionSeries`)
//! - per-year Domar weights (`DomarWeightVector`)

use serde::{Deserialize, Serialize};

use crate::domain::IndustryCode;

/// One industry in one year, as reported by a productivity vintage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndustryObservation {
    pub industry: IndustryCode,
    pub year: i32,
    pub tfp_index: f64,
    pub capital_index: f64,
    pub labor_index: f64,
    pub nominal_value_added: f64,
    pub capital_cost: f64,
    pub labor_cost: f64,
    /// Nominal sales; only needed for revenue-based input shares.
    pub gross_output: Option<f64>,
}

/// Economy-wide growth accounting for one year (labor-productivity pass).
///
/// The first year of a panel is a zero baseline row with `alpha = None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyAggregate {
    pub year: i32,
    /// Tornqvist-averaged aggregate capital cost over aggregate value added.
    pub alpha: Option<f64>,
    pub dln_a: f64,
    pub dln_k: f64,
    pub dln_l: f64,
    pub dln_y: f64,
    /// `d ln(Y/L)`
    pub dln_y_per_l: f64,
    /// `d ln(K/Y)`
    pub dln_k_per_y: f64,
    pub tfp_contrib: f64,
    pub ky_contrib: f64,
}

impl YearlyAggregate {
    pub fn baseline(year: i32) -> Self {
        Self {
            year,
            alpha: None,
            dln_a: 0.0,
            dln_k: 0.0,
            dln_l: 0.0,
            dln_y: 0.0,
            dln_y_per_l: 0.0,
            dln_k_per_y: 0.0,
            tfp_contrib: 0.0,
            ky_contrib: 0.0,
        }
    }
}

/// A decomposition window `[start, end]` whose within term is weighted by
/// Tornqvist value-added shares frozen at `base_year`.
///
/// `base_year` is usually `start`; for a window opening on a panel's first
/// year it must be the year after, because the Tornqvist share is undefined
/// in the first year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subperiod {
    pub start: i32,
    pub end: i32,
    pub base_year: i32,
}

impl Subperiod {
    pub fn new(start: i32, end: i32) -> Self {
        Self {
            start,
            end,
            base_year: start,
        }
    }

    pub fn with_base_year(start: i32, end: i32, base_year: i32) -> Self {
        Self {
            start,
            end,
            base_year,
        }
    }

    /// Number of annual growth steps in the window.
    pub fn len(&self) -> i32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

/// Which terms the TFP decomposition produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecompositionMode {
    /// Within + Baumol only.
    TwoTerm,
    /// Within + Baumol + capital and labor reallocation (needs Domar weights).
    Reallocation,
}

/// One year of a subperiod decomposition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecompositionRow {
    pub year: i32,
    pub within: f64,
    pub baumol: f64,
    pub capital_reallocation: f64,
    pub labor_reallocation: f64,
    pub total: f64,
}

impl DecompositionRow {
    pub fn zero(year: i32) -> Self {
        Self {
            year,
            within: 0.0,
            baumol: 0.0,
            capital_reallocation: 0.0,
            labor_reallocation: 0.0,
            total: 0.0,
        }
    }

    /// The Hulten part of the row: `within + baumol`.
    pub fn tfp(&self) -> f64 {
        self.within + self.baumol
    }
}

/// Ordered (by year) decomposition for one subperiod.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecompositionSeries {
    pub subperiod: Subperiod,
    pub mode: DecompositionMode,
    pub rows: Vec<DecompositionRow>,
}

impl DecompositionSeries {
    /// Sum of one term over the growth years of the window.
    pub fn sum_by(&self, term: impl Fn(&DecompositionRow) -> f64) -> f64 {
        self.rows
            .iter()
            .filter(|r| r.year > self.subperiod.start)
            .map(term)
            .sum()
    }
}

/// Total (direct + indirect) output weights for one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomarWeightVector {
    pub year: i32,
    pub industries: Vec<(IndustryCode, f64)>,
    /// Aggregate capital weight.
    pub capital: f64,
    /// Aggregate labor weight.
    pub labor: f64,
    /// Cost/revenue input-share alignment per industry; `None` when the
    /// industry has no revenue-based intermediate inputs.
    pub wedge: Vec<(IndustryCode, Option<f64>)>,
}

impl DomarWeightVector {
    pub fn weight(&self, industry: IndustryCode) -> Option<f64> {
        self.industries
            .iter()
            .find(|(code, _)| *code == industry)
            .map(|(_, w)| *w)
    }

    /// Sum over real industries (exceeds one when intermediates are traded).
    pub fn industry_sum(&self) -> f64 {
        self.industries.iter().map(|(_, w)| w).sum()
    }
}
