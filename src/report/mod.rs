//! Reporting helpers: annualized growth, subperiod summaries and the data
//! behind Baumol scatter plots.

pub mod format;

pub use format::*;

use serde::Serialize;

use crate::domain::{
    DecompositionRow, DecompositionSeries, IndustryCode, Subperiod, YearlyAggregate,
};
use crate::error::{DecompError, Result};
use crate::panel::Panel;

/// `100 * sum_{start < t <= end} x(t) / (end - start)`, in percent per year.
pub fn annualized<I>(values: I, start: i32, end: i32) -> f64
where
    I: IntoIterator<Item = (i32, f64)>,
{
    if end <= start {
        return 0.0;
    }
    let sum: f64 = values
        .into_iter()
        .filter(|(year, _)| *year > start && *year <= end)
        .map(|(_, x)| x)
        .sum();
    100.0 * sum / f64::from(end - start)
}

/// Annualized growth (percent per year) over one subperiod.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub subperiod: Subperiod,
    pub dln_y_per_l: f64,
    pub tfp_contrib: f64,
    pub ky_contrib: f64,
    pub dln_a: f64,
    pub within: f64,
    pub baumol: f64,
    pub capital_reallocation: f64,
    pub labor_reallocation: f64,
}

/// Summarize Pass 1 and a Pass 2 series over the series' own subperiod.
pub fn summarize(aggregates: &[YearlyAggregate], series: &DecompositionSeries) -> PeriodSummary {
    let Subperiod { start, end, .. } = series.subperiod;
    let pass1 = |f: fn(&YearlyAggregate) -> f64| {
        annualized(aggregates.iter().map(|a| (a.year, f(a))), start, end)
    };
    let pass2 = |f: fn(&DecompositionRow) -> f64| {
        annualized(series.rows.iter().map(|r| (r.year, f(r))), start, end)
    };
    PeriodSummary {
        subperiod: series.subperiod,
        dln_y_per_l: pass1(|a| a.dln_y_per_l),
        tfp_contrib: pass1(|a| a.tfp_contrib),
        ky_contrib: pass1(|a| a.ky_contrib),
        dln_a: pass1(|a| a.dln_a),
        within: pass2(|r| r.within),
        baumol: pass2(|r| r.baumol),
        capital_reallocation: pass2(|r| r.capital_reallocation),
        labor_reallocation: pass2(|r| r.labor_reallocation),
    }
}

/// One industry in a Baumol scatter: TFP growth against share change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShareShiftPoint {
    pub industry: IndustryCode,
    /// `sum_{start < t <= end} d ln A_i(t)`
    pub cumulative_tfp_growth: f64,
    /// Raw value-added share at `end` minus at `start`.
    pub share_change: f64,
}

/// Scatter points for every industry observed at both `start` and `end`.
pub fn share_shift_points(panel: &Panel, start: i32, end: i32) -> Result<Vec<ShareShiftPoint>> {
    if end <= start || !panel.contains_year(start) || !panel.contains_year(end) {
        return Err(DecompError::invalid(format!(
            "share shifts need two panel years, got {start}-{end}"
        )));
    }
    Ok(panel
        .rows_for(start)
        .iter()
        .filter_map(|first| {
            let industry = first.industry();
            let last = panel.row(industry, end)?;
            let cumulative_tfp_growth = (start + 1..=end)
                .filter_map(|year| panel.row(industry, year)?.tfp_growth)
                .sum();
            Some(ShareShiftPoint {
                industry,
                cumulative_tfp_growth,
                share_change: last.va_share - first.va_share,
            })
        })
        .collect())
}
