//! Industry x year panel with derived growth rates and weights.
//!
//! A [`Panel`] is built once from canonical [`IndustryObservation`]s and is
//! read-only afterwards. Every derived column is a function of the row and
//! the same industry's row in `year - 1`:
//!
//! - log growth of the TFP, capital and labor indices (`None` without `t-1`)
//! - the raw value-added share within the year, and its Tornqvist mean `wbar`
//! - capital/labor shares of industry factor cost (`alpha_k`, `alpha_l`)
//! - industry shares of aggregate capital/labor cost (`omega_k`, `omega_l`)
//!
//! All Tornqvist columns are `None` in an industry's first year.

pub mod builder;

pub use builder::*;

use std::collections::{BTreeMap, HashMap};

use crate::data::VintageId;
use crate::domain::{CodeSet, IndustryCode, IndustryObservation};
use crate::error::{DecompError, Result};
use crate::math::{log_growth, share, tornqvist};

/// One panel row: the observation plus everything derived from it.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelRow {
    pub obs: IndustryObservation,
    pub va_share: f64,
    pub wbar: Option<f64>,
    pub tfp_growth: Option<f64>,
    pub capital_growth: Option<f64>,
    pub labor_growth: Option<f64>,
    pub alpha_k: Option<f64>,
    pub alpha_l: Option<f64>,
    pub omega_k: Option<f64>,
    pub omega_l: Option<f64>,
}

impl PanelRow {
    pub fn industry(&self) -> IndustryCode {
        self.obs.industry
    }

    pub fn year(&self) -> i32 {
        self.obs.year
    }
}

/// Economy-wide sums for one year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearTotals {
    pub year: i32,
    pub value_added: f64,
    pub capital_cost: f64,
    pub labor_cost: f64,
    /// Tornqvist mean of aggregate capital cost over aggregate value added.
    pub alpha: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Panel {
    pub vintage: VintageId,
    pub scheme: &'static CodeSet,
    years: Vec<i32>,
    rows: Vec<PanelRow>,
    totals: Vec<YearTotals>,
}

/// Row-level quantities that only need the current year.
struct Current {
    va_share: f64,
    alpha_k: f64,
    alpha_l: f64,
    omega_k: f64,
    omega_l: f64,
}

impl Panel {
    /// Derive a panel from canonical observations.
    ///
    /// Fails on duplicate `(industry, year)` pairs, codes outside the scheme,
    /// non-positive indices and gaps in the year sequence.
    pub fn from_observations(
        vintage: VintageId,
        scheme: &'static CodeSet,
        mut observations: Vec<IndustryObservation>,
    ) -> Result<Self> {
        if observations.is_empty() {
            return Err(DecompError::invalid(format!("{vintage}: no observations")));
        }
        observations.sort_by(|a, b| a.year.cmp(&b.year).then(a.industry.cmp(&b.industry)));

        for obs in &observations {
            validate(vintage, scheme, obs)?;
        }
        if let Some(pair) = observations
            .windows(2)
            .find(|w| w[0].year == w[1].year && w[0].industry == w[1].industry)
        {
            return Err(DecompError::invalid(format!(
                "{vintage}: duplicate observation for {} in {}",
                pair[0].industry, pair[0].year
            )));
        }

        let mut years: Vec<i32> = observations.iter().map(|o| o.year).collect();
        years.dedup();
        if let Some(gap) = years.windows(2).find(|w| w[1] != w[0] + 1) {
            return Err(DecompError::invalid(format!(
                "{vintage}: years jump from {} to {}",
                gap[0], gap[1]
            )));
        }

        let mut sums: BTreeMap<i32, (f64, f64, f64)> = BTreeMap::new();
        for obs in &observations {
            let entry = sums.entry(obs.year).or_default();
            entry.0 += obs.nominal_value_added;
            entry.1 += obs.capital_cost;
            entry.2 += obs.labor_cost;
        }

        let mut totals: Vec<YearTotals> = Vec::with_capacity(sums.len());
        let mut previous_ratio: Option<(i32, f64)> = None;
        for (&year, &(value_added, capital_cost, labor_cost)) in &sums {
            let ratio = share(capital_cost, value_added);
            let prev = previous_ratio.filter(|(y, _)| *y == year - 1).map(|(_, r)| r);
            totals.push(YearTotals {
                year,
                value_added,
                capital_cost,
                labor_cost,
                alpha: tornqvist(prev, ratio),
            });
            previous_ratio = Some((year, ratio));
        }

        let current: Vec<Current> = observations
            .iter()
            .map(|obs| {
                let (va, k, l) = sums[&obs.year];
                Current {
                    va_share: share(obs.nominal_value_added, va),
                    alpha_k: share(obs.capital_cost, obs.capital_cost + obs.labor_cost),
                    alpha_l: share(obs.labor_cost, obs.capital_cost + obs.labor_cost),
                    omega_k: share(obs.capital_cost, k),
                    omega_l: share(obs.labor_cost, l),
                }
            })
            .collect();

        let position: HashMap<(IndustryCode, i32), usize> = observations
            .iter()
            .enumerate()
            .map(|(i, o)| ((o.industry, o.year), i))
            .collect();

        let rows = observations
            .iter()
            .zip(&current)
            .map(|(obs, now)| {
                let prev = position.get(&(obs.industry, obs.year - 1)).copied();
                let prev_obs = prev.map(|j| &observations[j]);
                let prev_now = prev.map(|j| &current[j]);
                PanelRow {
                    obs: obs.clone(),
                    va_share: now.va_share,
                    wbar: tornqvist(prev_now.map(|c| c.va_share), now.va_share),
                    tfp_growth: log_growth(prev_obs.map(|o| o.tfp_index), obs.tfp_index),
                    capital_growth: log_growth(prev_obs.map(|o| o.capital_index), obs.capital_index),
                    labor_growth: log_growth(prev_obs.map(|o| o.labor_index), obs.labor_index),
                    alpha_k: tornqvist(prev_now.map(|c| c.alpha_k), now.alpha_k),
                    alpha_l: tornqvist(prev_now.map(|c| c.alpha_l), now.alpha_l),
                    omega_k: tornqvist(prev_now.map(|c| c.omega_k), now.omega_k),
                    omega_l: tornqvist(prev_now.map(|c| c.omega_l), now.omega_l),
                }
            })
            .collect();

        Ok(Self {
            vintage,
            scheme,
            years,
            rows,
            totals,
        })
    }

    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn first_year(&self) -> i32 {
        self.years[0]
    }

    pub fn last_year(&self) -> i32 {
        self.years[self.years.len() - 1]
    }

    pub fn contains_year(&self, year: i32) -> bool {
        self.years.binary_search(&year).is_ok()
    }

    /// All rows, ordered by year then industry.
    pub fn rows(&self) -> &[PanelRow] {
        &self.rows
    }

    /// The cross-section for one year (empty if the year is absent).
    pub fn rows_for(&self, year: i32) -> &[PanelRow] {
        let start = self.rows.partition_point(|r| r.year() < year);
        let end = self.rows.partition_point(|r| r.year() <= year);
        &self.rows[start..end]
    }

    pub fn row(&self, industry: IndustryCode, year: i32) -> Option<&PanelRow> {
        self.rows_for(year).iter().find(|r| r.industry() == industry)
    }

    pub fn totals(&self, year: i32) -> Option<&YearTotals> {
        self.totals.iter().find(|t| t.year == year)
    }

    pub fn observations(&self) -> impl Iterator<Item = &IndustryObservation> {
        self.rows.iter().map(|r| &r.obs)
    }

    /// Tornqvist value-added shares frozen at `base_year`.
    ///
    /// Industries without a defined `wbar` at the base year are absent from
    /// the map; callers treat them as a zero base share.
    pub fn base_shares(&self, base_year: i32) -> Result<HashMap<IndustryCode, f64>> {
        let shares: HashMap<IndustryCode, f64> = self
            .rows_for(base_year)
            .iter()
            .filter_map(|r| r.wbar.map(|w| (r.industry(), w)))
            .collect();
        if shares.is_empty() {
            return Err(DecompError::MissingBaseYear { base_year });
        }
        Ok(shares)
    }

    /// Raw (non-averaged) value-added shares for one year, in canonical order.
    pub fn va_shares(&self, year: i32) -> Vec<(IndustryCode, f64)> {
        self.rows_for(year)
            .iter()
            .map(|r| (r.industry(), r.va_share))
            .collect()
    }
}

fn validate(vintage: VintageId, scheme: &CodeSet, obs: &IndustryObservation) -> Result<()> {
    if !scheme.contains(obs.industry) {
        return Err(DecompError::invalid(format!(
            "{vintage}: {} is not in {}",
            obs.industry, scheme.name
        )));
    }
    for (name, value) in [
        ("TFP", obs.tfp_index),
        ("capital", obs.capital_index),
        ("labor", obs.labor_index),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(DecompError::invalid(format!(
                "{vintage}: {name} index for {} in {} is {value}",
                obs.industry, obs.year
            )));
        }
    }
    for value in [obs.nominal_value_added, obs.capital_cost, obs.labor_cost] {
        if !value.is_finite() {
            return Err(DecompError::invalid(format!(
                "{vintage}: non-finite nominal value for {} in {}",
                obs.industry, obs.year
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod fixtures;

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::fixtures::{code, obs, synthetic_panel};
    use super::*;
    use crate::decompose::WEIGHT_SUM_TOLERANCE;

    #[test]
    fn growth_and_wbar_are_undefined_in_the_first_year() {
        let panel = Panel::from_observations(
            VintageId::CanProductivity,
            &crate::domain::CANADA_BUSINESS_SECTOR,
            vec![
                obs("311", 2000, 100.0, 60.0),
                obs("312", 2000, 100.0, 40.0),
                obs("311", 2001, 105.0, 50.0),
                obs("312", 2001, 100.0, 50.0),
            ],
        )
        .unwrap();

        let first = panel.row(code("311"), 2000).unwrap();
        assert_eq!(first.tfp_growth, None);
        assert_eq!(first.wbar, None);
        assert_abs_diff_eq!(first.va_share, 0.6);

        let next = panel.row(code("311"), 2001).unwrap();
        assert_abs_diff_eq!(next.tfp_growth.unwrap(), (1.05f64).ln(), epsilon = 1e-12);
        assert_abs_diff_eq!(next.wbar.unwrap(), 0.55, epsilon = 1e-12);
        assert_eq!(panel.totals(2000).unwrap().alpha, None);
        assert!(panel.totals(2001).unwrap().alpha.is_some());
    }

    #[test]
    fn zero_value_added_year_gives_zero_shares() {
        let mut a = obs("311", 2000, 100.0, 0.0);
        let mut b = obs("312", 2000, 100.0, 0.0);
        a.capital_cost = 0.0;
        a.labor_cost = 0.0;
        b.capital_cost = 0.0;
        b.labor_cost = 0.0;
        let panel = Panel::from_observations(
            VintageId::CanProductivity,
            &crate::domain::CANADA_BUSINESS_SECTOR,
            vec![a, b],
        )
        .unwrap();
        for row in panel.rows() {
            assert_eq!(row.va_share, 0.0);
        }
        assert_eq!(panel.totals(2000).unwrap().alpha, None);
    }

    #[test]
    fn wbar_sums_to_one_every_year() {
        let panel = synthetic_panel(7, 12, 1990, 20);
        for &year in &panel.years()[1..] {
            let total: f64 = panel.rows_for(year).iter().filter_map(|r| r.wbar).sum();
            assert!((total - 1.0).abs() < WEIGHT_SUM_TOLERANCE, "{year}: {total}");
        }
    }

    #[test]
    fn rejects_duplicates_gaps_and_bad_indices() {
        let scheme = &crate::domain::CANADA_BUSINESS_SECTOR;
        let v = VintageId::CanProductivity;

        let dup = vec![obs("311", 2000, 100.0, 1.0), obs("311", 2000, 101.0, 1.0)];
        assert!(matches!(
            Panel::from_observations(v, scheme, dup),
            Err(DecompError::InvalidInput(_))
        ));

        let gap = vec![obs("311", 2000, 100.0, 1.0), obs("311", 2002, 101.0, 1.0)];
        assert!(Panel::from_observations(v, scheme, gap).is_err());

        let bad = vec![obs("311", 2000, 0.0, 1.0)];
        assert!(Panel::from_observations(v, scheme, bad).is_err());

        let us_only = vec![obs_us("55")];
        assert!(Panel::from_observations(v, scheme, us_only).is_err());
    }

    fn obs_us(code: &str) -> IndustryObservation {
        let mut o = obs("311", 2000, 100.0, 1.0);
        o.industry = crate::domain::US_BUSINESS_SECTOR.lookup(code).unwrap();
        o
    }

    #[test]
    fn base_shares_require_a_defined_wbar() {
        let panel = synthetic_panel(3, 4, 2000, 5);
        assert!(matches!(
            panel.base_shares(2000),
            Err(DecompError::MissingBaseYear { base_year: 2000 })
        ));
        let base = panel.base_shares(2001).unwrap();
        assert_eq!(base.len(), 4);
        let sum: f64 = base.values().sum();
        assert_abs_diff_eq!(sum, 1.0, epsilon = 1e-12);
    }
}
