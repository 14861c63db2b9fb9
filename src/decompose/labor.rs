//! Pass 1: aggregate growth accounting and labor productivity.

use log::info;

use crate::decompose::IdentityCheck;
use crate::domain::YearlyAggregate;
use crate::error::{DecompError, Result};
use crate::panel::{Panel, PanelRow};

/// Aggregate growth rates for one year.
///
/// Industries without a prior-year observation contribute nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct HultenGrowth {
    pub dln_a: f64,
    pub dln_k: f64,
    pub dln_l: f64,
}

impl HultenGrowth {
    pub fn from_rows(rows: &[PanelRow]) -> Self {
        let weighted = |w: Option<f64>, g: Option<f64>| w.zip(g).map_or(0.0, |(w, g)| w * g);
        rows.iter().fold(Self::default(), |acc, r| Self {
            dln_a: acc.dln_a + weighted(r.wbar, r.tfp_growth),
            dln_k: acc.dln_k + weighted(r.omega_k, r.capital_growth),
            dln_l: acc.dln_l + weighted(r.omega_l, r.labor_growth),
        })
    }
}

/// Labor productivity decomposition for every panel year.
///
/// The first panel year is a zero baseline. For later years
///
/// ```text
/// d ln Y      = d ln A + alpha d ln K + (1 - alpha) d ln L
/// tfp_contrib = d ln A / (1 - alpha)
/// ky_contrib  = alpha / (1 - alpha) * d ln(K/Y)
/// ```
///
/// and `tfp_contrib + ky_contrib == d ln(Y/L)` is enforced.
pub fn labor_productivity(panel: &Panel) -> Result<Vec<YearlyAggregate>> {
    let mut identity = IdentityCheck::new("tfp_contrib + ky_contrib = dln(Y/L)");
    let mut out = Vec::with_capacity(panel.years().len());
    out.push(YearlyAggregate::baseline(panel.first_year()));

    for &year in &panel.years()[1..] {
        let growth = HultenGrowth::from_rows(panel.rows_for(year));
        let alpha = panel
            .totals(year)
            .and_then(|t| t.alpha)
            .filter(|a| a.is_finite() && *a != 1.0)
            .ok_or_else(|| {
                DecompError::invalid(format!("aggregate capital share undefined in {year}"))
            })?;

        let dln_y = growth.dln_a + alpha * growth.dln_k + (1.0 - alpha) * growth.dln_l;
        let dln_y_per_l = dln_y - growth.dln_l;
        let dln_k_per_y = growth.dln_k - dln_y;
        let tfp_contrib = growth.dln_a / (1.0 - alpha);
        let ky_contrib = alpha / (1.0 - alpha) * dln_k_per_y;
        identity.check(year, tfp_contrib + ky_contrib, dln_y_per_l)?;

        out.push(YearlyAggregate {
            year,
            alpha: Some(alpha),
            dln_a: growth.dln_a,
            dln_k: growth.dln_k,
            dln_l: growth.dln_l,
            dln_y,
            dln_y_per_l,
            dln_k_per_y,
            tfp_contrib,
            ky_contrib,
        });
    }

    info!(
        "{}: labor productivity pass over {} years, max residual {:.2e}",
        panel.vintage,
        out.len(),
        identity.max_residual
    );
    Ok(out)
}
