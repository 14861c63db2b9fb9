//! Pass 2: within / Baumol / reallocation decomposition of aggregate TFP growth.

use std::collections::HashMap;

use log::info;

use crate::decompose::IdentityCheck;
use crate::decompose::labor::HultenGrowth;
use crate::domain::{
    DecompositionMode, DecompositionRow, DecompositionSeries, IndustryCode, Subperiod,
    YearlyAggregate,
};
use crate::domar::DomarSeries;
use crate::error::{DecompError, Result};
use crate::panel::{Panel, PanelRow};

/// Decompose aggregate TFP growth over one subperiod.
///
/// For each year `t` in `(start, end]`:
///
/// ```text
/// within    = sum_i base_i g_i
/// baumol    = sum_i (wbar_i - base_i) g_i
/// k_realloc = sum_i (wbar_i alpha_k_i - omega_k_i lambda_k) g_k_i
/// l_realloc = sum_i (wbar_i alpha_l_i - omega_l_i lambda_l) g_l_i
/// ```
///
/// `base_i` is the Tornqvist share at the base year; industries absent then
/// have a zero base share, so their whole contribution lands in `baumol`.
/// The start year is a zero row.
///
/// `within + baumol` must reproduce Pass 1's `d ln A` every year and on the
/// annualized window. With reallocation terms, each is also checked against
/// its aggregate form `sum_i wbar_i alpha_k_i g_k_i - lambda_k d ln K`.
pub fn decompose_tfp(
    panel: &Panel,
    subperiod: Subperiod,
    mode: DecompositionMode,
    aggregates: &[YearlyAggregate],
    domar: Option<&DomarSeries>,
) -> Result<DecompositionSeries> {
    let label = subperiod.label();
    if subperiod.is_empty() {
        return Err(DecompError::invalid(format!("empty subperiod {label}")));
    }
    if !panel.contains_year(subperiod.start) || !panel.contains_year(subperiod.end) {
        return Err(DecompError::invalid(format!(
            "subperiod {label} is outside the panel ({}-{})",
            panel.first_year(),
            panel.last_year()
        )));
    }
    let domar = match (mode, domar) {
        (DecompositionMode::Reallocation, None) => {
            return Err(DecompError::invalid(
                "reallocation terms need Domar weights",
            ));
        }
        (DecompositionMode::Reallocation, Some(d)) => Some(d),
        (DecompositionMode::TwoTerm, _) => None,
    };
    let base = panel.base_shares(subperiod.base_year)?;

    let mut tfp_identity = IdentityCheck::new("within + baumol = dlnA");
    let mut k_identity = IdentityCheck::new("capital reallocation aggregate form");
    let mut l_identity = IdentityCheck::new("labor reallocation aggregate form");

    let mut rows = Vec::with_capacity(subperiod.len() as usize + 1);
    rows.push(DecompositionRow::zero(subperiod.start));
    let (mut tfp_sum, mut dln_a_sum) = (0.0, 0.0);

    for year in subperiod.start + 1..=subperiod.end {
        let aggregate = aggregates.iter().find(|a| a.year == year).ok_or_else(|| {
            DecompError::invalid(format!("no labor productivity aggregate for {year}"))
        })?;
        let cross_section = panel.rows_for(year);
        let (within, baumol) = tfp_terms(cross_section, &base);

        let (capital_reallocation, labor_reallocation) = match domar {
            None => (0.0, 0.0),
            Some(series) => {
                let (lambda_k, lambda_l) = series.factor_weights(year)?;
                let terms = reallocation_terms(cross_section, lambda_k, lambda_l);
                let growth = HultenGrowth::from_rows(cross_section);
                k_identity.check(
                    year,
                    terms.capital,
                    terms.capital_direct - lambda_k * aggregate.dln_k,
                )?;
                l_identity.check(
                    year,
                    terms.labor,
                    terms.labor_direct - lambda_l * aggregate.dln_l,
                )?;
                // Pass 1 must describe the same cross-section.
                k_identity.check(year, growth.dln_k, aggregate.dln_k)?;
                l_identity.check(year, growth.dln_l, aggregate.dln_l)?;
                (terms.capital, terms.labor)
            }
        };

        let row = DecompositionRow {
            year,
            within,
            baumol,
            capital_reallocation,
            labor_reallocation,
            total: within + baumol + capital_reallocation + labor_reallocation,
        };
        tfp_identity.check(
            year,
            row.total - row.capital_reallocation - row.labor_reallocation,
            aggregate.dln_a,
        )?;
        tfp_sum += row.tfp();
        dln_a_sum += aggregate.dln_a;
        rows.push(row);
    }

    let years = f64::from(subperiod.len());
    tfp_identity.check(subperiod.end, tfp_sum / years, dln_a_sum / years)?;

    info!(
        "{label} (base {}, {mode:?}): max residual {:.2e} tfp, {:.2e} capital, {:.2e} labor",
        subperiod.base_year,
        tfp_identity.max_residual,
        k_identity.max_residual,
        l_identity.max_residual
    );
    Ok(DecompositionSeries {
        subperiod,
        mode,
        rows,
    })
}

fn tfp_terms(rows: &[PanelRow], base: &HashMap<IndustryCode, f64>) -> (f64, f64) {
    rows.iter()
        .filter_map(|r| {
            let (wbar, g) = r.wbar.zip(r.tfp_growth)?;
            let b = base.get(&r.industry()).copied().unwrap_or(0.0);
            Some((b * g, (wbar - b) * g))
        })
        .fold((0.0, 0.0), |(w, b), (dw, db)| (w + dw, b + db))
}

#[derive(Debug, Default)]
struct ReallocationTerms {
    capital: f64,
    labor: f64,
    /// `sum_i wbar_i alpha_k_i g_k_i`
    capital_direct: f64,
    labor_direct: f64,
}

fn reallocation_terms(rows: &[PanelRow], lambda_k: f64, lambda_l: f64) -> ReallocationTerms {
    let mut terms = ReallocationTerms::default();
    for r in rows {
        let Some(wbar) = r.wbar else { continue };
        if let (Some(alpha), Some(omega), Some(g)) = (r.alpha_k, r.omega_k, r.capital_growth) {
            terms.capital += (wbar * alpha - omega * lambda_k) * g;
            terms.capital_direct += wbar * alpha * g;
        }
        if let (Some(alpha), Some(omega), Some(g)) = (r.alpha_l, r.omega_l, r.labor_growth) {
            terms.labor += (wbar * alpha - omega * lambda_l) * g;
            terms.labor_direct += wbar * alpha * g;
        }
    }
    terms
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::data::VintageId;
    use crate::decompose::labor_productivity;
    use crate::domain::{CANADA_BUSINESS_SECTOR, DomarWeightVector, IndustryObservation};
    use crate::panel::fixtures::{code, obs, synthetic_panel};

    fn panel(observations: Vec<IndustryObservation>) -> Panel {
        Panel::from_observations(
            VintageId::CanProductivity,
            &CANADA_BUSINESS_SECTOR,
            observations,
        )
        .unwrap()
    }

    fn flat_domar(first: i32, last: i32) -> DomarSeries {
        let raw: Vec<DomarWeightVector> = (first..=last)
            .map(|year| {
                let drift = 0.01 * f64::from(year - first);
                DomarWeightVector {
                    year,
                    industries: Vec::new(),
                    capital: 0.35 + drift,
                    labor: 0.65 - drift,
                    wedge: Vec::new(),
                }
            })
            .collect();
        DomarSeries::smoothed(&raw)
    }

    #[test]
    fn two_industry_shift_splits_into_within_and_baumol() {
        let tfp_a = 100.0 * 0.05f64.exp();
        let p = panel(vec![
            obs("311", 2000, 100.0, 60.0),
            obs("312", 2000, 100.0, 40.0),
            obs("311", 2001, 100.0, 60.0),
            obs("312", 2001, 100.0, 40.0),
            obs("311", 2002, tfp_a, 40.0),
            obs("312", 2002, 100.0, 60.0),
        ]);
        let aggregates = labor_productivity(&p).unwrap();
        let series = decompose_tfp(
            &p,
            Subperiod::new(2001, 2002),
            DecompositionMode::TwoTerm,
            &aggregates,
            None,
        )
        .unwrap();

        assert_eq!(series.rows[0], DecompositionRow::zero(2001));
        let row = &series.rows[1];
        assert_abs_diff_eq!(row.within, 0.03, epsilon = 1e-12);
        assert_abs_diff_eq!(row.baumol, -0.005, epsilon = 1e-12);
        assert_abs_diff_eq!(row.total, 0.025, epsilon = 1e-12);
        assert_eq!(row.capital_reallocation, 0.0);
    }

    #[test]
    fn late_entrant_contributes_only_to_baumol() {
        let mut observations = Vec::new();
        for (t, year) in (2000..=2003).enumerate() {
            let t = t as f64;
            observations.push(obs("311", year, 100.0 * (0.02 * t).exp(), 50.0 + t));
            observations.push(obs("312", year, 100.0 * (0.01 * t).exp(), 30.0));
            if year >= 2002 {
                observations.push(obs("321", year, 100.0 * (0.10 * t).exp(), 20.0 + 5.0 * t));
            }
        }
        let p = panel(observations);
        let aggregates = labor_productivity(&p).unwrap();
        let series = decompose_tfp(
            &p,
            Subperiod::new(2001, 2003),
            DecompositionMode::TwoTerm,
            &aggregates,
            None,
        )
        .unwrap();

        let entrant = p.row(code("321"), 2003).unwrap();
        let entrant_part = entrant.wbar.unwrap() * entrant.tfp_growth.unwrap();
        let base = p.base_shares(2001).unwrap();
        let incumbents = |f: &dyn Fn(&PanelRow, f64) -> f64| -> f64 {
            p.rows_for(2003)
                .iter()
                .filter(|r| r.industry() != code("321"))
                .map(|r| f(r, base[&r.industry()]))
                .sum()
        };

        let row = &series.rows[2];
        assert_eq!(row.year, 2003);
        assert_abs_diff_eq!(
            row.within,
            incumbents(&|r, b| b * r.tfp_growth.unwrap()),
            epsilon = 1e-12
        );
        assert_abs_diff_eq!(
            row.baumol - incumbents(&|r, b| (r.wbar.unwrap() - b) * r.tfp_growth.unwrap()),
            entrant_part,
            epsilon = 1e-12
        );
        assert!(entrant_part > 0.0);
    }

    #[test]
    fn identities_hold_on_random_panels() {
        for seed in [5, 6, 7] {
            let p = synthetic_panel(seed, 25, 1961, 30);
            let aggregates = labor_productivity(&p).unwrap();
            let domar = flat_domar(1961, 1990);
            for subperiod in [
                Subperiod::with_base_year(1961, 1990, 1962),
                Subperiod::new(1970, 1980),
            ] {
                let series = decompose_tfp(
                    &p,
                    subperiod,
                    DecompositionMode::Reallocation,
                    &aggregates,
                    Some(&domar),
                )
                .unwrap();
                assert_eq!(series.rows.len() as i32, subperiod.len() + 1);
                for row in &series.rows[1..] {
                    let a = aggregates.iter().find(|a| a.year == row.year).unwrap();
                    assert!((row.tfp() - a.dln_a).abs() < 1e-10);
                    assert!(row.capital_reallocation.is_finite());
                    assert!(row.capital_reallocation != 0.0);
                }
                let annual = series.sum_by(|r| r.tfp()) / f64::from(subperiod.len());
                let expected: f64 = aggregates
                    .iter()
                    .filter(|a| a.year > subperiod.start && a.year <= subperiod.end)
                    .map(|a| a.dln_a)
                    .sum::<f64>()
                    / f64::from(subperiod.len());
                assert_abs_diff_eq!(annual, expected, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn reallocation_needs_smoothed_weights_for_every_year() {
        let p = synthetic_panel(9, 6, 1961, 10);
        let aggregates = labor_productivity(&p).unwrap();
        let domar = flat_domar(1961, 1965);
        let err = decompose_tfp(
            &p,
            Subperiod::with_base_year(1961, 1970, 1962),
            DecompositionMode::Reallocation,
            &aggregates,
            Some(&domar),
        )
        .unwrap_err();
        assert!(matches!(err, DecompError::MissingDomarWeights { year: 1966 }));
    }

    #[test]
    fn base_year_without_tornqvist_shares_fails() {
        let p = synthetic_panel(9, 6, 1961, 10);
        let aggregates = labor_productivity(&p).unwrap();
        let err = decompose_tfp(
            &p,
            Subperiod::new(1961, 1970),
            DecompositionMode::TwoTerm,
            &aggregates,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, DecompError::MissingBaseYear { base_year: 1961 }));
    }

    #[test]
    fn base_year_with_no_observations_fails() {
        let p = synthetic_panel(9, 6, 1961, 10);
        let aggregates = labor_productivity(&p).unwrap();
        let err = decompose_tfp(
            &p,
            Subperiod::with_base_year(1961, 1970, 1950),
            DecompositionMode::TwoTerm,
            &aggregates,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, DecompError::MissingBaseYear { base_year: 1950 }));
        assert_eq!(err.exit_code(), 3);
    }
}
