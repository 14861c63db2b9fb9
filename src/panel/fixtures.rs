//! Seeded synthetic panels shared by the identity tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, LogNormal, Normal};

use crate::data::VintageId;
use crate::domain::{CANADA_BUSINESS_SECTOR, IndustryCode, IndustryObservation};
use crate::panel::Panel;

pub fn code(s: &str) -> IndustryCode {
    CANADA_BUSINESS_SECTOR
        .lookup(s)
        .unwrap_or_else(|| panic!("{s} is not a Canadian code"))
}

/// An observation with flat capital/labor indices and a 30/70 cost split.
pub fn obs(industry: &str, year: i32, tfp: f64, va: f64) -> IndustryObservation {
    IndustryObservation {
        industry: code(industry),
        year,
        tfp_index: tfp,
        capital_index: 100.0,
        labor_index: 100.0,
        nominal_value_added: va,
        capital_cost: 0.3 * va,
        labor_cost: 0.7 * va,
        gross_output: Some(2.0 * va),
    }
}

/// Balanced random panel over the first `industries` Canadian codes.
pub fn synthetic_observations(
    seed: u64,
    industries: usize,
    first_year: i32,
    years: usize,
) -> Vec<IndustryObservation> {
    let mut rng = StdRng::seed_from_u64(seed);
    let growth = Normal::new(0.01, 0.03).unwrap();
    let level = LogNormal::new(100f64.ln(), 0.5).unwrap();

    let mut out = Vec::with_capacity(industries * years);
    for industry in CANADA_BUSINESS_SECTOR.codes().take(industries) {
        let (mut tfp, mut capital, mut labor) = (100.0, 100.0, 100.0);
        let scale: f64 = level.sample(&mut rng);
        for t in 0..years {
            if t > 0 {
                tfp *= f64::exp(growth.sample(&mut rng));
                capital *= f64::exp(growth.sample(&mut rng));
                labor *= f64::exp(growth.sample(&mut rng));
            }
            let va = scale * level.sample(&mut rng) / 100.0;
            let capital_share = rng.gen_range(0.2..0.5);
            out.push(IndustryObservation {
                industry,
                year: first_year + t as i32,
                tfp_index: tfp,
                capital_index: capital,
                labor_index: labor,
                nominal_value_added: va,
                capital_cost: capital_share * va,
                labor_cost: (1.0 - capital_share) * va,
                gross_output: Some(va * rng.gen_range(1.5..2.5)),
            });
        }
    }
    out
}

pub fn synthetic_panel(seed: u64, industries: usize, first_year: i32, years: usize) -> Panel {
    Panel::from_observations(
        VintageId::CanProductivity,
        &CANADA_BUSINESS_SECTOR,
        synthetic_observations(seed, industries, first_year, years),
    )
    .unwrap()
}
