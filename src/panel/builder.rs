//! Raw accounts table -> canonical observations.

use std::collections::{BTreeMap, HashSet};

use log::{debug, info};

use crate::crosswalk::Crosswalk;
use crate::data::{AccountVariables, RawObservation, VintageId};
use crate::domain::{IndustryCode, IndustryObservation};
use crate::error::{DecompError, Result};
use crate::math::shares;
use crate::panel::Panel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Tfp,
    Capital,
    Labor,
    ValueAdded,
    CapitalCost,
    LaborCost,
    GrossOutput,
}

impl Field {
    const REQUIRED: [Field; 6] = [
        Field::Tfp,
        Field::Capital,
        Field::Labor,
        Field::ValueAdded,
        Field::CapitalCost,
        Field::LaborCost,
    ];

    /// Index levels cannot be summed across source rows.
    fn is_index(self) -> bool {
        matches!(self, Field::Tfp | Field::Capital | Field::Labor)
    }

    fn slot(self) -> usize {
        self as usize
    }

    fn lookup(name: &str, value_added: &str, accounts: &AccountVariables) -> Option<Field> {
        if name == value_added {
            Some(Field::ValueAdded)
        } else if name == accounts.tfp {
            Some(Field::Tfp)
        } else if name == accounts.capital {
            Some(Field::Capital)
        } else if name == accounts.labor {
            Some(Field::Labor)
        } else if name == accounts.capital_cost {
            Some(Field::CapitalCost)
        } else if name == accounts.labor_cost {
            Some(Field::LaborCost)
        } else if accounts.gross_output.is_some_and(|g| g == name) {
            Some(Field::GrossOutput)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
struct Partial {
    values: [Option<f64>; 7],
}

/// Canonicalize, filter and pivot a raw accounts table, then derive the panel.
pub fn build_panel(raw: &[RawObservation], vintage: VintageId) -> Result<Panel> {
    let observations = canonical_observations(raw, vintage)?;
    Panel::from_observations(vintage, vintage.descriptor().scheme, observations)
}

/// Pivot a raw accounts table into one observation per `(industry, year)`.
///
/// Nominal values of several raw labels mapping to one canonical code are
/// summed; index levels must come from a single source row.
pub fn canonical_observations(
    raw: &[RawObservation],
    vintage: VintageId,
) -> Result<Vec<IndustryObservation>> {
    let descriptor = vintage.descriptor();
    let variables = descriptor
        .variables
        .as_ref()
        .ok_or_else(|| DecompError::invalid(format!("{vintage} is not an accounts vintage")))?;
    let accounts = variables.accounts.as_ref().ok_or_else(|| {
        DecompError::invalid(format!("{vintage} only carries value added, not productivity accounts"))
    })?;

    let mut crosswalk = Crosswalk::new(vintage);
    let mut cells: BTreeMap<(i32, IndustryCode), Partial> = BTreeMap::new();
    let mut seen: HashSet<(&str, i32, &str)> = HashSet::new();
    let (mut out_of_range, mut dropped, mut other_variables) = (0usize, 0usize, 0usize);

    for row in raw {
        let year = row.period.year();
        if !descriptor.covers(year) {
            out_of_range += 1;
            continue;
        }
        let Some(field) = Field::lookup(&row.variable, variables.value_added, accounts) else {
            other_variables += 1;
            continue;
        };
        if !seen.insert((row.label.as_str(), year, row.variable.as_str())) {
            return Err(DecompError::invalid(format!(
                "{vintage}: '{}' reports {} twice for {year}",
                row.label, row.variable
            )));
        }
        let Some(industry) = crosswalk.resolve_industry(&row.label)? else {
            dropped += 1;
            continue;
        };
        let Some(value) = row.value else { continue };

        let slot = &mut cells.entry((year, industry)).or_default().values[field.slot()];
        *slot = match (*slot, field.is_index()) {
            (None, _) => Some(value),
            (Some(_), true) => {
                return Err(DecompError::invalid(format!(
                    "{vintage}: several source rows give the {field:?} index of {industry} in {year}"
                )));
            }
            (Some(acc), false) => Some(acc + value),
        };
    }

    debug!(
        "{vintage}: skipped {out_of_range} rows outside {}-{}, {other_variables} rows of unused variables",
        descriptor.first_year, descriptor.last_year
    );
    debug!(
        "{vintage}: dropped {dropped} rows from {} labels",
        crosswalk.dropped().len()
    );

    let mut observations = Vec::with_capacity(cells.len());
    for ((year, industry), partial) in cells {
        let present = Field::REQUIRED
            .iter()
            .filter(|f| partial.values[f.slot()].is_some())
            .count();
        if present == 0 {
            continue;
        }
        if present < Field::REQUIRED.len() {
            return Err(DecompError::invalid(format!(
                "{vintage}: incomplete observation for {industry} in {year}"
            )));
        }
        let get = |f: Field| partial.values[f.slot()].unwrap_or_default();
        observations.push(IndustryObservation {
            industry,
            year,
            tfp_index: get(Field::Tfp),
            capital_index: get(Field::Capital),
            labor_index: get(Field::Labor),
            nominal_value_added: get(Field::ValueAdded),
            capital_cost: get(Field::CapitalCost),
            labor_cost: get(Field::LaborCost),
            gross_output: partial.values[Field::GrossOutput.slot()],
        });
    }

    let industries: HashSet<IndustryCode> = observations.iter().map(|o| o.industry).collect();
    info!(
        "{vintage}: {} observations for {} industries",
        observations.len(),
        industries.len()
    );
    Ok(observations)
}

/// Raw value-added shares per year from any vintage that reports value added.
///
/// Many-to-one labels are summed before the shares are taken.
pub fn value_added_shares(
    raw: &[RawObservation],
    vintage: VintageId,
) -> Result<Vec<(i32, Vec<(IndustryCode, f64)>)>> {
    let descriptor = vintage.descriptor();
    let variables = descriptor
        .variables
        .as_ref()
        .ok_or_else(|| DecompError::invalid(format!("{vintage} does not report value added")))?;

    let mut crosswalk = Crosswalk::new(vintage);
    let mut sums: BTreeMap<i32, BTreeMap<IndustryCode, f64>> = BTreeMap::new();
    for row in raw {
        let year = row.period.year();
        if row.variable != variables.value_added || !descriptor.covers(year) {
            continue;
        }
        let Some(industry) = crosswalk.resolve_industry(&row.label)? else {
            continue;
        };
        *sums.entry(year).or_default().entry(industry).or_default() += row.value.unwrap_or(0.0);
    }

    Ok(sums
        .into_iter()
        .map(|(year, by_code)| {
            let (codes, values): (Vec<_>, Vec<_>) = by_code.into_iter().unzip();
            (year, codes.into_iter().zip(shares(&values)).collect())
        })
        .collect())
}
