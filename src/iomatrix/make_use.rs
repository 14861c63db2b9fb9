//! Make/use tables -> supplier x user flows.
//!
//! Older vintages publish an output (make) table `V` and an input (use) table
//! `U`, both commodity x industry. An industry x industry flow matrix is
//! recovered as `Z = B' U`, where `B` spreads each commodity over the
//! industries producing it:
//!
//! - industry technology: `B[c, i] = V[c, i] / g_i` (industry output totals)
//! - commodity technology: `B[c, i] = V[c, i] / q_c` (commodity output totals)
//!
//! Zero totals give zero `B` entries. The two estimators are kept apart;
//! a vintage chooses one per run.

use std::collections::{BTreeMap, BTreeSet};

use log::debug;
use nalgebra::DMatrix;
use serde::{Deserialize, Serialize};

use crate::crosswalk::{Crosswalk, Mapping};
use crate::data::{FictiveTreatment, MakeUseRules, RawMakeUseCell, VintageId};
use crate::domain::IndustryCode;
use crate::error::{DecompError, Result};
use crate::iomatrix::FlowTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Technology {
    Industry,
    Commodity,
}

/// One year of preprocessed make and use tables over canonical industries.
#[derive(Debug, Clone, PartialEq)]
pub struct MakeUseYear {
    pub year: i32,
    /// Column labels: every canonical code, in order.
    pub industries: Vec<IndustryCode>,
    /// Row labels, sorted.
    pub commodities: Vec<String>,
    /// `V`, commodity x industry.
    pub make: DMatrix<f64>,
    /// `U`, commodity x industry.
    pub uses: DMatrix<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Producer {
    Real(IndustryCode),
    Fictive(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Make,
    Use,
}

/// `year -> (producer, commodity) -> value`
type Cells = BTreeMap<i32, BTreeMap<(Producer, String), f64>>;

/// Canonicalize and clean a vintage's make and use tables.
///
/// Applies, in order: commodity drops, use-side commodity recodes, industry
/// aggregation (summing), the vintage's fictive-industry rules, and the
/// commodity alignment rule.
pub fn prepare_make_use(
    make: &[RawMakeUseCell],
    uses: &[RawMakeUseCell],
    vintage: VintageId,
) -> Result<Vec<MakeUseYear>> {
    let descriptor = vintage.descriptor();
    let rules = descriptor
        .make_use
        .as_ref()
        .ok_or_else(|| DecompError::invalid(format!("{vintage} has no make/use tables")))?;

    let mut crosswalk = Crosswalk::new(vintage);
    let mut v = load(make, Side::Make, rules, &mut crosswalk)?;
    let mut u = load(uses, Side::Use, rules, &mut crosswalk)?;
    debug!(
        "{vintage}: {} make/use industry labels dropped",
        crosswalk.dropped().len()
    );

    for rule in rules.fictive {
        match rule.treatment {
            FictiveTreatment::Remove => {
                remove_producer(&mut v, Producer::Fictive(rule.label));
                remove_producer(&mut u, Producer::Fictive(rule.label));
            }
            FictiveTreatment::Reallocate => reallocate(&mut v, &mut u, rule.label, vintage)?,
        }
    }
    for cells in [&v, &u] {
        if let Some((producer, _)) = cells
            .values()
            .flat_map(|m| m.keys())
            .find(|(p, _)| matches!(p, Producer::Fictive(_)))
        {
            return Err(DecompError::invalid(format!(
                "{vintage}: {producer:?} has no treatment rule"
            )));
        }
    }

    if rules.drop_unmatched_commodities {
        let in_make = commodities(&v);
        let in_use = commodities(&u);
        let common: BTreeSet<String> = in_make.intersection(&in_use).cloned().collect();
        debug!(
            "{vintage}: dropping {} commodities present in only one table",
            in_make.union(&in_use).count() - common.len()
        );
        for cells in [&mut v, &mut u] {
            for year_cells in cells.values_mut() {
                year_cells.retain(|(_, c), _| common.contains(c));
            }
        }
    }

    let industries: Vec<IndustryCode> = descriptor.scheme.codes().collect();
    let years: BTreeSet<i32> = v.keys().chain(u.keys()).copied().collect();
    let empty = BTreeMap::new();

    Ok(years
        .into_iter()
        .map(|year| {
            let make_cells = v.get(&year).unwrap_or(&empty);
            let use_cells = u.get(&year).unwrap_or(&empty);
            let commodities: Vec<String> = make_cells
                .keys()
                .chain(use_cells.keys())
                .map(|(_, c)| c.clone())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            MakeUseYear {
                year,
                make: dense(make_cells, &commodities, &industries),
                uses: dense(use_cells, &commodities, &industries),
                industries: industries.clone(),
                commodities,
            }
        })
        .collect())
}

/// Industry x industry flows `Z = B' U` under the chosen technology.
pub fn make_use_flows(table: &MakeUseYear, technology: Technology) -> FlowTable {
    let v = &table.make;
    let mut b = v.clone();
    match technology {
        Technology::Industry => {
            for (j, mut col) in b.column_iter_mut().enumerate() {
                let g = v.column(j).sum();
                col.apply(|x| *x = if g == 0.0 { 0.0 } else { *x / g });
            }
        }
        Technology::Commodity => {
            for (i, mut row) in b.row_iter_mut().enumerate() {
                let q = v.row(i).sum();
                row.apply(|x| *x = if q == 0.0 { 0.0 } else { *x / q });
            }
        }
    }
    let z = b.transpose() * &table.uses;

    let mut flows = FlowTable::new(table.year);
    for (s, supplier) in table.industries.iter().enumerate() {
        for (u, user) in table.industries.iter().enumerate() {
            let value = z[(s, u)];
            if value != 0.0 {
                flows.add(*supplier, *user, value);
            }
        }
    }
    flows
}

fn load(
    raw: &[RawMakeUseCell],
    side: Side,
    rules: &MakeUseRules,
    crosswalk: &mut Crosswalk,
) -> Result<Cells> {
    let descriptor = crosswalk.vintage().descriptor();
    let mut cells = Cells::new();
    for cell in raw {
        if !descriptor.covers(cell.year) {
            continue;
        }
        let mut commodity = cell.commodity.trim();
        if rules.drop_commodities.iter().any(|d| *d == commodity) {
            continue;
        }
        if side == Side::Use {
            if let Some((_, to)) = rules.use_recodes.iter().find(|(from, _)| *from == commodity) {
                commodity = *to;
            }
        }
        let producer = match crosswalk.resolve(&cell.industry)? {
            Mapping::Industry(code) => Producer::Real(code),
            Mapping::Fictive(label) => Producer::Fictive(label),
            Mapping::Dropped(_) => continue,
        };
        *cells
            .entry(cell.year)
            .or_default()
            .entry((producer, commodity.to_string()))
            .or_default() += cell.value.unwrap_or(0.0);
    }
    Ok(cells)
}

fn remove_producer(cells: &mut Cells, producer: Producer) {
    for year_cells in cells.values_mut() {
        year_cells.retain(|(p, _), _| *p != producer);
    }
}

/// Route every purchase of a fictive industry's output through its inputs.
///
/// The output commodity is the one the fictive industry produces most of over
/// the whole table. Each purchase of it is removed and re-booked across the
/// fictive industry's other inputs, in proportion to that year's input mix.
/// Unlike the published rule, re-booked value may open new buyer cells and
/// total intermediate use is conserved.
fn reallocate(v: &mut Cells, u: &mut Cells, label: &'static str, vintage: VintageId) -> Result<()> {
    let fictive = Producer::Fictive(label);

    let mut produced: BTreeMap<&str, f64> = BTreeMap::new();
    for ((p, c), value) in v.values().flat_map(|m| m.iter()) {
        if *p == fictive {
            *produced.entry(c.as_str()).or_default() += value;
        }
    }
    let Some(output) = produced
        .iter()
        .fold(None::<(&str, f64)>, |best, (c, x)| match best {
            Some((_, bx)) if bx >= *x => best,
            _ => Some((*c, *x)),
        })
        .map(|(c, _)| c.to_string())
    else {
        if u.values().flat_map(|m| m.keys()).any(|(p, _)| *p == fictive) {
            return Err(DecompError::invalid(format!(
                "{vintage}: fictive industry {label} buys inputs but produces nothing"
            )));
        }
        debug!("{vintage}: fictive industry {label} absent");
        return Ok(());
    };

    remove_producer(v, fictive);

    for (year, year_cells) in u.iter_mut() {
        let inputs: Vec<(String, f64)> = year_cells
            .iter()
            .filter(|((p, c), _)| *p == fictive && *c != output)
            .map(|((_, c), x)| (c.clone(), *x))
            .collect();
        let total: f64 = inputs.iter().map(|(_, x)| x).sum();

        year_cells.retain(|(p, _), _| *p != fictive);
        let purchases: Vec<(Producer, f64)> = year_cells
            .iter()
            .filter(|((_, c), _)| *c == output)
            .map(|((p, _), x)| (*p, *x))
            .collect();
        year_cells.retain(|(_, c), _| *c != output);

        if total == 0.0 {
            debug!("{vintage}: {label} has no inputs in {year}; its output purchases are dropped");
            continue;
        }
        for (buyer, amount) in purchases {
            for (commodity, x) in &inputs {
                *year_cells.entry((buyer, commodity.clone())).or_default() += amount * x / total;
            }
        }
    }
    debug!("{vintage}: reallocated fictive industry {label} (output '{output}')");
    Ok(())
}

fn commodities(cells: &Cells) -> BTreeSet<String> {
    cells
        .values()
        .flat_map(|m| m.keys().map(|(_, c)| c.clone()))
        .collect()
}

fn dense(
    cells: &BTreeMap<(Producer, String), f64>,
    commodities: &[String],
    industries: &[IndustryCode],
) -> DMatrix<f64> {
    let mut m = DMatrix::zeros(commodities.len(), industries.len());
    for ((producer, commodity), value) in cells {
        let Producer::Real(code) = producer else {
            continue;
        };
        let (Ok(row), Ok(col)) = (
            commodities.binary_search(commodity),
            industries.binary_search(code),
        ) else {
            continue;
        };
        m[(row, col)] += value;
    }
    m
}
