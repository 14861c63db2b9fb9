//! Input-output matrix construction.
//!
//! Per vintage and year: raw flows (or make/use tables) are canonicalized and
//! summed to a supplier x user [`FlowTable`], zero-filled onto the full node
//! axis, augmented with capital and labor payments from the panel, and
//! normalized into cost- and revenue-share matrices.

pub mod flows;
pub mod make_use;
pub mod shares;

pub use flows::*;
pub use make_use::*;
pub use shares::*;

use log::{debug, info};
use rayon::prelude::*;

use crate::data::{RawIoTables, TableShape, VintageId};
use crate::error::{DecompError, Result};
use crate::panel::Panel;

/// Canonical flow tables of one IO vintage, one per year.
///
/// `technology` only matters for make/use vintages.
pub fn vintage_flows(
    tables: &RawIoTables,
    vintage: VintageId,
    technology: Technology,
) -> Result<Vec<FlowTable>> {
    match (tables, vintage.descriptor().shape) {
        (RawIoTables::Flows(raw), TableShape::Flows) => aggregate_flows(raw, vintage),
        (RawIoTables::MakeUse { make, uses }, TableShape::MakeUse) => {
            Ok(prepare_make_use(make, uses, vintage)?
                .iter()
                .map(|year| make_use_flows(year, technology))
                .collect())
        }
        (_, shape) => Err(DecompError::invalid(format!(
            "{vintage} expects {shape:?} tables"
        ))),
    }
}

/// Cost and revenue matrices for every year the vintage and the panel share.
pub fn vintage_matrices(
    tables: &RawIoTables,
    vintage: VintageId,
    technology: Technology,
    panel: &Panel,
    parallel: bool,
) -> Result<Vec<IoMatrices>> {
    let descriptor = vintage.descriptor();
    if descriptor.scheme.name != panel.scheme.name {
        return Err(DecompError::invalid(format!(
            "{vintage} uses {} but the panel uses {}",
            descriptor.scheme.name, panel.scheme.name
        )));
    }

    let (covered, uncovered): (Vec<FlowTable>, Vec<FlowTable>) =
        vintage_flows(tables, vintage, technology)?
            .into_iter()
            .partition(|f| panel.contains_year(f.year));
    if !uncovered.is_empty() {
        debug!(
            "{vintage}: {} flow years outside the panel skipped",
            uncovered.len()
        );
    }

    let build = |flows: &FlowTable| {
        build_matrices(
            flows,
            descriptor.scheme,
            &factor_inputs(panel, flows.year),
            descriptor.cost_scale,
        )
    };
    let matrices: Vec<IoMatrices> = if parallel {
        covered.par_iter().map(build).collect::<Result<_>>()?
    } else {
        covered.iter().map(build).collect::<Result<_>>()?
    };

    match (matrices.first(), matrices.last()) {
        (Some(first), Some(last)) => info!(
            "{vintage}: built {} share matrices ({}-{}, {technology:?} technology)",
            matrices.len(),
            first.year,
            last.year
        ),
        _ => info!("{vintage}: no share matrices inside the panel years"),
    }
    Ok(matrices)
}

/// Factor payments and sales of every industry observed in `year`.
pub fn factor_inputs(panel: &Panel, year: i32) -> Vec<FactorInputs> {
    panel
        .rows_for(year)
        .iter()
        .map(|r| FactorInputs {
            industry: r.industry(),
            capital_cost: r.obs.capital_cost,
            labor_cost: r.obs.labor_cost,
            gross_output: r.obs.gross_output,
        })
        .collect()
}
