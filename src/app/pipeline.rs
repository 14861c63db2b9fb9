//! The decomposition pipeline shared by every front-end.
//!
//! raw accounts -> panel -> Pass 1
//! raw IO tables (per vintage) -> share matrices -> Domar weights
//! -> stitch across vintages -> smooth -> Pass 2 per subperiod -> summaries

use log::info;

use crate::data::{RawIoTables, RawObservation, VintageId};
use crate::decompose::{decompose_tfp, labor_productivity};
use crate::domain::{DecompositionSeries, DomarWeightVector, RunConfig, YearlyAggregate};
use crate::domar::{DomarSeries, solve_years};
use crate::error::Result;
use crate::iomatrix::{Technology, vintage_matrices};
use crate::panel::{Panel, build_panel};
use crate::report::{PeriodSummary, summarize};
use crate::stitch::{Stitched, VintagePart, stitch};

/// Raw tables of one IO vintage and the estimator used for make/use tables.
#[derive(Debug, Clone)]
pub struct IoVintageInput {
    pub vintage: VintageId,
    pub technology: Technology,
    pub tables: RawIoTables,
}

/// Everything the retrieval layer supplies for one run.
#[derive(Debug, Clone)]
pub struct PipelineInputs {
    pub accounts_vintage: VintageId,
    pub accounts: Vec<RawObservation>,
    /// May be empty for a two-term run.
    pub io: Vec<IoVintageInput>,
}

/// All computed outputs of a single run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub panel: Panel,
    pub aggregates: Vec<YearlyAggregate>,
    /// Unsmoothed weights with the vintage that supplied each year.
    pub domar_raw: Stitched<DomarWeightVector>,
    pub domar: DomarSeries,
    pub decompositions: Vec<DecompositionSeries>,
    pub summaries: Vec<PeriodSummary>,
}

pub fn run_pipeline(inputs: &PipelineInputs, config: &RunConfig) -> Result<RunOutput> {
    // 1) Panel and labor productivity pass.
    let panel = build_panel(&inputs.accounts, inputs.accounts_vintage)?;
    let aggregates = labor_productivity(&panel)?;

    // 2) Domar weights per IO vintage.
    let mut parts = Vec::with_capacity(inputs.io.len());
    for io in &inputs.io {
        let matrices = vintage_matrices(
            &io.tables,
            io.vintage,
            io.technology,
            &panel,
            config.parallel,
        )?;
        let weights = solve_years(&matrices, |year| panel.va_shares(year), config.parallel)?;
        parts.push(VintagePart::new(io.vintage, weights));
    }

    // 3) One continuous series, smoothed after inversion.
    let domar_raw = stitch(parts)?;
    let domar = DomarSeries::smoothed(&domar_raw.items);
    info!(
        "{} years of Domar weights from {} IO vintages, {} after smoothing",
        domar_raw.items.len(),
        inputs.io.len(),
        domar.len()
    );

    // 4) TFP decomposition per subperiod.
    let domar_ref = (!inputs.io.is_empty()).then_some(&domar);
    let decompositions = config
        .subperiods
        .iter()
        .map(|&subperiod| decompose_tfp(&panel, subperiod, config.mode, &aggregates, domar_ref))
        .collect::<Result<Vec<_>>>()?;

    let summaries = decompositions
        .iter()
        .map(|series| summarize(&aggregates, series))
        .collect();

    Ok(RunOutput {
        panel,
        aggregates,
        domar_raw,
        domar,
        decompositions,
        summaries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{RawFlow, Target};
    use crate::domain::{CANADA_BUSINESS_SECTOR, DecompositionMode, IndustryCode, Subperiod};
    use crate::error::DecompError;

    const VARIABLES: [&str; 7] = [
        "Multifactor productivity based on value-added",
        "Capital input",
        "Labour input",
        "Gross domestic product (GDP)",
        "Capital cost",
        "Labour compensation",
        "Gross output",
    ];

    /// First raw label of `vintage` that maps to `code`.
    fn label_for(vintage: VintageId, code: IndustryCode) -> Option<&'static str> {
        vintage
            .descriptor()
            .crosswalk
            .table
            .iter()
            .find(|(_, t)| matches!(t, Target::Industry(c) if *c == code.as_str()))
            .map(|(label, _)| *label)
    }

    fn bs_code(code: IndustryCode) -> String {
        let key = label_for(VintageId::CanSymmetric2010, code).unwrap_or(code.as_str());
        format!("BS{key}000")
    }

    fn accounts() -> Vec<RawObservation> {
        let mut raw = Vec::new();
        for (i, code) in CANADA_BUSINESS_SECTOR.codes().enumerate() {
            let label = label_for(VintageId::CanProductivity, code).unwrap();
            let i = i as f64;
            for year in 2009..=2012 {
                let t = f64::from(year - 2009);
                let va = 50.0 + i + 3.0 * t * (i % 4.0);
                let values = [
                    100.0 * (0.01 * (i % 5.0) * t).exp(),
                    100.0 * (0.02 * t).exp(),
                    100.0 * (0.005 * (i % 3.0) * t).exp(),
                    va,
                    (0.25 + 0.01 * (i % 7.0)) * va,
                    (0.75 - 0.01 * (i % 7.0)) * va,
                    2.0 * va,
                ];
                for (variable, value) in VARIABLES.iter().zip(values) {
                    raw.push(RawObservation::new(label, year, *variable, value));
                }
            }
        }
        raw
    }

    fn flows(years: std::ops::RangeInclusive<i32>) -> RawIoTables {
        let codes: Vec<String> = CANADA_BUSINESS_SECTOR.codes().map(bs_code).collect();
        let mut out = Vec::new();
        for year in years {
            for (s, supplier) in codes.iter().enumerate() {
                for (u, user) in codes.iter().enumerate() {
                    let value = 200.0 * (1 + (s + u + year as usize) % 5) as f64;
                    out.push(RawFlow::new(supplier.as_str(), user.as_str(), year, value));
                }
            }
        }
        RawIoTables::Flows(out)
    }

    fn inputs(io: bool) -> PipelineInputs {
        PipelineInputs {
            accounts_vintage: VintageId::CanProductivity,
            accounts: accounts(),
            io: if io {
                vec![
                    IoVintageInput {
                        vintage: VintageId::CanSymmetric2010,
                        technology: Technology::Industry,
                        tables: flows(2010..=2012),
                    },
                    IoVintageInput {
                        vintage: VintageId::CanSymmetric2009,
                        technology: Technology::Industry,
                        tables: flows(2009..=2009),
                    },
                ]
            } else {
                Vec::new()
            },
        }
    }

    #[test]
    fn full_run_with_reallocation_terms() {
        let config = RunConfig {
            subperiods: vec![Subperiod::new(2010, 2012)],
            mode: DecompositionMode::Reallocation,
            parallel: true,
        };
        let out = crate::app::run(&inputs(true), &config).unwrap();

        assert_eq!(out.panel.years(), &[2009, 2010, 2011, 2012]);
        assert_eq!(out.aggregates.len(), 4);
        assert_eq!(out.domar_raw.source(2009), Some(VintageId::CanSymmetric2009));
        assert_eq!(out.domar_raw.source(2012), Some(VintageId::CanSymmetric2010));
        assert_eq!(out.domar.len(), 3);

        let series = &out.decompositions[0];
        assert_eq!(series.rows.len(), 3);
        for row in &series.rows[1..] {
            let a = out.aggregates.iter().find(|a| a.year == row.year).unwrap();
            assert!((row.tfp() - a.dln_a).abs() < 1e-10);
            assert!(row.capital_reallocation.is_finite());
        }
        let w = out.domar.get(2011).unwrap();
        assert!((w.capital + w.labor - 1.0).abs() < 1e-9);
        assert!(w.industry_sum() > 1.0);
        assert_eq!(out.summaries.len(), 1);
    }

    #[test]
    fn two_term_run_needs_no_io_tables() {
        let config = RunConfig {
            subperiods: vec![Subperiod::new(2010, 2012)],
            mode: DecompositionMode::TwoTerm,
            parallel: false,
        };
        let out = crate::app::run(&inputs(false), &config).unwrap();
        assert!(out.domar.is_empty());
        assert_eq!(out.decompositions[0].rows.len(), 3);

        let realloc = RunConfig {
            mode: DecompositionMode::Reallocation,
            ..config
        };
        let err = crate::app::run(&inputs(false), &realloc).unwrap_err();
        assert!(matches!(err, DecompError::InvalidInput(_)));
    }

    #[test]
    fn invalid_config_is_rejected_before_any_work() {
        let config = RunConfig {
            subperiods: Vec::new(),
            ..RunConfig::default()
        };
        let err = crate::app::run(&inputs(false), &config).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
