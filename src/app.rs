//! Top-level orchestration.
//!
//! This module is the "real main" for any front-end (CLI, notebook bridge,
//! batch job). Front-ends load raw tables and a [`RunConfig`], call [`run`],
//! and render or export the returned [`RunOutput`]:
//!
//! - build the productivity panel
//! - labor productivity pass
//! - per-vintage IO matrices and Domar weights, stitched and smoothed
//! - TFP decomposition for every configured subperiod
//! - annualized summaries

use crate::domain::RunConfig;
use crate::error::Result;

pub mod pipeline;

pub use pipeline::{IoVintageInput, PipelineInputs, RunOutput};

/// Run the full decomposition. Any error aborts the whole run.
pub fn run(inputs: &PipelineInputs, config: &RunConfig) -> Result<RunOutput> {
    config.validate()?;
    pipeline::run_pipeline(inputs, config)
}
