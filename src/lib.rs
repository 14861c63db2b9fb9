//! `tfp-decomp` library crate.
//!
//! Input-output-weighted decomposition of aggregate TFP and labor
//! productivity growth across historical vintages of industry accounts.
//! Data retrieval and presentation live outside this crate; [`app::run`] is
//! the entry point a front-end wraps, so that:
//!
//! - core logic is testable without spawning processes
//! - the pipeline stages stay usable on their own (notebooks, batch jobs)

pub mod app;
pub mod crosswalk;
pub mod data;
pub mod decompose;
pub mod domain;
pub mod domar;
pub mod error;
pub mod iomatrix;
pub mod math;
pub mod panel;
pub mod report;
pub mod stitch;
