//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - canonical industry codes and matrix nodes (`IndustryCode`, `Node`, `CodeSet`)
//! - immutable input/output records (`IndustryObservation`, `YearlyAggregate`, ...)
//! - run configuration (`RunConfig`)

pub mod codes;
pub mod config;
pub mod types;

pub use codes::*;
pub use config::*;
pub use types::*;
