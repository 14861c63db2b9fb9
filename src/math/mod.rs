//! Numeric utilities: Tornqvist weighting and dense linear solves.

pub mod linalg;
pub mod tornqvist;

pub use linalg::*;
pub use tornqvist::*;
