//! Growth-accounting decomposition.
//!
//! Two independent passes over a [`Panel`](crate::panel::Panel):
//!
//! - [`labor_productivity`]: aggregate `d ln A`, `d ln K`, `d ln L`, output
//!   growth and the split of labor productivity growth into TFP and capital
//!   deepening contributions
//! - [`decompose_tfp`]: within / Baumol / capital and labor reallocation terms
//!   for one subperiod
//!
//! Every identity is checked against [`IDENTITY_TOLERANCE`]; a violation
//! aborts with [`DecompError::IdentityViolation`].

pub mod labor;
pub mod tfp;

pub use labor::*;
pub use tfp::*;

use crate::error::{DecompError, Result};

/// Maximum absolute residual of any accounting identity.
pub const IDENTITY_TOLERANCE: f64 = 1e-10;

/// Maximum deviation of a year's Tornqvist shares from summing to one.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Tracks the largest residual of one identity across years.
#[derive(Debug, Clone, Copy)]
pub(crate) struct IdentityCheck {
    pub identity: &'static str,
    pub max_residual: f64,
}

impl IdentityCheck {
    pub fn new(identity: &'static str) -> Self {
        Self {
            identity,
            max_residual: 0.0,
        }
    }

    pub fn check(&mut self, year: i32, lhs: f64, rhs: f64) -> Result<()> {
        let residual = (lhs - rhs).abs();
        if !(residual < IDENTITY_TOLERANCE) {
            return Err(DecompError::IdentityViolation {
                identity: self.identity,
                year,
                residual,
            });
        }
        self.max_residual = self.max_residual.max(residual);
        Ok(())
    }
}
