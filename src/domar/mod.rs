//! Domar weights from the Leontief system.
//!
//! With the cost-share matrix `Omega` stored supplier x user, total output
//! weights solve
//!
//! ```text
//! (I - Omega) lambda = b
//! ```
//!
//! where `b` holds value-added shares over real industries (summing to one)
//! and zeros for capital and labor. The capital and labor entries of `lambda`
//! are the aggregate factor weights `lambda_k`, `lambda_l`.

pub mod smooth;

pub use smooth::*;

use log::info;
use nalgebra::DVector;
use rayon::prelude::*;

use crate::domain::{DomarWeightVector, IndustryCode, Node};
use crate::error::{DecompError, Result};
use crate::iomatrix::{IoMatrices, ShareMatrix};
use crate::math::{identity_minus, solve_dense};

/// Solve for one year's Domar weights.
///
/// `va_shares` are normalized over real industries before the solve;
/// industries missing from it get a zero value-added share. The returned
/// vector carries no wedge; see [`domar_weights`].
pub fn solve_domar_weights(
    cost: &ShareMatrix,
    va_shares: &[(IndustryCode, f64)],
) -> Result<DomarWeightVector> {
    let year = cost.year;
    let n = cost.dim();
    let k = cost.industry_count();

    if let Some(idle) = (0..k).find(|&user| cost.column_sum(user) == 0.0) {
        return Err(DecompError::SingularIoMatrix {
            year,
            reason: format!("{} has no recorded inputs", cost.nodes[idle]),
        });
    }

    let total: f64 = va_shares.iter().map(|(_, s)| s).sum();
    if !(total.is_finite() && total > 0.0) {
        return Err(DecompError::invalid(format!(
            "value-added shares for {year} sum to {total}"
        )));
    }
    let mut b = DVector::<f64>::zeros(n);
    for &(code, share) in va_shares {
        let idx = cost.position(Node::Industry(code)).ok_or_else(|| {
            DecompError::invalid(format!("{code} is not on the {year} matrix axis"))
        })?;
        b[idx] += share / total;
    }

    let lambda = solve_dense(&identity_minus(&cost.values), &b).ok_or_else(|| {
        DecompError::SingularIoMatrix {
            year,
            reason: "LU solve failed or produced non-finite weights".to_string(),
        }
    })?;

    Ok(DomarWeightVector {
        year,
        industries: cost.nodes[..k]
            .iter()
            .zip(lambda.iter())
            .filter_map(|(node, w)| node.industry().map(|code| (code, *w)))
            .collect(),
        capital: lambda[k],
        labor: lambda[k + 1],
        wedge: Vec::new(),
    })
}

/// Cost/revenue input-share alignment per industry.
///
/// For user column `i` over the real-industry block:
/// `sum_s cost[s,i] * rev[s,i] / sum_s rev[s,i]^2`, or `None` when the
/// industry has no revenue-based intermediate shares.
pub fn allocative_wedge(
    cost: &ShareMatrix,
    revenue: &ShareMatrix,
) -> Vec<(IndustryCode, Option<f64>)> {
    let k = cost.industry_count();
    let block_cost = cost.values.view((0, 0), (k, k));
    let block_rev = revenue.values.view((0, 0), (k, k));

    cost.nodes[..k]
        .iter()
        .enumerate()
        .filter_map(|(i, node)| {
            let code = node.industry()?;
            let rev = block_rev.column(i);
            let denominator = rev.dot(&rev);
            let wedge = (denominator != 0.0).then(|| block_cost.column(i).dot(&rev) / denominator);
            Some((code, wedge))
        })
        .collect()
}

/// Domar weights plus the allocative wedge for one year.
pub fn domar_weights(
    matrices: &IoMatrices,
    va_shares: &[(IndustryCode, f64)],
) -> Result<DomarWeightVector> {
    let mut weights = solve_domar_weights(&matrices.cost, va_shares)?;
    weights.wedge = allocative_wedge(&matrices.cost, &matrices.revenue);
    Ok(weights)
}

/// Solve every year of a vintage, in year order.
///
/// `va_shares(year)` supplies the value-added share vector for that year.
pub fn solve_years<F>(
    matrices: &[IoMatrices],
    va_shares: F,
    parallel: bool,
) -> Result<Vec<DomarWeightVector>>
where
    F: Fn(i32) -> Vec<(IndustryCode, f64)> + Sync,
{
    let solve = |m: &IoMatrices| domar_weights(m, &va_shares(m.year));
    let weights: Vec<DomarWeightVector> = if parallel {
        matrices.par_iter().map(solve).collect::<Result<_>>()?
    } else {
        matrices.iter().map(solve).collect::<Result<_>>()?
    };
    if let (Some(first), Some(last)) = (weights.first(), weights.last()) {
        info!(
            "Domar weights solved for {}-{}: lambda_k + lambda_l = {:.4} in {}",
            first.year,
            last.year,
            last.capital + last.labor,
            last.year
        );
    }
    Ok(weights)
}
