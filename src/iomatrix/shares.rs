//! Cost- and revenue-share matrices over industries plus capital and labor.

use nalgebra::DMatrix;
use serde::Serialize;

use crate::domain::{CodeSet, IndustryCode, Node};
use crate::error::{DecompError, Result};
use crate::iomatrix::FlowTable;

/// Primary-factor payments and sales of one using industry, in panel units.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorInputs {
    pub industry: IndustryCode,
    pub capital_cost: f64,
    pub labor_cost: f64,
    pub gross_output: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareBasis {
    /// Divide by the user's total cost (intermediates + capital + labor).
    Cost,
    /// Divide by the user's nominal sales.
    Revenue,
}

/// A square share matrix, `values[(supplier, user)]`, over `nodes`.
#[derive(Debug, Clone, PartialEq)]
pub struct ShareMatrix {
    pub year: i32,
    pub basis: ShareBasis,
    pub nodes: Vec<Node>,
    pub values: DMatrix<f64>,
}

impl ShareMatrix {
    pub fn dim(&self) -> usize {
        self.nodes.len()
    }

    /// Number of real industries; they occupy the leading rows/columns.
    pub fn industry_count(&self) -> usize {
        self.nodes.len() - 2
    }

    pub fn position(&self, node: Node) -> Option<usize> {
        self.nodes.iter().position(|n| *n == node)
    }

    pub fn get(&self, supplier: Node, user: Node) -> f64 {
        match (self.position(supplier), self.position(user)) {
            (Some(s), Some(u)) => self.values[(s, u)],
            _ => 0.0,
        }
    }

    pub fn column_sum(&self, user: usize) -> f64 {
        self.values.column(user).sum()
    }
}

/// The two share matrices of one year.
#[derive(Debug, Clone, PartialEq)]
pub struct IoMatrices {
    pub year: i32,
    pub cost: ShareMatrix,
    pub revenue: ShareMatrix,
}

/// Build the cost- and revenue-share matrices for one year.
///
/// Every matrix spans the full node axis of `scheme`, so pairs without a
/// recorded flow are zero. The capital and labor supplier rows are overwritten
/// with each user's factor costs times `cost_scale` (the ratio of flow-table
/// units to panel units). Capital and labor never buy anything.
pub fn build_matrices(
    flows: &FlowTable,
    scheme: &CodeSet,
    factors: &[FactorInputs],
    cost_scale: f64,
) -> Result<IoMatrices> {
    let nodes = scheme.nodes();
    let n = nodes.len();
    let (capital, labor) = (n - 2, n - 1);
    let index = |code: IndustryCode| {
        scheme.index_of(code).ok_or_else(|| {
            DecompError::invalid(format!("{code} is not in {} ({})", scheme.name, flows.year))
        })
    };

    let mut nominal = DMatrix::<f64>::zeros(n, n);
    for (&(supplier, user), value) in &flows.flows {
        nominal[(index(supplier)?, index(user)?)] += value;
    }

    let mut sales = vec![None; n];
    for f in factors {
        let user = index(f.industry)?;
        nominal[(capital, user)] = f.capital_cost * cost_scale;
        nominal[(labor, user)] = f.labor_cost * cost_scale;
        sales[user] = f.gross_output.map(|g| g * cost_scale);
    }

    let mut cost = nominal.clone();
    for mut column in cost.column_iter_mut() {
        let total = column.sum();
        if total == 0.0 {
            column.fill(0.0);
        } else {
            column /= total;
        }
    }

    let mut revenue = nominal;
    for (user, mut column) in revenue.column_iter_mut().enumerate() {
        match sales[user] {
            Some(s) if s != 0.0 && user < capital => column /= s,
            _ => column.fill(0.0),
        }
    }

    Ok(IoMatrices {
        year: flows.year,
        cost: ShareMatrix {
            year: flows.year,
            basis: ShareBasis::Cost,
            nodes: nodes.clone(),
            values: cost,
        },
        revenue: ShareMatrix {
            year: flows.year,
            basis: ShareBasis::Revenue,
            nodes,
            values: revenue,
        },
    })
}
