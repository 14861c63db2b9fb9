//! Dense linear solves for the Leontief system.
//!
//! The systems here are square and small (about 40 x 40, one per year), so a
//! partial-pivoting LU factorization is both exact enough and cheap. Singular
//! systems are reported as `None`; callers attach the year and turn that into
//! a domain error.

use nalgebra::{DMatrix, DVector};

/// Solve `a x = b` by LU decomposition.
///
/// Returns `None` when `a` is singular or the solution is not finite.
pub fn solve_dense(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    if !a.is_square() || a.nrows() != b.len() {
        return None;
    }
    let x = a.clone().lu().solve(b)?;
    if x.iter().all(|v| v.is_finite()) {
        Some(x)
    } else {
        None
    }
}

/// `I - m` for a square matrix.
pub fn identity_minus(m: &DMatrix<f64>) -> DMatrix<f64> {
    DMatrix::identity(m.nrows(), m.ncols()) - m
}
