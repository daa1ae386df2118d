pub mod config;
pub mod convergence;
pub mod cuts;
pub mod data;
pub mod dual_transform;
pub mod lshaped_solver;
pub mod master;
pub mod report;
pub mod subproblem;

use crate::error::FailureKind;

/// Rejects values that are non-finite or larger in magnitude than `limit`.
pub(crate) fn check_magnitude(quantity: &str, value: f64, limit: f64) -> Result<(), FailureKind> {
    if value.is_finite() && value.abs() <= limit {
        Ok(())
    } else {
        Err(FailureKind::NumericalInstability {
            quantity: quantity.to_string(),
            value,
        })
    }
}
