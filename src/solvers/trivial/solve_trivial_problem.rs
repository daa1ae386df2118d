use crate::solver::{Solution, SolverResult};
use crate::standard_form::StandardForm;
use crate::util::EPS;

use log::info;

use std::collections::HashMap;

/// Solves a standard form without rows: every column sits at its lower bound of zero
/// unless a negative cost makes the problem unbounded.
pub fn solve_trivial_problem(std_form: &StandardForm) -> SolverResult {
    debug_assert_eq!(std_form.rows(), 0);

    if let Some(j) = std_form.c.iter().position(|&c_j| c_j < -EPS) {
        info!("column {} has negative cost and no constraints, problem is unbounded", j);
        return SolverResult::Unbounded;
    }

    let x = nalgebra::DVector::zeros(std_form.cols());
    let obj = std_form.obj(&x);

    info!("found optimal point with objective value {}", obj);

    SolverResult::Optimal(Solution::new(
        std_form.original_x(&x),
        obj,
        HashMap::new(),
    ))
}
