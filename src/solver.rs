use crate::error::LpError;
use crate::problem::{ConstraintId, Problem, VariableId};

use std::collections::HashMap;

pub type LpResult = Result<SolverResult, LpError>;

/// A linear programming engine.
///
/// Implementations minimize the objective of the given problem. The duals of an
/// optimal [`Solution`] follow one fixed sign convention: the dual of a constraint is
/// the shadow price `∂(optimal objective) / ∂(constraint rhs)`. At an optimum, `≤`
/// constraints therefore have non-positive duals, `≥` constraints non-negative duals
/// and `=` constraints duals of either sign. Every constraint of the problem receives
/// a dual.
pub trait LpSolver {
    fn solve(&self, prob: &Problem) -> LpResult;
}

impl<S: LpSolver + ?Sized> LpSolver for &S {
    fn solve(&self, prob: &Problem) -> LpResult {
        (**self).solve(prob)
    }
}

#[derive(Debug, Clone)]
pub enum SolverResult {
    Optimal(Solution),
    Infeasible,
    Unbounded,
    MaxIter { obj: f64 },
}

#[derive(Debug, Clone)]
pub struct Solution {
    x: Vec<f64>,
    obj: f64,
    duals: HashMap<ConstraintId, f64>,
}

impl Solution {
    pub fn new(x: Vec<f64>, obj: f64, duals: HashMap<ConstraintId, f64>) -> Self {
        Self { x, obj, duals }
    }

    pub fn obj(&self) -> f64 {
        self.obj
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn value(&self, var: VariableId) -> Option<f64> {
        self.x.get(usize::from(var)).copied()
    }

    pub fn dual(&self, constraint: ConstraintId) -> Option<f64> {
        self.duals.get(&constraint).copied()
    }

    pub fn duals(&self) -> &HashMap<ConstraintId, f64> {
        &self.duals
    }
}
