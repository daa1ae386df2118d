use super::check_magnitude;
use super::data::{FirstStageDecision, Recourse, Scenario};
use crate::error::FailureKind;
use crate::problem::{Bound, ConstraintId, ConstraintOp, Problem, VariableId};
use crate::solver::{LpSolver, Solution, SolverResult};
use crate::util::EPS;

use log::{debug, trace};

use std::collections::BTreeMap;

/// Index of a row of the recourse matrix.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecourseRow(pub usize);

/// Duals of the recourse rows, keyed by row.
pub type RowDuals = BTreeMap<RecourseRow, f64>;

/// Optimal solution of one scenario's recourse problem at a fixed first-stage decision.
#[derive(Debug, Clone, PartialEq)]
pub struct SubproblemResult {
    pub scenario: usize,
    pub objective: f64,
    pub recourse: Vec<f64>,
    pub duals: RowDuals,
}

/// Builds and solves the recourse problems `min q·y  s.t.  W y op (h - T x), y ≥ 0`.
pub struct SubproblemEngine<'a, S: LpSolver> {
    solver: &'a S,
    recourse: &'a Recourse,
    numeric_limit: f64,
}

impl<'a, S: LpSolver> SubproblemEngine<'a, S> {
    pub fn new(solver: &'a S, recourse: &'a Recourse, numeric_limit: f64) -> Self {
        Self {
            solver,
            recourse,
            numeric_limit,
        }
    }

    /// Solves the recourse problem of `scenario` at `decision`.
    ///
    /// An infeasible recourse problem is reported as `FeasibilityCutRequired`, an
    /// unbounded one as `SolverUnbounded`.
    pub fn solve(
        &self,
        decision: &FirstStageDecision,
        index: usize,
        scenario: &Scenario,
    ) -> Result<SubproblemResult, FailureKind> {
        let rhs = self.rhs(decision, scenario)?;

        let mut prob = Problem::new();

        let y: Vec<VariableId> = scenario
            .costs
            .iter()
            .map(|&q_j| prob.add_var(q_j, Bound::Lower(0.), None))
            .collect::<Result<_, _>>()?;

        let mut rows = Vec::with_capacity(self.recourse.rows());

        for (i, &op) in self.recourse.ops.iter().enumerate() {
            let coeffs = self.row_coeffs(i, &y);
            rows.push(prob.add_constraint(coeffs, op, rhs[i])?);
        }

        trace!("recourse problem of scenario {}:\n{}", index, prob);

        let sol = match self.solver.solve(&prob)? {
            SolverResult::Optimal(sol) => sol,
            SolverResult::Infeasible => {
                return Err(FailureKind::FeasibilityCutRequired { scenario: index })
            }
            SolverResult::Unbounded => {
                return Err(FailureKind::SolverUnbounded {
                    scenario: Some(index),
                })
            }
            SolverResult::MaxIter { .. } => return Err(FailureKind::SolverIterationLimit),
        };

        check_magnitude(
            &format!("objective of scenario {}", index),
            sol.obj(),
            self.numeric_limit,
        )?;

        let duals = self.row_duals(&sol, &rows, index)?;

        debug!(
            "scenario {}: recourse objective {}, duals {:?}",
            index,
            sol.obj(),
            duals.values().collect::<Vec<_>>()
        );

        Ok(SubproblemResult {
            scenario: index,
            objective: sol.obj(),
            recourse: sol.x().to_vec(),
            duals,
        })
    }

    /// Duals of the recourse rows in the problem of minimal constraint violation
    ///
    /// `min Σ v  s.t.  W y - v ≤ r,  W y + v ≥ r,  W y + v⁺ - v⁻ = r,  y, v ≥ 0`
    ///
    /// with `r = h - T x`. They define a feasibility cut for a decision at which the
    /// recourse problem of `scenario` is infeasible.
    pub fn solve_feasibility(
        &self,
        decision: &FirstStageDecision,
        index: usize,
        scenario: &Scenario,
    ) -> Result<RowDuals, FailureKind> {
        let rhs = self.rhs(decision, scenario)?;

        let mut prob = Problem::new();

        let y: Vec<VariableId> = (0..self.recourse.num_vars())
            .map(|_| prob.add_var(0., Bound::Lower(0.), None))
            .collect::<Result<_, _>>()?;

        let mut rows = Vec::with_capacity(self.recourse.rows());

        for (i, &op) in self.recourse.ops.iter().enumerate() {
            let mut coeffs = self.row_coeffs(i, &y);

            match op {
                ConstraintOp::Lte => {
                    coeffs.push((prob.add_var(1., Bound::Lower(0.), None)?, -1.));
                }

                ConstraintOp::Gte => {
                    coeffs.push((prob.add_var(1., Bound::Lower(0.), None)?, 1.));
                }

                ConstraintOp::Eq => {
                    coeffs.push((prob.add_var(1., Bound::Lower(0.), None)?, 1.));
                    coeffs.push((prob.add_var(1., Bound::Lower(0.), None)?, -1.));
                }
            }

            rows.push(prob.add_constraint(coeffs, op, rhs[i])?);
        }

        let sol = match self.solver.solve(&prob)? {
            SolverResult::Optimal(sol) => sol,

            //y = 0 with v = |r| is always feasible and the objective is bounded below by zero
            SolverResult::Infeasible => {
                return Err(FailureKind::SolverInfeasible { scenario: index })
            }
            SolverResult::Unbounded => {
                return Err(FailureKind::SolverUnbounded {
                    scenario: Some(index),
                })
            }
            SolverResult::MaxIter { .. } => return Err(FailureKind::SolverIterationLimit),
        };

        if sol.obj().is_nan() || sol.obj() <= EPS {
            return Err(FailureKind::NumericalInstability {
                quantity: format!("infeasibility of scenario {}", index),
                value: sol.obj(),
            });
        }

        debug!("scenario {}: total violation {}", index, sol.obj());

        self.row_duals(&sol, &rows, index)
    }

    fn rhs(
        &self,
        decision: &FirstStageDecision,
        scenario: &Scenario,
    ) -> Result<nalgebra::DVector<f64>, FailureKind> {
        if decision.len() != scenario.technology.ncols() {
            return Err(FailureKind::DimensionMismatch(format!(
                "decision has {} values but the technology matrix has {} columns",
                decision.len(),
                scenario.technology.ncols()
            )));
        }

        if scenario.rhs.len() != self.recourse.rows()
            || scenario.costs.len() != self.recourse.num_vars()
        {
            return Err(FailureKind::DimensionMismatch(
                "scenario does not match the recourse matrix".to_string(),
            ));
        }

        Ok(scenario.recourse_rhs(decision.as_vector()))
    }

    fn row_coeffs(&self, i: usize, y: &[VariableId]) -> Vec<(VariableId, f64)> {
        self.recourse
            .W
            .row(i)
            .iter()
            .zip(y)
            .filter(|(coeff, _y_j)| **coeff != 0.)
            .map(|(&coeff, &y_j)| (y_j, coeff))
            .collect()
    }

    fn row_duals(
        &self,
        sol: &Solution,
        rows: &[ConstraintId],
        index: usize,
    ) -> Result<RowDuals, FailureKind> {
        let mut duals = RowDuals::new();

        for (i, id) in rows.iter().enumerate() {
            let dual = sol.dual(*id).ok_or_else(|| {
                FailureKind::DimensionMismatch(format!("no dual for recourse row {}", i))
            })?;

            check_magnitude(
                &format!("dual of row {} in scenario {}", i, index),
                dual,
                self.numeric_limit,
            )?;

            duals.insert(RecourseRow(i), dual);
        }

        Ok(duals)
    }
}
