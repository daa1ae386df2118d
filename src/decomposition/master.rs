use super::check_magnitude;
use super::cuts::{Cut, CutKind};
use super::data::FirstStageDecision;
use crate::error::FailureKind;
use crate::problem::{Bound, ConstraintOp, Problem, VariableId};
use crate::solver::{LpSolver, SolverResult};

use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct MasterSolution {
    pub decision: FirstStageDecision,
    pub theta: f64,
    pub objective: f64,
}

/// Rebuilds and solves `min c·x + θ` over the first-stage constraints, the cut log and
/// `θ ≥ theta_lower_bound`.
pub struct MasterProblemEngine<'a, S: LpSolver> {
    solver: &'a S,
    first_stage: &'a Problem,
    theta_lower_bound: f64,
    numeric_limit: f64,
}

impl<'a, S: LpSolver> MasterProblemEngine<'a, S> {
    pub fn new(
        solver: &'a S,
        first_stage: &'a Problem,
        theta_lower_bound: f64,
        numeric_limit: f64,
    ) -> Self {
        Self {
            solver,
            first_stage,
            theta_lower_bound,
            numeric_limit,
        }
    }

    /// The master problem for the given cuts and the id of `θ` in it.
    pub fn build(&self, cuts: &[Cut]) -> Result<(Problem, VariableId), FailureKind> {
        let n = self.first_stage.vars().len();
        let mut prob = self.first_stage.clone();

        let theta = prob.add_var(
            1.,
            Bound::Lower(self.theta_lower_bound),
            Some("theta".to_string()),
        )?;

        for (k, cut) in cuts.iter().enumerate() {
            if cut.coeffs.len() != n {
                return Err(FailureKind::DimensionMismatch(format!(
                    "cut {} has {} coefficients but there are {} first-stage variables",
                    k,
                    cut.coeffs.len(),
                    n
                )));
            }

            let mut coeffs: Vec<(VariableId, f64)> = cut
                .coeffs
                .iter()
                .enumerate()
                .map(|(j, &coeff)| (VariableId::from(j), coeff))
                .collect();

            if let CutKind::Optimality = cut.kind {
                coeffs.push((theta, 1.));
            }

            prob.add_named_constraint(
                format!("{}_cut_{}", cut.kind, k + 1),
                coeffs,
                ConstraintOp::Gte,
                cut.rhs,
            )?;
        }

        Ok((prob, theta))
    }

    pub fn solve(&self, cuts: &[Cut]) -> Result<MasterSolution, FailureKind> {
        let (prob, theta) = self.build(cuts)?;

        debug!("master problem with {} cuts:\n{}", cuts.len(), prob);

        let sol = match self.solver.solve(&prob)? {
            SolverResult::Optimal(sol) => sol,
            SolverResult::Infeasible => {
                return Err(FailureKind::MasterInfeasible { cuts: cuts.len() })
            }
            SolverResult::Unbounded => {
                return Err(FailureKind::SolverUnbounded { scenario: None })
            }
            SolverResult::MaxIter { .. } => return Err(FailureKind::SolverIterationLimit),
        };

        check_magnitude("master objective", sol.obj(), self.numeric_limit)?;

        let n = self.first_stage.vars().len();

        if sol.x().len() != n + 1 {
            return Err(FailureKind::DimensionMismatch(format!(
                "master solution has {} values, expected {}",
                sol.x().len(),
                n + 1
            )));
        }

        let theta = sol.value(theta).ok_or_else(|| {
            FailureKind::DimensionMismatch("master solution has no value for theta".to_string())
        })?;

        Ok(MasterSolution {
            decision: FirstStageDecision::new(sol.x()[..n].to_vec()),
            theta,
            objective: sol.obj(),
        })
    }
}
