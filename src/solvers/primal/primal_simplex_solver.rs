#![allow(non_snake_case)]

use super::primal_problem::{PrimalPhase1, PrimalPhase2, StandardizedProblem};
use crate::error::LpError;
use crate::problem::Problem;
use crate::solver::{LpResult, LpSolver, Solution, SolverResult};
use crate::solvers::trivial::solve_trivial_problem;
use crate::standard_form::StandardForm;
use crate::util::{EPS, ITER_WIDTH};

use log::{debug, info, trace};

use std::convert::TryInto;

/// Two-phase revised primal simplex method.
///
/// Both pricing and the ratio test follow the smallest subscript rule, so the method
/// terminates on degenerate problems.
pub struct PrimalSimplexSolver {
    max_iter: u64,
}

impl std::default::Default for PrimalSimplexSolver {
    fn default() -> Self {
        Self { max_iter: 1000 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    Optimal,
    Unbounded,
    MaxIter,
}

impl LpSolver for PrimalSimplexSolver {
    fn solve(&self, prob: &Problem) -> LpResult {
        let std_form = StandardForm::from(prob);

        if std_form.rows() == 0 {
            //trivial problem, and would run into errors if we proceed
            return Ok(solve_trivial_problem(&std_form));
        }

        let mut phase_1 = PrimalPhase1::from(std_form);

        info!("PRIMAL PHASE 1");

        let mut phase_2: PrimalPhase2 = match self.solve_with_initial(&mut phase_1)? {
            SolutionStatus::Optimal => {
                let violated = phase_1.violated_rows();

                if violated.is_empty() {
                    info!("found feasible point");
                    phase_1.try_into()?
                } else {
                    info!(
                        "problem is infeasible, phase 1 objective {} with violated rows {:?}",
                        phase_1.obj(),
                        violated
                    );
                    return Ok(SolverResult::Infeasible);
                }
            }

            SolutionStatus::Unbounded => {
                return Err(LpError::new(
                    "primal phase 1 should never be unbounded".to_string(),
                ))
            }

            SolutionStatus::MaxIter => {
                info!("reached maximum iterations");
                return Ok(SolverResult::MaxIter { obj: f64::INFINITY });
            }
        };

        info!("PRIMAL PHASE 2");

        Ok(match self.solve_with_initial(&mut phase_2)? {
            SolutionStatus::Optimal => {
                let x_std = phase_2.point.x(phase_2.std_form.cols());
                let obj = phase_2.std_form.obj(&x_std);

                info!("found optimal point with objective value {}", obj);

                SolverResult::Optimal(Solution::new(
                    phase_2.std_form.original_x(&x_std),
                    obj,
                    phase_2.std_form.original_duals(&phase_2.point.y),
                ))
            }

            SolutionStatus::Unbounded => {
                info!("problem is unbounded");
                SolverResult::Unbounded
            }

            SolutionStatus::MaxIter => {
                info!("reached maximum iterations");
                SolverResult::MaxIter { obj: phase_2.obj() }
            }
        })
    }
}

impl PrimalSimplexSolver {
    pub fn new(max_iter: Option<u64>) -> Self {
        Self {
            max_iter: max_iter.unwrap_or(u64::MAX),
        }
    }

    /// Runs the simplex iterations from the basis stored in `prob`. On return the point
    /// holds the basic values and row multipliers of the final basis.
    pub fn solve_with_initial<P>(&self, prob: &mut P) -> Result<SolutionStatus, LpError>
    where
        P: StandardizedProblem,
    {
        let (ext, pt) = prob.unpack();

        info!(
            "solving problem with {} variables and {} constraints",
            ext.candidates,
            ext.rows()
        );

        trace!("c: {}", ext.c);
        trace!("A: {}", ext.A);
        trace!("b: {}", ext.b);

        if pt.B.len() != ext.rows() {
            return Err(LpError::new(format!(
                "invalid B, has {} elements but {} expected",
                pt.B.len(),
                ext.rows(),
            )));
        }

        info!("Iteration  |  Objective");

        let mut is_basic = vec![false; ext.A.ncols()];

        for &i in &pt.B {
            is_basic[i] = true;
        }

        let mut iter = 1u64;

        loop {
            //TODO update the LU decomposition instead of recomputing it every iteration
            let A_B = ext.basis_matrix(&pt.B);
            let lu_decomp = A_B.clone().lu();

            if !lu_decomp.is_invertible() {
                return Err(LpError::new(
                    "invalid B, A_B is not invertible".to_string(),
                ));
            }

            pt.x_B = lu_decomp
                .solve(&ext.b)
                .ok_or_else(|| LpError::new("failed to solve for x_B".to_string()))?;

            let c_B = ext.basic_costs(&pt.B);

            pt.y = A_B
                .transpose()
                .lu()
                .solve(&c_B)
                .ok_or_else(|| LpError::new("failed to solve for y".to_string()))?;

            info!(
                "{:it$}  |  {:.8E}",
                iter,
                c_B.dot(&pt.x_B),
                it = ITER_WIDTH
            );

            if iter > self.max_iter {
                debug!("reached max iterations");
                return Ok(SolutionStatus::MaxIter);
            }

            iter += 1;

            trace!("B: {:?}", pt.B);
            trace!("x_B: {}", pt.x_B);
            trace!("y: {}", pt.y);

            //smallest subscript rule: the first improving column enters
            let entering = (0..ext.candidates)
                .filter(|&j| !is_basic[j])
                .find(|&j| ext.c[j] - ext.A.column(j).dot(&pt.y) < -EPS);

            let q = match entering {
                Some(q) => q,
                None => return Ok(SolutionStatus::Optimal),
            };

            let d = lu_decomp
                .solve(&ext.A.column(q).clone_owned())
                .ok_or_else(|| LpError::new("failed to solve for the pivot column".to_string()))?;

            trace!("entering: {}, d: {}", q, d);

            let leaving = Self::ratio_test(&pt.B, &pt.x_B, &d);

            let r = match leaving {
                Some(r) => r,
                None => return Ok(SolutionStatus::Unbounded),
            };

            trace!("leaving: {}", pt.B[r]);

            is_basic[pt.B[r]] = false;
            is_basic[q] = true;
            pt.B[r] = q;
        }
    }

    /// Position in the basis of the variable that leaves when the entering column has
    /// direction `d`, or `None` if the entering variable can increase without bound.
    fn ratio_test(
        B: &[usize],
        x_B: &nalgebra::DVector<f64>,
        d: &nalgebra::DVector<f64>,
    ) -> Option<usize> {
        let mut leaving: Option<(usize, f64)> = None;

        for (i, &d_i) in d.iter().enumerate() {
            if d_i <= EPS {
                continue;
            }

            let lambda_i = x_B[i].max(0.) / d_i;

            leaving = match leaving {
                None => Some((i, lambda_i)),

                Some((r, lambda)) => {
                    if lambda_i < lambda - EPS {
                        Some((i, lambda_i))
                    } else if (lambda_i - lambda).abs() <= EPS && B[i] < B[r] {
                        //this logic breaks cycles (smallest subscript rule)
                        Some((i, lambda_i))
                    } else {
                        Some((r, lambda))
                    }
                }
            };
        }

        leaving.map(|(r, _lambda)| r)
    }
}
