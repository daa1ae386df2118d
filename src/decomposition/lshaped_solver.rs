use super::check_magnitude;
use super::config::LShapedConfig;
use super::convergence::ConvergenceChecker;
use super::cuts::{Cut, CutStore};
use super::data::{FirstStageDecision, ProblemData};
use super::dual_transform::{self, CutContribution};
use super::master::{MasterProblemEngine, MasterSolution};
use super::report::{IterationRecord, LShapedOutcome, Status};
use super::subproblem::{SubproblemEngine, SubproblemResult};
use crate::error::{Component, FailureKind, LShapedError};
use crate::solver::LpSolver;
use crate::PrimalSimplexSolver;

use log::{debug, info, warn};

/// Two-stage stochastic LP solver using the L-shaped decomposition.
///
/// Every outer iteration solves the master problem, evaluates the recourse problem of
/// each scenario at the master's decision and then either stops, because the master's
/// recourse estimate `θ` matches the expected recourse `w`, or appends one cut and
/// repeats. A scenario with infeasible recourse produces a feasibility cut instead.
pub struct LShapedSolver<S: LpSolver = PrimalSimplexSolver> {
    lp_solver: S,
    config: LShapedConfig,
}

impl std::default::Default for LShapedSolver<PrimalSimplexSolver> {
    fn default() -> Self {
        Self::new(PrimalSimplexSolver::default(), LShapedConfig::default())
    }
}

/// Best decision whose expected recourse is known.
struct Incumbent {
    decision: FirstStageDecision,
    first_stage_cost: f64,
    expected_recourse: f64,
}

impl Incumbent {
    fn objective(&self) -> f64 {
        self.first_stage_cost + self.expected_recourse
    }
}

impl<S: LpSolver> LShapedSolver<S> {
    pub fn new(lp_solver: S, config: LShapedConfig) -> Self {
        Self { lp_solver, config }
    }

    pub fn config(&self) -> &LShapedConfig {
        &self.config
    }

    pub fn lp_solver(&self) -> &S {
        &self.lp_solver
    }

    pub fn solve(&self, data: &ProblemData) -> Result<LShapedOutcome, LShapedError> {
        self.config
            .validate()
            .map_err(|kind| LShapedError::new(0, Component::Config, kind))?;

        let limit = self.config.numeric_limit;
        let scenarios = data.scenarios();
        let n = data.num_first_stage_vars();

        let master = MasterProblemEngine::new(
            &self.lp_solver,
            data.first_stage(),
            self.config.theta_lower_bound,
            limit,
        );

        let subproblems = SubproblemEngine::new(&self.lp_solver, data.recourse(), limit);
        let checker = ConvergenceChecker::new(self.config.tolerance);

        let mut cuts = CutStore::new();
        let mut history = Vec::new();
        let mut incumbent: Option<Incumbent> = None;
        let mut last_master: Option<MasterSolution> = None;

        info!("L-SHAPED DECOMPOSITION");
        info!(
            "{} first-stage variables, {} scenarios, {} recourse rows",
            n,
            scenarios.len(),
            data.recourse().rows()
        );
        debug!("{}", self.config);
        info!("{}", IterationRecord::header());

        for iteration in 1..=self.config.max_iterations {
            let failed = move |component: Component| {
                move |kind: FailureKind| LShapedError::new(iteration, component, kind)
            };

            let master_sol = master
                .solve(cuts.cuts())
                .map_err(failed(Component::Master))?;

            debug!(
                "iteration {}: x = {}, theta = {}",
                iteration, master_sol.decision, master_sol.theta
            );

            let mut results: Vec<SubproblemResult> = Vec::with_capacity(scenarios.len());
            let mut infeasible = None;

            for (s, scenario) in scenarios.iter().enumerate() {
                match subproblems.solve(&master_sol.decision, s, scenario) {
                    Ok(result) => results.push(result),

                    Err(FailureKind::FeasibilityCutRequired { scenario })
                        if self.config.feasibility_cuts =>
                    {
                        infeasible = Some(scenario);
                        break;
                    }

                    Err(FailureKind::FeasibilityCutRequired { scenario }) => {
                        return Err(failed(Component::Subproblem)(
                            FailureKind::SolverInfeasible { scenario },
                        ))
                    }

                    Err(kind) => return Err(failed(Component::Subproblem)(kind)),
                }
            }

            if let Some(s) = infeasible {
                let sigma = subproblems
                    .solve_feasibility(&master_sol.decision, s, &scenarios[s])
                    .map_err(failed(Component::Subproblem))?;

                let contribution = dual_transform::transform(&sigma, &scenarios[s])
                    .map_err(failed(Component::DualTransformer))?;

                let cut = Cut::feasibility(contribution);
                self.check_cut(&cut).map_err(failed(Component::DualTransformer))?;

                warn!(
                    "recourse of scenario {} is infeasible at {}, adding feasibility cut {}",
                    s, master_sol.decision, cut
                );

                let record = IterationRecord {
                    iteration,
                    decision: master_sol.decision.clone(),
                    theta: master_sol.theta,
                    master_objective: master_sol.objective,
                    w: None,
                    gap: None,
                    cut: Some(cut.clone()),
                };

                info!("{}", record);

                history.push(record);
                cuts.push(cut);
                last_master = Some(master_sol);
                continue;
            }

            let contributions = results
                .iter()
                .map(|result| {
                    let scenario = &scenarios[result.scenario];

                    dual_transform::transform(&result.duals, scenario)
                        .map(|contribution| (scenario.probability, contribution))
                })
                .collect::<Result<Vec<(f64, CutContribution)>, _>>()
                .map_err(failed(Component::DualTransformer))?;

            let cut = CutStore::aggregate(n, contributions.iter().map(|(p, c)| (*p, c)))
                .map_err(failed(Component::DualTransformer))?;
            self.check_cut(&cut).map_err(failed(Component::DualTransformer))?;

            let state = checker
                .check(iteration, master_sol.theta, &results, scenarios)
                .map_err(failed(Component::Convergence))?;

            let first_stage_cost = data.first_stage_cost(master_sol.decision.as_slice());
            let objective = first_stage_cost + state.w;

            let improves = incumbent
                .as_ref()
                .map_or(true, |best| objective < best.objective());

            if state.converged || improves {
                incumbent = Some(Incumbent {
                    decision: master_sol.decision.clone(),
                    first_stage_cost,
                    expected_recourse: state.w,
                });
            }

            let mut record = IterationRecord {
                iteration,
                decision: master_sol.decision.clone(),
                theta: state.theta,
                master_objective: master_sol.objective,
                w: Some(state.w),
                gap: Some(state.gap),
                cut: None,
            };

            info!("{}", record);

            if state.converged {
                history.push(record);

                info!(
                    "converged after {} iterations with objective {}",
                    iteration, objective
                );

                return Ok(Self::outcome(
                    data,
                    Status::Converged,
                    iteration,
                    incumbent,
                    master_sol,
                    history,
                    cuts,
                ));
            }

            debug!("adding optimality cut {}", cut);

            record.cut = Some(cut.clone());
            history.push(record);
            cuts.push(cut);
            last_master = Some(master_sol);
        }

        warn!(
            "reached the maximum of {} iterations without converging",
            self.config.max_iterations
        );

        //max_iterations >= 1, so at least one master problem was solved
        let last_master = last_master.ok_or_else(|| {
            LShapedError::new(
                0,
                Component::Config,
                FailureKind::InvalidConfig("max_iterations must be at least 1".to_string()),
            )
        })?;

        Ok(Self::outcome(
            data,
            Status::NotConverged,
            self.config.max_iterations,
            incumbent,
            last_master,
            history,
            cuts,
        ))
    }

    fn check_cut(&self, cut: &Cut) -> Result<(), FailureKind> {
        let limit = self.config.numeric_limit;

        for &coeff in cut.coeffs.iter() {
            check_magnitude("cut coefficient", coeff, limit)?;
        }

        check_magnitude("cut right-hand side", cut.rhs, limit)
    }

    fn outcome(
        data: &ProblemData,
        status: Status,
        iterations: u64,
        incumbent: Option<Incumbent>,
        last_master: MasterSolution,
        history: Vec<IterationRecord>,
        cuts: CutStore,
    ) -> LShapedOutcome {
        let lower_bound = last_master.objective;

        let (decision, first_stage_cost, expected_recourse) = match incumbent {
            Some(best) => (best.decision, best.first_stage_cost, best.expected_recourse),

            //only feasibility cuts so far
            None => {
                let cost = data.first_stage_cost(last_master.decision.as_slice());
                (last_master.decision, cost, f64::INFINITY)
            }
        };

        LShapedOutcome {
            status,
            decision,
            objective: first_stage_cost + expected_recourse,
            first_stage_cost,
            expected_recourse,
            lower_bound,
            iterations,
            history,
            cuts: cuts.into_cuts(),
        }
    }
}
