pub mod decomposition;
mod error;
pub mod problem;
pub mod solver;
mod solvers;
mod standard_form;
mod util;

pub use crate::decomposition::config::LShapedConfig;
pub use crate::decomposition::convergence::{ConvergenceChecker, ConvergenceState};
pub use crate::decomposition::cuts::{Cut, CutKind, CutStore};
pub use crate::decomposition::data::{FirstStageDecision, ProblemData, Recourse, Scenario};
pub use crate::decomposition::dual_transform::CutContribution;
pub use crate::decomposition::lshaped_solver::LShapedSolver;
pub use crate::decomposition::master::{MasterProblemEngine, MasterSolution};
pub use crate::decomposition::report::{IterationRecord, LShapedOutcome, Status};
pub use crate::decomposition::subproblem::{
    RecourseRow, RowDuals, SubproblemEngine, SubproblemResult,
};
pub use crate::error::{Component, DataError, FailureKind, LShapedError, LpError};
pub use crate::problem::{Bound, Constraint, ConstraintId, ConstraintOp, Problem, Variable, VariableId};
pub use crate::solver::{LpResult, LpSolver, Solution, SolverResult};
pub use crate::solvers::primal::primal_simplex_solver::{PrimalSimplexSolver, SolutionStatus};
