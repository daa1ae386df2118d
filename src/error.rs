use thiserror::Error;

/// Error raised by the LP modelling layer and the simplex solver.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct LpError(String);

impl LpError {
    pub fn new(msg: String) -> Self {
        Self(msg)
    }
}

/// Error raised while validating the data of a two-stage problem.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("invalid problem data: {0}")]
pub struct DataError(String);

impl DataError {
    pub fn new(msg: String) -> Self {
        Self(msg)
    }
}

/// The part of the decomposition that reported a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Config,
    Master,
    Subproblem,
    DualTransformer,
    Convergence,
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let name = match self {
            Component::Config => "configuration",
            Component::Master => "master problem",
            Component::Subproblem => "subproblem",
            Component::DualTransformer => "dual transformer",
            Component::Convergence => "convergence check",
        };

        write!(f, "{}", name)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FailureKind {
    #[error("recourse problem of scenario {scenario} is infeasible")]
    SolverInfeasible { scenario: usize },

    /// Signalled by the subproblem engine; the driver turns it into a feasibility cut
    /// or into `SolverInfeasible`.
    #[error("recourse problem of scenario {scenario} is infeasible, a feasibility cut is required")]
    FeasibilityCutRequired { scenario: usize },

    #[error("LP is unbounded (scenario: {scenario:?})")]
    SolverUnbounded { scenario: Option<usize> },

    #[error("master problem is infeasible with {cuts} cuts")]
    MasterInfeasible { cuts: usize },

    #[error("numerical instability: {quantity} = {value}")]
    NumericalInstability { quantity: String, value: f64 },

    #[error("gap {gap} is negative beyond tolerance (theta = {theta}, w = {w})")]
    NegativeGap { theta: f64, w: f64, gap: f64 },

    #[error("LP solver reached its iteration limit")]
    SolverIterationLimit,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    #[error(transparent)]
    Lp(#[from] LpError),
}

/// Structured report of a failed decomposition run.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("iteration {iteration}: {component} failed: {kind}")]
pub struct LShapedError {
    pub iteration: u64,
    pub component: Component,
    #[source]
    pub kind: FailureKind,
}

impl LShapedError {
    pub fn new(iteration: u64, component: Component, kind: FailureKind) -> Self {
        Self {
            iteration,
            component,
            kind,
        }
    }
}
