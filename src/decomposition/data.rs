#![allow(non_snake_case)]

use crate::error::DataError;
use crate::problem::{ConstraintOp, Problem};

/// Probabilities may deviate from summing to one by this much per scenario.
const PROBABILITY_TOL: f64 = 1e-9;

/// Fixed recourse structure shared by all scenarios.
///
/// Row `i` of a scenario subproblem reads `W_i·y  op_i  h_i - T_i·x` with `y ≥ 0`.
/// Other bounds on recourse variables (e.g. demand limits `y ≤ d`) are written as
/// rows whose technology coefficients are zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Recourse {
    pub W: nalgebra::DMatrix<f64>,
    pub ops: Vec<ConstraintOp>,
}

impl Recourse {
    pub fn new(rows: Vec<Vec<f64>>, ops: Vec<ConstraintOp>) -> Result<Self, DataError> {
        if rows.len() != ops.len() {
            return Err(DataError::new(format!(
                "recourse matrix has {} rows but {} row senses were given",
                rows.len(),
                ops.len()
            )));
        }

        let W = dense("recourse matrix", rows)?;
        Ok(Self { W, ops })
    }

    pub fn rows(&self) -> usize {
        self.W.nrows()
    }

    pub fn num_vars(&self) -> usize {
        self.W.ncols()
    }
}

/// One realization of the random data with its probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenario {
    pub name: Option<String>,
    pub probability: f64,
    /// Recourse costs `q`.
    pub costs: nalgebra::DVector<f64>,
    /// Decision independent part `h` of the recourse right-hand side.
    pub rhs: nalgebra::DVector<f64>,
    /// Technology matrix `T` linking first-stage variables to the recourse rows.
    pub technology: nalgebra::DMatrix<f64>,
}

impl Scenario {
    pub fn new(
        probability: f64,
        costs: Vec<f64>,
        rhs: Vec<f64>,
        technology: Vec<Vec<f64>>,
    ) -> Result<Self, DataError> {
        Ok(Self {
            name: None,
            probability,
            costs: nalgebra::DVector::from_vec(costs),
            rhs: nalgebra::DVector::from_vec(rhs),
            technology: dense("technology matrix", technology)?,
        })
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// `h - T x`
    pub fn recourse_rhs(&self, x: &nalgebra::DVector<f64>) -> nalgebra::DVector<f64> {
        &self.rhs - &self.technology * x
    }
}

impl std::fmt::Display for Scenario {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} (p = {})", name, self.probability),
            None => write!(f, "p = {}", self.probability),
        }
    }
}

/// A two-stage stochastic linear program with a finite scenario set.
///
/// The variables of `first_stage` are the first-stage decision `x`, its objective is
/// `c·x` and its constraints and bounds are the first-stage constraints.
#[derive(Debug, Clone)]
pub struct ProblemData {
    first_stage: Problem,
    recourse: Recourse,
    scenarios: Vec<Scenario>,
}

impl ProblemData {
    pub fn new(
        first_stage: Problem,
        recourse: Recourse,
        scenarios: Vec<Scenario>,
    ) -> Result<Self, DataError> {
        if scenarios.is_empty() {
            return Err(DataError::new("at least one scenario is required".to_string()));
        }

        let n = first_stage.vars().len();
        let m = recourse.rows();
        let n_y = recourse.num_vars();

        let mut total = 0.;

        for (s, scenario) in scenarios.iter().enumerate() {
            let p = scenario.probability;

            if !(p.is_finite() && p > 0. && p <= 1.) {
                return Err(DataError::new(format!(
                    "scenario {} has invalid probability {}",
                    s, p
                )));
            }

            total += p;

            if scenario.costs.len() != n_y {
                return Err(DataError::new(format!(
                    "scenario {} has {} recourse costs, expected {}",
                    s,
                    scenario.costs.len(),
                    n_y
                )));
            }

            if scenario.rhs.len() != m {
                return Err(DataError::new(format!(
                    "scenario {} has {} right-hand side values, expected {}",
                    s,
                    scenario.rhs.len(),
                    m
                )));
            }

            if scenario.technology.shape() != (m, n) {
                return Err(DataError::new(format!(
                    "scenario {} has a {}x{} technology matrix, expected {}x{}",
                    s,
                    scenario.technology.nrows(),
                    scenario.technology.ncols(),
                    m,
                    n
                )));
            }

            let all_finite = scenario
                .costs
                .iter()
                .chain(scenario.rhs.iter())
                .chain(scenario.technology.iter())
                .all(|v| v.is_finite());

            if !all_finite {
                return Err(DataError::new(format!(
                    "scenario {} contains a non-finite value",
                    s
                )));
            }
        }

        let tol = PROBABILITY_TOL * scenarios.len() as f64;

        if (total - 1.).abs() > tol {
            return Err(DataError::new(format!(
                "scenario probabilities sum to {}, expected 1",
                total
            )));
        }

        Ok(Self {
            first_stage,
            recourse,
            scenarios,
        })
    }

    pub fn first_stage(&self) -> &Problem {
        &self.first_stage
    }

    pub fn recourse(&self) -> &Recourse {
        &self.recourse
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn num_first_stage_vars(&self) -> usize {
        self.first_stage.vars().len()
    }

    /// `c·x`
    pub fn first_stage_cost(&self, x: &[f64]) -> f64 {
        self.first_stage.obj(x)
    }
}

/// Values of the first-stage variables, in the order they were added to the first stage.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstStageDecision(nalgebra::DVector<f64>);

impl FirstStageDecision {
    pub fn new(values: Vec<f64>) -> Self {
        Self(nalgebra::DVector::from_vec(values))
    }

    pub fn as_slice(&self) -> &[f64] {
        self.0.as_slice()
    }

    pub fn as_vector(&self) -> &nalgebra::DVector<f64> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::ops::Index<usize> for FirstStageDecision {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl std::fmt::Display for FirstStageDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "(")?;

        for (i, val) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }

            write!(f, "{}", val)?;
        }

        write!(f, ")")
    }
}

fn dense(what: &str, rows: Vec<Vec<f64>>) -> Result<nalgebra::DMatrix<f64>, DataError> {
    let ncols = rows.first().map_or(0, |row| row.len());

    if let Some((i, row)) = rows.iter().enumerate().find(|(_i, row)| row.len() != ncols) {
        return Err(DataError::new(format!(
            "{} row {} has {} entries, expected {}",
            what,
            i,
            row.len(),
            ncols
        )));
    }

    if rows.iter().flatten().any(|v| !v.is_finite()) {
        return Err(DataError::new(format!("{} contains a non-finite value", what)));
    }

    Ok(nalgebra::DMatrix::from_fn(rows.len(), ncols, |i, j| rows[i][j]))
}
