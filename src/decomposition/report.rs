use super::cuts::Cut;
use super::data::FirstStageDecision;
use crate::util::{ITER_WIDTH, VALUE_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Converged,
    /// The iteration cap was reached first.
    NotConverged,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Status::Converged => write!(f, "converged"),
            Status::NotConverged => write!(f, "not converged"),
        }
    }
}

/// What happened in one outer iteration.
///
/// `w` and `gap` are missing in iterations that ended with a feasibility cut.
/// `cut` is the cut appended at the end of the iteration, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRecord {
    pub iteration: u64,
    pub decision: FirstStageDecision,
    pub theta: f64,
    pub master_objective: f64,
    pub w: Option<f64>,
    pub gap: Option<f64>,
    pub cut: Option<Cut>,
}

impl IterationRecord {
    pub(crate) fn header() -> String {
        format!(
            "{:>it$}  |  {:>val$}  |  {:>val$}  |  {:>val$}",
            "Iteration",
            "\u{03B8}",
            "w",
            "gap",
            it = ITER_WIDTH,
            val = VALUE_WIDTH
        )
    }
}

fn optional(val: Option<f64>) -> String {
    match val {
        Some(val) => format!("{:.8E}", val),
        None => "-".to_string(),
    }
}

impl std::fmt::Display for IterationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{:>it$}  |  {:>val$}  |  {:>val$}  |  {:>val$}",
            self.iteration,
            format!("{:.8E}", self.theta),
            optional(self.w),
            optional(self.gap),
            it = ITER_WIDTH,
            val = VALUE_WIDTH
        )
    }
}

/// Result of an L-shaped run that did not fail.
#[derive(Debug, Clone)]
pub struct LShapedOutcome {
    pub status: Status,
    /// The converged decision, otherwise the best decision whose recourse was evaluated.
    pub decision: FirstStageDecision,
    /// `c·x + w` of `decision`, `+∞` if no decision was evaluated.
    pub objective: f64,
    pub first_stage_cost: f64,
    pub expected_recourse: f64,
    /// Objective of the last master problem.
    pub lower_bound: f64,
    pub iterations: u64,
    pub history: Vec<IterationRecord>,
    pub cuts: Vec<Cut>,
}

impl LShapedOutcome {
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}

impl std::fmt::Display for LShapedOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "status: {}", self.status)?;
        writeln!(f, "iterations: {}", self.iterations)?;
        writeln!(f, "decision: {}", self.decision)?;
        writeln!(f, "objective: {}", self.objective)?;
        writeln!(f, "first-stage cost: {}", self.first_stage_cost)?;
        writeln!(f, "expected recourse: {}", self.expected_recourse)?;
        writeln!(f, "lower bound: {}", self.lower_bound)?;
        writeln!(f)?;
        writeln!(f, "{}", IterationRecord::header())?;

        for record in &self.history {
            writeln!(f, "{}", record)?;
        }

        if !self.cuts.is_empty() {
            writeln!(f, "\ncuts")?;

            for (k, cut) in self.cuts.iter().enumerate() {
                writeln!(f, "{:>it$}  {} ({})", k + 1, cut, cut.kind, it = ITER_WIDTH)?;
            }
        }

        Ok(())
    }
}
