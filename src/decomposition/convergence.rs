use super::data::Scenario;
use super::subproblem::SubproblemResult;
use crate::error::FailureKind;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceState {
    pub iteration: u64,
    pub theta: f64,
    pub w: f64,
    pub gap: f64,
    pub converged: bool,
}

/// Compares the master's recourse estimate `θ` with the realized expected recourse `w`.
pub struct ConvergenceChecker {
    tolerance: f64,
}

impl ConvergenceChecker {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// `w = Σ p_s · objective_s`, one result per scenario.
    pub fn expected_recourse(
        results: &[SubproblemResult],
        scenarios: &[Scenario],
    ) -> Result<f64, FailureKind> {
        if results.len() != scenarios.len() {
            return Err(FailureKind::DimensionMismatch(format!(
                "{} subproblem results for {} scenarios",
                results.len(),
                scenarios.len()
            )));
        }

        let mut w = 0.;
        let mut seen = vec![false; scenarios.len()];

        for result in results {
            let scenario = scenarios.get(result.scenario).ok_or_else(|| {
                FailureKind::DimensionMismatch(format!(
                    "result for unknown scenario {}",
                    result.scenario
                ))
            })?;

            if seen[result.scenario] {
                return Err(FailureKind::DimensionMismatch(format!(
                    "more than one result for scenario {}",
                    result.scenario
                )));
            }

            seen[result.scenario] = true;
            w += scenario.probability * result.objective;
        }

        Ok(w)
    }

    /// A gap below `-tolerance` means `θ` overestimates the recourse cost, which valid
    /// cuts and a valid `θ` bound rule out, so it is an error.
    pub fn check(
        &self,
        iteration: u64,
        theta: f64,
        results: &[SubproblemResult],
        scenarios: &[Scenario],
    ) -> Result<ConvergenceState, FailureKind> {
        let w = Self::expected_recourse(results, scenarios)?;
        let gap = w - theta;

        if gap < -self.tolerance {
            return Err(FailureKind::NegativeGap { theta, w, gap });
        }

        Ok(ConvergenceState {
            iteration,
            theta,
            w,
            gap,
            converged: gap <= self.tolerance,
        })
    }
}
