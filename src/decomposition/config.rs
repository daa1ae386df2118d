use crate::error::FailureKind;

/// Settings of an L-shaped run.
#[derive(Debug, Clone, PartialEq)]
pub struct LShapedConfig {
    /// The run has converged once `w - θ ≤ tolerance`.
    pub tolerance: f64,
    pub max_iterations: u64,
    /// Lower bound on the recourse estimate `θ` in the master problem. It keeps the
    /// master bounded before enough optimality cuts exist and must lie below the
    /// optimal expected recourse cost.
    pub theta_lower_bound: f64,
    /// Generate feasibility cuts for infeasible recourse problems instead of failing.
    pub feasibility_cuts: bool,
    /// Magnitudes above this are reported as numerical instability.
    pub numeric_limit: f64,
}

impl std::default::Default for LShapedConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 100,
            theta_lower_bound: -1e6,
            feasibility_cuts: true,
            numeric_limit: 1e12,
        }
    }
}

impl LShapedConfig {
    pub fn validate(&self) -> Result<(), FailureKind> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.) {
            return Err(FailureKind::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }

        if self.max_iterations == 0 {
            return Err(FailureKind::InvalidConfig(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        if !self.theta_lower_bound.is_finite() {
            return Err(FailureKind::InvalidConfig(format!(
                "theta_lower_bound must be finite, got {}",
                self.theta_lower_bound
            )));
        }

        if self.numeric_limit.is_nan()
            || self.numeric_limit <= 0.
            || self.theta_lower_bound.abs() >= self.numeric_limit
        {
            return Err(FailureKind::InvalidConfig(format!(
                "numeric_limit {} must be positive and exceed |theta_lower_bound|",
                self.numeric_limit
            )));
        }

        Ok(())
    }
}

impl std::fmt::Display for LShapedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "tolerance = {}, max iterations = {}, theta lower bound = {}, feasibility cuts = {}",
            self.tolerance, self.max_iterations, self.theta_lower_bound, self.feasibility_cuts
        )
    }
}
