use super::data::Scenario;
use super::subproblem::RowDuals;
use crate::error::FailureKind;

/// One scenario's share of a cut, `E = Tᵀπ` and `e = πᵀh`.
#[derive(Debug, Clone, PartialEq)]
pub struct CutContribution {
    pub coeffs: nalgebra::DVector<f64>,
    pub rhs: f64,
}

/// Projects the recourse row duals of `scenario` onto the first-stage variables.
///
/// Every row takes part with its dual, rows without first-stage variables only
/// contribute to `rhs` through their zero technology row.
pub fn transform(duals: &RowDuals, scenario: &Scenario) -> Result<CutContribution, FailureKind> {
    let m = scenario.rhs.len();

    if duals.len() != m {
        return Err(FailureKind::DimensionMismatch(format!(
            "got {} duals for {} recourse rows",
            duals.len(),
            m
        )));
    }

    let mut pi = nalgebra::DVector::zeros(m);

    for (row, &dual) in duals {
        if row.0 >= m {
            return Err(FailureKind::DimensionMismatch(format!(
                "dual for recourse row {} but there are only {} rows",
                row.0, m
            )));
        }

        pi[row.0] = dual;
    }

    Ok(CutContribution {
        coeffs: scenario.technology.tr_mul(&pi),
        rhs: pi.dot(&scenario.rhs),
    })
}
