use super::dual_transform::CutContribution;
use crate::error::FailureKind;

const GTE_STR: &str = "\u{2265}";
const THETA_STR: &str = "\u{03B8}";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutKind {
    /// `E·x + θ ≥ e`
    Optimality,
    /// `D·x ≥ d`
    Feasibility,
}

impl std::fmt::Display for CutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            CutKind::Optimality => write!(f, "optimality"),
            CutKind::Feasibility => write!(f, "feasibility"),
        }
    }
}

/// A linear inequality on the first-stage variables and, for optimality cuts, `θ`.
#[derive(Debug, Clone, PartialEq)]
pub struct Cut {
    pub kind: CutKind,
    pub coeffs: nalgebra::DVector<f64>,
    pub rhs: f64,
}

impl Cut {
    pub fn optimality(coeffs: Vec<f64>, rhs: f64) -> Self {
        Self {
            kind: CutKind::Optimality,
            coeffs: nalgebra::DVector::from_vec(coeffs),
            rhs,
        }
    }

    pub fn feasibility(contribution: CutContribution) -> Self {
        Self {
            kind: CutKind::Feasibility,
            coeffs: contribution.coeffs,
            rhs: contribution.rhs,
        }
    }

    /// Left-hand side at `x` and `theta`.
    pub fn lhs(&self, x: &[f64], theta: f64) -> f64 {
        let lhs: f64 = self.coeffs.iter().zip(x).map(|(c, x_j)| c * x_j).sum();

        match self.kind {
            CutKind::Optimality => lhs + theta,
            CutKind::Feasibility => lhs,
        }
    }
}

impl std::fmt::Display for Cut {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut first = true;

        for (j, &coeff) in self.coeffs.iter().enumerate() {
            if coeff == 0. {
                continue;
            }

            if first {
                write!(f, "{} x{}", coeff, j + 1)?;
            } else if coeff < 0. {
                write!(f, " - {} x{}", -coeff, j + 1)?;
            } else {
                write!(f, " + {} x{}", coeff, j + 1)?;
            }

            first = false;
        }

        match (self.kind, first) {
            (CutKind::Optimality, true) => write!(f, "{}", THETA_STR)?,
            (CutKind::Optimality, false) => write!(f, " + {}", THETA_STR)?,
            (CutKind::Feasibility, true) => write!(f, "0")?,
            (CutKind::Feasibility, false) => {}
        }

        write!(f, " {} {}", GTE_STR, self.rhs)
    }
}

/// Append-only log of the cuts generated so far.
#[derive(Debug, Clone, Default)]
pub struct CutStore {
    cuts: Vec<Cut>,
}

impl CutStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push(&mut self, cut: Cut) {
        self.cuts.push(cut);
    }

    pub fn cuts(&self) -> &[Cut] {
        &self.cuts
    }

    pub fn len(&self) -> usize {
        self.cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cuts.is_empty()
    }

    /// The single optimality cut `E = Σ p_s E_s`, `e = Σ p_s e_s` over `n` first-stage
    /// variables.
    pub fn aggregate<'a, I>(n: usize, contributions: I) -> Result<Cut, FailureKind>
    where
        I: IntoIterator<Item = (f64, &'a CutContribution)>,
    {
        let mut coeffs = nalgebra::DVector::zeros(n);
        let mut rhs = 0.;

        for (k, (p, contribution)) in contributions.into_iter().enumerate() {
            if contribution.coeffs.len() != n {
                return Err(FailureKind::DimensionMismatch(format!(
                    "contribution {} has {} coefficients but there are {} first-stage variables",
                    k,
                    contribution.coeffs.len(),
                    n
                )));
            }

            coeffs.axpy(p, &contribution.coeffs, 1.);
            rhs += p * contribution.rhs;
        }

        Ok(Cut {
            kind: CutKind::Optimality,
            coeffs,
            rhs,
        })
    }

    pub fn into_cuts(self) -> Vec<Cut> {
        self.cuts
    }
}
