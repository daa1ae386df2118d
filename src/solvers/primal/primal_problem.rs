#![allow(non_snake_case)]

use crate::error::LpError;
use crate::standard_form::StandardForm;
use crate::util::{EPS, FEAS_TOL};

use log::{debug, trace};

/// A standard form extended by one artificial column per row, `[A | I] x = b`.
#[derive(Debug, Clone)]
pub struct ExtendedForm {
    pub A: nalgebra::DMatrix<f64>,
    pub b: nalgebra::DVector<f64>,
    pub c: nalgebra::DVector<f64>,
    /// Only the columns `0..candidates` may enter the basis.
    pub candidates: usize,
}

impl ExtendedForm {
    #[inline]
    pub fn rows(&self) -> usize {
        self.A.nrows()
    }

    pub fn basis_matrix(&self, B: &[usize]) -> nalgebra::DMatrix<f64> {
        nalgebra::DMatrix::from_fn(self.rows(), B.len(), |i, k| self.A[(i, B[k])])
    }

    pub fn basic_costs(&self, B: &[usize]) -> nalgebra::DVector<f64> {
        nalgebra::DVector::from_fn(B.len(), |k, _| self.c[B[k]])
    }
}

#[derive(Debug, Clone)]
pub struct BasicPoint {
    pub B: Vec<usize>,
    pub x_B: nalgebra::DVector<f64>,
    /// Simplex multipliers of the rows for the current basis.
    pub y: nalgebra::DVector<f64>,
}

impl BasicPoint {
    /// The first `n` entries of the full primal point.
    pub fn x(&self, n: usize) -> nalgebra::DVector<f64> {
        let mut x = nalgebra::DVector::zeros(n);

        for (&index, &val) in self.B.iter().zip(self.x_B.iter()) {
            if index < n {
                x[index] = val;
            }
        }

        x
    }
}

pub trait StandardizedProblem {
    fn obj(&self) -> f64;
    fn unpack(&mut self) -> (&ExtendedForm, &mut BasicPoint);
}

#[derive(Debug)]
pub struct PrimalPhase1 {
    pub std_form: StandardForm,
    pub ext: ExtendedForm,
    pub point: BasicPoint,
}

impl StandardizedProblem for PrimalPhase1 {
    #[inline]
    fn obj(&self) -> f64 {
        self.ext.basic_costs(&self.point.B).dot(&self.point.x_B)
    }

    #[inline]
    fn unpack(&mut self) -> (&ExtendedForm, &mut BasicPoint) {
        (&self.ext, &mut self.point)
    }
}

#[derive(Debug)]
pub struct PrimalPhase2 {
    pub std_form: StandardForm,
    pub ext: ExtendedForm,
    pub point: BasicPoint,
}

impl StandardizedProblem for PrimalPhase2 {
    #[inline]
    fn obj(&self) -> f64 {
        self.ext.basic_costs(&self.point.B).dot(&self.point.x_B) + self.std_form.obj_offset
    }

    #[inline]
    fn unpack(&mut self) -> (&ExtendedForm, &mut BasicPoint) {
        (&self.ext, &mut self.point)
    }
}

impl PrimalPhase1 {
    /// Rows whose artificial variable is basic with a value above the row's tolerance.
    pub fn violated_rows(&self) -> Vec<usize> {
        let n = self.std_form.cols();

        self.point
            .B
            .iter()
            .zip(self.point.x_B.iter())
            .filter(|&(&j, &val)| j >= n && val > artificial_tol(self.ext.b[j - n]))
            .map(|(&j, _val)| j - n)
            .collect()
    }
}

/// Largest value of the artificial variable of a row with right-hand side `b_i` that
/// still counts as zero.
#[inline]
fn artificial_tol(b_i: f64) -> f64 {
    FEAS_TOL * (1. + b_i.abs())
}

impl std::convert::From<StandardForm> for PrimalPhase1 {
    fn from(std_form: StandardForm) -> Self {
        debug!("converting standard form to phase 1 standard form");

        let n = std_form.cols();
        let m = std_form.rows();

        let mut A = std_form.A.clone().resize_horizontally(n + m, 0.);

        for i in 0..m {
            A[(i, n + i)] = 1.;
        }

        let c = nalgebra::DVector::from_fn(n + m, |j, _| if j < n { 0. } else { 1. });

        let ext = ExtendedForm {
            A,
            b: std_form.b.clone(),
            c,
            candidates: n + m,
        };

        //b >= 0, so the artificial basis is feasible
        let point = BasicPoint {
            B: (n..n + m).collect(),
            x_B: std_form.b.clone(),
            y: nalgebra::DVector::from_element(m, 1.),
        };

        PrimalPhase1 {
            std_form,
            ext,
            point,
        }
    }
}

impl std::convert::TryFrom<PrimalPhase1> for PrimalPhase2 {
    type Error = LpError;

    fn try_from(phase_1: PrimalPhase1) -> Result<Self, Self::Error> {
        debug!("converting phase 1 standard form to phase 2 standard form");

        let PrimalPhase1 {
            std_form,
            mut ext,
            mut point,
        } = phase_1;

        let n = std_form.cols();
        let m = std_form.rows();

        //artificial variables still in the basis are at zero, so exchanging them for any
        //structural column with a nonzero entry in their row keeps the point unchanged
        for r in 0..m {
            if point.B[r] < n {
                continue;
            }

            let row = point.B[r] - n;

            if point.x_B[r] > artificial_tol(ext.b[row]) {
                return Err(LpError::new(format!(
                    "artificial variable of row {} is basic at {}, the point is not feasible",
                    row, point.x_B[r]
                )));
            }

            let lu = ext.basis_matrix(&point.B).transpose().lu();
            let mut e_r = nalgebra::DVector::zeros(m);
            e_r[r] = 1.;

            let z = lu.solve(&e_r).ok_or_else(|| {
                LpError::new("singular basis while removing artificial variables".to_string())
            })?;

            let replacement = (0..n)
                .filter(|j| !point.B.contains(j))
                .find(|&j| ext.A.column(j).dot(&z).abs() > EPS);

            match replacement {
                Some(j) => {
                    trace!("artificial variable {} leaves, {} enters", point.B[r], j);
                    point.B[r] = j;
                }

                //the row is a combination of the other rows, its artificial stays at zero
                None => debug!("row {} is redundant", r),
            }
        }

        let mut c = nalgebra::DVector::zeros(n + m);

        for j in 0..n {
            c[j] = std_form.c[j];
        }

        ext.c = c;
        ext.candidates = n;

        Ok(PrimalPhase2 {
            std_form,
            ext,
            point,
        })
    }
}
