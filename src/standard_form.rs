#![allow(non_snake_case)]

use crate::problem::{Bound, ConstraintId, ConstraintOp, Problem};

use std::collections::HashMap;

/// `minimize c·x + offset` subject to `A x = b`, `x ≥ 0`, `b ≥ 0`.
///
/// Columns are the transformed structural variables followed by one slack or surplus
/// column per inequality row. The first rows are the constraints of the original
/// problem, in order, followed by one row per two-sided variable bound.
#[derive(Debug, Clone)]
pub struct StandardForm {
    pub c: nalgebra::DVector<f64>,
    pub A: nalgebra::DMatrix<f64>,
    pub b: nalgebra::DVector<f64>,
    pub obj_offset: f64,
    columns: Vec<ColumnMap>,
    row_signs: Vec<f64>,
    constraint_ids: Vec<ConstraintId>,
}

/// How an original variable is expressed through standard form columns.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ColumnMap {
    /// `x = offset + sign * x[col]`
    Shifted { col: usize, offset: f64, sign: f64 },
    /// `x = x[pos] - x[neg]`
    Split { pos: usize, neg: usize },
    Fixed(f64),
}

impl std::convert::From<&Problem> for StandardForm {
    fn from(prob: &Problem) -> StandardForm {
        let mut columns = Vec::with_capacity(prob.vars().len());
        let mut bound_rows = Vec::new();
        let mut num_structural = 0;

        for var in prob.vars() {
            let map = match var.bound {
                Bound::Lower(lb) => ColumnMap::Shifted {
                    col: num_structural,
                    offset: lb,
                    sign: 1.,
                },

                Bound::Upper(ub) => ColumnMap::Shifted {
                    col: num_structural,
                    offset: ub,
                    sign: -1.,
                },

                Bound::TwoSided(lb, ub) => {
                    bound_rows.push((num_structural, ub - lb));

                    ColumnMap::Shifted {
                        col: num_structural,
                        offset: lb,
                        sign: 1.,
                    }
                }

                Bound::Fixed(val) => ColumnMap::Fixed(val),

                Bound::Free => ColumnMap::Split {
                    pos: num_structural,
                    neg: num_structural + 1,
                },
            };

            num_structural += match map {
                ColumnMap::Shifted { .. } => 1,
                ColumnMap::Split { .. } => 2,
                ColumnMap::Fixed(..) => 0,
            };

            columns.push(map);
        }

        let num_constraints = prob.constraints().len();
        let m = num_constraints + bound_rows.len();

        let num_slack_vars = prob
            .constraints()
            .iter()
            .filter(|constraint| !matches!(constraint.op, ConstraintOp::Eq))
            .count()
            + bound_rows.len();

        let total_vars = num_structural + num_slack_vars;

        let mut c = nalgebra::DVector::zeros(total_vars);
        let mut A = nalgebra::DMatrix::zeros(m, total_vars);
        let mut b = nalgebra::DVector::zeros(m);
        let mut obj_offset = 0.;

        for (var, map) in prob.vars().iter().zip(&columns) {
            match *map {
                ColumnMap::Shifted { col, offset, sign } => {
                    c[col] += sign * var.obj_coeff;
                    obj_offset += offset * var.obj_coeff;
                }

                ColumnMap::Split { pos, neg } => {
                    c[pos] += var.obj_coeff;
                    c[neg] -= var.obj_coeff;
                }

                ColumnMap::Fixed(val) => obj_offset += val * var.obj_coeff,
            }
        }

        let mut cur_slack_col = num_structural;

        for (i, constraint) in prob.constraints().iter().enumerate() {
            b[i] = constraint.rhs;

            //repeated entries for the same variable are summed
            for (id, coeff) in &constraint.coeffs {
                match columns[usize::from(id)] {
                    ColumnMap::Shifted { col, offset, sign } => {
                        A[(i, col)] += sign * coeff;
                        b[i] -= offset * coeff;
                    }

                    ColumnMap::Split { pos, neg } => {
                        A[(i, pos)] += coeff;
                        A[(i, neg)] -= coeff;
                    }

                    ColumnMap::Fixed(val) => b[i] -= val * coeff,
                }
            }

            if let Some(slack_coeff) = match constraint.op {
                ConstraintOp::Lte => Some(1.),
                ConstraintOp::Eq => None,
                ConstraintOp::Gte => Some(-1.),
            } {
                A[(i, cur_slack_col)] = slack_coeff;
                cur_slack_col += 1;
            }
        }

        for (k, (col, width)) in bound_rows.iter().enumerate() {
            let i = num_constraints + k;
            A[(i, *col)] = 1.;
            A[(i, cur_slack_col)] = 1.;
            b[i] = *width;
            cur_slack_col += 1;
        }

        assert_eq!(cur_slack_col, total_vars);

        let mut row_signs = vec![1.; m];

        for (i, sign) in row_signs.iter_mut().enumerate() {
            if b[i] < 0. {
                *sign = -1.;
                b[i] = -b[i];
                A.row_mut(i).neg_mut();
            }
        }

        StandardForm {
            c,
            A,
            b,
            obj_offset,
            columns,
            row_signs,
            constraint_ids: prob.constraints().iter().map(|con| con.id).collect(),
        }
    }
}

impl StandardForm {
    pub fn rows(&self) -> usize {
        self.A.nrows()
    }

    pub fn cols(&self) -> usize {
        self.A.ncols()
    }

    pub fn obj(&self, x: &nalgebra::DVector<f64>) -> f64 {
        self.c.dot(x) + self.obj_offset
    }

    /// Values of the original variables for a point of the standard form.
    pub fn original_x(&self, x: &nalgebra::DVector<f64>) -> Vec<f64> {
        self.columns
            .iter()
            .map(|map| match *map {
                ColumnMap::Shifted { col, offset, sign } => offset + sign * x[col],
                ColumnMap::Split { pos, neg } => x[pos] - x[neg],
                ColumnMap::Fixed(val) => val,
            })
            .collect()
    }

    /// Shadow prices of the original constraints given the row multipliers `y`.
    pub fn original_duals(&self, y: &nalgebra::DVector<f64>) -> HashMap<ConstraintId, f64> {
        self.constraint_ids
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, self.row_signs[i] * y[i]))
            .collect()
    }
}
