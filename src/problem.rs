use crate::error::LpError;
use crate::util::EPS;

use std::collections::{HashMap, HashSet};

const LTE_STR: &str = "\u{2264}";
const EQ_STR: &str = "\u{003D}";
const GTE_STR: &str = "\u{2265}";
const INF_STR: &str = "\u{221E}";

/// A linear program `minimize c·x` subject to linear constraints and variable bounds.
///
/// Variables and constraints are identified by the ids handed out when they are added,
/// which are dense indices in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Problem {
    pub variables: Vec<Variable>,
    pub constraints: Vec<Constraint>,
    var_names: HashSet<String>, //these strings are duplicated in the variables
}

impl Problem {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_var(
        &mut self,
        obj_coeff: f64,
        bound: Bound,
        name: Option<String>,
    ) -> Result<VariableId, LpError> {
        if !obj_coeff.is_finite() {
            return Err(LpError::new(format!(
                "invalid objective coefficient: {}",
                obj_coeff
            )));
        }

        let bound_valid = match bound {
            Bound::Free => true,
            Bound::Lower(lb) => lb.is_finite(),
            Bound::Upper(ub) => ub.is_finite(),
            Bound::TwoSided(lb, ub) => lb.is_finite() && ub.is_finite() && lb <= ub,
            Bound::Fixed(fixed_val) => fixed_val.is_finite(),
        };

        if !bound_valid {
            return Err(LpError::new(format!("invalid bound: {:?}", bound)));
        }

        if let Some(name) = &name {
            if !self.var_names.insert(name.clone()) {
                return Err(LpError::new(format!(
                    "variable names must be unique, {} was added twice",
                    name
                )));
            }
        }

        let id = VariableId(self.variables.len());
        self.variables.push(Variable::new(id, obj_coeff, bound, name));
        Ok(id)
    }

    pub fn add_constraint(
        &mut self,
        coeffs: Vec<(VariableId, f64)>,
        op: ConstraintOp,
        rhs: f64,
    ) -> Result<ConstraintId, LpError> {
        self.push_constraint(None, coeffs, op, rhs)
    }

    pub fn add_named_constraint(
        &mut self,
        name: String,
        coeffs: Vec<(VariableId, f64)>,
        op: ConstraintOp,
        rhs: f64,
    ) -> Result<ConstraintId, LpError> {
        self.push_constraint(Some(name), coeffs, op, rhs)
    }

    fn push_constraint(
        &mut self,
        name: Option<String>,
        coeffs: Vec<(VariableId, f64)>,
        op: ConstraintOp,
        rhs: f64,
    ) -> Result<ConstraintId, LpError> {
        if let Some((invalid_var, _coeff)) = coeffs
            .iter()
            .find(|(id, _coeff)| id.0 >= self.variables.len())
        {
            return Err(LpError::new(format!("{:?} is invalid", invalid_var)));
        }

        if let Some((var, coeff)) = coeffs.iter().find(|(_id, coeff)| !coeff.is_finite()) {
            return Err(LpError::new(format!(
                "invalid coefficient {} for {:?}",
                coeff, var
            )));
        }

        if !rhs.is_finite() {
            return Err(LpError::new(format!("invalid right-hand side: {}", rhs)));
        }

        let id = ConstraintId(self.constraints.len());

        self.constraints.push(Constraint {
            id,
            name,
            coeffs,
            op,
            rhs,
        });

        Ok(id)
    }

    pub fn vars(&self) -> &[Variable] {
        self.variables.as_slice()
    }

    pub fn constraints(&self) -> &[Constraint] {
        self.constraints.as_slice()
    }

    pub fn obj(&self, x: &[f64]) -> f64 {
        self.variables
            .iter()
            .zip(x.iter())
            .map(|(var, x_i)| var.obj_coeff * x_i)
            .sum()
    }

    pub fn is_feasible(&self, x: &[f64]) -> bool {
        if x.len() != self.variables.len() {
            return false;
        }

        let within_bounds = self
            .variables
            .iter()
            .zip(x.iter())
            .all(|(var, &val)| var.bound.contains(val));

        within_bounds
            && self
                .constraints
                .iter()
                .all(|constraint| constraint.is_feasible(x))
    }
}

#[derive(Debug, Clone)]
pub struct Variable {
    pub id: VariableId,
    pub obj_coeff: f64,
    pub bound: Bound,
    pub name: Option<String>,
}

impl Variable {
    fn new(id: VariableId, obj_coeff: f64, bound: Bound, name: Option<String>) -> Self {
        Self {
            id,
            obj_coeff,
            bound,
            name,
        }
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        //Problem add_var guarantees that different variables have different ids
        self.id == other.id
    }
}

impl Eq for Variable {}

impl std::hash::Hash for Variable {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    Free,
    Lower(f64),
    Upper(f64),
    TwoSided(f64, f64),
    Fixed(f64),
}

impl Bound {
    pub fn contains(&self, val: f64) -> bool {
        match *self {
            Bound::Free => true,
            Bound::Lower(lb) => val >= lb - EPS,
            Bound::Upper(ub) => val <= ub + EPS,
            Bound::TwoSided(lb, ub) => val >= lb - EPS && val <= ub + EPS,
            Bound::Fixed(fixed_val) => (val - fixed_val).abs() <= EPS,
        }
    }

    fn display(&self, f: &mut std::fmt::Formatter, var: &Variable) -> std::fmt::Result {
        match self {
            Bound::Free => write!(f, "{} free", var),
            Bound::Lower(lb) => write!(f, "{} {gte} {}", var, lb, gte = GTE_STR),
            Bound::Upper(ub) => write!(f, "{} {lte} {}", var, ub, lte = LTE_STR),
            Bound::TwoSided(lb, ub) => {
                write!(f, "{} {lte} {} {lte} {}", lb, var, ub, lte = LTE_STR)
            }
            Bound::Fixed(val) => write!(f, "{} {eq} {}", var, val, eq = EQ_STR),
        }
    }
}

impl std::fmt::Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Bound::Free => write!(f, "(-{inf}, {inf})", inf = INF_STR),
            Bound::Lower(lb) => write!(f, "[{}, {inf})", lb, inf = INF_STR),
            Bound::Upper(ub) => write!(f, "(-{inf}, {}]", ub, inf = INF_STR),
            Bound::TwoSided(lb, ub) => write!(f, "[{}, {}]", lb, ub),
            Bound::Fixed(val) => write!(f, "[{val}, {val}]", val = val),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Constraint {
    pub id: ConstraintId,
    pub name: Option<String>,
    pub coeffs: Vec<(VariableId, f64)>,
    pub op: ConstraintOp,
    pub rhs: f64,
}

impl Constraint {
    pub fn lhs(&self, x: &[f64]) -> f64 {
        self.coeffs
            .iter()
            .map(|(var, coeff)| coeff * x[var.0])
            .sum()
    }

    fn is_feasible(&self, x: &[f64]) -> bool {
        let lhs = self.lhs(x);

        match self.op {
            ConstraintOp::Lte => lhs <= self.rhs + EPS,
            ConstraintOp::Eq => (lhs - self.rhs).abs() < EPS,
            ConstraintOp::Gte => lhs >= self.rhs - EPS,
        }
    }

    fn display(
        &self,
        f: &mut std::fmt::Formatter,
        var_names: &HashMap<VariableId, &Variable>,
    ) -> std::fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "{}: ", name)?;
        }

        for (var_id, coeff) in &self.coeffs {
            if *coeff == 0. {
                continue;
            }

            match var_names.get(var_id) {
                Some(var) => write!(
                    f,
                    "{} {} {} ",
                    if *coeff >= 0. { "+" } else { "-" },
                    coeff.abs(),
                    var
                )?,

                None => write!(f, "? ")?,
            }
        }

        write!(f, "{} {}", self.op, self.rhs)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VariableId(usize);

impl std::convert::From<usize> for VariableId {
    fn from(id: usize) -> Self {
        Self(id)
    }
}

impl std::convert::From<VariableId> for usize {
    fn from(id: VariableId) -> Self {
        id.0
    }
}

impl std::convert::From<&VariableId> for usize {
    fn from(id: &VariableId) -> Self {
        id.0
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConstraintId(usize);

impl std::convert::From<ConstraintId> for usize {
    fn from(id: ConstraintId) -> Self {
        id.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOp {
    Lte,
    Eq,
    Gte,
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "minimize")?;
        let mut var_id_to_var: HashMap<VariableId, &Variable> = HashMap::new();

        for var in &self.variables {
            var_id_to_var.insert(var.id, var);

            if var.obj_coeff == 0. {
                continue;
            }

            write!(
                f,
                "{} {} {} ",
                if var.obj_coeff > 0. { "+" } else { "-" },
                var.obj_coeff.abs(),
                var
            )?;
        }

        writeln!(f, "\n\nsubject to")?;

        for constraint in &self.constraints {
            constraint.display(f, &var_id_to_var)?;
            writeln!(f)?;
        }

        writeln!(f, "\nwith the bounds")?;

        for var in &self.variables {
            var.bound.display(f, var)?;
            writeln!(f)?;
        }

        Ok(())
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "id[{}]", self.id.0),
        }
    }
}

impl std::fmt::Display for ConstraintOp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ConstraintOp::Lte => write!(f, "{}", LTE_STR),
            ConstraintOp::Eq => write!(f, "{}", EQ_STR),
            ConstraintOp::Gte => write!(f, "{}", GTE_STR),
        }
    }
}
