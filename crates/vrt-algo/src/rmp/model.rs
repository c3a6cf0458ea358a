//! Abstract linear-program model
//!
//! A solver-independent LP/MIP description: an ordered variable table and an
//! ordered constraint table, both addressable by name. Coefficients are
//! stored column-wise on the variables (only nonzeros), which is the shape
//! both incremental column addition and sparse matrix assembly want.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

/// Direction of a linear constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintSense {
    Less,
    Equal,
    Greater,
}

impl fmt::Display for ConstraintSense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConstraintSense::Less => "<=",
            ConstraintSense::Equal => "=",
            ConstraintSense::Greater => ">=",
        };
        f.write_str(s)
    }
}

/// A decision variable and its column of constraint coefficients.
#[derive(Debug, Clone)]
pub struct Variable {
    pub name: String,
    pub lb: f64,
    /// `None` means unbounded above.
    pub ub: Option<f64>,
    pub integer: bool,
    /// Objective coefficient.
    pub obj: f64,
    /// Nonzero coefficients as `(constraint index, value)`.
    pub column: Vec<(usize, f64)>,
}

/// A linear constraint; its coefficients live on the variables' columns.
#[derive(Debug, Clone)]
pub struct Constraint {
    pub name: String,
    pub sense: ConstraintSense,
    pub rhs: f64,
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("variable '{0}' already exists in the model")]
    DuplicateVariable(String),

    #[error("constraint '{0}' already exists in the model")]
    DuplicateConstraint(String),

    #[error("unknown constraint '{0}' in column coefficients")]
    UnknownConstraint(String),

    #[error("unknown variable '{0}' in constraint coefficients")]
    UnknownVariable(String),
}

/// Pure mathematical representation of an LP/MIP model, minimization sense.
#[derive(Debug, Clone, Default)]
pub struct LpModel {
    pub name: String,
    variables: Vec<Variable>,
    constraints: Vec<Constraint>,
    variable_index: HashMap<String, usize>,
    constraint_index: HashMap<String, usize>,
}

impl LpModel {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn variable_index(&self, name: &str) -> Option<usize> {
        self.variable_index.get(name).copied()
    }

    pub fn constraint_index(&self, name: &str) -> Option<usize> {
        self.constraint_index.get(name).copied()
    }

    pub fn has_integer_variables(&self) -> bool {
        self.variables.iter().any(|v| v.integer)
    }

    /// Add a variable with its sparse column: `col_coeffs` maps existing
    /// constraint names to coefficients, anything omitted is zero.
    pub fn add_variable(
        &mut self,
        name: &str,
        obj: f64,
        col_coeffs: &[(String, f64)],
        lb: f64,
        ub: Option<f64>,
        integer: bool,
    ) -> Result<usize, ModelError> {
        if self.variable_index.contains_key(name) {
            return Err(ModelError::DuplicateVariable(name.to_string()));
        }
        let mut column = Vec::with_capacity(col_coeffs.len());
        for (constraint_name, coeff) in col_coeffs {
            let row = self
                .constraint_index
                .get(constraint_name)
                .copied()
                .ok_or_else(|| ModelError::UnknownConstraint(constraint_name.clone()))?;
            column.push((row, *coeff));
        }

        let index = self.variables.len();
        self.variables.push(Variable {
            name: name.to_string(),
            lb,
            ub,
            integer,
            obj,
            column,
        });
        self.variable_index.insert(name.to_string(), index);
        Ok(index)
    }

    /// Add a constraint over existing variables; `coefficients` maps variable
    /// names to values, anything omitted is zero.
    pub fn add_constraint(
        &mut self,
        name: &str,
        coefficients: &[(String, f64)],
        sense: ConstraintSense,
        rhs: f64,
    ) -> Result<usize, ModelError> {
        if self.constraint_index.contains_key(name) {
            return Err(ModelError::DuplicateConstraint(name.to_string()));
        }
        let row = self.constraints.len();
        for (variable_name, coeff) in coefficients {
            let col = self
                .variable_index
                .get(variable_name)
                .copied()
                .ok_or_else(|| ModelError::UnknownVariable(variable_name.clone()))?;
            self.variables[col].column.push((row, *coeff));
        }
        self.constraints.push(Constraint {
            name: name.to_string(),
            sense,
            rhs,
        });
        self.constraint_index.insert(name.to_string(), row);
        Ok(row)
    }

    /// Dense coefficient lookup, mainly for rendering and tests.
    pub fn coefficient(&self, constraint: usize, variable: usize) -> f64 {
        self.variables[variable]
            .column
            .iter()
            .find(|&&(row, _)| row == constraint)
            .map(|&(_, v)| v)
            .unwrap_or(0.0)
    }
}

// Tableau rendering: variable names across the top, objective row, then one
// row per constraint with `·` for structural zeros.
impl fmt::Display for LpModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let col_width = self
            .variables
            .iter()
            .map(|v| v.name.len())
            .chain([7])
            .max()
            .unwrap_or(7);
        let row_width = self
            .constraints
            .iter()
            .map(|c| c.name.len())
            .chain([10])
            .max()
            .unwrap_or(10);

        let fmt_coeff = |value: f64| -> String {
            if value.abs() < 1e-10 {
                "·".to_string()
            } else {
                format!("{value:.3}")
            }
        };

        write!(f, "{:width$}  ", "", width = row_width)?;
        for v in &self.variables {
            write!(f, "{:>col_width$}", v.name)?;
        }
        writeln!(f)?;

        write!(f, "{:<width$}  ", "obj", width = row_width)?;
        for v in &self.variables {
            write!(f, "{:>col_width$}", fmt_coeff(v.obj))?;
        }
        writeln!(f)?;

        for (row, constraint) in self.constraints.iter().enumerate() {
            write!(f, "{:<row_width$}  ", constraint.name)?;
            for col in 0..self.variables.len() {
                write!(f, "{:>col_width$}", fmt_coeff(self.coefficient(row, col)))?;
            }
            writeln!(f, "   {} {:.3}", constraint.sense, constraint.rhs)?;
        }
        Ok(())
    }
}
