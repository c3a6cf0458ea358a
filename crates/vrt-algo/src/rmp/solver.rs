//! LP backend capability surface
//!
//! The master-problem loop needs exactly two things from a backend: solve
//! the current model returning primal values and duals, and add one column
//! incrementally. Any backend implementing [`RmpSolve`] plugs in.

use std::collections::HashMap;

use thiserror::Error;

use super::model::ModelError;

/// One solve of the restricted master problem.
#[derive(Debug, Clone)]
pub struct LpSolution {
    pub objective: f64,
    /// Value per variable name.
    pub primal: HashMap<String, f64>,
    /// Shadow price per constraint name, as ∂objective/∂rhs: nonnegative for
    /// binding `>=` rows of a minimization, nonpositive for `<=` rows.
    pub duals: HashMap<String, f64>,
}

#[derive(Error, Debug)]
pub enum RmpError {
    #[error("restricted master problem is infeasible")]
    Infeasible,

    #[error("restricted master problem is unbounded")]
    Unbounded,

    #[error("the LP backend does not support integer variables")]
    Integrality,

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("LP backend failure: {0}")]
    Backend(String),
}

/// Capability set of an RMP backend: solve, and add a column in place.
pub trait RmpSolve {
    /// Solve the current model, returning objective, primal values for every
    /// variable, and dual values for every constraint.
    fn solve(&mut self) -> Result<LpSolution, RmpError>;

    /// Add one variable (column) given only its nonzero coefficients per
    /// existing constraint. Both the abstract model and the backend state
    /// must reflect the addition without rebuilding either.
    fn add_variable(
        &mut self,
        name: &str,
        obj: f64,
        col_coeffs: &[(String, f64)],
        lb: f64,
        ub: Option<f64>,
        integer: bool,
    ) -> Result<(), RmpError>;
}
