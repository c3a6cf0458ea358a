//! Restricted master problem
//!
//! An abstract LP description ([`model`]), the set-covering builder that
//! seeds the master ([`set_covering`]), the backend capability surface
//! ([`solver`]), and the Clarabel adapter implementing it ([`clarabel`]).

pub mod clarabel;
pub mod model;
pub mod set_covering;
pub mod solver;

pub use clarabel::ClarabelRmp;
pub use model::{Constraint, ConstraintSense, LpModel, ModelError, Variable};
pub use set_covering::build_set_covering;
pub use solver::{LpSolution, RmpError, RmpSolve};
