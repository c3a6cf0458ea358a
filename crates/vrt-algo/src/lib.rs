//! # vrt-algo: Pricing and Column Generation for VRPTW
//!
//! The algorithmic core of the VRT toolkit:
//!
//! - [`resource`] — the closed resource set (reduced cost, time, load,
//!   visited) with declarative bounds and componentwise dominance;
//! - [`label`] — partial paths with their resource vectors, stored in an
//!   arena with tombstoned removal;
//! - [`pricing`] — the ESPPTWC model: resource extension functions,
//!   feasibility, and the per-iteration reduced-cost snapshot;
//! - [`labeling`] — the generic bucket labeling solver with dominance
//!   pruning and pluggable label selection;
//! - [`rmp`] — the abstract LP model, the set-covering builder, and the
//!   Clarabel backend adapter returning primal values and duals;
//! - [`colgen`] — the price-and-add loop coupling master and pricing.
//!
//! ## Example
//!
//! ```ignore
//! use vrt_algo::{solve_vrptw, CgConfig};
//!
//! let (instance, _stats) = vrt_io::load_instance(path, 25)?;
//! let solution = solve_vrptw(&instance, &CgConfig::default())?;
//! println!("LP optimum {:.2} using {} routes", solution.objective, solution.routes.len());
//! ```

pub mod colgen;
pub mod label;
pub mod labeling;
pub mod pricing;
pub mod resource;
pub mod rmp;
pub mod test_instances;

pub use colgen::{solve_vrptw, CgConfig, CgError, CgSolution, ColumnGeneration, RouteActivity};
pub use label::{Label, LabelId, LabelPool};
pub use labeling::{BestLabels, LabelSelector, LabelingError, LabelingSolver, PricingProblem};
pub use pricing::EspptwcModel;
pub use resource::{Bounds, ResourceDef, ResourceKind, Resources};
pub use rmp::{
    build_set_covering, ClarabelRmp, ConstraintSense, LpModel, LpSolution, RmpError, RmpSolve,
};
