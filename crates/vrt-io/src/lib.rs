//! # vrt-io: Instance Loading for the VRT Toolkit
//!
//! Turns Solomon benchmark files into validated [`vrt_core::VrptwInstance`]
//! values ready for column generation:
//!
//! 1. [`solomon`] parses the text format (vehicle section, customer rows).
//! 2. [`matrices`] builds the Euclidean cost and travel-time matrices.
//! 3. [`arc_filter`] removes arcs no feasible route can use and reports the
//!    filtered ratio.
//! 4. [`prepare::load_instance`] chains the three steps.

pub mod arc_filter;
pub mod matrices;
pub mod prepare;
pub mod solomon;

pub use arc_filter::{filter_arcs, FilterStats};
pub use matrices::{build_matrices, Matrices};
pub use prepare::load_instance;
pub use solomon::{parse_solomon_file, parse_solomon_str, select_customers, SolomonInstance};
