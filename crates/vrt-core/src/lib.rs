//! # vrt-core: Routing Problem Data Model
//!
//! Fundamental data structures shared across the VRT toolkit: the immutable
//! [`VrptwInstance`] (a petgraph-backed routing network with per-node demands
//! and time windows and per-arc costs and travel times) and the unified
//! [`VrtError`] type.
//!
//! Instances are produced by `vrt-io` from Solomon benchmark files and
//! consumed read-only by the pricing and master-problem components in
//! `vrt-algo`.

pub mod error;
pub mod instance;

pub use error::{VrtError, VrtResult};
pub use instance::{Arc, InstanceError, NodeData, TimeWindow, VrptwInstance};
