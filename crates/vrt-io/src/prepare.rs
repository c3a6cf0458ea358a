//! One-stop instance preparation
//!
//! Chains the loading pipeline: parse the Solomon file, select the requested
//! customer count, build the distance and travel-time matrices, filter arcs,
//! and assemble the validated [`VrptwInstance`].

use crate::arc_filter::{filter_arcs, FilterStats};
use crate::matrices::build_matrices;
use crate::solomon::{parse_solomon_file, select_customers};
use anyhow::Result;
use std::path::Path;
use tracing::info;
use vrt_core::instance::{NodeData, TimeWindow, VrptwInstance};

/// Load a Solomon file and prepare a filtered instance over the depot and the
/// first `n_customers` customers.
pub fn load_instance(path: &Path, n_customers: usize) -> Result<(VrptwInstance, FilterStats)> {
    let solomon = parse_solomon_file(path)?;
    let rows = select_customers(&solomon, n_customers)?;
    let matrices = build_matrices(&rows);
    let (arcs, stats) = filter_arcs(&rows, &matrices, solomon.capacity);

    let nodes: Vec<NodeData> = rows
        .iter()
        .map(|c| NodeData {
            demand: c.demand,
            window: TimeWindow::new(c.ready_time, c.due_date),
        })
        .collect();

    let instance = VrptwInstance::from_parts(n_customers, solomon.capacity, nodes, arcs)?;
    info!(
        instance = %solomon.name,
        customers = n_customers,
        arcs = instance.num_arcs(),
        filtered = %format!("{:.1}%", stats.ratio_filtered() * 100.0),
        "instance prepared"
    );
    Ok((instance, stats))
}
