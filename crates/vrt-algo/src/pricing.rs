//! ESPPTWC pricing model
//!
//! The pricing subproblem of the column-generation loop: find a minimum
//! reduced-cost elementary path from the start depot to the end depot that
//! respects time windows and vehicle capacity. This module defines the model
//! side — the four standard resources, their extension functions, and
//! feasibility — while [`crate::labeling`] runs the search.
//!
//! Extension functions, applied in the fixed [`ResourceKind::ALL`] order when
//! traversing arc `(i, j)`:
//!
//! - reduced cost: `old + c̃(i, j)`, where `c̃(i, j) = c(i, j) − π(i)` for the
//!   duals of the current master solution;
//! - time: `max(old + τ(i, j), ready(j))` — arriving early waits for the
//!   window to open;
//! - load: `old + demand(j)`;
//! - visited: copy of the bitmap with bit `j` set.
//!
//! The reduced costs live in a snapshot owned by the model and rebuilt by
//! [`EspptwcModel::adjust_costs`] between pricing runs; the shared instance
//! is never mutated, so a labeling search can never observe a half-written
//! cost map.
//!
//! Elementarity is enforced at extension time: an arc into an
//! already-visited node yields no label at all. Checking the visited bitmap
//! against its 0/1 bounds after the fact would not catch the violation, since
//! re-marking a visited node leaves every entry at 1.

use std::collections::HashMap;

use vrt_core::instance::VrptwInstance;

use crate::label::Label;
use crate::labeling::PricingProblem;
use crate::resource::{Bounds, ResourceDef, ResourceKind, Resources};

/// Per-arc reduced costs, indexed by the instance's dense arc ids.
#[derive(Debug, Clone)]
struct ReducedCosts(Vec<f64>);

/// The ESPPTWC model over a shared instance.
pub struct EspptwcModel<'a> {
    instance: &'a VrptwInstance,
    resources: Vec<ResourceDef>,
    reduced: ReducedCosts,
}

impl<'a> EspptwcModel<'a> {
    /// Build the model, registering the four standard resources. Reduced
    /// costs start equal to the true costs (all duals zero).
    pub fn new(instance: &'a VrptwInstance) -> Self {
        let num_nodes = instance.num_nodes();
        let (ready, due): (Vec<f64>, Vec<f64>) = (0..num_nodes)
            .map(|i| {
                let w = instance.node(i).window;
                (w.ready, w.due)
            })
            .unzip();

        let resources = vec![
            ResourceDef::new(ResourceKind::ReducedCost, None),
            ResourceDef::new(ResourceKind::Time, Some(Bounds::per_node(ready, due))),
            ResourceDef::new(
                ResourceKind::Load,
                Some(Bounds::constant(0.0, instance.capacity())),
            ),
            ResourceDef::new(ResourceKind::Visited, Some(Bounds::constant(0.0, 1.0))),
        ];

        let mut reduced = ReducedCosts(vec![0.0; instance.num_arcs()]);
        for (_, _, arc_id, arc) in instance.arcs() {
            reduced.0[arc_id] = arc.cost;
        }

        Self {
            instance,
            resources,
            reduced,
        }
    }

    /// The instance this model prices over.
    pub fn instance(&self) -> &VrptwInstance {
        self.instance
    }

    /// The registered resource definitions, in extension order.
    pub fn resources(&self) -> &[ResourceDef] {
        &self.resources
    }

    /// Rewrite the reduced-cost snapshot as `c̃(i, j) = c(i, j) − π(i)`.
    /// Nodes absent from `duals` contribute zero; the start depot carries no
    /// cover constraint, so its dual is zero by convention. Must be called
    /// before each pricing run once fresh duals are available.
    pub fn adjust_costs(&mut self, duals: &HashMap<usize, f64>) {
        for (from, _, arc_id, arc) in self.instance.arcs() {
            let dual = duals.get(&from).copied().unwrap_or(0.0);
            self.reduced.0[arc_id] = arc.cost - dual;
        }
    }

    /// Total TRUE cost of a path (not reduced cost); this is the objective
    /// coefficient of the corresponding master variable.
    pub fn path_cost(&self, path: &[usize]) -> f64 {
        self.instance.path_cost(path)
    }
}

impl PricingProblem for EspptwcModel<'_> {
    fn num_nodes(&self) -> usize {
        self.instance.num_nodes()
    }

    fn end_node(&self) -> usize {
        self.instance.end()
    }

    fn initial_label(&self) -> Label {
        let start = self.instance.start();
        let ready = self.instance.node(start).window.ready;
        Label {
            node: start,
            path: vec![start],
            resources: Resources::at_depot(self.instance.num_nodes(), start, ready),
        }
    }

    fn successors(&self, node: usize) -> Vec<usize> {
        self.instance.successors(node).collect()
    }

    fn extend(&self, label: &Label, dest: usize) -> Option<Label> {
        let (arc_id, arc) = self.instance.arc_between(label.node, dest)?;
        if label.resources.visited.contains(dest) {
            return None;
        }

        let dest_node = self.instance.node(dest);
        let mut resources = label.resources.clone();
        resources.reduced_cost += self.reduced.0[arc_id];
        resources.time = (resources.time + arc.travel_time).max(dest_node.window.ready);
        resources.load += dest_node.demand;
        resources.visited.insert(dest);

        let mut path = label.path.clone();
        path.push(dest);

        Some(Label {
            node: dest,
            path,
            resources,
        })
    }

    fn is_feasible(&self, label: &Label) -> bool {
        for def in &self.resources {
            let Some(bounds) = &def.bounds else {
                continue;
            };
            let ok = match def.kind {
                ResourceKind::ReducedCost => true,
                ResourceKind::Time => bounds.contains(label.resources.time, label.node),
                ResourceKind::Load => bounds.contains(label.resources.load, label.node),
                // Entries are 0/1 by construction; elementarity is enforced
                // when extending, where a violation is still observable.
                ResourceKind::Visited => true,
            };
            if !ok {
                return false;
            }
        }
        true
    }
}
