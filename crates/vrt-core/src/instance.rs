//! VRPTW instance model
//!
//! A routing instance is a directed graph over nodes `0..=N+1`, where node 0
//! is the depot at the start of a tour, nodes `1..=N` are customers, and node
//! `N+1` is the same physical depot at the end of a tour. Splitting the depot
//! keeps "not yet departed" and "returned" states apart and lets return legs
//! be ordinary arcs `(i, N+1)`.
//!
//! The graph is a [`petgraph::graph::DiGraph`] whose node weights carry the
//! per-node demand and time window and whose edge weights carry the true arc
//! cost and travel time. Arcs only exist where the upstream filter kept them,
//! so every adjacency entry has a cost and a travel time by construction.
//!
//! The instance is immutable once built. Reduced costs are NOT stored here:
//! pricing components compute a per-arc snapshot from dual values each
//! iteration, so nothing in this structure changes during a search.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A time window `[ready, due]` at a node. Arrival before `ready` waits;
/// arrival after `due` is infeasible.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub ready: f64,
    pub due: f64,
}

impl TimeWindow {
    pub fn new(ready: f64, due: f64) -> Self {
        Self { ready, due }
    }

    /// Whether `t` falls inside the window.
    pub fn contains(&self, t: f64) -> bool {
        t >= self.ready && t <= self.due
    }
}

/// Per-node attributes. Depot nodes carry zero demand and a wide window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub demand: f64,
    pub window: TimeWindow,
}

/// Per-arc attributes: Euclidean cost and travel time (service time at the
/// origin included).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arc {
    pub cost: f64,
    pub travel_time: f64,
}

/// Structural problems detected when assembling an instance. All of these
/// are fatal at load time.
#[derive(Error, Debug)]
pub enum InstanceError {
    #[error("expected {expected} nodes (start depot, {customers} customers, end depot), got {actual}")]
    NodeCount {
        customers: usize,
        expected: usize,
        actual: usize,
    },

    #[error("node {node} has negative demand {demand}")]
    NegativeDemand { node: usize, demand: f64 },

    #[error("node {node} has a reversed time window [{ready}, {due}]")]
    ReversedWindow { node: usize, ready: f64, due: f64 },

    #[error("arc ({from}, {to}) references a node outside 0..{nodes}")]
    ArcOutOfRange { from: usize, to: usize, nodes: usize },

    #[error("self-loop arc at node {node}")]
    SelfLoop { node: usize },

    #[error("arc ({from}, {to}) enters the start depot")]
    IntoStartDepot { from: usize, to: usize },

    #[error("arc ({from}, {to}) leaves the end depot")]
    OutOfEndDepot { from: usize, to: usize },

    #[error("duplicate arc ({from}, {to})")]
    DuplicateArc { from: usize, to: usize },
}

/// An immutable VRPTW instance after arc filtering.
#[derive(Debug, Clone)]
pub struct VrptwInstance {
    num_customers: usize,
    capacity: f64,
    graph: DiGraph<NodeData, Arc>,
}

impl VrptwInstance {
    /// Assemble an instance from raw parts, validating the structural
    /// invariants the rest of the toolkit relies on.
    ///
    /// `nodes` must hold N+2 entries in node order (start depot, customers,
    /// end depot); `arcs` lists `(from, to, attributes)` for every retained
    /// arc.
    pub fn from_parts(
        num_customers: usize,
        capacity: f64,
        nodes: Vec<NodeData>,
        arcs: Vec<(usize, usize, Arc)>,
    ) -> Result<Self, InstanceError> {
        let num_nodes = num_customers + 2;
        if nodes.len() != num_nodes {
            return Err(InstanceError::NodeCount {
                customers: num_customers,
                expected: num_nodes,
                actual: nodes.len(),
            });
        }

        let mut graph = DiGraph::with_capacity(num_nodes, arcs.len());
        for (i, data) in nodes.into_iter().enumerate() {
            if data.demand < 0.0 {
                return Err(InstanceError::NegativeDemand {
                    node: i,
                    demand: data.demand,
                });
            }
            if data.window.ready > data.window.due {
                return Err(InstanceError::ReversedWindow {
                    node: i,
                    ready: data.window.ready,
                    due: data.window.due,
                });
            }
            graph.add_node(data);
        }

        let end = num_nodes - 1;
        for (from, to, arc) in arcs {
            if from >= num_nodes || to >= num_nodes {
                return Err(InstanceError::ArcOutOfRange {
                    from,
                    to,
                    nodes: num_nodes,
                });
            }
            if from == to {
                return Err(InstanceError::SelfLoop { node: from });
            }
            if to == 0 {
                return Err(InstanceError::IntoStartDepot { from, to });
            }
            if from == end {
                return Err(InstanceError::OutOfEndDepot { from, to });
            }
            let (a, b) = (NodeIndex::new(from), NodeIndex::new(to));
            if graph.find_edge(a, b).is_some() {
                return Err(InstanceError::DuplicateArc { from, to });
            }
            graph.add_edge(a, b, arc);
        }

        Ok(Self {
            num_customers,
            capacity,
            graph,
        })
    }

    /// Number of customers N (excluding the two depot copies).
    pub fn num_customers(&self) -> usize {
        self.num_customers
    }

    /// Vehicle capacity Q.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Total node count, N+2.
    pub fn num_nodes(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of retained arcs.
    pub fn num_arcs(&self) -> usize {
        self.graph.edge_count()
    }

    /// The start depot, always node 0.
    pub fn start(&self) -> usize {
        0
    }

    /// The end depot, always node N+1.
    pub fn end(&self) -> usize {
        self.num_customers + 1
    }

    /// The underlying directed graph.
    pub fn graph(&self) -> &DiGraph<NodeData, Arc> {
        &self.graph
    }

    /// Attributes of node `i`.
    pub fn node(&self, i: usize) -> &NodeData {
        &self.graph[NodeIndex::new(i)]
    }

    /// Nodes reachable from `i` in one arc.
    pub fn successors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.graph.neighbors(NodeIndex::new(i)).map(|n| n.index())
    }

    /// The arc `(i, j)` with its dense arc id (stable for the lifetime of the
    /// instance, in `0..num_arcs()`), or `None` when the arc was filtered out
    /// (or never existed).
    pub fn arc_between(&self, i: usize, j: usize) -> Option<(usize, &Arc)> {
        let edge = self
            .graph
            .find_edge(NodeIndex::new(i), NodeIndex::new(j))?;
        Some((edge.index(), &self.graph[edge]))
    }

    /// Iterate over all arcs as `(from, to, arc_id, attributes)`.
    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize, usize, &Arc)> {
        self.graph.edge_references().map(|e| {
            (
                e.source().index(),
                e.target().index(),
                e.id().index(),
                e.weight(),
            )
        })
    }

    /// True cost of arc `(i, j)`, if present.
    pub fn cost(&self, i: usize, j: usize) -> Option<f64> {
        self.arc_between(i, j).map(|(_, arc)| arc.cost)
    }

    /// Travel time of arc `(i, j)`, if present.
    pub fn travel_time(&self, i: usize, j: usize) -> Option<f64> {
        self.arc_between(i, j).map(|(_, arc)| arc.travel_time)
    }

    /// Total true cost of a path given as a node sequence. Every consecutive
    /// pair must be an arc of the instance, which holds for any path produced
    /// by the labeling components.
    pub fn path_cost(&self, path: &[usize]) -> f64 {
        path.windows(2)
            .map(|leg| {
                self.arc_between(leg[0], leg[1])
                    .expect("path arc exists in instance")
                    .1
                    .cost
            })
            .sum()
    }
}
