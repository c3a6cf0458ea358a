//! Resources tracked on partial paths
//!
//! A label carries one value per resource; extending a label along an arc
//! applies each resource's extension function, and per-node bounds decide
//! feasibility at the destination. The resource set is closed — reduced
//! cost, time, load, and the visited bitmap — so resources are addressed by
//! [`ResourceKind`] rather than by name, and the extension functions are
//! applied in the fixed order given by [`ResourceKind::ALL`].
//!
//! Dominance between labels is componentwise: a label whose every resource
//! is no larger (bit-subset for the visited bitmap) can do everything the
//! other can, at no worse cost. The labeling solver relies on exactly this
//! property to prune.

use fixedbitset::FixedBitSet;

/// The closed set of resources of the pricing problem, in extension order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// Accumulated reduced cost along the path. Unbounded.
    ReducedCost,
    /// Arrival (or service start) time; waits for the window to open.
    Time,
    /// Accumulated demand of visited nodes.
    Load,
    /// 0/1 marker per node for the elementarity constraint.
    Visited,
}

impl ResourceKind {
    /// All resources in the order their extension functions are applied.
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::ReducedCost,
        ResourceKind::Time,
        ResourceKind::Load,
        ResourceKind::Visited,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResourceKind::ReducedCost => "reduced_cost",
            ResourceKind::Time => "time",
            ResourceKind::Load => "load",
            ResourceKind::Visited => "visited",
        }
    }
}

/// Per-node lower and upper bounds for a scalar resource.
#[derive(Debug, Clone)]
pub enum Bounds {
    /// The same bounds at every node (e.g. load in `[0, Q]`).
    Constant { lower: f64, upper: f64 },
    /// Node-dependent bounds (e.g. time windows).
    PerNode { lower: Vec<f64>, upper: Vec<f64> },
}

impl Bounds {
    pub fn constant(lower: f64, upper: f64) -> Self {
        Bounds::Constant { lower, upper }
    }

    pub fn per_node(lower: Vec<f64>, upper: Vec<f64>) -> Self {
        debug_assert_eq!(lower.len(), upper.len());
        Bounds::PerNode { lower, upper }
    }

    pub fn lower(&self, node: usize) -> f64 {
        match self {
            Bounds::Constant { lower, .. } => *lower,
            Bounds::PerNode { lower, .. } => lower[node],
        }
    }

    pub fn upper(&self, node: usize) -> f64 {
        match self {
            Bounds::Constant { upper, .. } => *upper,
            Bounds::PerNode { upper, .. } => upper[node],
        }
    }

    /// Whether `value` lies within the bounds at `node`.
    pub fn contains(&self, value: f64, node: usize) -> bool {
        value >= self.lower(node) && value <= self.upper(node)
    }
}

/// Declarative description of one tracked resource: which resource, and the
/// bounds (if any) checked at the destination node after extension.
#[derive(Debug, Clone)]
pub struct ResourceDef {
    pub kind: ResourceKind,
    pub bounds: Option<Bounds>,
}

impl ResourceDef {
    pub fn new(kind: ResourceKind, bounds: Option<Bounds>) -> Self {
        Self { kind, bounds }
    }
}

/// The resource vector of one label.
#[derive(Debug, Clone, PartialEq)]
pub struct Resources {
    pub reduced_cost: f64,
    pub time: f64,
    pub load: f64,
    pub visited: FixedBitSet,
}

impl Resources {
    /// Starting values at the depot: zero reduced cost and load, time at the
    /// depot's ready time, only the start node marked visited.
    pub fn at_depot(num_nodes: usize, start_node: usize, start_time: f64) -> Self {
        let mut visited = FixedBitSet::with_capacity(num_nodes);
        visited.insert(start_node);
        Self {
            reduced_cost: 0.0,
            time: start_time,
            load: 0.0,
            visited,
        }
    }

    /// Scalar projection of a resource, used by min-resource label selection.
    /// The visited bitmap projects to its popcount.
    pub fn scalar(&self, kind: ResourceKind) -> f64 {
        match kind {
            ResourceKind::ReducedCost => self.reduced_cost,
            ResourceKind::Time => self.time,
            ResourceKind::Load => self.load,
            ResourceKind::Visited => self.visited.count_ones(..) as f64,
        }
    }

    /// Componentwise dominance: every scalar no larger, visited a subset.
    /// Equality on all components counts as dominating.
    pub fn dominates(&self, other: &Resources) -> bool {
        self.reduced_cost <= other.reduced_cost
            && self.time <= other.time
            && self.load <= other.load
            && self.visited.is_subset(&other.visited)
    }
}
