//! Labels and the label arena
//!
//! A label is a partial elementary path ending at some node together with its
//! resource vector. Labels are owned by [`LabelPool`], an arena addressed by
//! integer handles: per-node buckets store handles, dominated labels are
//! tombstoned in place, and stale handles are skipped when encountered. This
//! keeps removal O(1) instead of scanning lists for value equality.

use crate::resource::Resources;

/// A partial path ending at `node` with its resource vector.
///
/// Invariants maintained by the pricing model:
/// - `path` starts at the start depot and ends at `node`;
/// - all entries are pairwise distinct (elementary);
/// - `resources.visited` has exactly the bits of `path` set.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub node: usize,
    pub path: Vec<usize>,
    pub resources: Resources,
}

impl Label {
    /// Reduced cost accumulated along the path.
    pub fn reduced_cost(&self) -> f64 {
        self.resources.reduced_cost
    }

    /// Componentwise dominance against another label at the same node.
    pub fn dominates(&self, other: &Label) -> bool {
        debug_assert_eq!(self.node, other.node, "dominance compares same-node labels");
        self.resources.dominates(&other.resources)
    }

    /// Whether the path visits no node twice.
    pub fn is_elementary(&self) -> bool {
        self.path
            .iter()
            .enumerate()
            .all(|(i, a)| self.path[i + 1..].iter().all(|b| a != b))
    }
}

/// Handle into a [`LabelPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelId(usize);

struct Slot {
    label: Label,
    alive: bool,
}

/// Arena of labels for one labeling run.
#[derive(Default)]
pub struct LabelPool {
    slots: Vec<Slot>,
    alive: usize,
}

impl LabelPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: Label) -> LabelId {
        let id = LabelId(self.slots.len());
        self.slots.push(Slot { label, alive: true });
        self.alive += 1;
        id
    }

    pub fn get(&self, id: LabelId) -> &Label {
        &self.slots[id.0].label
    }

    pub fn is_alive(&self, id: LabelId) -> bool {
        self.slots[id.0].alive
    }

    /// Tombstone a dominated label. Handles to it remain valid but stale.
    pub fn retire(&mut self, id: LabelId) {
        let slot = &mut self.slots[id.0];
        if slot.alive {
            slot.alive = false;
            self.alive -= 1;
        }
    }

    /// Labels ever created in this run.
    pub fn created(&self) -> usize {
        self.slots.len()
    }

    /// Labels not yet retired.
    pub fn alive_count(&self) -> usize {
        self.alive
    }
}
