//! # Labeling algorithm for resource-constrained shortest paths
//!
//! Solves the Elementary Shortest Path Problem with Resource Constraints
//! (ESPPRC): find a minimum reduced-cost simple path from the start depot to
//! the end depot whose resource values stay within their per-node bounds.
//! This is the pricing subproblem of column generation for vehicle routing,
//! and its difficulty is what makes the overall approach interesting —
//! ESPPRC is NP-hard (Dror 1994), yet dominance makes realistic instances
//! tractable.
//!
//! ## The algorithm
//!
//! A **label** encodes a partial path and its resource consumption. The
//! solver maintains two per-node buckets:
//!
//! ```text
//! settled(i)   all surviving labels ending at node i
//! open(i)      the subset not yet extended
//! ```
//!
//! Starting from a single label at the depot, it repeatedly pops an open
//! label (the order is a pluggable [`LabelSelector`]) and extends it along
//! every outgoing arc. Each extension is kept only if it is feasible and not
//! dominated by a settled label at the destination; conversely it evicts any
//! settled labels it dominates. The search ends when every bucket is empty,
//! and the answer is the set of minimum reduced-cost labels at the end depot.
//!
//! ## Why dominance is sound
//!
//! Label `L` dominates `L'` at the same node when every resource of `L` is
//! no larger — componentwise scalars, bit-subset for the visited bitmap.
//! Because extension functions are monotone in their inputs, any feasible
//! completion of `L'` is then also feasible from `L` at no worse reduced
//! cost, so discarding `L'` never loses the optimum. The visited bitmap is
//! part of the comparison: a label that has excluded more nodes has fewer
//! completions, so it can only dominate labels that have excluded at least
//! as many.
//!
//! Feasibility is checked **before** insertion, so an infeasible label never
//! acts as a dominator. Termination follows from the finite number of
//! elementary paths; dominance only shrinks the buckets relative to that
//! bound.
//!
//! ## References
//!
//! - **Desrochers, Desrosiers & Solomon (1992)**: "A New Optimization
//!   Algorithm for the Vehicle Routing Problem with Time Windows",
//!   Operations Research 40(2). The classic labeling/column-generation
//!   pairing for VRPTW.
//! - **Feillet et al. (2004)**: "An exact algorithm for the elementary
//!   shortest path problem with resource constraints", Networks 44(3).
//!   Introduced the visited-vector treatment of elementarity used here.
//! - **Irnich & Desaulniers (2005)**: "Shortest Path Problems with Resource
//!   Constraints", in *Column Generation*, Springer. Survey of REFs and
//!   dominance rules.

use std::collections::VecDeque;

use thiserror::Error;
use tracing::debug;

use crate::label::{Label, LabelId, LabelPool};
use crate::resource::ResourceKind;

/// The model side of a labeling run: topology, the initial label, extension,
/// and feasibility. [`crate::pricing::EspptwcModel`] is the implementation
/// used by column generation.
pub trait PricingProblem {
    /// Total node count; nodes are `0..num_nodes()`.
    fn num_nodes(&self) -> usize;

    /// The sink node. Labels settled here are candidate answers.
    fn end_node(&self) -> usize {
        self.num_nodes() - 1
    }

    /// The seed label at the start depot.
    fn initial_label(&self) -> Label;

    /// Nodes reachable from `node` in one arc.
    fn successors(&self, node: usize) -> Vec<usize>;

    /// Extend a label along the arc to `dest`, applying every resource
    /// extension function in fixed order. `None` when there is no such arc
    /// or the extension is structurally impossible (destination already
    /// visited).
    fn extend(&self, label: &Label, dest: usize) -> Option<Label>;

    /// Whether every bounded resource of `label` is within its bounds at
    /// `label.node`.
    fn is_feasible(&self, label: &Label) -> bool;
}

/// Strategy for picking the next open label to extend. The choice affects
/// the order of exploration (and how fast dominance starts pruning), never
/// the final answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelSelector {
    /// First open label in node-bucket scan order.
    #[default]
    Fifo,
    /// Most recently opened label of the first nonempty bucket.
    Lifo,
    /// Globally minimal value of the given resource. Column generation uses
    /// this with [`ResourceKind::ReducedCost`].
    MinResource(ResourceKind),
}

#[derive(Error, Debug)]
pub enum LabelingError {
    /// The optional per-call step ceiling was reached before the open
    /// buckets drained.
    #[error("labeling step limit of {limit} exceeded")]
    StepLimitExceeded { limit: usize },
}

/// The minimum reduced-cost labels at the end depot. `labels` holds every
/// label achieving the minimum, in settlement order.
#[derive(Debug, Clone)]
pub struct BestLabels {
    pub labels: Vec<Label>,
    pub min_reduced_cost: f64,
}

/// The bucket-per-node labeling solver.
pub struct LabelingSolver {
    selector: LabelSelector,
    step_limit: Option<usize>,
}

impl LabelingSolver {
    pub fn new(selector: LabelSelector) -> Self {
        Self {
            selector,
            step_limit: None,
        }
    }

    /// Bound the number of label extensions processed in one `solve` call.
    /// The state space is finite but can be enormous; callers that need an
    /// escape hatch get a typed error instead of an unbounded run.
    pub fn with_step_limit(mut self, limit: usize) -> Self {
        self.step_limit = Some(limit);
        self
    }

    /// Run the search. Returns `Ok(None)` when no feasible path reaches the
    /// end depot at all.
    pub fn solve<P: PricingProblem>(
        &self,
        problem: &P,
    ) -> Result<Option<BestLabels>, LabelingError> {
        let num_nodes = problem.num_nodes();
        let mut pool = LabelPool::new();
        let mut settled: Vec<Vec<LabelId>> = vec![Vec::new(); num_nodes];
        let mut open: Vec<VecDeque<LabelId>> = vec![VecDeque::new(); num_nodes];

        let seed = pool.insert(problem.initial_label());
        let start = pool.get(seed).node;
        settled[start].push(seed);
        open[start].push_back(seed);

        let mut steps: usize = 0;
        while let Some(id) = self.pop(&mut open, &pool) {
            if let Some(limit) = self.step_limit {
                if steps >= limit {
                    return Err(LabelingError::StepLimitExceeded { limit });
                }
            }
            steps += 1;

            let current = pool.get(id).clone();
            for dest in problem.successors(current.node) {
                let Some(candidate) = problem.extend(&current, dest) else {
                    continue;
                };
                if !problem.is_feasible(&candidate) {
                    continue;
                }

                // Dominance against the settled bucket, both directions. An
                // incumbent that dominates (or equals) the candidate wins;
                // otherwise every incumbent the candidate dominates is
                // evicted before insertion.
                let bucket = &mut settled[dest];
                let mut evicted: Vec<usize> = Vec::new();
                let mut discard = false;
                for (pos, &incumbent_id) in bucket.iter().enumerate() {
                    let incumbent = pool.get(incumbent_id);
                    if incumbent.dominates(&candidate) {
                        discard = true;
                        break;
                    }
                    if candidate.dominates(incumbent) {
                        evicted.push(pos);
                    }
                }
                if discard {
                    continue;
                }
                for &pos in evicted.iter().rev() {
                    let evicted_id = bucket.swap_remove(pos);
                    pool.retire(evicted_id);
                }

                let candidate_id = pool.insert(candidate);
                settled[dest].push(candidate_id);
                open[dest].push_back(candidate_id);
            }
        }

        let end = problem.end_node();
        let final_ids: Vec<LabelId> = settled[end].clone();
        if final_ids.is_empty() {
            debug!(steps, created = pool.created(), "no label reached the end depot");
            return Ok(None);
        }

        let min_reduced_cost = final_ids
            .iter()
            .map(|&id| pool.get(id).reduced_cost())
            .fold(f64::INFINITY, f64::min);
        let labels: Vec<Label> = final_ids
            .iter()
            .map(|&id| pool.get(id))
            .filter(|label| label.reduced_cost() == min_reduced_cost)
            .cloned()
            .collect();

        debug!(
            steps,
            created = pool.created(),
            surviving = pool.alive_count(),
            best = labels.len(),
            min_reduced_cost,
            "labeling finished"
        );
        Ok(Some(BestLabels {
            labels,
            min_reduced_cost,
        }))
    }

    /// Pop the next open label according to the selector, skipping (and
    /// pruning) handles retired by dominance.
    fn pop(&self, open: &mut [VecDeque<LabelId>], pool: &LabelPool) -> Option<LabelId> {
        match self.selector {
            LabelSelector::Fifo => {
                for bucket in open.iter_mut() {
                    while let Some(&id) = bucket.front() {
                        bucket.pop_front();
                        if pool.is_alive(id) {
                            return Some(id);
                        }
                    }
                }
                None
            }
            LabelSelector::Lifo => {
                for bucket in open.iter_mut() {
                    while let Some(&id) = bucket.back() {
                        bucket.pop_back();
                        if pool.is_alive(id) {
                            return Some(id);
                        }
                    }
                }
                None
            }
            LabelSelector::MinResource(kind) => {
                let mut best: Option<(usize, usize, f64)> = None;
                for (node, bucket) in open.iter_mut().enumerate() {
                    bucket.retain(|&id| pool.is_alive(id));
                    for (pos, &id) in bucket.iter().enumerate() {
                        let value = pool.get(id).resources.scalar(kind);
                        if best.map_or(true, |(_, _, best_value)| value < best_value) {
                            best = Some((node, pos, value));
                        }
                    }
                }
                let (node, pos, _) = best?;
                open[node].remove(pos)
            }
        }
    }
}
