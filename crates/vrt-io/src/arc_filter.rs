//! Arc pre-filtering for VRPTW
//!
//! Drops arcs that no feasible route can use before the pricing problem ever
//! sees them. An arc `(i, j)` is removed when any of:
//!
//! - `i == j` (self-loop),
//! - `j` is the start depot (routes never return to node 0),
//! - `i` is the end depot (routes never leave node N+1),
//! - `demand(i) + demand(j) > capacity`,
//! - `ready(i) + travel_time(i, j) > due(j)` (the window at `j` is already
//!   closed even when departing `i` at the earliest possible moment).

use crate::matrices::Matrices;
use crate::solomon::Customer;
use vrt_core::instance::Arc;

/// Counts from one filtering pass, for diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct FilterStats {
    /// Ordered node pairs considered (self-loops excluded).
    pub total_arcs: usize,
    /// Arcs that survived all rules.
    pub kept_arcs: usize,
}

impl FilterStats {
    /// Fraction of arcs removed, in `[0, 1]`.
    pub fn ratio_filtered(&self) -> f64 {
        if self.total_arcs == 0 {
            return 0.0;
        }
        1.0 - self.kept_arcs as f64 / self.total_arcs as f64
    }
}

/// Apply the filter rules over the dense matrices, producing the arc list for
/// [`vrt_core::VrptwInstance::from_parts`].
pub fn filter_arcs(
    customers: &[Customer],
    matrices: &Matrices,
    capacity: f64,
) -> (Vec<(usize, usize, Arc)>, FilterStats) {
    let n = customers.len();
    let end_depot = n - 1;

    let mut arcs = Vec::new();
    let mut total_arcs = 0;

    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            total_arcs += 1;

            if j == 0 || i == end_depot {
                continue;
            }
            if customers[i].demand + customers[j].demand > capacity {
                continue;
            }
            let travel_time = matrices.travel_time[i][j];
            if customers[i].ready_time + travel_time > customers[j].due_date {
                continue;
            }

            arcs.push((
                i,
                j,
                Arc {
                    cost: matrices.cost[i][j],
                    travel_time,
                },
            ));
        }
    }

    let stats = FilterStats {
        total_arcs,
        kept_arcs: arcs.len(),
    };
    (arcs, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrices::build_matrices;

    fn customer(id: usize, x: f64, demand: f64, ready: f64, due: f64) -> Customer {
        Customer {
            id,
            x,
            y: 0.0,
            demand,
            ready_time: ready,
            due_date: due,
            service_time: 0.0,
        }
    }

    // Nodes on a line: depot at 0, customers at 1 and 2, end depot at 0.
    fn rows() -> Vec<Customer> {
        vec![
            customer(0, 0.0, 0.0, 0.0, 100.0),
            customer(1, 1.0, 6.0, 0.0, 50.0),
            customer(2, 2.0, 7.0, 0.0, 50.0),
            customer(3, 0.0, 0.0, 0.0, 100.0),
        ]
    }

    #[test]
    fn depot_rules_remove_returns_and_departures() {
        let rows = rows();
        let matrices = build_matrices(&rows);
        let (arcs, stats) = filter_arcs(&rows, &matrices, 100.0);

        assert!(arcs.iter().all(|&(_, j, _)| j != 0));
        assert!(arcs.iter().all(|&(i, _, _)| i != 3));
        assert_eq!(stats.total_arcs, 12);
    }

    #[test]
    fn capacity_rule_drops_heavy_pairs() {
        let rows = rows();
        let matrices = build_matrices(&rows);
        // Capacity 10: customers 1 and 2 together weigh 13.
        let (arcs, _) = filter_arcs(&rows, &matrices, 10.0);
        assert!(!arcs.iter().any(|&(i, j, _)| (i, j) == (1, 2)));
        assert!(!arcs.iter().any(|&(i, j, _)| (i, j) == (2, 1)));
        assert!(arcs.iter().any(|&(i, j, _)| (i, j) == (0, 1)));
    }

    #[test]
    fn time_window_rule_drops_unreachable_arcs() {
        let mut rows = rows();
        rows[1].ready_time = 60.0;
        rows[1].due_date = 80.0;
        rows[2].due_date = 55.0;
        let matrices = build_matrices(&rows);
        // ready(1) + tt(1, 2) = 60 + 1 > due(2) = 55.
        let (arcs, _) = filter_arcs(&rows, &matrices, 100.0);
        assert!(!arcs.iter().any(|&(i, j, _)| (i, j) == (1, 2)));
        assert!(arcs.iter().any(|&(i, j, _)| (i, j) == (2, 1)));
    }

    #[test]
    fn filtered_ratio() {
        let stats = FilterStats {
            total_arcs: 10,
            kept_arcs: 4,
        };
        assert!((stats.ratio_filtered() - 0.6).abs() < 1e-12);
    }
}
