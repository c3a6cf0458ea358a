//! Reference instances for tests and examples
//!
//! Small hand-built instances with known structure, shared by the unit and
//! integration suites. All of them have three customers over nodes
//! `{0, 1, 2, 3, 4}` with the start depot at 0 and the end depot at 4, and
//! differ in capacity, windows, and one depot arc cost.

use vrt_core::instance::{Arc, NodeData, TimeWindow, VrptwInstance};

fn build(
    capacity: f64,
    ready: [f64; 5],
    due: [f64; 5],
    depot_to_three_cost: f64,
) -> VrptwInstance {
    let demands = [0.0, 4.0, 7.0, 3.0, 0.0];
    let nodes = (0..5)
        .map(|i| NodeData {
            demand: demands[i],
            window: TimeWindow::new(ready[i], due[i]),
        })
        .collect();

    let arcs = vec![
        (0, 1, Arc { cost: 3.0, travel_time: 6.0 }),
        (0, 2, Arc { cost: 6.0, travel_time: 10.0 }),
        (0, 3, Arc { cost: depot_to_three_cost, travel_time: 12.0 }),
        (1, 2, Arc { cost: 2.0, travel_time: 8.0 }),
        (1, 3, Arc { cost: 5.0, travel_time: 15.0 }),
        (1, 4, Arc { cost: 8.0, travel_time: 5.0 }),
        (2, 3, Arc { cost: 1.0, travel_time: 4.0 }),
        (2, 4, Arc { cost: 3.0, travel_time: 6.0 }),
        (3, 4, Arc { cost: 2.0, travel_time: 5.0 }),
    ];

    VrptwInstance::from_parts(3, capacity, nodes, arcs).expect("reference instance is valid")
}

/// Capacity 10 against a total demand of 14: no single route serves all
/// three customers, so any cover needs at least two vehicles. The LP optimum
/// of the relaxed covering formulation is 19.
pub fn capacity_binding() -> VrptwInstance {
    build(
        10.0,
        [0.0; 5],
        [100.0, 20.0, 25.0, 40.0, 100.0],
        7.0,
    )
}

/// Staggered window openings at customers 1 and 2, with an expensive direct
/// arc from the depot to customer 3.
pub fn staggered_windows_high_depot_arc() -> VrptwInstance {
    build(
        10.0,
        [0.0, 5.0, 10.0, 0.0, 0.0],
        [100.0, 20.0, 25.0, 40.0, 100.0],
        10.0,
    )
}

/// Same as [`staggered_windows_high_depot_arc`] but with a cheap direct arc
/// to customer 3, making the single-customer route competitive.
pub fn staggered_windows_low_depot_arc() -> VrptwInstance {
    build(
        10.0,
        [0.0, 5.0, 10.0, 0.0, 0.0],
        [100.0, 20.0, 25.0, 40.0, 100.0],
        2.0,
    )
}

/// Generous capacity and prohibitive single-customer arcs: the optimal
/// solution is the route visiting all three customers.
pub fn long_route_optimal() -> VrptwInstance {
    let nodes = vec![
        NodeData { demand: 0.0, window: TimeWindow::new(0.0, 100.0) },
        NodeData { demand: 4.0, window: TimeWindow::new(0.0, 20.0) },
        NodeData { demand: 7.0, window: TimeWindow::new(0.0, 25.0) },
        NodeData { demand: 3.0, window: TimeWindow::new(0.0, 40.0) },
        NodeData { demand: 0.0, window: TimeWindow::new(0.0, 100.0) },
    ];
    let arcs = vec![
        (0, 1, Arc { cost: 3.0, travel_time: 6.0 }),
        (0, 2, Arc { cost: 106.0, travel_time: 10.0 }),
        (0, 3, Arc { cost: 107.0, travel_time: 12.0 }),
        (1, 2, Arc { cost: 2.0, travel_time: 8.0 }),
        (1, 3, Arc { cost: 105.0, travel_time: 15.0 }),
        (1, 4, Arc { cost: 108.0, travel_time: 5.0 }),
        (2, 3, Arc { cost: 1.0, travel_time: 4.0 }),
        (2, 4, Arc { cost: 103.0, travel_time: 6.0 }),
        (3, 4, Arc { cost: 2.0, travel_time: 5.0 }),
    ];
    VrptwInstance::from_parts(3, 40.0, nodes, arcs).expect("reference instance is valid")
}
