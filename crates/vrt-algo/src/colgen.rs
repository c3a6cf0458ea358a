//! # Column generation for VRPTW
//!
//! Solves the LP relaxation of the path formulation of the Vehicle Routing
//! Problem with Time Windows. The formulation has one variable per feasible
//! elementary route — exponentially many — so the LP is solved by column
//! generation: keep a restricted master problem (RMP) over the routes found
//! so far, and let a pricing subproblem search the full route space for a
//! variable worth adding.
//!
//! ```text
//! master (RMP, relaxed set covering)          pricing (ESPPTWC labeling)
//!
//!   min Σ c_p x_p                               min  Σ c̃(i,j)  over
//!   s.t. Σ_{p ∋ i} x_p >= 1   [π_i]                  elementary 0→N+1 paths
//!        0 <= x_p <= 1                               c̃(i,j) = c(i,j) − π_i
//! ```
//!
//! Each iteration: solve the RMP, read the duals π, let pricing search for a
//! route with negative reduced cost under π. Such a route would improve the
//! master, so it enters as a new column; when none exists the current master
//! solution is optimal for the full LP, and the loop stops. With exact
//! pricing over a finite route space the loop terminates after finitely many
//! additions.
//!
//! The initial RMP covers each customer with the trivial route
//! `[0, j, N+1]`, which also keeps every intermediate RMP feasible. Cover
//! constraints are named `cover_element_{j}` so duals map back to customer
//! indices without bookkeeping beyond a name table.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use vrt_core::instance::VrptwInstance;

use crate::labeling::{LabelSelector, LabelingError, LabelingSolver};
use crate::pricing::EspptwcModel;
use crate::resource::ResourceKind;
use crate::rmp::{build_set_covering, ClarabelRmp, LpSolution, RmpError, RmpSolve};

/// Knobs of the generation loop.
#[derive(Debug, Clone, Copy)]
pub struct CgConfig {
    /// Cap on pricing rounds (columns added).
    pub max_iterations: usize,
    /// A column enters only when its reduced cost is below `-tolerance`;
    /// a minimum in `[-tolerance, 0)` counts as converged.
    pub tolerance: f64,
}

impl Default for CgConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance: 1e-5,
        }
    }
}

#[derive(Error, Debug)]
pub enum CgError {
    /// Labeling found no feasible path from the start depot to the end depot
    /// at all; the instance (or its arc filter) admits no route, so the full
    /// master is uncoverable.
    #[error("pricing found no feasible path from the start depot to the end depot")]
    PricingInfeasible,

    /// An initial route references an arc the instance does not have (the
    /// arc filter may have removed it).
    #[error("initial route {path:?} uses an arc missing from the instance")]
    InvalidSeedRoute { path: Vec<usize> },

    #[error(transparent)]
    Rmp(#[from] RmpError),

    #[error(transparent)]
    Labeling(#[from] LabelingError),
}

// Collapse into the toolkit boundary categories: master-LP failures on one
// side, everything that stopped the pricing loop on the other.
impl From<CgError> for vrt_core::VrtError {
    fn from(err: CgError) -> Self {
        match err {
            CgError::Rmp(rmp) => vrt_core::VrtError::Master(rmp.to_string()),
            other => vrt_core::VrtError::Pricing(other.to_string()),
        }
    }
}

/// Activity of one route in the final master solution.
#[derive(Debug, Clone, Serialize)]
pub struct RouteActivity {
    pub value: f64,
    pub path: Vec<usize>,
}

/// Result of a column-generation run.
#[derive(Debug, Clone, Serialize)]
pub struct CgSolution {
    /// Objective of the last master solve.
    pub objective: f64,
    /// Routes with activity above 1e-8, keyed by variable name.
    pub routes: BTreeMap<String, RouteActivity>,
    /// Columns priced into the master.
    pub iterations: usize,
    /// `true` when pricing certified the LP optimum; `false` when the
    /// iteration cap stopped the loop first, in which case `objective` is
    /// only an upper bound on the LP optimum.
    pub converged: bool,
}

/// The price-and-add driver coupling the master and the pricing model.
pub struct ColumnGeneration<'a> {
    model: EspptwcModel<'a>,
    labeling: LabelingSolver,
    rmp: ClarabelRmp,
    variable_paths: HashMap<String, Vec<usize>>,
    cover_customers: HashMap<String, usize>,
}

impl<'a> ColumnGeneration<'a> {
    /// Seed the master with the trivial single-customer routes.
    pub fn new(instance: &'a VrptwInstance) -> Result<Self, CgError> {
        Self::with_initial_routes(instance, Vec::new())
    }

    /// Seed the master with caller-provided routes (falling back to the
    /// trivial ones when empty). Each route must be a feasible elementary
    /// path from the start depot to the end depot.
    pub fn with_initial_routes(
        instance: &'a VrptwInstance,
        initial_routes: Vec<Vec<usize>>,
    ) -> Result<Self, CgError> {
        let routes = if initial_routes.is_empty() {
            debug!("no initial routes provided, seeding with trivial single-customer routes");
            Self::trivial_routes(instance)
        } else {
            initial_routes
        };

        for route in &routes {
            let usable = route.len() >= 2
                && route
                    .windows(2)
                    .all(|leg| instance.arc_between(leg[0], leg[1]).is_some());
            if !usable {
                return Err(CgError::InvalidSeedRoute {
                    path: route.clone(),
                });
            }
        }

        let model = EspptwcModel::new(instance);
        let costs: Vec<f64> = routes.iter().map(|route| model.path_cost(route)).collect();

        let num_customers = instance.num_customers();
        let cover_matrix: Vec<Vec<f64>> = (1..=num_customers)
            .map(|customer| {
                routes
                    .iter()
                    .map(|route| {
                        let interior = &route[1..route.len() - 1];
                        if interior.contains(&customer) {
                            1.0
                        } else {
                            0.0
                        }
                    })
                    .collect()
            })
            .collect();

        let lp = build_set_covering(&cover_matrix, &costs, false, true).map_err(RmpError::from)?;

        // "cover_element_{j}" → j, for translating duals to customers.
        let cover_customers = lp
            .constraints()
            .iter()
            .filter_map(|constraint| {
                constraint
                    .name
                    .rsplit('_')
                    .next()
                    .and_then(|suffix| suffix.parse::<usize>().ok())
                    .map(|customer| (constraint.name.clone(), customer))
            })
            .collect();

        let variable_paths = routes
            .iter()
            .enumerate()
            .map(|(j, route)| (format!("p_{j}"), route.clone()))
            .collect();

        Ok(Self {
            model,
            labeling: LabelingSolver::new(LabelSelector::MinResource(ResourceKind::ReducedCost)),
            rmp: ClarabelRmp::new(lp),
            variable_paths,
            cover_customers,
        })
    }

    fn trivial_routes(instance: &VrptwInstance) -> Vec<Vec<usize>> {
        let end = instance.end();
        (1..=instance.num_customers())
            .map(|customer| vec![0, customer, end])
            .collect()
    }

    /// Unit coefficients on the cover rows of the customers a path visits.
    fn column_coefficients(path: &[usize]) -> Vec<(String, f64)> {
        let interior = if path.len() > 2 {
            &path[1..path.len() - 1]
        } else {
            &[]
        };
        interior
            .iter()
            .filter(|&&node| node != 0)
            .map(|&node| (format!("cover_element_{node}"), 1.0))
            .collect()
    }

    /// Run the loop until pricing proves optimality or the iteration cap is
    /// reached. The master is re-solved at the top of each round, so a
    /// capped run still reports the objective including its last column.
    pub fn run(&mut self, config: &CgConfig) -> Result<CgSolution, CgError> {
        let mut iterations = 0;
        let mut converged = false;

        let solution: LpSolution = loop {
            let solution = self.rmp.solve()?;
            debug!(
                iteration = iterations,
                objective = solution.objective,
                variables = self.rmp.model().num_variables(),
                "master solved"
            );

            if iterations == config.max_iterations {
                info!(
                    max_iterations = config.max_iterations,
                    "column generation reached the iteration cap"
                );
                break solution;
            }

            let duals: HashMap<usize, f64> = solution
                .duals
                .iter()
                .filter_map(|(name, &value)| {
                    self.cover_customers
                        .get(name)
                        .map(|&customer| (customer, value))
                })
                .collect();
            self.model.adjust_costs(&duals);

            let Some(best) = self.labeling.solve(&self.model)? else {
                return Err(CgError::PricingInfeasible);
            };
            if best.min_reduced_cost >= -config.tolerance {
                info!(
                    iterations,
                    min_reduced_cost = best.min_reduced_cost,
                    objective = solution.objective,
                    "no improving column, LP optimum reached"
                );
                converged = true;
                break solution;
            }

            let path = best.labels[0].path.clone();
            if self.variable_paths.values().any(|known| known == &path) {
                // A route already in the master prices negative when it sits
                // at its unit bound and that bound row carries dual weight;
                // a second copy lets the next solve split the activity
                // strictly inside the bounds.
                debug!(?path, "re-adding a route saturated at its unit bound");
            }
            let objective_coeff = self.model.path_cost(&path);
            let coefficients = Self::column_coefficients(&path);
            let name = format!("p_{}", self.rmp.model().num_variables());
            debug!(
                variable = %name,
                reduced_cost = best.min_reduced_cost,
                cost = objective_coeff,
                ?path,
                "adding column"
            );
            self.rmp
                .add_variable(&name, objective_coeff, &coefficients, 0.0, Some(1.0), false)?;
            self.variable_paths.insert(name, path);
            iterations += 1;
        };

        let routes: BTreeMap<String, RouteActivity> = solution
            .primal
            .iter()
            .filter(|&(_, &value)| value.abs() > 1e-8)
            .map(|(name, &value)| {
                let path = self.variable_paths.get(name).cloned().unwrap_or_default();
                (name.clone(), RouteActivity { value, path })
            })
            .collect();

        info!(
            objective = solution.objective,
            routes = routes.len(),
            iterations,
            converged,
            "column generation finished"
        );
        Ok(CgSolution {
            objective: solution.objective,
            routes,
            iterations,
            converged,
        })
    }
}

/// Convenience wrapper: seed, run, return.
pub fn solve_vrptw(instance: &VrptwInstance, config: &CgConfig) -> Result<CgSolution, CgError> {
    ColumnGeneration::new(instance)?.run(config)
}
