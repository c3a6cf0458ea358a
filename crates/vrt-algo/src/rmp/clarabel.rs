//! Clarabel-backed RMP solver
//!
//! Drives the [Clarabel](https://github.com/oxfordcontrol/Clarabel.rs)
//! interior-point solver over the abstract [`LpModel`]. Clarabel solves
//!
//! ```text
//! minimize    (1/2)x'Px + q'x
//! subject to  Ax + s = b,   s ∈ K
//! ```
//!
//! so the LP lands there with `P = 0` and one cone slot per constraint row:
//!
//! - equalities go into the zero cone as-is;
//! - `<=` rows go into the nonnegative cone as-is;
//! - `>=` rows are negated into `<=` form first;
//! - variable bounds become extra nonnegative-cone rows (`-x <= -lb`,
//!   `x <= ub`) appended after the model constraints.
//!
//! Consecutive rows of the same cone type are merged into one cone block.
//!
//! Duals come straight from `solution.z` and are reported as shadow prices
//! (∂objective/∂rhs): `z` for `>=` rows — the sign flip of the row and of
//! the derivative cancel — and `-z` for `<=` and `=` rows. Column generation
//! reads the `>=` cover rows, whose prices are nonnegative as expected.
//!
//! An interior-point method has no useful warm start, so "incremental"
//! column addition grows the model's column store in place and each solve
//! assembles the CSC matrix in one linear pass over it.

use clarabel::algebra::CscMatrix;
use clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SolverStatus, SupportedConeT,
};
use tracing::debug;

use super::model::{ConstraintSense, LpModel};
use super::solver::{LpSolution, RmpError, RmpSolve};

/// The restricted master problem on a Clarabel backend.
pub struct ClarabelRmp {
    model: LpModel,
}

impl ClarabelRmp {
    pub fn new(model: LpModel) -> Self {
        Self { model }
    }

    /// The abstract model this backend solves.
    pub fn model(&self) -> &LpModel {
        &self.model
    }
}

// Merge consecutive rows of the same cone type into one block.
fn push_zero_cone(cones: &mut Vec<SupportedConeT<f64>>) {
    match cones.last_mut() {
        Some(SupportedConeT::ZeroConeT(n)) => *n += 1,
        _ => cones.push(SupportedConeT::ZeroConeT(1)),
    }
}

fn push_nonnegative_cone(cones: &mut Vec<SupportedConeT<f64>>) {
    match cones.last_mut() {
        Some(SupportedConeT::NonnegativeConeT(n)) => *n += 1,
        _ => cones.push(SupportedConeT::NonnegativeConeT(1)),
    }
}

impl RmpSolve for ClarabelRmp {
    fn solve(&mut self) -> Result<LpSolution, RmpError> {
        if self.model.has_integer_variables() {
            return Err(RmpError::Integrality);
        }

        let n_var = self.model.num_variables();
        let n_cons = self.model.num_constraints();

        // Column-wise constraint entries, sign-adjusted per row sense.
        let mut columns: Vec<Vec<(usize, f64)>> = vec![Vec::new(); n_var];
        let mut rhs: Vec<f64> = Vec::with_capacity(n_cons);
        let mut cones: Vec<SupportedConeT<f64>> = Vec::new();

        for constraint in self.model.constraints() {
            match constraint.sense {
                ConstraintSense::Equal => {
                    rhs.push(constraint.rhs);
                    push_zero_cone(&mut cones);
                }
                ConstraintSense::Less => {
                    rhs.push(constraint.rhs);
                    push_nonnegative_cone(&mut cones);
                }
                ConstraintSense::Greater => {
                    rhs.push(-constraint.rhs);
                    push_nonnegative_cone(&mut cones);
                }
            }
        }
        for (col, variable) in self.model.variables().iter().enumerate() {
            for &(row, coeff) in &variable.column {
                let sign = match self.model.constraints()[row].sense {
                    ConstraintSense::Greater => -1.0,
                    _ => 1.0,
                };
                columns[col].push((row, sign * coeff));
            }
        }

        // Variable bounds as extra nonnegative-cone rows.
        for (col, variable) in self.model.variables().iter().enumerate() {
            if variable.lb.is_finite() {
                columns[col].push((rhs.len(), -1.0));
                rhs.push(-variable.lb);
                push_nonnegative_cone(&mut cones);
            }
            if let Some(ub) = variable.ub {
                columns[col].push((rhs.len(), 1.0));
                rhs.push(ub);
                push_nonnegative_cone(&mut cones);
            }
        }
        let n_rows = rhs.len();

        // Assemble CSC: per-column entries sorted by row index.
        let mut col_ptr = Vec::with_capacity(n_var + 1);
        let mut row_idx = Vec::new();
        let mut values = Vec::new();
        let mut nnz = 0;
        for column in &mut columns {
            col_ptr.push(nnz);
            column.sort_by_key(|&(row, _)| row);
            for &(row, value) in column.iter() {
                row_idx.push(row);
                values.push(value);
                nnz += 1;
            }
        }
        col_ptr.push(nnz);

        let a_mat = CscMatrix::new(n_rows, n_var, col_ptr, row_idx, values);
        let p_mat = CscMatrix::zeros((n_var, n_var));
        let q: Vec<f64> = self.model.variables().iter().map(|v| v.obj).collect();

        let settings = DefaultSettingsBuilder::default()
            .verbose(false)
            .build()
            .map_err(|e| RmpError::Backend(format!("settings error: {e:?}")))?;
        let mut solver = DefaultSolver::new(&p_mat, &q, &a_mat, &rhs, &cones, settings)
            .map_err(|e| RmpError::Backend(format!("initialization failed: {e:?}")))?;
        solver.solve();

        let sol = &solver.solution;
        match sol.status {
            SolverStatus::Solved | SolverStatus::AlmostSolved => {}
            SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
                return Err(RmpError::Infeasible);
            }
            SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
                return Err(RmpError::Unbounded);
            }
            status => {
                return Err(RmpError::Backend(format!("solver status {status:?}")));
            }
        }

        let primal = self
            .model
            .variables()
            .iter()
            .zip(sol.x.iter())
            .map(|(variable, &value)| (variable.name.clone(), value))
            .collect();
        let duals = self
            .model
            .constraints()
            .iter()
            .enumerate()
            .map(|(row, constraint)| {
                let price = match constraint.sense {
                    ConstraintSense::Greater => sol.z[row],
                    ConstraintSense::Less | ConstraintSense::Equal => -sol.z[row],
                };
                (constraint.name.clone(), price)
            })
            .collect();

        debug!(
            variables = n_var,
            constraints = n_cons,
            iterations = sol.iterations,
            objective = sol.obj_val,
            "restricted master solved"
        );
        Ok(LpSolution {
            objective: sol.obj_val,
            primal,
            duals,
        })
    }

    fn add_variable(
        &mut self,
        name: &str,
        obj: f64,
        col_coeffs: &[(String, f64)],
        lb: f64,
        ub: Option<f64>,
        integer: bool,
    ) -> Result<(), RmpError> {
        self.model
            .add_variable(name, obj, col_coeffs, lb, ub, integer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rmp::set_covering::build_set_covering;

    #[test]
    fn shadow_prices_of_geq_rows_are_exact_when_nondegenerate() {
        // min 11 x_0 + 9 x_1 + 9 x_2 with x_j >= 1 and no upper bounds:
        // only the >= rows are binding, so each prices at exactly its cost.
        let mut model = crate::rmp::LpModel::new("prices");
        for (j, &cost) in [11.0, 9.0, 9.0].iter().enumerate() {
            model
                .add_variable(&format!("x_{j}"), cost, &[], 0.0, None, false)
                .unwrap();
        }
        for j in 0..3 {
            model
                .add_constraint(
                    &format!("at_least_{j}"),
                    &[(format!("x_{j}"), 1.0)],
                    crate::rmp::ConstraintSense::Greater,
                    1.0,
                )
                .unwrap();
        }
        let mut rmp = ClarabelRmp::new(model);

        let solution = rmp.solve().unwrap();
        assert!((solution.objective - 29.0).abs() < 1e-5);
        assert!((solution.duals["at_least_0"] - 11.0).abs() < 1e-4);
        assert!((solution.duals["at_least_1"] - 9.0).abs() < 1e-4);
        assert!((solution.duals["at_least_2"] - 9.0).abs() < 1e-4);
    }

    #[test]
    fn solves_a_diagonal_cover_problem_with_duals() {
        // min 11 p_0 + 9 p_1 + 9 p_2, each route covering one customer:
        // every variable is pinched to 1 between its cover row and its unit
        // bound. The primal is unique; the dual split between the two
        // binding rows is not, but the cover price can only sit at or above
        // the covering route's cost.
        let cover = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        let costs = vec![11.0, 9.0, 9.0];
        let model = build_set_covering(&cover, &costs, false, true).unwrap();
        let mut rmp = ClarabelRmp::new(model);

        let solution = rmp.solve().unwrap();
        assert!((solution.objective - 29.0).abs() < 1e-5);
        for name in ["p_0", "p_1", "p_2"] {
            assert!((solution.primal[name] - 1.0).abs() < 1e-5);
        }
        assert!(solution.duals["cover_element_1"] >= 11.0 - 1e-4);
        assert!(solution.duals["cover_element_2"] >= 9.0 - 1e-4);
        assert!(solution.duals["cover_element_3"] >= 9.0 - 1e-4);
    }

    #[test]
    fn added_column_changes_the_optimum() {
        let cover = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        let costs = vec![4.0, 5.0];
        let model = build_set_covering(&cover, &costs, false, true).unwrap();
        let mut rmp = ClarabelRmp::new(model);

        let first = rmp.solve().unwrap();
        assert!((first.objective - 9.0).abs() < 1e-5);

        // A combined route covering both customers for 6.
        rmp.add_variable(
            "p_2",
            6.0,
            &[
                ("cover_element_1".to_string(), 1.0),
                ("cover_element_2".to_string(), 1.0),
            ],
            0.0,
            Some(1.0),
            false,
        )
        .unwrap();

        let second = rmp.solve().unwrap();
        assert!((second.objective - 6.0).abs() < 1e-5);
        assert!((second.primal["p_2"] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn upper_bounded_variable_against_a_leq_row() {
        // min -x with x in [0, 2] and the row 2x <= 4 gives x = 2.
        let mut model = crate::rmp::LpModel::new("bounds");
        model
            .add_variable("x", -1.0, &[], 0.0, Some(2.0), false)
            .unwrap();
        model
            .add_constraint(
                "cap",
                &[("x".to_string(), 2.0)],
                crate::rmp::ConstraintSense::Less,
                4.0,
            )
            .unwrap();
        let mut rmp = ClarabelRmp::new(model);
        let solution = rmp.solve().unwrap();
        assert!((solution.objective + 2.0).abs() < 1e-5);
        assert!((solution.primal["x"] - 2.0).abs() < 1e-5);
        // The <= row and the upper bound are simultaneously binding; the
        // shadow price of the row is nonpositive for a minimization.
        assert!(solution.duals["cap"] <= 1e-6);
    }

    #[test]
    fn integer_variables_are_rejected() {
        let cover = vec![vec![1.0]];
        let costs = vec![1.0];
        let model = build_set_covering(&cover, &costs, false, false).unwrap();
        let mut rmp = ClarabelRmp::new(model);
        assert!(matches!(rmp.solve(), Err(RmpError::Integrality)));
    }

    #[test]
    fn infeasible_problem_is_reported() {
        // x <= -1 with x >= 0.
        let mut model = crate::rmp::LpModel::new("infeasible");
        model
            .add_variable("x", 1.0, &[], 0.0, None, false)
            .unwrap();
        model
            .add_constraint(
                "neg",
                &[("x".to_string(), 1.0)],
                crate::rmp::ConstraintSense::Less,
                -1.0,
            )
            .unwrap();
        let mut rmp = ClarabelRmp::new(model);
        assert!(matches!(rmp.solve(), Err(RmpError::Infeasible)));
    }
}
