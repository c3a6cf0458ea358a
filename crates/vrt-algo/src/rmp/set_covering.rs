//! Set-covering master problem builder
//!
//! The restricted master problem of column generation is a set-covering LP:
//! one variable per known route, one cover row per customer. Constraint
//! names are 1-based (`cover_element_1` covers customer 1) because node 0 is
//! the start depot and never needs covering; the trailing integer gives the
//! orchestrator an O(1) mapping from duals back to customers.

use super::model::{ConstraintSense, LpModel, ModelError};

/// Build the set-covering problem.
///
/// `cover_matrix[i][j]` is 1.0 when set (route) `j` covers element
/// (customer) `i+1`; `costs[j]` is the objective coefficient of set `j`.
/// With `partitioned` the cover rows become equalities; with `relaxed` the
/// binary variables become continuous over `[0, 1]`.
pub fn build_set_covering(
    cover_matrix: &[Vec<f64>],
    costs: &[f64],
    partitioned: bool,
    relaxed: bool,
) -> Result<LpModel, ModelError> {
    let num_elements = cover_matrix.len();
    let num_sets = costs.len();
    let mut model = LpModel::new("set_covering_problem");

    for (j, &cost) in costs.iter().enumerate() {
        model.add_variable(&format!("p_{j}"), cost, &[], 0.0, Some(1.0), !relaxed)?;
    }

    let sense = if partitioned {
        ConstraintSense::Equal
    } else {
        ConstraintSense::Greater
    };
    for (i, row) in cover_matrix.iter().enumerate() {
        debug_assert_eq!(row.len(), num_sets);
        let coefficients: Vec<(String, f64)> = row
            .iter()
            .enumerate()
            .filter(|&(_, &coeff)| coeff != 0.0)
            .map(|(j, &coeff)| (format!("p_{j}"), coeff))
            .collect();
        model.add_constraint(&format!("cover_element_{}", i + 1), &coefficients, sense, 1.0)?;
    }

    debug_assert_eq!(model.num_constraints(), num_elements);
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relaxed_cover_problem() {
        // Three routes, two customers; route 2 covers both.
        let cover = vec![vec![1.0, 0.0, 1.0], vec![0.0, 1.0, 1.0]];
        let costs = vec![4.0, 5.0, 7.0];
        let model = build_set_covering(&cover, &costs, false, true).unwrap();

        assert_eq!(model.num_variables(), 3);
        assert_eq!(model.num_constraints(), 2);
        assert!(!model.has_integer_variables());
        assert_eq!(model.constraint_index("cover_element_1"), Some(0));
        assert_eq!(model.constraint_index("cover_element_2"), Some(1));
        assert_eq!(model.constraints()[0].sense, ConstraintSense::Greater);
        assert_eq!(model.constraints()[0].rhs, 1.0);
        assert_eq!(model.coefficient(0, 2), 1.0);
        assert_eq!(model.coefficient(1, 0), 0.0);
        assert_eq!(model.variables()[1].obj, 5.0);
        assert_eq!(model.variables()[1].ub, Some(1.0));
        assert_eq!(model.variables()[1].lb, 0.0);
    }

    #[test]
    fn partitioned_unrelaxed_variant() {
        let cover = vec![vec![1.0]];
        let costs = vec![2.0];
        let model = build_set_covering(&cover, &costs, true, false).unwrap();
        assert_eq!(model.constraints()[0].sense, ConstraintSense::Equal);
        assert!(model.has_integer_variables());
        assert_eq!(model.variables()[0].ub, Some(1.0));
    }
}
