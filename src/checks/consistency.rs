use thiserror::Error;

use crate::{instance::Instance, io::solution_reader::Solution};

/// Reasons for a candidate row to be rejected. Rows and types are 0-indexed.
#[derive(Debug, Error, PartialEq)]
pub enum ConsistencyError {
    #[error("Solution {row} (0-indexed) contains an inadequate number of atoms")]
    IncompleteSolution { row: usize },

    #[error("Atom of type {label} in solution {row} (0-indexed) is not of a valid type; accepted types are in [0, {num_types})")]
    InvalidType {
        row: usize,
        label: usize,
        num_types: usize,
    },

    #[error("Solution {row} (0-indexed) does not contain the right number of atoms of type {type_index}. Expected: {expected}. Found: {found}")]
    WrongRepartition {
        row: usize,
        type_index: usize,
        expected: usize,
        found: usize,
    },
}

/// Checks a single assignment row against the instance.
pub fn check_row(instance: &Instance, row_index: usize, row: &[usize]) -> Result<(), ConsistencyError> {
    if row.len() != instance.num_sites() {
        return Err(ConsistencyError::IncompleteSolution { row: row_index });
    }

    let mut counts = vec![0usize; instance.num_types()];
    for &label in row {
        let Some(count) = counts.get_mut(label) else {
            return Err(ConsistencyError::InvalidType {
                row: row_index,
                label,
                num_types: instance.num_types(),
            });
        };
        *count += 1;
    }

    for (type_index, &found) in counts.iter().enumerate() {
        let expected = instance.expected_count(type_index);
        if found != expected {
            return Err(ConsistencyError::WrongRepartition {
                row: row_index,
                type_index,
                expected,
                found,
            });
        }
    }

    Ok(())
}

/// Checks every row in order and stops at the first inconsistent one.
pub fn check_consistency(instance: &Instance, solution: &Solution) -> Result<(), ConsistencyError> {
    solution
        .rows()
        .iter()
        .enumerate()
        .try_for_each(|(i, row)| check_row(instance, i, row))
}
