//! Shared assertion helpers for matrix invariants.
//!
//! Reused across module test suites to verify the iteration contracts:
//! coverage, uniqueness, and offset ordering.

use crate::addressing;
use crate::matrix::BitMatrix;
use crate::Indices;
use indexmap::IndexSet;

/// Assert that `list(true)` and `list(false)` partition the cells: their
/// counts sum to the bit length and no cell appears twice.
pub fn assert_lists_partition_cells(matrix: &BitMatrix) {
    let ones: Vec<Indices> = matrix.list(true).collect();
    let zeros: Vec<Indices> = matrix.list(false).collect();
    assert_eq!(
        ones.len() + zeros.len(),
        matrix.bit_len(),
        "list(true) + list(false) must cover every cell"
    );
    let unique: IndexSet<&Indices> = ones.iter().chain(zeros.iter()).collect();
    assert_eq!(unique.len(), matrix.bit_len(), "list yielded a duplicate cell");
    for indices in &ones {
        assert!(matrix.get(indices).unwrap());
    }
    for indices in &zeros {
        assert!(!matrix.get(indices).unwrap());
    }
}

/// Assert that `list_bits` yields exactly `bit_len` entries in strictly
/// increasing offset order, with bits matching `get`.
pub fn assert_list_bits_complete(matrix: &BitMatrix) {
    let mut count = 0;
    let mut last_offset = None;
    for (bit, indices) in matrix.list_bits() {
        let offset = addressing::linear_offset(matrix.size(), &indices);
        if let Some(last) = last_offset {
            assert!(offset > last, "offsets must be strictly increasing");
        }
        last_offset = Some(offset);
        assert_eq!(matrix.get(&indices).unwrap(), bit);
        count += 1;
    }
    assert_eq!(count, matrix.bit_len());
}
