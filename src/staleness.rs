//! Decides whether the stored matrix still matches the current inputs.
//!
//! Comparison is by key set, not sequence: reordering origins or
//! destinations is not a change, while renaming a destination is
//! indistinguishable from removing one and adding another and forces a
//! full refetch.

use crate::matrix::Matrix;
use std::collections::HashSet;

/// Returns true when the stored matrix must be discarded and refetched.
///
/// An absent or empty matrix is always dirty. Otherwise the matrix is dirty
/// iff the origin keys extracted from its rows, or the destination keys
/// extracted from its header, differ in either direction from the current
/// sets.
pub fn is_dirty(
    current_origins: &HashSet<&str>,
    current_destinations: &HashSet<&str>,
    stored: Option<&Matrix>,
) -> bool {
    let Some(matrix) = stored else {
        return true;
    };
    if matrix.rows.is_empty() {
        return true;
    }

    matrix.origin_set() != *current_origins || matrix.destination_set() != *current_destinations
}
