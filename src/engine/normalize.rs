//! Unit-length normalization of feature vectors.

use crate::types::Component;

/// Whether every component of `row` is zero.
pub fn is_null<T: Component>(row: &[T]) -> bool {
    row.iter().all(|&x| x == T::ZERO)
}

/// Euclidean norm of `row`.
pub fn norm<T: Component>(row: &[T]) -> T {
    row.iter().fold(T::ZERO, |acc, &x| acc + x * x).sqrt()
}

/// Scale `row` in place to unit length. Leaves a null vector untouched and returns false.
pub fn normalize_in_place<T: Component>(row: &mut [T]) -> bool {
    let n = norm(row);
    if n == T::ZERO {
        return false;
    }
    for x in row.iter_mut() {
        *x = *x / n;
    }
    true
}

/// Return the unit-length equivalent of `row`, or `None` for a null vector.
///
/// Inputs are expected to be non-negative, so results lie in the non-negative
/// orthant of the unit hypersphere.
pub fn normalize<T: Component>(row: &[T]) -> Option<Vec<T>> {
    if is_null(row) {
        return None;
    }
    let mut out = row.to_vec();
    if normalize_in_place(&mut out) {
        Some(out)
    } else {
        None
    }
}
