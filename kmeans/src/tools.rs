//! Storage and validation helpers
//! Contains fallible allocation and the argument checks shared by the
//! assignment, update and training steps

use num_traits::Float;

use crate::{error::{KmeansError, Result}, types::{Point, Scalar}};

/// Allocate a vector of `len` copies of `value` without aborting on OOM
///
/// # Arguments
/// * `value` - Initial value of every element
/// * `len` - Number of elements
/// * `what` - Name of the storage, reported in the error
///
/// # Errors
/// * `AllocationFailure` if the allocator refuses the reservation
pub fn try_vec<T: Clone>(value: T, len: usize, what: &'static str) -> Result<Vec<T>> {
    let mut storage = Vec::new();
    storage.try_reserve_exact(len)
        .map_err(|_| KmeansError::AllocationFailure { what, requested: len })?;
    storage.resize(len, value);
    Ok(storage)
}

/// Check that every point has the expected dimension
///
/// Returns the first mismatch found, scanning in dataset order.
pub fn check_dimensions<F: Scalar>(points: &[Point<F>], dimension: usize) -> Result<()> {
    match points.iter().find(|p| p.dimension() != dimension) {
        Some(point) => Err(KmeansError::DimensionMismatch { expected: dimension, found: point.dimension() }),
        None => Ok(())
    }
}

/// Check that a label array has one entry per point and only references clusters in `[0, k)`
pub fn check_labels(labels: &[usize], num_points: usize, k: usize) -> Result<()> {
    if labels.len() != num_points {
        return Err(KmeansError::invalid(format!(
            "expected {} labels, found {}", num_points, labels.len()
        )));
    }
    match labels.iter().enumerate().find(|(_, label)| **label >= k) {
        Some((i, label)) => Err(KmeansError::invalid(format!(
            "label {} of point {} is out of range for k = {}", label, i, k
        ))),
        None => Ok(())
    }
}

/// Convert a membership count to the coordinate type
///
/// Every `usize` is representable by `f32`/`f64`, possibly rounded, so the
/// fallback is only reached by exotic `Float` implementations.
pub fn count_as<F: Float>(count: usize) -> F {
    F::from(count).unwrap_or_else(F::max_value)
}
