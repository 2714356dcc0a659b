//! Metrics calculation for cluster quality assessment
//! Provides read-only measurements of a fitted model against a labeled dataset

use crate::{
    error::Result,
    lloyd::Kmeans,
    tools::{check_dimensions, check_labels, try_vec},
    types::{EuclideanDistance, Point, Scalar},
};

/// Sum of squared distances from every point to its assigned centroid
///
/// This is the objective Lloyd's algorithm minimizes; neither the update step
/// nor the assignment step can increase it.
///
/// # Errors
/// * `InvalidArgument` if `labels` does not match `data` or holds a label `>= k`
/// * `DimensionMismatch` if a point does not match the model
pub fn inertia<F: Scalar>(data: &[Point<F>], model: &Kmeans<F>, labels: &[usize]) -> Result<F> {
    check_labels(labels, data.len(), model.k())?;
    check_dimensions(data, model.dimension())?;
    Ok(data.iter().zip(labels.iter())
        .map(|(row, &cluster)| {
            let d = row.euclidean_distance(&model.centroids()[cluster]);
            d * d
        })
        .fold(F::zero(), |acc, sq| acc + sq))
}

/// Number of points assigned to each cluster
///
/// # Errors
/// * `InvalidArgument` if a label is `>= k`
/// * `AllocationFailure` if the counter array cannot be reserved
pub fn cluster_sizes(labels: &[usize], k: usize) -> Result<Vec<usize>> {
    check_labels(labels, labels.len(), k)?;
    let mut sizes = try_vec(0, k, "cluster sizes")?;
    labels.iter().for_each(|&cluster| sizes[cluster] += 1);
    Ok(sizes)
}
