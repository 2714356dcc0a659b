//! Update step of Lloyd's algorithm
//! Every centroid is rebuilt from scratch as the mean of its members;
//! a cluster left without members collapses to the origin

use crate::{lloyd::Kmeans, tools::{count_as, try_vec}, error::Result, types::{KmeansValue, Point, Scalar}};

/// Move every centroid to the arithmetic mean of the points labeled with it
///
/// Centroids are overwritten in place; their previous positions play no part
/// in the result.
///
/// # Arguments
/// * `data` - Dataset points
/// * `model` - Mutable reference to the model (centroids will be updated)
/// * `assigned` - Cluster index of every data point, same length as `data`
///
/// # Returns
/// * Number of clusters that received no point
///
/// # Algorithm
/// 1. Reset every centroid to the zero vector
/// 2. Sum all data points in each cluster and count them
/// 3. Divide each non-empty cluster's sum by its count
///
/// # Note
/// A cluster without points keeps the zero vector: it collapses to the
/// origin instead of holding its previous position. Inputs are expected to
/// be validated by the caller (matching dimensions, labels in `[0, k)`).
pub fn euclidean_recalculate<F: Scalar>(
    data: &[Point<F>],
    model: &mut Kmeans<F>,
    assigned: &[usize],
) -> Result<usize> {
    let mut counts: Vec<usize> = try_vec(0, model.k(), "cluster counts")?;

    // Step 1: Reset every centroid to the origin
    model.centroid.iter_mut().for_each(|centroid| centroid.to_zero());

    // Step 2: Sum all data points within each cluster
    for (row, &cluster) in data.iter().zip(assigned.iter()) {
        model.centroid[cluster].sum_by_field(row);
        counts[cluster] += 1;
    }

    // Step 3: Divide each cluster's sum by its count to compute the mean
    let mut empty = 0;
    for (cluster, (centroid, &count)) in model.centroid.iter_mut().zip(counts.iter()).enumerate() {
        if count > 0 {
            centroid.div_by_n(count_as(count));
        } else {
            log::debug!("cluster {} received no points, centroid reset to origin", cluster);
            empty += 1;
        }
    }
    Ok(empty)
}
