//! First-k initialization
//! Seeds cluster centroids with the leading points of the dataset,
//! which keeps training fully deterministic for a given input order

use crate::{error::{KmeansError, Result}, lloyd::Kmeans, tools::check_dimensions, types::{KmeansValue, Scalar, Point}};

/// Initialize cluster centroids with the first k points of the dataset
///
/// Centroid `i` becomes a copy of point `i` for every `i` in `[0, k)`.
/// No randomness is involved: the same dataset order always yields the same
/// seeds, and an unlucky order (e.g. the first k points all belonging to one
/// blob) yields a poor starting position.
///
/// # Arguments
/// * `data` - Dataset points, at least `model.k()` of them
/// * `model` - Model whose centroids are overwritten
///
/// # Errors
/// * `InvalidArgument` if the dataset has fewer than k points
/// * `DimensionMismatch` if one of the first k points does not match the model
///
/// Nothing is written unless all checks pass.
pub fn set_centroid_by_data<F: Scalar>(data: &[Point<F>], model: &mut Kmeans<F>) -> Result<()> {
    let k = model.k();
    if data.len() < k {
        return Err(KmeansError::invalid(format!(
            "initialization needs at least k = {} points, dataset has {}", k, data.len()
        )));
    }
    let seeds = &data[..k];
    check_dimensions(seeds, model.dimension())?;

    model.centroid.iter_mut().zip(seeds.iter())
        .for_each(|(centroid, point)| centroid.copy_by_field(point));
    Ok(())
}
