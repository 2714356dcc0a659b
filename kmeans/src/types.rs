//! Type definitions and trait implementations for K-Means clustering
//! Includes the point type, the Euclidean distance and the in-place
//! arithmetic helpers used while recomputing centroids

use std::{fmt::Debug, ops::Index};

use num_traits::Float;

use crate::{error::{KmeansError, Result}, tools::try_vec};

/// Coordinate type accepted by the clustering routines (`f32`, `f64`)
pub trait Scalar: Float + Debug {}

impl<F> Scalar for F where F: Float + Debug {}

/// A point of the dataset or a cluster centroid
///
/// The dimension of a point is the length of its coordinate vector and
/// never changes after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Point<F> {
    coords: Vec<F>,
}

impl<F: Scalar> Point<F> {
    pub fn new(coords: Vec<F>) -> Self {
        Self { coords }
    }

    /// Create the origin of the given dimension
    ///
    /// # Errors
    /// * `AllocationFailure` if the coordinate storage cannot be reserved
    pub fn zeros(dimension: usize) -> Result<Self> {
        Ok(Self { coords: try_vec(F::zero(), dimension, "point coordinates")? })
    }

    pub fn dimension(&self) -> usize {
        self.coords.len()
    }

    pub fn coords(&self) -> &[F] {
        &self.coords
    }

    pub fn is_finite(&self) -> bool {
        self.coords.iter().all(|c| c.is_finite())
    }
}

impl<F: Scalar> From<Vec<F>> for Point<F> {
    fn from(coords: Vec<F>) -> Self {
        Self::new(coords)
    }
}

impl<F: Scalar, const N: usize> From<[F; N]> for Point<F> {
    fn from(coords: [F; N]) -> Self {
        Self::new(coords.to_vec())
    }
}

impl<F> Index<usize> for Point<F> {
    type Output = F;
    fn index(&self, axis: usize) -> &F {
        &self.coords[axis]
    }
}

/// In-place operations required for centroid recalculation
///
/// All methods assume both operands share one dimension; the callers in this
/// crate validate dimensions before any of them runs.
pub trait KmeansValue {
    type Scalar;
    /// Reset every coordinate to zero
    fn to_zero(&mut self);
    /// Overwrite coordinates with the coordinates of `right`
    fn copy_by_field(&mut self, right: &Self);
    /// Element-wise addition of `right` into `self`
    fn sum_by_field(&mut self, right: &Self);
    /// Divide all coordinates by a scalar (for averaging)
    fn div_by_n(&mut self, div: Self::Scalar);
}

impl<F: Scalar> KmeansValue for Point<F> {
    type Scalar = F;
    fn to_zero(&mut self) {
        self.coords.iter_mut().for_each(|c| *c = F::zero());
    }
    fn copy_by_field(&mut self, right: &Self) {
        self.coords.copy_from_slice(&right.coords);
    }
    fn sum_by_field(&mut self, right: &Self) {
        self.coords.iter_mut().zip(right.coords.iter()).for_each(|(a, b)| *a = *a + *b);
    }
    fn div_by_n(&mut self, div: F) {
        self.coords.iter_mut().for_each(|c| *c = *c / div);
    }
}

/// Trait for calculating Euclidean distance between points
pub trait EuclideanDistance {
    type Output;
    /// Calculate sqrt(sum((a[i] - b[i])^2)) over paired coordinates
    fn euclidean_distance(&self, right: &Self) -> Self::Output;
}

impl<F: Scalar> EuclideanDistance for Point<F> {
    type Output = F;
    fn euclidean_distance(&self, right: &Self) -> F {
        self.coords.iter().zip(right.coords.iter())
            .map(|(&a, &b)| (a - b) * (a - b))
            .fold(F::zero(), |acc, sq| acc + sq)
            .sqrt()
    }
}

/// Euclidean distance with the dimension check made explicit
///
/// # Errors
/// * `DimensionMismatch` if `a` and `b` have different dimensions
pub fn distance<F: Scalar>(a: &Point<F>, b: &Point<F>) -> Result<F> {
    if a.dimension() != b.dimension() {
        return Err(KmeansError::DimensionMismatch { expected: a.dimension(), found: b.dimension() });
    }
    Ok(a.euclidean_distance(b))
}
