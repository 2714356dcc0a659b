//! K-Means clustering with Lloyd's algorithm
//! Deterministic first-k seeding, nearest-centroid assignment and mean
//! recomputation over a fixed iteration budget

pub mod error;
pub mod lloyd;
pub mod metrics;
pub mod types;
mod euclidean_centers;
mod init_first;
mod tools;

pub use error::{KmeansError, Result};
pub use lloyd::{fit, Kmeans, TrainReport};
pub use types::{distance, EuclideanDistance, Point, Scalar};
