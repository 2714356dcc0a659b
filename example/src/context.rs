use std::path::PathBuf;

pub const DEFAULT_K: usize = 3;
pub const DEFAULT_MAX_ITERATION: usize = 100;
pub const DEFAULT_DIM_SIZE: usize = 2;
pub const DEFAULT_SEED: u64 = 0;

/// Where the points to cluster come from
#[derive(Clone, Debug, PartialEq)]
pub enum DataSource {
    /// The ten two-dimensional points shipped with the program
    Reference,
    /// JSON file holding an array of numeric arrays
    Json(PathBuf),
    /// Gaussian blobs: number of points, dimension, seed
    Synthetic(usize, usize, u64),
}

// Struct to hold the context for clusterization, including parameters and settings
#[derive(Clone, Debug)]
pub struct ClusterizationContext {
    pub source: DataSource,
    pub k: usize,
    pub max_iteration: usize,
    pub outdir: Option<PathBuf>,
}
