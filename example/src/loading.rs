use std::path::Path;

use anyhow::{anyhow, Context, Result};
use kmeans::Point;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_distr::{Distribution, Normal};

use crate::context::DataSource;

/// Spread of the synthetic blob centers around the origin
const CENTER_SPREAD: f64 = 25.0;

pub fn load_data(source: &DataSource, k: usize) -> Result<Vec<Point<f64>>> {
    match source {
        DataSource::Reference => Ok(reference_data()),
        DataSource::Json(path) => load_json(path),
        DataSource::Synthetic(n, dim_size, seed) => synthetic_data(*n, k, *dim_size, *seed),
    }
}

/// Small two-dimensional dataset with three visible groups
pub fn reference_data() -> Vec<Point<f64>> {
    [
        [1.0, 2.0],
        [1.5, 1.8],
        [5.0, 8.0],
        [8.0, 8.0],
        [1.0, 0.6],
        [9.0, 11.0],
        [8.0, 2.0],
        [10.0, 2.0],
        [9.0, 3.0],
        [5.0, 4.0],
    ].into_iter().map(Point::from).collect()
}

pub fn load_json(path: &Path) -> Result<Vec<Point<f64>>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("reading dataset {}", path.display()))?;
    parse_points(&contents).with_context(|| format!("parsing dataset {}", path.display()))
}

/// Parse `[[x, y, ...], ...]` into points
pub fn parse_points(contents: &str) -> Result<Vec<Point<f64>>> {
    let rows: Vec<Vec<f64>> = serde_json::from_str(contents)
        .context("expected a JSON array of numeric arrays")?;
    Ok(rows.into_iter().map(Point::new).collect())
}

/// Sample `n` points from `k` gaussian blobs with unit variance
///
/// Point `i` is drawn from blob `i % k`, so the first k points seed one
/// centroid per blob.
pub fn synthetic_data(n: usize, k: usize, dim_size: usize, seed: u64) -> Result<Vec<Point<f64>>> {
    if k == 0 {
        return Err(anyhow!("synthetic data needs at least one blob"));
    }
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let spread = Normal::new(0.0, CENTER_SPREAD).map_err(|e| anyhow!("blob spread: {}", e))?;
    let noise = Normal::new(0.0, 1.0).map_err(|e| anyhow!("blob noise: {}", e))?;

    let centers: Vec<Vec<f64>> = (0..k)
        .map(|_| (0..dim_size).map(|_| spread.sample(&mut rng)).collect())
        .collect();
    log::debug!("synthetic blob centers: {:?}", centers);

    Ok((0..n)
        .map(|i| {
            let center = &centers[i % k];
            Point::new(center.iter().map(|c| c + noise.sample(&mut rng)).collect())
        })
        .collect())
}
