use std::{fs::File, io::{BufWriter, Write}, path::Path, time::Duration};

use anyhow::{Context, Result};
use csv::WriterBuilder;
use kmeans::{Kmeans, Point, TrainReport};
use serde::Serialize;

/// Training summary written next to the csv tables
#[derive(Clone, Debug, Serialize)]
pub struct RunSummary {
    pub k: usize,
    pub dimension: usize,
    pub points: usize,
    pub iterations: usize,
    pub elapsed_ms: f64,
    pub assign_ms: f64,
    pub recalculate_ms: f64,
    pub empty_clusters: usize,
    pub inertia: f64,
    pub cluster_sizes: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
}

impl RunSummary {
    pub fn new(model: &Kmeans<f64>, report: &TrainReport, points: usize, inertia: f64, cluster_sizes: Vec<usize>) -> Self {
        Self {
            k: model.k(),
            dimension: model.dimension(),
            points,
            iterations: report.iterations,
            elapsed_ms: millis(report.elapsed),
            assign_ms: millis(report.assign_time),
            recalculate_ms: millis(report.recalculate_time),
            empty_clusters: report.empty_clusters,
            inertia,
            cluster_sizes,
            centroids: model.centroids().iter().map(|c| c.coords().to_vec()).collect(),
        }
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

/// Write `point;label` rows into `<project_folder>/<table>.csv`
pub fn write_assigned(labels: &[usize], project_folder: &Path, table: &str) -> Result<()> {
    let path = project_folder.join(format!("{}.csv", table));
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["point", "label"])?;
    for (point, label) in labels.iter().enumerate() {
        writer.serialize((point, label))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write one `cluster;axis;value` row per centroid coordinate
pub fn write_clusters_base(centroids: &[Point<f64>], project_folder: &Path, table: &str) -> Result<()> {
    let path = project_folder.join(format!("{}.csv", table));
    let mut writer = WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    writer.write_record(["cluster", "axis", "value"])?;
    for (cluster, centroid) in centroids.iter().enumerate() {
        for (axis, value) in centroid.coords().iter().enumerate() {
            writer.serialize((cluster, axis, value))?;
        }
    }
    writer.flush()?;
    Ok(())
}

pub fn write_summary(summary: &RunSummary, project_folder: &Path, name: &str) -> Result<()> {
    let path = project_folder.join(format!("{}.json", name));
    let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut data_file = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut data_file, summary)?;
    data_file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigned_table_layout() {
        let dir = tempfile::tempdir().unwrap();
        write_assigned(&[0, 2, 1], dir.path(), "assigned").unwrap();
        let written = std::fs::read_to_string(dir.path().join("assigned.csv")).unwrap();
        assert_eq!(written, "point;label\n0;0\n1;2\n2;1\n");
    }

    #[test]
    fn centroid_table_layout() {
        let dir = tempfile::tempdir().unwrap();
        let centroids = vec![Point::from([1.5, 2.0]), Point::from([-3.0, 0.25])];
        write_clusters_base(&centroids, dir.path(), "centroid").unwrap();
        let written = std::fs::read_to_string(dir.path().join("centroid.csv")).unwrap();
        assert_eq!(written, "cluster;axis;value\n0;0;1.5\n0;1;2.0\n1;0;-3.0\n1;1;0.25\n");
    }

    #[test]
    fn summary_is_json() {
        let dir = tempfile::tempdir().unwrap();
        let data = vec![Point::from([0.0, 0.0]), Point::from([4.0, 0.0])];
        let mut model = Kmeans::new(1, 2).unwrap();
        let report = model.train(&data, 2).unwrap();
        let summary = RunSummary::new(&model, &report, data.len(), 8.0, vec![2]);
        write_summary(&summary, dir.path(), "report").unwrap();

        let written = std::fs::read_to_string(dir.path().join("report.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["k"], 1);
        assert_eq!(value["iterations"], 2);
        assert_eq!(value["centroids"][0][0], 2.0);
        assert_eq!(value["cluster_sizes"][0], 2);
    }
}
