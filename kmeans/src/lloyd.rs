use std::time::{Duration, Instant};

use crate::{
    error::{KmeansError, Result},
    euclidean_centers::euclidean_recalculate,
    init_first::set_centroid_by_data,
    tools::{check_dimensions, check_labels, try_vec},
    types::{EuclideanDistance, Point, Scalar},
};

/// K-Means model: the centroid set of Lloyd's algorithm.
///
/// The number of clusters and the dimension are fixed at construction.
/// Centroids are only mutated by initialization, the update step and training.
#[derive(Clone, Debug, PartialEq)]
pub struct Kmeans<F> {
    k: usize,
    dim_size: usize,
    pub(crate) centroid: Vec<Point<F>>,
}

/// Summary of one `fit` call. Carries no labels: predict after training to get them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrainReport {
    /// Iterations executed, always equal to the requested budget
    pub iterations: usize,
    /// Wall time of the whole call, initialization included
    pub elapsed: Duration,
    /// Time spent in assignment steps
    pub assign_time: Duration,
    /// Time spent in update steps
    pub recalculate_time: Duration,
    /// Clusters left without points by the last update (0 when no update ran)
    pub empty_clusters: usize,
}

impl<F: Scalar> Kmeans<F> {
    /// Create a model with `k` centroids of dimension `dim_size`, all at the origin.
    ///
    /// # Errors
    /// * `InvalidArgument` if `k == 0` or `dim_size == 0`, before any allocation
    /// * `AllocationFailure` if centroid storage cannot be reserved
    pub fn new(k: usize, dim_size: usize) -> Result<Self> {
        if k == 0 {
            return Err(KmeansError::invalid("k must be greater than 0"));
        }
        if dim_size == 0 {
            return Err(KmeansError::invalid("dimension must be greater than 0"));
        }
        let centroid = try_vec(Point::zeros(dim_size)?, k, "centroids")?;
        Ok(Self { k, dim_size, centroid })
    }

    /// Create a model from explicit starting centroids.
    ///
    /// # Errors
    /// * `InvalidArgument` if `centroids` is empty or zero-dimensional
    /// * `DimensionMismatch` if the centroids disagree on dimension
    pub fn with_centroids(centroids: Vec<Point<F>>) -> Result<Self> {
        let dim_size = match centroids.first() {
            Some(first) => first.dimension(),
            None => return Err(KmeansError::invalid("at least one centroid is required")),
        };
        if dim_size == 0 {
            return Err(KmeansError::invalid("dimension must be greater than 0"));
        }
        check_dimensions(&centroids, dim_size)?;
        Ok(Self { k: centroids.len(), dim_size, centroid: centroids })
    }

    /// Release the model and all centroid storage. Same as dropping it.
    pub fn destroy(self) {}

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn dimension(&self) -> usize {
        self.dim_size
    }

    pub fn centroids(&self) -> &[Point<F>] {
        &self.centroid
    }

    pub fn centroid(&self, cluster: usize) -> Option<&Point<F>> {
        self.centroid.get(cluster)
    }

    /// Seed centroid `i` with point `i` for every `i < k`.
    pub fn initialize(&mut self, data: &[Point<F>]) -> Result<()> {
        set_centroid_by_data(data, self)
    }

    /// Label every point with the index of its nearest centroid.
    ///
    /// # Errors
    /// * `DimensionMismatch` if a point does not match the model
    /// * `AllocationFailure` if the label array cannot be reserved
    pub fn predict(&self, data: &[Point<F>]) -> Result<Vec<usize>> {
        check_dimensions(data, self.dim_size)?;
        let mut labels = try_vec(0, data.len(), "labels")?;
        assign_points(data, self, &mut labels);
        Ok(labels)
    }

    /// Same as [`Kmeans::predict`] but writes into caller-owned storage.
    ///
    /// `labels` is fully overwritten on success and untouched on error.
    pub fn predict_into(&self, data: &[Point<F>], labels: &mut [usize]) -> Result<()> {
        if labels.len() != data.len() {
            return Err(KmeansError::invalid(format!(
                "label buffer holds {} entries, dataset has {} points", labels.len(), data.len()
            )));
        }
        check_dimensions(data, self.dim_size)?;
        assign_points(data, self, labels);
        Ok(())
    }

    /// Recompute every centroid as the mean of the points labeled with it.
    ///
    /// Returns the number of clusters that received no point; those centroids
    /// are reset to the origin.
    ///
    /// # Errors
    /// * `InvalidArgument` if `labels` does not match `data` or holds a label `>= k`
    /// * `DimensionMismatch` if a point does not match the model
    pub fn update(&mut self, data: &[Point<F>], labels: &[usize]) -> Result<usize> {
        check_labels(labels, data.len(), self.k)?;
        check_dimensions(data, self.dim_size)?;
        euclidean_recalculate(data, self, labels)
    }

    /// Initialize from the first k points, then run `max_iterations` Lloyd iterations.
    pub fn train(&mut self, data: &[Point<F>], max_iterations: usize) -> Result<TrainReport> {
        fit(data, self, max_iterations)
    }
}

/// Fit the model to the data with a fixed iteration budget.
///
/// Initializes the centroids with the first k points, then alternates the
/// assignment step and the update step exactly `n_iteration` times. There is
/// no convergence check: the whole budget is always spent, even when labels
/// stopped changing. The labels of the last iteration are discarded.
///
/// # Errors
/// * `InvalidArgument` if the dataset has fewer than k points
/// * `DimensionMismatch` if any point does not match the model
/// * `AllocationFailure` if the label buffer cannot be reserved
///
/// The whole dataset is validated before the model is touched.
pub fn fit<F: Scalar>(
    data: &[Point<F>],
    model: &mut Kmeans<F>,
    n_iteration: usize,
) -> Result<TrainReport> {
    if data.len() < model.k() {
        return Err(KmeansError::invalid(format!(
            "training needs at least k = {} points, dataset has {}", model.k(), data.len()
        )));
    }
    check_dimensions(data, model.dimension())?;
    let mut assigned = try_vec(0, data.len(), "labels")?;

    log::info!(
        "fit k-means: k = {} | dim = {} | points = {} | iterations = {}",
        model.k(), model.dimension(), data.len(), n_iteration
    );
    let fit_timer = Instant::now();
    set_centroid_by_data(data, model)?;

    let mut report = TrainReport { iterations: n_iteration, ..TrainReport::default() };
    for i in 0..n_iteration {
        let assign_timer = Instant::now();
        assign_points(data, model, &mut assigned);
        let assign_timer_time = assign_timer.elapsed();

        let recalculate_timer = Instant::now();
        report.empty_clusters = euclidean_recalculate(data, model, &assigned)?;
        let recalculate_timer_time = recalculate_timer.elapsed();

        report.assign_time += assign_timer_time;
        report.recalculate_time += recalculate_timer_time;
        log::debug!(
            "iteration {} | assign {:?} | recalculate {:?} | empty clusters {}",
            i, assign_timer_time, recalculate_timer_time, report.empty_clusters
        );
    }
    report.elapsed = fit_timer.elapsed();

    if report.empty_clusters > 0 {
        log::warn!("{} of {} clusters ended up empty and sit at the origin", report.empty_clusters, model.k());
    }
    log::info!("fit finished in {:?}", report.elapsed);
    Ok(report)
}

/// Assign each point to its nearest centroid, overwriting `labels`.
///
/// Centroids are scanned in index order and a candidate only replaces the
/// running minimum when strictly closer, so the lowest index wins ties. The
/// running minimum starts at +infinity; NaN distances never compare less, so
/// a point with no comparable distance keeps label 0.
///
/// Dimensions must already be validated.
pub(crate) fn assign_points<F: Scalar>(data: &[Point<F>], model: &Kmeans<F>, labels: &mut [usize]) {
    for (row, label) in data.iter().zip(labels.iter_mut()) {
        let mut min_distance = F::infinity();
        let mut nearest = 0;
        for (cluster, centroid) in model.centroid.iter().enumerate() {
            let distance = row.euclidean_distance(centroid);
            if distance < min_distance {
                min_distance = distance;
                nearest = cluster;
            }
        }
        *label = nearest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_dataset() -> Vec<Point<f64>> {
        [
            [1.0, 2.0], [1.5, 1.8], [5.0, 8.0], [8.0, 8.0], [1.0, 0.6],
            [9.0, 11.0], [8.0, 2.0], [10.0, 2.0], [9.0, 3.0], [5.0, 4.0],
        ].into_iter().map(Point::from).collect()
    }

    #[test]
    fn new_validates_arguments() {
        assert!(matches!(Kmeans::<f64>::new(0, 2), Err(KmeansError::InvalidArgument(_))));
        assert!(matches!(Kmeans::<f64>::new(3, 0), Err(KmeansError::InvalidArgument(_))));
        let model = Kmeans::<f64>::new(3, 2).unwrap();
        assert_eq!(model.k(), 3);
        assert_eq!(model.dimension(), 2);
        assert!(model.centroids().iter().all(|c| c.dimension() == 2));
        model.destroy();
    }

    #[test]
    fn new_reports_unreservable_centroids() {
        assert!(matches!(
            Kmeans::<f64>::new(usize::MAX / 2, 1),
            Err(KmeansError::AllocationFailure { what: "centroids", .. })
        ));
    }

    #[test]
    fn with_centroids_validates_arguments() {
        assert!(matches!(Kmeans::<f64>::with_centroids(vec![]), Err(KmeansError::InvalidArgument(_))));
        assert!(matches!(
            Kmeans::<f64>::with_centroids(vec![Point::new(vec![])]),
            Err(KmeansError::InvalidArgument(_))
        ));
        assert_eq!(
            Kmeans::with_centroids(vec![Point::from([1.0, 2.0]), Point::from([1.0])]),
            Err(KmeansError::DimensionMismatch { expected: 2, found: 1 })
        );
    }

    #[test]
    fn ties_go_to_the_lowest_index() {
        let model = Kmeans::with_centroids(vec![
            Point::from([-1.0, 0.0]),
            Point::from([1.0, 0.0]),
            Point::from([-1.0, 0.0]),
        ]).unwrap();
        let labels = model.predict(&[Point::from([0.0, 0.0]), Point::from([0.9, 0.0])]).unwrap();
        assert_eq!(labels, vec![0, 1]);
    }

    #[test]
    fn nan_distances_never_win() {
        let model = Kmeans::with_centroids(vec![
            Point::from([0.0, 0.0]),
            Point::from([f64::NAN, 0.0]),
            Point::from([5.0, 5.0]),
        ]).unwrap();
        let data = vec![Point::from([4.0, 4.0]), Point::from([f64::NAN, 1.0])];
        let labels = model.predict(&data).unwrap();
        assert_eq!(labels, vec![2, 0]);
    }

    #[test]
    fn predict_is_idempotent() {
        let data = reference_dataset();
        let mut model = Kmeans::new(3, 2).unwrap();
        model.train(&data, 5).unwrap();
        assert_eq!(model.predict(&data).unwrap(), model.predict(&data).unwrap());
    }

    #[test]
    fn predict_into_overwrites_storage() {
        let data = reference_dataset();
        let mut model = Kmeans::new(3, 2).unwrap();
        model.train(&data, 10).unwrap();
        let mut labels = vec![usize::MAX; data.len()];
        model.predict_into(&data, &mut labels).unwrap();
        assert_eq!(labels, model.predict(&data).unwrap());
    }

    #[test]
    fn predict_into_rejects_bad_buffers() {
        let model = Kmeans::<f64>::new(2, 2).unwrap();
        let data = vec![Point::from([1.0, 2.0]), Point::from([1.0, 2.0, 3.0])];

        let mut short = vec![7; 1];
        assert!(matches!(model.predict_into(&data, &mut short), Err(KmeansError::InvalidArgument(_))));

        let mut labels = vec![7; 2];
        assert_eq!(
            model.predict_into(&data, &mut labels),
            Err(KmeansError::DimensionMismatch { expected: 2, found: 3 })
        );
        assert_eq!(labels, vec![7, 7]);
    }

    #[test]
    fn update_validates_before_mutation() {
        let data = reference_dataset();
        let mut model = Kmeans::new(2, 2).unwrap();
        model.initialize(&data).unwrap();
        let before = model.clone();

        assert!(matches!(model.update(&data, &[0, 1]), Err(KmeansError::InvalidArgument(_))));
        assert!(matches!(model.update(&data, &[2; 10]), Err(KmeansError::InvalidArgument(_))));
        let wrong = vec![Point::from([1.0, 2.0, 3.0])];
        assert!(matches!(model.update(&wrong, &[0]), Err(KmeansError::DimensionMismatch { .. })));
        assert_eq!(model, before);
    }

    #[test]
    fn update_recomputes_means() {
        let data = reference_dataset();
        let mut model = Kmeans::new(2, 2).unwrap();
        let labels = vec![0, 0, 1, 1, 0, 1, 1, 1, 1, 1];
        let empty = model.update(&data, &labels).unwrap();
        assert_eq!(empty, 0);
        let centroid = model.centroid(0).unwrap();
        assert!((centroid[0] - 3.5 / 3.0).abs() < 1e-12);
        assert!((centroid[1] - 4.4 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn zero_iterations_keeps_initial_seeds() {
        let data = reference_dataset();
        let mut model = Kmeans::new(3, 2).unwrap();
        let report = model.train(&data, 0).unwrap();
        assert_eq!(report.iterations, 0);
        assert_eq!(report.empty_clusters, 0);
        assert_eq!(model.centroids(), &data[..3]);
    }

    #[test]
    fn training_is_deterministic() {
        let data = reference_dataset();
        let mut first = Kmeans::new(3, 2).unwrap();
        let mut second = Kmeans::new(3, 2).unwrap();
        first.train(&data, 25).unwrap();
        second.train(&data, 25).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.predict(&data).unwrap(), second.predict(&data).unwrap());
    }

    #[test]
    fn training_rejects_short_dataset() {
        let data = vec![Point::from([1.0, 2.0]), Point::from([3.0, 4.0])];
        let mut model = Kmeans::new(5, 2).unwrap();
        assert!(matches!(model.train(&data, 10), Err(KmeansError::InvalidArgument(_))));
    }

    #[test]
    fn training_rejects_mismatched_points_before_mutation() {
        let mut data = reference_dataset();
        data.push(Point::from([1.0, 2.0, 3.0]));
        let mut model = Kmeans::new(3, 2).unwrap();
        let before = model.clone();
        assert_eq!(
            model.train(&data, 10),
            Err(KmeansError::DimensionMismatch { expected: 2, found: 3 })
        );
        assert_eq!(model, before);
    }

    #[test]
    fn reference_dataset_clusters() {
        let data = reference_dataset();
        let mut model = Kmeans::new(3, 2).unwrap();
        let report = model.train(&data, 100).unwrap();
        assert_eq!(report.iterations, 100);

        let labels = model.predict(&data).unwrap();
        assert_eq!(labels.len(), data.len());
        assert!(labels.iter().all(|&l| l < 3));
        for cluster in 0..3 {
            assert!(labels.contains(&cluster), "cluster {} is empty: {:?}", cluster, labels);
        }
        for (cluster, centroid) in model.centroids().iter().enumerate() {
            if labels.contains(&cluster) {
                assert!(centroid.is_finite());
            }
        }
    }
}
