use crate::cluster::seeding::sample_indices;
use rand::Rng;

/// Outcome of a fixed-iteration k-means run
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansResult {
    /// Cluster index per point, from the final round
    pub labels: Vec<usize>,
    /// Exactly `k` centroids, from the final round
    pub centroids: Vec<Vec<f64>>,
    /// Point indices the centroids were seeded from (empty for `kmeans_from`)
    pub seed_indices: Vec<usize>,
}

impl KMeansResult {
    /// Number of points assigned to each cluster
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for &label in &self.labels {
            sizes[label] += 1;
        }
        sizes
    }

    /// Clusters that ended with no members (zero-vector centroids)
    pub fn empty_clusters(&self) -> Vec<usize> {
        self.cluster_sizes()
            .iter()
            .enumerate()
            .filter(|(_, size)| **size == 0)
            .map(|(i, _)| i)
            .collect()
    }
}

pub fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Index of the closest centroid; ties go to the lowest index
pub fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let d = squared_distance(point, centroid);
        if d < best_dist {
            best_dist = d;
            best = i;
        }
    }
    best
}

/// k-means with centroids sampled from `points` by `rng`
pub fn kmeans<R: Rng + ?Sized>(
    points: &[Vec<f64>],
    k: usize,
    iterations: usize,
    rng: &mut R,
) -> KMeansResult {
    let seed_indices = sample_indices(points.len(), k, rng);
    let initial = seed_indices.iter().map(|&i| points[i].clone()).collect();
    KMeansResult {
        seed_indices,
        ..kmeans_from(points, initial, iterations)
    }
}

/// k-means from explicit initial centroids
///
/// Runs exactly `iterations` rounds of assign-then-update with no
/// convergence check. A centroid with no members becomes the zero vector.
/// With zero rounds the initial centroids are kept and points are labelled
/// against them; with no centroids no point gets a label.
pub fn kmeans_from(points: &[Vec<f64>], initial: Vec<Vec<f64>>, iterations: usize) -> KMeansResult {
    let k = initial.len();
    let mut centroids = initial;
    if k == 0 || iterations == 0 {
        let labels = if k == 0 { Vec::new() } else { assign(points, &centroids) };
        return KMeansResult {
            labels,
            centroids,
            seed_indices: Vec::new(),
        };
    }

    let dims = points.first().or(centroids.first()).map_or(0, Vec::len);
    let mut labels = Vec::new();

    for round in 0..iterations {
        labels = assign(points, &centroids);

        let mut sums = vec![vec![0.0; dims]; k];
        let mut counts = vec![0usize; k];
        for (point, &label) in points.iter().zip(&labels) {
            counts[label] += 1;
            for (s, v) in sums[label].iter_mut().zip(point) {
                *s += v;
            }
        }

        centroids = sums
            .into_iter()
            .zip(&counts)
            .map(|(sum, &count)| {
                if count == 0 {
                    vec![0.0; dims]
                } else {
                    sum.into_iter().map(|s| s / count as f64).collect()
                }
            })
            .collect();

        tracing::trace!(round, ?counts, "k-means round");
    }

    KMeansResult {
        labels,
        centroids,
        seed_indices: Vec::new(),
    }
}

fn assign(points: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<usize> {
    points.iter().map(|p| nearest_centroid(p, centroids)).collect()
}
