//! Deterministic 1-D k-means (Lloyd iterations from fixed seeds).
//!
//! Used by `cluster` (fixation heights seeded at the midlines) and `split`
//! (saccade lengths seeded at the extremes). No random restarts: the same
//! input and seeds always produce the same labels.

use log::{debug, warn};

/// Outcome of a k-means run.
#[derive(Clone, Debug, PartialEq)]
pub struct Clustering {
    /// Cluster index for every input value.
    pub labels: Vec<usize>,
    /// Final centroid per cluster. Empty clusters keep their last centroid.
    pub centers: Vec<f64>,
    pub iterations: usize,
    pub converged: bool,
}

impl Clustering {
    /// Number of values carrying each label.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centers.len()];
        for &l in &self.labels {
            sizes[l] += 1;
        }
        sizes
    }

    /// Cluster indices sorted by ascending centroid (index breaks ties).
    pub fn order_by_center(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.centers.len()).collect();
        order.sort_by(|&a, &b| {
            self.centers[a]
                .partial_cmp(&self.centers[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
    }
}

/// Index of the value in `centers` closest to `value`; ties go to the lower
/// index.
pub fn nearest_index(centers: &[f64], value: f64) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, &c) in centers.iter().enumerate() {
        let dist = (c - value).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

/// Lloyd's algorithm on scalars starting from `seeds`.
///
/// Stops once an iteration changes neither labels nor centroids, or after
/// `max_iterations` assignment steps.
pub fn kmeans(values: &[f64], seeds: &[f64], max_iterations: usize) -> Clustering {
    let k = seeds.len();
    let mut centers = seeds.to_vec();
    let mut labels = vec![0usize; values.len()];
    if k == 0 || values.is_empty() {
        return Clustering {
            labels,
            centers,
            iterations: 0,
            converged: true,
        };
    }

    let mut iterations = 0;
    let mut converged = false;
    while iterations < max_iterations {
        iterations += 1;
        let next_labels: Vec<usize> = values.iter().map(|&v| nearest_index(&centers, v)).collect();

        let mut sums = vec![0.0f64; k];
        let mut counts = vec![0usize; k];
        for (&v, &l) in values.iter().zip(&next_labels) {
            sums[l] += v;
            counts[l] += 1;
        }
        let next_centers: Vec<f64> = (0..k)
            .map(|j| {
                if counts[j] > 0 {
                    sums[j] / counts[j] as f64
                } else {
                    centers[j]
                }
            })
            .collect();

        let stable = next_labels == labels && next_centers == centers;
        labels = next_labels;
        centers = next_centers;
        if stable {
            converged = true;
            break;
        }
    }

    if converged {
        debug!("kmeans k={} n={} converged after {} iterations", k, values.len(), iterations);
    } else {
        warn!(
            "kmeans k={} n={} did not converge within {} iterations",
            k,
            values.len(),
            max_iterations
        );
    }

    Clustering {
        labels,
        centers,
        iterations,
        converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_prefers_lower_index_on_tie() {
        assert_eq!(nearest_index(&[10.0, 20.0], 15.0), 0);
        assert_eq!(nearest_index(&[10.0, 20.0], 15.1), 1);
    }

    #[test]
    fn separates_two_groups() {
        let values = [1.0, 2.0, 3.0, 10.0, 11.0, 12.0];
        let result = kmeans(&values, &[1.0, 12.0], 100);
        assert!(result.converged);
        assert_eq!(result.labels, vec![0, 0, 0, 1, 1, 1]);
        assert_eq!(result.centers, vec![2.0, 11.0]);
        assert_eq!(result.sizes(), vec![3, 3]);
    }

    #[test]
    fn empty_cluster_keeps_its_seed() {
        let values = [5.0, 6.0];
        let result = kmeans(&values, &[5.0, 100.0], 100);
        assert_eq!(result.labels, vec![0, 0]);
        assert_eq!(result.centers[1], 100.0);
        assert_eq!(result.sizes(), vec![2, 0]);
    }

    #[test]
    fn order_by_center_sorts_crossed_clusters() {
        let c = Clustering {
            labels: vec![],
            centers: vec![30.0, 10.0, 20.0],
            iterations: 0,
            converged: true,
        };
        assert_eq!(c.order_by_center(), vec![1, 2, 0]);
    }

    #[test]
    fn deterministic_across_calls() {
        let values: Vec<f64> = (0..50).map(|i| ((i * 37) % 101) as f64).collect();
        let a = kmeans(&values, &[0.0, 50.0, 100.0], 300);
        let b = kmeans(&values, &[0.0, 50.0, 100.0], 300);
        assert_eq!(a, b);
    }
}
