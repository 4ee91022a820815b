//! Deterministic one-dimensional k-means.
//!
//! Seeding is quantile-based over the sorted distinct values, assignment
//! ties go to the lower centroid index, and an emptied cluster keeps its
//! previous centroid. Centroids are computed over the sorted values, so the
//! result does not depend on input order.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ClusterError {
    #[error("no values to cluster")]
    NoData,

    #[error("cannot form {k} clusters from {points} values")]
    InvalidK { k: usize, points: usize },

    #[error("non-finite value encountered")]
    NonFinite,
}

/// Result of a clustering run.
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// One centroid per cluster, in seed order (ascending).
    pub centroids: Vec<f64>,
    /// Cluster index for each input value, in input order.
    pub assignments: Vec<usize>,
    pub iterations: usize,
    pub converged: bool,
}

impl Clustering {
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Member count of each cluster.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.k()];
        for &a in &self.assignments {
            sizes[a] += 1;
        }
        sizes
    }
}

/// Cluster `values` into at most `k` groups.
///
/// `k` is reduced to the number of distinct values, so equal values always
/// share a cluster. Iteration stops once no centroid moves by more than
/// `tolerance`, or after `max_iterations` rounds.
pub fn kmeans_1d(
    values: &[f64],
    k: usize,
    max_iterations: usize,
    tolerance: f64,
) -> Result<Clustering, ClusterError> {
    if values.is_empty() {
        return Err(ClusterError::NoData);
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(ClusterError::NonFinite);
    }
    if k == 0 || k > values.len() {
        return Err(ClusterError::InvalidK { k, points: values.len() });
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mut distinct = sorted.clone();
    distinct.dedup();
    let k = k.min(distinct.len());

    let mut centroids = seed_quantiles(&distinct, k);
    let mut assignments = assign(&sorted, &centroids);
    let mut iterations = 0;
    let mut converged = false;

    while iterations < max_iterations {
        iterations += 1;

        let updated = recompute(&sorted, &assignments, &centroids);
        let shift = centroids
            .iter()
            .zip(&updated)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max);

        centroids = updated;
        assignments = assign(&sorted, &centroids);

        if shift <= tolerance {
            converged = true;
            break;
        }
    }

    if centroids.iter().any(|c| !c.is_finite()) {
        return Err(ClusterError::NonFinite);
    }

    let assignments = assign(values, &centroids);
    Ok(Clustering { centroids, assignments, iterations, converged })
}

/// Centroid j at distinct[⌊j·(d−1)/(k−1)⌋].
fn seed_quantiles(distinct: &[f64], k: usize) -> Vec<f64> {
    if k == 1 {
        return vec![distinct[0]];
    }
    let d = distinct.len();
    (0..k).map(|j| distinct[j * (d - 1) / (k - 1)]).collect()
}

fn nearest(value: f64, centroids: &[f64]) -> usize {
    let mut best = 0;
    let mut best_dist = (value - centroids[0]).abs();
    for (i, c) in centroids.iter().enumerate().skip(1) {
        let dist = (value - c).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

fn assign(values: &[f64], centroids: &[f64]) -> Vec<usize> {
    values.iter().map(|&v| nearest(v, centroids)).collect()
}

fn recompute(values: &[f64], assignments: &[usize], previous: &[f64]) -> Vec<f64> {
    let k = previous.len();
    let mut sums = vec![0.0; k];
    let mut counts = vec![0usize; k];
    for (&v, &a) in values.iter().zip(assignments) {
        sums[a] += v;
        counts[a] += 1;
    }
    (0..k)
        .map(|j| if counts[j] == 0 { previous[j] } else { sums[j] / counts[j] as f64 })
        .collect()
}
