//! Candidate neighbor selection and kernel weighting.
//!
//! Brute-force pairwise Euclidean distances. N is notebook-scale here;
//! the contract is determinism, not asymptotics.

use tracing::trace;

use crate::model::PointCloud;
use super::Mode;

/// A directed candidate edge per selected neighbor: `(target, value)`.
/// Carries distances out of [`candidates`], weights out of [`weigh`].
pub type CandidateRows = Vec<Vec<(usize, f64)>>;

/// Select each point's neighbor candidates.
///
/// knn: the k nearest other points, ordered (and tie-broken) by
/// `(distance, index)` ascending. radius: all other points at distance
/// ≤ epsilon, by ascending index. Self is never a candidate.
pub fn candidates(points: &PointCloud, mode: Mode) -> CandidateRows {
    let n = points.len();
    let mut rows = Vec::with_capacity(n);

    for i in 0..n {
        let row = match mode {
            Mode::Knn { k } => {
                let mut all: Vec<(usize, f64)> = (0..n)
                    .filter(|&j| j != i)
                    .map(|j| (j, points.distance(i, j)))
                    .collect();
                all.sort_unstable_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
                all.truncate(k);
                all
            }
            Mode::Radius { epsilon } => (0..n)
                .filter(|&j| j != i)
                .map(|j| (j, points.distance(i, j)))
                .filter(|&(_, d)| d <= epsilon)
                .collect(),
        };
        trace!(point = i, candidates = row.len(), "selected neighbors");
        rows.push(row);
    }

    rows
}

/// Gaussian kernel: `exp(-distance² / sigma)`.
///
/// Strictly positive for any finite distance, though it can underflow to
/// exactly 0 at extreme distances; such edges are dropped downstream.
#[inline]
pub fn gaussian(distance: f64, sigma: f64) -> f64 {
    (-(distance * distance) / sigma).exp()
}

/// Replace candidate distances with kernel weights.
pub fn weigh(mut rows: CandidateRows, sigma: f64) -> CandidateRows {
    for row in &mut rows {
        for entry in row {
            entry.1 = gaussian(entry.1, sigma);
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line() -> PointCloud {
        // Colinear points at 0, 1, 3.
        PointCloud::new(vec![vec![0.0], vec![1.0], vec![3.0]]).unwrap()
    }

    #[test]
    fn test_knn_out_degree_is_exactly_k() {
        let cloud = line();
        let rows = candidates(&cloud, Mode::Knn { k: 2 });
        for row in &rows {
            assert_eq!(row.len(), 2);
        }
    }

    #[test]
    fn test_knn_selection_on_line() {
        let rows = candidates(&line(), Mode::Knn { k: 1 });
        assert_eq!(rows[0], vec![(1, 1.0)]);
        assert_eq!(rows[1], vec![(0, 1.0)]);
        assert_eq!(rows[2], vec![(1, 2.0)]);
    }

    #[test]
    fn test_knn_tie_broken_by_lower_index() {
        // Point 1 sits exactly between 0 and 2.
        let cloud = PointCloud::new(vec![vec![0.0], vec![1.0], vec![2.0]]).unwrap();
        let rows = candidates(&cloud, Mode::Knn { k: 1 });
        assert_eq!(rows[1], vec![(0, 1.0)]);
    }

    #[test]
    fn test_radius_out_degree_counts_points_within_epsilon() {
        let rows = candidates(&line(), Mode::Radius { epsilon: 2.0 });
        assert_eq!(rows[0], vec![(1, 1.0)]);
        assert_eq!(rows[1], vec![(0, 1.0), (2, 2.0)]);
        assert_eq!(rows[2], vec![(1, 2.0)]);
    }

    #[test]
    fn test_radius_zero_selects_only_duplicates() {
        let rows = candidates(&line(), Mode::Radius { epsilon: 0.0 });
        assert!(rows.iter().all(Vec::is_empty));

        let dup = PointCloud::new(vec![vec![1.0], vec![1.0]]).unwrap();
        let rows = candidates(&dup, Mode::Radius { epsilon: 0.0 });
        assert_eq!(rows[0], vec![(1, 0.0)]);
        assert_eq!(rows[1], vec![(0, 0.0)]);
    }

    #[test]
    fn test_gaussian_kernel_values() {
        assert_eq!(gaussian(0.0, 1.0), 1.0);
        assert!((gaussian(1.0, 1.0) - (-1.0f64).exp()).abs() < 1e-15);
        assert!((gaussian(2.0, 1.0) - (-4.0f64).exp()).abs() < 1e-15);
        // Wider kernel, heavier tail.
        assert!(gaussian(2.0, 4.0) > gaussian(2.0, 1.0));
    }
}
