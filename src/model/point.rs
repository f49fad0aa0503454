//! Point cloud — the immutable input to the similarity builder.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// An ordered sequence of N points, each a D-dimensional feature vector.
///
/// Validated at construction: N ≥ 1, D ≥ 1, every point has the same D,
/// every coordinate finite. Immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    points: Vec<Vec<f64>>,
    dim: usize,
}

impl PointCloud {
    pub fn new(points: Vec<Vec<f64>>) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        let dim = points[0].len();
        if dim == 0 {
            return Err(Error::InvalidConfiguration(
                "points must have at least one dimension".into(),
            ));
        }
        for (i, p) in points.iter().enumerate() {
            if p.len() != dim {
                return Err(Error::InvalidConfiguration(format!(
                    "point {i} has dimension {}, expected {dim}",
                    p.len()
                )));
            }
            if p.iter().any(|c| !c.is_finite()) {
                return Err(Error::InvalidConfiguration(format!(
                    "point {i} has a non-finite coordinate"
                )));
            }
        }
        Ok(Self { points, dim })
    }

    /// Number of points N.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: construction rejects empty clouds.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Feature dimension D.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Coordinates of point `i`.
    pub fn point(&self, i: usize) -> &[f64] {
        &self.points[i]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.points.iter().map(Vec::as_slice)
    }

    /// Euclidean distance between points `i` and `j`.
    pub fn distance(&self, i: usize, j: usize) -> f64 {
        self.points[i]
            .iter()
            .zip(&self.points[j])
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }

    /// A copy centered to zero mean per dimension and scaled so the largest
    /// absolute coordinate is 1. Skips the scaling step when all points
    /// coincide (max |coordinate| = 0 after centering).
    pub fn rescaled(&self) -> Self {
        let n = self.points.len() as f64;
        let mut mean = vec![0.0; self.dim];
        for p in &self.points {
            for (m, c) in mean.iter_mut().zip(p) {
                *m += c / n;
            }
        }

        let mut centered: Vec<Vec<f64>> = self
            .points
            .iter()
            .map(|p| p.iter().zip(&mean).map(|(c, m)| c - m).collect())
            .collect();

        let max_abs = centered
            .iter()
            .flat_map(|p| p.iter())
            .fold(0.0f64, |acc, c| acc.max(c.abs()));

        if max_abs > 0.0 {
            for p in &mut centered {
                for c in p.iter_mut() {
                    *c /= max_abs;
                }
            }
        }

        Self { points: centered, dim: self.dim }
    }
}
