//! # Similarity Graph Builder
//!
//! Turns a point cloud into a weighted neighborhood graph:
//!
//! ```text
//! PointCloud → candidate selection (knn | radius) → Gaussian weights
//!            → symmetrization (maximum | average | none) → WeightedGraph
//! ```
//!
//! Every stage is a pure function; two calls with identical arguments
//! produce identical graphs down to edge enumeration order.

pub mod neighbors;
pub mod symmetrize;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{PointCloud, WeightedGraph};
use crate::{Error, Result};

// ============================================================================
// Configuration
// ============================================================================

/// Neighborhood selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Mode {
    /// Connect each point to its `k` nearest other points. Ties at the
    /// k-th smallest distance are broken by ascending point index, so the
    /// selected subset is reproducible across runs and platforms.
    Knn { k: usize },
    /// Connect each point to every other point within distance `epsilon`.
    /// `epsilon = 0` is legal and selects exact duplicates only.
    Radius { epsilon: f64 },
}

impl Mode {
    /// Resolve a `(name, value)` pair as handed over by text-based
    /// front-ends: `"knn"` reads `value` as k, `"radius"` as epsilon.
    pub fn from_parts(name: &str, value: f64) -> Result<Self> {
        match name {
            "knn" => {
                if !value.is_finite() || value < 1.0 || value.fract() != 0.0 {
                    return Err(Error::InvalidConfiguration(format!(
                        "knn needs a positive integer k, got {value}"
                    )));
                }
                Ok(Mode::Knn { k: value as usize })
            }
            "radius" => Ok(Mode::Radius { epsilon: value }),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown mode '{other}' (expected 'knn' or 'radius')"
            ))),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Knn { k } => write!(f, "knn(k={k})"),
            Mode::Radius { epsilon } => write!(f, "radius(epsilon={epsilon})"),
        }
    }
}

/// How to reconcile the directed candidate adjacency into the final graph.
///
/// In knn mode "j is a neighbor of i" does not imply the reverse, so up to
/// two directed weights exist per unordered pair; a missing direction
/// counts as 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymmetrizePolicy {
    /// Final weight = max of the two directed weights. Undirected output.
    Maximum,
    /// Final weight = mean of the two directed weights. Undirected output.
    Average,
    /// No reconciliation: both directions kept independently. Directed output.
    None,
}

impl std::str::FromStr for SymmetrizePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "maximum" => Ok(SymmetrizePolicy::Maximum),
            "average" => Ok(SymmetrizePolicy::Average),
            "none" => Ok(SymmetrizePolicy::None),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown symmetrize policy '{other}' (expected 'maximum', 'average' or 'none')"
            ))),
        }
    }
}

impl std::fmt::Display for SymmetrizePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SymmetrizePolicy::Maximum => "maximum",
            SymmetrizePolicy::Average => "average",
            SymmetrizePolicy::None => "none",
        };
        write!(f, "{name}")
    }
}

/// Configuration for [`build`]. An explicit value per call — nothing here
/// is process-wide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuilderConfig {
    pub mode: Mode,
    /// Gaussian kernel scale: `weight = exp(-distance² / sigma)`.
    pub sigma: f64,
    pub symmetrize: SymmetrizePolicy,
    /// Center points to zero mean and scale to unit max-coordinate before
    /// any distance computation. Preprocessing only; the structural
    /// contract is unchanged.
    pub rescale: bool,
}

impl BuilderConfig {
    /// k-nearest-neighbor config with default kernel and symmetrization.
    pub fn knn(k: usize) -> Self {
        Self {
            mode: Mode::Knn { k },
            sigma: 1.0,
            symmetrize: SymmetrizePolicy::Maximum,
            rescale: false,
        }
    }

    /// Radius-threshold config with default kernel and symmetrization.
    pub fn radius(epsilon: f64) -> Self {
        Self {
            mode: Mode::Radius { epsilon },
            sigma: 1.0,
            symmetrize: SymmetrizePolicy::Maximum,
            rescale: false,
        }
    }

    pub fn with_sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    pub fn with_symmetrize(mut self, policy: SymmetrizePolicy) -> Self {
        self.symmetrize = policy;
        self
    }

    pub fn with_rescale(mut self, rescale: bool) -> Self {
        self.rescale = rescale;
        self
    }

    /// Reject bad parameters before any computation begins.
    fn validate(&self, node_count: usize) -> Result<()> {
        if !(self.sigma > 0.0) || !self.sigma.is_finite() {
            return Err(Error::InvalidConfiguration(format!(
                "sigma must be a positive finite number, got {}",
                self.sigma
            )));
        }
        match self.mode {
            Mode::Knn { k } => {
                if k == 0 {
                    return Err(Error::InvalidConfiguration(
                        "knn needs k >= 1".into(),
                    ));
                }
                if k >= node_count {
                    return Err(Error::InvalidConfiguration(format!(
                        "cannot select k={k} distinct neighbors among {node_count} points"
                    )));
                }
            }
            Mode::Radius { epsilon } => {
                if !(epsilon >= 0.0) || !epsilon.is_finite() {
                    return Err(Error::InvalidConfiguration(format!(
                        "radius needs a non-negative finite epsilon, got {epsilon}"
                    )));
                }
            }
        }
        Ok(())
    }
}

// ============================================================================
// Entry point
// ============================================================================

/// Build a similarity graph from a point cloud.
///
/// The builder allocates and exclusively owns the output; the input cloud
/// is never retained or mutated. Points with no neighbors (possible in
/// radius mode) remain in the graph as isolated nodes — check
/// [`is_connected`](crate::analysis::is_connected) afterwards if
/// connectivity matters.
pub fn build(points: &PointCloud, config: &BuilderConfig) -> Result<WeightedGraph> {
    config.validate(points.len())?;

    let rescaled;
    let working = if config.rescale {
        rescaled = points.rescaled();
        &rescaled
    } else {
        points
    };

    // Phase 1: directed candidate adjacency with distances
    let candidates = neighbors::candidates(working, config.mode);

    // Phase 2: Gaussian kernel weights
    let weighted = neighbors::weigh(candidates, config.sigma);

    // Phase 3: reconcile into the final graph
    let graph = symmetrize::apply(weighted, config.symmetrize);

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        mode = %config.mode,
        policy = %config.symmetrize,
        "built similarity graph"
    );

    Ok(graph)
}
