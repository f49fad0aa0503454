//! # simgraph — Similarity Graphs from Point Clouds
//!
//! Construction of weighted neighborhood graphs from point clouds, plus the
//! structural accessors needed to inspect them.
//!
//! ## Design Principles
//!
//! 1. **One graph type**: `WeightedGraph` is the single output DTO; every
//!    construction path produces it
//! 2. **Pure builders**: point cloud + config → graph is a pure function,
//!    deterministic down to edge enumeration order
//! 3. **No global state**: configuration travels as an explicit value,
//!    never process-wide
//! 4. **Degenerate ≠ error**: isolated nodes and disconnected graphs are
//!    valid results; connectivity is a separately-queried property
//!
//! ## Quick Start
//!
//! ```rust
//! use simgraph::{build, BuilderConfig, PointCloud, SymmetrizePolicy};
//!
//! # fn example() -> simgraph::Result<()> {
//! let cloud = PointCloud::new(vec![
//!     vec![0.0, 0.0],
//!     vec![1.0, 0.0],
//!     vec![0.0, 1.0],
//!     vec![5.0, 5.0],
//! ])?;
//!
//! let config = BuilderConfig::knn(2)
//!     .with_sigma(1.0)
//!     .with_symmetrize(SymmetrizePolicy::Maximum);
//!
//! let graph = build(&cloud, &config)?;
//! assert_eq!(graph.node_count(), 4);
//!
//! for (src, dst, w) in graph.edge_list().iter() {
//!     println!("{src} -- {dst}  [{w:.4}]");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Graph Sources
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | Similarity builder | `build` | kNN / radius neighborhoods over a point cloud |
//! | Deserialization | `export` | Load a previously exported JSON graph document |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod build;
pub mod analysis;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    PointCloud, WeightedGraph, EdgeList,
    NodeId, Neighbor,
};

// ============================================================================
// Re-exports: Builder
// ============================================================================

pub use build::{build, BuilderConfig, Mode, SymmetrizePolicy};

// ============================================================================
// Re-exports: Analysis
// ============================================================================

pub use analysis::{
    degree_matrix, adjacency_matrix, laplacian,
    connected_components, is_connected, LaplacianKind,
};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad parameters, rejected before any computation begins.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The point sequence has zero length — nothing to build.
    #[error("Empty input: point cloud has no points")]
    EmptyInput,

    /// I/O failure while exporting or importing a graph document.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
