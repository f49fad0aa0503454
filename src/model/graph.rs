//! Weighted graph — the single output DTO of every construction path.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Error, Result};
use super::EdgeList;

/// Opaque node identifier: the index of the point it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for NodeId {
    fn from(i: usize) -> Self {
        NodeId(i)
    }
}

/// One adjacency entry: target node and edge weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Neighbor {
    pub node: NodeId,
    pub weight: f64,
}

/// Adjacency row. Neighborhood graphs keep rows around k entries, so the
/// common case stays inline.
type Row = SmallVec<[Neighbor; 8]>;

/// A weighted graph over nodes `0..N-1`.
///
/// Invariants (enforced by every constructor):
/// - no self-loops: `weight(i, i) == 0` for all i
/// - weights are finite and strictly positive; absent pairs read as 0
/// - if the graph is undirected, rows are mirror images:
///   `weight(i, j) == weight(j, i)`
/// - rows are sorted by neighbor index, so edge enumeration is stable
///
/// Read-only after construction, except for [`set_coordinates`], which
/// attaches display positions and never touches the adjacency.
///
/// [`set_coordinates`]: WeightedGraph::set_coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedGraph {
    rows: Vec<Row>,
    directed: bool,
    /// Optional per-node display position, attached post-construction.
    coordinates: Option<Vec<Vec<f64>>>,
}

impl WeightedGraph {
    /// Build a graph from explicit edges.
    ///
    /// For an undirected graph (`directed = false`), pass each unordered
    /// pair once; both adjacency directions are stored. Rejects self-loops,
    /// out-of-range indices, non-positive or non-finite weights, and
    /// duplicate pairs.
    pub fn from_edges<I>(node_count: usize, directed: bool, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut rows: Vec<Row> = vec![Row::new(); node_count];

        for (src, dst, weight) in edges {
            if src >= node_count || dst >= node_count {
                return Err(Error::InvalidConfiguration(format!(
                    "edge ({src}, {dst}) out of range for {node_count} nodes"
                )));
            }
            if src == dst {
                return Err(Error::InvalidConfiguration(format!(
                    "self-loop on node {src}"
                )));
            }
            if !weight.is_finite() || weight <= 0.0 {
                return Err(Error::InvalidConfiguration(format!(
                    "edge ({src}, {dst}) has invalid weight {weight}"
                )));
            }
            rows[src].push(Neighbor { node: NodeId(dst), weight });
            if !directed {
                rows[dst].push(Neighbor { node: NodeId(src), weight });
            }
        }

        let mut graph = Self { rows, directed, coordinates: None };
        graph.sort_rows()?;
        Ok(graph)
    }

    /// Internal constructor for the builder: rows already deduplicated,
    /// weights already validated. Only sorting remains.
    pub(crate) fn from_rows(rows: Vec<Row>, directed: bool) -> Self {
        let mut graph = Self { rows, directed, coordinates: None };
        graph
            .sort_rows()
            .expect("builder rows are deduplicated by construction");
        graph
    }

    fn sort_rows(&mut self) -> Result<()> {
        for (i, row) in self.rows.iter_mut().enumerate() {
            row.sort_unstable_by_key(|n| n.node);
            if row.windows(2).any(|w| w[0].node == w[1].node) {
                return Err(Error::InvalidConfiguration(format!(
                    "duplicate edge from node {i}"
                )));
            }
        }
        Ok(())
    }

    // ========================================================================
    // Structure accessors
    // ========================================================================

    pub fn node_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of edges: unordered pairs when undirected, directed entries
    /// otherwise. Only strictly positive weights are ever stored.
    pub fn edge_count(&self) -> usize {
        let entries: usize = self.rows.iter().map(|r| r.len()).sum();
        if self.directed { entries } else { entries / 2 }
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Edge weight between `src` and `dst`; 0 for non-adjacent pairs and
    /// for the diagonal.
    pub fn weight(&self, src: NodeId, dst: NodeId) -> f64 {
        self.rows[src.0]
            .binary_search_by_key(&dst, |n| n.node)
            .map(|pos| self.rows[src.0][pos].weight)
            .unwrap_or(0.0)
    }

    /// Out-neighbors of `node`, sorted by index.
    pub fn neighbors(&self, node: NodeId) -> &[Neighbor] {
        &self.rows[node.0]
    }

    /// Weighted degree of each node (row sums of the adjacency).
    pub fn degrees(&self) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|n| n.weight).sum())
            .collect()
    }

    /// Edge list in row-major order over the adjacency. For an undirected
    /// graph each unordered edge appears exactly once (as `src < dst`);
    /// for a directed graph each stored direction appears once.
    pub fn edge_list(&self) -> EdgeList {
        let mut list = EdgeList::default();
        for (src, row) in self.rows.iter().enumerate() {
            for n in row {
                if !self.directed && n.node.0 < src {
                    continue;
                }
                list.push(NodeId(src), n.node, n.weight);
            }
        }
        list
    }

    // ========================================================================
    // Coordinate attachment (display only)
    // ========================================================================

    /// Attach a D'-dimensional display position to each node.
    ///
    /// Purely cosmetic: consumed by layout/rendering tooling, never by any
    /// structural accessor. Fails (leaving the graph unchanged) unless
    /// there is exactly one finite position per node, all with the same
    /// dimension ≥ 1.
    pub fn set_coordinates(&mut self, coords: Vec<Vec<f64>>) -> Result<()> {
        if coords.len() != self.node_count() {
            return Err(Error::InvalidConfiguration(format!(
                "{} coordinate rows for {} nodes",
                coords.len(),
                self.node_count()
            )));
        }
        let dim = coords.first().map_or(0, Vec::len);
        if dim == 0 {
            return Err(Error::InvalidConfiguration(
                "coordinates must have at least one dimension".into(),
            ));
        }
        for (i, c) in coords.iter().enumerate() {
            if c.len() != dim {
                return Err(Error::InvalidConfiguration(format!(
                    "coordinate row {i} has dimension {}, expected {dim}",
                    c.len()
                )));
            }
            if c.iter().any(|v| !v.is_finite()) {
                return Err(Error::InvalidConfiguration(format!(
                    "coordinate row {i} has a non-finite value"
                )));
            }
        }
        self.coordinates = Some(coords);
        Ok(())
    }

    pub fn coordinates(&self) -> Option<&[Vec<f64>]> {
        self.coordinates.as_deref()
    }
}
