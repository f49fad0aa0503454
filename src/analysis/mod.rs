//! # Structural Inspection
//!
//! Read-only views over a [`WeightedGraph`]: dense matrix forms and
//! connectivity. Everything here is derived; nothing mutates the graph.
//!
//! Spectral computation beyond forming the Laplacian (eigenvalues,
//! filtering) is out of scope.

use std::collections::VecDeque;

use nalgebra::{DMatrix, DVector};

use crate::model::{NodeId, WeightedGraph};

// ============================================================================
// Dense matrix forms
// ============================================================================

/// Which Laplacian to materialize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaplacianKind {
    /// `L = D - A`
    Combinatorial,
    /// `L = I - D^{-1/2} A D^{-1/2}`; rows of isolated nodes are zero.
    Normalized,
}

/// Dense N×N adjacency matrix. Entry `(i, j)` is the stored edge weight,
/// 0 for non-adjacent pairs; the diagonal is always 0.
pub fn adjacency_matrix(graph: &WeightedGraph) -> DMatrix<f64> {
    let n = graph.node_count();
    let mut adj = DMatrix::zeros(n, n);
    for i in 0..n {
        for neighbor in graph.neighbors(NodeId(i)) {
            adj[(i, neighbor.node.0)] = neighbor.weight;
        }
    }
    adj
}

/// Diagonal matrix of weighted degrees (out-degrees for a directed graph).
pub fn degree_matrix(graph: &WeightedGraph) -> DMatrix<f64> {
    DMatrix::from_diagonal(&DVector::from_vec(graph.degrees()))
}

/// The graph Laplacian.
///
/// Meaningful for undirected graphs; on a directed graph the out-degree
/// stands in for the degree.
pub fn laplacian(graph: &WeightedGraph, kind: LaplacianKind) -> DMatrix<f64> {
    match kind {
        LaplacianKind::Combinatorial => degree_matrix(graph) - adjacency_matrix(graph),
        LaplacianKind::Normalized => {
            let n = graph.node_count();
            let degrees = graph.degrees();
            let inv_sqrt: Vec<f64> = degrees
                .iter()
                .map(|&d| if d > 0.0 { 1.0 / d.sqrt() } else { 0.0 })
                .collect();

            let mut lap = DMatrix::zeros(n, n);
            for i in 0..n {
                if degrees[i] > 0.0 {
                    lap[(i, i)] = 1.0;
                }
                for neighbor in graph.neighbors(NodeId(i)) {
                    let j = neighbor.node.0;
                    lap[(i, j)] -= neighbor.weight * inv_sqrt[i] * inv_sqrt[j];
                }
            }
            lap
        }
    }
}

// ============================================================================
// Connectivity
// ============================================================================

/// Component label per node, labels numbered `0..` in order of first
/// appearance. Directed graphs are swept over their undirected support
/// (weak connectivity).
pub fn connected_components(graph: &WeightedGraph) -> Vec<usize> {
    let n = graph.node_count();

    // Undirected support: out-neighbors plus, for directed graphs, the
    // reverse direction of every stored edge.
    let mut support: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..n {
        for neighbor in graph.neighbors(NodeId(i)) {
            support[i].push(neighbor.node.0);
            if graph.is_directed() {
                support[neighbor.node.0].push(i);
            }
        }
    }

    let mut labels = vec![usize::MAX; n];
    let mut next_label = 0;

    for start in 0..n {
        if labels[start] != usize::MAX {
            continue;
        }
        // BFS flood fill from the first unlabeled node.
        labels[start] = next_label;
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for &other in &support[node] {
                if labels[other] == usize::MAX {
                    labels[other] = next_label;
                    queue.push_back(other);
                }
            }
        }
        next_label += 1;
    }

    labels
}

/// True when every node is reachable from every other (weakly, for
/// directed graphs). A single-node graph is connected.
pub fn is_connected(graph: &WeightedGraph) -> bool {
    connected_components(graph).iter().all(|&l| l == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Path graph 0 - 1 - 2 plus an isolated node 3.
    fn path_plus_isolated() -> WeightedGraph {
        WeightedGraph::from_edges(4, false, vec![(0, 1, 1.0), (1, 2, 0.5)]).unwrap()
    }

    #[test]
    fn test_adjacency_matrix_symmetric_zero_diagonal() {
        let adj = adjacency_matrix(&path_plus_isolated());
        assert_eq!(adj[(0, 1)], 1.0);
        assert_eq!(adj[(1, 0)], 1.0);
        assert_eq!(adj[(1, 2)], 0.5);
        for i in 0..4 {
            assert_eq!(adj[(i, i)], 0.0);
        }
    }

    #[test]
    fn test_combinatorial_laplacian_rows_sum_to_zero() {
        let lap = laplacian(&path_plus_isolated(), LaplacianKind::Combinatorial);
        assert_eq!(lap[(0, 0)], 1.0);
        assert_eq!(lap[(1, 1)], 1.5);
        assert_eq!(lap[(0, 1)], -1.0);
        for i in 0..4 {
            let row_sum: f64 = (0..4).map(|j| lap[(i, j)]).sum();
            assert!(row_sum.abs() < 1e-12);
        }
    }

    #[test]
    fn test_normalized_laplacian_isolated_node_row_is_zero() {
        let lap = laplacian(&path_plus_isolated(), LaplacianKind::Normalized);
        for j in 0..4 {
            assert_eq!(lap[(3, j)], 0.0);
            assert!(!lap[(3, j)].is_nan());
        }
        // Non-isolated diagonal is 1.
        assert_eq!(lap[(0, 0)], 1.0);
        assert_eq!(lap[(1, 1)], 1.0);
    }

    #[test]
    fn test_connected_components() {
        let labels = connected_components(&path_plus_isolated());
        assert_eq!(labels, vec![0, 0, 0, 1]);
        assert!(!is_connected(&path_plus_isolated()));

        let connected = WeightedGraph::from_edges(2, false, vec![(0, 1, 1.0)]).unwrap();
        assert!(is_connected(&connected));
    }

    #[test]
    fn test_directed_graph_uses_weak_connectivity() {
        // Only 0 → 1 exists; weakly connected all the same.
        let g = WeightedGraph::from_edges(2, true, vec![(0, 1, 1.0)]).unwrap();
        assert!(is_connected(&g));
    }

    #[test]
    fn test_single_node_graph_is_connected() {
        let g = WeightedGraph::from_edges(1, false, vec![]).unwrap();
        assert!(is_connected(&g));
    }
}
