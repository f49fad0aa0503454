//! Edge list — parallel-array view of a graph's edges.

use serde::{Deserialize, Serialize};
use super::NodeId;

/// Three parallel sequences — sources, targets, weights — one entry per
/// edge, in the stable enumeration order produced by
/// [`WeightedGraph::edge_list`](super::WeightedGraph::edge_list).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EdgeList {
    pub sources: Vec<NodeId>,
    pub targets: Vec<NodeId>,
    pub weights: Vec<f64>,
}

impl EdgeList {
    pub fn push(&mut self, src: NodeId, dst: NodeId, weight: f64) {
        self.sources.push(src);
        self.targets.push(dst);
        self.weights.push(weight);
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, NodeId, f64)> + '_ {
        self.sources
            .iter()
            .zip(&self.targets)
            .zip(&self.weights)
            .map(|((s, t), w)| (*s, *t, *w))
    }
}
