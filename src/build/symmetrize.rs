//! Reconciling the directed candidate adjacency into the final graph.

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::model::{Neighbor, NodeId, WeightedGraph};
use super::SymmetrizePolicy;
use super::neighbors::CandidateRows;

type Row = SmallVec<[Neighbor; 8]>;

/// Apply the symmetrization policy to weighted candidate rows.
///
/// Zero-weight entries (kernel underflow) and any diagonal entry are
/// dropped; only strictly positive off-diagonal weights are stored.
pub fn apply(weighted: CandidateRows, policy: SymmetrizePolicy) -> WeightedGraph {
    let n = weighted.len();
    match policy {
        SymmetrizePolicy::None => directed(weighted),
        SymmetrizePolicy::Maximum => reconciled(n, weighted, |a, b| a.max(b)),
        SymmetrizePolicy::Average => reconciled(n, weighted, |a, b| (a + b) / 2.0),
    }
}

/// Keep both directions independently.
fn directed(weighted: CandidateRows) -> WeightedGraph {
    let rows: Vec<Row> = weighted
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            row.into_iter()
                .filter(|&(j, w)| j != i && w > 0.0)
                .map(|(j, w)| Neighbor { node: NodeId(j), weight: w })
                .collect()
        })
        .collect();
    WeightedGraph::from_rows(rows, true)
}

/// Collapse each unordered pair to a single weight. A missing direction
/// contributes 0 to `combine`.
fn reconciled(
    n: usize,
    weighted: CandidateRows,
    combine: impl Fn(f64, f64) -> f64,
) -> WeightedGraph {
    // (low, high) → [weight low→high, weight high→low]
    let mut pairs: HashMap<(usize, usize), [f64; 2]> = HashMap::new();
    let mut conflicting = 0usize;

    for (i, row) in weighted.iter().enumerate() {
        for &(j, w) in row {
            if j == i || w <= 0.0 {
                continue;
            }
            let key = (i.min(j), i.max(j));
            let slot = if i < j { 0 } else { 1 };
            let entry = pairs.entry(key).or_insert([0.0, 0.0]);
            if entry[1 - slot] > 0.0 {
                conflicting += 1;
            }
            entry[slot] = w;
        }
    }

    let mut rows: Vec<Row> = vec![Row::new(); n];
    for (&(low, high), &[fwd, back]) in &pairs {
        let weight = combine(fwd, back);
        if weight > 0.0 {
            rows[low].push(Neighbor { node: NodeId(high), weight });
            rows[high].push(Neighbor { node: NodeId(low), weight });
        }
    }

    debug!(
        pairs = pairs.len(),
        bidirectional = conflicting,
        "reconciled candidate adjacency"
    );

    WeightedGraph::from_rows(rows, false)
}
