//! Graph document export — hand-off to layout and visualization tooling.
//!
//! The renderer itself lives outside this crate; this module produces the
//! documents it consumes and reads them back for fixtures and round-trips.
//!
//! ```text
//! WeightedGraph → export_json() → {"nodes": .., "edges": ..} document
//!   → layout/plotting frontend, or import_json() back into a graph
//! ```

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{EdgeList, WeightedGraph};
use crate::{Error, Result};

/// The serialized graph document. Edges are carried as the parallel-array
/// edge list, so the document is directly plottable without decoding the
/// adjacency representation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub nodes: usize,
    pub directed: bool,
    pub edges: EdgeList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<Vec<f64>>>,
}

impl GraphDocument {
    pub fn from_graph(graph: &WeightedGraph) -> Self {
        Self {
            nodes: graph.node_count(),
            directed: graph.is_directed(),
            edges: graph.edge_list(),
            coordinates: graph.coordinates().map(<[Vec<f64>]>::to_vec),
        }
    }

    /// Rebuild the graph, re-validating every edge on the way in.
    pub fn into_graph(self) -> Result<WeightedGraph> {
        let mut graph = WeightedGraph::from_edges(
            self.nodes,
            self.directed,
            self.edges.iter().map(|(s, t, w)| (s.0, t.0, w)),
        )?;
        if let Some(coords) = self.coordinates {
            graph.set_coordinates(coords)?;
        }
        Ok(graph)
    }
}

/// Write a graph as a JSON document.
pub fn export_json(graph: &WeightedGraph, writer: &mut dyn Write) -> Result<()> {
    let doc = GraphDocument::from_graph(graph);
    serde_json::to_writer_pretty(&mut *writer, &doc)
        .map_err(|e| Error::Io(e.into()))?;
    debug!(nodes = doc.nodes, edges = doc.edges.len(), "exported graph document");
    Ok(())
}

/// Read a JSON graph document back into a validated graph.
pub fn import_json(reader: &mut dyn Read) -> Result<WeightedGraph> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    let doc: GraphDocument = serde_json::from_str(&raw)
        .map_err(|e| Error::InvalidConfiguration(format!("malformed graph document: {e}")))?;
    doc.into_graph()
}

/// Write a plain-text edge list: one `src dst weight` line per stored
/// edge, in edge-list order, behind a commented header.
pub fn export_edge_list(graph: &WeightedGraph, writer: &mut dyn Write) -> Result<()> {
    let list = graph.edge_list();

    writeln!(writer, "# simgraph edge list")?;
    writeln!(writer, "# nodes: {}", graph.node_count())?;
    writeln!(writer, "# edges: {}", list.len())?;
    writeln!(writer, "# directed: {}", graph.is_directed())?;

    for (src, dst, weight) in list.iter() {
        writeln!(writer, "{src} {dst} {weight}")?;
    }

    Ok(())
}
