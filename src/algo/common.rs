//! Shared utilities for graph algorithms
//!
//! Provides a read-only, dense view of the graph topology for algorithm execution.

use crate::graph::{Graph, VertexLabel};
use std::collections::HashMap;

/// A dense, integer-indexed view of the graph topology.
///
/// The graph itself is keyed by labels, which is convenient for lookups but
/// slow for repeated traversal. This view maps labels to dense indices
/// (0..N) in label order and stores the non-empty edges as adjacency lists,
/// so index order and label order agree.
pub struct GraphView<'a> {
    /// Number of vertices
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to the label
    pub index_to_node: Vec<&'a VertexLabel>,
    /// Mapping from label to dense index
    pub node_to_index: HashMap<&'a str, usize>,
    /// Outgoing edges: index -> ascending target indices
    pub outgoing: Vec<Vec<usize>>,
    /// Incoming edges: index -> ascending source indices
    pub incoming: Vec<Vec<usize>>,
}

impl<'a> GraphView<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        let index_to_node: Vec<&VertexLabel> = graph.vertices().collect();
        let node_to_index: HashMap<&str, usize> = index_to_node
            .iter()
            .enumerate()
            .map(|(idx, label)| (label.as_str(), idx))
            .collect();

        let node_count = index_to_node.len();
        let mut outgoing = vec![Vec::new(); node_count];
        let mut incoming = vec![Vec::new(); node_count];

        // Sources are visited in ascending order, so both lists stay sorted
        for (u_idx, label) in index_to_node.iter().enumerate() {
            for (target, _) in graph.successors(label.as_str()) {
                if let Some(&v_idx) = node_to_index.get(target.as_str()) {
                    outgoing[u_idx].push(v_idx);
                    incoming[v_idx].push(u_idx);
                }
            }
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            outgoing,
            incoming,
        }
    }

    /// Get outgoing neighbors (successors) of a vertex
    pub fn successors(&self, idx: usize) -> &[usize] {
        &self.outgoing[idx]
    }

    /// Get incoming neighbors (predecessors) of a vertex
    pub fn predecessors(&self, idx: usize) -> &[usize] {
        &self.incoming[idx]
    }

    pub fn label(&self, idx: usize) -> &'a VertexLabel {
        self.index_to_node[idx]
    }
}
