//! Minimum Spanning Tree algorithms
//!
//! Implements Prim's algorithm over the weighted graph, treating every
//! directed edge as undirected.

use super::common::GraphView;
use crate::graph::{EdgeBag, Graph, GraphError, GraphResult, VertexLabel, Weight};
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use tracing::debug;

/// Result of Prim's algorithm
#[derive(Debug, Clone)]
pub struct MstResult {
    /// Spanning tree with each tree edge stored in both directions
    pub tree: Graph,
    /// (chosen endpoint, new endpoint, weight), in the order edges were picked
    pub edges: Vec<(VertexLabel, VertexLabel, f64)>,
    pub total_weight: f64,
}

/// A crossing edge candidate
///
/// Ordered by weight, then by chosen endpoint, then by new endpoint. Dense
/// indices follow label order, so ties resolve lexicographically.
#[derive(Copy, Clone, PartialEq, Eq)]
struct EdgeState {
    weight: Weight,
    source: usize,
    target: usize,
}

impl Ord for EdgeState {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then(self.source.cmp(&other.source))
            .then(self.target.cmp(&other.target))
    }
}

impl PartialOrd for EdgeState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Prim's Algorithm for Minimum Spanning Tree
///
/// Starts at `start`, or at the smallest label when `None`. An edge is
/// usable in either direction; its cost is the smallest weight in its bag.
/// If the graph is disconnected, returns the tree of the component
/// containing the start vertex.
pub fn prim_mst(graph: &Graph, start: Option<&str>) -> GraphResult<MstResult> {
    let view = GraphView::new(graph);
    let mut tree = Graph::new();

    let start_idx = match start {
        Some(label) => *view
            .node_to_index
            .get(label)
            .ok_or_else(|| GraphError::VertexNotFound(label.to_string()))?,
        None if view.node_count == 0 => {
            return Ok(MstResult { tree, edges: Vec::new(), total_weight: 0.0 });
        }
        None => 0,
    };

    let mut chosen = vec![false; view.node_count];
    let mut heap = BinaryHeap::new();
    let mut mst_edges = Vec::new();
    let mut total_weight = 0.0;

    chosen[start_idx] = true;
    tree.insert_vertex(view.label(start_idx).clone());
    add_edges(graph, &view, start_idx, &mut heap, &chosen);

    while let Some(Reverse(EdgeState { weight, source, target })) = heap.pop() {
        if chosen[target] {
            continue;
        }

        chosen[target] = true;
        let from = view.label(source).clone();
        let to = view.label(target).clone();
        tree.put_bag(from.clone(), to.clone(), EdgeBag::single(weight, 1));
        tree.put_bag(to.clone(), from.clone(), EdgeBag::single(weight, 1));
        mst_edges.push((from, to, weight.value()));
        total_weight += weight.value();

        add_edges(graph, &view, target, &mut heap, &chosen);
    }

    debug!(
        "Spanning tree from {}: {} edges, total weight {}",
        view.label(start_idx),
        mst_edges.len(),
        total_weight
    );

    Ok(MstResult {
        tree,
        edges: mst_edges,
        total_weight,
    })
}

fn add_edges(
    graph: &Graph,
    view: &GraphView,
    u: usize,
    heap: &mut BinaryHeap<Reverse<EdgeState>>,
    chosen: &[bool],
) {
    let u_label = view.label(u).as_str();

    // Outgoing edges u -> v
    for &v in view.successors(u) {
        if !chosen[v] {
            if let Some(weight) = graph.edge_bag(u_label, view.label(v).as_str()).min_weight() {
                heap.push(Reverse(EdgeState { weight, source: u, target: v }));
            }
        }
    }

    // Incoming edges v -> u (treat as undirected)
    for &v in view.predecessors(u) {
        if !chosen[v] {
            if let Some(weight) = graph.edge_bag(view.label(v).as_str(), u_label).min_weight() {
                heap.push(Reverse(EdgeState { weight, source: u, target: v }));
            }
        }
    }
}

impl Graph {
    /// Minimum spanning tree of the component containing `start`
    ///
    /// See [`prim_mst`] for the edge selection rules.
    pub fn min_spanning_tree(&self, start: Option<&str>) -> GraphResult<Graph> {
        prim_mst(self, start).map(|result| result.tree)
    }
}
