//! In-memory graph storage implementation
//!
//! The graph is a sparse nested map `start -> end -> EdgeBag`. Every vertex
//! has an outer entry, even when it has no outgoing edges. Inner entries are
//! only stored for non-empty bags, so two graphs with the same edges always
//! have identical maps.

use super::edge::{EdgeBag, EdgeRecord};
use super::types::{VertexLabel, Weight};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Invalid vertex label: {0:?}")]
    InvalidLabel(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Rename mapping has no entry for vertex {0}")]
    MissingMapping(VertexLabel),

    #[error("Rename mapping sends more than one vertex to {0}")]
    NonBijectiveMapping(VertexLabel),

    #[error("Vertex {0} not found")]
    VertexNotFound(String),

    #[error("Malformed input: {0}")]
    MalformedInput(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Outgoing edge table of one vertex
pub type Adjacency = BTreeMap<VertexLabel, EdgeBag>;

static EMPTY_BAG: EdgeBag = EdgeBag::new();

/// Directed multigraph with weighted parallel edges
///
/// Vertex enumeration is always in label order, which keeps every algorithm
/// built on top of it deterministic.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    edges: BTreeMap<VertexLabel, Adjacency>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Graph { edges: BTreeMap::new() }
    }

    /// Build a graph directly from an edge structure
    ///
    /// Targets missing from the outer map get an empty entry and empty bags are
    /// dropped, so the storage invariants hold for any input.
    pub fn from_edges(edges: BTreeMap<VertexLabel, Adjacency>) -> Self {
        let mut graph = Graph::new();
        for (start, adjacency) in edges {
            graph.insert_vertex(start.clone());
            for (end, bag) in adjacency {
                graph.put_bag(start.clone(), end, bag);
            }
        }
        graph
    }

    /// Ensure `label` exists as a vertex. Idempotent.
    pub fn add_vertex(&mut self, label: &str) -> GraphResult<()> {
        let label = VertexLabel::new(label)?;
        self.insert_vertex(label);
        Ok(())
    }

    pub(crate) fn insert_vertex(&mut self, label: VertexLabel) {
        self.edges.entry(label).or_default();
    }

    /// Add `count` parallel edges of `weight` from `start` to `end`
    ///
    /// Both endpoints are created when absent. Use weight 0 for a plain
    /// multigraph and count 1 for a weighted graph.
    pub fn add_edge(&mut self, start: &str, end: &str, weight: f64, count: u64) -> GraphResult<()> {
        let start = VertexLabel::new(start)?;
        let end = VertexLabel::new(end)?;
        let weight = Weight::new(weight)?;
        if count == 0 {
            return Err(GraphError::InvalidArgument("edge count must be positive".to_string()));
        }
        self.insert_edge(start, end, weight, count)
    }

    /// Add a single edge carrying `weight`
    pub fn add_weighted_edge(&mut self, start: &str, end: &str, weight: f64) -> GraphResult<()> {
        self.add_edge(start, end, weight, 1)
    }

    /// Add edges to the stored bag; on overflow nothing is inserted, not
    /// even the endpoints
    pub(crate) fn insert_edge(
        &mut self,
        start: VertexLabel,
        end: VertexLabel,
        weight: Weight,
        count: u64,
    ) -> GraphResult<()> {
        let mut bag = self.edge_bag(start.as_str(), end.as_str()).clone();
        bag.add(weight, count)?;
        self.put_bag(start, end, bag);
        Ok(())
    }

    /// Replace the whole attribute bag of `(start, end)`
    ///
    /// An empty bag removes the edge but keeps both vertices.
    pub fn set_edge(&mut self, start: &str, end: &str, bag: EdgeBag) -> GraphResult<()> {
        let start = VertexLabel::new(start)?;
        let end = VertexLabel::new(end)?;
        self.put_bag(start, end, bag);
        Ok(())
    }

    pub(crate) fn put_bag(&mut self, start: VertexLabel, end: VertexLabel, bag: EdgeBag) {
        self.insert_vertex(end.clone());
        let adjacency = self.edges.entry(start).or_default();
        if bag.is_empty() {
            adjacency.remove(&end);
        } else {
            adjacency.insert(end, bag);
        }
    }

    /// All vertex labels in ascending order
    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &VertexLabel> + '_ {
        self.edges.keys()
    }

    pub fn vertex_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_vertex(&self, label: &str) -> bool {
        self.edges.contains_key(label)
    }

    /// Total number of edges, counting parallel edges individually
    ///
    /// Saturates at `u64::MAX`.
    pub fn edge_count(&self) -> u64 {
        self.edges
            .values()
            .flat_map(|adjacency| adjacency.values())
            .map(EdgeBag::total)
            .fold(0, u64::saturating_add)
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Vertices reachable from `vertex` over exactly one outgoing edge
    ///
    /// Unknown vertices have no neighbors.
    pub fn list_adjacent(&self, vertex: &str) -> BTreeSet<&VertexLabel> {
        self.successors(vertex).map(|(end, _)| end).collect()
    }

    /// Outgoing `(target, bag)` pairs of a vertex, in target order
    pub fn successors<'a>(&'a self, vertex: &str) -> impl Iterator<Item = (&'a VertexLabel, &'a EdgeBag)> + 'a {
        self.edges
            .get(vertex)
            .into_iter()
            .flat_map(|adjacency| adjacency.iter())
            .filter(|(_, bag)| !bag.is_empty())
    }

    /// Outgoing edge multiplicity of every vertex, saturating at `u64::MAX`
    pub fn degree(&self) -> BTreeMap<VertexLabel, u64> {
        self.edges
            .iter()
            .map(|(vertex, adjacency)| {
                let degree = adjacency.values().map(EdgeBag::total).fold(0, u64::saturating_add);
                (vertex.clone(), degree)
            })
            .collect()
    }

    /// Degrees as a sorted multiset
    pub fn degree_sequence(&self) -> Vec<u64> {
        let mut sequence: Vec<u64> = self.degree().into_values().collect();
        sequence.sort_unstable();
        sequence
    }

    /// Distinct weights recorded on `(start, end)`
    pub fn weights(&self, start: &str, end: &str) -> BTreeSet<Weight> {
        self.edge_bag(start, end).weights().collect()
    }

    /// Attribute bag of `(start, end)`; an empty bag when there is no edge
    pub fn edge_bag(&self, start: &str, end: &str) -> &EdgeBag {
        self.edges
            .get(start)
            .and_then(|adjacency| adjacency.get(end))
            .unwrap_or(&EMPTY_BAG)
    }

    /// Read-only access to the underlying edge structure
    pub fn edges(&self) -> &BTreeMap<VertexLabel, Adjacency> {
        &self.edges
    }

    /// Exact structural equality: same labels, same edges, same bags
    ///
    /// `==` on graphs tests isomorphism instead.
    pub fn same_structure(&self, other: &Graph) -> bool {
        self.edges == other.edges
    }

    /// One record per `(start, end, weight)` entry, in label order
    pub fn edge_records(&self) -> Vec<EdgeRecord> {
        let mut records = Vec::new();
        for (source, adjacency) in &self.edges {
            for (target, bag) in adjacency {
                for (weight, &count) in bag {
                    records.push(EdgeRecord {
                        source: source.clone(),
                        target: target.clone(),
                        weight: weight.value(),
                        count,
                    });
                }
            }
        }
        records
    }

    pub(crate) fn replace_edges(&mut self, edges: BTreeMap<VertexLabel, Adjacency>) {
        self.edges = edges;
    }
}

impl fmt::Display for Graph {
    /// One line per vertex: `v: n1 n1 n2`, each neighbor repeated once per
    /// parallel edge
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (vertex, adjacency) in &self.edges {
            write!(f, "{}:", vertex)?;
            for (target, bag) in adjacency {
                for _ in 0..bag.total() {
                    write!(f, " {}", target)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
