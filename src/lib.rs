//! Matgraph
//!
//! An in-memory multigraph engine for inspecting graphs loaded from matrix
//! files: adjacency listing, degrees, transitive reachability, minimum
//! spanning trees and isomorphism testing.
//!
//! ## Example Usage
//!
//! ```rust
//! use matgraph::Graph;
//!
//! let matrix = vec![
//!     vec![0, 1, 1, 1],
//!     vec![1, 0, 0, 1],
//!     vec![1, 0, 0, 0],
//!     vec![1, 1, 0, 0],
//! ];
//! let graph = Graph::from_adjacency(&matrix).unwrap();
//!
//! assert_eq!(graph.list_adjacent("0").len(), 3);
//! assert!(graph.reachability().values().all(|set| set.len() == 4));
//! assert!(graph == graph.clone());
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod graph;
pub mod io;

// Re-export main types for convenience
pub use graph::{
    EdgeBag, EdgeRecord, Graph, GraphError, GraphResult, IncidenceMode, VertexLabel, Weight,
};

pub use algo::{IsomorphismOutcome, MstResult, ReachabilityMap};

pub use io::{load_graph, read_graph, LoadError, LoadOptions, MatrixFormat};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> &'static str {
    VERSION
}
