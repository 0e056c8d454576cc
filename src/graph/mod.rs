//! Core graph model
//!
//! This module implements the multigraph data model with:
//! - Vertices identified by string labels, enumerated in label order
//! - Directed edges, self-loops allowed
//! - Parallel edges folded into per-pair weight/multiplicity bags
//! - Construction from adjacency, weight and incidence matrices
//! - All-or-nothing vertex relabeling

pub mod edge;
pub mod matrix;
pub mod rename;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::{EdgeBag, EdgeRecord};
pub use matrix::IncidenceMode;
pub use rename::LabelMapping;
pub use store::{Adjacency, Graph, GraphError, GraphResult};
pub use types::{VertexLabel, Weight};
