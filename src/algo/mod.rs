//! Graph algorithms module
//!
//! Query algorithms over [`Graph`](crate::graph::Graph): transitive
//! reachability, minimum spanning trees and isomorphism testing.

pub mod common;
pub mod isomorphism;
pub mod mst;
pub mod reachability;

pub use common::GraphView;
pub use isomorphism::{is_isomorphic, isomorphism_search, IsomorphismOutcome};
pub use mst::{prim_mst, MstResult};
pub use reachability::{reachability, reachability_matrix, ReachabilityMap};
