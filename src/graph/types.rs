//! Core type definitions for the graph model

use super::store::{GraphError, GraphResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Unique identifier for a vertex
///
/// Matrix constructors use the decimal string of the row/column index.
/// Any other non-empty string without whitespace is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct VertexLabel(String);

impl VertexLabel {
    /// Create a validated label
    pub fn new(label: impl Into<String>) -> GraphResult<Self> {
        let label = label.into();
        if label.is_empty() || label.chars().any(char::is_whitespace) {
            return Err(GraphError::InvalidLabel(label));
        }
        Ok(VertexLabel(label))
    }

    /// Label of the vertex at a matrix row/column index
    pub fn from_index(index: usize) -> Self {
        VertexLabel(index.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VertexLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<&str> for VertexLabel {
    type Error = GraphError;

    fn try_from(s: &str) -> GraphResult<Self> {
        VertexLabel::new(s)
    }
}

impl TryFrom<String> for VertexLabel {
    type Error = GraphError;

    fn try_from(s: String) -> GraphResult<Self> {
        VertexLabel::new(s)
    }
}

impl From<usize> for VertexLabel {
    fn from(index: usize) -> Self {
        VertexLabel::from_index(index)
    }
}

impl std::borrow::Borrow<str> for VertexLabel {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Numeric weight carried by an edge
///
/// Never NaN, so it has a total order and can key an [`EdgeBag`](super::edge::EdgeBag).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Weight(f64);

impl Weight {
    /// Weight used when only multiplicity matters
    pub const ZERO: Weight = Weight(0.0);

    pub fn new(value: f64) -> GraphResult<Self> {
        if value.is_nan() {
            return Err(GraphError::InvalidArgument("edge weight must not be NaN".to_string()));
        }
        // Fold -0.0 into 0.0 so equal weights share one bag entry
        Ok(Weight(value + 0.0))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl PartialEq for Weight {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Weight {}

impl PartialOrd for Weight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Weight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl std::hash::Hash for Weight {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl TryFrom<f64> for Weight {
    type Error = GraphError;

    fn try_from(value: f64) -> GraphResult<Self> {
        Weight::new(value)
    }
}

impl From<Weight> for f64 {
    fn from(w: Weight) -> f64 {
        w.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
