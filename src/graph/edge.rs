//! Edge attribute bags
//!
//! All parallel edges between one ordered pair of vertices are folded into a
//! single [`EdgeBag`]: a multiset mapping each distinct weight to the number
//! of edges that carry it.
//!
//! - Multigraph mode: every edge has weight 0, the count is the multiplicity
//! - Weighted mode: every edge has count 1, the key is the weight
//!
//! Per-weight counts never overflow: [`EdgeBag::add`] rejects an addition
//! that would. Totals summed across weights saturate at `u64::MAX`.

use super::store::{GraphError, GraphResult};
use super::types::{VertexLabel, Weight};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};

/// Multiset of `(weight -> multiplicity)` pairs for one directed vertex pair
///
/// Zero counts are never stored, so an empty bag means "no edge".
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct EdgeBag {
    counts: BTreeMap<Weight, u64>,
}

impl EdgeBag {
    /// Create an empty bag
    pub const fn new() -> Self {
        EdgeBag { counts: BTreeMap::new() }
    }

    /// Bag holding `count` edges of a single weight
    pub fn single(weight: Weight, count: u64) -> Self {
        let mut bag = EdgeBag::new();
        if count > 0 {
            bag.counts.insert(weight, count);
        }
        bag
    }

    /// Add `count` parallel edges of the given weight
    ///
    /// Fails with `InvalidArgument`, leaving the bag unchanged, when the
    /// weight's multiplicity would overflow.
    pub fn add(&mut self, weight: Weight, count: u64) -> GraphResult<()> {
        if count == 0 {
            return Ok(());
        }
        let current = self.count(weight);
        let updated = current.checked_add(count).ok_or_else(|| {
            GraphError::InvalidArgument(format!(
                "edge count overflow: {} + {} edges of weight {}",
                current, count, weight
            ))
        })?;
        self.counts.insert(weight, updated);
        Ok(())
    }

    /// Multiplicity recorded for a weight (0 when absent)
    pub fn count(&self, weight: Weight) -> u64 {
        self.counts.get(&weight).copied().unwrap_or(0)
    }

    /// Total number of parallel edges in the bag, saturating
    pub fn total(&self) -> u64 {
        self.counts.values().fold(0, |acc, &count| acc.saturating_add(count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Distinct weights, ascending
    pub fn weights(&self) -> impl Iterator<Item = Weight> + '_ {
        self.counts.keys().copied()
    }

    /// Smallest weight in the bag, used as the edge cost by MST
    pub fn min_weight(&self) -> Option<Weight> {
        self.counts.keys().next().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, Weight, u64> {
        self.counts.iter()
    }
}

/// Collects `(weight, count)` pairs; repeated weights saturate instead of
/// failing
impl FromIterator<(Weight, u64)> for EdgeBag {
    fn from_iter<I: IntoIterator<Item = (Weight, u64)>>(iter: I) -> Self {
        let mut bag = EdgeBag::new();
        for (weight, count) in iter.into_iter().filter(|&(_, count)| count > 0) {
            let entry = bag.counts.entry(weight).or_insert(0);
            *entry = entry.saturating_add(count);
        }
        bag
    }
}

impl<'a> IntoIterator for &'a EdgeBag {
    type Item = (&'a Weight, &'a u64);
    type IntoIter = btree_map::Iter<'a, Weight, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}

/// Flattened view of one bag entry, for serialization and display layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source vertex (edge goes FROM this vertex)
    pub source: VertexLabel,
    /// Target vertex
    pub target: VertexLabel,
    pub weight: f64,
    /// Number of parallel edges with this weight
    pub count: u64,
}
