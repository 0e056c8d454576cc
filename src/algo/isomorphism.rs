//! Graph isomorphism by degree-pruned relabeling search
//!
//! Candidate bijections are generated position by position over the first
//! graph's vertices in label order. A vertex may only be sent to a vertex of
//! the other graph with the same degree, and no image may be used twice.
//! Each complete bijection is applied as a rename and the result compared
//! against the other graph's edge structure, bags included. The first match
//! ends the search.
//!
//! # Performance Characteristics
//!
//! - Non-uniform degree sequences cut the search to the product of the
//!   degree class factorials
//! - Regular graphs (every vertex the same degree) still need up to `V!`
//!   candidates; no polynomial test is attempted

use crate::graph::{Graph, VertexLabel};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Outcome of an isomorphism search
#[derive(Debug, Clone, PartialEq)]
pub struct IsomorphismOutcome {
    /// Relabeling of the first graph that reproduces the second, if any
    pub mapping: Option<BTreeMap<VertexLabel, VertexLabel>>,
    /// Number of complete bijections compared
    pub candidates_checked: usize,
}

impl IsomorphismOutcome {
    pub fn is_isomorphic(&self) -> bool {
        self.mapping.is_some()
    }

    fn rejected() -> Self {
        IsomorphismOutcome { mapping: None, candidates_checked: 0 }
    }
}

/// Backtracking state over degree-consistent bijections
struct CandidateSearch<'a> {
    source: &'a Graph,
    target: &'a Graph,
    /// Vertices of the source graph, in label order
    positions: Vec<&'a VertexLabel>,
    /// Target vertices in label order
    images: Vec<&'a VertexLabel>,
    /// Allowed image indices per position (same degree)
    candidates: Vec<Vec<usize>>,
    used: Vec<bool>,
    assignment: Vec<usize>,
    checked: usize,
}

impl<'a> CandidateSearch<'a> {
    fn new(source: &'a Graph, target: &'a Graph) -> Self {
        let images: Vec<&VertexLabel> = target.vertices().collect();
        let target_degree = target.degree();

        // Bucket the target's vertices by degree
        let mut buckets: BTreeMap<u64, Vec<usize>> = BTreeMap::new();
        for (idx, label) in images.iter().enumerate() {
            let degree = target_degree.get(*label).copied().unwrap_or(0);
            buckets.entry(degree).or_default().push(idx);
        }

        let source_degree = source.degree();
        let positions: Vec<&VertexLabel> = source.vertices().collect();
        let candidates = positions
            .iter()
            .map(|label| {
                let degree = source_degree.get(*label).copied().unwrap_or(0);
                buckets.get(&degree).cloned().unwrap_or_default()
            })
            .collect();

        CandidateSearch {
            source,
            target,
            used: vec![false; images.len()],
            assignment: vec![0; positions.len()],
            positions,
            images,
            candidates,
            checked: 0,
        }
    }

    fn run(mut self) -> IsomorphismOutcome {
        let found = self.extend(0);
        let mapping = if found { Some(self.current_mapping()) } else { None };
        IsomorphismOutcome { mapping, candidates_checked: self.checked }
    }

    fn extend(&mut self, position: usize) -> bool {
        if position == self.positions.len() {
            self.checked += 1;
            return self.matches();
        }

        for i in 0..self.candidates[position].len() {
            let candidate = self.candidates[position][i];
            if self.used[candidate] {
                continue;
            }
            self.used[candidate] = true;
            self.assignment[position] = candidate;
            if self.extend(position + 1) {
                return true;
            }
            self.used[candidate] = false;
        }
        false
    }

    fn current_mapping(&self) -> BTreeMap<VertexLabel, VertexLabel> {
        self.positions
            .iter()
            .zip(&self.assignment)
            .map(|(label, &image)| ((*label).clone(), self.images[image].clone()))
            .collect()
    }

    /// Rename the source through the current bijection and compare
    fn matches(&self) -> bool {
        let renamed = self.source.renamed_edges(&self.current_mapping());
        // Candidates are always complete bijections, so renaming cannot fail
        debug_assert!(renamed.is_ok(), "candidate #{} is not a bijection: {:?}", self.checked, renamed);
        match renamed {
            Ok(renamed) => {
                let equal = &renamed == self.target.edges();
                if !equal {
                    trace!("Rejected candidate #{}", self.checked);
                }
                equal
            }
            Err(err) => {
                trace!("Candidate #{} could not be applied: {}", self.checked, err);
                false
            }
        }
    }
}

/// Search for a relabeling of `a` that reproduces `b` exactly
pub fn isomorphism_search(a: &Graph, b: &Graph) -> IsomorphismOutcome {
    if a.vertex_count() != b.vertex_count() {
        debug!(
            "Not isomorphic: {} vs {} vertices",
            a.vertex_count(),
            b.vertex_count()
        );
        return IsomorphismOutcome::rejected();
    }
    if a.degree_sequence() != b.degree_sequence() {
        debug!("Not isomorphic: degree sequences differ");
        return IsomorphismOutcome::rejected();
    }

    let outcome = CandidateSearch::new(a, b).run();
    debug!(
        "Isomorphism search checked {} candidates, match: {}",
        outcome.candidates_checked,
        outcome.is_isomorphic()
    );
    outcome
}

/// Whether `a` and `b` are isomorphic
pub fn is_isomorphic(a: &Graph, b: &Graph) -> bool {
    isomorphism_search(a, b).is_isomorphic()
}

impl Graph {
    /// Relabeling that turns this graph into `other`, if one exists
    pub fn find_isomorphism(&self, other: &Graph) -> Option<BTreeMap<VertexLabel, VertexLabel>> {
        isomorphism_search(self, other).mapping
    }

    pub fn is_isomorphic(&self, other: &Graph) -> bool {
        is_isomorphic(self, other)
    }
}

/// Graph equality is isomorphism; use [`Graph::same_structure`] for
/// label-exact comparison.
impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.is_isomorphic(other)
    }
}

impl Eq for Graph {}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> VertexLabel {
        VertexLabel::new(s).unwrap()
    }

    #[test]
    fn test_relabelled_pair_is_equal() {
        let g1 = Graph::from_adjacency(&[vec![0, 1], vec![1, 0]]).unwrap();
        let mut g2 = Graph::from_adjacency(&[vec![0, 1], vec![1, 0]]).unwrap();
        let swap: BTreeMap<VertexLabel, VertexLabel> =
            [(label("0"), label("1")), (label("1"), label("0"))].into_iter().collect();
        g2.rename(&swap).unwrap();

        assert!(g1 == g2);
    }

    #[test]
    fn test_directed_path_relabelled() {
        // 0 -> 1 -> 2 vs c -> a -> b
        let g1 = Graph::from_adjacency(&[vec![0, 1, 0], vec![0, 0, 1], vec![0, 0, 0]]).unwrap();
        let mut g2 = Graph::new();
        g2.add_edge("c", "a", 0.0, 1).unwrap();
        g2.add_edge("a", "b", 0.0, 1).unwrap();

        let mapping = g1.find_isomorphism(&g2).unwrap();
        assert_eq!(mapping[&label("0")], label("c"));
        assert_eq!(mapping[&label("1")], label("a"));
        assert_eq!(mapping[&label("2")], label("b"));
        assert!(g1.renamed(&mapping).unwrap().same_structure(&g2));
    }

    #[test]
    fn test_direction_matters() {
        // 0 -> 1, 0 -> 2 vs 0 -> 1, 2 -> 1
        let out_star = Graph::from_adjacency(&[vec![0, 1, 1], vec![0, 0, 0], vec![0, 0, 0]]).unwrap();
        let in_star = Graph::from_adjacency(&[vec![0, 1, 0], vec![0, 0, 0], vec![0, 1, 0]]).unwrap();
        assert!(out_star != in_star);
    }

    #[test]
    fn test_every_assignment_is_a_complete_bijection() {
        let source = Graph::from_adjacency(&[vec![0, 1, 0], vec![0, 0, 1], vec![1, 0, 0]]).unwrap();
        let mut target = Graph::new();
        target.add_edge("x", "y", 0.0, 1).unwrap();
        target.add_edge("y", "z", 0.0, 1).unwrap();
        target.add_edge("z", "x", 0.0, 1).unwrap();

        let mut search = CandidateSearch::new(&source, &target);
        assert!(search.extend(0));
        let mapping = search.current_mapping();
        assert_eq!(mapping.len(), 3);
        let images: std::collections::BTreeSet<_> = mapping.values().collect();
        assert_eq!(images.len(), 3);
        assert!(source.renamed_edges(&mapping).is_ok());
        assert!(search.matches());
    }

    #[test]
    fn test_vertex_count_mismatch() {
        let g1 = Graph::from_adjacency(&[vec![0]]).unwrap();
        let g2 = Graph::from_adjacency(&[vec![0, 0], vec![0, 0]]).unwrap();
        let outcome = isomorphism_search(&g1, &g2);
        assert!(!outcome.is_isomorphic());
        assert_eq!(outcome.candidates_checked, 0);
    }

    #[test]
    fn test_same_degrees_different_structure() {
        // Two disjoint 2-cycles vs one 4-cycle: every out-degree is 1
        let two_cycles = Graph::from_adjacency(&[
            vec![0, 1, 0, 0],
            vec![1, 0, 0, 0],
            vec![0, 0, 0, 1],
            vec![0, 0, 1, 0],
        ])
        .unwrap();
        let four_cycle = Graph::from_adjacency(&[
            vec![0, 1, 0, 0],
            vec![0, 0, 1, 0],
            vec![0, 0, 0, 1],
            vec![1, 0, 0, 0],
        ])
        .unwrap();

        let outcome = isomorphism_search(&two_cycles, &four_cycle);
        assert!(!outcome.is_isomorphic());
        // 4! bijections, all degree-consistent
        assert_eq!(outcome.candidates_checked, 24);
    }

    #[test]
    fn test_degree_buckets_prune_candidates() {
        // Degrees 3, 1, 1, 1 on both sides: only 3! bijections are tried
        let star = Graph::from_adjacency(&[
            vec![0, 1, 1, 1],
            vec![1, 0, 0, 0],
            vec![1, 0, 0, 0],
            vec![1, 0, 0, 0],
        ])
        .unwrap();
        let mut relabelled = Graph::new();
        for leaf in ["a", "b", "c"] {
            relabelled.add_edge("z", leaf, 0.0, 1).unwrap();
            relabelled.add_edge(leaf, "z", 0.0, 1).unwrap();
        }

        let outcome = isomorphism_search(&star, &relabelled);
        assert!(outcome.is_isomorphic());
        assert!(outcome.candidates_checked <= 6);
        assert_eq!(outcome.mapping.unwrap()[&label("0")], label("z"));
    }

    #[test]
    fn test_weights_must_match() {
        let mut g1 = Graph::new();
        g1.add_weighted_edge("a", "b", 1.0).unwrap();
        let mut g2 = Graph::new();
        g2.add_weighted_edge("a", "b", 2.0).unwrap();

        assert!(g1 != g2);
    }

    #[test]
    fn test_multiplicities_must_match() {
        let g1 = Graph::from_adjacency(&[vec![0, 2], vec![1, 0]]).unwrap();
        let g2 = Graph::from_adjacency(&[vec![0, 1], vec![2, 0]]).unwrap();
        let g3 = Graph::from_adjacency(&[vec![0, 1], vec![1, 0]]).unwrap();

        assert!(g1 == g2);
        assert!(g1 != g3);
    }

    #[test]
    fn test_empty_graphs_are_equal() {
        assert!(Graph::new() == Graph::new());
    }
}
