//! Transitive reachability
//!
//! Iterative depth-first traversal with memoized unions. A vertex's set is
//! final once the traversal leaves it, and later visitors reuse it instead of
//! walking the subgraph again. Vertices on a cycle cannot finish before each
//! other, so they are tracked with Tarjan lowlinks and share one set once
//! their strongly connected component closes.

use super::common::GraphView;
use crate::graph::{Graph, VertexLabel};
use std::collections::{BTreeMap, BTreeSet};

/// Reachable set per vertex, each including the vertex itself
pub type ReachabilityMap = BTreeMap<VertexLabel, BTreeSet<VertexLabel>>;

const UNVISITED: usize = usize::MAX;

/// Depth-first traversal state
struct Traversal<'v, 'g> {
    view: &'v GraphView<'g>,
    order: Vec<usize>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    component_stack: Vec<usize>,
    reachable: Vec<BTreeSet<usize>>,
    /// Explicit call stack: (vertex, position of the next neighbor to scan)
    stack: Vec<(usize, usize)>,
    next_order: usize,
}

impl<'v, 'g> Traversal<'v, 'g> {
    fn new(view: &'v GraphView<'g>) -> Self {
        let n = view.node_count;
        Traversal {
            view,
            order: vec![UNVISITED; n],
            lowlink: vec![0; n],
            on_stack: vec![false; n],
            component_stack: Vec::new(),
            reachable: vec![BTreeSet::new(); n],
            stack: Vec::new(),
            next_order: 0,
        }
    }

    fn visited(&self, v: usize) -> bool {
        self.order[v] != UNVISITED
    }

    fn enter(&mut self, v: usize) {
        self.order[v] = self.next_order;
        self.lowlink[v] = self.next_order;
        self.next_order += 1;
        self.on_stack[v] = true;
        self.component_stack.push(v);
        self.reachable[v].insert(v);
        self.stack.push((v, 0));
    }

    /// Union the finished set of `from` into `into`
    fn absorb(&mut self, into: usize, from: usize) {
        if into == from {
            return;
        }
        let done: Vec<usize> = self.reachable[from].iter().copied().collect();
        self.reachable[into].extend(done);
    }

    fn run_from(&mut self, root: usize) {
        self.enter(root);

        while let Some(&(current, cursor)) = self.stack.last() {
            if let Some(&next) = self.view.successors(current).get(cursor) {
                if let Some(frame) = self.stack.last_mut() {
                    frame.1 += 1;
                }
                if !self.visited(next) {
                    // Descend one level per step
                    self.enter(next);
                } else if self.on_stack[next] {
                    self.lowlink[current] = self.lowlink[current].min(self.order[next]);
                } else {
                    self.absorb(current, next);
                }
                continue;
            }

            self.stack.pop();
            if self.lowlink[current] == self.order[current] {
                self.close_component(current);
            }
            if let Some(&(parent, _)) = self.stack.last() {
                self.lowlink[parent] = self.lowlink[parent].min(self.lowlink[current]);
                if !self.on_stack[current] {
                    self.absorb(parent, current);
                }
            }
        }
    }

    /// Pop the component rooted at `root` and give every member the union
    /// of the members' sets
    fn close_component(&mut self, root: usize) {
        let mut members = Vec::new();
        let mut closure = BTreeSet::new();
        while let Some(member) = self.component_stack.pop() {
            self.on_stack[member] = false;
            closure.append(&mut self.reachable[member]);
            members.push(member);
            if member == root {
                break;
            }
        }
        for member in members {
            self.reachable[member] = closure.clone();
        }
    }
}

/// Compute the reachable set of every vertex
///
/// Roots are taken in label order, so the traversal is deterministic.
pub fn reachability(graph: &Graph) -> ReachabilityMap {
    let view = GraphView::new(graph);
    let mut traversal = Traversal::new(&view);

    for root in 0..view.node_count {
        if !traversal.visited(root) {
            traversal.run_from(root);
        }
    }

    traversal
        .reachable
        .into_iter()
        .enumerate()
        .map(|(idx, set)| {
            let targets = set.into_iter().map(|t| view.label(t).clone()).collect();
            (view.label(idx).clone(), targets)
        })
        .collect()
}

/// Reachability as a boolean matrix indexed by label order
///
/// Returns the row/column labels alongside the matrix.
pub fn reachability_matrix(graph: &Graph) -> (Vec<VertexLabel>, Vec<Vec<bool>>) {
    let reach = reachability(graph);
    let labels: Vec<VertexLabel> = reach.keys().cloned().collect();
    let matrix = reach
        .values()
        .map(|targets| labels.iter().map(|label| targets.contains(label)).collect())
        .collect();
    (labels, matrix)
}

impl Graph {
    /// Vertices reachable from each vertex over directed paths
    pub fn reachability(&self) -> ReachabilityMap {
        reachability(self)
    }

    pub fn reachability_matrix(&self) -> (Vec<VertexLabel>, Vec<Vec<bool>>) {
        reachability_matrix(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(labels: &[&str]) -> BTreeSet<VertexLabel> {
        labels.iter().map(|l| VertexLabel::new(*l).unwrap()).collect()
    }

    fn label(s: &str) -> VertexLabel {
        VertexLabel::new(s).unwrap()
    }

    #[test]
    fn test_chain() {
        // a -> b -> c, d isolated
        let mut graph = Graph::new();
        graph.add_edge("a", "b", 0.0, 1).unwrap();
        graph.add_edge("b", "c", 0.0, 1).unwrap();
        graph.add_vertex("d").unwrap();

        let reach = graph.reachability();

        assert_eq!(reach[&label("a")], set(&["a", "b", "c"]));
        assert_eq!(reach[&label("b")], set(&["b", "c"]));
        assert_eq!(reach[&label("c")], set(&["c"]));
        assert_eq!(reach[&label("d")], set(&["d"]));
    }

    #[test]
    fn test_cycle_members_share_closure() {
        // a -> b -> c -> a, c -> d
        let mut graph = Graph::new();
        graph.add_edge("a", "b", 0.0, 1).unwrap();
        graph.add_edge("b", "c", 0.0, 1).unwrap();
        graph.add_edge("c", "a", 0.0, 1).unwrap();
        graph.add_edge("c", "d", 0.0, 1).unwrap();

        let reach = graph.reachability();
        let full = set(&["a", "b", "c", "d"]);

        assert_eq!(reach[&label("a")], full);
        assert_eq!(reach[&label("b")], full);
        assert_eq!(reach[&label("c")], full);
        assert_eq!(reach[&label("d")], set(&["d"]));
    }

    #[test]
    fn test_reuses_finished_sets() {
        // b is finished before a visits it
        let mut graph = Graph::new();
        graph.add_edge("b", "c", 0.0, 1).unwrap();
        graph.add_edge("c", "b", 0.0, 1).unwrap();
        graph.add_edge("d", "b", 0.0, 1).unwrap();
        graph.add_edge("a", "d", 0.0, 1).unwrap();

        let reach = graph.reachability();
        assert_eq!(reach[&label("a")], set(&["a", "b", "c", "d"]));
        assert_eq!(reach[&label("d")], set(&["b", "c", "d"]));
        assert_eq!(reach[&label("c")], set(&["b", "c"]));
    }

    #[test]
    fn test_self_loop() {
        let mut graph = Graph::new();
        graph.add_edge("a", "a", 0.0, 1).unwrap();
        assert_eq!(graph.reachability()[&label("a")], set(&["a"]));
    }

    #[test]
    fn test_matrix() {
        let mut graph = Graph::new();
        graph.add_edge("0", "1", 0.0, 1).unwrap();

        let (labels, matrix) = graph.reachability_matrix();
        assert_eq!(labels, vec![label("0"), label("1")]);
        assert_eq!(matrix, vec![vec![true, true], vec![false, true]]);
    }

    #[test]
    fn test_empty_graph() {
        assert!(Graph::new().reachability().is_empty());
    }
}
