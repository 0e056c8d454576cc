//! Vertex relabeling
//!
//! A rename maps every vertex through a bijection and carries each attribute
//! bag over unchanged. The new edge structure is built completely before it
//! replaces the old one, so a rejected mapping leaves the graph untouched.

use super::store::{Adjacency, Graph, GraphError, GraphResult};
use super::types::VertexLabel;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

/// Lookup from old label to new label
pub trait LabelMapping {
    fn map_label(&self, label: &VertexLabel) -> Option<&VertexLabel>;
}

impl LabelMapping for HashMap<VertexLabel, VertexLabel> {
    fn map_label(&self, label: &VertexLabel) -> Option<&VertexLabel> {
        self.get(label)
    }
}

impl LabelMapping for BTreeMap<VertexLabel, VertexLabel> {
    fn map_label(&self, label: &VertexLabel) -> Option<&VertexLabel> {
        self.get(label)
    }
}

impl Graph {
    /// Relabel every vertex through `mapping`, in place
    ///
    /// Fails with `MissingMapping` when a vertex has no image and with
    /// `NonBijectiveMapping` when two vertices share an image. Entries for
    /// labels that are not vertices are ignored.
    pub fn rename<M: LabelMapping>(&mut self, mapping: &M) -> GraphResult<()> {
        let renamed = self.renamed_edges(mapping)?;
        self.replace_edges(renamed);
        debug!("Renamed {} vertices", self.vertex_count());
        Ok(())
    }

    /// Copy of this graph relabelled through `mapping`
    pub fn renamed<M: LabelMapping>(&self, mapping: &M) -> GraphResult<Graph> {
        let mut graph = Graph::new();
        graph.replace_edges(self.renamed_edges(mapping)?);
        Ok(graph)
    }

    /// Build the relabelled edge structure without touching `self`
    pub(crate) fn renamed_edges<M: LabelMapping>(
        &self,
        mapping: &M,
    ) -> GraphResult<BTreeMap<VertexLabel, Adjacency>> {
        let image = |label: &VertexLabel| -> GraphResult<VertexLabel> {
            mapping
                .map_label(label)
                .cloned()
                .ok_or_else(|| GraphError::MissingMapping(label.clone()))
        };

        let mut renamed: BTreeMap<VertexLabel, Adjacency> = BTreeMap::new();
        for vertex in self.vertices() {
            let new_label = image(vertex)?;
            if renamed.insert(new_label.clone(), Adjacency::new()).is_some() {
                return Err(GraphError::NonBijectiveMapping(new_label));
            }
        }

        for (start, adjacency) in self.edges() {
            let new_start = image(start)?;
            let mut new_adjacency = Adjacency::new();
            for (end, bag) in adjacency {
                new_adjacency.insert(image(end)?, bag.clone());
            }
            renamed.insert(new_start, new_adjacency);
        }

        Ok(renamed)
    }
}
