//! Graph construction from adjacency, weight and incidence matrices
//!
//! Every constructor validates the whole matrix and builds the graph in a
//! fresh container, so a rejected matrix never yields a partial graph.
//! Vertex `i` is labelled with the decimal string of `i`.

use super::store::{Graph, GraphError, GraphResult};
use super::types::{VertexLabel, Weight};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// How an incidence row's magnitude is stored on the resulting edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidenceMode {
    /// Magnitude becomes the edge weight, count 1
    #[default]
    Weight,
    /// Magnitude becomes the parallel edge count, weight 0
    Count,
}

impl FromStr for IncidenceMode {
    type Err = GraphError;

    fn from_str(s: &str) -> GraphResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "weight" => Ok(IncidenceMode::Weight),
            "count" => Ok(IncidenceMode::Count),
            other => Err(GraphError::InvalidArgument(format!(
                "unknown incidence mode '{}', expected 'weight' or 'count'",
                other
            ))),
        }
    }
}

impl fmt::Display for IncidenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncidenceMode::Weight => write!(f, "weight"),
            IncidenceMode::Count => write!(f, "count"),
        }
    }
}

fn check_square<T>(matrix: &[Vec<T>]) -> GraphResult<usize> {
    let n = matrix.len();
    for (i, row) in matrix.iter().enumerate() {
        if row.len() != n {
            return Err(GraphError::MalformedInput(format!(
                "row {} has {} entries, expected {}",
                i,
                row.len(),
                n
            )));
        }
    }
    Ok(n)
}

fn with_vertices(n: usize) -> Graph {
    let mut graph = Graph::new();
    for i in 0..n {
        graph.insert_vertex(VertexLabel::from_index(i));
    }
    graph
}

impl Graph {
    /// Build a multigraph from a square adjacency matrix
    ///
    /// Cell `(i, j) = v > 0` adds `v` unweighted parallel edges `i -> j`.
    /// Cells `<= 0` are ignored.
    pub fn from_adjacency(matrix: &[Vec<i64>]) -> GraphResult<Self> {
        let n = check_square(matrix)?;
        let mut graph = with_vertices(n);

        for (i, row) in matrix.iter().enumerate() {
            for (j, &value) in row.iter().enumerate() {
                if value <= 0 {
                    continue;
                }
                graph.insert_edge(
                    VertexLabel::from_index(i),
                    VertexLabel::from_index(j),
                    Weight::ZERO,
                    value as u64,
                )?;
            }
        }

        debug!("Built graph from adjacency matrix: {} vertices, {} edges", n, graph.edge_count());
        Ok(graph)
    }

    /// Build a weighted graph from a square weight matrix
    ///
    /// `None` and NaN cells mean "no edge"; any other finite value `v` adds
    /// one edge of weight `v`. Infinite weights are rejected.
    pub fn from_weights(matrix: &[Vec<Option<f64>>]) -> GraphResult<Self> {
        let n = check_square(matrix)?;
        let mut graph = with_vertices(n);

        for (i, row) in matrix.iter().enumerate() {
            for (j, cell) in row.iter().enumerate() {
                let value = match cell {
                    Some(v) if !v.is_nan() => *v,
                    _ => continue,
                };
                if value.is_infinite() {
                    return Err(GraphError::MalformedInput(format!(
                        "infinite weight at ({}, {})",
                        i, j
                    )));
                }
                graph.insert_edge(
                    VertexLabel::from_index(i),
                    VertexLabel::from_index(j),
                    Weight::new(value)?,
                    1,
                )?;
            }
        }

        debug!("Built graph from weight matrix: {} vertices, {} edges", n, graph.edge_count());
        Ok(graph)
    }

    /// Build a graph from an incidence matrix, one row per edge
    ///
    /// The column holding the row maximum `m > 0` is the source and the
    /// column holding `-m` is the destination. The row must have the same
    /// width as every other row; the width is the vertex count.
    pub fn from_incidence(matrix: &[Vec<i64>], mode: IncidenceMode) -> GraphResult<Self> {
        let width = matrix.first().map_or(0, Vec::len);
        let mut graph = with_vertices(width);

        for (i, row) in matrix.iter().enumerate() {
            if row.len() != width {
                return Err(GraphError::MalformedInput(format!(
                    "incidence row {} has {} entries, expected {}",
                    i,
                    row.len(),
                    width
                )));
            }
            let (source, magnitude) = incidence_source(row).ok_or_else(|| {
                GraphError::MalformedInput(format!("incidence row {} has no positive entry", i))
            })?;
            let target = row
                .iter()
                .position(|&v| v == -magnitude)
                .ok_or_else(|| {
                    GraphError::MalformedInput(format!(
                        "incidence row {} has no entry equal to {}",
                        i, -magnitude
                    ))
                })?;

            let (weight, count) = match mode {
                IncidenceMode::Weight => (Weight::new(magnitude as f64)?, 1),
                IncidenceMode::Count => (Weight::ZERO, magnitude as u64),
            };
            graph
                .insert_edge(
                    VertexLabel::from_index(source),
                    VertexLabel::from_index(target),
                    weight,
                    count,
                )
                .map_err(|err| GraphError::MalformedInput(format!("incidence row {}: {}", i, err)))?;
        }

        debug!(
            "Built graph from incidence matrix ({} mode): {} vertices, {} edges",
            mode,
            width,
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Incidence constructor taking the mode by name
    pub fn from_incidence_str(matrix: &[Vec<i64>], mode: &str) -> GraphResult<Self> {
        Graph::from_incidence(matrix, mode.parse()?)
    }
}

/// First column holding the row maximum, when that maximum is positive
fn incidence_source(row: &[i64]) -> Option<(usize, i64)> {
    let mut best: Option<(usize, i64)> = None;
    for (column, &value) in row.iter().enumerate() {
        if best.map_or(true, |(_, max)| value > max) {
            best = Some((column, value));
        }
    }
    best.filter(|&(_, max)| max > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(s: &str) -> VertexLabel {
        VertexLabel::new(s).unwrap()
    }

    #[test]
    fn test_from_adjacency() {
        let matrix = vec![
            vec![0, 1, 1, 1],
            vec![1, 0, 0, 1],
            vec![1, 0, 0, 0],
            vec![1, 1, 0, 0],
        ];
        let graph = Graph::from_adjacency(&matrix).unwrap();

        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.degree()[&label("0")], 3);
        let adjacent: Vec<&str> = graph.list_adjacent("0").iter().map(|v| v.as_str()).collect();
        assert_eq!(adjacent, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_from_adjacency_multiplicity_and_isolated() {
        let matrix = vec![vec![0, 3, -1], vec![0, 0, 0], vec![0, 0, 0]];
        let graph = Graph::from_adjacency(&matrix).unwrap();

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_bag("0", "1").count(Weight::ZERO), 3);
        assert!(graph.edge_bag("0", "2").is_empty());
    }

    #[test]
    fn test_from_adjacency_rejects_ragged() {
        let matrix = vec![vec![0, 1], vec![1]];
        assert!(matches!(Graph::from_adjacency(&matrix), Err(GraphError::MalformedInput(_))));
    }

    #[test]
    fn test_from_adjacency_huge_counts_saturate() {
        let matrix = vec![vec![i64::MAX; 3], vec![0; 3], vec![0; 3]];
        let graph = Graph::from_adjacency(&matrix).unwrap();

        assert_eq!(graph.edge_bag("0", "1").count(Weight::ZERO), i64::MAX as u64);
        assert_eq!(graph.degree()[&label("0")], u64::MAX);
        assert_eq!(graph.degree_sequence(), vec![0, 0, u64::MAX]);
        assert_eq!(graph.edge_count(), u64::MAX);
    }

    #[test]
    fn test_from_weights() {
        let matrix = vec![vec![Some(f64::NAN), Some(2.0)], vec![Some(2.0), None]];
        let graph = Graph::from_weights(&matrix).unwrap();

        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.weights("0", "1").into_iter().map(|w| w.value()).collect::<Vec<_>>(), vec![2.0]);
        assert_eq!(graph.weights("1", "0").len(), 1);
        assert!(graph.list_adjacent("0").contains(&label("1")));
        assert!(!graph.list_adjacent("0").contains(&label("0")));
    }

    #[test]
    fn test_from_weights_keeps_zero_weight_edges() {
        let matrix = vec![vec![None, Some(0.0)], vec![None, None]];
        let graph = Graph::from_weights(&matrix).unwrap();
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_from_weights_rejects_infinity() {
        let matrix = vec![vec![None, Some(f64::INFINITY)], vec![None, None]];
        assert!(matches!(Graph::from_weights(&matrix), Err(GraphError::MalformedInput(_))));
    }

    #[test]
    fn test_from_incidence_weight_mode() {
        let graph = Graph::from_incidence(&[vec![3, 0, -3]], IncidenceMode::Weight).unwrap();

        assert_eq!(graph.vertex_count(), 3);
        assert_eq!(graph.edge_bag("0", "2").count(Weight::new(3.0).unwrap()), 1);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_from_incidence_count_mode() {
        let graph = Graph::from_incidence_str(&[vec![3, 0, -3]], "count").unwrap();

        assert_eq!(graph.edge_bag("0", "2").count(Weight::ZERO), 3);
        assert_eq!(graph.degree()[&label("0")], 3);
    }

    #[test]
    fn test_from_incidence_reversed_direction() {
        let graph = Graph::from_incidence(&[vec![-2, 2, 0]], IncidenceMode::Weight).unwrap();
        assert!(graph.list_adjacent("1").contains(&label("0")));
        assert!(graph.list_adjacent("0").is_empty());
    }

    #[test]
    fn test_from_incidence_unknown_mode() {
        let result = Graph::from_incidence_str(&[vec![1, -1]], "colour");
        assert!(matches!(result, Err(GraphError::InvalidArgument(_))));
    }

    #[test]
    fn test_from_incidence_malformed_rows() {
        assert!(matches!(
            Graph::from_incidence(&[vec![0, 0, 0]], IncidenceMode::Weight),
            Err(GraphError::MalformedInput(_))
        ));
        assert!(matches!(
            Graph::from_incidence(&[vec![2, -1, 0]], IncidenceMode::Weight),
            Err(GraphError::MalformedInput(_))
        ));
        assert!(matches!(
            Graph::from_incidence(&[vec![1, -1], vec![1]], IncidenceMode::Count),
            Err(GraphError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_from_incidence_count_overflow() {
        let row = vec![i64::MAX, -i64::MAX];
        let matrix = vec![row.clone(), row.clone(), row];
        assert!(matches!(
            Graph::from_incidence(&matrix, IncidenceMode::Count),
            Err(GraphError::MalformedInput(_))
        ));

        // The same rows as weights are three parallel edges of one weight
        let graph = Graph::from_incidence(&matrix, IncidenceMode::Weight).unwrap();
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_incidence_mode_parse() {
        assert_eq!("Weight".parse::<IncidenceMode>().unwrap(), IncidenceMode::Weight);
        assert_eq!("COUNT".parse::<IncidenceMode>().unwrap(), IncidenceMode::Count);
        assert_eq!(IncidenceMode::Count.to_string(), "count");
    }
}
