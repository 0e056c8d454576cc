//! Matrix file loading
//!
//! Reads the text matrix files handed over by editors and file dialogs and
//! builds a [`Graph`] from them.

pub mod parser;

pub use parser::{parse_adjacency, parse_incidence, parse_weights, ParseError, ParseResult};

use crate::graph::{Graph, GraphError, IncidenceMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// How the numbers in a matrix file are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatrixFormat {
    /// Square matrix of parallel edge counts
    #[default]
    Adjacency,
    /// Square matrix of edge weights with missing-edge sentinels
    Weights,
    /// One row per edge
    Incidence,
}

impl FromStr for MatrixFormat {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, GraphError> {
        match s.to_ascii_lowercase().as_str() {
            "adjacency" => Ok(MatrixFormat::Adjacency),
            "weights" | "weight" => Ok(MatrixFormat::Weights),
            "incidence" => Ok(MatrixFormat::Incidence),
            other => Err(GraphError::InvalidArgument(format!("unknown matrix format '{}'", other))),
        }
    }
}

impl fmt::Display for MatrixFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatrixFormat::Adjacency => write!(f, "adjacency"),
            MatrixFormat::Weights => write!(f, "weights"),
            MatrixFormat::Incidence => write!(f, "incidence"),
        }
    }
}

/// Loader configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LoadOptions {
    /// Matrix layout of the input
    pub format: MatrixFormat,
    /// Where incidence magnitudes go; ignored for other formats
    pub incidence_mode: IncidenceMode,
}

/// Errors raised while loading a graph file
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type LoadResult<T> = Result<T, LoadError>;

impl From<ParseError> for GraphError {
    fn from(err: ParseError) -> Self {
        GraphError::MalformedInput(err.to_string())
    }
}

/// Build a graph from matrix text
pub fn read_graph(input: &str, options: &LoadOptions) -> LoadResult<Graph> {
    let graph = match options.format {
        MatrixFormat::Adjacency => Graph::from_adjacency(&parse_adjacency(input)?)?,
        MatrixFormat::Weights => Graph::from_weights(&parse_weights(input)?)?,
        MatrixFormat::Incidence => {
            Graph::from_incidence(&parse_incidence(input)?, options.incidence_mode)?
        }
    };
    debug!(
        "Read {} matrix: {} vertices, {} edges",
        options.format,
        graph.vertex_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Read a matrix file and build a graph from it
pub fn load_graph(path: impl AsRef<Path>, options: &LoadOptions) -> LoadResult<Graph> {
    let path = path.as_ref();
    info!("Loading {} matrix from {:?}", options.format, path);
    let input = std::fs::read_to_string(path)?;
    read_graph(&input, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_adjacency_graph() {
        let graph = read_graph("2\n0 1\n1 0\n", &LoadOptions::default()).unwrap();
        assert_eq!(graph.vertex_count(), 2);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_read_incidence_graph_count_mode() {
        let options = LoadOptions {
            format: MatrixFormat::Incidence,
            incidence_mode: IncidenceMode::Count,
        };
        let graph = read_graph("1\n3 0 -3\n", &options).unwrap();
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_parse_error_surfaces_as_load_error() {
        let err = read_graph("2\n0 1\n", &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
        let graph_err: GraphError = match err {
            LoadError::Parse(e) => e.into(),
            _ => unreachable!(),
        };
        assert!(matches!(graph_err, GraphError::MalformedInput(_)));
    }

    #[test]
    fn test_bad_incidence_row_is_graph_error() {
        let options = LoadOptions { format: MatrixFormat::Incidence, ..Default::default() };
        let err = read_graph("1\n1 1 0\n", &options).unwrap_err();
        assert!(matches!(err, LoadError::Graph(GraphError::MalformedInput(_))));
    }

    #[test]
    fn test_matrix_format_parse() {
        assert_eq!("Weights".parse::<MatrixFormat>().unwrap(), MatrixFormat::Weights);
        assert!("csv".parse::<MatrixFormat>().is_err());
    }
}
