use matgraph::{load_graph, IncidenceMode, LoadError, LoadOptions, MatrixFormat, VertexLabel};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_matrix(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_adjacency_file() {
    let file = write_matrix("4\n0 1 1 1\n1 0 0 1\n1 0 0 0\n1 1 0 0\n");
    let graph = load_graph(file.path(), &LoadOptions::default()).unwrap();

    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.degree()[&VertexLabel::from_index(0)], 3);
}

#[test]
fn test_loaded_files_compare_as_isomorphic() {
    let a = write_matrix("3\n0 1 0\n0 0 1\n0 0 0\n");
    let b = write_matrix("3\n0 0 0\n1 0 0\n0 1 0\n");
    let c = write_matrix("3\n0 1 1\n0 0 0\n0 0 0\n");
    let options = LoadOptions::default();

    let ga = load_graph(a.path(), &options).unwrap();
    let gb = load_graph(b.path(), &options).unwrap();
    let gc = load_graph(c.path(), &options).unwrap();

    assert!(ga == gb);
    assert!(ga != gc);
}

#[test]
fn test_load_weights_file_and_mst() {
    let file = write_matrix("3\n- 1 4\n1 - 2\n4 2 nan\n");
    let options = LoadOptions { format: MatrixFormat::Weights, ..Default::default() };
    let graph = load_graph(file.path(), &options).unwrap();

    let tree = graph.min_spanning_tree(None).unwrap();
    assert_eq!(tree.edge_count(), 4);
    assert!(tree.edge_bag("0", "2").is_empty());
}

#[test]
fn test_load_incidence_file() {
    let file = write_matrix("2\n2 -2 0\n0 1 -1\n");
    let options = LoadOptions {
        format: MatrixFormat::Incidence,
        incidence_mode: IncidenceMode::Count,
    };
    let graph = load_graph(file.path(), &options).unwrap();

    assert_eq!(graph.edge_count(), 3);
    let reach = graph.reachability();
    assert_eq!(reach[&VertexLabel::from_index(0)].len(), 3);
}

#[test]
fn test_malformed_file_is_rejected() {
    let file = write_matrix("3\n0 1 1\n1 0\n");
    let err = load_graph(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)));
}

#[test]
fn test_run_together_cells_are_rejected() {
    let file = write_matrix("2\n1-1\n0 0\n");
    let err = load_graph(file.path(), &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)));
}

#[test]
fn test_missing_file() {
    let err = load_graph("/nonexistent/graph.txt", &LoadOptions::default()).unwrap_err();
    assert!(matches!(err, LoadError::Io(_)));
}

#[test]
fn test_options_and_edge_records_serialize() {
    let options: LoadOptions =
        serde_json::from_str(r#"{"format":"incidence","incidence_mode":"count"}"#).unwrap();
    assert_eq!(options.format, MatrixFormat::Incidence);
    assert_eq!(options.incidence_mode, IncidenceMode::Count);

    let file = write_matrix("1\n3 0 -3\n");
    let graph = load_graph(file.path(), &options).unwrap();
    let value = serde_json::to_value(graph.edge_records()).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "source": "0", "target": "2", "weight": 0.0, "count": 3 }])
    );
}
