//! Matgraph CLI: inspect graphs loaded from matrix files
//!
//! Text-mode front end over the `matgraph` engine: adjacency listings,
//! reachability tables, spanning trees and isomorphism checks.

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use matgraph::algo::prim_mst;
use matgraph::{load_graph, Graph, IncidenceMode, LoadOptions, MatrixFormat};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "matgraph", version, about = "Inspect graphs loaded from matrix files")]
struct Cli {
    /// Matrix layout of the input files
    #[arg(long, default_value = "adjacency", global = true, env = "MATGRAPH_FORMAT")]
    format: FormatArg,

    /// Where incidence magnitudes are stored
    #[arg(long, default_value = "weight", global = true, env = "MATGRAPH_INCIDENCE_MODE")]
    incidence_mode: ModeArg,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum FormatArg {
    Adjacency,
    Weights,
    Incidence,
}

impl From<FormatArg> for MatrixFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Adjacency => MatrixFormat::Adjacency,
            FormatArg::Weights => MatrixFormat::Weights,
            FormatArg::Incidence => MatrixFormat::Incidence,
        }
    }
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum ModeArg {
    Weight,
    Count,
}

impl From<ModeArg> for IncidenceMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Weight => IncidenceMode::Weight,
            ModeArg::Count => IncidenceMode::Count,
        }
    }
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List vertices with their degree and neighbors
    Show {
        /// Matrix file
        file: PathBuf,
    },
    /// Print the reachability matrix
    Reach {
        /// Matrix file
        file: PathBuf,
    },
    /// Compute a minimum spanning tree
    Mst {
        /// Matrix file
        file: PathBuf,

        /// Start vertex (defaults to the smallest label)
        #[arg(long)]
        start: Option<String>,
    },
    /// Test two graphs for isomorphism
    Iso {
        /// First matrix file
        left: PathBuf,
        /// Second matrix file
        right: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = LoadOptions {
        format: cli.format.into(),
        incidence_mode: cli.incidence_mode.into(),
    };
    tracing::debug!("Load options: {:?}", options);

    let result = match &cli.command {
        Commands::Show { file } => run_show(file, &options, &cli.output),
        Commands::Reach { file } => run_reach(file, &options, &cli.output),
        Commands::Mst { file, start } => run_mst(file, start.as_deref(), &options, &cli.output),
        Commands::Iso { left, right } => run_iso(left, right, &options, &cli.output),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn open(path: &Path, options: &LoadOptions) -> anyhow::Result<Graph> {
    load_graph(path, options).with_context(|| format!("failed to load {}", path.display()))
}

fn run_show(path: &Path, options: &LoadOptions, format: &OutputFormat) -> anyhow::Result<()> {
    let graph = open(path, options)?;
    let degree = graph.degree();

    match format {
        OutputFormat::Json => {
            let value = json!({
                "vertices": graph.vertices().collect::<Vec<_>>(),
                "degree": degree,
                "edges": graph.edge_records(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Vertex", "Degree", "Adjacent"]);

            for vertex in graph.vertices() {
                let adjacent: Vec<&str> = graph
                    .list_adjacent(vertex.as_str())
                    .into_iter()
                    .map(|v| v.as_str())
                    .collect();
                let d = degree.get(vertex).copied().unwrap_or(0);
                table.add_row(vec![vertex.to_string(), d.to_string(), adjacent.join(" ")]);
            }

            println!("{}", table);
            println!("{} vertices, {} edges", graph.vertex_count(), graph.edge_count());
        }
    }

    Ok(())
}

fn run_reach(path: &Path, options: &LoadOptions, format: &OutputFormat) -> anyhow::Result<()> {
    let graph = open(path, options)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&graph.reachability())?);
        }
        OutputFormat::Table => {
            let (labels, matrix) = graph.reachability_matrix();
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);

            let mut header = vec![String::new()];
            header.extend(labels.iter().map(|l| l.to_string()));
            table.set_header(header);

            for (label, row) in labels.iter().zip(matrix) {
                let mut cells = vec![label.to_string()];
                cells.extend(row.into_iter().map(|reachable| u8::from(reachable).to_string()));
                table.add_row(cells);
            }

            println!("{}", table);
        }
    }

    Ok(())
}

fn run_mst(
    path: &Path,
    start: Option<&str>,
    options: &LoadOptions,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let graph = open(path, options)?;
    let result = prim_mst(&graph, start)?;

    match format {
        OutputFormat::Json => {
            let edges: Vec<_> = result
                .edges
                .iter()
                .map(|(from, to, weight)| json!({ "from": from, "to": to, "weight": weight }))
                .collect();
            let value = json!({ "edges": edges, "total_weight": result.total_weight });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => {
            if result.edges.is_empty() {
                println!("(no tree edges)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["From", "To", "Weight"]);
            for (from, to, weight) in &result.edges {
                table.add_row(vec![from.to_string(), to.to_string(), weight.to_string()]);
            }

            println!("{}", table);
            println!("Total weight: {}", result.total_weight);
        }
    }

    Ok(())
}

fn run_iso(
    left: &Path,
    right: &Path,
    options: &LoadOptions,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let a = open(left, options)?;
    let b = open(right, options)?;
    let outcome = matgraph::algo::isomorphism_search(&a, &b);

    match format {
        OutputFormat::Json => {
            let value = json!({
                "isomorphic": outcome.is_isomorphic(),
                "mapping": outcome.mapping,
                "candidates_checked": outcome.candidates_checked,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Table => {
            match &outcome.mapping {
                Some(mapping) => {
                    println!("Graphs are isomorphic");
                    let mut table = Table::new();
                    table.set_header(vec!["Left", "Right"]);
                    for (from, to) in mapping {
                        table.add_row(vec![from.to_string(), to.to_string()]);
                    }
                    println!("{}", table);
                }
                None => println!("Graphs are not isomorphic"),
            }
            println!("{} candidate(s) checked", outcome.candidates_checked);
        }
    }

    Ok(())
}
