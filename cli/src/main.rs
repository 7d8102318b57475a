//! Command line front end: read a castle map, print its social graph.

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::Context;
use castlegraph::{GraphBuilder, Legend, SocialGraph};
use clap::{Parser, ValueEnum};
use itertools::Itertools;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEMO: &str = "\
🧱🧱🧱🧱🧱🧱
🧱 🤴 👸   🧱
🧱   🤹    🧱
🧱  🛡️     🧱
🧱🧱🧱🧱🧱🧱
JESTER DANCES WITH ALL
KING DOES NOT DANCE WITH QUEEN
";

/// Build a nearest-neighbor social graph from a castle map followed by dance rules
#[derive(Parser, Debug)]
#[command(name = "castlegraph")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Map file; standard input when omitted, or a built-in demo if standard input is a terminal
    input: Option<PathBuf>,

    /// TOML legend layered over the built-in castle legend
    #[arg(short, long)]
    legend: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    /// NODES, MATRIX and EDGES sections
    Text,
    /// The graph as one JSON object
    Json,
}

fn read_input(path: Option<&PathBuf>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display())),
        None if std::io::stdin().is_terminal() => {
            info!("no input given; building the demo castle");
            Ok(DEMO.to_string())
        }
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).context("reading standard input")?;
            Ok(text)
        }
    }
}

fn load_legend(path: Option<&PathBuf>) -> anyhow::Result<Legend> {
    match path {
        Some(path) => {
            let document = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            Legend::from_toml_str(&document).with_context(|| format!("loading legend {}", path.display()))
        }
        None => Ok(Legend::default()),
    }
}

fn render_text(graph: &SocialGraph) -> String {
    let mut out = String::from("NODES\n");
    for (index, occupant) in graph.occupants().iter().enumerate() {
        out.push_str(&format!("{index}\t{}\t{}\t{}\n", occupant.id, occupant.category, occupant.location));
    }

    out.push_str("MATRIX\n");
    for row in graph.adjacency().to_rows() {
        out.push_str(&row.iter().join(","));
        out.push('\n');
    }

    out.push_str("EDGES\n");
    for (i, j) in graph.edges() {
        out.push_str(&format!("{i}\t{j}\n"));
    }

    out
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let legend = load_legend(args.legend.as_ref())?;

    let text = read_input(args.input.as_ref())?;
    let graph = GraphBuilder::with_legend(legend).build(&text)?;

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&graph)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&graph)?),
    }

    Ok(())
}
