//! `rally export`: write the graph for external renderers.
//!
//! - `dot`: Graphviz digraph, one `winner -> loser` line per edge.
//! - `json`: node list with best ranks plus an edge list with meeting dates.
//!
//! Both formats list players and edges in lexicographic order, so exports of
//! the same selection are byte-identical.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Args, ValueEnum};
use rally_core::error::ErrorCode;
use rally_core::{MatchGraph, Selection};
use serde::Serialize;
use tracing::info;

use super::{Context, SelectionArgs, load_graph};
use crate::output::CodedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Dot,
    Json,
}

/// Arguments for `rally export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Export format.
    #[arg(long = "as", value_enum, default_value_t = ExportFormat::Dot)]
    pub kind: ExportFormat,

    /// Output path (defaults to stdout).
    #[arg(long, short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ExportNode<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    best_rank: Option<u32>,
}

#[derive(Debug, Serialize)]
struct ExportEdge<'a> {
    winner: &'a str,
    loser: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,
}

#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    selection: &'a Selection,
    content_hash: &'a str,
    nodes: Vec<ExportNode<'a>>,
    edges: Vec<ExportEdge<'a>>,
}

/// Execute `rally export`.
pub fn run_export(args: &ExportArgs, ctx: &Context) -> anyhow::Result<()> {
    let loaded = load_graph(ctx, &args.selection)?;

    let write_failed = |err: &dyn std::fmt::Display| {
        let target = args
            .output
            .as_ref()
            .map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
        CodedError::new(
            ErrorCode::ExportWriteFailed,
            format!("failed to write export to {target}: {err}"),
        )
    };

    let mut out: Box<dyn Write> = match args.output.as_ref() {
        Some(path) => {
            let file = File::create(path).map_err(|e| write_failed(&e))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(BufWriter::new(io::stdout())),
    };

    match args.kind {
        ExportFormat::Dot => write_dot(&mut out, &loaded.graph, &loaded.selection),
        ExportFormat::Json => write_json(&mut out, &loaded.graph, &loaded.selection),
    }
    .and_then(|()| out.flush())
    .map_err(|e| write_failed(&e))?;

    if let Some(path) = &args.output {
        info!(
            path = %path.display(),
            edges = loaded.graph.edge_count(),
            "exported match graph"
        );
    }
    Ok(())
}

/// Quote a DOT identifier.
fn dot_id(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

fn write_dot(w: &mut dyn Write, g: &MatchGraph, selection: &Selection) -> io::Result<()> {
    writeln!(w, "digraph rally {{")?;
    writeln!(w, "  label={};", dot_id(&selection.label()))?;
    for player in g.players() {
        writeln!(w, "  {};", dot_id(player))?;
    }
    for (winner, loser) in g.edges() {
        writeln!(w, "  {} -> {};", dot_id(winner), dot_id(loser))?;
    }
    writeln!(w, "}}")
}

fn write_json(w: &mut dyn Write, g: &MatchGraph, selection: &Selection) -> io::Result<()> {
    let doc = ExportDocument {
        selection,
        content_hash: &g.content_hash,
        nodes: g
            .players()
            .into_iter()
            .map(|name| ExportNode {
                name,
                best_rank: g.node_index(name).and_then(|idx| g.best_rank(idx)),
            })
            .collect(),
        edges: g
            .edges()
            .into_iter()
            .map(|(winner, loser)| ExportEdge {
                winner,
                loser,
                date: g.meeting(winner, loser).map(|m| m.date.to_string()),
            })
            .collect(),
    };
    serde_json::to_writer_pretty(&mut *w, &doc)?;
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: fn(&mut dyn Write, &MatchGraph, &Selection) -> io::Result<()>) -> String {
        let g = MatchGraph::from_edges(2023, &[("A", "B"), ("C", "B")]);
        let selection = Selection::new(2023).with_tournament("Wimbledon");
        let mut buf = Vec::new();
        f(&mut buf, &g, &selection).expect("write to buffer");
        String::from_utf8(buf).expect("utf-8")
    }

    #[test]
    fn dot_lists_sorted_edges() {
        let dot = render(write_dot);
        assert!(dot.starts_with("digraph rally {\n"));
        assert!(dot.contains("label=\"Wimbledon 2023\";"));
        let a = dot.find("\"A\" -> \"B\";").expect("A -> B");
        let c = dot.find("\"C\" -> \"B\";").expect("C -> B");
        assert!(a < c);
        assert!(dot.trim_end().ends_with('}'));
    }

    #[test]
    fn dot_ids_are_escaped() {
        assert_eq!(dot_id("Del Potro"), "\"Del Potro\"");
        assert_eq!(dot_id("a\"b"), "\"a\\\"b\"");
    }

    #[test]
    fn json_carries_nodes_edges_and_dates() {
        let json: serde_json::Value =
            serde_json::from_str(&render(write_json)).expect("valid JSON");
        assert_eq!(json["selection"]["tournament"], "Wimbledon");
        assert_eq!(json["nodes"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["edges"][0]["winner"], "A");
        assert_eq!(json["edges"][0]["loser"], "B");
        assert_eq!(json["edges"][0]["date"], "2023-01-01");
        assert!(json["nodes"][0].get("best_rank").is_none());
    }
}
