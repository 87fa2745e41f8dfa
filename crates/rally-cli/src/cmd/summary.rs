//! `rally summary`: size, density and component counts of one selection.

use std::io::{self, Write};

use clap::Args;
use rally_core::Selection;
use rally_metrics::GraphStats;
use serde::Serialize;

use super::{Context, SelectionArgs, load_graph};
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `rally summary`.
#[derive(Args, Debug)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Report payload for `rally summary`.
#[derive(Debug, Serialize)]
pub struct SummaryReport {
    pub selection: Selection,
    pub label: String,
    pub content_hash: String,
    #[serde(flatten)]
    pub stats: GraphStats,
}

/// Execute `rally summary`.
pub fn run_summary(args: &SummaryArgs, ctx: &Context) -> anyhow::Result<()> {
    let loaded = load_graph(ctx, &args.selection)?;
    let report = SummaryReport {
        label: loaded.selection.label(),
        content_hash: loaded.graph.content_hash.clone(),
        stats: GraphStats::from_graph(&loaded.graph),
        selection: loaded.selection,
    };
    render_mode(ctx.output, &report, render_text, render_pretty)
}

fn render_text(r: &SummaryReport, w: &mut dyn Write) -> io::Result<()> {
    let s = &r.stats;
    writeln!(w, "selection\t{}", r.label)?;
    writeln!(w, "players\t{}", s.node_count)?;
    writeln!(w, "matches\t{}", s.edge_count)?;
    writeln!(w, "density\t{:.6}", s.density)?;
    writeln!(w, "strong_components\t{}", s.scc_count)?;
    writeln!(w, "cyclic_components\t{}", s.cyclic_component_count)?;
    writeln!(w, "weak_components\t{}", s.weak_component_count)?;
    writeln!(w, "largest_scc\t{}", s.largest_scc)?;
    writeln!(w, "largest_wcc\t{}", s.largest_wcc)?;
    writeln!(w, "content_hash\t{}", r.content_hash)
}

fn render_pretty(r: &SummaryReport, w: &mut dyn Write) -> io::Result<()> {
    let s = &r.stats;
    pretty_section(w, &r.label)?;
    if s.node_count == 0 {
        writeln!(w, "No matches for this selection.")?;
        return Ok(());
    }
    pretty_kv(w, "Players", s.node_count.to_string())?;
    pretty_kv(w, "Win edges", s.edge_count.to_string())?;
    pretty_kv(w, "Density", format!("{:.4}", s.density))?;
    pretty_kv(
        w,
        "Strong comps",
        format!("{} ({} with cycles, largest {})", s.scc_count, s.cyclic_component_count, s.largest_scc),
    )?;
    pretty_kv(
        w,
        "Weak comps",
        format!("{} (largest {})", s.weak_component_count, s.largest_wcc),
    )?;
    pretty_kv(w, "Max wins", s.max_out_degree.to_string())?;
    pretty_kv(w, "Max losses", s.max_in_degree.to_string())?;
    pretty_kv(w, "Hash", &r.content_hash)
}
