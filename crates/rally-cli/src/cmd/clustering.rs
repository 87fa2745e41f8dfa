//! `rally clustering`: clustering coefficients and component lists.

use std::io::{self, Write};

use clap::Args;
use rally_core::Selection;
use rally_metrics::clustering::{average_clustering, clustering_of, transitivity};
use rally_metrics::components::{strongly_connected_components, weakly_connected_components};
use serde::Serialize;

use super::{Context, SelectionArgs, load_graph};
use crate::output::{fmt_opt, pretty_kv, pretty_section, render_mode};

/// Arguments for `rally clustering`.
#[derive(Args, Debug)]
pub struct ClusteringArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Also report the local clustering of this player (repeatable).
    #[arg(long, short = 'p', value_name = "NAME")]
    pub player: Vec<String>,
}

/// Local clustering of one requested player; `None` when the player is not
/// in the graph.
#[derive(Debug, Serialize)]
pub struct LocalClustering {
    pub player: String,
    pub clustering: Option<f64>,
}

/// Report payload for `rally clustering`.
#[derive(Debug, Serialize)]
pub struct ClusteringReport {
    pub selection: Selection,
    pub label: String,
    pub average_clustering: Option<f64>,
    pub transitivity: f64,
    pub strongly_connected: Vec<Vec<String>>,
    pub weakly_connected: Vec<Vec<String>>,
    pub local: Vec<LocalClustering>,
}

/// Execute `rally clustering`.
pub fn run_clustering(args: &ClusteringArgs, ctx: &Context) -> anyhow::Result<()> {
    let loaded = load_graph(ctx, &args.selection)?;
    let g = &loaded.graph;
    let report = ClusteringReport {
        label: loaded.selection.label(),
        average_clustering: average_clustering(g),
        transitivity: transitivity(g),
        strongly_connected: strongly_connected_components(g),
        weakly_connected: weakly_connected_components(g),
        local: clustering_of(g, &args.player)
            .into_iter()
            .map(|(player, clustering)| LocalClustering { player, clustering })
            .collect(),
        selection: loaded.selection,
    };
    render_mode(ctx.output, &report, render_text, render_pretty)
}

fn render_text(r: &ClusteringReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "average_clustering\t{}", fmt_opt(r.average_clustering))?;
    writeln!(w, "transitivity\t{:.6}", r.transitivity)?;
    for c in &r.strongly_connected {
        writeln!(w, "scc\t{}", c.join(","))?;
    }
    for c in &r.weakly_connected {
        writeln!(w, "wcc\t{}", c.join(","))?;
    }
    for l in &r.local {
        writeln!(w, "local\t{}\t{}", l.player, fmt_opt(l.clustering))?;
    }
    Ok(())
}

fn render_pretty(r: &ClusteringReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Clustering: {}", r.label))?;
    pretty_kv(w, "Average", fmt_opt(r.average_clustering))?;
    pretty_kv(w, "Transitivity", format!("{:.4}", r.transitivity))?;
    for l in &r.local {
        let value = l
            .clustering
            .map_or_else(|| "not in this selection".to_string(), |c| format!("{c:.4}"));
        pretty_kv(w, &l.player, value)?;
    }
    writeln!(w)?;

    // Singleton SCCs are the norm in a knockout draw; only list the rest.
    let cyclic: Vec<&Vec<String>> = r.strongly_connected.iter().filter(|c| c.len() > 1).collect();
    pretty_section(w, "Strongly connected components")?;
    writeln!(
        w,
        "{} total, {} with more than one player",
        r.strongly_connected.len(),
        cyclic.len()
    )?;
    for c in cyclic {
        writeln!(w, "  [{}] {}", c.len(), c.join(", "))?;
    }
    writeln!(w)?;

    pretty_section(w, "Weakly connected components")?;
    for c in &r.weakly_connected {
        writeln!(w, "  [{}] {}", c.len(), c.join(", "))?;
    }
    Ok(())
}
