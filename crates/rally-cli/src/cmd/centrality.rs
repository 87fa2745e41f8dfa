//! `rally centrality`: top players by each centrality measure.

use std::io::{self, Write};

use clap::Args;
use rally_core::Selection;
use rally_metrics::Ranking;
use rally_metrics::centrality::CentralityReport;
use rally_metrics::centrality::eigenvector::EigenvectorConfig;
use serde::Serialize;

use super::{Context, SelectionArgs, load_graph};
use crate::output::{pretty_section, render_mode};

/// Arguments for `rally centrality`.
#[derive(Args, Debug)]
pub struct CentralityArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Number of players per ranking (default from `[metrics] top`).
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Report payload for `rally centrality`.
#[derive(Debug, Serialize)]
pub struct CentralityView {
    pub selection: Selection,
    pub label: String,
    pub top: usize,
    #[serde(flatten)]
    pub report: CentralityReport,
}

/// Execute `rally centrality`.
pub fn run_centrality(args: &CentralityArgs, ctx: &Context) -> anyhow::Result<()> {
    let metrics = &ctx.config.project.metrics;
    let top = args.top.unwrap_or(metrics.top);
    let eigen = EigenvectorConfig {
        max_iter: metrics.eigenvector_max_iter,
        tolerance: metrics.eigenvector_tolerance,
    };

    let loaded = load_graph(ctx, &args.selection)?;
    let view = CentralityView {
        label: loaded.selection.label(),
        top,
        report: CentralityReport::compute(&loaded.graph, &eigen, top),
        selection: loaded.selection,
    };
    render_mode(ctx.output, &view, render_text, render_pretty)
}

fn measures(r: &CentralityReport) -> [(&'static str, Option<&Ranking>); 4] {
    [
        ("degree", Some(&r.degree)),
        ("closeness", Some(&r.closeness)),
        ("betweenness", Some(&r.betweenness)),
        ("eigenvector", r.eigenvector.as_ref()),
    ]
}

fn render_text(v: &CentralityView, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "measure\trank\tplayer\tscore")?;
    for (measure, ranking) in measures(&v.report) {
        let Some(ranking) = ranking else {
            writeln!(w, "{measure}\t-\t-\tunavailable")?;
            continue;
        };
        for (i, entry) in ranking.iter().enumerate() {
            writeln!(w, "{measure}\t{}\t{}\t{:.6}", i + 1, entry.player, entry.score)?;
        }
    }
    Ok(())
}

fn render_pretty(v: &CentralityView, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Centrality (top {}): {}", v.top, v.label))?;
    for (measure, ranking) in measures(&v.report) {
        writeln!(w, "{measure}")?;
        match ranking {
            None => writeln!(w, "  did not converge")?,
            Some(r) if r.is_empty() => writeln!(w, "  (no players)")?,
            Some(r) => {
                for (i, entry) in r.iter().enumerate() {
                    writeln!(w, "  {:>2}. {:<28} {:.4}", i + 1, entry.player, entry.score)?;
                }
            }
        }
        writeln!(w)?;
    }
    Ok(())
}
