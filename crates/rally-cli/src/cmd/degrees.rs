//! `rally degrees`: degree distributions.

use std::io::{self, Write};

use clap::Args;
use rally_core::Selection;
use rally_metrics::degree::{DegreeHistograms, degree_histograms};
use serde::Serialize;

use super::{Context, SelectionArgs, load_graph};
use crate::output::{pretty_section, render_mode};

/// Arguments for `rally degrees`.
#[derive(Args, Debug)]
pub struct DegreesArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Report payload for `rally degrees`. Entry `k` of each histogram counts
/// the players with degree `k`.
#[derive(Debug, Serialize)]
pub struct DegreesReport {
    pub selection: Selection,
    pub label: String,
    #[serde(flatten)]
    pub histograms: DegreeHistograms,
}

/// Execute `rally degrees`.
pub fn run_degrees(args: &DegreesArgs, ctx: &Context) -> anyhow::Result<()> {
    let loaded = load_graph(ctx, &args.selection)?;
    let report = DegreesReport {
        label: loaded.selection.label(),
        histograms: degree_histograms(&loaded.graph),
        selection: loaded.selection,
    };
    render_mode(ctx.output, &report, render_text, render_pretty)
}

fn rows(h: &DegreeHistograms) -> impl Iterator<Item = (&'static str, &[usize])> {
    [
        ("in", h.in_degree.as_slice()),
        ("out", h.out_degree.as_slice()),
        ("total", h.total_degree.as_slice()),
    ]
    .into_iter()
}

fn render_text(r: &DegreesReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "kind\tdegree\tplayers")?;
    for (kind, hist) in rows(&r.histograms) {
        for (degree, count) in hist.iter().enumerate() {
            writeln!(w, "{kind}\t{degree}\t{count}")?;
        }
    }
    Ok(())
}

fn render_pretty(r: &DegreesReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Degree distribution: {}", r.label))?;
    if r.histograms.total_degree.is_empty() {
        writeln!(w, "No matches for this selection.")?;
        return Ok(());
    }
    for (kind, hist) in rows(&r.histograms) {
        let label = match kind {
            "in" => "Losses (in-degree)",
            "out" => "Wins (out-degree)",
            _ => "Opponents (total)",
        };
        writeln!(w, "{label}")?;
        for (degree, count) in hist.iter().enumerate() {
            if *count > 0 {
                writeln!(w, "  {degree:>3}  {count:>4}  {}", "#".repeat(*count))?;
            }
        }
        writeln!(w)?;
    }
    Ok(())
}
