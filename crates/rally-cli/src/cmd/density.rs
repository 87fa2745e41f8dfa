//! `rally density`: density and assortativity.

use std::io::{self, Write};

use clap::Args;
use rally_core::Selection;
use rally_metrics::assortativity::{degree_assortativity, rank_group_assortativity};
use rally_metrics::stats::density;
use serde::Serialize;

use super::{Context, SelectionArgs, load_graph};
use crate::output::{fmt_opt, pretty_kv, pretty_section, render_mode};

/// Arguments for `rally density`.
#[derive(Args, Debug)]
pub struct DensityArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Report payload for `rally density`. Assortativity is `None` when it is
/// undefined (no edges, or no variance).
#[derive(Debug, Serialize)]
pub struct DensityReport {
    pub selection: Selection,
    pub label: String,
    pub density: f64,
    pub rank_group_assortativity: Option<f64>,
    pub degree_assortativity: Option<f64>,
}

/// Execute `rally density`.
pub fn run_density(args: &DensityArgs, ctx: &Context) -> anyhow::Result<()> {
    let loaded = load_graph(ctx, &args.selection)?;
    let g = &loaded.graph;
    let report = DensityReport {
        label: loaded.selection.label(),
        density: density(g),
        rank_group_assortativity: rank_group_assortativity(g),
        degree_assortativity: degree_assortativity(g),
        selection: loaded.selection,
    };
    render_mode(ctx.output, &report, render_text, render_pretty)
}

fn render_text(r: &DensityReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "density\t{:.6}", r.density)?;
    writeln!(w, "rank_group_assortativity\t{}", fmt_opt(r.rank_group_assortativity))?;
    writeln!(w, "degree_assortativity\t{}", fmt_opt(r.degree_assortativity))
}

fn render_pretty(r: &DensityReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Density and assortativity: {}", r.label))?;
    pretty_kv(w, "Density", format!("{:.4}", r.density))?;
    pretty_kv(w, "Rank groups", fmt_opt(r.rank_group_assortativity))?;
    pretty_kv(w, "Degree", fmt_opt(r.degree_assortativity))?;
    writeln!(w)?;
    writeln!(
        w,
        "Rank groups are 1-50, 51-100, 101-150 and 151+ (best rank in the selection)."
    )
}
