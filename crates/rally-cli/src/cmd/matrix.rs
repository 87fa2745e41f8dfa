//! `rally matrix`: adjacency matrix of one selection.

use std::io::{self, Write};

use clap::Args;
use rally_core::Selection;
use rally_metrics::matrix::AdjacencyMatrix;
use serde::Serialize;

use super::{Context, SelectionArgs, load_graph};
use crate::output::{pretty_section, render_mode};

/// Arguments for `rally matrix`.
#[derive(Args, Debug)]
pub struct MatrixArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Keep only the N players with the most matches.
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,
}

/// Report payload for `rally matrix`. `rows[i][j] == 1` when `players[i]`
/// beat `players[j]`.
#[derive(Debug, Serialize)]
pub struct MatrixReport {
    pub selection: Selection,
    pub label: String,
    pub players: Vec<String>,
    pub rows: Vec<Vec<u8>>,
}

/// Execute `rally matrix`.
pub fn run_matrix(args: &MatrixArgs, ctx: &Context) -> anyhow::Result<()> {
    let loaded = load_graph(ctx, &args.selection)?;
    let matrix = AdjacencyMatrix::from_graph(&loaded.graph, args.top);
    let report = MatrixReport {
        label: loaded.selection.label(),
        selection: loaded.selection,
        rows: matrix.rows(),
        players: matrix.players,
    };
    render_mode(ctx.output, &report, render_text, render_pretty)
}

fn render_text(r: &MatrixReport, w: &mut dyn Write) -> io::Result<()> {
    if r.players.is_empty() {
        return Ok(());
    }
    writeln!(w, "\t{}", r.players.join("\t"))?;
    for (player, row) in r.players.iter().zip(&r.rows) {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        writeln!(w, "{player}\t{}", cells.join("\t"))?;
    }
    Ok(())
}

fn render_pretty(r: &MatrixReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Adjacency matrix: {}", r.label))?;
    if r.players.is_empty() {
        writeln!(w, "No matches for this selection.")?;
        return Ok(());
    }

    // Columns are numbered; the legend maps numbers to players.
    let name_width = r.players.iter().map(String::len).max().unwrap_or(0);
    let col_width = r.players.len().to_string().len().max(1) + 1;

    write!(w, "{:>width$}  ", "", width = name_width + col_width + 1)?;
    for j in 1..=r.players.len() {
        write!(w, "{j:>col_width$}")?;
    }
    writeln!(w)?;

    for (i, (player, row)) in r.players.iter().zip(&r.rows).enumerate() {
        write!(w, "{:>col_width$} {player:<name_width$}  ", i + 1)?;
        for cell in row {
            let mark = if *cell > 0 { "x" } else { "." };
            write!(w, "{mark:>col_width$}")?;
        }
        writeln!(w)?;
    }
    writeln!(w)?;
    writeln!(w, "Row beat column.")
}
