//! `rally diameter`: path measures of each strongly connected component.

use std::io::{self, Write};

use clap::Args;
use rally_core::Selection;
use rally_metrics::paths::{ComponentPaths, component_paths};
use serde::Serialize;

use super::{Context, SelectionArgs, load_graph};
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `rally diameter`.
#[derive(Args, Debug)]
pub struct DiameterArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,
}

/// Report payload for `rally diameter`.
///
/// `components` is empty when no two players can reach each other through
/// chains of wins.
#[derive(Debug, Serialize)]
pub struct DiameterReport {
    pub selection: Selection,
    pub label: String,
    pub components: Vec<ComponentPaths>,
}

/// Execute `rally diameter`.
pub fn run_diameter(args: &DiameterArgs, ctx: &Context) -> anyhow::Result<()> {
    let loaded = load_graph(ctx, &args.selection)?;
    let report = DiameterReport {
        label: loaded.selection.label(),
        components: component_paths(&loaded.graph),
        selection: loaded.selection,
    };
    render_mode(ctx.output, &report, render_text, render_pretty)
}

fn render_text(r: &DiameterReport, w: &mut dyn Write) -> io::Result<()> {
    if r.components.is_empty() {
        return writeln!(w, "no connected component");
    }
    writeln!(w, "component\tsize\tdiameter\tradius\tperiphery\tcenter")?;
    for (i, c) in r.components.iter().enumerate() {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}",
            i + 1,
            c.members.len(),
            c.diameter,
            c.radius,
            c.periphery.join(","),
            c.center.join(",")
        )?;
    }
    Ok(())
}

fn render_pretty(r: &DiameterReport, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, &format!("Diameter and periphery: {}", r.label))?;
    if r.components.is_empty() {
        writeln!(w, "No connected component.")?;
        return Ok(());
    }
    for (i, c) in r.components.iter().enumerate() {
        writeln!(w, "Component {} ({} players)", i + 1, c.members.len())?;
        pretty_kv(w, "Diameter", c.diameter.to_string())?;
        pretty_kv(w, "Radius", c.radius.to_string())?;
        pretty_kv(w, "Periphery", c.periphery.join(", "))?;
        pretty_kv(w, "Center", c.center.join(", "))?;
        pretty_kv(w, "Members", c.members.join(", "))?;
        writeln!(w)?;
    }
    Ok(())
}
