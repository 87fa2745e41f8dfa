//! `rally catalog`: what the dataset can be sliced by.

use std::collections::BTreeSet;
use std::io::{self, Write};

use clap::Args;
use rally_core::select::{Catalog, catalog};

use super::{Context, load_records};
use crate::output::{pretty_kv, pretty_section, render_mode};

/// Arguments for `rally catalog`.
#[derive(Args, Debug, Default)]
pub struct CatalogArgs {}

/// Execute `rally catalog`.
pub fn run_catalog(_args: &CatalogArgs, ctx: &Context) -> anyhow::Result<()> {
    let records = load_records(ctx)?;
    let cat = catalog(&records);
    render_mode(ctx.output, &cat, render_text, render_pretty)
}

fn years(set: &BTreeSet<i32>) -> String {
    set.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn render_text(cat: &Catalog, w: &mut dyn Write) -> io::Result<()> {
    for (name, ys) in &cat.tournaments {
        writeln!(w, "tournament\t{name}\t{}", years(ys))?;
    }
    for (name, ys) in &cat.categories {
        writeln!(w, "category\t{name}\t{}", years(ys))?;
    }
    writeln!(w, "years\t{}", years(&cat.years))?;
    if cat.undated > 0 {
        writeln!(w, "undated\t{}", cat.undated)?;
    }
    Ok(())
}

fn render_pretty(cat: &Catalog, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Tournaments")?;
    for (name, ys) in &cat.tournaments {
        pretty_kv(w, name, years(ys))?;
    }
    writeln!(w)?;

    pretty_section(w, "Categories")?;
    for (name, ys) in &cat.categories {
        pretty_kv(w, name, years(ys))?;
    }
    writeln!(w)?;

    pretty_kv(w, "Years", years(&cat.years))?;
    if cat.undated > 0 {
        pretty_kv(w, "Undated", format!("{} rows (never graphed)", cat.undated))?;
    }
    Ok(())
}
