//! Subcommand handlers.
//!
//! Every view follows the same flow: resolve the dataset, load it, apply the
//! explicit [`Selection`], build the match graph and render one report.

pub mod catalog;
pub mod centrality;
pub mod clustering;
pub mod completions;
pub mod degrees;
pub mod density;
pub mod diameter;
pub mod export;
pub mod matrix;
pub mod summary;

use anyhow::Context as _;
use clap::Args;
use rally_core::config::EffectiveConfig;
use rally_core::error::ErrorCode;
use rally_core::load::{LoadError, load_matches};
use rally_core::select::catalog as build_catalog;
use rally_core::{BuildError, MatchGraph, MatchRecord, Selection, build_match_graph};
use tracing::{debug, info};

use crate::output::{CodedError, OutputMode};

/// Everything a command needs besides its own arguments.
pub struct Context {
    pub config: EffectiveConfig,
    pub output: OutputMode,
}

/// The explicit selection shared by every graph view.
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Tournament name, case-insensitive. All tournaments when omitted.
    #[arg(long, short = 't')]
    pub tournament: Option<String>,

    /// Tournament category (e.g. "Grand Slam", "Masters 1000").
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Season to graph.
    #[arg(long, short = 'y')]
    pub year: i32,
}

impl SelectionArgs {
    pub fn selection(&self) -> Selection {
        let mut selection = Selection::new(self.year);
        if let Some(ref t) = self.tournament {
            selection = selection.with_tournament(t.clone());
        }
        if let Some(ref c) = self.category {
            selection = selection.with_category(c.clone());
        }
        selection
    }
}

/// A built graph together with the selection that produced it.
pub struct Loaded {
    pub selection: Selection,
    pub graph: MatchGraph,
}

/// Load every record of the configured dataset.
pub fn load_records(ctx: &Context) -> anyhow::Result<Vec<MatchRecord>> {
    let path = ctx.config.dataset_path.as_deref().ok_or_else(|| {
        CodedError::new(
            ErrorCode::DatasetNotConfigured,
            "no dataset given on the command line or in any config file",
        )
    })?;
    let records = load_matches(path, &ctx.config.project.dataset)
        .with_context(|| format!("failed to load dataset {}", path.display()))?;
    Ok(records)
}

/// Load the dataset and build the graph for `args`.
///
/// A tournament or category name absent from the whole dataset is an error;
/// a known name with no matches in the chosen year yields an empty graph.
pub fn load_graph(ctx: &Context, args: &SelectionArgs) -> anyhow::Result<Loaded> {
    let records = load_records(ctx)?;
    let selection = args.selection();

    if !build_catalog(&records).knows(&selection) {
        return Err(CodedError::new(
            ErrorCode::UnknownSelection,
            format!("no matches for {} in any year", selection.label()),
        )
        .into());
    }

    let selected = selection.filter(&records);
    debug!(selected = selected.len(), "records after selection");
    let graph = build_match_graph(selected, selection.year)?;
    info!(
        selection = %selection.label(),
        players = graph.node_count(),
        matches = graph.edge_count(),
        "built match graph"
    );

    Ok(Loaded { selection, graph })
}

/// Classify a command failure into its stable error code.
pub fn error_code(err: &anyhow::Error) -> ErrorCode {
    if let Some(coded) = err.downcast_ref::<CodedError>() {
        return coded.code;
    }
    if err.downcast_ref::<BuildError>().is_some() {
        return ErrorCode::DataIntegrity;
    }
    match err.downcast_ref::<LoadError>() {
        Some(LoadError::Io { .. }) => ErrorCode::DatasetNotFound,
        Some(LoadError::Csv(_)) => ErrorCode::DatasetParseError,
        Some(LoadError::MissingColumn { .. }) => ErrorCode::MissingColumn,
        Some(LoadError::InvalidDelimiter(_)) => ErrorCode::ConfigParseError,
        None => ErrorCode::InternalUnexpected,
    }
}
