//! Who-beat-whom graph module.
//!
//! # Overview
//!
//! This module turns a tournament-filtered set of [`MatchRecord`]s into a
//! petgraph-based directed graph for one calendar year. The graph feeds all
//! metrics in `rally-metrics` and every view of the `rally` CLI.
//!
//! ## Pipeline
//!
//! ```text
//! Vec<MatchRecord>
//!        ↓  select::Selection::filter()
//! tournament/category records
//!        ↓  build::build_match_graph(records, year)
//! MatchGraph (DiGraph: winner → loser)
//! ```
//!
//! A graph is rebuilt from scratch for every selection; it is never
//! persisted or mutated incrementally.
//!
//! [`MatchRecord`]: crate::record::MatchRecord

pub mod build;

// Re-export primary types at module level for convenience.
pub use build::{BuildError, MatchGraph, Meeting, Player, build_match_graph};
