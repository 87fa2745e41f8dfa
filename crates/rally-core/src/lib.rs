#![forbid(unsafe_code)]
//! rally-core library.
//!
//! Match records, CSV loading, tournament/category selection and the
//! who-beat-whom graph builder.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums for data failures, `anyhow::Result`
//!   for configuration plumbing.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!
//! # Typical usage
//!
//! ```rust,ignore
//! use rally_core::config::DatasetConfig;
//! use rally_core::graph::build_match_graph;
//! use rally_core::load::load_matches;
//! use rally_core::select::Selection;
//!
//! let records = load_matches("atp_tennis.csv".as_ref(), &DatasetConfig::default())?;
//! let selection = Selection::new(2023).with_tournament("Wimbledon");
//! let graph = build_match_graph(selection.filter(&records), selection.year)?;
//!
//! println!("players={} wins={}", graph.node_count(), graph.edge_count());
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod load;
pub mod record;
pub mod select;

pub use graph::{BuildError, MatchGraph, build_match_graph};
pub use record::MatchRecord;
pub use select::Selection;
