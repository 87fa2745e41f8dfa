#![forbid(unsafe_code)]
//! rally-metrics library.
//!
//! Graph analytics over a [`MatchGraph`]: summary statistics, components,
//! path-based measures, assortativity, clustering, degree distributions,
//! centrality rankings and the adjacency matrix.
//!
//! # Conventions
//!
//! - **Errors**: [`MetricsError`] for measures that can fail; everything
//!   else is infallible.
//! - **Empty graphs**: every function accepts a graph with zero nodes and
//!   returns an empty or `None` result.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//!
//! [`MatchGraph`]: rally_core::MatchGraph

pub mod assortativity;
pub mod centrality;
pub mod clustering;
pub mod components;
pub mod degree;
pub mod matrix;
pub mod paths;
pub mod stats;

pub use centrality::{Ranking, rank_top};
pub use stats::GraphStats;

/// Errors raised by measures that may not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetricsError {
    /// Power iteration did not reach the tolerance within the iteration
    /// budget.
    #[error("power iteration failed to converge in {iterations} iterations")]
    NoConvergence { iterations: usize },
}
