//! Centrality rankings for the match graph.
//!
//! # Overview
//!
//! Each measure answers a different question about who mattered in a
//! tournament year:
//!
//! - **Degree** ([`crate::degree`]): who met the most distinct opponents?
//! - **Closeness** (`closeness`): who can be reached quickly through
//!   chains of wins, i.e. sits close to the top of the field?
//! - **Betweenness** (`betweenness`): who lies on many shortest win-chains
//!   between other players?
//! - **Eigenvector** (`eigenvector`): who lost to players who themselves
//!   lost to strong players? May fail to converge.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rally_metrics::centrality::{CentralityReport, eigenvector::EigenvectorConfig};
//!
//! let report = CentralityReport::compute(&graph, &EigenvectorConfig::default(), 5);
//! for entry in &report.betweenness {
//!     println!("{} {:.4}", entry.player, entry.score);
//! }
//! ```

pub mod betweenness;
pub mod closeness;
pub mod eigenvector;

use std::collections::HashMap;

use rally_core::MatchGraph;
use serde::Serialize;
use tracing::{instrument, warn};

use crate::degree::{DegreeKind, degree_centrality};
use eigenvector::EigenvectorConfig;

/// One entry of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked {
    pub player: String,
    pub score: f64,
}

/// Players ordered by score, highest first.
pub type Ranking = Vec<Ranked>;

/// The `n` highest-scoring players, ties broken by name.
#[must_use]
pub fn rank_top(scores: &HashMap<String, f64>, n: usize) -> Ranking {
    let mut entries: Vec<(&String, f64)> = scores.iter().map(|(k, &v)| (k, v)).collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
        .into_iter()
        .take(n)
        .map(|(player, score)| Ranked {
            player: player.clone(),
            score,
        })
        .collect()
}

/// Top-n rankings for every centrality measure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CentralityReport {
    pub degree: Ranking,
    pub closeness: Ranking,
    pub betweenness: Ranking,
    /// `None` when power iteration did not converge.
    pub eigenvector: Option<Ranking>,
}

impl CentralityReport {
    /// Compute all four rankings, keeping the `top` players of each.
    #[must_use]
    #[instrument(skip(g, eigen), fields(players = g.node_count()))]
    pub fn compute(g: &MatchGraph, eigen: &EigenvectorConfig, top: usize) -> Self {
        let degree = degree_centrality(g).normalized(DegreeKind::Total);
        let closeness = closeness::closeness_centrality(g);
        let betweenness = betweenness::betweenness_centrality(g);
        let eigenvector = match eigenvector::eigenvector_centrality(g, eigen) {
            Ok(scores) => Some(rank_top(&scores, top)),
            Err(err) => {
                warn!(%err, "eigenvector centrality unavailable");
                None
            }
        };

        Self {
            degree: rank_top(&degree, top),
            closeness: rank_top(&closeness, top),
            betweenness: rank_top(&betweenness, top),
            eigenvector,
        }
    }
}
