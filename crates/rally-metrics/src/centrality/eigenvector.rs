//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! A player scores highly when they lost to players who themselves score
//! highly, so credit flows along in-edges (from winner to loser). The score
//! vector is the dominant left eigenvector of the adjacency matrix.
//!
//! # Algorithm
//!
//! Power iteration on `A^T + I`:
//!
//! 1. Start from the uniform vector with unit L1 norm.
//! 2. `x'(v) = x(v) + Σ x(u)` over all `u → v`.
//! 3. Normalize `x'` to unit L2 norm.
//! 4. Stop when the L1 change is below `n * tolerance`.
//!
//! The identity term keeps the iteration from oscillating on bipartite or
//! periodic structure. On acyclic graphs (a single knockout draw) the
//! iteration converges only polynomially and may exhaust `max_iter`, in
//! which case [`MetricsError::NoConvergence`] is returned and callers treat
//! the measure as unavailable.

use std::collections::HashMap;

use petgraph::{
    Direction,
    visit::{IntoNodeIdentifiers, NodeIndexable},
};
use rally_core::MatchGraph;
use tracing::{debug, instrument};

use crate::MetricsError;

/// Configuration for eigenvector centrality.
#[derive(Debug, Clone)]
pub struct EigenvectorConfig {
    /// Maximum number of iterations.
    /// Default: 1000.
    pub max_iter: usize,
    /// Per-node convergence threshold.
    /// Default: 1e-6.
    pub tolerance: f64,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-6,
        }
    }
}

/// Compute eigenvector centrality for every player.
///
/// An empty graph yields an empty map.
///
/// # Errors
///
/// Returns [`MetricsError::NoConvergence`] if the tolerance is not reached
/// within `config.max_iter` iterations.
#[instrument(skip(g))]
#[allow(clippy::cast_precision_loss)]
pub fn eigenvector_centrality(
    g: &MatchGraph,
    config: &EigenvectorConfig,
) -> Result<HashMap<String, f64>, MetricsError> {
    let graph = &g.graph;
    let n = graph.node_count();

    if n == 0 {
        return Ok(HashMap::new());
    }

    let mut scores: Vec<f64> = vec![1.0 / n as f64; n];
    let threshold = n as f64 * config.tolerance;

    for iter in 0..config.max_iter {
        // Start from x (the identity term), then add in-edge contributions.
        let mut next = scores.clone();
        for v in graph.node_identifiers() {
            let vi = graph.to_index(v);
            for u in graph.neighbors_directed(v, Direction::Incoming) {
                next[vi] += scores[graph.to_index(u)];
            }
        }

        let norm = next.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for x in &mut next {
                *x /= norm;
            }
        }

        let diff: f64 = scores.iter().zip(&next).map(|(a, b)| (a - b).abs()).sum();
        scores = next;

        if diff < threshold {
            debug!(iterations = iter + 1, "eigenvector centrality converged");
            return Ok(graph
                .node_identifiers()
                .filter_map(|idx| {
                    Some((g.player(idx)?.to_string(), scores[graph.to_index(idx)]))
                })
                .collect());
        }
    }

    Err(MetricsError::NoConvergence {
        iterations: config.max_iter,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
