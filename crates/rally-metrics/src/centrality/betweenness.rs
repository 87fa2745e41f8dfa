//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness measures how often a player lies on shortest win-chains
//! between two other players. In a single knockout draw the finalists and
//! semi-finalists carry the most betweenness: every chain from the champion
//! to an early loser passes through them.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted directed graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! Complexity: O(V * E).
//!
//! # Output
//!
//! Scores are normalized by `1 / ((n - 1)(n - 2))` for `n > 2`, so they lie
//! in `[0, 1]`. Graphs with two or fewer players score 0 throughout.

use std::collections::{HashMap, VecDeque};

use petgraph::{
    Direction,
    graph::NodeIndex,
    visit::{IntoNodeIdentifiers, NodeIndexable},
};
use rally_core::MatchGraph;
use tracing::instrument;

/// Normalized betweenness centrality of every player.
#[must_use]
#[instrument(skip(g))]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(g: &MatchGraph) -> HashMap<String, f64> {
    let raw = brandes(g);
    let n = raw.len();
    let scale = if n > 2 {
        1.0 / ((n - 1) * (n - 2)) as f64
    } else {
        1.0
    };

    g.graph
        .node_identifiers()
        .filter_map(|idx| Some((g.player(idx)?.to_string(), raw[idx.index()] * scale)))
        .collect()
}

/// Unnormalized Brandes betweenness, indexed by node index.
fn brandes(g: &MatchGraph) -> Vec<f64> {
    let graph = &g.graph;
    let n = graph.node_count();

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    for s in graph.node_identifiers() {
        let si = graph.to_index(s);

        // Nodes in order of discovery (farthest popped first).
        let mut stack: Vec<NodeIndex> = Vec::with_capacity(n);

        // predecessors[w]: nodes immediately preceding w on shortest paths
        // from s.
        let mut predecessors: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];

        // sigma[t]: number of shortest paths from s to t.
        let mut sigma: Vec<f64> = vec![0.0; n];
        sigma[si] = 1.0;

        // dist[t]: distance from s to t (-1 = unvisited).
        let mut dist: Vec<i64> = vec![-1; n];
        dist[si] = 0;

        let mut queue: VecDeque<NodeIndex> = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            let vi = graph.to_index(v);
            stack.push(v);

            for w in graph.neighbors_directed(v, Direction::Outgoing) {
                let wi = graph.to_index(w);

                if dist[wi] < 0 {
                    dist[wi] = dist[vi] + 1;
                    queue.push_back(w);
                }

                if dist[wi] == dist[vi] + 1 {
                    sigma[wi] += sigma[vi];
                    predecessors[wi].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        let mut delta: Vec<f64> = vec![0.0; n];

        while let Some(w) = stack.pop() {
            let wi = graph.to_index(w);

            for &v in &predecessors[wi] {
                let vi = graph.to_index(v);
                if sigma[wi] > 0.0 {
                    delta[vi] += (sigma[vi] / sigma[wi]) * (1.0 + delta[wi]);
                }
            }

            if wi != si {
                cb[wi] += delta[wi];
            }
        }
    }

    cb
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
