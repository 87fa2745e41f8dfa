//! Closeness centrality on incoming distances.
//!
//! For a directed graph the closeness of `u` is computed from the distances
//! of every player that can reach `u` (BFS on the reversed graph). With `r`
//! the number of such players and `s` the sum of their distances,
//!
//! ```text
//! closeness(u) = (r / s) * (r / (n - 1))
//! ```
//!
//! The second factor is the Wasserman–Faust correction, which scales down
//! players reachable only from a small part of the field. Players nobody
//! reaches score 0.

use std::collections::{HashMap, VecDeque};

use petgraph::{Direction, graph::NodeIndex, visit::IntoNodeIdentifiers};
use rally_core::MatchGraph;
use tracing::instrument;

/// Closeness centrality of every player.
#[must_use]
#[instrument(skip(g))]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_centrality(g: &MatchGraph) -> HashMap<String, f64> {
    let graph = &g.graph;
    let n = graph.node_count();
    let mut result = HashMap::with_capacity(n);

    for target in graph.node_identifiers() {
        let (reached, total) = incoming_distances(g, target);
        let score = if total > 0 && n > 1 {
            let r = reached as f64;
            (r / total as f64) * (r / (n - 1) as f64)
        } else {
            0.0
        };
        if let Some(name) = g.player(target) {
            result.insert(name.to_string(), score);
        }
    }

    result
}

/// Number of other nodes that reach `target`, and the sum of their
/// distances to it.
fn incoming_distances(g: &MatchGraph, target: NodeIndex) -> (usize, usize) {
    let graph = &g.graph;
    let mut dist: Vec<Option<usize>> = vec![None; graph.node_count()];
    dist[target.index()] = Some(0);

    let mut queue: VecDeque<(NodeIndex, usize)> = VecDeque::new();
    queue.push_back((target, 0));

    let (mut reached, mut total) = (0usize, 0usize);
    while let Some((v, d)) = queue.pop_front() {
        for u in graph.neighbors_directed(v, Direction::Incoming) {
            if dist[u.index()].is_none() {
                dist[u.index()] = Some(d + 1);
                reached += 1;
                total += d + 1;
                queue.push_back((u, d + 1));
            }
        }
    }

    (reached, total)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{graph, graph_with_isolated};

    #[test]
    fn empty_graph_returns_empty() {
        assert!(closeness_centrality(&MatchGraph::empty(2023)).is_empty());
    }

    #[test]
    fn isolated_player_scores_zero() {
        let cc = closeness_centrality(&graph_with_isolated(&["A"], &[]));
        assert!((cc["A"] - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn chain_rewards_later_losers() {
        // A → B → C. C is reached by B (1) and A (2): (2/3) * (2/2) = 2/3.
        // B is reached by A (1): (1/1) * (1/2) = 1/2. A is reached by no one.
        let cc = closeness_centrality(&graph(&[("A", "B"), ("B", "C")]));
        assert!((cc["A"] - 0.0).abs() < 1e-10);
        assert!((cc["B"] - 0.5).abs() < 1e-10, "B: {}", cc["B"]);
        assert!((cc["C"] - 2.0 / 3.0).abs() < 1e-10, "C: {}", cc["C"]);
    }

    #[test]
    fn directed_cycle_is_uniform() {
        // Each player is reached by the other two at distances 1 and 2:
        // (2/3) * (2/2) = 2/3.
        let cc = closeness_centrality(&graph(&[("A", "B"), ("B", "C"), ("C", "A")]));
        for player in ["A", "B", "C"] {
            assert!((cc[player] - 2.0 / 3.0).abs() < 1e-10, "{player}: {}", cc[player]);
        }
    }

    #[test]
    fn wasserman_faust_scales_partial_reach() {
        // A → B and C → D: B reached by A only, (1/1) * (1/3) = 1/3.
        let cc = closeness_centrality(&graph(&[("A", "B"), ("C", "D")]));
        assert!((cc["B"] - 1.0 / 3.0).abs() < 1e-10, "B: {}", cc["B"]);
        assert!((cc["D"] - 1.0 / 3.0).abs() < 1e-10);
    }
}
