//! Basic graph statistics for a match graph.
//!
//! # Statistics Provided
//!
//! - **node_count**: Number of players.
//! - **edge_count**: Number of distinct winner → loser pairs.
//! - **density**: Ratio of actual edges to maximum possible edges for a
//!   directed graph: `density = edge_count / (node_count * (node_count - 1))`.
//!   An empty or single-player graph has density 0.0.
//! - **scc_count**: Number of strongly connected components. In a single
//!   knockout draw every player is its own component.
//! - **cyclic_component_count**: Number of SCCs with more than one player
//!   (groups in which everyone can reach everyone through wins).
//! - **weak_component_count**: Number of weakly connected components.
//! - **isolated_node_count**: Players with no wins and no losses.
//! - **max_in_degree** / **max_out_degree**: Most distinct opponents lost
//!   to / beaten by a single player.

use petgraph::{Direction, graph::NodeIndex, visit::IntoNodeIdentifiers};
use rally_core::MatchGraph;
use serde::Serialize;
use tracing::instrument;

use crate::components::{strongly_connected_components, weakly_connected_components};

// ---------------------------------------------------------------------------
// GraphStats
// ---------------------------------------------------------------------------

/// Summary statistics for a match graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// `edge_count / (node_count * (node_count - 1))`, zero below two players.
    pub density: f64,
    pub scc_count: usize,
    pub cyclic_component_count: usize,
    pub weak_component_count: usize,
    /// Size of the largest strongly connected component.
    pub largest_scc: usize,
    /// Size of the largest weakly connected component.
    pub largest_wcc: usize,
    pub isolated_node_count: usize,
    pub max_in_degree: usize,
    pub max_out_degree: usize,
    pub self_loop_count: usize,
}

impl GraphStats {
    /// Compute statistics for `g`.
    #[must_use]
    #[instrument(skip(g), fields(year = g.year))]
    pub fn from_graph(g: &MatchGraph) -> Self {
        let graph = &g.graph;
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();

        let strong = strongly_connected_components(g);
        let weak = weakly_connected_components(g);

        let degree = |idx: NodeIndex, dir: Direction| graph.neighbors_directed(idx, dir).count();

        let isolated_node_count = graph
            .node_identifiers()
            .filter(|&idx| graph.neighbors_undirected(idx).next().is_none())
            .count();

        let max_in_degree = graph
            .node_identifiers()
            .map(|idx| degree(idx, Direction::Incoming))
            .max()
            .unwrap_or(0);

        let max_out_degree = graph
            .node_identifiers()
            .map(|idx| degree(idx, Direction::Outgoing))
            .max()
            .unwrap_or(0);

        let self_loop_count = graph
            .edge_indices()
            .filter_map(|e| graph.edge_endpoints(e))
            .filter(|(a, b)| a == b)
            .count();

        Self {
            node_count,
            edge_count,
            density: compute_density(node_count, edge_count),
            scc_count: strong.len(),
            cyclic_component_count: strong.iter().filter(|c| c.len() > 1).count(),
            weak_component_count: weak.len(),
            largest_scc: strong.first().map_or(0, Vec::len),
            largest_wcc: weak.first().map_or(0, Vec::len),
            isolated_node_count,
            max_in_degree,
            max_out_degree,
            self_loop_count,
        }
    }
}

/// Directed graph density. Zero for fewer than two nodes.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    let max_edges = (node_count * (node_count - 1)) as f64;
    edge_count as f64 / max_edges
}

/// Directed density of `g`.
#[must_use]
pub fn density(g: &MatchGraph) -> f64 {
    compute_density(g.node_count(), g.edge_count())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{graph, graph_with_isolated};

    #[test]
    fn empty_graph() {
        let stats = GraphStats::from_graph(&MatchGraph::empty(2023));
        assert_eq!(stats.node_count, 0);
        assert_eq!(stats.edge_count, 0);
        assert!((stats.density - 0.0).abs() < f64::EPSILON);
        assert_eq!(stats.scc_count, 0);
        assert_eq!(stats.weak_component_count, 0);
        assert_eq!(stats.largest_scc, 0);
        assert_eq!(stats.largest_wcc, 0);
        assert_eq!(stats.max_in_degree, 0);
    }

    #[test]
    fn single_match() {
        let stats = GraphStats::from_graph(&graph(&[("A", "B")]));
        assert_eq!(stats.node_count, 2);
        assert_eq!(stats.edge_count, 1);
        assert!((stats.density - 0.5).abs() < 1e-10);
        assert_eq!(stats.scc_count, 2);
        assert_eq!(stats.cyclic_component_count, 0);
        assert_eq!(stats.weak_component_count, 1);
    }

    #[test]
    fn knockout_draw_is_acyclic() {
        // Quarter-final bracket: A beat B, C beat D, A beat C.
        let stats = GraphStats::from_graph(&graph(&[("A", "B"), ("C", "D"), ("A", "C")]));
        assert_eq!(stats.scc_count, 4);
        assert_eq!(stats.cyclic_component_count, 0);
        assert_eq!(stats.largest_scc, 1);
        assert_eq!(stats.largest_wcc, 4);
        assert_eq!(stats.max_out_degree, 2);
        assert_eq!(stats.max_in_degree, 1);
    }

    #[test]
    fn win_cycle_forms_one_component() {
        let stats = GraphStats::from_graph(&graph(&[("A", "B"), ("B", "C"), ("C", "A")]));
        assert_eq!(stats.scc_count, 1);
        assert_eq!(stats.cyclic_component_count, 1);
        assert_eq!(stats.largest_scc, 3);
        assert!((stats.density - 0.5).abs() < 1e-10);
    }

    #[test]
    fn isolated_players_are_counted() {
        let stats = GraphStats::from_graph(&graph_with_isolated(&["X", "Y"], &[("A", "B")]));
        assert_eq!(stats.isolated_node_count, 2);
        assert_eq!(stats.weak_component_count, 3);
        assert_eq!(stats.largest_wcc, 2);
    }

    #[test]
    fn weak_count_agrees_with_component_list() {
        let g = graph_with_isolated(&["Z"], &[("A", "B"), ("B", "A"), ("C", "D"), ("D", "E")]);
        let stats = GraphStats::from_graph(&g);
        let weak = weakly_connected_components(&g);
        assert_eq!(stats.weak_component_count, weak.len());
        assert_eq!(stats.weak_component_count, 3);
        assert_eq!(stats.largest_wcc, 3);
    }

    #[test]
    fn self_loops_are_counted() {
        let stats = GraphStats::from_graph(&graph(&[("A", "A"), ("A", "B")]));
        assert_eq!(stats.self_loop_count, 1);
    }

    #[test]
    fn density_formula() {
        assert!((compute_density(0, 0) - 0.0).abs() < f64::EPSILON);
        assert!((compute_density(1, 0) - 0.0).abs() < f64::EPSILON);
        assert!((compute_density(4, 6) - 0.5).abs() < 1e-10);
        assert!((compute_density(3, 6) - 1.0).abs() < 1e-10);
    }
}
