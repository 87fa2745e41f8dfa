//! Strongly and weakly connected components.
//!
//! Components are returned as player-name lists. Members are sorted
//! lexicographically and components are ordered by size descending, ties
//! broken by their first member, so output is stable across runs.

use petgraph::{Direction, algo::tarjan_scc, graph::NodeIndex, visit::IntoNodeIdentifiers};
use rally_core::MatchGraph;
use tracing::instrument;

/// Strongly connected components of `g` (petgraph's Tarjan).
#[must_use]
#[instrument(skip(g))]
pub fn strongly_connected_components(g: &MatchGraph) -> Vec<Vec<String>> {
    named(g, strong_component_indices(g))
}

/// Weakly connected components of `g` (edges treated as undirected).
#[must_use]
#[instrument(skip(g))]
pub fn weakly_connected_components(g: &MatchGraph) -> Vec<Vec<String>> {
    named(g, weak_component_indices(g))
}

/// Strongly connected components as node indices, in output order.
pub(crate) fn strong_component_indices(g: &MatchGraph) -> Vec<Vec<NodeIndex>> {
    let mut components = tarjan_scc(&g.graph);
    order(g, &mut components);
    components
}

/// Weakly connected components as node indices, in output order.
pub(crate) fn weak_component_indices(g: &MatchGraph) -> Vec<Vec<NodeIndex>> {
    let graph = &g.graph;
    let mut visited = vec![false; graph.node_count()];
    let mut components = Vec::new();

    for start in graph.node_identifiers() {
        if visited[start.index()] {
            continue;
        }

        // DFS from start, following edges in both directions.
        let mut stack = vec![start];
        let mut members = Vec::new();

        while let Some(node) = stack.pop() {
            if visited[node.index()] {
                continue;
            }
            visited[node.index()] = true;
            members.push(node);

            for dir in [Direction::Outgoing, Direction::Incoming] {
                for neighbor in graph.neighbors_directed(node, dir) {
                    if !visited[neighbor.index()] {
                        stack.push(neighbor);
                    }
                }
            }
        }

        components.push(members);
    }

    order(g, &mut components);
    components
}

/// Sort members by name, then components by size descending.
fn order(g: &MatchGraph, components: &mut [Vec<NodeIndex>]) {
    let name = |idx: &NodeIndex| g.player(*idx).unwrap_or_default();
    for members in components.iter_mut() {
        members.sort_by(|a, b| name(a).cmp(&name(b)));
    }
    components.sort_by(|a, b| {
        b.len()
            .cmp(&a.len())
            .then_with(|| a.first().map(name).cmp(&b.first().map(name)))
    });
}

fn named(g: &MatchGraph, components: Vec<Vec<NodeIndex>>) -> Vec<Vec<String>> {
    components
        .into_iter()
        .map(|members| {
            members
                .into_iter()
                .filter_map(|idx| g.player(idx).map(str::to_string))
                .collect()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{graph, graph_with_isolated};

    fn names(components: &[Vec<String>]) -> Vec<Vec<&str>> {
        components
            .iter()
            .map(|c| c.iter().map(String::as_str).collect())
            .collect()
    }

    #[test]
    fn empty_graph_has_no_components() {
        let g = MatchGraph::empty(2023);
        assert!(strongly_connected_components(&g).is_empty());
        assert!(weakly_connected_components(&g).is_empty());
    }

    #[test]
    fn chain_has_singleton_sccs() {
        let g = graph(&[("A", "B"), ("B", "C")]);
        assert_eq!(
            names(&strongly_connected_components(&g)),
            vec![vec!["A"], vec!["B"], vec!["C"]]
        );
        assert_eq!(names(&weakly_connected_components(&g)), vec![vec!["A", "B", "C"]]);
    }

    #[test]
    fn cycle_is_one_scc() {
        // A → B → C → A, plus C → D
        let g = graph(&[("A", "B"), ("B", "C"), ("C", "A"), ("C", "D")]);
        assert_eq!(
            names(&strongly_connected_components(&g)),
            vec![vec!["A", "B", "C"], vec!["D"]]
        );
    }

    #[test]
    fn split_head_to_head_is_an_scc() {
        let g = graph(&[("A", "B"), ("B", "A")]);
        assert_eq!(names(&strongly_connected_components(&g)), vec![vec!["A", "B"]]);
    }

    #[test]
    fn disjoint_pairs_sorted_by_size_then_name() {
        let g = graph_with_isolated(&["Z"], &[("C", "D"), ("A", "B"), ("E", "F"), ("F", "G")]);
        assert_eq!(
            names(&weakly_connected_components(&g)),
            vec![vec!["E", "F", "G"], vec!["A", "B"], vec!["C", "D"], vec!["Z"]]
        );
    }
}
