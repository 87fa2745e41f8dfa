//! Adjacency matrix of a match graph.
//!
//! Rows are winners and columns losers: `m[(i, j)] == 1.0` when player `i`
//! beat player `j`. Players are ordered by name. Large draws can be cut
//! down to the `top` players by total degree, which yields the adjacency
//! matrix of the induced subgraph.

use nalgebra::DMatrix;
use petgraph::visit::EdgeRef;
use rally_core::MatchGraph;
use tracing::instrument;

use crate::degree::degree_centrality;

/// A labelled adjacency matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct AdjacencyMatrix {
    /// Row and column labels, sorted.
    pub players: Vec<String>,
    pub matrix: DMatrix<f64>,
}

impl AdjacencyMatrix {
    /// Build the matrix of `g`, restricted to the `top` players by total
    /// degree when given.
    #[must_use]
    #[instrument(skip(g))]
    pub fn from_graph(g: &MatchGraph, top: Option<usize>) -> Self {
        let players = select_players(g, top);
        let n = players.len();

        // Graph node index → matrix position, for the selected players.
        let mut position = vec![None; g.node_count()];
        for (i, name) in players.iter().enumerate() {
            if let Some(idx) = g.node_index(name) {
                position[idx.index()] = Some(i);
            }
        }

        let mut matrix = DMatrix::<f64>::zeros(n, n);
        for edge in g.graph.edge_references() {
            if let (Some(i), Some(j)) = (
                position[edge.source().index()],
                position[edge.target().index()],
            ) {
                matrix[(i, j)] = 1.0;
            }
        }

        Self { players, matrix }
    }

    /// Row-major 0/1 cells.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.matrix
            .row_iter()
            .map(|row| row.iter().map(|&v| u8::from(v > 0.0)).collect())
            .collect()
    }
}

/// Sorted player names, optionally only the `top` by total degree.
fn select_players(g: &MatchGraph, top: Option<usize>) -> Vec<String> {
    let mut players: Vec<String> = match top {
        None => g.players().into_iter().map(str::to_string).collect(),
        Some(n) => {
            let dc = degree_centrality(g);
            let mut by_degree: Vec<(&String, usize)> =
                dc.total_degree.iter().map(|(k, &d)| (k, d)).collect();
            by_degree.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
            by_degree
                .into_iter()
                .take(n)
                .map(|(name, _)| name.clone())
                .collect()
        }
    };
    players.sort_unstable();
    players
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
