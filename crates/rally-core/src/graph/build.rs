//! Who-beat-whom graph construction from match records.
//!
//! # Overview
//!
//! [`build_match_graph`] takes the records of one tournament or category and
//! a calendar year and produces a [`petgraph`] directed graph in which an
//! edge `A → B` means "A beat B" at least once in that year.
//!
//! ## Edge Direction
//!
//! Edges always point from winner to loser. Two players who beat each other
//! in the same year are connected by two edges, one in each direction.
//!
//! ## Repeated Pairings
//!
//! A second win of `A` over `B` in the same year does not add a parallel
//! edge. The existing edge is overwritten: its [`Meeting`] payload is
//! replaced with the later record's, in input order.
//!
//! ## Cache Invalidation
//!
//! The graph carries a BLAKE3 hash of its sorted edge list, so two
//! selections that produce the same graph can be recognised cheaply.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use chrono::NaiveDate;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::record::MatchRecord;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while building a [`MatchGraph`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    /// The winner is neither of the two named players, or an identifier is
    /// blank, so the edge direction is undefined.
    #[error(
        "record {index}{} names winner '{winner}' for a match between '{player_a}' and '{player_b}'",
        .line.map(|l| format!(" (line {l})")).unwrap_or_default()
    )]
    DataIntegrity {
        /// Zero-based position of the record in the builder's input.
        index: usize,
        /// Source line, when the record was loaded from a file.
        line: Option<u64>,
        player_a: String,
        player_b: String,
        winner: String,
    },
}

// ---------------------------------------------------------------------------
// MatchGraph
// ---------------------------------------------------------------------------

/// A player node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    /// Player identifier as it appears in the dataset.
    pub name: String,
    /// Best (numerically lowest) rank seen for this player across the
    /// qualifying matches, if any record carried one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_rank: Option<u32>,
}

/// Payload of a winner → loser edge: the last meeting that wrote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Meeting {
    pub date: NaiveDate,
}

/// A directed who-beat-whom graph for one selection and year.
///
/// Nodes are players; an edge `A → B` means "A beat B". Only players who
/// appeared in at least one qualifying match are present.
#[derive(Debug, Clone)]
pub struct MatchGraph {
    /// Directed graph: nodes = players, edges = winner → loser.
    pub graph: DiGraph<Player, Meeting>,
    /// Mapping from player identifier to petgraph `NodeIndex`.
    pub node_map: HashMap<String, NodeIndex>,
    /// Year the graph was built for.
    pub year: i32,
    /// BLAKE3 content hash of the sorted edge set.
    pub content_hash: String,
}

impl MatchGraph {
    /// Creates an empty graph for `year`.
    #[must_use]
    pub fn empty(year: i32) -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            year,
            content_hash: compute_edge_hash(&[]),
        }
    }

    /// Return the number of players in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of distinct winner → loser pairs in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Look up the `NodeIndex` for a player.
    #[must_use]
    pub fn node_index(&self, player: &str) -> Option<NodeIndex> {
        self.node_map.get(player).copied()
    }

    /// Return the player identifier for a node.
    #[must_use]
    pub fn player(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|p| p.name.as_str())
    }

    /// Return the best known rank for a node.
    #[must_use]
    pub fn best_rank(&self, idx: NodeIndex) -> Option<u32> {
        self.graph.node_weight(idx).and_then(|p| p.best_rank)
    }

    /// Returns `true` if `winner` beat `loser` in this graph.
    #[must_use]
    pub fn beat(&self, winner: &str, loser: &str) -> bool {
        match (self.node_index(winner), self.node_index(loser)) {
            (Some(w), Some(l)) => self.graph.contains_edge(w, l),
            _ => false,
        }
    }

    /// The meeting that wrote the `winner → loser` edge.
    #[must_use]
    pub fn meeting(&self, winner: &str, loser: &str) -> Option<Meeting> {
        let w = self.node_index(winner)?;
        let l = self.node_index(loser)?;
        let e = self.graph.find_edge(w, l)?;
        self.graph.edge_weight(e).copied()
    }

    /// Player identifiers in lexicographic order.
    #[must_use]
    pub fn players(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .graph
            .node_weights()
            .map(|p| p.name.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// `(winner, loser)` pairs in lexicographic order.
    #[must_use]
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<(&str, &str)> = self
            .graph
            .edge_references()
            .filter_map(|e| Some((self.player(e.source())?, self.player(e.target())?)))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    /// Build a graph from `(winner, loser)` pairs, all dated to Jan 1 of
    /// `year`.
    ///
    /// Intended for fixtures and for callers that already hold an edge list.
    #[must_use]
    pub fn from_edges(year: i32, edges: &[(&str, &str)]) -> Self {
        let date = NaiveDate::from_ymd_opt(year, 1, 1).unwrap_or_default();
        let mut builder = GraphBuilder::new(year);
        for (winner, loser) in edges {
            builder.insert(winner, loser, None, None, Meeting { date });
        }
        builder.finish()
    }

    /// Add an isolated player. Only useful for fixtures: graphs built from
    /// records never contain isolated players.
    pub fn add_player(&mut self, name: &str) -> NodeIndex {
        if let Some(idx) = self.node_index(name) {
            return idx;
        }
        let idx = self.graph.add_node(Player {
            name: name.to_string(),
            best_rank: None,
        });
        self.node_map.insert(name.to_string(), idx);
        idx
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Build the who-beat-whom graph for `year` from `records`.
///
/// Records whose date is missing or falls outside `year` are skipped. For
/// each remaining record the loser is whichever named player is not the
/// winner, and the edge `winner → loser` is inserted, overwriting an
/// existing edge between the same ordered pair.
///
/// Empty input, or input with no record in `year`, yields an empty graph.
///
/// # Errors
///
/// Returns [`BuildError::DataIntegrity`] for the first qualifying record
/// whose winner is neither named player or whose identifiers include a
/// blank one.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rally_core::{MatchRecord, build_match_graph};
///
/// let records = vec![
///     MatchRecord::new("A", "B", "A", NaiveDate::from_ymd_opt(2023, 1, 15)),
///     MatchRecord::new("B", "C", "C", NaiveDate::from_ymd_opt(2023, 6, 1)),
/// ];
///
/// let graph = build_match_graph(&records, 2023).unwrap();
/// assert_eq!(graph.edges(), vec![("A", "B"), ("C", "B")]);
///
/// let graph = build_match_graph(&records, 2022).unwrap();
/// assert!(graph.is_empty());
/// ```
#[instrument(skip(records))]
pub fn build_match_graph<'a, I>(records: I, year: i32) -> Result<MatchGraph, BuildError>
where
    I: IntoIterator<Item = &'a MatchRecord>,
{
    let mut builder = GraphBuilder::new(year);
    let mut skipped = 0usize;

    for (index, record) in records.into_iter().enumerate() {
        // Step 1: keep only matches dated within the target year.
        let Some(date) = record.date.filter(|_| record.year() == Some(year)) else {
            skipped += 1;
            continue;
        };

        // Step 2: resolve the loser; an unknown winner or a blank identifier
        // leaves the edge direction undefined.
        let Some(outcome) = record.outcome() else {
            return Err(BuildError::DataIntegrity {
                index,
                line: record.line,
                player_a: record.player_a.clone(),
                player_b: record.player_b.clone(),
                winner: record.winner.clone(),
            });
        };

        // Step 3: insert winner → loser, overwriting any earlier meeting.
        builder.insert(
            outcome.winner,
            outcome.loser,
            outcome.winner_rank,
            outcome.loser_rank,
            Meeting { date },
        );
    }

    let graph = builder.finish();
    debug!(
        players = graph.node_count(),
        wins = graph.edge_count(),
        skipped,
        "built match graph"
    );
    Ok(graph)
}

/// Incremental graph assembly shared by [`build_match_graph`] and
/// [`MatchGraph::from_edges`].
struct GraphBuilder {
    graph: DiGraph<Player, Meeting>,
    node_map: HashMap<String, NodeIndex>,
    year: i32,
}

impl GraphBuilder {
    fn new(year: i32) -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
            year,
        }
    }

    fn node(&mut self, name: &str, rank: Option<u32>) -> NodeIndex {
        let idx = match self.node_map.get(name) {
            Some(&idx) => idx,
            None => {
                let idx = self.graph.add_node(Player {
                    name: name.to_string(),
                    best_rank: None,
                });
                self.node_map.insert(name.to_string(), idx);
                idx
            }
        };

        if let (Some(rank), Some(player)) = (rank, self.graph.node_weight_mut(idx)) {
            player.best_rank = Some(player.best_rank.map_or(rank, |best| best.min(rank)));
        }

        idx
    }

    fn insert(
        &mut self,
        winner: &str,
        loser: &str,
        winner_rank: Option<u32>,
        loser_rank: Option<u32>,
        meeting: Meeting,
    ) -> EdgeIndex {
        let w = self.node(winner, winner_rank);
        let l = self.node(loser, loser_rank);
        // petgraph's `update_edge` overwrites the weight of an existing edge
        // instead of adding a parallel one.
        self.graph.update_edge(w, l, meeting)
    }

    fn finish(self) -> MatchGraph {
        let mut pairs: Vec<(&str, &str)> = self
            .graph
            .edge_references()
            .map(|e| {
                (
                    self.graph[e.source()].name.as_str(),
                    self.graph[e.target()].name.as_str(),
                )
            })
            .collect();
        pairs.sort_unstable();
        let content_hash = compute_edge_hash(&pairs);

        MatchGraph {
            graph: self.graph,
            node_map: self.node_map,
            year: self.year,
            content_hash,
        }
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Compute a BLAKE3 hash of a sorted edge list.
fn compute_edge_hash(edges: &[(&str, &str)]) -> String {
    let mut hasher = blake3::Hasher::new();
    for (winner, loser) in edges {
        hasher.update(winner.as_bytes());
        hasher.update(b"\x00");
        hasher.update(loser.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
