//! Degree sequences, degree centrality and degree histograms.
//!
//! In a match graph the out-degree of a player is the number of distinct
//! opponents they beat, the in-degree the number of distinct opponents they
//! lost to.

use std::collections::HashMap;

use petgraph::{Direction, visit::IntoNodeIdentifiers};
use rally_core::MatchGraph;
use serde::Serialize;
use tracing::instrument;

// ---------------------------------------------------------------------------
// Degree Centrality
// ---------------------------------------------------------------------------

/// Per-player degree counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DegreeCentrality {
    /// Distinct opponents lost to.
    pub in_degree: HashMap<String, usize>,
    /// Distinct opponents beaten.
    pub out_degree: HashMap<String, usize>,
    /// `in + out`.
    pub total_degree: HashMap<String, usize>,
}

/// Compute in/out/total degree for every player.
#[must_use]
#[instrument(skip(g))]
pub fn degree_centrality(g: &MatchGraph) -> DegreeCentrality {
    let graph = &g.graph;
    let mut dc = DegreeCentrality::default();

    for idx in graph.node_identifiers() {
        let Some(name) = g.player(idx) else { continue };
        let in_d = graph.neighbors_directed(idx, Direction::Incoming).count();
        let out_d = graph.neighbors_directed(idx, Direction::Outgoing).count();
        dc.in_degree.insert(name.to_string(), in_d);
        dc.out_degree.insert(name.to_string(), out_d);
        dc.total_degree.insert(name.to_string(), in_d + out_d);
    }

    dc
}

/// Which degree a normalized score or histogram is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegreeKind {
    In,
    Out,
    Total,
}

impl DegreeCentrality {
    fn of(&self, kind: DegreeKind) -> &HashMap<String, usize> {
        match kind {
            DegreeKind::In => &self.in_degree,
            DegreeKind::Out => &self.out_degree,
            DegreeKind::Total => &self.total_degree,
        }
    }

    /// Degree divided by `n - 1`. A player who met everyone once scores 1.0
    /// on total degree. A lone player scores 1.0, as networkx does.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn normalized(&self, kind: DegreeKind) -> HashMap<String, f64> {
        let n = self.total_degree.len();
        if n < 2 {
            return self.of(kind).keys().map(|k| (k.clone(), 1.0)).collect();
        }
        let scale = 1.0 / (n - 1) as f64;
        self.of(kind)
            .iter()
            .map(|(k, &d)| (k.clone(), d as f64 * scale))
            .collect()
    }

    /// `hist[k]` = number of players with degree `k`.
    #[must_use]
    pub fn histogram(&self, kind: DegreeKind) -> Vec<usize> {
        let degrees = self.of(kind);
        let max = degrees.values().copied().max();
        let mut hist = vec![0; max.map_or(0, |m| m + 1)];
        for &d in degrees.values() {
            hist[d] += 1;
        }
        hist
    }
}

/// Degree histograms of one graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeHistograms {
    pub in_degree: Vec<usize>,
    pub out_degree: Vec<usize>,
    pub total_degree: Vec<usize>,
}

/// In-, out- and total-degree histograms of `g`.
#[must_use]
pub fn degree_histograms(g: &MatchGraph) -> DegreeHistograms {
    let dc = degree_centrality(g);
    DegreeHistograms {
        in_degree: dc.histogram(DegreeKind::In),
        out_degree: dc.histogram(DegreeKind::Out),
        total_degree: dc.histogram(DegreeKind::Total),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
