//! Assortativity: do players tend to beat players like themselves?
//!
//! - [`rank_group_assortativity`] buckets players by best rank and computes
//!   Newman's attribute assortativity coefficient over the edges.
//! - [`degree_assortativity`] is the Pearson correlation, over edges, of the
//!   winner's out-degree and the loser's in-degree.
//!
//! Both return `None` when the coefficient is undefined (no edges, or a
//! zero denominator, e.g. every player in the same group).

use std::fmt;

use petgraph::{Direction, visit::EdgeRef};
use rally_core::MatchGraph;
use serde::Serialize;
use tracing::instrument;

/// Ranking bracket a player falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RankGroup {
    #[serde(rename = "1-50")]
    Top50,
    #[serde(rename = "51-100")]
    Top100,
    #[serde(rename = "101-150")]
    Top150,
    /// Ranked below 150, or unranked.
    #[serde(rename = "151+")]
    Rest,
}

impl RankGroup {
    pub const ALL: [Self; 4] = [Self::Top50, Self::Top100, Self::Top150, Self::Rest];

    #[must_use]
    pub const fn of(rank: Option<u32>) -> Self {
        match rank {
            Some(1..=50) => Self::Top50,
            Some(51..=100) => Self::Top100,
            Some(101..=150) => Self::Top150,
            _ => Self::Rest,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Self::Top50 => 0,
            Self::Top100 => 1,
            Self::Top150 => 2,
            Self::Rest => 3,
        }
    }
}

impl fmt::Display for RankGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Top50 => "1-50",
            Self::Top100 => "51-100",
            Self::Top150 => "101-150",
            Self::Rest => "151+",
        })
    }
}

/// Newman's attribute assortativity over [`RankGroup`]s.
///
/// With `e[i][j]` the fraction of edges from group `i` to group `j`,
/// `a` and `b` its row and column sums, `r = (tr(e) - Σ a·b) / (1 - Σ a·b)`.
#[must_use]
#[instrument(skip(g))]
#[allow(clippy::cast_precision_loss)]
pub fn rank_group_assortativity(g: &MatchGraph) -> Option<f64> {
    const K: usize = RankGroup::ALL.len();

    let m = g.edge_count();
    if m == 0 {
        return None;
    }

    let group = |idx| RankGroup::of(g.best_rank(idx)).slot();

    let mut mix = [[0.0f64; K]; K];
    for edge in g.graph.edge_references() {
        mix[group(edge.source())][group(edge.target())] += 1.0;
    }
    let total = m as f64;
    for row in &mut mix {
        for cell in row.iter_mut() {
            *cell /= total;
        }
    }

    let trace: f64 = (0..K).map(|i| mix[i][i]).sum();
    let ab: f64 = (0..K)
        .map(|i| {
            let a: f64 = mix[i].iter().sum();
            let b: f64 = mix.iter().map(|row| row[i]).sum();
            a * b
        })
        .sum();

    let denom = 1.0 - ab;
    if denom.abs() < f64::EPSILON {
        return None;
    }
    Some((trace - ab) / denom)
}

/// Pearson correlation of (winner out-degree, loser in-degree) over edges.
#[must_use]
#[instrument(skip(g))]
#[allow(clippy::cast_precision_loss)]
pub fn degree_assortativity(g: &MatchGraph) -> Option<f64> {
    let graph = &g.graph;
    let pairs: Vec<(f64, f64)> = graph
        .edge_references()
        .map(|e| {
            let out = graph.neighbors_directed(e.source(), Direction::Outgoing).count();
            let inc = graph.neighbors_directed(e.target(), Direction::Incoming).count();
            (out as f64, inc as f64)
        })
        .collect();
    pearson(&pairs)
}

/// Pearson correlation coefficient; `None` for fewer than two pairs or zero
/// variance on either side.
#[allow(clippy::cast_precision_loss)]
fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom < 1e-12 {
        return None;
    }
    Some(cov / denom)
}
