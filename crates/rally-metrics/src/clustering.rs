//! Clustering coefficients.
//!
//! Local clustering follows Fagiolo's directed formulation: for player `i`
//! with `d` distinct neighbours (in + out) of which `b` are reciprocated,
//!
//! ```text
//! c(i) = T(i) / (2 * (d(d - 1) - 2b))
//! ```
//!
//! where `T(i)` counts directed triangles through `i`. A transitive triple
//! `A → B, B → C, A → C` gives every member 0.5; a fully reciprocated
//! triangle gives 1.0.
//!
//! Transitivity is computed on the undirected projection.
//!
//! Within a single knockout draw both measures are 0: a player eliminated
//! earlier never meets a later opponent of their conqueror.

use std::collections::{BTreeSet, HashMap};

use petgraph::{Direction, visit::IntoNodeIdentifiers};
use rally_core::MatchGraph;
use tracing::instrument;

/// Predecessor and successor sets per node, self-loops removed.
struct Neighbourhoods {
    preds: Vec<BTreeSet<usize>>,
    succs: Vec<BTreeSet<usize>>,
}

impl Neighbourhoods {
    fn new(g: &MatchGraph) -> Self {
        let graph = &g.graph;
        let n = graph.node_count();
        let mut preds = vec![BTreeSet::new(); n];
        let mut succs = vec![BTreeSet::new(); n];
        for idx in graph.node_identifiers() {
            let i = idx.index();
            preds[i] = graph
                .neighbors_directed(idx, Direction::Incoming)
                .map(|p| p.index())
                .filter(|&p| p != i)
                .collect();
            succs[i] = graph
                .neighbors_directed(idx, Direction::Outgoing)
                .map(|s| s.index())
                .filter(|&s| s != i)
                .collect();
        }
        Self { preds, succs }
    }

    #[allow(clippy::cast_precision_loss)]
    fn local(&self, i: usize) -> f64 {
        let (ip, is) = (&self.preds[i], &self.succs[i]);
        let shared = |a: &BTreeSet<usize>, b: &BTreeSet<usize>| a.intersection(b).count();

        let triangles: usize = ip
            .iter()
            .chain(is.iter())
            .map(|&j| {
                let (jp, js) = (&self.preds[j], &self.succs[j]);
                shared(ip, jp) + shared(ip, js) + shared(is, jp) + shared(is, js)
            })
            .sum();

        if triangles == 0 {
            return 0.0;
        }
        let total = ip.len() + is.len();
        let reciprocal = shared(ip, is);
        let possible = 2 * (total * (total - 1) - 2 * reciprocal);
        triangles as f64 / possible as f64
    }
}

/// Local clustering coefficient of every player.
#[must_use]
#[instrument(skip(g))]
pub fn local_clustering(g: &MatchGraph) -> HashMap<String, f64> {
    let hoods = Neighbourhoods::new(g);
    g.graph
        .node_identifiers()
        .filter_map(|idx| Some((g.player(idx)?.to_string(), hoods.local(idx.index()))))
        .collect()
}

/// Local clustering of the named players, in the order given. Unknown
/// players map to `None`.
#[must_use]
pub fn clustering_of(g: &MatchGraph, players: &[String]) -> Vec<(String, Option<f64>)> {
    let hoods = Neighbourhoods::new(g);
    players
        .iter()
        .map(|p| (p.clone(), g.node_index(p).map(|idx| hoods.local(idx.index()))))
        .collect()
}

/// Mean local clustering over all players, zeros included. `None` for an
/// empty graph.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn average_clustering(g: &MatchGraph) -> Option<f64> {
    let n = g.node_count();
    if n == 0 {
        return None;
    }
    let hoods = Neighbourhoods::new(g);
    let sum: f64 = (0..n).map(|i| hoods.local(i)).sum();
    Some(sum / n as f64)
}

/// Fraction of connected triples of the undirected projection that close
/// into triangles. Zero when there are no triples.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn transitivity(g: &MatchGraph) -> f64 {
    let hoods = Neighbourhoods::new(g);
    let n = g.node_count();
    let undirected: Vec<BTreeSet<usize>> = (0..n)
        .map(|i| hoods.preds[i].union(&hoods.succs[i]).copied().collect())
        .collect();

    let mut closed = 0usize;
    let mut triples = 0usize;
    for nbrs in &undirected {
        let d = nbrs.len();
        triples += d * d.saturating_sub(1) / 2;
        for &u in nbrs {
            closed += nbrs.iter().filter(|&&w| w > u && undirected[u].contains(&w)).count();
        }
    }

    if triples == 0 {
        return 0.0;
    }
    closed as f64 / triples as f64
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
