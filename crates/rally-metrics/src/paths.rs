//! Eccentricity, diameter and periphery.
//!
//! Directed distances are only finite between players of the same strongly
//! connected component, so path measures are computed per component, for
//! every component with more than one player. Within such a component the
//! eccentricity of a player is the longest shortest path *from* it to any
//! other member (following wins).
//!
//! A single knockout draw is acyclic and therefore has no such component.

use std::collections::{BTreeMap, VecDeque};

use petgraph::{Direction, graph::NodeIndex};
use rally_core::MatchGraph;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::components::strong_component_indices;

/// Path measures for one strongly connected component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentPaths {
    /// Members, sorted by name.
    pub members: Vec<String>,
    /// Maximum eccentricity.
    pub diameter: usize,
    /// Minimum eccentricity.
    pub radius: usize,
    /// Members whose eccentricity equals the radius.
    pub center: Vec<String>,
    /// Members whose eccentricity equals the diameter.
    pub periphery: Vec<String>,
    pub eccentricity: BTreeMap<String, usize>,
}

/// Path measures for every strongly connected component of `g` with more
/// than one player, largest first.
///
/// Returns an empty list when the graph has no such component.
#[must_use]
#[instrument(skip(g))]
pub fn component_paths(g: &MatchGraph) -> Vec<ComponentPaths> {
    let mut in_component = vec![false; g.node_count()];
    let mut out = Vec::new();

    for members in strong_component_indices(g) {
        if members.len() < 2 {
            continue;
        }

        for &m in &members {
            in_component[m.index()] = true;
        }

        let eccentricity: Vec<(NodeIndex, usize)> = members
            .iter()
            .map(|&source| (source, eccentricity_from(g, source, &in_component)))
            .collect();

        for &m in &members {
            in_component[m.index()] = false;
        }

        out.push(summarize(g, &members, &eccentricity));
    }

    debug!(components = out.len(), "path measures computed");
    out
}

/// Longest BFS distance from `source` to any node marked in `in_component`.
fn eccentricity_from(g: &MatchGraph, source: NodeIndex, in_component: &[bool]) -> usize {
    let mut dist: Vec<Option<usize>> = vec![None; g.node_count()];
    dist[source.index()] = Some(0);

    let mut queue = VecDeque::new();
    queue.push_back((source, 0usize));
    let mut farthest = 0;

    while let Some((v, d)) = queue.pop_front() {
        farthest = farthest.max(d);
        for w in g.graph.neighbors_directed(v, Direction::Outgoing) {
            let wi = w.index();
            if in_component[wi] && dist[wi].is_none() {
                dist[wi] = Some(d + 1);
                queue.push_back((w, d + 1));
            }
        }
    }

    farthest
}

fn summarize(g: &MatchGraph, members: &[NodeIndex], ecc: &[(NodeIndex, usize)]) -> ComponentPaths {
    let name = |idx: NodeIndex| g.player(idx).unwrap_or_default().to_string();

    let diameter = ecc.iter().map(|&(_, e)| e).max().unwrap_or(0);
    let radius = ecc.iter().map(|&(_, e)| e).min().unwrap_or(0);

    let with_ecc = |target: usize| -> Vec<String> {
        ecc.iter()
            .filter(|&&(_, e)| e == target)
            .map(|&(idx, _)| name(idx))
            .collect()
    };

    ComponentPaths {
        members: members.iter().map(|&idx| name(idx)).collect(),
        diameter,
        radius,
        center: with_ecc(radius),
        periphery: with_ecc(diameter),
        eccentricity: ecc.iter().map(|&(idx, e)| (name(idx), e)).collect(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
