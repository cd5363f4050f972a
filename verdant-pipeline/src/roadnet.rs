//! Contract for the downstream road-network capability: scored points are
//! joined onto the nearest network edges. The spatial index itself lives
//! behind the trait; only the lookup discipline is defined here.

use anyhow::Result;
use hashbrown::HashSet;
use log::warn;
use verdant_imagery::Coordinate;

pub type NodeId = u64;

/// An edge as an ordered (node, node) pair.
pub type Edge = (NodeId, NodeId);

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeAttributes {
    pub geometry: Option<Vec<Coordinate>>,
    pub name: Option<String>,
}

pub trait RoadNetwork {
    /// Nearest edge per query coordinate, in query order. May return the
    /// same edge for several nearby coordinates.
    fn nearest_edges(&self, coordinates: &[Coordinate]) -> Result<Vec<Edge>>;

    fn edge_attributes(&self, edge: Edge) -> Option<EdgeAttributes>;
}

/// Drops repeated edges while keeping first-seen order, so a run of
/// samples along one street maps to that street once.
pub fn dedup_edges(edges: Vec<Edge>) -> Vec<Edge> {
    let mut seen = HashSet::new();
    edges.into_iter().filter(|edge| seen.insert(*edge)).collect()
}

/// Nearest-edge lookup plus de-duplication. A failed lookup yields an
/// empty list rather than an error; the join simply finds no edges.
pub fn nearest_unique_edges<N: RoadNetwork>(
    network: &N,
    coordinates: &[Coordinate],
) -> Vec<Edge> {
    match network.nearest_edges(coordinates) {
        Ok(edges) => dedup_edges(edges),
        Err(err) => {
            warn!("nearest-edge lookup failed: {err:#}");
            Vec::new()
        }
    }
}

/// Geometry and name of the first edge in the list, `(None, None)` when
/// the list is empty or the network has no data for that edge.
pub fn extract_edge_data<N: RoadNetwork>(
    edges: &[Edge],
    network: &N,
) -> (Option<Vec<Coordinate>>, Option<String>) {
    let Some(&edge) = edges.first() else {
        return (None, None);
    };
    match network.edge_attributes(edge) {
        Some(attributes) => (attributes.geometry, attributes.name),
        None => (None, None),
    }
}
