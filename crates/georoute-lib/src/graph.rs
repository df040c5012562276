use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::geo::Coordinates;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const FUZZY_MATCH_THRESHOLD: f64 = 0.8;

/// Geo-located node within the road graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    pub id: String,
    pub position: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Directed half of an undirected edge as stored in a node's adjacency list.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub target: String,
    /// Distance in kilometers.
    pub distance: f64,
}

/// Weighted, undirected road graph with a name index.
///
/// The graph is built once (see [`crate::load_graph`]) and then only read by
/// the path finders. It holds no interior mutability, so a shared reference
/// can serve concurrent queries from several threads.
#[derive(Debug, Clone, Default)]
pub struct GeoGraph {
    nodes: HashMap<String, Node>,
    adjacency: HashMap<String, Vec<Edge>>,
    name_to_ids: HashMap<String, Vec<String>>,
    edge_count: usize,
}

impl GeoGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a node.
    ///
    /// A non-empty `name` registers `id` in the name index. Re-adding an id
    /// replaces its coordinates and name but leaves earlier name-index
    /// entries in place.
    pub fn add_node(&mut self, id: impl Into<String>, lat: f64, lon: f64, name: &str) {
        let id = id.into();
        let name = (!name.is_empty()).then(|| name.to_string());

        if let Some(name) = &name {
            self.name_to_ids
                .entry(name.clone())
                .or_default()
                .push(id.clone());
        }

        self.nodes.insert(
            id.clone(),
            Node {
                id,
                position: Coordinates::new(lat, lon),
                name,
            },
        );
    }

    /// Add an undirected edge by appending one entry to each endpoint.
    ///
    /// Both endpoints are expected to exist already. Parallel edges are not
    /// merged: adding the same pair twice, even with different weights,
    /// produces two independent entries in each direction.
    pub fn add_edge(&mut self, from_id: &str, to_id: &str, weight: f64) {
        self.adjacency
            .entry(from_id.to_string())
            .or_default()
            .push(Edge {
                target: to_id.to_string(),
                distance: weight,
            });
        self.adjacency
            .entry(to_id.to_string())
            .or_default()
            .push(Edge {
                target: from_id.to_string(),
                distance: weight,
            });
        self.edge_count += 1;
    }

    /// Lookup a node by identifier.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Return the graph-owned identifier for `id`, if the node exists.
    pub(crate) fn node_key(&self, id: &str) -> Option<&str> {
        self.nodes.get_key_value(id).map(|(key, _)| key.as_str())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Return the neighbours for a given node identifier.
    pub fn neighbours(&self, id: &str) -> &[Edge] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Iterate over every node in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of `add_edge` calls (each undirected edge counts once).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Resolve a name to the first identifier registered under it.
    ///
    /// Several nodes may share a name (for example a village and a hamlet of
    /// the same name). The first registration wins regardless of location,
    /// which can silently pick the wrong place for ambiguous names. Use
    /// [`GeoGraph::nodes_named`] to inspect every candidate.
    pub fn resolve_name(&self, name: &str) -> Option<&str> {
        self.name_to_ids
            .get(name)
            .and_then(|ids| ids.first())
            .map(String::as_str)
    }

    /// Every node registered under `name`, in registration order.
    pub fn nodes_named(&self, name: &str) -> Vec<&Node> {
        self.name_to_ids
            .get(name)
            .map(|ids| ids.iter().filter_map(|id| self.nodes.get(id)).collect())
            .unwrap_or_default()
    }

    /// Great-circle distance in kilometers between two nodes.
    ///
    /// Returns `None` when either identifier is unknown.
    pub fn geodesic_distance(&self, a: &str, b: &str) -> Option<f64> {
        let from = self.nodes.get(a)?;
        let to = self.nodes.get(b)?;
        Some(from.position.distance_km(&to.position))
    }

    /// Registered names similar to `query`, best match first.
    pub fn fuzzy_name_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let mut scored: Vec<(f64, &str)> = self
            .name_to_ids
            .keys()
            .map(|name| (strsim::jaro_winkler(query, name), name.as_str()))
            .filter(|(score, _)| *score >= FUZZY_MATCH_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| {
            b.0.partial_cmp(&a.0)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.1.cmp(b.1))
        });

        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}
