//! Route planning on top of the raw search algorithms.
//!
//! This module provides:
//! - [`RouteAlgorithm`] - Supported algorithms (Dijkstra, A*)
//! - [`NodeRef`] / [`PathRequest`] - Endpoints given by id or by name
//! - [`PathReport`] - Search result augmented with endpoint metadata,
//!   direct distance and timing
//! - [`plan_path`] - Main entry point for computing a report
//!
//! # Strategy Pattern
//!
//! Algorithms are selected through the [`PathFinder`] trait, so the report
//! builder and the comparator never depend on a concrete algorithm.
//!
//! # Example
//!
//! ```ignore
//! use georoute_lib::{plan_path, CsvSource, PathRequest, RouteAlgorithm, load_graph};
//!
//! let graph = load_graph(&CsvSource::new("osm_nodes.csv", "osm_ways.csv"))?;
//! let request = PathRequest::by_name("Foix", "Las Prados", RouteAlgorithm::AStar);
//! let report = plan_path(&graph, &request)?;
//! println!("{:.2} km", report.path_distance);
//! ```

mod planner;

pub use planner::{select_path_finder, AStarPathFinder, DijkstraPathFinder, PathFinder};

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::{GeoGraph, Node};

/// Number of "did you mean" suggestions attached to unknown-name errors.
const MAX_SUGGESTIONS: usize = 3;

/// Supported routing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RouteAlgorithm {
    /// Dijkstra's algorithm (uniform cost).
    Dijkstra,
    /// A* search (geodesic heuristic).
    #[default]
    #[serde(rename = "a-star")]
    AStar,
}

impl RouteAlgorithm {
    /// Every algorithm, in comparison order.
    pub const ALL: [RouteAlgorithm; 2] = [RouteAlgorithm::Dijkstra, RouteAlgorithm::AStar];
}

impl fmt::Display for RouteAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteAlgorithm::Dijkstra => "dijkstra",
            RouteAlgorithm::AStar => "a-star",
        };
        f.write_str(value)
    }
}

impl FromStr for RouteAlgorithm {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "dijkstra" => Ok(RouteAlgorithm::Dijkstra),
            "a-star" | "astar" | "a_star" | "a*" => Ok(RouteAlgorithm::AStar),
            other => Err(format!("unknown algorithm '{other}'")),
        }
    }
}

/// How a caller identifies a route endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    /// Externally assigned node identifier.
    Id(String),
    /// Display name; resolved to the first node registered under it.
    Name(String),
}

impl NodeRef {
    /// The raw text supplied by the caller.
    pub fn label(&self) -> &str {
        match self {
            NodeRef::Id(value) | NodeRef::Name(value) => value,
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// High-level path query.
#[derive(Debug, Clone)]
pub struct PathRequest {
    pub start: NodeRef,
    pub goal: NodeRef,
    pub algorithm: RouteAlgorithm,
}

impl PathRequest {
    /// Query between two node names.
    pub fn by_name(
        start: impl Into<String>,
        goal: impl Into<String>,
        algorithm: RouteAlgorithm,
    ) -> Self {
        Self {
            start: NodeRef::Name(start.into()),
            goal: NodeRef::Name(goal.into()),
            algorithm,
        }
    }

    /// Query between two node identifiers.
    pub fn by_id(
        start: impl Into<String>,
        goal: impl Into<String>,
        algorithm: RouteAlgorithm,
    ) -> Self {
        Self {
            start: NodeRef::Id(start.into()),
            goal: NodeRef::Id(goal.into()),
            algorithm,
        }
    }
}

/// Endpoint metadata carried by a [`PathReport`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeSummary {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
}

impl From<&Node> for NodeSummary {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            lat: node.position.lat,
            lon: node.position.lon,
        }
    }
}

impl NodeSummary {
    /// Name when present, identifier otherwise.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Search result augmented for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct PathReport {
    pub algorithm: RouteAlgorithm,
    pub start: NodeSummary,
    pub goal: NodeSummary,
    pub path: Vec<String>,
    /// Metadata for every node of `path`, in the same order.
    pub steps: Vec<NodeSummary>,
    /// Sum of edge weights along `path`, in kilometers.
    pub path_distance: f64,
    /// Geodesic distance between the endpoints, in kilometers.
    pub direct_distance: f64,
    #[serde(rename = "search_time_ms", serialize_with = "serialize_millis")]
    pub search_time: Duration,
    /// Nodes finalised by the search.
    pub settled: usize,
}

impl PathReport {
    /// Number of edges in the path.
    pub fn hop_count(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    pub fn search_time_ms(&self) -> f64 {
        self.search_time.as_secs_f64() * 1000.0
    }
}

fn serialize_millis<S: Serializer>(
    duration: &Duration,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

/// Resolve an endpoint to a node identifier present in the graph.
pub fn resolve_node(graph: &GeoGraph, node: &NodeRef) -> Result<String> {
    let resolved = match node {
        NodeRef::Id(id) => graph.contains(id).then(|| id.clone()),
        NodeRef::Name(name) => graph.resolve_name(name).map(str::to_string),
    };

    resolved.ok_or_else(|| Error::UnknownNode {
        name: node.label().to_string(),
        suggestions: match node {
            NodeRef::Id(_) => Vec::new(),
            NodeRef::Name(name) => graph.fuzzy_name_matches(name, MAX_SUGGESTIONS),
        },
    })
}

/// Compute a path report for the requested endpoints and algorithm.
///
/// Unknown endpoints fail with [`Error::UnknownNode`]; endpoints without a
/// connecting path fail with [`Error::RouteNotFound`].
pub fn plan_path(graph: &GeoGraph, request: &PathRequest) -> Result<PathReport> {
    let start_id = resolve_node(graph, &request.start)?;
    let goal_id = resolve_node(graph, &request.goal)?;
    let finder = select_path_finder(request.algorithm);
    run_finder(graph, finder.as_ref(), &start_id, &goal_id).ok_or_else(|| Error::RouteNotFound {
        start: request.start.label().to_string(),
        goal: request.goal.label().to_string(),
    })
}

/// Time a single search and wrap it into a report.
///
/// Returns `None` when no path exists or either id is unknown.
pub fn run_finder(
    graph: &GeoGraph,
    finder: &dyn PathFinder,
    start_id: &str,
    goal_id: &str,
) -> Option<PathReport> {
    let started = Instant::now();
    let outcome = finder.find_path(graph, start_id, goal_id);
    let search_time = started.elapsed();

    debug!(
        algorithm = %finder.algorithm(),
        start = start_id,
        goal = goal_id,
        settled = outcome.settled,
        found = outcome.is_found(),
        elapsed_ms = search_time.as_secs_f64() * 1000.0,
        "search finished"
    );

    let path = outcome.path?;
    let start = graph.node(start_id)?;
    let goal = graph.node(goal_id)?;

    let steps = path
        .iter()
        .filter_map(|id| graph.node(id))
        .map(NodeSummary::from)
        .collect();

    Some(PathReport {
        algorithm: finder.algorithm(),
        start: NodeSummary::from(start),
        goal: NodeSummary::from(goal),
        path,
        steps,
        path_distance: outcome.total_distance,
        direct_distance: start.position.distance_km(&goal.position),
        search_time,
        settled: outcome.settled,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_graph() -> GeoGraph {
        let mut graph = GeoGraph::new();
        graph.add_node("1", 42.965, 1.605, "Foix");
        graph.add_node("2", 42.970, 1.580, "Saint-Pierre-de-Rivière");
        graph.add_node("3", 42.995, 1.490, "");
        graph.add_node("4", 43.100, 1.700, "Cabane du Bois");
        graph.add_edge("1", "2", 2.636);
        graph.add_edge("2", "3", 9.5);
        graph
    }

    #[test]
    fn algorithm_display_and_parse_round_trip() {
        for algorithm in RouteAlgorithm::ALL {
            assert_eq!(algorithm.to_string().parse::<RouteAlgorithm>(), Ok(algorithm));
        }
        assert_eq!("A*".parse::<RouteAlgorithm>(), Ok(RouteAlgorithm::AStar));
        assert!("bfs".parse::<RouteAlgorithm>().is_err());
    }

    #[test]
    fn plan_path_by_id_fills_metadata() {
        let graph = line_graph();
        let report = plan_path(&graph, &PathRequest::by_id("1", "3", RouteAlgorithm::Dijkstra))
            .expect("route exists");

        assert_eq!(report.path, vec!["1", "2", "3"]);
        assert_eq!(report.hop_count(), 2);
        assert!((report.path_distance - 12.136).abs() < 1e-9);
        assert_eq!(report.start.display_name(), "Foix");
        assert_eq!(report.goal.display_name(), "3");
        let names: Vec<_> = report.steps.iter().map(NodeSummary::display_name).collect();
        assert_eq!(names, vec!["Foix", "Saint-Pierre-de-Rivière", "3"]);
        assert!(report.direct_distance > 0.0 && report.direct_distance < report.path_distance);
    }

    #[test]
    fn plan_path_by_name_uses_first_registration() {
        let mut graph = line_graph();
        graph.add_node("5", 43.0, 1.61, "Foix");
        graph.add_edge("5", "3", 1.0);

        let request =
            PathRequest::by_name("Foix", "Saint-Pierre-de-Rivière", RouteAlgorithm::AStar);
        let report = plan_path(&graph, &request).expect("route exists");
        assert_eq!(report.start.id, "1");
        assert_eq!(report.path, vec!["1", "2"]);
    }

    #[test]
    fn unknown_name_suggests_alternatives() {
        let graph = line_graph();
        let request = PathRequest::by_name("Fois", "Foix", RouteAlgorithm::Dijkstra);
        let err = plan_path(&graph, &request).expect_err("unknown start");

        match err {
            Error::UnknownNode { name, suggestions } => {
                assert_eq!(name, "Fois");
                assert!(suggestions.contains(&"Foix".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_id_has_no_suggestions() {
        let graph = line_graph();
        let err = resolve_node(&graph, &NodeRef::Id("99".to_string())).expect_err("unknown id");
        assert_eq!(err.to_string(), "unknown node: 99");
    }

    #[test]
    fn disconnected_endpoints_report_route_not_found() {
        let graph = line_graph();
        let request = PathRequest::by_name("Foix", "Cabane du Bois", RouteAlgorithm::AStar);
        let err = plan_path(&graph, &request).expect_err("disconnected");
        assert_eq!(
            err.to_string(),
            "no route found between Foix and Cabane du Bois"
        );
    }

    #[test]
    fn report_serializes_search_time_in_millis() {
        let graph = line_graph();
        let report = plan_path(&graph, &PathRequest::by_id("1", "2", RouteAlgorithm::AStar))
            .expect("route exists");
        let json = serde_json::to_value(&report).expect("serializes");

        assert_eq!(json["algorithm"], "a-star");
        assert!(json["search_time_ms"].is_number());
        assert_eq!(json["path"], serde_json::json!(["1", "2"]));
    }
}
