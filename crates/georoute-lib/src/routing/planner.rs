//! Path finding strategies.
//!
//! Each algorithm is wrapped in a type implementing [`PathFinder`] so callers
//! (the report builder, the comparator, benchmarks) can swap algorithms
//! without knowing how they search.

use crate::graph::GeoGraph;
use crate::path::{find_route_a_star, find_route_dijkstra, SearchOutcome};

use super::RouteAlgorithm;

/// Trait for shortest-path strategies.
///
/// Implementations hold no per-query state; every call allocates its own
/// queue and distance maps, so one finder can serve concurrent queries.
pub trait PathFinder: Send + Sync {
    /// The algorithm identifier for this finder.
    fn algorithm(&self) -> RouteAlgorithm;

    /// Search for the shortest path between two node identifiers.
    fn find_path(&self, graph: &GeoGraph, start: &str, goal: &str) -> SearchOutcome;
}

/// Dijkstra's algorithm: uniform-cost expansion from the start node.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraPathFinder;

impl PathFinder for DijkstraPathFinder {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::Dijkstra
    }

    fn find_path(&self, graph: &GeoGraph, start: &str, goal: &str) -> SearchOutcome {
        find_route_dijkstra(graph, start, goal)
    }
}

/// A* search using the geodesic distance to the goal as heuristic.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarPathFinder;

impl PathFinder for AStarPathFinder {
    fn algorithm(&self) -> RouteAlgorithm {
        RouteAlgorithm::AStar
    }

    fn find_path(&self, graph: &GeoGraph, start: &str, goal: &str) -> SearchOutcome {
        find_route_a_star(graph, start, goal)
    }
}

/// Select the path finder for an algorithm.
pub fn select_path_finder(algorithm: RouteAlgorithm) -> Box<dyn PathFinder> {
    match algorithm {
        RouteAlgorithm::Dijkstra => Box::new(DijkstraPathFinder),
        RouteAlgorithm::AStar => Box::new(AStarPathFinder),
    }
}
