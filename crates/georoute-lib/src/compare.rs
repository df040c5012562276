//! Side-by-side comparison of Dijkstra and A* on one query.

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::graph::GeoGraph;
use crate::routing::{
    resolve_node, run_finder, AStarPathFinder, DijkstraPathFinder, NodeRef, PathReport,
};

/// Distances closer than this (in kilometers) are considered equal.
pub const DISTANCE_TOLERANCE_KM: f64 = 1e-9;

/// Reports from both algorithms for the same endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct AlgorithmComparison {
    pub dijkstra: PathReport,
    pub a_star: PathReport,
    /// Both algorithms returned the same node sequence.
    pub paths_identical: bool,
    /// Both total distances match within [`DISTANCE_TOLERANCE_KM`].
    pub distances_agree: bool,
    /// How much faster A* was, relative to Dijkstra; negative when slower.
    pub a_star_speedup_percent: f64,
}

/// Run both algorithms between `start` and `goal` and compare the results.
pub fn compare_algorithms(
    graph: &GeoGraph,
    start: &NodeRef,
    goal: &NodeRef,
) -> Result<AlgorithmComparison> {
    let start_id = resolve_node(graph, start)?;
    let goal_id = resolve_node(graph, goal)?;

    let not_found = || Error::RouteNotFound {
        start: start.label().to_string(),
        goal: goal.label().to_string(),
    };
    let dijkstra =
        run_finder(graph, &DijkstraPathFinder, &start_id, &goal_id).ok_or_else(not_found)?;
    let a_star = run_finder(graph, &AStarPathFinder, &start_id, &goal_id).ok_or_else(not_found)?;

    let comparison = AlgorithmComparison {
        paths_identical: dijkstra.path == a_star.path,
        distances_agree: (dijkstra.path_distance - a_star.path_distance).abs()
            <= DISTANCE_TOLERANCE_KM,
        a_star_speedup_percent: speedup_percent(
            dijkstra.search_time_ms(),
            a_star.search_time_ms(),
        ),
        dijkstra,
        a_star,
    };

    debug!(
        paths_identical = comparison.paths_identical,
        distances_agree = comparison.distances_agree,
        dijkstra_settled = comparison.dijkstra.settled,
        a_star_settled = comparison.a_star.settled,
        "algorithm comparison finished"
    );

    Ok(comparison)
}

fn speedup_percent(baseline_ms: f64, candidate_ms: f64) -> f64 {
    if baseline_ms <= 0.0 {
        return 0.0;
    }
    (baseline_ms - candidate_ms) / baseline_ms * 100.0
}
