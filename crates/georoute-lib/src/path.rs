use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::hash::Hash;

use tracing::trace;

use crate::graph::GeoGraph;

/// Result of a single shortest-path query.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Ordered node identifiers from start to goal, inclusive.
    pub path: Option<Vec<String>>,
    /// Sum of edge weights along `path` in kilometers, or infinity.
    pub total_distance: f64,
    /// Number of nodes whose distance was finalised during the search.
    pub settled: usize,
}

impl SearchOutcome {
    fn not_found(settled: usize) -> Self {
        Self {
            path: None,
            total_distance: f64::INFINITY,
            settled,
        }
    }

    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }
}

/// Run Dijkstra's algorithm between two node identifiers.
///
/// Unknown identifiers and disconnected endpoints both yield an absent path
/// with infinite distance. Equal-cost heap entries are popped in ascending
/// node id order.
pub fn find_route_dijkstra(graph: &GeoGraph, start: &str, goal: &str) -> SearchOutcome {
    let (Some(start), Some(goal)) = (graph.node_key(start), graph.node_key(goal)) else {
        return SearchOutcome::not_found(0);
    };

    let mut distances: HashMap<&str, f64> = HashMap::new();
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut queue = BinaryHeap::new();
    let mut settled = 0usize;

    distances.insert(start, 0.0);
    queue.push(QueueEntry::new(start, 0.0));

    while let Some(entry) = queue.pop() {
        let current_distance = distance_of(&distances, entry.node);
        // Lazy deletion: a better entry for this node was already processed.
        if entry.cost.0 > current_distance {
            continue;
        }

        settled += 1;
        if entry.node == goal {
            trace!(settled, "dijkstra reached goal");
            return finish(&parents, start, goal, current_distance, settled);
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target.as_str();
            let next_cost = current_distance + edge.distance;
            if next_cost < distance_of(&distances, next) {
                distances.insert(next, next_cost);
                parents.insert(next, entry.node);
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    SearchOutcome::not_found(settled)
}

/// Run A* search guided by the geodesic distance to the goal.
///
/// The heuristic is admissible only when every edge weight is at least the
/// geodesic distance between its endpoints. Graphs with shorter weights still
/// produce a path, but it may not be the shortest one.
pub fn find_route_a_star(graph: &GeoGraph, start: &str, goal: &str) -> SearchOutcome {
    let (Some(start), Some(goal)) = (graph.node_key(start), graph.node_key(goal)) else {
        return SearchOutcome::not_found(0);
    };

    let heuristic = |node: &str| graph.geodesic_distance(node, goal).unwrap_or(0.0);

    let mut g_score: HashMap<&str, f64> = HashMap::new();
    let mut parents: HashMap<&str, &str> = HashMap::new();
    let mut closed: HashSet<&str> = HashSet::new();
    let mut queue = BinaryHeap::new();

    g_score.insert(start, 0.0);
    queue.push(AStarEntry::new(start, 0.0, heuristic(start)));

    while let Some(entry) = queue.pop() {
        if closed.contains(entry.node) {
            continue;
        }
        let current_score = distance_of(&g_score, entry.node);
        if entry.cost.0 > current_score {
            continue;
        }

        closed.insert(entry.node);
        if entry.node == goal {
            trace!(settled = closed.len(), "a* reached goal");
            return finish(&parents, start, goal, current_score, closed.len());
        }

        for edge in graph.neighbours(entry.node) {
            let next = edge.target.as_str();
            if closed.contains(next) {
                continue;
            }

            let tentative_g = current_score + edge.distance;
            if tentative_g < distance_of(&g_score, next) {
                g_score.insert(next, tentative_g);
                parents.insert(next, entry.node);
                queue.push(AStarEntry::new(next, tentative_g, heuristic(next)));
            }
        }
    }

    SearchOutcome::not_found(closed.len())
}

/// Rebuild the path from `start` to `goal` out of a predecessor map.
///
/// Walks backwards from `goal` until `start` is reached. Returns `None` when a
/// predecessor is missing or the map loops without reaching `start`.
pub fn reconstruct_path<N>(parents: &HashMap<N, N>, start: &N, goal: &N) -> Option<Vec<N>>
where
    N: Eq + Hash + Clone,
{
    let mut path = vec![goal.clone()];
    let mut current = goal;

    while current != start {
        // A valid chain uses each predecessor entry at most once.
        if path.len() > parents.len() {
            return None;
        }
        current = parents.get(current)?;
        path.push(current.clone());
    }

    path.reverse();
    Some(path)
}

fn finish(
    parents: &HashMap<&str, &str>,
    start: &str,
    goal: &str,
    total_distance: f64,
    settled: usize,
) -> SearchOutcome {
    match reconstruct_path(parents, &start, &goal) {
        Some(path) => SearchOutcome {
            path: Some(path.into_iter().map(str::to_string).collect()),
            total_distance,
            settled,
        },
        None => SearchOutcome::not_found(settled),
    }
}

fn distance_of(distances: &HashMap<&str, f64>, node: &str) -> f64 {
    distances.get(node).copied().unwrap_or(f64::INFINITY)
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
}

impl<'a> QueueEntry<'a> {
    fn new(node: &'a str, cost: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
        }
    }
}

impl Ord for QueueEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost, then id.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for QueueEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct AStarEntry<'a> {
    node: &'a str,
    cost: FloatOrd,
    estimate: FloatOrd,
}

impl<'a> AStarEntry<'a> {
    fn new(node: &'a str, cost: f64, heuristic: f64) -> Self {
        Self {
            node,
            cost: FloatOrd(cost),
            estimate: FloatOrd(cost + heuristic),
        }
    }
}

impl Ord for AStarEntry<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .estimate
            .cmp(&self.estimate)
            .then_with(|| other.node.cmp(self.node))
    }
}

impl PartialOrd for AStarEntry<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Diamond: A -> B -> D costs 6, A -> C -> D costs 4.
    fn diamond() -> GeoGraph {
        let mut graph = GeoGraph::new();
        for id in ["A", "B", "C", "D"] {
            graph.add_node(id, 0.0, 0.0, id);
        }
        graph.add_edge("A", "B", 1.0);
        graph.add_edge("A", "C", 3.0);
        graph.add_edge("B", "D", 5.0);
        graph.add_edge("C", "D", 1.0);
        graph
    }

    fn ids(path: &[&str]) -> Option<Vec<String>> {
        Some(path.iter().map(|id| id.to_string()).collect())
    }

    #[test]
    fn dijkstra_finds_cheapest_branch() {
        let outcome = find_route_dijkstra(&diamond(), "A", "D");
        assert_eq!(outcome.path, ids(&["A", "C", "D"]));
        assert_eq!(outcome.total_distance, 4.0);
    }

    #[test]
    fn a_star_with_zero_heuristic_matches_dijkstra() {
        // All nodes share a position, so the heuristic is zero everywhere.
        let outcome = find_route_a_star(&diamond(), "A", "D");
        assert_eq!(outcome.path, ids(&["A", "C", "D"]));
        assert_eq!(outcome.total_distance, 4.0);
    }

    #[test]
    fn stale_entries_are_skipped() {
        // C is first reached via A (cost 10) and later improved via B (cost 2).
        let mut graph = GeoGraph::new();
        for id in ["A", "B", "C", "D"] {
            graph.add_node(id, 0.0, 0.0, "");
        }
        graph.add_edge("A", "C", 10.0);
        graph.add_edge("A", "B", 1.0);
        graph.add_edge("B", "C", 1.0);
        graph.add_edge("C", "D", 1.0);

        let outcome = find_route_dijkstra(&graph, "A", "D");
        assert_eq!(outcome.path, ids(&["A", "B", "C", "D"]));
        assert_eq!(outcome.total_distance, 3.0);
        assert_eq!(outcome.settled, 4);
    }

    #[test]
    fn equal_cost_ties_prefer_smaller_ids() {
        // Two equal routes A-B-D and A-C-D; B sorts before C.
        let mut graph = GeoGraph::new();
        for id in ["A", "B", "C", "D"] {
            graph.add_node(id, 0.0, 0.0, "");
        }
        graph.add_edge("A", "C", 1.0);
        graph.add_edge("A", "B", 1.0);
        graph.add_edge("C", "D", 1.0);
        graph.add_edge("B", "D", 1.0);

        for outcome in [
            find_route_dijkstra(&graph, "A", "D"),
            find_route_a_star(&graph, "A", "D"),
        ] {
            assert_eq!(outcome.path, ids(&["A", "B", "D"]));
            assert_eq!(outcome.total_distance, 2.0);
        }
    }

    #[test]
    fn unreachable_goal_reports_infinity() {
        let mut graph = diamond();
        graph.add_node("E", 1.0, 1.0, "");

        for outcome in [
            find_route_dijkstra(&graph, "A", "E"),
            find_route_a_star(&graph, "A", "E"),
        ] {
            assert!(!outcome.is_found());
            assert!(outcome.total_distance.is_infinite());
        }
    }

    #[test]
    fn unknown_ids_short_circuit() {
        let graph = diamond();
        let outcome = find_route_dijkstra(&graph, "missing", "D");
        assert_eq!(outcome.path, None);
        assert_eq!(outcome.settled, 0);

        let outcome = find_route_a_star(&graph, "A", "missing");
        assert_eq!(outcome.path, None);
        assert!(outcome.total_distance.is_infinite());
    }

    #[test]
    fn start_equals_goal() {
        let graph = diamond();
        for outcome in [
            find_route_dijkstra(&graph, "B", "B"),
            find_route_a_star(&graph, "B", "B"),
        ] {
            assert_eq!(outcome.path, ids(&["B"]));
            assert_eq!(outcome.total_distance, 0.0);
            assert_eq!(outcome.settled, 1);
        }
    }

    #[test]
    fn reconstruct_path_walks_predecessors() {
        let parents = HashMap::from([("B", "A"), ("C", "A"), ("D", "C")]);
        assert_eq!(
            reconstruct_path(&parents, &"A", &"D"),
            Some(vec!["A", "C", "D"])
        );
        assert_eq!(reconstruct_path(&parents, &"A", &"B"), Some(vec!["A", "B"]));
        assert_eq!(reconstruct_path(&parents, &"A", &"A"), Some(vec!["A"]));
    }

    #[test]
    fn reconstruct_path_fails_on_broken_chain() {
        // D -> C -> X, but X has no predecessor and is not the start.
        let parents = HashMap::from([("D", "C"), ("C", "X")]);
        assert_eq!(reconstruct_path(&parents, &"A", &"D"), None);
    }

    #[test]
    fn reconstruct_path_fails_on_cycle() {
        let parents = HashMap::from([("B", "C"), ("C", "B")]);
        assert_eq!(reconstruct_path(&parents, &"A", &"B"), None);
    }

    #[test]
    fn queue_entry_orders_as_min_heap() {
        let mut heap = BinaryHeap::new();
        heap.push(QueueEntry::new("b", 2.0));
        heap.push(QueueEntry::new("c", 1.0));
        heap.push(QueueEntry::new("a", 2.0));

        let order: Vec<&str> = std::iter::from_fn(|| heap.pop().map(|e| e.node)).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn a_star_entry_orders_by_estimate() {
        let mut heap = BinaryHeap::new();
        heap.push(AStarEntry::new("near", 5.0, 1.0));
        heap.push(AStarEntry::new("far", 1.0, 10.0));

        assert_eq!(heap.pop().map(|e| e.node), Some("near"));
        assert_eq!(heap.pop().map(|e| e.node), Some("far"));
    }
}
