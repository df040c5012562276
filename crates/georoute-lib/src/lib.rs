//! Georoute library entry points.
//!
//! This crate loads road networks (nodes with geographic coordinates joined by
//! weighted ways) into memory and answers shortest-path queries with either
//! Dijkstra's algorithm or A* guided by the great-circle distance. Consumers
//! such as the CLI should depend only on the items re-exported here.
//!

#![deny(warnings)]

pub mod compare;
pub mod error;
pub mod geo;
pub mod graph;
pub mod path;
pub mod routing;
pub mod source;

pub use compare::{compare_algorithms, AlgorithmComparison};
pub use error::{Error, Result};
pub use geo::{haversine_km, Coordinates, EARTH_RADIUS_KM};
pub use graph::{Edge, GeoGraph, Node};
pub use path::{find_route_a_star, find_route_dijkstra, reconstruct_path, SearchOutcome};
pub use routing::{
    plan_path, resolve_node, select_path_finder, NodeRef, NodeSummary, PathFinder, PathReport,
    PathRequest, RouteAlgorithm,
};
pub use source::{load_graph, CsvSource, EdgeRecord, MemorySource, NodeRecord, RecordSource};
