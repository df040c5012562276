//! Common test utilities and fixture helpers.
//!
//! Provides paths to the CSV fixture under `docs/fixtures` and a synthetic
//! grid network whose edge weights exceed the great-circle distance.

use std::fs;
use std::path::{Path, PathBuf};

use georoute_lib::{haversine_km, load_graph, CsvSource, GeoGraph};

/// Path to the fixtures directory shared by the workspace.
#[allow(dead_code)]
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// CSV source over `minimal_nodes.csv` / `minimal_ways.csv`.
#[allow(dead_code)]
pub fn fixture_source() -> CsvSource {
    let dir = fixtures_dir();
    CsvSource::new(dir.join("minimal_nodes.csv"), dir.join("minimal_ways.csv"))
}

#[allow(dead_code)]
pub fn fixture_graph() -> GeoGraph {
    load_graph(&fixture_source()).expect("fixture loads")
}

/// Identifier of the grid node at `(row, col)`.
#[allow(dead_code)]
pub fn grid_id(row: usize, col: usize) -> String {
    format!("r{row:02}c{col:02}")
}

/// Square grid of `size * size` nodes spaced 0.01 degrees apart, connected to
/// their right and lower neighbours. Every edge weighs 1.1 times the geodesic
/// distance between its endpoints.
#[allow(dead_code)]
pub fn grid_graph(size: usize) -> GeoGraph {
    let coords = |row: usize, col: usize| (43.0 + row as f64 * 0.01, 1.0 + col as f64 * 0.01);

    let mut graph = GeoGraph::new();
    for row in 0..size {
        for col in 0..size {
            let (lat, lon) = coords(row, col);
            graph.add_node(grid_id(row, col), lat, lon, "");
        }
    }

    for row in 0..size {
        for col in 0..size {
            let (lat, lon) = coords(row, col);
            if col + 1 < size {
                let (lat2, lon2) = coords(row, col + 1);
                let weight = haversine_km(lat, lon, lat2, lon2) * 1.1;
                graph.add_edge(&grid_id(row, col), &grid_id(row, col + 1), weight);
            }
            if row + 1 < size {
                let (lat2, lon2) = coords(row + 1, col);
                let weight = haversine_km(lat, lon, lat2, lon2) * 1.1;
                graph.add_edge(&grid_id(row, col), &grid_id(row + 1, col), weight);
            }
        }
    }

    graph
}

/// Write `contents` to `name` inside `dir` and return the file path.
#[allow(dead_code)]
pub fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write csv fixture");
    path
}
