//! Record sources and bulk graph construction.
//!
//! A [`RecordSource`] yields node and edge records from wherever they live
//! (CSV exports, in-memory tables). [`load_graph`] consumes any source and
//! builds a [`GeoGraph`] in two passes: every node first, then every edge.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Instant;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geo::Coordinates;
use crate::graph::GeoGraph;

/// Node row: `id,lat,lon,name`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub lat: f64,
    pub lon: f64,
    /// Display name; empty when the node is unnamed.
    #[serde(default)]
    pub name: String,
}

impl NodeRecord {
    pub fn new(id: impl Into<String>, lat: f64, lon: f64, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lat,
            lon,
            name: name.into(),
        }
    }
}

/// Edge row: `node_from,node_to,distance_km`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EdgeRecord {
    pub node_from: String,
    pub node_to: String,
    /// Road distance in kilometers. When absent, the geodesic distance
    /// between both endpoints is used.
    #[serde(default)]
    pub distance_km: Option<f64>,
}

impl EdgeRecord {
    pub fn new(from: impl Into<String>, to: impl Into<String>, distance_km: f64) -> Self {
        Self {
            node_from: from.into(),
            node_to: to.into(),
            distance_km: Some(distance_km),
        }
    }

    /// Edge whose weight is derived from node coordinates at load time.
    pub fn geodesic(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            node_from: from.into(),
            node_to: to.into(),
            distance_km: None,
        }
    }
}

/// Boxed iterator over fallible records.
pub type RecordIter<'a, T> = Box<dyn Iterator<Item = Result<T>> + 'a>;

/// Producer of node and edge records, independent of the storage format.
pub trait RecordSource {
    /// Iterate over node records.
    fn nodes(&self) -> Result<RecordIter<'_, NodeRecord>>;

    /// Iterate over edge records.
    fn edges(&self) -> Result<RecordIter<'_, EdgeRecord>>;
}

/// Pair of CSV files with headed columns.
///
/// Columns are matched by header name, so extra columns and column order do
/// not matter. Fields are trimmed before parsing.
#[derive(Debug, Clone)]
pub struct CsvSource {
    nodes_path: PathBuf,
    ways_path: PathBuf,
}

impl CsvSource {
    pub fn new(nodes_path: impl Into<PathBuf>, ways_path: impl Into<PathBuf>) -> Self {
        Self {
            nodes_path: nodes_path.into(),
            ways_path: ways_path.into(),
        }
    }

    pub fn nodes_path(&self) -> &Path {
        &self.nodes_path
    }

    pub fn ways_path(&self) -> &Path {
        &self.ways_path
    }
}

fn open_csv(path: &Path) -> Result<csv::Reader<File>> {
    if !path.exists() {
        return Err(Error::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    Ok(ReaderBuilder::new().trim(Trim::Fields).from_path(path)?)
}

impl RecordSource for CsvSource {
    fn nodes(&self) -> Result<RecordIter<'_, NodeRecord>> {
        let reader = open_csv(&self.nodes_path)?;
        Ok(Box::new(
            reader.into_deserialize().map(|row| row.map_err(Error::from)),
        ))
    }

    fn edges(&self) -> Result<RecordIter<'_, EdgeRecord>> {
        let reader = open_csv(&self.ways_path)?;
        Ok(Box::new(
            reader.into_deserialize().map(|row| row.map_err(Error::from)),
        ))
    }
}

/// Records already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl MemorySource {
    pub fn new(nodes: Vec<NodeRecord>, edges: Vec<EdgeRecord>) -> Self {
        Self { nodes, edges }
    }
}

impl RecordSource for MemorySource {
    fn nodes(&self) -> Result<RecordIter<'_, NodeRecord>> {
        Ok(Box::new(self.nodes.iter().cloned().map(Ok)))
    }

    fn edges(&self) -> Result<RecordIter<'_, EdgeRecord>> {
        Ok(Box::new(self.edges.iter().cloned().map(Ok)))
    }
}

/// Build a graph from every record of `source`.
///
/// Nodes with non-finite coordinates and edges with negative or non-finite
/// distances abort the load. Edges referencing unknown nodes are skipped and
/// reported once through a `warn!` event.
pub fn load_graph<S: RecordSource + ?Sized>(source: &S) -> Result<GeoGraph> {
    let started = Instant::now();
    let mut graph = GeoGraph::new();

    for record in source.nodes()? {
        let record = record?;
        if !Coordinates::new(record.lat, record.lon).is_finite() {
            return Err(Error::InvalidCoordinates { id: record.id });
        }
        graph.add_node(record.id, record.lat, record.lon, &record.name);
    }

    let mut skipped_edges = 0usize;
    let mut derived_weights = 0usize;
    for record in source.edges()? {
        let record = record?;
        let (Some(from), Some(to)) = (graph.node(&record.node_from), graph.node(&record.node_to))
        else {
            skipped_edges += 1;
            continue;
        };

        let weight = record.distance_km.unwrap_or_else(|| {
            derived_weights += 1;
            from.position.distance_km(&to.position)
        });
        if !weight.is_finite() || weight < 0.0 {
            return Err(Error::InvalidEdgeWeight {
                from: record.node_from,
                to: record.node_to,
                weight,
            });
        }

        graph.add_edge(&record.node_from, &record.node_to, weight);
    }

    if skipped_edges > 0 {
        warn!(skipped_edges, "ignored edges referencing unknown nodes");
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        derived_weights,
        elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
        "graph loaded"
    );

    Ok(graph)
}
