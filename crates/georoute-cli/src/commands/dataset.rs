//! Road network resolution and loading.
//!
//! Paths come from `--nodes` / `--ways` when given, otherwise from the
//! `GEOROUTE_NODES` / `GEOROUTE_WAYS` environment variables.

use std::env;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use georoute_lib::{load_graph, CsvSource, GeoGraph};

/// Environment variable holding the default nodes CSV path.
pub const NODES_ENV: &str = "GEOROUTE_NODES";
/// Environment variable holding the default ways CSV path.
pub const WAYS_ENV: &str = "GEOROUTE_WAYS";

/// A loaded road network plus where it came from.
pub struct Dataset {
    pub source: CsvSource,
    pub graph: GeoGraph,
    pub load_time: Duration,
}

impl Dataset {
    /// Resolve both CSV paths and load the graph.
    pub fn load(nodes: Option<&Path>, ways: Option<&Path>) -> Result<Self> {
        let nodes = resolve_path(nodes, NODES_ENV, "--nodes")?;
        let ways = resolve_path(ways, WAYS_ENV, "--ways")?;

        let started = Instant::now();
        let source = CsvSource::new(nodes, ways);
        let graph = load_graph(&source).with_context(|| {
            format!(
                "failed to load road network from {} and {}",
                source.nodes_path().display(),
                source.ways_path().display()
            )
        })?;
        let load_time = started.elapsed();

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "road network ready"
        );

        Ok(Self {
            source,
            graph,
            load_time,
        })
    }
}

fn resolve_path(flag: Option<&Path>, env_var: &str, flag_name: &str) -> Result<PathBuf> {
    if let Some(path) = flag {
        return Ok(path.to_path_buf());
    }
    env::var_os(env_var).map(PathBuf::from).ok_or_else(|| {
        anyhow!("no {flag_name} file given; pass {flag_name} <FILE> or set {env_var}")
    })
}
