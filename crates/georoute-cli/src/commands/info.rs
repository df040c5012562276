//! Info command handler: summarize the loaded road network.

use std::io::{self, Write};

use anyhow::Result;
use serde::Serialize;

use georoute_cli::output::{render_json, OutputFormat};
use georoute_cli::terminal::{format_millis, format_with_separators, ColorPalette};

use crate::commands::dataset::Dataset;

#[derive(Debug, Serialize)]
struct DatasetInfo {
    nodes_file: String,
    ways_file: String,
    nodes: usize,
    named_nodes: usize,
    edges: usize,
    load_time_ms: f64,
}

impl DatasetInfo {
    fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            nodes_file: dataset.source.nodes_path().display().to_string(),
            ways_file: dataset.source.ways_path().display().to_string(),
            nodes: dataset.graph.node_count(),
            named_nodes: dataset
                .graph
                .nodes()
                .filter(|node| node.name.is_some())
                .count(),
            edges: dataset.graph.edge_count(),
            load_time_ms: dataset.load_time.as_secs_f64() * 1000.0,
        }
    }
}

/// Handle the info subcommand.
pub fn handle_info_command(dataset: &Dataset, format: OutputFormat) -> Result<()> {
    let info = DatasetInfo::from_dataset(dataset);
    let mut stdout = io::stdout().lock();

    match format {
        OutputFormat::Json => render_json(&mut stdout, &info)?,
        OutputFormat::Text => {
            let p = ColorPalette::detect();
            writeln!(stdout, "Nodes file: {}", info.nodes_file)?;
            writeln!(stdout, "Ways file:  {}", info.ways_file)?;
            writeln!(
                stdout,
                "Nodes:      {}{}{} ({} named)",
                p.white_bold,
                format_with_separators(info.nodes as u64),
                p.reset,
                format_with_separators(info.named_nodes as u64)
            )?;
            writeln!(
                stdout,
                "Edges:      {}{}{}",
                p.white_bold,
                format_with_separators(info.edges as u64),
                p.reset
            )?;
            writeln!(
                stdout,
                "Load time:  {}{}{}",
                p.yellow,
                format_millis(dataset.load_time),
                p.reset
            )?;
        }
    }
    Ok(())
}
