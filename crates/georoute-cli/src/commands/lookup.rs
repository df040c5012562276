//! Lookup command handler: list every node registered under a name.

use std::io;

use anyhow::Result;
use serde::Serialize;

use georoute_cli::output::{render_json, render_lookup_text, OutputFormat};
use georoute_cli::terminal::ColorPalette;
use georoute_lib::{resolve_node, NodeRef, NodeSummary};

use crate::commands::dataset::Dataset;
use crate::commands::route::handle_route_failure;

#[derive(Debug, Serialize)]
struct LookupResult<'a> {
    name: &'a str,
    nodes: Vec<NodeSummary>,
}

/// Handle the lookup subcommand.
pub fn handle_lookup_command(dataset: &Dataset, format: OutputFormat, name: &str) -> Result<()> {
    resolve_node(&dataset.graph, &NodeRef::Name(name.to_string()))
        .map_err(handle_route_failure)?;

    let nodes: Vec<NodeSummary> = dataset
        .graph
        .nodes_named(name)
        .into_iter()
        .map(NodeSummary::from)
        .collect();

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            render_lookup_text(&mut stdout, name, &nodes, &ColorPalette::detect())?
        }
        OutputFormat::Json => render_json(&mut stdout, &LookupResult { name, nodes })?,
    }
    Ok(())
}
