//! Compare command handler: run both algorithms on the same endpoints.

use std::io;

use anyhow::Result;

use georoute_cli::output::{render_comparison_text, render_json, OutputFormat};
use georoute_cli::terminal::ColorPalette;
use georoute_lib::{compare_algorithms, NodeRef};

use crate::commands::dataset::Dataset;
use crate::commands::route::handle_route_failure;

/// Arguments for the compare command.
#[derive(Debug, Clone)]
pub struct CompareCommandArgs {
    pub from: String,
    pub to: String,
    pub by_id: bool,
}

impl CompareCommandArgs {
    fn endpoints(&self) -> (NodeRef, NodeRef) {
        if self.by_id {
            (NodeRef::Id(self.from.clone()), NodeRef::Id(self.to.clone()))
        } else {
            (
                NodeRef::Name(self.from.clone()),
                NodeRef::Name(self.to.clone()),
            )
        }
    }
}

/// Handle the compare subcommand.
pub fn handle_compare_command(
    dataset: &Dataset,
    format: OutputFormat,
    args: &CompareCommandArgs,
) -> Result<()> {
    let (start, goal) = args.endpoints();
    let comparison =
        compare_algorithms(&dataset.graph, &start, &goal).map_err(handle_route_failure)?;

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => {
            render_comparison_text(&mut stdout, &comparison, &ColorPalette::detect())?
        }
        OutputFormat::Json => render_json(&mut stdout, &comparison)?,
    }
    Ok(())
}
