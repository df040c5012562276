//! Route command handler for computing a path between two nodes.

use std::io;

use anyhow::Result;

use georoute_cli::output::{render_json, render_report_text, OutputFormat};
use georoute_cli::terminal::ColorPalette;
use georoute_lib::{plan_path, Error as RouteError, PathRequest, RouteAlgorithm};

use crate::commands::dataset::Dataset;

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting node name (or id with `by_id`).
    pub from: String,
    /// Destination node name (or id with `by_id`).
    pub to: String,
    /// Algorithm to use when searching.
    pub algorithm: RouteAlgorithm,
    /// Treat `from` / `to` as node identifiers.
    pub by_id: bool,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library PathRequest.
    pub fn to_request(&self) -> PathRequest {
        if self.by_id {
            PathRequest::by_id(&self.from, &self.to, self.algorithm)
        } else {
            PathRequest::by_name(&self.from, &self.to, self.algorithm)
        }
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    dataset: &Dataset,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let request = args.to_request();
    let report = plan_path(&dataset.graph, &request).map_err(handle_route_failure)?;

    let mut stdout = io::stdout().lock();
    match format {
        OutputFormat::Text => render_report_text(&mut stdout, &report, &ColorPalette::detect())?,
        OutputFormat::Json => render_json(&mut stdout, &report)?,
    }
    Ok(())
}

/// Turn library errors into user-facing messages.
pub fn handle_route_failure(err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownNode { name, suggestions } => {
            anyhow::anyhow!(format_unknown_node_message(&name, &suggestions))
        }
        RouteError::RouteNotFound { start, goal } => {
            anyhow::anyhow!(format_route_not_found_message(&start, &goal))
        }
        other => anyhow::Error::new(other),
    }
}

fn format_unknown_node_message(name: &str, suggestions: &[String]) -> String {
    let mut message = format!("Unknown node '{}'.", name);
    match suggestions {
        [] => {}
        [only] => message.push_str(&format!(" Did you mean '{only}'?")),
        many => {
            let joined = many
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ");
            message.push_str(&format!(" Did you mean one of: {}?", joined));
        }
    }
    message
}

fn format_route_not_found_message(start: &str, goal: &str) -> String {
    format!(
        "No route found between {} and {}. The nodes lie in disconnected parts of the road network.",
        start, goal
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_respects_by_id() {
        let mut args = RouteCommandArgs {
            from: "n1".to_string(),
            to: "n5".to_string(),
            algorithm: RouteAlgorithm::Dijkstra,
            by_id: true,
        };
        let request = args.to_request();
        assert_eq!(request.start, georoute_lib::NodeRef::Id("n1".to_string()));
        assert_eq!(request.algorithm, RouteAlgorithm::Dijkstra);

        args.by_id = false;
        assert_eq!(
            args.to_request().goal,
            georoute_lib::NodeRef::Name("n5".to_string())
        );
    }

    #[test]
    fn unknown_node_message_lists_suggestions() {
        assert_eq!(format_unknown_node_message("Fox", &[]), "Unknown node 'Fox'.");
        assert_eq!(
            format_unknown_node_message("Fox", &["Foix".to_string()]),
            "Unknown node 'Fox'. Did you mean 'Foix'?"
        );
        assert_eq!(
            format_unknown_node_message("Fox", &["Foix".to_string(), "Fos".to_string()]),
            "Unknown node 'Fox'. Did you mean one of: 'Foix', 'Fos'?"
        );
    }

    #[test]
    fn route_not_found_is_mapped() {
        let err = handle_route_failure(RouteError::RouteNotFound {
            start: "Foix".to_string(),
            goal: "Cabane du Bois".to_string(),
        });
        assert!(err
            .to_string()
            .starts_with("No route found between Foix and Cabane du Bois."));
    }
}
