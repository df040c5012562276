use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the georoute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a node name or identifier could not be found in the graph.
    #[error("unknown node: {name}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when no route could be found between two nodes.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when an edge record carries a negative or non-finite distance.
    #[error("invalid distance {weight} km on edge {from} -> {to}")]
    InvalidEdgeWeight { from: String, to: String, weight: f64 },

    /// Raised when a node record carries non-finite coordinates.
    #[error("invalid coordinates for node {id}")]
    InvalidCoordinates { id: String },

    /// Raised when a record source file does not exist.
    #[error("record source not found at {path}")]
    SourceNotFound { path: PathBuf },

    /// Wrapper for CSV parsing errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
