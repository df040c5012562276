//! Output formatting for path reports, comparisons and lookups.
//!
//! Text renderers write to any [`Write`] so they can be exercised against an
//! in-memory buffer; the command handlers pass a locked stdout.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::time::Duration;

use georoute_lib::{AlgorithmComparison, NodeSummary, PathReport};
use serde::Serialize;

use crate::terminal::{format_km, format_millis, format_with_separators, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{other}' (expected text or json)"
            )),
        }
    }
}

/// Print the footer with elapsed time.
pub fn print_footer(elapsed: Duration) {
    let palette = ColorPalette::detect();
    let elapsed_ms = elapsed.as_millis();
    let time_str = if elapsed_ms < 1000 {
        format!("{}ms", elapsed_ms)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    };

    println!("\n{}Completed in {}{}", palette.gray, time_str, palette.reset);
}

/// Render any serializable value as pretty JSON followed by a newline.
///
/// # Errors
///
/// Returns an error if JSON serialization or writing fails.
pub fn render_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    out.write_all(b"\n")
}

/// Render a path report as a tagged list of nodes followed by totals.
pub fn render_report_text<W: Write>(
    out: &mut W,
    report: &PathReport,
    palette: &ColorPalette,
) -> io::Result<()> {
    let p = palette;
    writeln!(
        out,
        "Route from {}{}{} to {}{}{} ({} hops; algorithm: {}):",
        p.white_bold,
        report.start.display_name(),
        p.reset,
        p.white_bold,
        report.goal.display_name(),
        p.reset,
        report.hop_count(),
        report.algorithm
    )?;

    let last = report.steps.len().saturating_sub(1);
    for (index, step) in report.steps.iter().enumerate() {
        let tag = if index == 0 {
            format!("{}STRT{} ", p.tag_start, p.reset)
        } else if index == last {
            format!("{}GOAL{} ", p.tag_goal, p.reset)
        } else {
            "     ".to_string()
        };
        writeln!(out, " {}{}", tag, describe_node(step, p))?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Path distance:   {}{}{}",
        p.cyan,
        format_km(report.path_distance),
        p.reset
    )?;
    writeln!(
        out,
        "Direct distance: {}{}{}",
        p.cyan,
        format_km(report.direct_distance),
        p.reset
    )?;
    writeln!(
        out,
        "Nodes settled:   {}",
        format_with_separators(report.settled as u64)
    )?;
    writeln!(
        out,
        "Search time:     {}{}{}",
        p.yellow,
        format_millis(report.search_time),
        p.reset
    )
}

/// Render a side-by-side comparison of both algorithms.
pub fn render_comparison_text<W: Write>(
    out: &mut W,
    comparison: &AlgorithmComparison,
    palette: &ColorPalette,
) -> io::Result<()> {
    let p = palette;
    let reference = &comparison.dijkstra;
    writeln!(
        out,
        "Comparison from {}{}{} to {}{}{}:",
        p.white_bold,
        reference.start.display_name(),
        p.reset,
        p.white_bold,
        reference.goal.display_name(),
        p.reset
    )?;
    writeln!(
        out,
        "{:<10} {:>12} {:>14} {:>9} {:>6}",
        "algorithm", "time", "distance", "settled", "hops"
    )?;
    for report in [&comparison.dijkstra, &comparison.a_star] {
        writeln!(
            out,
            "{:<10} {:>12} {:>14} {:>9} {:>6}",
            report.algorithm.to_string(),
            format_millis(report.search_time),
            format_km(report.path_distance),
            format_with_separators(report.settled as u64),
            report.hop_count()
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "Direct distance:  {}",
        format_km(reference.direct_distance)
    )?;
    writeln!(
        out,
        "Paths identical:  {}{}{}",
        p.verdict(comparison.paths_identical),
        yes_no(comparison.paths_identical),
        p.reset
    )?;
    writeln!(
        out,
        "Distances agree:  {}{}{}",
        p.verdict(comparison.distances_agree),
        yes_no(comparison.distances_agree),
        p.reset
    )?;
    writeln!(
        out,
        "A* speedup:       {}{:.1}%{}",
        p.yellow, comparison.a_star_speedup_percent, p.reset
    )
}

/// Render every node registered under `name`.
pub fn render_lookup_text<W: Write>(
    out: &mut W,
    name: &str,
    nodes: &[NodeSummary],
    palette: &ColorPalette,
) -> io::Result<()> {
    let plural = if nodes.len() == 1 { "" } else { "s" };
    writeln!(
        out,
        "{}{}{}: {} node{}",
        palette.white_bold,
        name,
        palette.reset,
        nodes.len(),
        plural
    )?;
    for node in nodes {
        writeln!(
            out,
            " - {}{}{} ({:.6}, {:.6})",
            palette.gray, node.id, palette.reset, node.lat, node.lon
        )?;
    }
    if nodes.len() > 1 {
        writeln!(
            out,
            "Routing by name uses the first entry ({}).",
            nodes[0].id
        )?;
    }
    Ok(())
}

fn describe_node(node: &NodeSummary, p: &ColorPalette) -> String {
    match node.name.as_deref() {
        Some(name) => format!(
            "{}{}{} {}({}){}",
            p.white_bold, name, p.reset, p.gray, node.id, p.reset
        ),
        None => format!("{}{}{}", p.gray, node.id, p.reset),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
