use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use georoute_cli::output::{print_footer, OutputFormat};
use georoute_lib::RouteAlgorithm;

mod commands;

use commands::compare::{handle_compare_command, CompareCommandArgs};
use commands::dataset::Dataset;
use commands::info::handle_info_command;
use commands::lookup::handle_lookup_command;
use commands::route::{handle_route_command, RouteCommandArgs};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Shortest paths over geo-located road networks"
)]
struct Cli {
    /// Nodes CSV (`id,lat,lon,name`). Defaults to $GEOROUTE_NODES.
    #[arg(long, global = true)]
    nodes: Option<PathBuf>,

    /// Ways CSV (`node_from,node_to,distance_km`). Defaults to $GEOROUTE_WAYS.
    #[arg(long, global = true)]
    ways: Option<PathBuf>,

    /// Output format: text or json.
    #[arg(long, global = true, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the shortest path between two nodes.
    Route {
        /// Starting node name.
        #[arg(long = "from")]
        from: String,
        /// Destination node name.
        #[arg(long = "to")]
        to: String,
        /// Search algorithm: dijkstra or a-star.
        #[arg(long, default_value_t = RouteAlgorithm::AStar)]
        algorithm: RouteAlgorithm,
        /// Interpret --from/--to as node identifiers instead of names.
        #[arg(long)]
        by_id: bool,
    },
    /// Run Dijkstra and A* on the same endpoints and compare them.
    Compare {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
        #[arg(long)]
        by_id: bool,
    },
    /// List every node registered under a name.
    Lookup {
        /// Node name, matched exactly.
        name: String,
    },
    /// Show node and edge counts of the loaded network.
    Info,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let started = Instant::now();

    let dataset = Dataset::load(cli.nodes.as_deref(), cli.ways.as_deref())?;

    match cli.command {
        Command::Route {
            from,
            to,
            algorithm,
            by_id,
        } => {
            let args = RouteCommandArgs {
                from,
                to,
                algorithm,
                by_id,
            };
            handle_route_command(&dataset, cli.format, &args)?;
        }
        Command::Compare { from, to, by_id } => {
            let args = CompareCommandArgs { from, to, by_id };
            handle_compare_command(&dataset, cli.format, &args)?;
        }
        Command::Lookup { name } => handle_lookup_command(&dataset, cli.format, &name)?,
        Command::Info => handle_info_command(&dataset, cli.format)?,
    }

    if cli.format == OutputFormat::Text {
        print_footer(started.elapsed());
    }
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
