#![forbid(unsafe_code)]

mod cmd;
mod output;

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser, Subcommand};
use rally_core::config::resolve_config;
use rally_core::error::ErrorCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cmd::Context;
use output::{CliError, CodedError, OutputMode, render_error, resolve_output_mode};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "rally: who-beat-whom graphs from tennis match results",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Match dataset (CSV). Overrides `[dataset] path` in config.
    #[arg(long, global = true, value_name = "CSV")]
    data: Option<PathBuf>,

    /// Project config file (default: ./rally.toml).
    #[arg(long, global = true, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Dataset",
        about = "List tournaments, categories and years",
        long_about = "List the tournaments, categories and years a selection can be made from.",
        after_help = "EXAMPLES:\n    # What does the dataset cover?\n    rally catalog --data atp.csv\n\n    # Emit machine-readable output\n    rally catalog --data atp.csv --format json"
    )]
    Catalog(cmd::catalog::CatalogArgs),

    #[command(
        next_help_heading = "Views",
        about = "Summarize the match graph",
        long_about = "Player and edge counts, density, component counts and content hash.",
        after_help = "EXAMPLES:\n    # One tournament, one year\n    rally summary --tournament Wimbledon --year 2023\n\n    # A whole category\n    rally summary --category \"Masters 1000\" --year 2022"
    )]
    Summary(cmd::summary::SummaryArgs),

    #[command(
        next_help_heading = "Views",
        about = "Show the adjacency matrix",
        long_about = "Show who beat whom as an adjacency matrix; rows are winners.",
        after_help = "EXAMPLES:\n    # Full matrix\n    rally matrix -t Wimbledon -y 2023\n\n    # Only the 16 busiest players\n    rally matrix -t Wimbledon -y 2023 --top 16"
    )]
    Matrix(cmd::matrix::MatrixArgs),

    #[command(
        next_help_heading = "Views",
        about = "Diameter and periphery",
        long_about = "Diameter, radius, center and periphery of each strongly connected component.",
        after_help = "EXAMPLES:\n    rally diameter --tournament \"Australian Open\" --year 2021"
    )]
    Diameter(cmd::diameter::DiameterArgs),

    #[command(
        next_help_heading = "Views",
        about = "Density and assortativity",
        long_about = "Graph density plus rank-group and degree assortativity.",
        after_help = "EXAMPLES:\n    rally density --category \"Grand Slam\" --year 2023 --format json"
    )]
    Density(cmd::density::DensityArgs),

    #[command(
        next_help_heading = "Views",
        about = "Degree distributions",
        long_about = "Histograms of wins (out-degree), losses (in-degree) and total degree.",
        after_help = "EXAMPLES:\n    rally degrees -t Wimbledon -y 2023"
    )]
    Degrees(cmd::degrees::DegreesArgs),

    #[command(
        next_help_heading = "Views",
        about = "Clustering and components",
        long_about = "Average clustering, transitivity, strongly and weakly connected components.",
        after_help = "EXAMPLES:\n    # Overall clustering\n    rally clustering -t Rome -y 2022\n\n    # Local clustering of chosen players\n    rally clustering -t Rome -y 2022 --player \"Djokovic N.\" --player \"Nadal R.\""
    )]
    Clustering(cmd::clustering::ClusteringArgs),

    #[command(
        next_help_heading = "Views",
        about = "Centrality rankings",
        long_about = "Top players by degree, closeness, betweenness and eigenvector centrality.",
        after_help = "EXAMPLES:\n    rally centrality -t Wimbledon -y 2023 --top 10"
    )]
    Centrality(cmd::centrality::CentralityArgs),

    #[command(
        next_help_heading = "Interoperability",
        about = "Export the match graph",
        long_about = "Write the match graph as Graphviz DOT or a JSON edge list.",
        after_help = "EXAMPLES:\n    # Render with Graphviz\n    rally export -t Wimbledon -y 2023 | dot -Tsvg > wimbledon.svg\n\n    # JSON edge list to a file\n    rally export -t Wimbledon -y 2023 --as json -o wimbledon.json"
    )]
    Export(cmd::export::ExportArgs),

    #[command(
        next_help_heading = "Shell",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    rally completions bash\n\n    # Generate zsh completions\n    rally completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("RALLY_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "rally=debug,info"
        } else {
            "rally=info,warn"
        })
    });

    let format = env::var("RALLY_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

/// Load config and settle the output mode.
fn build_context(cli: &Cli) -> anyhow::Result<Context> {
    let project_root = env::current_dir()?;
    let config = resolve_config(
        &project_root,
        cli.config.as_deref(),
        cli.data.as_deref(),
        cli.json,
    )
    .map_err(|e| CodedError::new(ErrorCode::ConfigParseError, format!("{e:#}")))?;

    let output = cli
        .format
        .unwrap_or_else(|| OutputMode::from_resolved(&config.resolved_output));
    Ok(Context { config, output })
}

fn dispatch(command: &Commands, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Commands::Catalog(args) => cmd::catalog::run_catalog(args, ctx),
        Commands::Summary(args) => cmd::summary::run_summary(args, ctx),
        Commands::Matrix(args) => cmd::matrix::run_matrix(args, ctx),
        Commands::Diameter(args) => cmd::diameter::run_diameter(args, ctx),
        Commands::Density(args) => cmd::density::run_density(args, ctx),
        Commands::Degrees(args) => cmd::degrees::run_degrees(args, ctx),
        Commands::Clustering(args) => cmd::clustering::run_clustering(args, ctx),
        Commands::Centrality(args) => cmd::centrality::run_centrality(args, ctx),
        Commands::Export(args) => cmd::export::run_export(args, ctx),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    }
}

/// Render `err` on stderr and pick the exit status.
fn fail(err: &anyhow::Error, mode: OutputMode) -> ExitCode {
    let code = cmd::error_code(err);
    debug!(%code, error = ?err, "command failed");
    let cli_error = CliError::from_code(code, format!("{err:#}"));
    if render_error(mode, &cli_error).is_err() {
        eprintln!("error[{code}]: {err:#}");
    }
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let ctx = match build_context(&cli) {
        Ok(ctx) => ctx,
        Err(err) => return fail(&err, resolve_output_mode(cli.format, cli.json)),
    };

    match dispatch(&cli.command, &ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => fail(&err, ctx.output),
    }
}
