mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "reviewbot",
    about = "Pick pull-request reviewers from an evaluated approval policy",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root holding .reviewbot/config.yaml (default: auto-detect from .reviewbot/ or .git/)
    #[arg(long, global = true, env = "REVIEWBOT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Log selection decisions to stderr
    #[arg(long, global = true, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the policy leaves still waiting on review
    Leaves {
        /// Pull request snapshot (YAML)
        snapshot: PathBuf,
    },

    /// Compute every reviewer the policy wants, ignoring existing requests
    Select {
        /// Pull request snapshot (YAML)
        snapshot: PathBuf,
        /// Seed for random reviewer selection (default: sampling.seed, else random)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Compute the review requests still to be issued
    Plan {
        /// Pull request snapshot (YAML)
        snapshot: PathBuf,
        /// Seed for random reviewer selection (default: sampling.seed, else random)
        #[arg(long)]
        seed: Option<u64>,
        /// Also write the plan as JSON to this file
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Check review rules in a snapshot for likely mistakes
    Lint {
        /// Pull request snapshot (YAML)
        snapshot: PathBuf,
    },

    /// Show or validate the configuration
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Leaves { snapshot } => cmd::leaves::run(&snapshot, cli.json),
        Commands::Select { snapshot, seed } => cmd::select::run(&root, &snapshot, seed, cli.json),
        Commands::Plan {
            snapshot,
            seed,
            out,
        } => cmd::plan::run(&root, &snapshot, seed, out.as_deref(), cli.json),
        Commands::Lint { snapshot } => cmd::lint::run(&snapshot, cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
