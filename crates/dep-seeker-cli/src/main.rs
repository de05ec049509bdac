//! dep-seeker CLI tool.
//!
//! Usage:
//! ```bash
//! dep-seeker check [OPTIONS] [PATH]
//! dep-seeker list-rules
//! dep-seeker init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;

/// Finds unused module and library dependencies in multi-module JVM projects
#[derive(Parser)]
#[command(name = "dep-seeker")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze every module of a project
    Check {
        /// Project root (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Build graph manifest exported by the build
        /// (default: <PATH>/build/dep-seeker/graph.json)
        #[arg(short, long)]
        manifest: Option<PathBuf>,

        /// Where to write the aggregate report (default: `report` from config)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only run specific rules (comma-separated names or codes)
        #[arg(long)]
        rules: Option<String>,

        /// Report violations without failing, whatever the config says
        #[arg(long)]
        warn_only: bool,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
    /// One-line-per-violation compact format.
    Compact,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Check {
            path,
            manifest,
            report,
            format,
            rules,
            warn_only,
        } => commands::check::run(&commands::check::CheckArgs {
            path,
            manifest,
            report,
            format,
            rules,
            warn_only,
            config: cli.config,
        }),
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
