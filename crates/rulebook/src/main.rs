//! Rulebook - Entry Point
//!
//! | Command | Description |
//! |---------|-------------|
//! | `rulebook` / `rulebook list` | List discovered rules and their state |
//! | `rulebook apply` | Run every enabled rule |
//! | `rulebook update` | Sync rule sources and install their dependencies |

use anyhow::Context;
use clap::{Parser, Subcommand};
use rulebook::Rulebook;
use rulebook::commands::{NO_RULES_HINT, NO_SOURCES_HINT};
use rulebook::listing::write_listing;
use rulebook::infrastructure::init_logging;
use std::path::PathBuf;

/// Command line interface for Rulebook
#[derive(Parser, Debug)]
#[command(name = "rulebook")]
#[command(about = "Rulebook - Discover and apply project convention rules")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Project directory (defaults to the current directory)
    #[arg(short, long)]
    pub project_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Rulebook subcommands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// List discovered rules (default)
    List,
    /// Run every enabled rule
    Apply,
    /// Sync rule sources and install their dependencies
    Update,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let project_dir = match cli.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    let rulebook = Rulebook::load(cli.config.as_deref(), &project_dir)?;
    init_logging(&rulebook.config().config.logging)?;
    rulebook.config().log_sources();

    if rulebook.sources().is_empty() {
        println!("{NO_SOURCES_HINT}");
        return Ok(());
    }

    match cli.command.unwrap_or(Command::List) {
        Command::List => {
            let rules = rulebook.list()?;
            if rules.is_empty() {
                println!("{NO_RULES_HINT}");
            } else {
                write_listing(&mut std::io::stdout().lock(), &rules)?;
            }
        }
        Command::Apply => match rulebook.apply().await? {
            Some(report) => println!(
                "{} rule(s) passed, {} excluded",
                report.executed_count(),
                report.skipped
            ),
            None => println!("{NO_RULES_HINT}"),
        },
        Command::Update => rulebook.update().await?,
    }
    Ok(())
}
