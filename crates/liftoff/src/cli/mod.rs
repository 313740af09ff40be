//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use liftoff_core::config::{load_config, load_config_or_default, Config};
use liftoff_core::WorkflowEnv;
use liftoff_github::GitHubClient;
use tracing::debug;

use commands::{NotesCommand, ReleaseCommand, RollbackRecordCommand, ValidateCommand};

/// Liftoff - Release pipeline helpers for container image workflows
#[derive(Debug, Parser)]
#[command(name = "liftoff")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Configuration file (default: searched from the working directory)
    #[arg(short, long, global = true, env = "LIFTOFF_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compose release notes for the triggering commit
    Notes(NotesCommand),

    /// Create a release and attach the signed artifacts
    Release(ReleaseCommand),

    /// Open an issue recording a failed release
    RollbackRecord(RollbackRecordCommand),

    /// Validate the configuration file
    Validate(ValidateCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Notes(ref cmd) => cmd.execute(&self),
            Commands::Release(ref cmd) => cmd.execute(&self),
            Commands::RollbackRecord(ref cmd) => cmd.execute(&self),
            Commands::Validate(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load the configuration, falling back to defaults when no file exists
    pub fn load_config(&self) -> anyhow::Result<(Config, Option<PathBuf>)> {
        match &self.config {
            Some(path) => Ok((load_config(path)?, Some(path.clone()))),
            None => {
                let cwd = std::env::current_dir()?;
                Ok(load_config_or_default(&cwd)?)
            }
        }
    }

    /// Build the GitHub client from `GITHUB_TOKEN`
    ///
    /// The token may only be missing when no request will be made.
    pub fn github_client(
        &self,
        env: &WorkflowEnv,
        config: &Config,
        dry_run: bool,
    ) -> anyhow::Result<GitHubClient> {
        let token = if dry_run {
            env.get_or_empty("GITHUB_TOKEN")
        } else {
            env.require("GITHUB_TOKEN")?.to_string()
        };
        debug!(api_url = %config.github.api_url, dry_run, "creating GitHub client");
        Ok(GitHubClient::new(token, &config.github)?)
    }
}

/// Build the runtime for an async command
pub fn runtime() -> anyhow::Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Runtime::new()?)
}
