//! Validate command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use liftoff_core::config::{find_config, load_config, Config};

use crate::cli::{Cli, OutputFormat};
use crate::exit_codes;

/// Validate the configuration file
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Problems found in a configuration file
#[derive(Debug, Default)]
struct ValidationReport {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationReport {
    /// Load the file (which also validates it) and note suspicious settings
    fn check(config_path: Option<&Path>) -> Self {
        let mut report = Self::default();

        let config = match config_path {
            Some(path) => match load_config(path) {
                Ok(config) => config,
                Err(e) => {
                    report.errors.push(format!("Configuration: {}", e));
                    return report;
                }
            },
            None => {
                report
                    .warnings
                    .push("No configuration file found, defaults apply".to_string());
                Config::default()
            }
        };

        if config.issue.labels.is_empty() {
            report
                .warnings
                .push("No labels configured for failure issues".to_string());
        }
        if config.release.draft {
            report
                .warnings
                .push("Releases are created as drafts".to_string());
        }
        report
    }
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(strict = self.strict, "executing validate command");
        let cwd = std::env::current_dir()?;

        let config_path: Option<PathBuf> = cli.config.clone().or_else(|| find_config(&cwd));
        let ValidationReport {
            mut errors,
            mut warnings,
        } = ValidationReport::check(config_path.as_deref());

        // If strict, promote warnings to errors
        if self.strict {
            errors.append(&mut warnings);
        }

        let passed = errors.is_empty();

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": passed,
                    "config_path": config_path.map(|p| p.to_string_lossy().to_string()),
                    "errors": errors,
                    "warnings": warnings
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    println!("{}", style("Validation Results").bold());
                    println!();

                    if let Some(path) = &config_path {
                        println!("Config: {}", style(path.display()).cyan());
                        println!();
                    }

                    if !errors.is_empty() {
                        println!("{}", style("Errors:").red().bold());
                        for error in &errors {
                            println!("  {} {}", style("✗").red(), error);
                        }
                        println!();
                    }

                    if !warnings.is_empty() {
                        println!("{}", style("Warnings:").yellow().bold());
                        for warning in &warnings {
                            println!("  {} {}", style("!").yellow(), warning);
                        }
                        println!();
                    }

                    if passed {
                        println!("{}", style("✓ Configuration is valid").green().bold());
                    } else {
                        println!(
                            "{} with {} error(s)",
                            style("✗ Validation failed").red().bold(),
                            errors.len()
                        );
                    }
                }
            }
        }

        if !passed {
            std::process::exit(exit_codes::VALIDATION_ERROR);
        }

        Ok(())
    }
}
