//! Rollback record command

use clap::Args;
use tracing::info;

use liftoff_core::workflow::{RollbackOutcome, RollbackRecorder};
use liftoff_core::{RollbackInputs, WorkflowEnv};

use crate::cli::{output, runtime, Cli, OutputFormat};

/// Open an issue recording a failed release
#[derive(Debug, Args)]
pub struct RollbackRecordCommand {
    /// Dry run - print the issue without calling the API
    #[arg(long)]
    pub dry_run: bool,
}

impl RollbackRecordCommand {
    /// Execute the rollback record command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        runtime()?.block_on(self.run(cli))
    }

    async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(dry_run = self.dry_run, "executing rollback-record command");
        let (config, _) = cli.load_config()?;
        let env = WorkflowEnv::from_process();
        let inputs = RollbackInputs::from_env(&env, &config)?;

        let client = cli.github_client(&env, &config, self.dry_run)?;
        let recorder = RollbackRecorder::new(&client, &config).with_dry_run(self.dry_run);

        match recorder.record(&inputs).await? {
            RollbackOutcome::Planned(issue) => match cli.format {
                OutputFormat::Json => output::json(&serde_json::json!({
                    "status": "planned",
                    "title": issue.title,
                    "labels": issue.labels,
                    "body": issue.body,
                }))?,
                OutputFormat::Text => {
                    println!("{}", output::header(&issue.title));
                    println!("{}", output::key_value("Labels", &issue.labels.join(", ")));
                    println!();
                    println!("{}", issue.body);
                }
            },
            RollbackOutcome::Filed(issue) => match cli.format {
                OutputFormat::Json => output::json(&serde_json::json!({
                    "status": "filed",
                    "number": issue.number,
                    "url": issue.html_url,
                }))?,
                OutputFormat::Text => {
                    if !cli.quiet {
                        output::success(&format!(
                            "Opened issue #{} {}",
                            issue.number,
                            output::path_style().apply_to(&issue.html_url)
                        ));
                    }
                }
            },
        }

        Ok(())
    }
}
