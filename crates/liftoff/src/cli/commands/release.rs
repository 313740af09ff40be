//! Release command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use liftoff_core::workflow::{ReleaseOptions, ReleaseOutcome, ReleaseWorkflow};
use liftoff_core::{ReleaseInputs, WorkflowEnv};

use crate::cli::{output, runtime, Cli, OutputFormat};

/// Create a release and attach the signed artifacts
#[derive(Debug, Args)]
pub struct ReleaseCommand {
    /// Directory holding the files to attach (default: from configuration)
    #[arg(long, value_name = "DIR")]
    pub artifacts_dir: Option<PathBuf>,

    /// Create the release as a draft
    #[arg(long)]
    pub draft: bool,

    /// Dry run - print the release body without calling the API
    #[arg(long)]
    pub dry_run: bool,
}

impl ReleaseCommand {
    /// Execute the release command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        runtime()?.block_on(self.run(cli))
    }

    async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            artifacts_dir = ?self.artifacts_dir,
            draft = self.draft,
            dry_run = self.dry_run,
            "executing release command"
        );
        let (config, _) = cli.load_config()?;
        let env = WorkflowEnv::from_process();
        let inputs = ReleaseInputs::from_env(&env)?;

        let mut options = ReleaseOptions::from_config(&config).with_dry_run(self.dry_run);
        if let Some(dir) = &self.artifacts_dir {
            options = options.with_artifacts_dir(dir);
        }
        options.draft |= self.draft;

        let client = cli.github_client(&env, &config, self.dry_run)?;
        let workflow = ReleaseWorkflow::new(&client, options);
        let outcome = workflow.execute(&inputs).await?;

        match outcome {
            ReleaseOutcome::Skipped { missing } => {
                let labels: Vec<&str> = missing.iter().map(|r| r.label()).collect();
                match cli.format {
                    OutputFormat::Json => output::json(&serde_json::json!({
                        "status": "skipped",
                        "missing": labels,
                    }))?,
                    OutputFormat::Text => {
                        if !cli.quiet {
                            output::warning(&format!(
                                "Missing registry pushes ({}), skipping release",
                                labels.join(", ")
                            ));
                        }
                    }
                }
            }
            ReleaseOutcome::Planned { release, artifacts } => match cli.format {
                OutputFormat::Json => output::json(&serde_json::json!({
                    "status": "planned",
                    "tag_name": release.tag_name,
                    "name": release.name,
                    "prerelease": release.prerelease,
                    "draft": release.draft,
                    "body": release.body,
                    "artifacts": artifacts.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
                }))?,
                OutputFormat::Text => {
                    println!("{}", output::header("Release (dry run)"));
                    println!(
                        "{}",
                        output::key_value(
                            "Tag",
                            &output::tag_style().apply_to(&release.tag_name).to_string()
                        )
                    );
                    println!("{}", output::key_value("Name", &release.name));
                    println!(
                        "{}",
                        output::key_value("Prerelease", &release.prerelease.to_string())
                    );
                    for artifact in &artifacts {
                        println!("{}", output::key_value("Asset", &artifact.name));
                    }
                    println!();
                    println!("{}", release.body);
                }
            },
            ReleaseOutcome::Created {
                release,
                uploaded,
                outputs,
            } => {
                let written = outputs.write_to_env(&env)?;
                match cli.format {
                    OutputFormat::Json => output::json(&serde_json::json!({
                        "status": "created",
                        "id": release.id,
                        "url": release.html_url,
                        "assets": uploaded,
                        "output_written": written,
                    }))?,
                    OutputFormat::Text => {
                        if !cli.quiet {
                            output::success(&format!(
                                "Created release {} with {} asset(s)",
                                output::path_style().apply_to(&release.html_url),
                                uploaded.len()
                            ));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
