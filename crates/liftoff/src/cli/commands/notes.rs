//! Notes command

use clap::Args;
use tracing::info;

use liftoff_changelog::ReleaseNotesComposer;
use liftoff_core::workflow::StepOutputs;
use liftoff_core::{RepoContext, WorkflowEnv};

use crate::cli::{output, runtime, Cli, OutputFormat};

/// Compose release notes for the triggering commit
#[derive(Debug, Args)]
pub struct NotesCommand {
    /// Step output that receives the notes
    #[arg(long, default_value = "RELEASE_NOTES")]
    pub output_name: String,

    /// Commit to compose notes for (default: GITHUB_SHA)
    #[arg(long)]
    pub sha: Option<String>,

    /// Do not write the step output
    #[arg(long)]
    pub no_output: bool,
}

impl NotesCommand {
    /// Execute the notes command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        runtime()?.block_on(self.run(cli))
    }

    async fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(sha = ?self.sha, output_name = %self.output_name, "executing notes command");
        let (config, _) = cli.load_config()?;
        let env = WorkflowEnv::from_process();

        let mut context = RepoContext::from_env(&env, &config)?;
        if let Some(sha) = &self.sha {
            context.sha = sha.clone();
        }

        let client = cli.github_client(&env, &config, false)?;
        let composer = ReleaseNotesComposer::with_config(&client, &config.notes);
        let notes = composer.compose(&context).await;

        let written = if self.no_output {
            false
        } else {
            let mut outputs = StepOutputs::new();
            outputs.set(self.output_name.as_str(), &notes);
            outputs.write_to_env(&env)?
        };

        match cli.format {
            OutputFormat::Json => output::json(&serde_json::json!({
                "repository": context.repo.to_string(),
                "sha": context.sha,
                "notes": notes,
                "output_written": written,
            }))?,
            OutputFormat::Text => {
                println!("{}", notes);
                if written && !cli.quiet {
                    output::success(&format!("Wrote step output {}", self.output_name));
                }
            }
        }

        Ok(())
    }
}
