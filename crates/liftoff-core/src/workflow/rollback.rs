//! Failure-tracking issue workflow

use tracing::{info, instrument};

use crate::config::Config;
use crate::error::Result;
use crate::hosting::SourceHosting;
use crate::inputs::RollbackInputs;
use crate::templates::{render_rollback_issue, rollback_issue_title};
use crate::types::{Issue, NewIssue};

/// What the rollback record step did
#[derive(Debug, Clone)]
pub enum RollbackOutcome {
    /// Dry run: the issue that would have been opened
    Planned(NewIssue),
    /// The issue was opened
    Filed(Issue),
}

/// Files an issue recording a failed release and the state of each registry
pub struct RollbackRecorder<'a, H: SourceHosting + ?Sized> {
    hosting: &'a H,
    labels: Vec<String>,
    dry_run: bool,
}

impl<'a, H: SourceHosting + ?Sized> RollbackRecorder<'a, H> {
    /// Create a recorder applying the configured issue labels
    pub fn new(hosting: &'a H, config: &Config) -> Self {
        Self {
            hosting,
            labels: config.issue.labels.clone(),
            dry_run: false,
        }
    }

    /// Set dry run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Build the issue request
    pub fn plan(&self, inputs: &RollbackInputs) -> NewIssue {
        NewIssue {
            title: rollback_issue_title(inputs),
            body: render_rollback_issue(inputs),
            labels: self.labels.clone(),
        }
    }

    /// Open the tracking issue
    #[instrument(skip(self, inputs), fields(repo = %inputs.repo, sha = %inputs.sha_short))]
    pub async fn record(&self, inputs: &RollbackInputs) -> Result<RollbackOutcome> {
        let issue = self.plan(inputs);

        if self.dry_run {
            info!(title = %issue.title, "dry run, not opening issue");
            return Ok(RollbackOutcome::Planned(issue));
        }

        let created = self.hosting.create_issue(&inputs.repo, &issue).await?;
        info!(number = created.number, url = %created.html_url, "opened failure issue");
        Ok(RollbackOutcome::Filed(created))
    }
}
