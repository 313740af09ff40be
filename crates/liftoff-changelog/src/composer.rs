//! Release notes composition

use liftoff_core::config::NotesConfig;
use liftoff_core::{PullRequest, RepoContext, SourceHosting};
use tracing::{debug, info, instrument, warn};

use crate::generator::ChangelogGenerator;
use crate::release_notes::build_description;

/// Join the description block, the changelog and the pull request footer
pub fn compose_notes(description: &str, changelog: &str, pr: Option<&PullRequest>) -> String {
    let mut notes = match (description.is_empty(), changelog.is_empty()) {
        (true, _) => changelog.to_string(),
        (false, true) => description.to_string(),
        (false, false) => format!("{}\n\n{}", description, changelog),
    };
    if let Some(pr) = pr {
        notes.push_str(&format!("\n\n---\n**PR:** #{} by @{}", pr.number, pr.author));
    }
    notes
}

/// Composes the release notes for the commit that triggered the workflow
pub struct ReleaseNotesComposer<'a, H: SourceHosting + ?Sized> {
    hosting: &'a H,
    generator: ChangelogGenerator,
    scan_depth: u8,
}

impl<'a, H: SourceHosting + ?Sized> ReleaseNotesComposer<'a, H> {
    /// Create a composer with the default notes settings
    pub fn new(hosting: &'a H) -> Self {
        Self::with_config(hosting, &NotesConfig::default())
    }

    /// Create a composer from the notes settings
    pub fn with_config(hosting: &'a H, config: &NotesConfig) -> Self {
        Self {
            hosting,
            generator: ChangelogGenerator::new().with_empty_tree_sha(&config.empty_tree_sha),
            scan_depth: config.pull_request_scan_depth,
        }
    }

    /// Use a custom changelog generator
    pub fn with_generator(mut self, generator: ChangelogGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Find the merged pull request whose merge commit is `context.sha`
    ///
    /// Only the most recently updated closed pull requests are scanned. A
    /// failure to list them is logged and treated as no match.
    pub async fn find_merged_pull_request(&self, context: &RepoContext) -> Option<PullRequest> {
        let pulls = match self
            .hosting
            .list_closed_pull_requests(&context.repo, self.scan_depth)
            .await
        {
            Ok(pulls) => pulls,
            Err(e) => {
                warn!(error = %e, "cannot list pull requests");
                return None;
            }
        };

        let found = pulls.into_iter().find(|pr| pr.is_merged_as(&context.sha));
        match &found {
            Some(pr) => info!(number = pr.number, title = %pr.title, "found merged pull request"),
            None => debug!(scanned = self.scan_depth, "no merged pull request for commit"),
        }
        found
    }

    /// Compose the release notes; never fails
    #[instrument(skip(self, context), fields(repo = %context.repo, sha = %context.sha))]
    pub async fn compose(&self, context: &RepoContext) -> String {
        info!("composing release notes");
        let pr = self.find_merged_pull_request(context).await;
        let description = pr.as_ref().map(build_description).unwrap_or_default();
        let changelog = self.generator.generate_formatted(self.hosting, context).await;

        let notes = compose_notes(&description, &changelog, pr.as_ref());
        debug!(notes_len = notes.len(), "release notes composed");
        notes
    }
}
