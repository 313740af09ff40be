//! Changelog generation

use liftoff_core::config::EMPTY_TREE_SHA;
use liftoff_core::{Commit, HostingResult, RepoContext, SourceHosting};
use tracing::{debug, info, instrument, warn};

use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::parser::{CommitParser, ConventionalParser};
use crate::types::{Changelog, ChangelogEntry, CommitCategory, Section};

/// Reference the new commits are compared against
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Baseline {
    /// Most recently created tag
    Tag(String),
    /// Empty tree, when the repository has no tag yet
    EmptyTree(String),
}

impl Baseline {
    /// Reference passed to the comparison API
    pub fn base_ref(&self) -> &str {
        match self {
            Self::Tag(name) | Self::EmptyTree(name) => name,
        }
    }

    /// Web comparison link from the baseline to the released commit
    pub fn compare_url(&self, context: &RepoContext) -> String {
        format!(
            "{}/compare/{}...{}",
            context.repo_url(),
            self.base_ref(),
            context.sha
        )
    }
}

/// Changelog generator
pub struct ChangelogGenerator {
    parser: Box<dyn CommitParser>,
    formatter: Box<dyn ChangelogFormatter>,
    empty_tree_sha: String,
}

impl ChangelogGenerator {
    /// Create a new generator with default parser and formatter
    pub fn new() -> Self {
        Self {
            parser: Box::new(ConventionalParser::new()),
            formatter: Box::new(MarkdownFormatter::new()),
            empty_tree_sha: EMPTY_TREE_SHA.to_string(),
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Use a custom formatter
    pub fn with_formatter<F: ChangelogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Compare against a different empty-tree object
    pub fn with_empty_tree_sha(mut self, sha: impl Into<String>) -> Self {
        self.empty_tree_sha = sha.into();
        self
    }

    /// Group commits into a changelog entry
    #[instrument(skip(self, commits), fields(commit_count = commits.len()))]
    pub fn generate(&self, commits: &[Commit], compare_url: &str) -> ChangelogEntry {
        let mut entry = ChangelogEntry::new(compare_url);

        let parsed: Vec<_> = commits.iter().map(|c| self.parser.parse(c)).collect();
        for category in CommitCategory::LISTED {
            let mut section = Section::new(category);
            for commit in parsed.iter().filter(|c| c.category == category) {
                section.add_commit(commit.clone());
            }
            entry.add_section(section);
        }

        debug!(
            section_count = entry.sections.len(),
            ignored = parsed
                .iter()
                .filter(|c| c.category == CommitCategory::Ignored)
                .count(),
            "changelog sections built"
        );
        entry
    }

    /// Format a changelog to string
    pub fn format(&self, changelog: &Changelog) -> String {
        self.formatter.format(changelog)
    }

    /// Resolve the comparison baseline for a repository
    pub async fn baseline<H: SourceHosting + ?Sized>(
        &self,
        hosting: &H,
        context: &RepoContext,
    ) -> HostingResult<Baseline> {
        let baseline = match hosting.latest_tag(&context.repo).await? {
            Some(tag) => Baseline::Tag(tag.name),
            None => Baseline::EmptyTree(self.empty_tree_sha.clone()),
        };
        info!(baseline = baseline.base_ref(), head = %context.sha, "resolved comparison baseline");
        Ok(baseline)
    }

    /// Fetch the commits since the baseline and group them
    ///
    /// Any failure to resolve the baseline or retrieve the comparison yields
    /// [`Changelog::Unavailable`] instead of an error.
    #[instrument(skip(self, hosting, context), fields(repo = %context.repo, sha = %context.sha))]
    pub async fn collect<H: SourceHosting + ?Sized>(
        &self,
        hosting: &H,
        context: &RepoContext,
    ) -> Changelog {
        match self.try_collect(hosting, context).await {
            Ok(entry) => Changelog::Listed(entry),
            Err(e) => {
                warn!(error = %e, "cannot generate changelog");
                Changelog::Unavailable
            }
        }
    }

    async fn try_collect<H: SourceHosting + ?Sized>(
        &self,
        hosting: &H,
        context: &RepoContext,
    ) -> HostingResult<ChangelogEntry> {
        let baseline = self.baseline(hosting, context).await?;
        let commits = hosting
            .compare_commits(&context.repo, baseline.base_ref(), &context.sha)
            .await?;
        Ok(self.generate(&commits, &baseline.compare_url(context)))
    }

    /// Collect and format in one step
    pub async fn generate_formatted<H: SourceHosting + ?Sized>(
        &self,
        hosting: &H,
        context: &RepoContext,
    ) -> String {
        let changelog = self.collect(hosting, context).await;
        self.format(&changelog)
    }
}

impl Default for ChangelogGenerator {
    fn default() -> Self {
        Self::new()
    }
}
