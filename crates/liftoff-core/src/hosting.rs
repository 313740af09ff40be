//! Source-hosting abstraction
//!
//! The release steps only ever talk to the hosting platform through
//! [`SourceHosting`], so each step can be driven by an in-memory double in
//! tests and by the GitHub REST client in production.

use crate::error::HostingResult;
use crate::types::{Commit, Issue, NewIssue, NewRelease, PullRequest, Release, RepoSlug, Tag};

/// Operations the release workflow needs from a source-hosting platform
#[async_trait::async_trait]
pub trait SourceHosting: Send + Sync {
    /// Name of the platform, for logging
    fn name(&self) -> &str;

    /// List closed pull requests, most recently updated first
    async fn list_closed_pull_requests(
        &self,
        repo: &RepoSlug,
        limit: u8,
    ) -> HostingResult<Vec<PullRequest>>;

    /// Most recently created tag, if the repository has any
    async fn latest_tag(&self, repo: &RepoSlug) -> HostingResult<Option<Tag>>;

    /// Commits reachable from `head` but not from `base`, oldest first
    async fn compare_commits(
        &self,
        repo: &RepoSlug,
        base: &str,
        head: &str,
    ) -> HostingResult<Vec<Commit>>;

    /// Create a release
    async fn create_release(&self, repo: &RepoSlug, release: &NewRelease)
        -> HostingResult<Release>;

    /// Attach a binary asset to a release
    async fn upload_release_asset(
        &self,
        repo: &RepoSlug,
        release: &Release,
        name: &str,
        data: Vec<u8>,
    ) -> HostingResult<()>;

    /// Open an issue
    async fn create_issue(&self, repo: &RepoSlug, issue: &NewIssue) -> HostingResult<Issue>;
}
