//! GitHub REST API client
//!
//! Implements [`SourceHosting`] on top of the REST v3 endpoints used by the
//! release workflow.
//!
//! ## Authentication
//!
//! Requests carry the workflow's `GITHUB_TOKEN` as a bearer token.

use liftoff_core::config::GitHubConfig;
use liftoff_core::types::{Issue, NewIssue, NewRelease, Release, Tag};
use liftoff_core::{Commit, HostingResult, PullRequest, RepoSlug, SourceHosting};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use crate::error::{GitHubError, Result};
use crate::models::*;

const API_VERSION: &str = "2022-11-28";
const ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("liftoff/", env!("CARGO_PKG_VERSION"));

/// GitHub API client
pub struct GitHubClient {
    client: Client,
    token: String,
    api_url: String,
    upload_url: String,
}

impl GitHubClient {
    /// Create a client for the configured endpoints
    pub fn new(token: impl Into<String>, config: &GitHubConfig) -> Result<Self> {
        Ok(Self {
            client: Client::builder().user_agent(USER_AGENT).build()?,
            token: token.into(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            upload_url: config.upload_url.trim_end_matches('/').to_string(),
        })
    }

    /// URL of a repository endpoint
    fn repo_url(&self, repo: &RepoSlug, path: &str) -> String {
        format!("{}/repos/{}/{}/{}", self.api_url, repo.owner, repo.name, path)
    }

    /// Asset upload endpoint of a release, without its URI template suffix
    pub fn asset_upload_url(&self, repo: &RepoSlug, release: &Release) -> String {
        match release.upload_url.split('{').next() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!(
                "{}/repos/{}/{}/releases/{}/assets",
                self.upload_url, repo.owner, repo.name, release.id
            ),
        }
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", ACCEPT)
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Fail on a non-success status, keeping GitHub's error message
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorPayload>(&text)
            .map(|e| e.message)
            .unwrap_or(text);
        Err(GitHubError::ApiError {
            status: status.as_u16(),
            message,
        })
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = Self::check(request.send().await?).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn pulls(&self, repo: &RepoSlug, limit: u8) -> Result<Vec<PullRequest>> {
        let per_page = limit.to_string();
        let request = self.request(Method::GET, &self.repo_url(repo, "pulls")).query(&[
            ("state", "closed"),
            ("sort", "updated"),
            ("direction", "desc"),
            ("per_page", per_page.as_str()),
        ]);
        let pulls: Vec<PullRequestPayload> = Self::send_json(request).await?;
        Ok(pulls.into_iter().map(PullRequest::from).collect())
    }

    async fn tags(&self, repo: &RepoSlug) -> Result<Option<Tag>> {
        let request = self
            .request(Method::GET, &self.repo_url(repo, "tags"))
            .query(&[("per_page", "1")]);
        let tags: Vec<TagPayload> = Self::send_json(request).await?;
        Ok(tags.into_iter().next().map(Tag::from))
    }

    async fn compare(&self, repo: &RepoSlug, base: &str, head: &str) -> Result<Vec<Commit>> {
        let path = format!("compare/{}...{}", base, head);
        let request = self.request(Method::GET, &self.repo_url(repo, &path));
        let comparison: ComparisonPayload = Self::send_json(request).await?;
        Ok(comparison.commits.into_iter().map(Commit::from).collect())
    }

    async fn post_release(&self, repo: &RepoSlug, release: &NewRelease) -> Result<Release> {
        let request = self
            .request(Method::POST, &self.repo_url(repo, "releases"))
            .json(&CreateReleaseRequest::from(release));
        let payload: ReleasePayload = Self::send_json(request).await?;
        Ok(payload.into())
    }

    async fn post_asset(
        &self,
        repo: &RepoSlug,
        release: &Release,
        name: &str,
        data: Vec<u8>,
    ) -> Result<()> {
        let url = self.asset_upload_url(repo, release);
        let request = self
            .request(Method::POST, &url)
            .query(&[("name", name)])
            .header("Content-Type", "application/octet-stream")
            .body(data);
        Self::check(request.send().await?).await?;
        Ok(())
    }

    async fn post_issue(&self, repo: &RepoSlug, issue: &NewIssue) -> Result<Issue> {
        let request = self
            .request(Method::POST, &self.repo_url(repo, "issues"))
            .json(&CreateIssueRequest::from(issue));
        let payload: IssuePayload = Self::send_json(request).await?;
        Ok(payload.into())
    }
}

#[async_trait::async_trait]
impl SourceHosting for GitHubClient {
    fn name(&self) -> &str {
        "GitHub"
    }

    #[instrument(skip(self, repo), fields(repo = %repo))]
    async fn list_closed_pull_requests(
        &self,
        repo: &RepoSlug,
        limit: u8,
    ) -> HostingResult<Vec<PullRequest>> {
        let pulls = self.pulls(repo, limit).await?;
        debug!(count = pulls.len(), "listed closed pull requests");
        Ok(pulls)
    }

    #[instrument(skip(self, repo), fields(repo = %repo))]
    async fn latest_tag(&self, repo: &RepoSlug) -> HostingResult<Option<Tag>> {
        Ok(self.tags(repo).await?)
    }

    #[instrument(skip(self, repo), fields(repo = %repo))]
    async fn compare_commits(
        &self,
        repo: &RepoSlug,
        base: &str,
        head: &str,
    ) -> HostingResult<Vec<Commit>> {
        let commits = self.compare(repo, base, head).await?;
        debug!(count = commits.len(), "compared commits");
        Ok(commits)
    }

    #[instrument(skip(self, repo, release), fields(repo = %repo, tag = %release.tag_name))]
    async fn create_release(&self, repo: &RepoSlug, release: &NewRelease) -> HostingResult<Release> {
        info!("creating release");
        Ok(self.post_release(repo, release).await?)
    }

    #[instrument(skip(self, repo, release, data), fields(repo = %repo, release = release.id, size = data.len()))]
    async fn upload_release_asset(
        &self,
        repo: &RepoSlug,
        release: &Release,
        name: &str,
        data: Vec<u8>,
    ) -> HostingResult<()> {
        Ok(self.post_asset(repo, release, name, data).await?)
    }

    #[instrument(skip(self, repo, issue), fields(repo = %repo, title = %issue.title))]
    async fn create_issue(&self, repo: &RepoSlug, issue: &NewIssue) -> HostingResult<Issue> {
        info!("creating issue");
        Ok(self.post_issue(repo, issue).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GitHubClient {
        GitHubClient::new("test-token", &GitHubConfig::default()).unwrap()
    }

    fn release(upload_url: &str) -> Release {
        Release {
            id: 99,
            html_url: "https://github.com/octo/widget/releases/99".to_string(),
            upload_url: upload_url.to_string(),
        }
    }

    #[test]
    fn test_repo_url() {
        let repo = RepoSlug::new("octo", "widget");
        assert_eq!(
            client().repo_url(&repo, "compare/v1...abc"),
            "https://api.github.com/repos/octo/widget/compare/v1...abc"
        );
    }

    #[test]
    fn test_api_url_trailing_slash() {
        let config = GitHubConfig {
            api_url: "https://ghe.example.com/api/v3/".to_string(),
            ..Default::default()
        };
        let client = GitHubClient::new("t", &config).unwrap();
        let repo = RepoSlug::new("octo", "widget");
        assert_eq!(
            client.repo_url(&repo, "tags"),
            "https://ghe.example.com/api/v3/repos/octo/widget/tags"
        );
    }

    #[test]
    fn test_upload_url_strips_template() {
        let repo = RepoSlug::new("octo", "widget");
        let url = client().asset_upload_url(
            &repo,
            &release("https://uploads.github.com/repos/octo/widget/releases/99/assets{?name,label}"),
        );
        assert_eq!(url, "https://uploads.github.com/repos/octo/widget/releases/99/assets");
    }

    #[test]
    fn test_upload_url_fallback() {
        let repo = RepoSlug::new("octo", "widget");
        let url = client().asset_upload_url(&repo, &release(""));
        assert_eq!(url, "https://uploads.github.com/repos/octo/widget/releases/99/assets");
    }

    #[test]
    fn test_name() {
        assert_eq!(client().name(), "GitHub");
    }
}
