//! Core types for Liftoff

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// An `owner/name` repository slug
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoSlug {
    /// Account or organization that owns the repository
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoSlug {
    /// Create a new slug
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl std::str::FromStr for RepoSlug {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self::new(owner, name))
            }
            _ => Err(InputError::invalid(
                "GITHUB_REPOSITORY",
                format!("expected owner/name, got '{}'", s),
            )),
        }
    }
}

/// A pull request as reported by the hosting platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Login of the PR author
    pub author: String,
    /// PR title
    pub title: String,
    /// Free-text body (empty when the PR has none)
    pub body: String,
    /// SHA of the merge commit, if any
    pub merge_commit_sha: Option<String>,
    /// Whether the PR was merged (as opposed to closed)
    pub merged: bool,
}

impl PullRequest {
    /// Whether this PR was merged as the given commit
    pub fn is_merged_as(&self, sha: &str) -> bool {
        self.merged && self.merge_commit_sha.as_deref() == Some(sha)
    }
}

/// A commit from a comparison between two references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit SHA
    pub sha: String,
    /// Full commit message
    pub message: String,
    /// Platform account of the author, when the platform could resolve one
    pub author_login: Option<String>,
    /// Author name as recorded in the commit itself
    pub author_name: String,
}

impl Commit {
    /// Create a new commit without a resolved platform account
    pub fn new(
        sha: impl Into<String>,
        message: impl Into<String>,
        author_name: impl Into<String>,
    ) -> Self {
        Self {
            sha: sha.into(),
            message: message.into(),
            author_login: None,
            author_name: author_name.into(),
        }
    }

    /// Set the platform account of the author
    pub fn with_login(mut self, login: impl Into<String>) -> Self {
        self.author_login = Some(login.into());
        self
    }

    /// First line of the message
    pub fn subject(&self) -> &str {
        self.message.split('\n').next().unwrap_or_default()
    }

    /// Name used to credit the commit: platform handle, else the raw author name
    pub fn attribution(&self) -> &str {
        match self.author_login.as_deref() {
            Some(login) if !login.is_empty() => login,
            _ => &self.author_name,
        }
    }
}

/// A repository tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name
    pub name: String,
    /// Commit the tag points to
    pub commit_sha: String,
}

/// Request to create a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRelease {
    /// Tag to create (or reuse)
    pub tag_name: String,
    /// Display name
    pub name: String,
    /// Markdown body
    pub body: String,
    /// Create as draft
    pub draft: bool,
    /// Mark as prerelease
    pub prerelease: bool,
    /// Commit the tag should point at
    pub target_commitish: String,
}

/// A created release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Numeric release identifier
    pub id: u64,
    /// Web URL of the release
    pub html_url: String,
    /// Asset upload endpoint, possibly a URI template
    pub upload_url: String,
}

/// Request to create an issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
    /// Issue title
    pub title: String,
    /// Markdown body
    pub body: String,
    /// Labels to apply
    pub labels: Vec<String>,
}

/// A created issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number
    pub number: u64,
    /// Web URL of the issue
    pub html_url: String,
}

/// Container registries the release workflow pushes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Registry {
    /// DigitalOcean Container Registry
    Docr,
    /// GitHub Container Registry
    Ghcr,
    /// Docker Hub
    Dhcr,
}

impl Registry {
    /// Short label used in release and issue bodies
    pub fn label(&self) -> &'static str {
        match self {
            Self::Docr => "DOCR",
            Self::Ghcr => "GHCR",
            Self::Dhcr => "DHCR",
        }
    }

    /// Prefix of the workflow variables describing this registry
    pub fn env_prefix(&self) -> &'static str {
        match self {
            Self::Docr => "DO",
            Self::Ghcr => "GHCR",
            Self::Dhcr => "DH",
        }
    }
}

impl std::fmt::Display for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_slug_parse() {
        let slug: RepoSlug = "octo/widgets".parse().unwrap();
        assert_eq!(slug.owner, "octo");
        assert_eq!(slug.name, "widgets");
        assert_eq!(slug.to_string(), "octo/widgets");
    }

    #[test]
    fn test_repo_slug_rejects_malformed() {
        assert!("octo".parse::<RepoSlug>().is_err());
        assert!("/widgets".parse::<RepoSlug>().is_err());
        assert!("a/b/c".parse::<RepoSlug>().is_err());
    }

    #[test]
    fn test_commit_subject_and_attribution() {
        let commit = Commit::new("abc", "fix: crash\n\nlong body", "Jane Doe");
        assert_eq!(commit.subject(), "fix: crash");
        assert_eq!(commit.attribution(), "Jane Doe");

        let commit = commit.with_login("jdoe");
        assert_eq!(commit.attribution(), "jdoe");
    }

    #[test]
    fn test_pull_request_merged_as() {
        let pr = PullRequest {
            number: 7,
            author: "octo".to_string(),
            title: "Add thing".to_string(),
            body: String::new(),
            merge_commit_sha: Some("deadbeef".to_string()),
            merged: true,
        };
        assert!(pr.is_merged_as("deadbeef"));
        assert!(!pr.is_merged_as("cafebabe"));

        let closed = PullRequest {
            merged: false,
            ..pr
        };
        assert!(!closed.is_merged_as("deadbeef"));
    }
}
