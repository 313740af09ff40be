//! GitHub REST payloads

use liftoff_core::types::{Issue, NewIssue, NewRelease, Release, Tag};
use liftoff_core::{Commit, PullRequest};
use serde::{Deserialize, Serialize};

/// Account reference embedded in other payloads
#[derive(Debug, Clone, Deserialize)]
pub struct UserRef {
    pub login: String,
}

/// Entry of `GET /repos/{owner}/{repo}/pulls`
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPayload {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub user: Option<UserRef>,
    #[serde(default)]
    pub merged_at: Option<String>,
    #[serde(default)]
    pub merge_commit_sha: Option<String>,
}

impl From<PullRequestPayload> for PullRequest {
    fn from(payload: PullRequestPayload) -> Self {
        Self {
            number: payload.number,
            author: payload.user.map(|u| u.login).unwrap_or_default(),
            title: payload.title,
            body: payload.body.unwrap_or_default(),
            merge_commit_sha: payload.merge_commit_sha,
            merged: payload.merged_at.is_some(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagCommitRef {
    pub sha: String,
}

/// Entry of `GET /repos/{owner}/{repo}/tags`
#[derive(Debug, Clone, Deserialize)]
pub struct TagPayload {
    pub name: String,
    pub commit: TagCommitRef,
}

impl From<TagPayload> for Tag {
    fn from(payload: TagPayload) -> Self {
        Self {
            name: payload.name,
            commit_sha: payload.commit.sha,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitAuthor {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GitCommit {
    pub message: String,
    pub author: Option<GitAuthor>,
}

/// Commit entry of a comparison
#[derive(Debug, Clone, Deserialize)]
pub struct CommitPayload {
    pub sha: String,
    pub commit: GitCommit,
    /// Platform account, absent when the author email is not linked
    pub author: Option<UserRef>,
}

impl From<CommitPayload> for Commit {
    fn from(payload: CommitPayload) -> Self {
        let name = payload.commit.author.map(|a| a.name).unwrap_or_default();
        let commit = Commit::new(payload.sha, payload.commit.message, name);
        match payload.author {
            Some(user) => commit.with_login(user.login),
            None => commit,
        }
    }
}

/// Body of `GET /repos/{owner}/{repo}/compare/{base}...{head}`
#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonPayload {
    #[serde(default)]
    pub commits: Vec<CommitPayload>,
}

/// Body of `POST /repos/{owner}/{repo}/releases`
#[derive(Debug, Clone, Serialize)]
pub struct CreateReleaseRequest<'a> {
    pub tag_name: &'a str,
    pub name: &'a str,
    pub body: &'a str,
    pub draft: bool,
    pub prerelease: bool,
    pub target_commitish: &'a str,
}

impl<'a> From<&'a NewRelease> for CreateReleaseRequest<'a> {
    fn from(release: &'a NewRelease) -> Self {
        Self {
            tag_name: &release.tag_name,
            name: &release.name,
            body: &release.body,
            draft: release.draft,
            prerelease: release.prerelease,
            target_commitish: &release.target_commitish,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleasePayload {
    pub id: u64,
    pub html_url: String,
    #[serde(default)]
    pub upload_url: String,
}

impl From<ReleasePayload> for Release {
    fn from(payload: ReleasePayload) -> Self {
        Self {
            id: payload.id,
            html_url: payload.html_url,
            upload_url: payload.upload_url,
        }
    }
}

/// Body of `POST /repos/{owner}/{repo}/issues`
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssueRequest<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub labels: &'a [String],
}

impl<'a> From<&'a NewIssue> for CreateIssueRequest<'a> {
    fn from(issue: &'a NewIssue) -> Self {
        Self {
            title: &issue.title,
            body: &issue.body,
            labels: &issue.labels,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssuePayload {
    pub number: u64,
    pub html_url: String,
}

impl From<IssuePayload> for Issue {
    fn from(payload: IssuePayload) -> Self {
        Self {
            number: payload.number,
            html_url: payload.html_url,
        }
    }
}

/// Error body returned by the API
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pull_request_payload() {
        let json = r###"[
            {"number": 42, "title": "Fix startup", "body": null, "user": {"login": "jdoe"},
             "merged_at": "2024-01-01T00:00:00Z", "merge_commit_sha": "deadbeef", "state": "closed"},
            {"number": 41, "title": "Closed unmerged", "body": "## Description\nx",
             "user": {"login": "amy"}, "merged_at": null, "merge_commit_sha": "cafebabe"}
        ]"###;
        let pulls: Vec<PullRequestPayload> = serde_json::from_str(json).unwrap();
        let pulls: Vec<PullRequest> = pulls.into_iter().map(PullRequest::from).collect();

        assert!(pulls[0].merged);
        assert_eq!(pulls[0].body, "");
        assert!(pulls[0].is_merged_as("deadbeef"));
        assert!(!pulls[1].merged);
        assert!(!pulls[1].is_merged_as("cafebabe"));
    }

    #[test]
    fn test_comparison_payload() {
        let json = r#"{"status": "ahead", "commits": [
            {"sha": "a1", "commit": {"message": "feat: add foo\n\nbody", "author": {"name": "Jane Doe", "email": "j@example.com"}},
             "author": {"login": "jdoe"}},
            {"sha": "a2", "commit": {"message": "fix: bar", "author": {"name": "Unlinked Person"}}, "author": null}
        ]}"#;
        let payload: ComparisonPayload = serde_json::from_str(json).unwrap();
        let commits: Vec<Commit> = payload.commits.into_iter().map(Commit::from).collect();

        assert_eq!(commits[0].attribution(), "jdoe");
        assert_eq!(commits[0].subject(), "feat: add foo");
        assert_eq!(commits[1].attribution(), "Unlinked Person");
    }

    #[test]
    fn test_tag_payload() {
        let json = r#"[{"name": "20240101-abc1234", "commit": {"sha": "abc", "url": "x"}, "zipball_url": "z"}]"#;
        let tags: Vec<TagPayload> = serde_json::from_str(json).unwrap();
        let tag = Tag::from(tags[0].clone());
        assert_eq!(tag.name, "20240101-abc1234");
        assert_eq!(tag.commit_sha, "abc");
    }

    #[test]
    fn test_release_request_serialization() {
        let release = NewRelease {
            tag_name: "t".to_string(),
            name: "n".to_string(),
            body: "b".to_string(),
            draft: false,
            prerelease: true,
            target_commitish: "sha".to_string(),
        };
        let value = serde_json::to_value(CreateReleaseRequest::from(&release)).unwrap();
        assert_eq!(value["prerelease"], true);
        assert_eq!(value["target_commitish"], "sha");
    }

    #[test]
    fn test_issue_request_serialization() {
        let issue = NewIssue {
            title: "t".to_string(),
            body: "b".to_string(),
            labels: vec!["release-failure".to_string()],
        };
        let value = serde_json::to_value(CreateIssueRequest::from(&issue)).unwrap();
        assert_eq!(value["labels"][0], "release-failure");
    }
}
