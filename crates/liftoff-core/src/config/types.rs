//! Configuration types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::{
    DEFAULT_API_URL, DEFAULT_ARTIFACTS_DIR, DEFAULT_SERVER_URL, DEFAULT_UPLOAD_URL, EMPTY_TREE_SHA,
};

/// Main configuration for Liftoff
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema")]
    pub schema: Option<String>,

    /// Hosting platform endpoints
    pub github: GitHubConfig,

    /// Release notes composition
    pub notes: NotesConfig,

    /// Release creation
    pub release: ReleaseConfig,

    /// Failure-tracking issues
    pub issue: IssueConfig,
}

/// Hosting platform endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// REST API base URL
    pub api_url: String,

    /// Web server URL, used for links in generated Markdown
    pub server_url: String,

    /// Asset upload base URL, used when a release carries no upload URL
    pub upload_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            server_url: DEFAULT_SERVER_URL.to_string(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
        }
    }
}

/// Release notes composition
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// How many recently closed pull requests to scan for the merged one
    pub pull_request_scan_depth: u8,

    /// Comparison base used when the repository has no tags yet
    pub empty_tree_sha: String,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            pull_request_scan_depth: 10,
            empty_tree_sha: EMPTY_TREE_SHA.to_string(),
        }
    }
}

/// Release creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Directory whose files are attached to the release
    pub artifacts_dir: PathBuf,

    /// Create releases as drafts
    pub draft: bool,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
            draft: false,
        }
    }
}

/// Failure-tracking issues
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueConfig {
    /// Labels applied to the tracking issue
    pub labels: Vec<String>,
}

impl Default for IssueConfig {
    fn default() -> Self {
        Self {
            labels: vec![
                "release-failure".to_string(),
                "needs-investigation".to_string(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.github.api_url, "https://api.github.com");
        assert_eq!(config.notes.pull_request_scan_depth, 10);
        assert_eq!(config.release.artifacts_dir, PathBuf::from("release-artifacts"));
        assert!(!config.release.draft);
        assert_eq!(
            config.issue.labels,
            vec!["release-failure", "needs-investigation"]
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[release]\ndraft = true\n").unwrap();
        assert!(config.release.draft);
        assert_eq!(config.release.artifacts_dir, PathBuf::from("release-artifacts"));
        assert_eq!(config.notes.empty_tree_sha, EMPTY_TREE_SHA);
    }
}
