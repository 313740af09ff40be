//! Workflow inputs
//!
//! The release workflow hands its state to each step as environment variables.
//! [`WorkflowEnv`] snapshots those variables once, and the typed input structs
//! below are built from the snapshot so every operation receives an explicit
//! value instead of reading the process environment itself.

use std::collections::HashMap;

use crate::config::Config;
use crate::error::InputError;
use crate::types::{Registry, RepoSlug};

/// Snapshot of the key/value variables provided by the workflow
#[derive(Debug, Clone, Default)]
pub struct WorkflowEnv {
    vars: HashMap<String, String>,
}

impl WorkflowEnv {
    /// Snapshot the current process environment
    pub fn from_process() -> Self {
        Self::from_vars(std::env::vars())
    }

    /// Build a snapshot from explicit pairs
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of a variable; empty values count as unset
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Value of a required variable
    pub fn require(&self, key: &str) -> Result<&str, InputError> {
        self.get(key)
            .ok_or_else(|| InputError::Missing(key.to_string()))
    }

    /// Owned value of a variable, empty when unset
    pub fn get_or_empty(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    /// Boolean flag; only the exact string `true` is true
    pub fn flag(&self, key: &str) -> bool {
        self.get(key) == Some("true")
    }
}

/// Repository and commit that triggered the workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoContext {
    /// Repository slug
    pub repo: RepoSlug,
    /// Commit being released
    pub sha: String,
    /// Web server URL used for links
    pub server_url: String,
}

impl RepoContext {
    /// Create a context directly
    pub fn new(repo: RepoSlug, sha: impl Into<String>, server_url: impl Into<String>) -> Self {
        Self {
            repo,
            sha: sha.into(),
            server_url: server_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Read `GITHUB_REPOSITORY`, `GITHUB_SHA` and `GITHUB_SERVER_URL`
    pub fn from_env(env: &WorkflowEnv, config: &Config) -> Result<Self, InputError> {
        let repo: RepoSlug = env.require("GITHUB_REPOSITORY")?.parse()?;
        let sha = env.require("GITHUB_SHA")?;
        let server_url = env
            .get("GITHUB_SERVER_URL")
            .unwrap_or(&config.github.server_url);
        Ok(Self::new(repo, sha, server_url))
    }

    /// Web URL of the repository
    pub fn repo_url(&self) -> String {
        format!("{}/{}", self.server_url, self.repo)
    }
}

/// Digest reported by each registry push, absent when the push failed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistryDigests {
    /// DigitalOcean digest
    pub docr: Option<String>,
    /// GitHub Container Registry digest
    pub ghcr: Option<String>,
    /// Docker Hub digest
    pub dhcr: Option<String>,
}

impl RegistryDigests {
    /// Read `DO_DIGEST`, `GHCR_DIGEST` and `DH_DIGEST`
    pub fn from_env(env: &WorkflowEnv) -> Self {
        let read = |registry: Registry| {
            env.get(&format!("{}_DIGEST", registry.env_prefix()))
                .map(str::to_string)
        };
        Self {
            docr: read(Registry::Docr),
            ghcr: read(Registry::Ghcr),
            dhcr: read(Registry::Dhcr),
        }
    }

    /// Digest for one registry
    pub fn get(&self, registry: Registry) -> Option<&str> {
        match registry {
            Registry::Docr => self.docr.as_deref(),
            Registry::Ghcr => self.ghcr.as_deref(),
            Registry::Dhcr => self.dhcr.as_deref(),
        }
    }

    /// Registries without a digest
    pub fn missing(&self) -> Vec<Registry> {
        [Registry::Docr, Registry::Ghcr, Registry::Dhcr]
            .into_iter()
            .filter(|r| self.get(*r).is_none())
            .collect()
    }

    /// Whether every registry reported a digest
    pub fn all_present(&self) -> bool {
        self.missing().is_empty()
    }
}

/// Where the container image lives in each registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCoordinates {
    /// Repository slug, used as the GHCR image path
    pub repository: RepoSlug,
    /// Image name
    pub image_name: String,
    /// DigitalOcean registry name
    pub do_registry_name: String,
    /// Docker Hub account
    pub dh_username: String,
}

impl ImageCoordinates {
    /// Image path in a registry, without tag or digest
    pub fn image(&self, registry: Registry) -> String {
        match registry {
            Registry::Ghcr => format!("ghcr.io/{}", self.repository),
            Registry::Dhcr => format!("{}/{}", self.dh_username, self.image_name),
            Registry::Docr => format!(
                "registry.digitalocean.com/{}/{}",
                self.do_registry_name, self.image_name
            ),
        }
    }

    /// Image reference by tag
    pub fn tagged(&self, registry: Registry, tag: &str) -> String {
        format!("{}:{}", self.image(registry), tag)
    }

    /// Image reference pinned to a digest
    pub fn pinned(&self, registry: Registry, digest: &str) -> String {
        format!("{}@{}", self.image(registry), digest)
    }
}

/// Inputs of the release-creation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseInputs {
    /// Commit being released
    pub sha: String,
    /// Build timestamp, first half of the tag name
    pub build_timestamp: String,
    /// Abbreviated commit SHA
    pub sha_short: String,
    /// Image locations
    pub image: ImageCoordinates,
    /// Per-registry push digests
    pub digests: RegistryDigests,
    /// Pre-composed release notes
    pub release_notes: String,
    /// Base64-encoded GPG public key
    pub gpg_public_key: String,
    /// Whether the image IDs matched across registries
    pub image_match: bool,
    /// Expected local image ID
    pub image_id: String,
}

impl ReleaseInputs {
    /// Read the release step's variables
    pub fn from_env(env: &WorkflowEnv) -> Result<Self, InputError> {
        Ok(Self {
            sha: env.require("GITHUB_SHA")?.to_string(),
            build_timestamp: env.require("BUILD_TIMESTAMP")?.to_string(),
            sha_short: env.require("BUILD_SHA_SHORT")?.to_string(),
            image: ImageCoordinates {
                repository: env.require("GITHUB_REPOSITORY")?.parse()?,
                image_name: env.require("IMAGE_NAME")?.to_string(),
                do_registry_name: env.get_or_empty("DO_REGISTRY_NAME"),
                dh_username: env.get_or_empty("DH_USERNAME"),
            },
            digests: RegistryDigests::from_env(env),
            release_notes: env.get_or_empty("RELEASE_NOTES"),
            gpg_public_key: env.get_or_empty("GPG_PUBLIC_KEY"),
            image_match: env.flag("IMAGE_MATCH"),
            image_id: env.get_or_empty("IMAGE_ID"),
        })
    }

    /// Tag created for the release
    pub fn tag_name(&self) -> String {
        format!("{}-{}", self.build_timestamp, self.sha_short)
    }

    /// Display name of the release
    pub fn release_name(&self) -> String {
        format!("{} {}", self.image.image_name, self.sha_short)
    }
}

/// Outcome of each registry rollback
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RollbackStatus {
    /// DigitalOcean rollback succeeded
    pub docr: bool,
    /// GHCR rollback succeeded
    pub ghcr: bool,
    /// Docker Hub rollback succeeded
    pub dhcr: bool,
}

impl RollbackStatus {
    /// Read `DO_ROLLBACK_SUCCESS`, `GHCR_ROLLBACK_SUCCESS` and `DH_ROLLBACK_SUCCESS`
    pub fn from_env(env: &WorkflowEnv) -> Self {
        let read =
            |registry: Registry| env.flag(&format!("{}_ROLLBACK_SUCCESS", registry.env_prefix()));
        Self {
            docr: read(Registry::Docr),
            ghcr: read(Registry::Ghcr),
            dhcr: read(Registry::Dhcr),
        }
    }

    /// Whether the rollback of one registry succeeded
    pub fn succeeded(&self, registry: Registry) -> bool {
        match registry {
            Registry::Docr => self.docr,
            Registry::Ghcr => self.ghcr,
            Registry::Dhcr => self.dhcr,
        }
    }
}

/// Inputs of the failure-tracking step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackInputs {
    /// Repository the issue is filed in
    pub repo: RepoSlug,
    /// Abbreviated commit SHA
    pub sha_short: String,
    /// Whether the build step succeeded
    pub build_success: bool,
    /// Whether a (partial) release was made
    pub release_success: bool,
    /// Per-registry push digests
    pub digests: RegistryDigests,
    /// Per-registry rollback results
    pub rollbacks: RollbackStatus,
    /// Link to the workflow runs
    pub workflow_url: String,
    /// User who triggered the workflow
    pub actor: String,
}

impl RollbackInputs {
    /// Read the failure-tracking step's variables
    pub fn from_env(env: &WorkflowEnv, config: &Config) -> Result<Self, InputError> {
        let repo: RepoSlug = env.require("GITHUB_REPOSITORY")?.parse()?;
        let server_url = env
            .get("GITHUB_SERVER_URL")
            .unwrap_or(&config.github.server_url)
            .trim_end_matches('/');
        Ok(Self {
            workflow_url: format!("{}/{}/actions", server_url, repo),
            repo,
            sha_short: env.require("BUILD_SHA_SHORT")?.to_string(),
            build_success: env.flag("BUILD_SUCCESS"),
            release_success: env.flag("RELEASE_SUCCESS"),
            digests: RegistryDigests::from_env(env),
            rollbacks: RollbackStatus::from_env(env),
            actor: env.get_or_empty("GITHUB_ACTOR"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release_env() -> WorkflowEnv {
        WorkflowEnv::from_vars([
            ("GITHUB_SHA", "0123456789abcdef"),
            ("BUILD_TIMESTAMP", "20240101120000"),
            ("BUILD_SHA_SHORT", "0123456"),
            ("IMAGE_NAME", "widget"),
            ("GITHUB_REPOSITORY", "octo/widget"),
            ("DO_REGISTRY_NAME", "octo-reg"),
            ("DH_USERNAME", "octodh"),
            ("DO_DIGEST", "sha256:do"),
            ("GHCR_DIGEST", "sha256:gh"),
            ("DH_DIGEST", ""),
            ("IMAGE_MATCH", "True"),
        ])
    }

    #[test]
    fn test_empty_values_are_unset() {
        let env = WorkflowEnv::from_vars([("A", ""), ("B", "x")]);
        assert_eq!(env.get("A"), None);
        assert_eq!(env.get("B"), Some("x"));
        assert!(env.require("A").is_err());
    }

    #[test]
    fn test_flag_requires_exact_true() {
        let env = WorkflowEnv::from_vars([("A", "true"), ("B", "True"), ("C", "1")]);
        assert!(env.flag("A"));
        assert!(!env.flag("B"));
        assert!(!env.flag("C"));
        assert!(!env.flag("D"));
    }

    #[test]
    fn test_release_inputs_from_env() {
        let inputs = ReleaseInputs::from_env(&release_env()).unwrap();
        assert_eq!(inputs.tag_name(), "20240101120000-0123456");
        assert_eq!(inputs.release_name(), "widget 0123456");
        assert!(!inputs.image_match);
        assert_eq!(inputs.digests.missing(), vec![Registry::Dhcr]);
        assert!(!inputs.digests.all_present());
    }

    #[test]
    fn test_release_inputs_missing_required() {
        let env = WorkflowEnv::from_vars([("GITHUB_SHA", "abc")]);
        let err = ReleaseInputs::from_env(&env).unwrap_err();
        assert!(matches!(err, InputError::Missing(key) if key == "BUILD_TIMESTAMP"));
    }

    #[test]
    fn test_image_references() {
        let inputs = ReleaseInputs::from_env(&release_env()).unwrap();
        assert_eq!(
            inputs.image.tagged(Registry::Ghcr, "abc"),
            "ghcr.io/octo/widget:abc"
        );
        assert_eq!(
            inputs.image.pinned(Registry::Dhcr, "sha256:x"),
            "octodh/widget@sha256:x"
        );
        assert_eq!(
            inputs.image.image(Registry::Docr),
            "registry.digitalocean.com/octo-reg/widget"
        );
    }

    #[test]
    fn test_repo_context_server_url_fallback() {
        let env = WorkflowEnv::from_vars([
            ("GITHUB_REPOSITORY", "octo/widget"),
            ("GITHUB_SHA", "abc"),
        ]);
        let ctx = RepoContext::from_env(&env, &Config::default()).unwrap();
        assert_eq!(ctx.repo_url(), "https://github.com/octo/widget");

        let env = WorkflowEnv::from_vars([
            ("GITHUB_REPOSITORY", "octo/widget"),
            ("GITHUB_SHA", "abc"),
            ("GITHUB_SERVER_URL", "https://git.example.com/"),
        ]);
        let ctx = RepoContext::from_env(&env, &Config::default()).unwrap();
        assert_eq!(ctx.repo_url(), "https://git.example.com/octo/widget");
    }

    #[test]
    fn test_rollback_inputs_from_env() {
        let env = WorkflowEnv::from_vars([
            ("GITHUB_REPOSITORY", "octo/widget"),
            ("BUILD_SHA_SHORT", "0123456"),
            ("BUILD_SUCCESS", "true"),
            ("GHCR_DIGEST", "sha256:gh"),
            ("GHCR_ROLLBACK_SUCCESS", "true"),
            ("GITHUB_ACTOR", "octocat"),
        ]);
        let inputs = RollbackInputs::from_env(&env, &Config::default()).unwrap();
        assert!(inputs.build_success);
        assert!(!inputs.release_success);
        assert!(inputs.rollbacks.succeeded(Registry::Ghcr));
        assert!(!inputs.rollbacks.succeeded(Registry::Docr));
        assert_eq!(inputs.workflow_url, "https://github.com/octo/widget/actions");
        assert_eq!(inputs.actor, "octocat");
    }
}
