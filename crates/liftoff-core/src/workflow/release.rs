//! Release creation workflow

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use crate::artifacts::{Artifact, ArtifactStore};
use crate::config::Config;
use crate::error::Result;
use crate::hosting::SourceHosting;
use crate::inputs::ReleaseInputs;
use crate::templates::render_release_body;
use crate::types::{NewRelease, Registry, Release};

use super::outputs::StepOutputs;

/// Output name flagging a successful release
pub const RELEASE_SUCCESS_OUTPUT: &str = "RELEASE_SUCCESS";

/// Output name carrying the release identifier
pub const RELEASE_ID_OUTPUT: &str = "RELEASE_ID";

/// Options for a release
#[derive(Debug, Clone)]
pub struct ReleaseOptions {
    /// Directory whose files are attached
    pub artifacts_dir: PathBuf,
    /// Create the release as a draft
    pub draft: bool,
    /// Render and report, but call nothing
    pub dry_run: bool,
}

impl ReleaseOptions {
    /// Options taken from the configuration file
    pub fn from_config(config: &Config) -> Self {
        Self {
            artifacts_dir: config.release.artifacts_dir.clone(),
            draft: config.release.draft,
            dry_run: false,
        }
    }

    /// Override the artifacts directory
    pub fn with_artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = dir.into();
        self
    }

    /// Set dry run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

impl Default for ReleaseOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// What the release step did
#[derive(Debug, Clone)]
pub enum ReleaseOutcome {
    /// Not every registry reported a digest; nothing was done
    Skipped {
        /// Registries without a digest
        missing: Vec<Registry>,
    },
    /// Dry run: the release that would have been created
    Planned {
        /// Release request
        release: NewRelease,
        /// Files that would have been attached
        artifacts: Vec<Artifact>,
    },
    /// The release was created and its artifacts attached
    Created {
        /// Created release
        release: Release,
        /// Names of the uploaded assets, in upload order
        uploaded: Vec<String>,
        /// Outputs for later steps
        outputs: StepOutputs,
    },
}

/// Creates a release with the container image details and signed artifacts
pub struct ReleaseWorkflow<'a, H: SourceHosting + ?Sized> {
    hosting: &'a H,
    options: ReleaseOptions,
}

impl<'a, H: SourceHosting + ?Sized> ReleaseWorkflow<'a, H> {
    /// Create a new release workflow
    pub fn new(hosting: &'a H, options: ReleaseOptions) -> Self {
        Self { hosting, options }
    }

    /// Build the release request for the given inputs
    pub fn plan(&self, inputs: &ReleaseInputs) -> NewRelease {
        NewRelease {
            tag_name: inputs.tag_name(),
            name: inputs.release_name(),
            body: render_release_body(inputs),
            draft: self.options.draft,
            prerelease: !inputs.image_match,
            target_commitish: inputs.sha.clone(),
        }
    }

    /// Execute the release
    ///
    /// Missing registry digests are not an error: the step is skipped. Any
    /// failure to create the release or upload an asset is returned as is.
    #[instrument(skip(self, inputs), fields(tag = %inputs.tag_name(), dry_run = self.options.dry_run))]
    pub async fn execute(&self, inputs: &ReleaseInputs) -> Result<ReleaseOutcome> {
        let missing = inputs.digests.missing();
        if !missing.is_empty() {
            info!(?missing, "missing registry pushes, skipping release");
            return Ok(ReleaseOutcome::Skipped { missing });
        }

        let request = self.plan(inputs);
        let artifacts = ArtifactStore::new(&self.options.artifacts_dir).list()?;

        if self.options.dry_run {
            info!(
                tag = %request.tag_name,
                artifacts = artifacts.len(),
                "dry run, not creating release"
            );
            return Ok(ReleaseOutcome::Planned {
                release: request,
                artifacts,
            });
        }

        let repo = &inputs.image.repository;
        let release = self.hosting.create_release(repo, &request).await?;
        info!(id = release.id, url = %release.html_url, "created release");

        let mut uploaded = Vec::with_capacity(artifacts.len());
        for artifact in &artifacts {
            info!(name = %artifact.name, "uploading artifact");
            let data = artifact.read()?;
            self.hosting
                .upload_release_asset(repo, &release, &artifact.name, data)
                .await?;
            uploaded.push(artifact.name.clone());
        }
        debug!(count = uploaded.len(), "artifacts uploaded");

        let mut outputs = StepOutputs::new();
        outputs
            .set(RELEASE_SUCCESS_OUTPUT, true)
            .set(RELEASE_ID_OUTPUT, release.id);

        Ok(ReleaseOutcome::Created {
            release,
            uploaded,
            outputs,
        })
    }
}
