//! Release artifact discovery

use std::path::{Path, PathBuf};

use tracing::{debug, instrument};
use walkdir::WalkDir;

use crate::error::Result;

/// A file to attach to a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Asset name (the file name)
    pub name: String,
    /// Location on disk
    pub path: PathBuf,
}

impl Artifact {
    /// Read the artifact's contents
    pub fn read(&self) -> Result<Vec<u8>> {
        Ok(std::fs::read(&self.path)?)
    }
}

/// Directory holding the signed release artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at a directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory being enumerated
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Regular files directly inside the directory, sorted by name
    ///
    /// Subdirectories are neither listed nor descended into. A missing
    /// directory is an error.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub fn list(&self) -> Result<Vec<Artifact>> {
        let mut artifacts = Vec::new();

        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            artifacts.push(Artifact {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
            });
        }

        debug!(count = artifacts.len(), "listed release artifacts");
        Ok(artifacts)
    }
}
