//! Liftoff Core - Core library for the release pipeline helpers
//!
//! This crate provides the shared types, error handling, configuration,
//! workflow inputs, body templates and the release and rollback steps used
//! by the Liftoff CLI.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod hosting;
pub mod inputs;
pub mod templates;
pub mod types;
pub mod workflow;

pub use error::{HostingError, HostingResult, LiftoffError, Result};
pub use hosting::SourceHosting;
pub use inputs::{ReleaseInputs, RepoContext, RollbackInputs, WorkflowEnv};
pub use types::{Commit, PullRequest, Registry, RepoSlug};
