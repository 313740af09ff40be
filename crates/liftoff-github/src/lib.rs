//! Liftoff GitHub - GitHub REST client
//!
//! Provides [`GitHubClient`], the production implementation of
//! [`liftoff_core::SourceHosting`].

pub mod client;
pub mod error;
pub mod models;

pub use client::GitHubClient;
pub use error::{GitHubError, Result};
