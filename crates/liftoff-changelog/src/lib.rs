//! Liftoff Changelog - Release notes composition
//!
//! This crate extracts sections from pull request bodies, classifies commits
//! by their Conventional Commits prefix, builds the changelog since the last
//! tag and composes the final release notes.

pub mod composer;
pub mod formatter;
pub mod generator;
pub mod parser;
pub mod release_notes;
pub mod sections;
pub mod types;

#[cfg(test)]
mod test_support;

pub use composer::{compose_notes, ReleaseNotesComposer};
pub use generator::{Baseline, ChangelogGenerator};
pub use parser::{CommitParser, ConventionalParser};
pub use release_notes::build_description;
pub use sections::{extract_section, PrSection};
pub use types::{Changelog, ChangelogEntry, ClassifiedCommit, CommitCategory, Section};
