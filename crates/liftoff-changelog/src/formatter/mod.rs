//! Changelog formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use crate::types::Changelog;

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Format a changelog to string
    fn format(&self, changelog: &Changelog) -> String;
}
