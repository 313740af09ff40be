//! Commit parsing

mod conventional;

pub use conventional::ConventionalParser;

use crate::types::ClassifiedCommit;
use liftoff_core::Commit;

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Classify a commit by its subject line
    fn parse(&self, commit: &Commit) -> ClassifiedCommit;
}
