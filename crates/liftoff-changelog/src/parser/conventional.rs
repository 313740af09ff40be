//! Conventional Commits subject parser
//!
//! Only the `feat` and `fix` types are recognized; everything else is listed
//! verbatim, and merge commits are dropped.

use regex::Regex;
use std::sync::LazyLock;

use super::CommitParser;
use crate::types::{ClassifiedCommit, CommitCategory};
use liftoff_core::Commit;

/// Prefix of a feature subject, including an optional scope
static FEAT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^feat(?:\(.*?\))?:\s*").expect("Invalid regex"));

/// Prefix of a fix subject, including an optional scope
static FIX_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^fix(?:\(.*?\))?:\s*").expect("Invalid regex"));

/// Parser for Conventional Commits subjects
#[derive(Debug, Default)]
pub struct ConventionalParser;

impl ConventionalParser {
    /// Create a new parser
    pub fn new() -> Self {
        Self
    }

    /// Category and display text of a subject line
    pub fn classify_subject(subject: &str) -> (CommitCategory, String) {
        if subject.starts_with("feat:") || subject.starts_with("feat(") {
            (
                CommitCategory::Feature,
                FEAT_PREFIX.replace(subject, "").into_owned(),
            )
        } else if subject.starts_with("fix:") || subject.starts_with("fix(") {
            (
                CommitCategory::Fix,
                FIX_PREFIX.replace(subject, "").into_owned(),
            )
        } else if subject.starts_with("Merge") {
            (CommitCategory::Ignored, subject.to_string())
        } else {
            (CommitCategory::Other, subject.to_string())
        }
    }
}

impl CommitParser for ConventionalParser {
    fn parse(&self, commit: &Commit) -> ClassifiedCommit {
        let (category, text) = Self::classify_subject(commit.subject());
        ClassifiedCommit {
            category,
            text,
            attribution: commit.attribution().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_commit(message: &str) -> Commit {
        Commit::new("abc1234567890", message, "Test Author")
    }

    #[test]
    fn test_parse_scoped_feat() {
        let parsed = ConventionalParser::new().parse(&make_commit("feat(api): add foo"));
        assert_eq!(parsed.category, CommitCategory::Feature);
        assert_eq!(parsed.text, "add foo");
    }

    #[test]
    fn test_parse_fix() {
        let parsed = ConventionalParser::new().parse(&make_commit("fix: bar"));
        assert_eq!(parsed.category, CommitCategory::Fix);
        assert_eq!(parsed.text, "bar");
    }

    #[test]
    fn test_merge_is_ignored() {
        let parsed = ConventionalParser::new().parse(&make_commit("Merge pull request #3 from x/y"));
        assert_eq!(parsed.category, CommitCategory::Ignored);
    }

    #[test]
    fn test_other_is_verbatim() {
        let parsed = ConventionalParser::new().parse(&make_commit("chore(deps): bump serde"));
        assert_eq!(parsed.category, CommitCategory::Other);
        assert_eq!(parsed.text, "chore(deps): bump serde");

        let parsed = ConventionalParser::new().parse(&make_commit("feature: not a feat prefix"));
        assert_eq!(parsed.category, CommitCategory::Other);
    }

    #[test]
    fn test_only_subject_is_inspected() {
        let parsed =
            ConventionalParser::new().parse(&make_commit("update docs\n\nfeat: in the body"));
        assert_eq!(parsed.category, CommitCategory::Other);
        assert_eq!(parsed.text, "update docs");
    }

    #[test]
    fn test_attribution_prefers_login() {
        let commit = make_commit("fix: crash").with_login("jdoe");
        assert_eq!(ConventionalParser::new().parse(&commit).attribution, "jdoe");
        assert_eq!(
            ConventionalParser::new().parse(&make_commit("fix: crash")).attribution,
            "Test Author"
        );
    }

    #[test]
    fn test_prefix_whitespace_is_stripped() {
        let (category, text) = ConventionalParser::classify_subject("feat:   spaced out");
        assert_eq!(category, CommitCategory::Feature);
        assert_eq!(text, "spaced out");
    }
}
