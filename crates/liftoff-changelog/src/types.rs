//! Changelog types

use serde::{Deserialize, Serialize};

/// Fixed text used when the commit comparison cannot be retrieved
pub const CHANGELOG_FALLBACK: &str = "**Full Changelog**: see commit history for details.";

/// How a commit is presented in the changelog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitCategory {
    /// `feat:` or `feat(scope):` subject
    Feature,
    /// `fix:` or `fix(scope):` subject
    Fix,
    /// Any other subject
    Other,
    /// Merge commits, left out
    Ignored,
}

impl CommitCategory {
    /// Categories rendered in the changelog, in output order
    pub const LISTED: [CommitCategory; 3] = [
        CommitCategory::Feature,
        CommitCategory::Fix,
        CommitCategory::Other,
    ];

    /// Group label in the changelog
    pub fn label(&self) -> &'static str {
        match self {
            Self::Feature => "Features",
            Self::Fix => "Bug Fixes",
            Self::Other => "Other",
            Self::Ignored => "Ignored",
        }
    }
}

/// A commit after classification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedCommit {
    /// Commit category
    pub category: CommitCategory,
    /// Text shown in the changelog
    pub text: String,
    /// Handle or name credited for the commit
    pub attribution: String,
}

/// A group of commits in a changelog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Category of every commit in the group
    pub category: CommitCategory,
    /// Commits in chronological order
    pub commits: Vec<ClassifiedCommit>,
}

impl Section {
    /// Create a new section
    pub fn new(category: CommitCategory) -> Self {
        Self {
            category,
            commits: Vec::new(),
        }
    }

    /// Add a commit to the section
    pub fn add_commit(&mut self, commit: ClassifiedCommit) {
        self.commits.push(commit);
    }

    /// Check if section is empty
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// Commits between the comparison baseline and the released commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Non-empty sections, in output order
    pub sections: Vec<Section>,
    /// Link to the full comparison
    pub compare_url: String,
}

impl ChangelogEntry {
    /// Create an entry with no sections
    pub fn new(compare_url: impl Into<String>) -> Self {
        Self {
            sections: Vec::new(),
            compare_url: compare_url.into(),
        }
    }

    /// Add a section, dropping it when empty
    pub fn add_section(&mut self, section: Section) {
        if !section.is_empty() {
            self.sections.push(section);
        }
    }

    /// Section for a category, if present
    pub fn section(&self, category: CommitCategory) -> Option<&Section> {
        self.sections.iter().find(|s| s.category == category)
    }
}

/// Result of building the changelog part of the release notes
#[derive(Debug, Clone)]
pub enum Changelog {
    /// Commits were retrieved and grouped
    Listed(ChangelogEntry),
    /// The comparison could not be retrieved
    Unavailable,
}

impl Changelog {
    /// Whether the commit listing was retrieved
    pub fn is_listed(&self) -> bool {
        matches!(self, Self::Listed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sections_are_dropped() {
        let mut entry = ChangelogEntry::new("https://example.com/compare");
        entry.add_section(Section::new(CommitCategory::Feature));
        assert!(entry.sections.is_empty());

        let mut fixes = Section::new(CommitCategory::Fix);
        fixes.add_commit(ClassifiedCommit {
            category: CommitCategory::Fix,
            text: "bar".to_string(),
            attribution: "jdoe".to_string(),
        });
        entry.add_section(fixes);
        assert!(entry.section(CommitCategory::Fix).is_some());
        assert!(entry.section(CommitCategory::Feature).is_none());
    }

    #[test]
    fn test_category_labels() {
        let labels: Vec<_> = CommitCategory::LISTED.iter().map(|c| c.label()).collect();
        assert_eq!(labels, vec!["Features", "Bug Fixes", "Other"]);
    }
}
