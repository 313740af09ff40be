//! Markdown changelog formatter

use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::types::{Changelog, ChangelogEntry, CHANGELOG_FALLBACK};

/// Markdown changelog formatter
///
/// Each group is a bold label followed by one bullet per commit, then a
/// blank line. The comparison link always closes the listing.
#[derive(Debug, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }

    fn format_entry(&self, entry: &ChangelogEntry) -> String {
        let mut output = String::new();

        for section in &entry.sections {
            if section.is_empty() {
                continue;
            }
            output.push_str(&format!("**{}:**\n", section.category.label()));
            let lines: Vec<String> = section
                .commits
                .iter()
                .map(|commit| format!("- {} ({})", commit.text, commit.attribution))
                .collect();
            output.push_str(&lines.join("\n"));
            output.push_str("\n\n");
        }

        output.push_str(&format!("**Full Changelog:** {}", entry.compare_url));
        output
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, changelog), fields(listed = changelog.is_listed()))]
    fn format(&self, changelog: &Changelog) -> String {
        let output = match changelog {
            Changelog::Listed(entry) => self.format_entry(entry),
            Changelog::Unavailable => CHANGELOG_FALLBACK.to_string(),
        };
        debug!(output_len = output.len(), "changelog formatted");
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassifiedCommit, CommitCategory, Section};

    fn commit(category: CommitCategory, text: &str, who: &str) -> ClassifiedCommit {
        ClassifiedCommit {
            category,
            text: text.to_string(),
            attribution: who.to_string(),
        }
    }

    fn section(category: CommitCategory, commits: &[(&str, &str)]) -> Section {
        let mut section = Section::new(category);
        for (text, who) in commits {
            section.add_commit(commit(category, text, who));
        }
        section
    }

    #[test]
    fn test_format_groups() {
        let mut entry = ChangelogEntry::new("https://github.com/octo/widget/compare/v1...abc");
        entry.add_section(section(CommitCategory::Feature, &[("add foo", "jdoe"), ("add baz", "amy")]));
        entry.add_section(section(CommitCategory::Fix, &[("bar", "Jane Doe")]));
        entry.add_section(section(CommitCategory::Other, &[("chore: tidy", "jdoe")]));

        let output = MarkdownFormatter::new().format(&Changelog::Listed(entry));

        assert_eq!(
            output,
            "**Features:**\n- add foo (jdoe)\n- add baz (amy)\n\n\
             **Bug Fixes:**\n- bar (Jane Doe)\n\n\
             **Other:**\n- chore: tidy (jdoe)\n\n\
             **Full Changelog:** https://github.com/octo/widget/compare/v1...abc"
        );
    }

    #[test]
    fn test_format_without_commits_keeps_link() {
        let entry = ChangelogEntry::new("https://github.com/octo/widget/compare/v1...abc");
        let output = MarkdownFormatter::new().format(&Changelog::Listed(entry));
        assert_eq!(
            output,
            "**Full Changelog:** https://github.com/octo/widget/compare/v1...abc"
        );
    }

    #[test]
    fn test_format_unavailable() {
        let output = MarkdownFormatter::new().format(&Changelog::Unavailable);
        assert_eq!(output, "**Full Changelog**: see commit history for details.");
    }
}
