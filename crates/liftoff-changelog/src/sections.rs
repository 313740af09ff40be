//! Pull request body sections
//!
//! Sections are located with a loose pattern rather than a Markdown parser:
//! a line starting with a run of `#` characters, the section name in any
//! letter case, and everything up to the next `##` marker or the end of the
//! body. Text may follow the name on the heading line. The first matching
//! heading wins.

use regex::Regex;

/// Sections of a pull request body used in release notes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrSection {
    /// Summary of the change
    Description,
    /// Incompatible changes
    BreakingChanges,
    /// Fixed bugs
    BugFixes,
    /// New features
    Features,
}

impl PrSection {
    /// Optional sections appended after the description, in output order
    pub const OPTIONAL: [PrSection; 3] = [
        PrSection::BreakingChanges,
        PrSection::BugFixes,
        PrSection::Features,
    ];

    /// Heading text of the section
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::BreakingChanges => "Breaking Changes",
            Self::BugFixes => "Bug Fixes",
            Self::Features => "Features",
        }
    }

    /// Extract this section from a pull request body
    pub fn extract(&self, body: &str) -> String {
        extract_section(body, self.heading())
    }
}

impl std::fmt::Display for PrSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.heading())
    }
}

/// Trimmed text of the first section headed `name`, or an empty string
pub fn extract_section(body: &str, name: &str) -> String {
    let pattern = format!(r"(?ims)^#+[ \t]*{}\s*(.*?)(?:##|\z)", regex::escape(name));
    Regex::new(&pattern)
        .ok()
        .and_then(|re| re.captures(body))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default()
}
