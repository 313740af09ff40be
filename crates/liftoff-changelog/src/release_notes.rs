//! Release description built from a merged pull request

use liftoff_core::PullRequest;
use tracing::debug;

use crate::sections::PrSection;

/// Build the description block of the release notes
///
/// The block starts with the pull request's Description section, or its
/// title when that section is missing, followed by any of the Breaking
/// Changes, Bug Fixes and Features sections. A block that would only repeat
/// the title is dropped and an empty string is returned.
pub fn build_description(pr: &PullRequest) -> String {
    let description = match PrSection::Description.extract(&pr.body) {
        text if text.is_empty() => pr.title.clone(),
        text => text,
    };

    let mut notes = format!("### {}\n\n{}", PrSection::Description, description);
    for section in PrSection::OPTIONAL {
        let text = section.extract(&pr.body);
        if !text.is_empty() {
            notes.push_str(&format!("\n\n### {}\n\n{}", section, text));
        }
    }

    if notes == format!("### {}\n\n{}", PrSection::Description, pr.title) {
        debug!(number = pr.number, "pull request adds nothing beyond its title");
        return String::new();
    }
    notes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pr(title: &str, body: &str) -> PullRequest {
        PullRequest {
            number: 7,
            author: "jdoe".to_string(),
            title: title.to_string(),
            body: body.to_string(),
            merge_commit_sha: Some("deadbeef".to_string()),
            merged: true,
        }
    }

    #[test]
    fn test_title_only_collapses() {
        assert_eq!(build_description(&pr("Add widgets", "")), "");
        assert_eq!(build_description(&pr("Add widgets", "Some free text")), "");
    }

    #[test]
    fn test_description_equal_to_title_collapses() {
        assert_eq!(build_description(&pr("Add widgets", "## Description\nAdd widgets")), "");
    }

    #[test]
    fn test_title_fallback_with_sections() {
        let notes = build_description(&pr("Add widgets", "## Features\n- widgets"));
        assert_eq!(notes, "### Description\n\nAdd widgets\n\n### Features\n\n- widgets");
    }

    #[test]
    fn test_sections_in_fixed_order() {
        let body = "## Features\n- f\n## Description\nBody text\n## Bug Fixes\n- b\n## Breaking Changes\n- x";
        let notes = build_description(&pr("Title", body));
        assert_eq!(
            notes,
            "### Description\n\nBody text\n\n### Breaking Changes\n\n- x\n\n### Bug Fixes\n\n- b\n\n### Features\n\n- f"
        );
    }

    #[test]
    fn test_heading_title_does_not_collapse_when_sections_exist() {
        let notes = build_description(&pr("### Bug Fixes", "## Bug Fixes\n- b"));
        assert!(notes.starts_with("### Description\n\n### Bug Fixes"));
        assert!(!notes.is_empty());
    }
}
