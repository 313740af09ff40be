//! Markdown templates for release bodies and failure-tracking issues

mod release_body;
mod rollback_issue;

pub use release_body::render_release_body;
pub use rollback_issue::{render_rollback_issue, rollback_issue_title};
