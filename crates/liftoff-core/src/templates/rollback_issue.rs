//! Failure-tracking issue template

use std::fmt::Write;

use crate::inputs::RollbackInputs;
use crate::types::Registry;

/// Registry order used throughout the issue body
const ISSUE_ORDER: [Registry; 3] = [Registry::Docr, Registry::Ghcr, Registry::Dhcr];

const PIPELINE_EXPLANATION: &str = "The automated release process attempts to build the project, push it to various container registries, ensure consistency between the container registries, and release the project.
1. If the build fails, nothing else happens.
2. If successful and consistent pushes to all container registries cannot be verified, a warning-laden partial release of the project is produced. The automated release process will attempt to restore container registry consistency by rolling back the mismatched state.
3. In the event that a registry push succeeded but its corresponding rollback failed, you will need to manually intervene to ensure consistent images between container registries.
";

/// Title of the tracking issue
pub fn rollback_issue_title(inputs: &RollbackInputs) -> String {
    format!("⚠️ Release failed for {}", inputs.sha_short)
}

/// Render the Markdown body of the tracking issue
///
/// Rollback lines are only listed for registries that received a push.
pub fn render_rollback_issue(inputs: &RollbackInputs) -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        "# Status\n\nAttention @{}, an automated release failed. This issue is generated to track the status of build success, partial releases, registry pushes and rollbacks. For full details please refer to [workflow logs]({}).\n\n",
        inputs.actor, inputs.workflow_url
    );
    out.push_str(PIPELINE_EXPLANATION);

    out.push_str("\n### Build Status\n");
    let _ = writeln!(
        out,
        "- {}",
        if inputs.build_success {
            "✅ The build succeeded."
        } else {
            "❌ The build failed."
        }
    );
    let _ = writeln!(
        out,
        "- {}",
        if inputs.release_success {
            "⚠️ A partial release was made."
        } else {
            "✅ No release was made."
        }
    );

    out.push_str("\n### Registry Pushes\n");
    for registry in ISSUE_ORDER {
        match inputs.digests.get(registry) {
            Some(digest) => {
                let _ = writeln!(out, "- {}: ✅ `{}`", registry.label(), digest);
            }
            None => {
                let _ = writeln!(out, "- {}: ❌", registry.label());
            }
        }
    }

    out.push_str("\n### Registry Rollbacks\n");
    for registry in ISSUE_ORDER {
        if inputs.digests.get(registry).is_none() {
            continue;
        }
        let status = if inputs.rollbacks.succeeded(registry) {
            "✅"
        } else {
            "❌ manual intervention required."
        };
        let _ = writeln!(out, "- {} Rollback: {}", registry.label(), status);
    }

    out
}
