//! Release body template

use std::fmt::Write;

use tracing::debug;

use crate::inputs::ReleaseInputs;
use crate::types::Registry;

/// Registry order used throughout the release body
const BODY_ORDER: [Registry; 3] = [Registry::Ghcr, Registry::Dhcr, Registry::Docr];

const OIDC_ISSUER: &str = "https://token.actions.githubusercontent.com";

const GPG_SECTION: &str = r#"## GPG Signature Verification

All release artifacts are signed with GPG, including:
- `image-digests.txt` - A human-readable digest list.
- `ghcr-manifest.json` - The complete GHCR image manifest.
- `dh-manifest.json` - The complete Docker Hub image manifest.
- `do-manifest.json` - The complete DigitalOcean image manifest.
"#;

const GPG_COMMANDS: &str = r#"```bash
# Import GPG public key.
cat public.asc | base64 -d | gpg --import

# Verify digest list.
gpg --verify image-digests.txt.asc image-digests.txt

# Verify image manifests.
gpg --verify ghcr-manifest.json.asc ghcr-manifest.json
gpg --verify dh-manifest.json.asc dh-manifest.json
gpg --verify do-manifest.json.asc do-manifest.json
```

Valid signatures confirm the artifacts were signed by the maintainer. The manifest signatures provide cryptographic proof of the complete image structure.
"#;

const COSIGN_INTRO: &str = r#"## Cosign Verification (Optional)

Images are also signed with [cosign](https://github.com/sigstore/cosign) using GitHub Actions OIDC for automated verification and build provenance:
"#;

const COSIGN_OUTRO: &str = r#"Cosign provides automated verification without manual key management. Signatures prove the images were built by this repository's GitHub Actions workflow and are stored in the [Rekor transparency log](https://search.sigstore.dev/).

**Note**: Cosign depends on external infrastructure (GitHub OIDC, Rekor). For maximum trust independence, rely on the GPG-signed manifests as your ultimate root of trust.
"#;

/// Human-readable registry name used in cosign comments
fn registry_title(registry: Registry) -> &'static str {
    match registry {
        Registry::Ghcr => "GHCR",
        Registry::Dhcr => "Docker Hub",
        Registry::Docr => "DigitalOcean",
    }
}

/// Render the Markdown body of a release
///
/// Registries without a digest are marked with ❌ and left out of the pull
/// and cosign commands.
pub fn render_release_body(inputs: &ReleaseInputs) -> String {
    let mut out = String::new();
    let image = &inputs.image;

    let _ = write!(out, "## Release Notes\n\n{}\n\n", inputs.release_notes);

    out.push_str("## Container Images\n\n");
    out.push_str(
        "Images have been pushed to the following container registries; some may be private.\n",
    );
    for registry in BODY_ORDER {
        match inputs.digests.get(registry) {
            Some(_) => {
                let _ = writeln!(
                    out,
                    "- {}: `{}`",
                    registry.label(),
                    image.tagged(registry, &inputs.sha)
                );
            }
            None => {
                let _ = writeln!(out, "- {}: ❌", registry.label());
            }
        }
    }

    out.push_str("\n```bash\n");
    for registry in BODY_ORDER {
        if let Some(digest) = inputs.digests.get(registry) {
            let _ = writeln!(out, "docker pull {}", image.pinned(registry, digest));
        }
    }
    out.push_str("```\n\n");

    let _ = write!(
        out,
        "After pulling from a registry, verify the image ID matches `{}` by running `docker inspect {} --format='{{{{.Id}}}}'`.\n\n",
        inputs.image_id, image.image_name
    );

    out.push_str(GPG_SECTION);
    let _ = write!(
        out,
        "\nDownload the artifacts and their `.asc` signature files from the release assets below. To verify authenticity, copy this public key `{}` into a `public.asc` file and verify the signatures:\n\n",
        inputs.gpg_public_key
    );
    out.push_str(GPG_COMMANDS);

    out.push('\n');
    out.push_str(COSIGN_INTRO);
    out.push_str("\n```bash\n");
    let blocks: Vec<String> = BODY_ORDER
        .into_iter()
        .filter_map(|registry| {
            inputs.digests.get(registry).map(|digest| {
                format!(
                    "# Verify {} image\ncosign verify {} \\\n  --certificate-identity-regexp='^https://github.com/{}/.+' \\\n  --certificate-oidc-issuer={}\n",
                    registry_title(registry),
                    image.pinned(registry, digest),
                    image.repository.owner,
                    OIDC_ISSUER
                )
            })
        })
        .collect();
    out.push_str(&blocks.join("\n"));
    out.push_str("```\n\n");
    out.push_str(COSIGN_OUTRO);

    debug!(body_len = out.len(), "release body rendered");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{ImageCoordinates, RegistryDigests};
    use crate::types::RepoSlug;

    fn inputs(digests: RegistryDigests) -> ReleaseInputs {
        ReleaseInputs {
            sha: "0123456789abcdef".to_string(),
            build_timestamp: "20240101120000".to_string(),
            sha_short: "0123456".to_string(),
            image: ImageCoordinates {
                repository: RepoSlug::new("octo", "widget"),
                image_name: "widget".to_string(),
                do_registry_name: "octo-reg".to_string(),
                dh_username: "octodh".to_string(),
            },
            digests,
            release_notes: "### Description\n\nShiny".to_string(),
            gpg_public_key: "LS0tLS1CRUdJTg==".to_string(),
            image_match: true,
            image_id: "sha256:image".to_string(),
        }
    }

    fn all_digests() -> RegistryDigests {
        RegistryDigests {
            docr: Some("sha256:do".to_string()),
            ghcr: Some("sha256:gh".to_string()),
            dhcr: Some("sha256:dh".to_string()),
        }
    }

    #[test]
    fn test_all_registries_present() {
        let body = render_release_body(&inputs(all_digests()));

        assert!(body.starts_with("## Release Notes\n\n### Description\n\nShiny\n\n"));
        assert!(!body.contains('❌'));
        assert!(body.contains("- GHCR: `ghcr.io/octo/widget:0123456789abcdef`"));
        assert!(body.contains("- DHCR: `octodh/widget:0123456789abcdef`"));
        assert!(body.contains(
            "- DOCR: `registry.digitalocean.com/octo-reg/widget:0123456789abcdef`"
        ));
        assert!(body.contains("docker pull ghcr.io/octo/widget@sha256:gh\n"));
        assert!(body.contains("docker pull octodh/widget@sha256:dh\n"));
        assert!(body.contains("docker pull registry.digitalocean.com/octo-reg/widget@sha256:do\n"));
        assert_eq!(body.matches("docker pull ").count(), 3);
    }

    #[test]
    fn test_missing_registry_is_marked() {
        let digests = RegistryDigests {
            dhcr: None,
            ..all_digests()
        };
        let body = render_release_body(&inputs(digests));

        assert!(body.contains("- DHCR: ❌\n"));
        assert!(!body.contains("docker pull octodh/widget"));
        assert!(!body.contains("cosign verify octodh/widget"));
        assert_eq!(body.matches("docker pull ").count(), 2);
        assert_eq!(body.matches("cosign verify ").count(), 2);
    }

    #[test]
    fn test_image_id_and_gpg_key() {
        let body = render_release_body(&inputs(all_digests()));
        assert!(body.contains(
            "verify the image ID matches `sha256:image` by running `docker inspect widget --format='{{.Id}}'`."
        ));
        assert!(body.contains("copy this public key `LS0tLS1CRUdJTg==` into a `public.asc` file"));
    }

    #[test]
    fn test_cosign_identity_uses_owner() {
        let body = render_release_body(&inputs(all_digests()));
        assert!(body.contains("# Verify GHCR image\ncosign verify ghcr.io/octo/widget@sha256:gh \\\n"));
        assert!(body.contains("--certificate-identity-regexp='^https://github.com/octo/.+'"));
        assert!(body.contains("## Cosign Verification (Optional)"));
        assert!(body.ends_with("as your ultimate root of trust.\n"));
    }
}
