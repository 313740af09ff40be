//! Default configuration values

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "liftoff.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "liftoff.yaml";

/// Default GitHub REST API endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Default GitHub web endpoint
pub const DEFAULT_SERVER_URL: &str = "https://github.com";

/// Default GitHub asset upload endpoint
pub const DEFAULT_UPLOAD_URL: &str = "https://uploads.github.com";

/// Directory scanned for release assets
pub const DEFAULT_ARTIFACTS_DIR: &str = "release-artifacts";

/// Git's well-known empty tree object
pub const EMPTY_TREE_SHA: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".liftoff.toml",
        ".liftoff.yaml",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_names_prefer_toml() {
        let names = config_file_names();
        assert_eq!(names[0], DEFAULT_CONFIG_TOML);
        assert!(names.contains(&".liftoff.yaml"));
    }

    #[test]
    fn test_empty_tree_sha_is_object_id() {
        assert_eq!(EMPTY_TREE_SHA.len(), 40);
        assert!(EMPTY_TREE_SHA.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
