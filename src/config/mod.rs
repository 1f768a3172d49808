//! `.outcomemap.toml` configuration.
//!
//! Every section is optional; a missing file means defaults.

mod core;
mod loader;

pub use core::{
    HeaderConfig, OutcomemapConfig, OutputConfig, TaxonomyConfig, UploadConfig, ValidatorsConfig,
};
pub use loader::{
    directory_ancestors, load_config, load_config_file, load_config_from_dir,
    parse_and_validate_config, CONFIG_FILE_NAME,
};

/// Written by `outcomemap init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# outcomemap configuration

[header]
# Rows scanned from the top of the sheet when looking for the header row
scan_rows = 20
# Columns (of CO, ILO, assessment tool, performance target) that must be found
min_matches = 3

[taxonomy]
# Levels no course outcome may use
disallowed_co_levels = ["remembering", "understanding"]

[validators]
# Run in this order
enabled = ["min_co_taxonomy", "last_ilo_taxonomy", "ilo_taxonomy_order"]

[upload]
# base_url = "https://outcomes.example.edu/api"
# token can also be given with --token or OUTCOMEMAP_TOKEN
timeout_secs = 30

# [output]
# default_format = "terminal"
# use_color = true
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TaxonomyLevel;
    use crate::validation::CoaepValidator;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_toml_matches_defaults() {
        let parsed = parse_and_validate_config(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(parsed, OutcomemapConfig::default());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_and_validate_config("").unwrap();
        assert_eq!(config.header.scan_rows, 20);
        assert_eq!(config.upload.timeout_secs, 30);
        assert_eq!(config.coaep_validators(), CoaepValidator::defaults());
    }

    #[test]
    fn test_use_color_reads_output_section() {
        assert_eq!(OutcomemapConfig::default().use_color(), None);
        let forced = parse_and_validate_config("[output]\nuse_color = true\n").unwrap();
        assert_eq!(forced.use_color(), Some(true));
        let off = parse_and_validate_config("[output]\nuse_color = false\n").unwrap();
        assert_eq!(off.use_color(), Some(false));
    }

    #[test]
    fn test_invalid_header_settings_fall_back() {
        let config = parse_and_validate_config("[header]\nmin_matches = 9\n").unwrap();
        assert_eq!(config.header, HeaderConfig::default());
    }

    #[test]
    fn test_unknown_taxonomy_level_is_parse_error() {
        let err = parse_and_validate_config("[taxonomy]\ndisallowed_co_levels = [\"knowing\"]\n")
            .unwrap_err();
        assert!(err.contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_validator_order_and_unknown_keys() {
        let config = parse_and_validate_config(
            "[taxonomy]\ndisallowed_co_levels = [\"remembering\"]\n\
             [validators]\nenabled = [\"ilo_taxonomy_order\", \"nope\", \"min_co_taxonomy\"]\n",
        )
        .unwrap();
        assert_eq!(
            config.coaep_validators(),
            vec![
                CoaepValidator::IloTaxonomyOrder,
                CoaepValidator::MinCoTaxonomy {
                    disallowed: vec![TaxonomyLevel::Remembering]
                },
            ]
        );
    }

    #[test]
    fn test_discovery_walks_up_directories() {
        let root = TempDir::new().unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[upload]\nbase_url = \"http://localhost:8080\"\n",
        )
        .unwrap();
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = load_config_from_dir(nested);
        assert_eq!(config.upload.base_url.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let root = TempDir::new().unwrap();
        let err = load_config_file(&root.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, crate::core::Error::Configuration(_)));
    }

    #[test]
    fn test_directory_ancestors_depth() {
        let dirs: Vec<_> = directory_ancestors("/a/b/c".into(), 2).collect();
        assert_eq!(dirs.len(), 2);
    }
}
