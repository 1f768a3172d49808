use serde::{Deserialize, Serialize};

use crate::core::TaxonomyLevel;
use crate::formats::Coaep;
use crate::table::header::{DEFAULT_MIN_MATCHES, DEFAULT_SCAN_ROWS};
use crate::table::HeaderScan;
use crate::validation::coaep::DEFAULT_DISALLOWED_CO_LEVELS;
use crate::validation::CoaepValidator;

/// Root configuration structure for outcomemap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OutcomemapConfig {
    /// Header row detection
    #[serde(default)]
    pub header: HeaderConfig,

    /// Taxonomy rules
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,

    /// Registered domain validators
    #[serde(default)]
    pub validators: ValidatorsConfig,

    /// Upload endpoint
    #[serde(default)]
    pub upload: UploadConfig,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

impl OutcomemapConfig {
    /// Forced color setting, or `None` to let the terminal decide.
    pub fn use_color(&self) -> Option<bool> {
        self.output.as_ref().and_then(|o| o.use_color)
    }

    /// Validators in configured order. Unknown names are skipped with a warning.
    pub fn coaep_validators(&self) -> Vec<CoaepValidator> {
        self.validators
            .enabled
            .iter()
            .filter_map(|key| {
                let validator =
                    CoaepValidator::from_key(key, &self.taxonomy.disallowed_co_levels);
                if validator.is_none() {
                    log::warn!("Unknown validator '{}' in configuration, skipping", key);
                }
                validator
            })
            .collect()
    }

    /// The COAEP format as configured.
    pub fn coaep_format(&self) -> Coaep {
        Coaep::new()
            .with_scan(self.header.scan())
            .with_validators(self.coaep_validators())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderConfig {
    /// Rows examined from the top of the sheet (default: 20)
    #[serde(default = "default_scan_rows")]
    pub scan_rows: usize,

    /// Columns that must resolve for a row to count as the header (default: 3)
    #[serde(default = "default_min_matches")]
    pub min_matches: usize,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            scan_rows: default_scan_rows(),
            min_matches: default_min_matches(),
        }
    }
}

impl HeaderConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.scan_rows == 0 {
            return Err("header.scan_rows must be at least 1".to_string());
        }
        if !(1..=4).contains(&self.min_matches) {
            return Err(format!(
                "header.min_matches must be between 1 and 4, got {}",
                self.min_matches
            ));
        }
        Ok(())
    }

    pub fn scan(&self) -> HeaderScan {
        HeaderScan {
            max_rows: self.scan_rows,
            min_matches: self.min_matches,
        }
    }
}

fn default_scan_rows() -> usize {
    DEFAULT_SCAN_ROWS
}

fn default_min_matches() -> usize {
    DEFAULT_MIN_MATCHES
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Levels no course outcome may use
    #[serde(default = "default_disallowed_co_levels")]
    pub disallowed_co_levels: Vec<TaxonomyLevel>,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            disallowed_co_levels: default_disallowed_co_levels(),
        }
    }
}

fn default_disallowed_co_levels() -> Vec<TaxonomyLevel> {
    DEFAULT_DISALLOWED_CO_LEVELS.to_vec()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorsConfig {
    /// Validator keys, run in this order
    #[serde(default = "default_enabled_validators")]
    pub enabled: Vec<String>,
}

impl Default for ValidatorsConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled_validators(),
        }
    }
}

fn default_enabled_validators() -> Vec<String> {
    ["min_co_taxonomy", "last_ilo_taxonomy", "ilo_taxonomy_order"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Server base URL, e.g. `https://outcomes.example.edu/api`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Bearer token
    #[serde(default)]
    pub token: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: Option<String>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}
