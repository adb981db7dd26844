//! Engine configuration
//!
//! Passed when a container is opened. Every key is optional in the JSON
//! form; missing keys take the defaults below.
//!
//! ```json
//! {
//!   "space_padded_fields": ["A10", "C6"],
//!   "min_amount": 1,
//!   "max_amount": 99999999999,
//!   "min_descriptions": 0,
//!   "max_descriptions": 14,
//!   "shift_chunk_size": 8192,
//!   "max_execution_delay_days": 15
//! }
//! ```

mod errors;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::layout::Field;
use crate::types::MAX_DESCRIPTIONS;

pub use errors::{ConfigError, ConfigResult};

/// Largest amount a C12 field can hold, in cents
pub const MAX_AMOUNT: u64 = 99_999_999_999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DtausConfig {
    /// Numeric fields in which spaces are read as zeros
    #[serde(default)]
    pub space_padded_fields: Vec<Field>,

    /// Smallest accepted transaction amount in cents
    #[serde(default = "default_min_amount")]
    pub min_amount: u64,

    /// Largest accepted transaction amount in cents
    #[serde(default = "default_max_amount")]
    pub max_amount: u64,

    #[serde(default)]
    pub min_descriptions: usize,

    #[serde(default = "default_max_descriptions")]
    pub max_descriptions: usize,

    /// Bytes moved per step when shifting the container tail
    #[serde(default = "default_shift_chunk_size")]
    pub shift_chunk_size: usize,

    /// Days the execution date may lie after the creation date
    #[serde(default = "default_max_execution_delay_days")]
    pub max_execution_delay_days: i64,
}

fn default_min_amount() -> u64 {
    1
}
fn default_max_amount() -> u64 {
    MAX_AMOUNT
}
fn default_max_descriptions() -> usize {
    MAX_DESCRIPTIONS
}
fn default_shift_chunk_size() -> usize {
    8192
}
fn default_max_execution_delay_days() -> i64 {
    15
}

impl Default for DtausConfig {
    fn default() -> Self {
        Self {
            space_padded_fields: Vec::new(),
            min_amount: default_min_amount(),
            max_amount: default_max_amount(),
            min_descriptions: 0,
            max_descriptions: default_max_descriptions(),
            shift_chunk_size: default_shift_chunk_size(),
            max_execution_delay_days: default_max_execution_delay_days(),
        }
    }
}

impl DtausConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> ConfigResult<Self> {
        let config: DtausConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.min_amount > self.max_amount {
            return Err(ConfigError::Invalid(format!(
                "min_amount {} exceeds max_amount {}",
                self.min_amount, self.max_amount
            )));
        }
        if self.max_amount > MAX_AMOUNT {
            return Err(ConfigError::Invalid(format!(
                "max_amount must be <= {}",
                MAX_AMOUNT
            )));
        }
        if self.min_descriptions > self.max_descriptions {
            return Err(ConfigError::Invalid(format!(
                "min_descriptions {} exceeds max_descriptions {}",
                self.min_descriptions, self.max_descriptions
            )));
        }
        if self.max_descriptions > MAX_DESCRIPTIONS {
            return Err(ConfigError::Invalid(format!(
                "max_descriptions must be <= {}",
                MAX_DESCRIPTIONS
            )));
        }
        if self.shift_chunk_size == 0 {
            return Err(ConfigError::Invalid("shift_chunk_size must be > 0".into()));
        }
        if self.max_execution_delay_days < 0 {
            return Err(ConfigError::Invalid(
                "max_execution_delay_days must be >= 0".into(),
            ));
        }
        Ok(())
    }

    /// Whether spaces in `field` are read as zeros
    pub fn allows_space_padding(&self, field: Field) -> bool {
        self.space_padded_fields.contains(&field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DtausConfig::from_json("{}").unwrap();
        assert_eq!(config, DtausConfig::default());
        assert_eq!(config.min_amount, 1);
        assert_eq!(config.max_amount, 99_999_999_999);
        assert_eq!(config.max_descriptions, 14);
        assert_eq!(config.shift_chunk_size, 8192);
        assert_eq!(config.max_execution_delay_days, 15);
        assert!(!config.allows_space_padding(Field::A4));
    }

    #[test]
    fn test_space_padded_fields() {
        let config = DtausConfig::from_json(r#"{"space_padded_fields": ["A10", "C6"]}"#).unwrap();
        assert!(config.allows_space_padding(Field::A10));
        assert!(config.allows_space_padding(Field::C6));
        assert!(!config.allows_space_padding(Field::C5));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        let err = DtausConfig::from_json(r#"{"chunk": 1}"#).unwrap_err();
        assert_eq!(err.code(), "DTAUS_CONFIG_PARSE_FAILED");
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = DtausConfig::from_json(r#"{"min_amount": 10, "max_amount": 5}"#).unwrap_err();
        assert_eq!(err.code(), "DTAUS_CONFIG_INVALID");

        let err = DtausConfig::from_json(r#"{"max_descriptions": 15}"#).unwrap_err();
        assert!(err.to_string().contains("max_descriptions"));
    }

    #[test]
    fn test_rejects_zero_chunk() {
        assert!(DtausConfig::from_json(r#"{"shift_chunk_size": 0}"#).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = DtausConfig::load(Path::new("/nonexistent/dtaus.json")).unwrap_err();
        assert_eq!(err.code(), "DTAUS_CONFIG_READ_FAILED");
    }
}
