//! Load rate table overrides from JSON
//!
//! Any key left out of the file keeps its default value, so a file containing
//! only `{"size": {"large": 1200}}` raises the large tier and nothing else.

use super::RateTables;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rate tables: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse rate tables: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid rate tables: {0}")]
    Invalid(String),
}

impl RateTables {
    /// Parse and validate rate tables from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tables: RateTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Parse and validate rate tables from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        let tables = Self::from_json_str(&contents)?;
        log::info!("Loaded rate tables from {}", path.as_ref().display());
        Ok(tables)
    }
}
