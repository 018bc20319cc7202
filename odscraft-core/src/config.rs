//! Document configuration loadable from a TOML file

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::OdsError;

/// Document-level options applied when a document is created with
/// [`OdsDocument::with_config`](crate::document::OdsDocument::with_config).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Recorded as `dc:creator` in the document metadata.
    #[serde(default)]
    pub creator: Option<String>,
    /// Name of the table shown when the file is opened. Falls back to the
    /// most recently added table.
    #[serde(default)]
    pub active_table: Option<String>,
    #[serde(default = "default_show_grid")]
    pub show_grid: bool,
    /// View zoom applied to every table, in percent.
    #[serde(default = "default_zoom")]
    pub zoom: i64,
}

fn default_show_grid() -> bool {
    true
}

fn default_zoom() -> i64 {
    100
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            creator: None,
            active_table: None,
            show_grid: default_show_grid(),
            zoom: default_zoom(),
        }
    }
}

impl DocumentConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, OdsError> {
        let content = fs::read_to_string(path)?;
        let config: DocumentConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_keys() -> anyhow::Result<()> {
        let config: DocumentConfig = toml::from_str("creator = \"me\"")?;
        assert_eq!(config.creator.as_deref(), Some("me"));
        assert!(config.show_grid);
        assert_eq!(config.zoom, 100);
        Ok(())
    }

    #[test]
    fn explicit_values_override_defaults() -> anyhow::Result<()> {
        let config: DocumentConfig =
            toml::from_str("show_grid = false\nzoom = 75\nactive_table = \"Data\"")?;
        assert!(!config.show_grid);
        assert_eq!(config.zoom, 75);
        assert_eq!(config.active_table.as_deref(), Some("Data"));
        Ok(())
    }
}
