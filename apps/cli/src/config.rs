//! # Application Configuration
//!
//! Loaded once at startup from `config.toml` in the data directory.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Config file (`config.toml`)
//! 2. Defaults (this file)
//!
//! A missing file is normal (first run); an unreadable or malformed
//! file is reported and the defaults are used — configuration problems
//! never stop the shop from opening.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Store name stamped into invoice headers.
    pub store_name: String,

    /// Product file name inside the data directory.
    pub product_file: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            store_name: "Shopkeep Retail".to_string(),
            product_file: "products.txt".to_string(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration, falling back to defaults when the file
    /// is absent or unusable.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    debug!(path = %path.display(), "configuration loaded");
                    config
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "malformed config, using defaults");
                    AppConfig::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                AppConfig::default()
            }
            Err(err) => {
                warn!(path = %path.display(), %err, "unreadable config, using defaults");
                AppConfig::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("config.toml"));
        assert_eq!(config.store_name, "Shopkeep Retail");
        assert_eq!(config.product_file, "products.txt");
    }

    #[test]
    fn test_partial_file_keeps_defaults_for_the_rest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "store_name = \"Glow Beauty Mart\"\n").unwrap();

        let config = AppConfig::load(&path);
        assert_eq!(config.store_name, "Glow Beauty Mart");
        assert_eq!(config.product_file, "products.txt");
    }

    #[test]
    fn test_malformed_file_degrades_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "store_name = [not toml").unwrap();

        let config = AppConfig::load(&path);
        assert_eq!(config.store_name, "Shopkeep Retail");
    }
}
