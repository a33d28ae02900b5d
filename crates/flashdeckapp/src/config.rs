//! # Configuration
//!
//! Flashdeck configuration is loaded with [`confique`], layering environment
//! variables over an optional TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `FLASHDECK_DATA_DIR`, `FLASHDECK_QUOTA_BYTES`.
//! 2. **Config file**: `flashdeck.toml` in the OS config directory (via the
//!    `directories` crate), when it exists.
//! 3. **Compiled defaults**: `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `data_dir` | OS data directory | Where stored collections live |
//! | `quota_bytes` | `5242880` | Capacity of the file store; `0` disables the limit |

use crate::error::{FlashdeckError, Result};
use confique::Config;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "flashdeck.toml";
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FlashdeckConfig {
    /// Directory holding the stored collections.
    #[config(env = "FLASHDECK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Capacity of the file store in bytes (keys + values). 0 means unlimited.
    #[config(env = "FLASHDECK_QUOTA_BYTES", default = 5242880)]
    pub quota_bytes: usize,
}

impl Default for FlashdeckConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

impl FlashdeckConfig {
    /// Load from the environment, then `config_file` if given and present.
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(path) = config_file {
            builder = builder.file(path);
        }
        builder
            .load()
            .map_err(|e| FlashdeckError::Config(e.to_string()))
    }

    /// The effective capacity limit, if any.
    pub fn quota(&self) -> Option<usize> {
        match self.quota_bytes {
            0 => None,
            bytes => Some(bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = FlashdeckConfig::default();
        assert_eq!(config.data_dir, None);
        assert_eq!(config.quota(), Some(5 * 1024 * 1024));
    }

    #[test]
    fn test_zero_quota_is_unlimited() {
        let config = FlashdeckConfig {
            quota_bytes: 0,
            ..Default::default()
        };
        assert_eq!(config.quota(), None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "data_dir = \"/tmp/decks\"\nquota_bytes = 1024\n").unwrap();

        let config = FlashdeckConfig::load(Some(&path)).unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/decks")));
        assert_eq!(config.quota(), Some(1024));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let config = FlashdeckConfig::load(Some(&path)).unwrap();

        assert_eq!(config.quota_bytes, DEFAULT_QUOTA_BYTES);
    }

    #[test]
    fn test_serializes_to_toml() {
        let config = FlashdeckConfig {
            data_dir: Some(PathBuf::from("/data")),
            quota_bytes: 2048,
        };
        let rendered = toml::to_string(&config).unwrap();
        assert!(rendered.contains("quota_bytes = 2048"));
        assert!(rendered.contains("data_dir = \"/data\""));
    }
}
