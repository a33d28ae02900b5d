//! # Context Initialization
//!
//! Wires configuration, the data directory and the file-backed adapter into a
//! ready [`FlashcardApp`]. UI clients call [`initialize`] once at startup and
//! hold the returned context for the process lifetime.
//!
//! ## Data Directory Resolution
//!
//! 1. An explicit override (e.g. the CLI's `--data-dir`).
//! 2. `data_dir` from [`FlashdeckConfig`] (env or config file).
//! 3. The OS data directory from the `directories` crate.

use crate::app::FlashcardApp;
use crate::config::{FlashdeckConfig, CONFIG_FILENAME};
use crate::error::{FlashdeckError, Result};
use crate::store::FileStorageService;
use directories::ProjectDirs;
use std::path::PathBuf;

pub struct FlashdeckContext {
    pub app: FlashcardApp<FileStorageService>,
    pub data_dir: PathBuf,
    pub config: FlashdeckConfig,
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "flashdeck", "flashdeck")
}

/// Location of `flashdeck.toml` in the OS config directory, if one exists.
pub fn default_config_file() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
}

pub fn resolve_data_dir(
    data_override: Option<PathBuf>,
    config: &FlashdeckConfig,
) -> Result<PathBuf> {
    if let Some(path) = data_override.or_else(|| config.data_dir.clone()) {
        return Ok(path);
    }
    project_dirs()
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| FlashdeckError::Config("Could not determine data directory".to_string()))
}

/// Build the application context. Does not load data; call
/// [`FlashcardApp::load`] on the returned app.
pub fn initialize(
    config: FlashdeckConfig,
    data_override: Option<PathBuf>,
) -> Result<FlashdeckContext> {
    let data_dir = resolve_data_dir(data_override, &config)?;
    log::debug!("Using data directory {}", data_dir.display());
    let service = FileStorageService::open(data_dir.clone(), config.quota());
    Ok(FlashdeckContext {
        app: FlashcardApp::new(service),
        data_dir,
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_override_wins_over_config() {
        let config = FlashdeckConfig {
            data_dir: Some(PathBuf::from("/from/config")),
            ..Default::default()
        };

        let dir = resolve_data_dir(Some(PathBuf::from("/from/flag")), &config).unwrap();
        assert_eq!(dir, PathBuf::from("/from/flag"));

        let dir = resolve_data_dir(None, &config).unwrap();
        assert_eq!(dir, PathBuf::from("/from/config"));
    }

    #[test]
    fn test_initialize_seeds_store() {
        let temp = tempdir().unwrap();
        let ctx = initialize(FlashdeckConfig::default(), Some(temp.path().to_path_buf())).unwrap();

        assert!(ctx.app.is_loading());
        assert!(temp.path().join("flashcard-app-version.json").exists());
        assert_eq!(ctx.app.service().storage_info().version, "1.0.0");
    }
}
