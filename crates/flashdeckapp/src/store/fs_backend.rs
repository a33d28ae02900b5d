use super::backend::KeyValueStore;
use crate::error::{FlashdeckError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const VALUE_EXT: &str = ".json";

/// Directory-backed key/value store: one file per key.
///
/// ```text
/// <root>/
/// ├── flashcard-app-version.json
/// ├── flashcard-app-decks.json
/// ├── flashcard-app-flashcards.json
/// └── flashcard-app-study-sessions.json
/// ```
///
/// Writes go to a temp file first and are renamed into place, so a failed
/// write never leaves a half-written value behind.
pub struct FsBackend {
    root: PathBuf,
    quota_bytes: Option<usize>,
}

impl FsBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            quota_bytes: None,
        }
    }

    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn value_path(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(FlashdeckError::Store(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}{}", key, VALUE_EXT)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(FlashdeckError::Io)?;
        }
        Ok(())
    }

    /// Bytes used by every stored key except `skip`, counting key + value.
    fn used_bytes_except(&self, skip: &str) -> Result<usize> {
        if !self.root.exists() {
            return Ok(0);
        }
        let mut total = 0;
        for entry in fs::read_dir(&self.root).map_err(FlashdeckError::Io)? {
            let path = entry.map_err(FlashdeckError::Io)?.path();
            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };
            let Some(key) = name.strip_suffix(VALUE_EXT) else {
                continue;
            };
            if key == skip || name.starts_with('.') || !path.is_file() {
                continue;
            }
            let len = fs::metadata(&path).map_err(FlashdeckError::Io)?.len() as usize;
            total += key.len() + len;
        }
        Ok(total)
    }
}

impl KeyValueStore for FsBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).map_err(FlashdeckError::Io)?;
        Ok(Some(content))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let target_path = self.value_path(key)?;

        if let Some(limit) = self.quota_bytes {
            let requested = self.used_bytes_except(key)? + key.len() + value.len();
            if requested > limit {
                return Err(FlashdeckError::QuotaExceeded { requested, limit });
            }
        }

        self.ensure_dir()?;

        // Atomic Write
        let tmp_path = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        fs::write(&tmp_path, value).map_err(FlashdeckError::Io)?;
        if let Err(e) = fs::rename(&tmp_path, &target_path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(FlashdeckError::Io(e));
        }

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.value_path(key)?;
        if path.exists() {
            fs::remove_file(path).map_err(FlashdeckError::Io)?;
        }
        Ok(())
    }
}
