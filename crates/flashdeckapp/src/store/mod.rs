//! # Storage Layer
//!
//! Storage is split in two, mirroring how a browser app sits on top of
//! `localStorage`:
//!
//! 1. **Raw storage** ([`backend::KeyValueStore`]): a synchronous, string-keyed
//!    store that knows nothing about flashcards.
//!    - [`mem_backend::MemBackend`]: in-process map with optional quota.
//!    - [`fs_backend::FsBackend`]: one file per key in a data directory.
//! 2. **Persistence adapter** ([`local::LocalStorageService`]): implements the
//!    [`DataService`](crate::service::DataService) port over any raw store. It
//!    owns key naming, schema versioning, encoding and validation.
//!
//! ## Storage Layout
//!
//! | Key | Content |
//! |-----|---------|
//! | `flashcard-app-version` | schema version string, currently `"1.0.0"` |
//! | `flashcard-app-decks` | JSON array of serialized decks |
//! | `flashcard-app-flashcards` | JSON array of serialized flashcards |
//! | `flashcard-app-study-sessions` | JSON array of serialized study sessions |
//!
//! See [`codec`] for the record format and the validation rules applied on load.
//!
//! ## Write Model
//!
//! Every write replaces a whole collection. Two writers that start from the same
//! snapshot will race, and the last write wins. The raw stores offer no
//! compare-and-swap. A multi-writer backend would need a per-collection version
//! token to detect this.

pub mod backend;
pub mod codec;
pub mod fs_backend;
pub mod local;
pub mod mem_backend;

use local::LocalStorageService;

/// The production adapter: local persistence over a data directory.
pub type FileStorageService = LocalStorageService<fs_backend::FsBackend>;

/// Local persistence over process memory, for tests and ephemeral sessions.
pub type InMemoryStorageService = LocalStorageService<mem_backend::MemBackend>;

impl InMemoryStorageService {
    pub fn in_memory() -> Self {
        LocalStorageService::new(mem_backend::MemBackend::new())
    }
}

impl FileStorageService {
    pub fn open(root: impl Into<std::path::PathBuf>, quota_bytes: Option<usize>) -> Self {
        let mut backend = fs_backend::FsBackend::new(root);
        if let Some(bytes) = quota_bytes {
            backend = backend.with_quota(bytes);
        }
        LocalStorageService::new(backend)
    }
}
