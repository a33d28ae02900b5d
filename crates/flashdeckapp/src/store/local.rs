use super::backend::KeyValueStore;
use super::codec::{self, Decoded};
use crate::error::{FlashdeckError, Result};
use crate::model::{Deck, Flashcard, StorageInfo, StudySession};
use crate::service::DataService;
use serde_json::Value;

/// Schema version written to the version marker on first run.
pub const STORAGE_VERSION: &str = "1.0.0";

/// Fixed keys used in the backing store.
pub mod keys {
    pub const DECKS: &str = "flashcard-app-decks";
    pub const FLASHCARDS: &str = "flashcard-app-flashcards";
    pub const STUDY_SESSIONS: &str = "flashcard-app-study-sessions";
    pub const VERSION: &str = "flashcard-app-version";

    pub const COLLECTIONS: [&str; 3] = [DECKS, FLASHCARDS, STUDY_SESSIONS];
}

const EMPTY_COLLECTION: &str = "[]";

/// [`DataService`] over a synchronous key/value store.
///
/// The backing store is optional. An adapter built with
/// [`LocalStorageService::unavailable`] stands in for contexts with no store
/// at all: loads return empty collections and writes succeed without doing
/// anything, so callers never have to branch on availability.
///
/// Read problems (a backend read error, a payload that is not an array, single
/// malformed records) are logged and absorbed into the returned collection.
/// Write problems are returned as [`FlashdeckError::Persistence`].
pub struct LocalStorageService<K: KeyValueStore> {
    storage: Option<K>,
}

impl<K: KeyValueStore> LocalStorageService<K> {
    /// Wrap `storage`, running first-run initialization if needed.
    pub fn new(storage: K) -> Self {
        let service = Self {
            storage: Some(storage),
        };
        if let Err(e) = service.initialize_storage() {
            log::warn!("Could not initialize storage: {}", e);
        }
        service
    }

    /// An adapter for an execution context with no store available.
    pub fn unavailable() -> Self {
        Self { storage: None }
    }

    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    pub fn storage(&self) -> Option<&K> {
        self.storage.as_ref()
    }

    /// Write the version marker and seed empty collections, unless the marker
    /// is already present. Safe to call repeatedly.
    fn initialize_storage(&self) -> Result<()> {
        let Some(store) = &self.storage else {
            return Ok(());
        };
        if store.get_item(keys::VERSION)?.is_some() {
            // Future format changes migrate here.
            return Ok(());
        }
        log::info!("Initializing flashcard storage at version {}", STORAGE_VERSION);
        store.set_item(keys::VERSION, STORAGE_VERSION)?;
        for key in keys::COLLECTIONS {
            if store.get_item(key)?.is_none() {
                store.set_item(key, EMPTY_COLLECTION)?;
            }
        }
        Ok(())
    }

    fn read_collection<T>(&self, key: &str, kind: &str, decode: fn(Value) -> Decoded<T>) -> Vec<T> {
        let Some(store) = &self.storage else {
            return Vec::new();
        };
        match store.get_item(key) {
            Ok(Some(payload)) => codec::decode_collection(kind, &payload, decode),
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Error loading {} from storage: {}", kind, e);
                Vec::new()
            }
        }
    }

    fn write_collection(
        &self,
        key: &str,
        payload: impl FnOnce() -> Result<String>,
        action: &str,
    ) -> Result<()> {
        let Some(store) = &self.storage else {
            return Ok(());
        };
        payload()
            .and_then(|encoded| store.set_item(key, &encoded))
            .map_err(|e| {
                log::error!("Failed to {}: {}", action, e);
                FlashdeckError::Persistence(format!("Failed to {}: {}", action, e))
            })
    }

    fn load_sessions_now(&self) -> Vec<StudySession> {
        self.read_collection(
            keys::STUDY_SESSIONS,
            "study session",
            codec::decode_study_session,
        )
    }

    fn clear_now(&self) -> Result<()> {
        let Some(store) = &self.storage else {
            return Ok(());
        };
        for key in keys::COLLECTIONS {
            store.remove_item(key)?;
        }
        store.remove_item(keys::VERSION)?;
        self.initialize_storage()
    }

    /// Diagnostic summary of the persisted data. Informational only.
    pub fn storage_info(&self) -> StorageInfo {
        let Some(store) = &self.storage else {
            return StorageInfo::unknown();
        };
        let read = |key: &str| -> String {
            store
                .get_item(key)
                .ok()
                .flatten()
                .unwrap_or_else(|| EMPTY_COLLECTION.to_string())
        };
        let version = store
            .get_item(keys::VERSION)
            .ok()
            .flatten()
            .unwrap_or_else(|| "unknown".to_string());
        let decks = read(keys::DECKS);
        let flashcards = read(keys::FLASHCARDS);
        let sessions = read(keys::STUDY_SESSIONS);

        StorageInfo {
            version,
            deck_count: codec::count_elements(&decks),
            flashcard_count: codec::count_elements(&flashcards),
            session_count: codec::count_elements(&sessions),
            storage_used: decks.len() + flashcards.len() + sessions.len(),
        }
    }
}

impl<K: KeyValueStore> DataService for LocalStorageService<K> {
    async fn save_decks(&self, decks: &[Deck]) -> Result<()> {
        self.write_collection(keys::DECKS, || codec::encode_decks(decks), "save decks")
    }

    async fn load_decks(&self) -> Result<Vec<Deck>> {
        Ok(self.read_collection(keys::DECKS, "deck", codec::decode_deck))
    }

    async fn save_flashcards(&self, flashcards: &[Flashcard]) -> Result<()> {
        self.write_collection(
            keys::FLASHCARDS,
            || codec::encode_flashcards(flashcards),
            "save flashcards",
        )
    }

    async fn load_flashcards(&self) -> Result<Vec<Flashcard>> {
        Ok(self.read_collection(keys::FLASHCARDS, "flashcard", codec::decode_flashcard))
    }

    async fn save_study_session(&self, session: &StudySession) -> Result<()> {
        if !self.is_available() {
            return Ok(());
        }
        let mut sessions = self.load_sessions_now();
        sessions.push(session.clone());
        self.write_collection(
            keys::STUDY_SESSIONS,
            || codec::encode_study_sessions(&sessions),
            "save study session",
        )
    }

    async fn load_study_sessions(&self) -> Result<Vec<StudySession>> {
        Ok(self.load_sessions_now())
    }

    async fn clear_all_data(&self) -> Result<()> {
        self.clear_now().map_err(|e| {
            log::error!("Error clearing storage: {}", e);
            FlashdeckError::Persistence(format!("Failed to clear data: {}", e))
        })
    }
}
