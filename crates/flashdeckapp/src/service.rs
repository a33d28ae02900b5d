//! # Persistence Port
//!
//! [`DataService`] is the contract every storage backend implements and the
//! only storage surface the coordinator ([`crate::app::FlashcardApp`]) sees.
//! Swapping local storage for a networked backend means writing another
//! implementation of this trait; callers do not change.
//!
//! ## Contract
//!
//! - Every operation is `async`: it may suspend while doing I/O.
//! - Collections are written whole. `save_decks` replaces the stored deck
//!   collection with exactly the given slice; there is no per-record patch.
//! - Writes are all-or-nothing from the caller's view. They either complete or
//!   return [`FlashdeckError::Persistence`](crate::error::FlashdeckError::Persistence).
//! - Loads never fail because of a malformed stored record. Such records are
//!   dropped from the result.
//!
//! ## Sessions on Import
//!
//! [`DataService::import_all_data`] overwrites decks and flashcards only.
//! Study sessions in the snapshot are ignored so that re-importing an export
//! does not duplicate session history.
//!
//! ## Snapshot Consistency
//!
//! [`DataService::export_all_data`] composes three independent loads. Nothing
//! isolates them from a write that lands in between, so a concurrent writer can
//! produce a torn export. Single-writer local stores cannot observe this.

use crate::error::Result;
use crate::model::{DataSnapshot, Deck, Flashcard, StudySession};

#[allow(async_fn_in_trait)]
pub trait DataService {
    /// Replace the stored deck collection.
    async fn save_decks(&self, decks: &[Deck]) -> Result<()>;

    /// Return the stored deck collection.
    async fn load_decks(&self) -> Result<Vec<Deck>>;

    /// Replace the stored flashcard collection.
    async fn save_flashcards(&self, flashcards: &[Flashcard]) -> Result<()>;

    /// Return the stored flashcard collection.
    async fn load_flashcards(&self) -> Result<Vec<Flashcard>>;

    /// Append one session to the stored session log.
    async fn save_study_session(&self, session: &StudySession) -> Result<()>;

    /// Return the whole session log.
    async fn load_study_sessions(&self) -> Result<Vec<StudySession>>;

    /// Assemble decks, flashcards and sessions into one snapshot.
    async fn export_all_data(&self) -> Result<DataSnapshot> {
        let (decks, flashcards, sessions) = futures::try_join!(
            self.load_decks(),
            self.load_flashcards(),
            self.load_study_sessions()
        )?;
        Ok(DataSnapshot {
            decks,
            flashcards,
            sessions,
        })
    }

    /// Overwrite decks and flashcards with the snapshot's. Sessions are skipped.
    async fn import_all_data(&self, data: &DataSnapshot) -> Result<()> {
        futures::try_join!(
            self.save_decks(&data.decks),
            self.save_flashcards(&data.flashcards)
        )?;
        Ok(())
    }

    /// Irreversibly erase every collection and reset versioning metadata.
    async fn clear_all_data(&self) -> Result<()>;
}
