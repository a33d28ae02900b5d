//! # Application State Coordinator
//!
//! [`FlashcardApp`] is the façade a UI layer talks to. It holds the
//! authoritative in-memory decks and flashcards after the initial load and
//! mirrors every mutation to a [`DataService`] before committing it.
//!
//! ## Save-then-Commit
//!
//! Each mutation follows the same cycle:
//!
//! 1. Build the *new* collection from the current in-memory one.
//! 2. Persist the whole collection through the port.
//! 3. Only if that succeeds, replace the in-memory collection and re-derive
//!    deck card counts.
//!
//! A failed write therefore leaves `decks()` and `flashcards()` exactly as they
//! were before the call.
//!
//! ## Error State
//!
//! Every fallible operation returns its `Result` *and* records the error message
//! in [`FlashcardApp::error`], where a UI can show it until
//! [`FlashcardApp::clear_error`] dismisses it. Nothing is retried
//! automatically.
//!
//! ## Generic Over DataService
//!
//! `FlashcardApp<S: DataService>` receives its port at construction and holds
//! it for its whole lifetime:
//! - Production: `FlashcardApp<FileStorageService>`
//! - Testing: `FlashcardApp<InMemoryStorageService>`, or any mock port.

use crate::error::{FlashdeckError, Result};
use crate::model::{sync_card_counts, DataSnapshot, Deck, Flashcard, StudySession, Timestamp};
use crate::service::DataService;
use chrono::Utc;

pub struct FlashcardApp<S: DataService> {
    service: S,
    decks: Vec<Deck>,
    flashcards: Vec<Flashcard>,
    is_loading: bool,
    error: Option<String>,
}

fn required(field: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FlashdeckError::InvalidInput(format!(
            "{} cannot be empty",
            field
        )));
    }
    Ok(trimmed.to_string())
}

impl<S: DataService> FlashcardApp<S> {
    /// Wrap a port. Nothing is loaded until [`FlashcardApp::load`] runs, and
    /// `is_loading()` reports true until then.
    pub fn new(service: S) -> Self {
        Self {
            service,
            decks: Vec::new(),
            flashcards: Vec::new(),
            is_loading: true,
            error: None,
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    pub fn flashcards(&self) -> &[Flashcard] {
        &self.flashcards
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn deck(&self, deck_id: &str) -> Option<&Deck> {
        self.decks.iter().find(|d| d.id == deck_id)
    }

    /// Cards belonging to `deck_id`, in collection order. No I/O.
    pub fn flashcards_for_deck(&self, deck_id: &str) -> Vec<&Flashcard> {
        self.flashcards
            .iter()
            .filter(|c| c.deck_id == deck_id)
            .collect()
    }

    fn record<T>(&mut self, outcome: Result<T>) -> Result<T> {
        if let Err(e) = &outcome {
            log::warn!("{}", e);
            self.error = Some(e.to_string());
        }
        outcome
    }

    fn commit_flashcards(&mut self, flashcards: Vec<Flashcard>) {
        self.flashcards = flashcards;
        sync_card_counts(&mut self.decks, &self.flashcards);
    }

    fn ensure_deck(&self, deck_id: &str) -> Result<()> {
        if self.deck(deck_id).is_none() {
            return Err(FlashdeckError::DeckNotFound(deck_id.to_string()));
        }
        Ok(())
    }

    fn ensure_flashcard(&self, card_id: &str) -> Result<()> {
        if !self.flashcards.iter().any(|c| c.id == card_id) {
            return Err(FlashdeckError::FlashcardNotFound(card_id.to_string()));
        }
        Ok(())
    }

    /// Initial load: fetch decks and flashcards concurrently, re-derive card
    /// counts, and seed a starter deck when the store holds none.
    pub async fn load(&mut self) -> Result<()> {
        self.is_loading = true;
        self.error = None;
        let outcome = self.load_inner().await;
        self.is_loading = false;
        self.record(outcome)
    }

    async fn load_inner(&mut self) -> Result<()> {
        let (mut decks, flashcards) =
            futures::try_join!(self.service.load_decks(), self.service.load_flashcards())?;
        sync_card_counts(&mut decks, &flashcards);

        if decks.is_empty() {
            let seeded = vec![Deck::starter()];
            self.service.save_decks(&seeded).await?;
            log::info!("No decks found; created \"{}\"", seeded[0].name);
            decks = seeded;
        }

        self.decks = decks;
        self.flashcards = flashcards;
        Ok(())
    }

    pub async fn create_deck(&mut self, name: &str, description: &str) -> Result<Deck> {
        let outcome = self.create_deck_inner(name, description).await;
        self.record(outcome)
    }

    async fn create_deck_inner(&mut self, name: &str, description: &str) -> Result<Deck> {
        let deck = Deck::new(required("Deck name", name)?, description.trim());
        let mut updated = self.decks.clone();
        updated.push(deck.clone());

        self.service.save_decks(&updated).await?;
        self.decks = updated;
        Ok(deck)
    }

    pub async fn update_deck(
        &mut self,
        deck_id: &str,
        name: &str,
        description: &str,
    ) -> Result<()> {
        let outcome = self.update_deck_inner(deck_id, name, description).await;
        self.record(outcome)
    }

    async fn update_deck_inner(
        &mut self,
        deck_id: &str,
        name: &str,
        description: &str,
    ) -> Result<()> {
        let name = required("Deck name", name)?;
        self.ensure_deck(deck_id)?;
        let updated: Vec<Deck> = self
            .decks
            .iter()
            .map(|d| {
                if d.id == deck_id {
                    Deck {
                        name: name.clone(),
                        description: description.trim().to_string(),
                        ..d.clone()
                    }
                } else {
                    d.clone()
                }
            })
            .collect();

        self.service.save_decks(&updated).await?;
        self.decks = updated;
        Ok(())
    }

    /// Delete a deck and every flashcard that belongs to it.
    pub async fn delete_deck(&mut self, deck_id: &str) -> Result<()> {
        let outcome = self.delete_deck_inner(deck_id).await;
        self.record(outcome)
    }

    async fn delete_deck_inner(&mut self, deck_id: &str) -> Result<()> {
        self.ensure_deck(deck_id)?;
        let remaining_cards: Vec<Flashcard> = self
            .flashcards
            .iter()
            .filter(|c| c.deck_id != deck_id)
            .cloned()
            .collect();
        let remaining_decks: Vec<Deck> = self
            .decks
            .iter()
            .filter(|d| d.id != deck_id)
            .cloned()
            .collect();

        futures::try_join!(
            self.service.save_flashcards(&remaining_cards),
            self.service.save_decks(&remaining_decks)
        )?;
        self.decks = remaining_decks;
        self.commit_flashcards(remaining_cards);
        Ok(())
    }

    pub async fn create_flashcard(
        &mut self,
        deck_id: &str,
        front: &str,
        back: &str,
    ) -> Result<Flashcard> {
        let outcome = self.create_flashcard_inner(deck_id, front, back).await;
        self.record(outcome)
    }

    async fn create_flashcard_inner(
        &mut self,
        deck_id: &str,
        front: &str,
        back: &str,
    ) -> Result<Flashcard> {
        let front = required("Front", front)?;
        let back = required("Back", back)?;
        self.ensure_deck(deck_id)?;
        let card = Flashcard::new(deck_id, front, back);
        let mut updated = self.flashcards.clone();
        updated.push(card.clone());

        self.service.save_flashcards(&updated).await?;
        self.commit_flashcards(updated);
        Ok(card)
    }

    pub async fn update_flashcard(
        &mut self,
        card_id: &str,
        front: &str,
        back: &str,
    ) -> Result<()> {
        let outcome = self.update_flashcard_inner(card_id, front, back).await;
        self.record(outcome)
    }

    async fn update_flashcard_inner(
        &mut self,
        card_id: &str,
        front: &str,
        back: &str,
    ) -> Result<()> {
        let front = required("Front", front)?;
        let back = required("Back", back)?;
        self.ensure_flashcard(card_id)?;
        let updated: Vec<Flashcard> = self
            .flashcards
            .iter()
            .map(|c| {
                if c.id == card_id {
                    Flashcard {
                        front: front.clone(),
                        back: back.clone(),
                        ..c.clone()
                    }
                } else {
                    c.clone()
                }
            })
            .collect();

        self.service.save_flashcards(&updated).await?;
        self.commit_flashcards(updated);
        Ok(())
    }

    pub async fn delete_flashcard(&mut self, card_id: &str) -> Result<()> {
        let outcome = self.delete_flashcard_inner(card_id).await;
        self.record(outcome)
    }

    async fn delete_flashcard_inner(&mut self, card_id: &str) -> Result<()> {
        self.ensure_flashcard(card_id)?;
        let updated: Vec<Flashcard> = self
            .flashcards
            .iter()
            .filter(|c| c.id != card_id)
            .cloned()
            .collect();

        self.service.save_flashcards(&updated).await?;
        self.commit_flashcards(updated);
        Ok(())
    }

    /// Append a finished study session and stamp the deck's `last_studied`.
    ///
    /// The session log is written first. If the deck update then fails, the
    /// session stays recorded and the deck keeps its previous `last_studied`.
    pub async fn record_study_session(
        &mut self,
        deck_id: &str,
        started: Timestamp,
        cards_studied: u32,
        correct_answers: u32,
    ) -> Result<StudySession> {
        let outcome = self
            .record_study_session_inner(deck_id, started, cards_studied, correct_answers)
            .await;
        self.record(outcome)
    }

    async fn record_study_session_inner(
        &mut self,
        deck_id: &str,
        started: Timestamp,
        cards_studied: u32,
        correct_answers: u32,
    ) -> Result<StudySession> {
        self.ensure_deck(deck_id)?;
        if correct_answers > cards_studied {
            return Err(FlashdeckError::InvalidInput(format!(
                "{} correct answers out of {} cards studied",
                correct_answers, cards_studied
            )));
        }
        let ended = Utc::now();
        let session = StudySession {
            ended: Some(ended),
            cards_studied,
            correct_answers,
            ..StudySession::new(deck_id, started)
        };
        self.service.save_study_session(&session).await?;

        let updated: Vec<Deck> = self
            .decks
            .iter()
            .map(|d| {
                if d.id == deck_id {
                    Deck {
                        last_studied: Some(ended),
                        ..d.clone()
                    }
                } else {
                    d.clone()
                }
            })
            .collect();
        self.service.save_decks(&updated).await?;
        self.decks = updated;
        Ok(session)
    }

    pub async fn study_sessions(&mut self) -> Result<Vec<StudySession>> {
        let outcome = self.service.load_study_sessions().await;
        self.record(outcome)
    }

    pub async fn export_data(&mut self) -> Result<DataSnapshot> {
        let outcome = self.service.export_all_data().await;
        self.record(outcome)
    }

    /// Replace decks and flashcards with the snapshot's. Sessions in the
    /// snapshot are ignored.
    pub async fn import_data(&mut self, snapshot: DataSnapshot) -> Result<()> {
        let outcome = self.import_data_inner(snapshot).await;
        self.record(outcome)
    }

    async fn import_data_inner(&mut self, snapshot: DataSnapshot) -> Result<()> {
        let incoming = DataSnapshot {
            sessions: Vec::new(),
            ..snapshot
        };
        self.service.import_all_data(&incoming).await?;

        let (mut decks, flashcards) =
            futures::try_join!(self.service.load_decks(), self.service.load_flashcards())?;
        sync_card_counts(&mut decks, &flashcards);
        self.decks = decks;
        self.flashcards = flashcards;
        Ok(())
    }

    pub async fn clear_all_data(&mut self) -> Result<()> {
        let outcome = self.service.clear_all_data().await;
        if outcome.is_ok() {
            self.decks.clear();
            self.flashcards.clear();
        }
        self.record(outcome)
    }
}
