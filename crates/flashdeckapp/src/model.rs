//! # Domain Model
//!
//! Plain records for the three persisted entity types: [`Deck`], [`Flashcard`]
//! and [`StudySession`]. None of them carry behavior beyond construction; the
//! coordinator in [`crate::app`] owns every mutation.
//!
//! ## Identity
//!
//! Ids are random v4 UUIDs rendered as strings. They are kept as `String` rather
//! than `Uuid` so that data imported from elsewhere (where ids may be any string)
//! survives a load.
//!
//! ## Derived Fields
//!
//! [`Deck::card_count`] is never the source of truth. It is recomputed from the
//! flashcard collection by [`sync_card_counts`] after every load and every
//! flashcard mutation. Stored counts are ignored.
//!
//! ## Reserved Fields
//!
//! [`Flashcard::difficulty`] and [`Flashcard::interval`] exist for a future
//! scheduler. They are carried through storage unmodified and nothing in this
//! crate reads them.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

pub type Timestamp = DateTime<Utc>;

pub const DEFAULT_DECK_NAME: &str = "My First Deck";
pub const DEFAULT_DECK_DESCRIPTION: &str =
    "Your first flashcard deck. You can rename or delete this deck anytime.";

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Deck {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created: Timestamp,
    pub card_count: usize,
    pub last_studied: Option<Timestamp>,
}

impl Deck {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            name: name.into(),
            description: description.into(),
            created: Utc::now(),
            card_count: 0,
            last_studied: None,
        }
    }

    /// The deck synthesized when a store holds no decks at all.
    pub fn starter() -> Self {
        Self::new(DEFAULT_DECK_NAME, DEFAULT_DECK_DESCRIPTION)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Flashcard {
    pub id: String,
    pub front: String,
    pub back: String,
    pub created: Timestamp,
    pub deck_id: String,
    pub last_reviewed: Option<Timestamp>,
    pub difficulty: Option<f64>,
    pub interval: Option<f64>,
}

impl Flashcard {
    pub fn new(
        deck_id: impl Into<String>,
        front: impl Into<String>,
        back: impl Into<String>,
    ) -> Self {
        Self {
            id: new_id(),
            front: front.into(),
            back: back.into(),
            created: Utc::now(),
            deck_id: deck_id.into(),
            last_reviewed: None,
            difficulty: None,
            interval: None,
        }
    }
}

/// One study activity against a deck. Sessions are appended, never edited.
#[derive(Debug, Clone, PartialEq)]
pub struct StudySession {
    pub id: String,
    pub deck_id: String,
    pub started: Timestamp,
    pub ended: Option<Timestamp>,
    pub cards_studied: u32,
    pub correct_answers: u32,
}

impl StudySession {
    pub fn new(deck_id: impl Into<String>, started: Timestamp) -> Self {
        Self {
            id: new_id(),
            deck_id: deck_id.into(),
            started,
            ended: None,
            cards_studied: 0,
            correct_answers: 0,
        }
    }
}

/// Everything a backend holds, as returned by export and accepted by import.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSnapshot {
    pub decks: Vec<Deck>,
    pub flashcards: Vec<Flashcard>,
    pub sessions: Vec<StudySession>,
}

/// Diagnostic summary of what a local store currently holds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    pub version: String,
    pub deck_count: usize,
    pub flashcard_count: usize,
    pub session_count: usize,
    /// Approximate bytes used by the three collection payloads.
    pub storage_used: usize,
}

impl StorageInfo {
    pub fn unknown() -> Self {
        Self {
            version: "unknown".to_string(),
            deck_count: 0,
            flashcard_count: 0,
            session_count: 0,
            storage_used: 0,
        }
    }
}

/// Recompute every deck's `card_count` from the given flashcards.
pub fn sync_card_counts(decks: &mut [Deck], flashcards: &[Flashcard]) {
    for deck in decks.iter_mut() {
        deck.card_count = flashcards.iter().filter(|c| c.deck_id == deck.id).count();
    }
}
