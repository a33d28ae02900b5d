//! # Wire Codec
//!
//! Converts domain records to and from their stored JSON form.
//!
//! ## Stored Shape
//!
//! Serialized records mirror the in-memory shape with camelCase field names and
//! every timestamp rendered as an ISO-8601 / RFC 3339 string:
//!
//! ```json
//! {"id":"…","name":"Spanish","description":"","created":"2024-05-01T10:00:00.123Z","cardCount":3}
//! ```
//!
//! Optional fields (`lastStudied`, `lastReviewed`, `ended`, `difficulty`,
//! `interval`) are omitted when absent, never written as `null`. When reading, an
//! omitted field, an explicit `null` and an empty string all decode to `None`.
//!
//! ## Record Validation
//!
//! Each array element is decoded on its own into a [`Decoded`] value. A record
//! missing a required field, holding a field of the wrong JSON type, or carrying
//! an unparseable required date becomes [`Decoded::Invalid`] and is dropped by
//! [`decode_collection`]. One bad record never fails the whole collection.
//! Records must be JSON objects; an array holding the right values in field
//! order is still invalid.
//!
//! The reserved flashcard fields (`difficulty`, `interval`) are not part of
//! validation. A value there that is not a finite number decodes as absent.
//!
//! A payload that is not a JSON array at all yields an empty collection.

use crate::error::Result;
use crate::model::{DataSnapshot, Deck, Flashcard, StudySession, Timestamp};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Outcome of decoding a single stored record.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded<T> {
    Valid(T),
    Invalid(String),
}

impl<T> Decoded<T> {
    pub fn valid(self) -> Option<T> {
        match self {
            Decoded::Valid(record) => Some(record),
            Decoded::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedDeck {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created: String,
    pub card_count: Number,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_studied: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedFlashcard {
    pub id: String,
    pub front: String,
    pub back: String,
    pub created: String,
    pub deck_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<String>,
    #[serde(
        default,
        deserialize_with = "reserved_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub difficulty: Option<f64>,
    #[serde(
        default,
        deserialize_with = "reserved_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub interval: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerializedStudySession {
    pub id: String,
    pub deck_id: String,
    pub started: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended: Option<String>,
    pub cards_studied: u32,
    pub correct_answers: u32,
}

pub fn format_date(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

pub fn parse_date(raw: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Reserved numeric fields are never read, so a value that is not a finite
/// number decodes as absent instead of invalidating the whole record.
fn reserved_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|v| v.as_f64()).filter(|n| n.is_finite()))
}

fn required_date(field: &str, raw: &str) -> std::result::Result<Timestamp, String> {
    parse_date(raw).ok_or_else(|| format!("invalid `{}` date: {:?}", field, raw))
}

fn optional_date(
    field: &str,
    raw: Option<&str>,
) -> std::result::Result<Option<Timestamp>, String> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => required_date(field, s).map(Some),
    }
}

impl From<&Deck> for SerializedDeck {
    fn from(deck: &Deck) -> Self {
        Self {
            id: deck.id.clone(),
            name: deck.name.clone(),
            description: deck.description.clone(),
            created: format_date(&deck.created),
            card_count: Number::from(deck.card_count as u64),
            last_studied: deck.last_studied.as_ref().map(format_date),
        }
    }
}

impl TryFrom<SerializedDeck> for Deck {
    type Error = String;

    fn try_from(raw: SerializedDeck) -> std::result::Result<Self, Self::Error> {
        Ok(Deck {
            created: required_date("created", &raw.created)?,
            last_studied: optional_date("lastStudied", raw.last_studied.as_deref())?,
            // Stored counts are advisory; the coordinator re-derives them.
            card_count: raw.card_count.as_u64().unwrap_or(0) as usize,
            id: raw.id,
            name: raw.name,
            description: raw.description,
        })
    }
}

impl From<&Flashcard> for SerializedFlashcard {
    fn from(card: &Flashcard) -> Self {
        Self {
            id: card.id.clone(),
            front: card.front.clone(),
            back: card.back.clone(),
            created: format_date(&card.created),
            deck_id: card.deck_id.clone(),
            last_reviewed: card.last_reviewed.as_ref().map(format_date),
            // JSON has no representation for NaN or infinity.
            difficulty: card.difficulty.filter(|n| n.is_finite()),
            interval: card.interval.filter(|n| n.is_finite()),
        }
    }
}

impl TryFrom<SerializedFlashcard> for Flashcard {
    type Error = String;

    fn try_from(raw: SerializedFlashcard) -> std::result::Result<Self, Self::Error> {
        Ok(Flashcard {
            created: required_date("created", &raw.created)?,
            last_reviewed: optional_date("lastReviewed", raw.last_reviewed.as_deref())?,
            id: raw.id,
            front: raw.front,
            back: raw.back,
            deck_id: raw.deck_id,
            difficulty: raw.difficulty,
            interval: raw.interval,
        })
    }
}

impl From<&StudySession> for SerializedStudySession {
    fn from(session: &StudySession) -> Self {
        Self {
            id: session.id.clone(),
            deck_id: session.deck_id.clone(),
            started: format_date(&session.started),
            ended: session.ended.as_ref().map(format_date),
            cards_studied: session.cards_studied,
            correct_answers: session.correct_answers,
        }
    }
}

impl TryFrom<SerializedStudySession> for StudySession {
    type Error = String;

    fn try_from(raw: SerializedStudySession) -> std::result::Result<Self, Self::Error> {
        Ok(StudySession {
            started: required_date("started", &raw.started)?,
            ended: optional_date("ended", raw.ended.as_deref())?,
            id: raw.id,
            deck_id: raw.deck_id,
            cards_studied: raw.cards_studied,
            correct_answers: raw.correct_answers,
        })
    }
}

fn decode_record<W, T>(value: Value) -> Decoded<T>
where
    W: for<'de> Deserialize<'de>,
    T: TryFrom<W, Error = String>,
{
    if !value.is_object() {
        return Decoded::Invalid("record is not an object".to_string());
    }
    let wire: W = match serde_json::from_value(value) {
        Ok(wire) => wire,
        Err(e) => return Decoded::Invalid(e.to_string()),
    };
    match T::try_from(wire) {
        Ok(record) => Decoded::Valid(record),
        Err(reason) => Decoded::Invalid(reason),
    }
}

pub fn decode_deck(value: Value) -> Decoded<Deck> {
    decode_record::<SerializedDeck, Deck>(value)
}

pub fn decode_flashcard(value: Value) -> Decoded<Flashcard> {
    decode_record::<SerializedFlashcard, Flashcard>(value)
}

pub fn decode_study_session(value: Value) -> Decoded<StudySession> {
    decode_record::<SerializedStudySession, StudySession>(value)
}

fn decode_values<T>(kind: &str, values: Vec<Value>, decode: fn(Value) -> Decoded<T>) -> Vec<T> {
    let mut records = Vec::with_capacity(values.len());
    for (pos, value) in values.into_iter().enumerate() {
        match decode(value) {
            Decoded::Valid(record) => records.push(record),
            Decoded::Invalid(reason) => {
                log::debug!("Dropping malformed {} record at {}: {}", kind, pos, reason);
            }
        }
    }
    records
}

/// Decode a stored collection payload, dropping malformed records.
///
/// Never fails: a payload that is not a JSON array yields an empty collection.
pub fn decode_collection<T>(kind: &str, payload: &str, decode: fn(Value) -> Decoded<T>) -> Vec<T> {
    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Array(values)) => decode_values(kind, values, decode),
        Ok(_) => {
            log::warn!("Stored {} payload is not an array; treating as empty", kind);
            Vec::new()
        }
        Err(e) => {
            log::warn!("Error deserializing {}: {}", kind, e);
            Vec::new()
        }
    }
}

/// Number of elements in a stored array payload, or 0 if it is not one.
pub fn count_elements(payload: &str) -> usize {
    match serde_json::from_str::<Value>(payload) {
        Ok(Value::Array(values)) => values.len(),
        _ => 0,
    }
}

pub fn encode_decks(decks: &[Deck]) -> Result<String> {
    let wire: Vec<SerializedDeck> = decks.iter().map(SerializedDeck::from).collect();
    Ok(serde_json::to_string(&wire)?)
}

pub fn encode_flashcards(cards: &[Flashcard]) -> Result<String> {
    let wire: Vec<SerializedFlashcard> = cards.iter().map(SerializedFlashcard::from).collect();
    Ok(serde_json::to_string(&wire)?)
}

pub fn encode_study_sessions(sessions: &[StudySession]) -> Result<String> {
    let wire: Vec<SerializedStudySession> =
        sessions.iter().map(SerializedStudySession::from).collect();
    Ok(serde_json::to_string(&wire)?)
}

#[derive(Serialize)]
struct SnapshotOut {
    decks: Vec<SerializedDeck>,
    flashcards: Vec<SerializedFlashcard>,
    sessions: Vec<SerializedStudySession>,
}

#[derive(Deserialize)]
struct SnapshotIn {
    #[serde(default)]
    decks: Vec<Value>,
    #[serde(default)]
    flashcards: Vec<Value>,
    #[serde(default)]
    sessions: Vec<Value>,
}

/// Render a snapshot as a pretty-printed export document.
pub fn encode_snapshot(snapshot: &DataSnapshot) -> Result<String> {
    let out = SnapshotOut {
        decks: snapshot.decks.iter().map(SerializedDeck::from).collect(),
        flashcards: snapshot
            .flashcards
            .iter()
            .map(SerializedFlashcard::from)
            .collect(),
        sessions: snapshot
            .sessions
            .iter()
            .map(SerializedStudySession::from)
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&out)?)
}

/// Parse an export document.
///
/// The document itself must be a JSON object; malformed records inside it are
/// dropped the same way stored collections drop them.
pub fn decode_snapshot(document: &str) -> Result<DataSnapshot> {
    let raw: SnapshotIn = serde_json::from_str(document)?;
    Ok(DataSnapshot {
        decks: decode_values("deck", raw.decks, decode_deck),
        flashcards: decode_values("flashcard", raw.flashcards, decode_flashcard),
        sessions: decode_values("study session", raw.sessions, decode_study_session),
    })
}
