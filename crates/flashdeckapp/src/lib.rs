//! # Flashdeck Architecture
//!
//! Flashdeck is a **UI-agnostic flashcard library**. Decks and flashcards are
//! kept in client-local storage behind a storage-agnostic persistence port, so
//! a networked backend can replace local storage without touching callers.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI Layer (the `flashdeck` CLI, or any other client)        │
//! │  - Renders decks/cards, collects input                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Coordinator (app.rs)                                       │
//! │  - Owns in-memory decks and flashcards                      │
//! │  - Save-then-commit, derived card counts, error state       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Persistence Port (service.rs)                              │
//! │  - Async DataService trait                                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - LocalStorageService: keys, versioning, codec, validation │
//! │  - KeyValueStore backends: MemBackend, FsBackend            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `app.rs` inward, code never writes to stdout/stderr, never exits the
//! process and never assumes a terminal. Diagnostics go through the `log`
//! facade; the client decides where they end up.
//!
//! ## Module Overview
//!
//! - [`app`]: The coordinator, the entry point for all operations
//! - [`service`]: The persistence port
//! - [`store`]: Key/value backends and the local persistence adapter
//! - [`model`]: Core data types (`Deck`, `Flashcard`, `StudySession`)
//! - [`config`]: Configuration management
//! - [`init`]: Context wiring for clients
//! - [`error`]: Error types

pub mod app;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod service;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
