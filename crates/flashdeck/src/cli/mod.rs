//! # CLI Behavior
//!
//! This is **one possible UI client** for flashdeck, not the application
//! itself. Each invocation initializes a context, loads the stored
//! collections, performs one coordinator operation and prints the outcome.
//!
//! ## Naked Execution
//!
//! Running `flashdeck` with no arguments defaults to `flashdeck decks`.
//!
//! ## Display Indexes
//!
//! Decks and cards are addressed by their 1-based position in the listing, so
//! `flashdeck card add 2 hola hello` adds a card to the second deck shown by
//! `flashdeck decks`. Card indexes are local to their deck.
//!
//! ## Module Structure
//!
//! - `commands`: context setup, index resolution and per-command handlers
//! - `render`: output formatting (lists, colors, messages)
//! - `setup`: argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
