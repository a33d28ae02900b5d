//! # Flashdeck CLI
//!
//! The binary is intentionally thin. The CLI lives in `src/cli/`, and this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Layering
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/flashdeck/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                          │
//! │  - display-index resolution + dispatch (commands.rs)         │
//! │  - terminal rendering (render.rs)                            │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Coordinator (crates/flashdeckapp/src/app.rs)                │
//! │  - in-memory decks and flashcards, save-then-commit          │
//! └──────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Persistence (crates/flashdeckapp/src/store/)                │
//! │  - DataService over a directory of JSON files                │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything below the CLI layer is UI agnostic. The CLI owns argument
//! parsing, logging setup, context initialization, rendering and exit codes.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
