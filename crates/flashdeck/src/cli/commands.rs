//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Installs a logger
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: Convert shell arguments into typed commands via clap
//! 2. **Context Setup**: Load configuration and build a loaded `FlashcardApp`
//! 3. **Index Resolution**: Turn 1-based display indexes into record ids
//! 4. **Dispatch**: Call the matching coordinator operation
//! 5. **Output Formatting**: Hand results to `render`
//!
//! The coordinator is async; each handler drives it to completion with
//! `futures::executor::block_on`.

use super::render;
use super::setup::{CardCommands, Cli, Commands, DeckCommands};
use clap::Parser;
use flashdeckapp::app::FlashcardApp;
use flashdeckapp::config::FlashdeckConfig;
use flashdeckapp::error::{FlashdeckError, Result};
use flashdeckapp::init::{default_config_file, initialize};
use flashdeckapp::store::codec::{decode_snapshot, encode_snapshot};
use flashdeckapp::store::FileStorageService;
use futures::executor::block_on;
use std::path::{Path, PathBuf};

type App = FlashcardApp<FileStorageService>;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = FlashdeckConfig::load(default_config_file().as_deref())?;
    let ctx = initialize(config, cli.data_dir.clone())?;
    let data_dir = ctx.data_dir;
    let mut app = ctx.app;
    block_on(app.load())?;

    match cli.command.unwrap_or(Commands::Decks) {
        Commands::Decks => {
            render::print_decks(app.decks());
            Ok(())
        }
        Commands::Deck { action } => handle_deck(&mut app, action),
        Commands::Cards { deck } => handle_cards(&app, deck),
        Commands::Card { action } => handle_card(&mut app, action),
        Commands::Study {
            deck,
            studied,
            correct,
        } => handle_study(&mut app, deck, studied, correct),
        Commands::Sessions { deck } => handle_sessions(&mut app, deck),
        Commands::Export { file } => handle_export(&mut app, file),
        Commands::Import { file } => handle_import(&mut app, &file),
        Commands::Clear { yes } => handle_clear(&mut app, yes),
        Commands::Info { json } => handle_info(&app, &data_dir, json),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    // RUST_LOG, when set, overrides the flag.
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn deck_id_at(app: &App, index: usize) -> Result<String> {
    index
        .checked_sub(1)
        .and_then(|i| app.decks().get(i))
        .map(|d| d.id.clone())
        .ok_or_else(|| FlashdeckError::DeckNotFound(format!("#{}", index)))
}

fn card_id_at(app: &App, deck_id: &str, index: usize) -> Result<String> {
    index
        .checked_sub(1)
        .and_then(|i| app.flashcards_for_deck(deck_id).get(i).map(|c| c.id.clone()))
        .ok_or_else(|| FlashdeckError::FlashcardNotFound(format!("#{}", index)))
}

fn handle_deck(app: &mut App, action: DeckCommands) -> Result<()> {
    match action {
        DeckCommands::Create { name, description } => {
            let deck = block_on(app.create_deck(&name, &description))?;
            render::print_success(&format!("Created deck \"{}\"", deck.name));
        }
        DeckCommands::Rename {
            deck,
            name,
            description,
        } => {
            let deck_id = deck_id_at(app, deck)?;
            let description = match description {
                Some(d) => d,
                None => app
                    .deck(&deck_id)
                    .map(|d| d.description.clone())
                    .unwrap_or_default(),
            };
            block_on(app.update_deck(&deck_id, &name, &description))?;
            render::print_success(&format!("Renamed deck {} to \"{}\"", deck, name.trim()));
        }
        DeckCommands::Delete { deck } => {
            let deck_id = deck_id_at(app, deck)?;
            let removed = app
                .deck(&deck_id)
                .map(|d| (d.name.clone(), d.card_count))
                .unwrap_or_default();
            block_on(app.delete_deck(&deck_id))?;
            render::print_success(&format!(
                "Deleted deck \"{}\" and {} card(s)",
                removed.0, removed.1
            ));
        }
    }
    Ok(())
}

fn handle_cards(app: &App, deck: usize) -> Result<()> {
    let deck_id = deck_id_at(app, deck)?;
    let cards = app.flashcards_for_deck(&deck_id);
    if let Some(deck) = app.deck(&deck_id) {
        render::print_cards(deck, &cards);
    }
    Ok(())
}

fn handle_card(app: &mut App, action: CardCommands) -> Result<()> {
    match action {
        CardCommands::Add { deck, front, back } => {
            let deck_id = deck_id_at(app, deck)?;
            block_on(app.create_flashcard(&deck_id, &front, &back))?;
            let position = app.flashcards_for_deck(&deck_id).len();
            render::print_success(&format!("Added card {} to deck {}", position, deck));
        }
        CardCommands::Edit {
            deck,
            card,
            front,
            back,
        } => {
            let deck_id = deck_id_at(app, deck)?;
            let card_id = card_id_at(app, &deck_id, card)?;
            block_on(app.update_flashcard(&card_id, &front, &back))?;
            render::print_success(&format!("Updated card {} in deck {}", card, deck));
        }
        CardCommands::Delete { deck, card } => {
            let deck_id = deck_id_at(app, deck)?;
            let card_id = card_id_at(app, &deck_id, card)?;
            block_on(app.delete_flashcard(&card_id))?;
            render::print_success(&format!("Deleted card {} from deck {}", card, deck));
        }
    }
    Ok(())
}

fn handle_study(app: &mut App, deck: usize, studied: u32, correct: u32) -> Result<()> {
    let deck_id = deck_id_at(app, deck)?;
    let session = block_on(app.record_study_session(
        &deck_id,
        chrono::Utc::now(),
        studied,
        correct,
    ))?;
    render::print_success(&format!(
        "Recorded session: {}",
        render::score(session.correct_answers, session.cards_studied)
    ));
    Ok(())
}

fn handle_sessions(app: &mut App, deck: Option<usize>) -> Result<()> {
    let only = deck.map(|index| deck_id_at(app, index)).transpose()?;
    let sessions = block_on(app.study_sessions())?;

    let rows: Vec<(String, _)> = sessions
        .iter()
        .filter(|s| only.as_ref().is_none_or(|id| &s.deck_id == id))
        .map(|s| {
            let name = app
                .deck(&s.deck_id)
                .map(|d| d.name.clone())
                .unwrap_or_else(|| "(deleted deck)".to_string());
            (name, s)
        })
        .collect();
    render::print_sessions(&rows);
    Ok(())
}

fn handle_export(app: &mut App, file: Option<PathBuf>) -> Result<()> {
    let snapshot = block_on(app.export_data())?;
    let document = encode_snapshot(&snapshot)?;
    match file {
        Some(path) => {
            std::fs::write(&path, document)?;
            render::print_success(&format!("Exported to {}", path.display()));
        }
        None => println!("{}", document),
    }
    Ok(())
}

fn handle_import(app: &mut App, file: &Path) -> Result<()> {
    let document = std::fs::read_to_string(file)?;
    let snapshot = decode_snapshot(&document)?;
    if !snapshot.sessions.is_empty() {
        render::print_info(&format!(
            "Skipping {} study session(s); sessions are not imported",
            snapshot.sessions.len()
        ));
    }
    block_on(app.import_data(snapshot))?;
    render::print_success(&format!(
        "Imported {} deck(s) and {} card(s)",
        app.decks().len(),
        app.flashcards().len()
    ));
    Ok(())
}

fn handle_clear(app: &mut App, yes: bool) -> Result<()> {
    if !yes {
        return Err(FlashdeckError::InvalidInput(
            "clear erases all stored data; pass --yes to confirm".to_string(),
        ));
    }
    block_on(app.clear_all_data())?;
    render::print_success("All data cleared");
    Ok(())
}

fn handle_info(app: &App, data_dir: &Path, json: bool) -> Result<()> {
    let info = app.service().storage_info();
    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        render::print_storage_info(&info, &data_dir.display().to_string());
    }
    Ok(())
}
