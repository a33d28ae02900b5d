//! Fixtures for exercising the coordinator against an in-memory store.

use crate::app::FlashcardApp;
use crate::model::{Deck, Flashcard};
use crate::store::local::LocalStorageService;
use crate::store::mem_backend::MemBackend;
use futures::executor::block_on;
use std::rc::Rc;

pub type MemApp = FlashcardApp<LocalStorageService<Rc<MemBackend>>>;

/// A loaded coordinator plus a handle on its backend, so tests can inspect raw
/// payloads or inject write failures.
pub struct AppFixture {
    pub backend: Rc<MemBackend>,
    pub app: MemApp,
}

impl Default for AppFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl AppFixture {
    /// Fresh store, loaded, so it holds only the starter deck.
    pub fn new() -> Self {
        Self::with_backend(MemBackend::new())
    }

    pub fn with_backend(backend: MemBackend) -> Self {
        let backend = Rc::new(backend);
        let mut app = FlashcardApp::new(LocalStorageService::new(Rc::clone(&backend)));
        block_on(app.load()).expect("initial load");
        Self { backend, app }
    }

    pub fn with_deck(mut self, name: &str) -> Self {
        block_on(self.app.create_deck(name, "")).expect("create deck");
        self
    }

    /// Add `count` cards to the deck named `deck_name`.
    pub fn with_cards(mut self, deck_name: &str, count: usize) -> Self {
        let deck_id = self.deck_named(deck_name).id.clone();
        for i in 0..count {
            block_on(self.app.create_flashcard(
                &deck_id,
                &format!("{} front {}", deck_name, i + 1),
                &format!("{} back {}", deck_name, i + 1),
            ))
            .expect("create flashcard");
        }
        self
    }

    pub fn deck_named(&self, name: &str) -> &Deck {
        self.app
            .decks()
            .iter()
            .find(|d| d.name == name)
            .unwrap_or_else(|| panic!("no deck named {}", name))
    }

    pub fn cards_of(&self, name: &str) -> Vec<Flashcard> {
        let deck_id = &self.deck_named(name).id;
        self.app
            .flashcards_for_deck(deck_id)
            .into_iter()
            .cloned()
            .collect()
    }
}
