use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlashdeckError {
    #[error("Deck not found: {0}")]
    DeckNotFound(String),

    #[error("Flashcard not found: {0}")]
    FlashcardNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage quota exceeded: {requested} bytes requested, limit is {limit} bytes")]
    QuotaExceeded { requested: usize, limit: usize },

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0}")]
    Persistence(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FlashdeckError>;
