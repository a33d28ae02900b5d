use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "flashdeck", bin_name = "flashdeck", version)]
#[command(about = "Flashcard decks in the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the stored collections
    #[arg(long, global = true, value_name = "PATH", help_heading = "Options")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List decks with their card counts
    Decks,

    /// Create, rename or delete a deck
    Deck {
        #[command(subcommand)]
        action: DeckCommands,
    },

    /// List the cards of a deck
    Cards {
        /// Deck index
        deck: usize,
    },

    /// Add, edit or delete a card
    Card {
        #[command(subcommand)]
        action: CardCommands,
    },

    /// Record a finished study session for a deck
    Study {
        /// Deck index
        deck: usize,

        /// Number of cards studied
        #[arg(long)]
        studied: u32,

        /// Number of correct answers
        #[arg(long)]
        correct: u32,
    },

    /// Show recorded study sessions
    Sessions {
        /// Only sessions of this deck
        deck: Option<usize>,
    },

    /// Write all data as JSON to a file, or stdout
    Export {
        file: Option<PathBuf>,
    },

    /// Replace decks and cards with the contents of an export
    Import {
        file: PathBuf,
    },

    /// Erase all stored data
    Clear {
        /// Confirm the erase
        #[arg(long)]
        yes: bool,
    },

    /// Show storage details
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum DeckCommands {
    /// Create a new deck
    Create {
        name: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Rename a deck, optionally replacing its description
    Rename {
        /// Deck index
        deck: usize,

        name: String,

        #[arg(short, long)]
        description: Option<String>,
    },

    /// Delete a deck and all its cards
    Delete {
        /// Deck index
        deck: usize,
    },
}

#[derive(Subcommand, Debug)]
pub enum CardCommands {
    /// Add a card to a deck
    Add {
        /// Deck index
        deck: usize,
        front: String,
        back: String,
    },

    /// Replace both faces of a card
    Edit {
        /// Deck index
        deck: usize,
        /// Card index within the deck
        card: usize,
        front: String,
        back: String,
    },

    /// Delete a card
    Delete {
        /// Deck index
        deck: usize,
        /// Card index within the deck
        card: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naked_invocation() {
        let cli = Cli::try_parse_from(["flashdeck"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["flashdeck", "decks", "--data-dir", "/tmp/x", "-v"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/x")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_card_add_args() {
        let cli = Cli::try_parse_from(["flashdeck", "card", "add", "2", "hola", "hello"]).unwrap();
        match cli.command {
            Some(Commands::Card {
                action: CardCommands::Add { deck, front, back },
            }) => {
                assert_eq!(deck, 2);
                assert_eq!(front, "hola");
                assert_eq!(back, "hello");
            }
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rename_keeps_description_optional() {
        let cli = Cli::try_parse_from(["flashdeck", "deck", "rename", "1", "Verbs"]).unwrap();
        match cli.command {
            Some(Commands::Deck {
                action: DeckCommands::Rename { description, .. },
            }) => assert!(description.is_none()),
            other => panic!("Unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_study_requires_counts() {
        assert!(Cli::try_parse_from(["flashdeck", "study", "1", "--studied", "5"]).is_err());
    }
}
