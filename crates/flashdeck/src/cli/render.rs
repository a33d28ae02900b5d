use chrono::{DateTime, Utc};
use colored::Colorize;
use flashdeckapp::model::{Deck, Flashcard, StorageInfo, StudySession};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const COUNT_WIDTH: usize = 10;
const FACE_SEPARATOR: &str = " → ";

pub(super) fn print_success(message: &str) {
    println!("{}", message.green());
}

pub(super) fn print_info(message: &str) {
    println!("{}", message.dimmed());
}

pub(super) fn print_decks(decks: &[Deck]) {
    if decks.is_empty() {
        println!("No decks found.");
        return;
    }

    for (i, deck) in decks.iter().enumerate() {
        let idx_str = format!("{:>3}. ", i + 1);
        let count = format!("{:>width$}", card_label(deck.card_count), width = COUNT_WIDTH);
        let studied = match deck.last_studied {
            Some(ts) => format_time_ago(ts),
            None => format!("{:>width$}", "never", width = TIME_WIDTH),
        };

        let title = if deck.description.is_empty() {
            deck.name.clone()
        } else {
            format!("{} {}", deck.name, deck.description)
        };
        let fixed_width = idx_str.width() + COUNT_WIDTH + TIME_WIDTH + 2;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title_display = truncate_to_width(&title, available);
        let padding = available.saturating_sub(title_display.width());

        // Name in bold, description dimmed, both inside the truncated width.
        let (name_part, desc_part) = split_at_name(&title_display, &deck.name);

        println!(
            "{}{}{}{}  {}{}",
            idx_str.yellow(),
            name_part.bold(),
            desc_part.dimmed(),
            " ".repeat(padding),
            count,
            studied.dimmed()
        );
    }
}

pub(super) fn print_cards(deck: &Deck, cards: &[&Flashcard]) {
    println!("{} ({})", deck.name.bold(), card_label(cards.len()));
    if cards.is_empty() {
        println!("No cards in this deck.");
        return;
    }

    for (i, card) in cards.iter().enumerate() {
        let idx_str = format!("{:>3}. ", i + 1);
        let fixed_width = idx_str.width() + FACE_SEPARATOR.width() + TIME_WIDTH;
        let half = LINE_WIDTH.saturating_sub(fixed_width) / 2;
        let front = truncate_to_width(&single_line(&card.front), half);
        let back = truncate_to_width(&single_line(&card.back), half);
        let padding = (half * 2).saturating_sub(front.width() + back.width());

        println!(
            "{}{}{}{}{}{}",
            idx_str.yellow(),
            front,
            FACE_SEPARATOR.dimmed(),
            back,
            " ".repeat(padding),
            format_time_ago(card.created).dimmed()
        );
    }
}

pub(super) fn print_sessions(sessions: &[(String, &StudySession)]) {
    if sessions.is_empty() {
        println!("No study sessions recorded.");
        return;
    }

    for (deck_name, session) in sessions {
        println!(
            "{}  {}  {}",
            format_time_ago(session.ended.unwrap_or(session.started)).dimmed(),
            score(session.correct_answers, session.cards_studied),
            deck_name
        );
    }
}

pub(super) fn print_storage_info(info: &StorageInfo, data_dir: &str) {
    println!("{:<12}{}", "Location", data_dir);
    println!("{:<12}{}", "Version", info.version);
    println!("{:<12}{}", "Decks", info.deck_count);
    println!("{:<12}{}", "Flashcards", info.flashcard_count);
    println!("{:<12}{}", "Sessions", info.session_count);
    println!("{:<12}{} bytes", "Used", info.storage_used);
}

pub(super) fn score(correct: u32, studied: u32) -> String {
    if studied == 0 {
        return "0/0".to_string();
    }
    let percent = (f64::from(correct) / f64::from(studied) * 100.0).round();
    format!("{}/{} ({}%)", correct, studied, percent)
}

fn card_label(count: usize) -> String {
    match count {
        1 => "1 card".to_string(),
        n => format!("{} cards", n),
    }
}

fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect()
}

fn split_at_name<'a>(display: &'a str, name: &str) -> (&'a str, &'a str) {
    if display.len() > name.len() && display.starts_with(name) {
        display.split_at(name.len())
    } else {
        (display, "")
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_strings() {
        assert_eq!(truncate_to_width("hola", 10), "hola");
        assert_eq!(truncate_to_width("hola", 4), "hola");
    }

    #[test]
    fn test_truncate_marks_cut() {
        assert_eq!(truncate_to_width("hello world", 6), "hello…");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        // Each CJK char is two columns wide.
        assert_eq!(truncate_to_width("日本語テキスト", 7), "日本語…");
    }

    #[test]
    fn test_score() {
        assert_eq!(score(8, 10), "8/10 (80%)");
        assert_eq!(score(2, 3), "2/3 (67%)");
        assert_eq!(score(0, 0), "0/0");
    }

    #[test]
    fn test_card_label() {
        assert_eq!(card_label(0), "0 cards");
        assert_eq!(card_label(1), "1 card");
        assert_eq!(card_label(12), "12 cards");
    }

    #[test]
    fn test_split_at_name() {
        assert_eq!(split_at_name("Spanish verbs", "Spanish"), ("Spanish", " verbs"));
        assert_eq!(split_at_name("Spani…", "Spanish"), ("Spani…", ""));
    }
}
