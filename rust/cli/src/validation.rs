//! Input parsing and validation for interactive commands.
//!
//! Turns a line typed at the `play` prompt into a [`TurnCommand`], and checks
//! the arguments of `deck set` and `--matches`.

use pazaak_engine::cards::{CardSpec, Sign};
use pazaak_engine::errors::DeckError;
use pazaak_engine::side_deck::SIDE_DECK_SIZE;

/// A command typed during a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnCommand {
    EndTurn,
    Stand,
    /// Play the side card in this 1-based slot
    Play(usize),
    /// Sign for the pending ± card
    Sign(Sign),
    /// Start the next round once the current one is over
    Next,
    Help,
}

/// Result of parsing one line of user input.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Command(TurnCommand),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

/// Parse user input into a turn command.
///
/// Accepts (case-insensitive):
/// - "e" or "end" → end turn
/// - "s" or "stand" → stand
/// - "p N", "play N" or a bare "N" → play side card slot N (1-4)
/// - "+" or "-" → sign for a pending ± card
/// - "n" or "next" → next round
/// - "h" or "help"
/// - "q" or "quit"
///
/// # Example
///
/// ```rust
/// # use pazaak_cli::validation::{parse_turn_command, ParseResult, TurnCommand};
/// assert_eq!(parse_turn_command("stand"), ParseResult::Command(TurnCommand::Stand));
/// assert_eq!(parse_turn_command("p 2"), ParseResult::Command(TurnCommand::Play(2)));
/// assert_eq!(parse_turn_command("q"), ParseResult::Quit);
/// assert!(matches!(parse_turn_command("p 5"), ParseResult::Invalid(_)));
/// ```
pub fn parse_turn_command(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    if parts.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }

    match parts[0] {
        "q" | "quit" => ParseResult::Quit,
        "e" | "end" => ParseResult::Command(TurnCommand::EndTurn),
        "s" | "stand" => ParseResult::Command(TurnCommand::Stand),
        "n" | "next" => ParseResult::Command(TurnCommand::Next),
        "h" | "help" | "?" => ParseResult::Command(TurnCommand::Help),
        "+" => ParseResult::Command(TurnCommand::Sign(Sign::Plus)),
        "-" => ParseResult::Command(TurnCommand::Sign(Sign::Minus)),
        "p" | "play" => match parts.get(1) {
            Some(slot) => parse_slot(slot),
            None => ParseResult::Invalid(
                "Play requires a side card slot (e.g., 'p 2')".to_string(),
            ),
        },
        other if other.chars().all(|c| c.is_ascii_digit()) => parse_slot(other),
        other => ParseResult::Invalid(format!(
            "Unrecognized command '{}'. Valid commands: e, s, p <1-{}>, +, -, n, h, q",
            other, SIDE_DECK_SIZE
        )),
    }
}

fn parse_slot(raw: &str) -> ParseResult {
    match raw.parse::<usize>() {
        Ok(n) if (1..=SIDE_DECK_SIZE).contains(&n) => ParseResult::Command(TurnCommand::Play(n)),
        _ => ParseResult::Invalid(format!(
            "Side card slot must be between 1 and {}",
            SIDE_DECK_SIZE
        )),
    }
}

/// Validate the number of matches requested on the command line.
pub fn validate_matches(matches: u32) -> Result<(), String> {
    if matches == 0 {
        return Err("matches must be >= 1".into());
    }
    Ok(())
}

/// Parse the cards given to `deck set`; exactly four are required.
pub fn parse_deck_cards(raw: &[String]) -> Result<Vec<CardSpec>, DeckError> {
    if raw.len() != SIDE_DECK_SIZE {
        return Err(DeckError::WrongLength {
            expected: SIDE_DECK_SIZE,
            actual: raw.len(),
        });
    }
    raw.iter().map(|s| s.parse::<CardSpec>()).collect()
}
