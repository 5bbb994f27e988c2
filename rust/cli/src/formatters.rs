//! Card, board, and action formatters for terminal display.
//!
//! Pure functions turning engine values into the text the `play` and `sim`
//! commands print. The ± sign falls back to `+-` on terminals that cannot
//! render it.
//!
//! ## Example
//!
//! ```rust
//! use pazaak_engine::cards::{Card, CardKind};
//! use pazaak_cli::formatters::{format_card, format_board};
//!
//! let pm = Card::side(CardKind::PlusOrMinus, 3);
//! assert!(format_card(&pm) == "±3" || format_card(&pm) == "+-3");
//!
//! let board = vec![Card::main(7), Card::side(CardKind::Minus, 2)];
//! assert_eq!(format_board(&board), "[7 -2]");
//! ```

use pazaak_ai::TurnAction;
use pazaak_engine::cards::{Card, CardKind, CardSpec};
use pazaak_engine::game::Seat;
use pazaak_engine::rules::RoundOutcome;
use pazaak_engine::snapshot::SeatView;

/// Check if the terminal can render the ± sign.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

fn plus_minus() -> &'static str {
    if supports_unicode() { "±" } else { "+-" }
}

/// Format a deck entry such as `+3` or `±4`.
pub fn format_spec(spec: &CardSpec) -> String {
    match spec.kind {
        CardKind::PlusOrMinus => format!("{}{}", plus_minus(), spec.value),
        _ => spec.to_string(),
    }
}

/// Format a card as it appears on a board or in a hand.
///
/// A ± card that has been given a sign prints with that sign.
pub fn format_card(card: &Card) -> String {
    match (card.kind, card.sign) {
        (CardKind::PlusOrMinus, None) => format_spec(&card.spec()),
        _ => card.to_string(),
    }
}

/// Format a board (played cards) in bracket notation, `[]` if empty.
pub fn format_board(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Format side card slots as `1:+3 2:-- 3:-2 4:±3`.
///
/// Used cards print as `--`. With `hidden` set, unused cards print face
/// down as `[?]`.
pub fn format_side_cards(cards: &[Card], hidden: bool) -> String {
    cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let face = if card.used {
                "--".to_string()
            } else if hidden {
                "[?]".to_string()
            } else {
                format_card(card)
            };
            format!("{}:{}", i + 1, face)
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn seat_label(seat: Seat) -> &'static str {
    match seat {
        Seat::Player => "You",
        Seat::Opponent => "Opponent",
    }
}

/// Three-line summary of one seat: score line, board, side cards.
pub fn format_seat(seat: Seat, view: &SeatView, hidden: bool) -> String {
    let mut status = String::new();
    if view.busted {
        status.push_str("  BUST");
    } else if view.standing {
        status.push_str("  standing");
    }
    format!(
        "{:<8} score {:>2}  rounds {}{}\n  board {}\n  side  {}",
        seat_label(seat),
        view.score,
        view.rounds_won,
        status,
        format_board(&view.played),
        format_side_cards(&view.side_cards, hidden)
    )
}

pub fn format_outcome(outcome: RoundOutcome) -> String {
    match outcome {
        RoundOutcome::Win(Seat::Player) => "You win the round".to_string(),
        RoundOutcome::Win(Seat::Opponent) => "Opponent wins the round".to_string(),
        RoundOutcome::Tie => "Round tied".to_string(),
    }
}

/// Format one computer action, e.g. `plays -2`.
pub fn format_action(action: &TurnAction) -> String {
    match action {
        TurnAction::Drew(card) => format!("draws {}", format_card(card)),
        TurnAction::PlayedSideCard(card) => format!("plays {}", format_card(card)),
        TurnAction::Stood => "stands".to_string(),
        TurnAction::EndedTurn => "ends turn".to_string(),
    }
}
