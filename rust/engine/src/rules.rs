use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::cards::Card;
use crate::game::Seat;

/// Score that auto-stands a player; anything above busts.
pub const TARGET_SCORE: i32 = 20;
/// Most cards a board can hold in one round.
pub const BOARD_CAP: usize = 9;
/// Round wins needed to take the match.
pub const ROUNDS_TO_WIN: u8 = 3;

/// Flags derived from a sequence of played cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub score: i32,
    pub busted: bool,
    pub at_target: bool,
}

/// Recomputes score and flags from scratch over the played cards.
///
/// # Examples
///
/// ```
/// use pazaak_engine::cards::{Card, CardKind};
/// use pazaak_engine::rules::evaluate;
///
/// let cards = [Card::main(10), Card::main(8), Card::side(CardKind::Plus, 2)];
/// let eval = evaluate(&cards);
/// assert_eq!(eval.score, 20);
/// assert!(eval.at_target);
/// assert!(!eval.busted);
/// ```
pub fn evaluate(cards: &[Card]) -> Evaluation {
    let score: i32 = cards.iter().map(Card::effective_value).sum();
    Evaluation {
        score,
        busted: score > TARGET_SCORE,
        at_target: score == TARGET_SCORE,
    }
}

/// The part of a seat's round that decides the winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalHand {
    pub score: i32,
    pub busted: bool,
}

impl FinalHand {
    /// Score used for comparison: a bust counts as 0.
    pub fn comparable_score(&self) -> i32 {
        if self.busted {
            0
        } else {
            self.score
        }
    }
}

/// Result of a finished round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "result", content = "winner")]
pub enum RoundOutcome {
    Win(Seat),
    Tie,
}

impl RoundOutcome {
    pub fn winner(self) -> Option<Seat> {
        match self {
            RoundOutcome::Win(seat) => Some(seat),
            RoundOutcome::Tie => None,
        }
    }
}

/// Orders two hands: `Greater` means `a` beats `b`.
///
/// Busted status decides first; only two live hands compare by score.
pub fn compare_hands(a: FinalHand, b: FinalHand) -> Ordering {
    match (a.busted, b.busted) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.comparable_score().cmp(&b.comparable_score()),
    }
}

/// Decides the round between the human seat and the computer seat.
pub fn round_outcome(player: FinalHand, opponent: FinalHand) -> RoundOutcome {
    match compare_hands(player, opponent) {
        Ordering::Greater => RoundOutcome::Win(Seat::Player),
        Ordering::Less => RoundOutcome::Win(Seat::Opponent),
        Ordering::Equal => RoundOutcome::Tie,
    }
}

/// True if some card in `available` can bring `score` back to 20 or less.
pub fn can_recover<'a>(score: i32, available: impl IntoIterator<Item = &'a Card>) -> bool {
    let excess = score - TARGET_SCORE;
    if excess <= 0 {
        return true;
    }
    available
        .into_iter()
        .any(|c| c.kind.can_subtract() && i32::from(c.value) >= excess)
}
