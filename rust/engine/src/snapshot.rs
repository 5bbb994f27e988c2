use serde::Serialize;

use crate::cards::Card;
use crate::game::{Phase, Seat};
use crate::player::Player;
use crate::rules::RoundOutcome;

/// Read-only view of one seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub score: i32,
    pub played: Vec<Card>,
    /// All four side cards, with their `used` flags
    pub side_cards: Vec<Card>,
    pub standing: bool,
    pub busted: bool,
    pub rounds_won: u8,
    pub can_play_side_card: bool,
}

impl SeatView {
    pub(crate) fn of(player: &Player) -> Self {
        Self {
            score: player.score(),
            played: player.played().to_vec(),
            side_cards: player.side_deck().cards().to_vec(),
            standing: player.is_standing(),
            busted: player.is_busted(),
            rounds_won: player.rounds_won(),
            can_play_side_card: player.can_play_side_card(),
        }
    }

    pub fn available_side_cards(&self) -> impl Iterator<Item = &Card> {
        self.side_cards.iter().filter(|c| !c.used)
    }

    /// Standing or busted; the seat takes no further turns this round.
    pub fn is_terminal(&self) -> bool {
        self.standing || self.busted
    }
}

/// Engine state handed to observers after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub turn: Option<Seat>,
    pub round: u32,
    pub first: Seat,
    pub player: SeatView,
    pub opponent: SeatView,
    /// ± card waiting for a sign, if any
    pub pending: Option<Card>,
    pub last_outcome: Option<RoundOutcome>,
    pub match_winner: Option<Seat>,
    pub draw_pile_remaining: usize,
}

impl Snapshot {
    pub fn seat(&self, seat: Seat) -> &SeatView {
        match seat {
            Seat::Player => &self.player,
            Seat::Opponent => &self.opponent,
        }
    }

    pub fn is_turn_of(&self, seat: Seat) -> bool {
        self.turn == Some(seat)
    }
}
