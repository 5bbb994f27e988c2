use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cards::Card;
use crate::deck::DrawPile;
use crate::side_deck::SideDeck;

/// One of the two seats at the table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    /// The human seat
    Player,
    /// The computer seat
    Opponent,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::Player => Seat::Opponent,
            Seat::Opponent => Seat::Player,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Seat::Player => 0,
            Seat::Opponent => 1,
        }
    }

    /// Whether the engine deals this seat its turn card when the turn is
    /// handed over. The computer seat draws for itself through `Engine::draw`.
    pub fn draws_on_handoff(self) -> bool {
        matches!(self, Seat::Player)
    }

    /// Whether a bust leaves this seat on turn to play a corrective side card.
    /// A busted human seat loses the round at once.
    pub fn recovers_from_bust(self) -> bool {
        matches!(self, Seat::Opponent)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Seat::Player => "player",
            Seat::Opponent => "opponent",
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Match-level state tag.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No match started yet
    Waiting,
    PlayerTurn,
    OpponentTurn,
    /// A round finished; waiting for `next_round`
    RoundOver,
    /// One side reached the winning round count
    MatchOver,
}

impl Phase {
    pub fn turn_of(seat: Seat) -> Phase {
        match seat {
            Seat::Player => Phase::PlayerTurn,
            Seat::Opponent => Phase::OpponentTurn,
        }
    }

    /// Seat whose turn it is, if a turn is in progress.
    pub fn active_seat(self) -> Option<Seat> {
        match self {
            Phase::PlayerTurn => Some(Seat::Player),
            Phase::OpponentTurn => Some(Seat::Opponent),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Waiting => "waiting",
            Phase::PlayerTurn => "player turn",
            Phase::OpponentTurn => "opponent turn",
            Phase::RoundOver => "round over",
            Phase::MatchOver => "match over",
        };
        f.write_str(s)
    }
}

/// A ± side card selected but not yet applied, waiting for its sign.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PendingSign {
    pub seat: Seat,
    pub card: Card,
}

/// Everything needed to start a match.
///
/// Only the player's deck is required; the rest is randomized by the engine
/// unless set explicitly.
#[derive(Debug)]
pub struct MatchSetup {
    pub(crate) player_deck: SideDeck,
    pub(crate) opponent_deck: Option<SideDeck>,
    pub(crate) first: Option<Seat>,
    pub(crate) draw_pile: Option<DrawPile>,
}

impl MatchSetup {
    pub fn new(player_deck: SideDeck) -> Self {
        Self {
            player_deck,
            opponent_deck: None,
            first: None,
            draw_pile: None,
        }
    }

    pub fn opponent_deck(mut self, deck: SideDeck) -> Self {
        self.opponent_deck = Some(deck);
        self
    }

    /// Seat that opens round 1. Later rounds alternate.
    pub fn first(mut self, seat: Seat) -> Self {
        self.first = Some(seat);
        self
    }

    pub fn draw_pile(mut self, pile: DrawPile) -> Self {
        self.draw_pile = Some(pile);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seats_alternate() {
        assert_eq!(Seat::Player.other(), Seat::Opponent);
        assert_eq!(Seat::Opponent.other().other(), Seat::Opponent);
        assert_ne!(Seat::Player.index(), Seat::Opponent.index());
    }

    #[test]
    fn phase_maps_to_active_seat() {
        for seat in [Seat::Player, Seat::Opponent] {
            assert_eq!(Phase::turn_of(seat).active_seat(), Some(seat));
        }
        assert_eq!(Phase::RoundOver.active_seat(), None);
        assert_eq!(Phase::Waiting.active_seat(), None);
    }

    #[test]
    fn only_the_human_seat_is_dealt_on_handoff() {
        assert!(Seat::Player.draws_on_handoff());
        assert!(!Seat::Opponent.draws_on_handoff());
    }

    #[test]
    fn only_the_computer_seat_recovers_from_busts() {
        assert!(Seat::Opponent.recovers_from_bust());
        assert!(!Seat::Player.recovers_from_bust());
    }
}
