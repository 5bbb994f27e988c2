use crate::cards::{Card, CardId, Sign};
use crate::errors::GameError;
use crate::game::Seat;
use crate::rules::{self, FinalHand, BOARD_CAP};
use crate::side_deck::SideDeck;

/// One seat's board, side deck and match record.
///
/// `score`, `busted` and the automatic part of `standing` are derived from the
/// played cards after every addition, never patched incrementally.
#[derive(Debug, Clone)]
pub struct Player {
    seat: Seat,
    side_deck: SideDeck,
    played: Vec<Card>,
    score: i32,
    standing: bool,
    busted: bool,
    rounds_won: u8,
}

impl Player {
    pub fn new(seat: Seat, side_deck: SideDeck) -> Self {
        Self {
            seat,
            side_deck,
            played: Vec::with_capacity(BOARD_CAP),
            score: 0,
            standing: false,
            busted: false,
            rounds_won: 0,
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }
    pub fn side_deck(&self) -> &SideDeck {
        &self.side_deck
    }
    pub fn played(&self) -> &[Card] {
        &self.played
    }
    pub fn score(&self) -> i32 {
        self.score
    }
    pub fn is_standing(&self) -> bool {
        self.standing
    }
    pub fn is_busted(&self) -> bool {
        self.busted
    }
    pub fn rounds_won(&self) -> u8 {
        self.rounds_won
    }

    pub fn has_filled_board(&self) -> bool {
        self.played.len() >= BOARD_CAP
    }

    /// Standing, busted or out of board space.
    pub fn is_done(&self) -> bool {
        self.standing || self.busted || self.has_filled_board()
    }

    pub fn can_draw(&self) -> bool {
        !self.is_done()
    }

    /// Only a seat that recovers from busts may play a side card while busted.
    pub fn can_play_side_card(&self) -> bool {
        !self.standing
            && !self.has_filled_board()
            && (!self.busted || self.seat.recovers_from_bust())
            && self.side_deck.has_available()
    }

    /// True while busted with a side card that could still fix it.
    pub fn can_recover(&self) -> bool {
        self.busted
            && self.seat.recovers_from_bust()
            && !self.has_filled_board()
            && rules::can_recover(self.score, self.side_deck.available())
    }

    /// Places a card from the draw pile on the board.
    pub fn take_draw(&mut self, card: Card) -> Result<(), GameError> {
        if !self.can_draw() {
            return Err(GameError::SeatDone(self.seat));
        }
        self.add_card(card);
        Ok(())
    }

    /// Plays a side card from this player's deck onto the board.
    pub fn play_side_card(&mut self, id: CardId, sign: Option<Sign>) -> Result<Card, GameError> {
        if !self.can_play_side_card() {
            return Err(GameError::SideCardUnavailable(self.seat));
        }
        let card = self.side_deck.use_card(id, sign)?;
        self.add_card(card.clone());
        Ok(card)
    }

    /// Appends a card and re-derives the score flags. Callers check board room.
    pub fn add_card(&mut self, card: Card) {
        self.played.push(card);
        self.recompute();
    }

    fn recompute(&mut self) {
        let eval = rules::evaluate(&self.played);
        self.score = eval.score;
        self.busted = eval.busted;
        if eval.at_target {
            self.standing = true;
        }
    }

    pub fn stand(&mut self) {
        self.standing = true;
    }

    pub fn final_hand(&self) -> FinalHand {
        FinalHand {
            score: self.score,
            busted: self.busted,
        }
    }

    pub(crate) fn win_round(&mut self) {
        self.rounds_won = self.rounds_won.saturating_add(1);
    }

    /// Clears the board and flags and makes every side card playable again.
    pub fn reset_round(&mut self) {
        self.played.clear();
        self.score = 0;
        self.standing = false;
        self.busted = false;
        self.side_deck.reset();
    }

    /// Starts a new match with a (possibly different) side deck.
    pub fn reset_match(&mut self, side_deck: SideDeck) {
        self.side_deck = side_deck;
        self.rounds_won = 0;
        self.reset_round();
    }
}
