use thiserror::Error;

use crate::cards::CardId;
use crate::game::{Phase, Seat};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("It's not {actual}'s turn (expected {expected})")]
    NotYourTurn { expected: Seat, actual: Seat },
    #[error("No turn can be taken while the game is {phase}")]
    NotActionable { phase: Phase },
    #[error("A ± card is waiting for a sign")]
    SignPending,
    #[error("No ± card is waiting for a sign")]
    NoPendingSign,
    #[error("{0} already drew this turn")]
    AlreadyDrawn(Seat),
    #[error("{0} must draw before ending the turn")]
    MustDraw(Seat),
    #[error("{0} cannot take more cards this round")]
    SeatDone(Seat),
    #[error("{0} cannot play a side card now")]
    SideCardUnavailable(Seat),
    #[error("Side card {0} not found or already used")]
    CardNotFound(CardId),
    #[error("Round is not over")]
    RoundNotOver,
}

/// Problems found while validating a side deck.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("Side deck must hold exactly {expected} cards, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("Main cards cannot be placed in a side deck")]
    MainCardInSideDeck,
    #[error("Side card value {value} out of range 1..={max}")]
    ValueOutOfRange { value: u8, max: u8 },
    #[error("Unrecognized side card '{0}'")]
    Unparseable(String),
    #[error("Malformed side deck data: {0}")]
    Malformed(String),
}
