use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::errors::DeckError;

/// Highest face value printed on a side card.
pub const SIDE_CARD_MAX: u8 = 6;
/// Highest face value printed on a draw-pile card.
pub const MAIN_CARD_MAX: u8 = 10;

/// The four kinds of Pazaak card.
/// Main cards come from the shared draw pile, the other three only exist in side decks.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    /// Draw-pile card, adds its face value
    Main,
    /// Side card that adds its value
    Plus,
    /// Side card that subtracts its value
    Minus,
    /// Side card whose sign is picked when it is played
    #[serde(rename = "plusminus", alias = "plus_or_minus")]
    PlusOrMinus,
}

impl CardKind {
    pub fn is_side(self) -> bool {
        !matches!(self, CardKind::Main)
    }

    /// True if the card can lower a score when played.
    pub fn can_subtract(self) -> bool {
        matches!(self, CardKind::Minus | CardKind::PlusOrMinus)
    }
}

/// Sign picked for a [`CardKind::PlusOrMinus`] card at play time.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    pub fn as_str(self) -> &'static str {
        match self {
            Sign::Plus => "plus",
            Sign::Minus => "minus",
        }
    }
}

static NEXT_CARD_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique card identity.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(u64);

impl CardId {
    pub fn fresh() -> Self {
        CardId(NEXT_CARD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single card on a board, in a side deck or in the draw pile.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique identity, used to address side cards
    pub id: CardId,
    /// Face value
    pub value: u8,
    pub kind: CardKind,
    /// Set once a side card has been played this round
    #[serde(default)]
    pub used: bool,
    /// Sign chosen at play time (PlusOrMinus only)
    #[serde(default)]
    pub sign: Option<Sign>,
}

impl Card {
    pub fn main(value: u8) -> Self {
        Self::new(CardKind::Main, value)
    }

    pub fn side(kind: CardKind, value: u8) -> Self {
        Self::new(kind, value)
    }

    fn new(kind: CardKind, value: u8) -> Self {
        Self {
            id: CardId::fresh(),
            value,
            kind,
            used: false,
            sign: None,
        }
    }

    /// Contribution of this card to a score.
    ///
    /// A PlusOrMinus card counts as positive unless a minus sign was chosen.
    pub fn effective_value(&self) -> i32 {
        let v = i32::from(self.value);
        match self.kind {
            CardKind::Main | CardKind::Plus => v,
            CardKind::Minus => -v,
            CardKind::PlusOrMinus => match self.sign {
                Some(Sign::Minus) => -v,
                _ => v,
            },
        }
    }

    pub fn spec(&self) -> CardSpec {
        CardSpec {
            kind: self.kind,
            value: self.value,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.sign) {
            (CardKind::PlusOrMinus, Some(Sign::Plus)) => write!(f, "+{}", self.value),
            (CardKind::PlusOrMinus, Some(Sign::Minus)) => write!(f, "-{}", self.value),
            _ => write!(f, "{}", self.spec()),
        }
    }
}

/// Persisted description of a side card: `{"kind": "plus", "value": 3}`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct CardSpec {
    #[serde(alias = "type")]
    pub kind: CardKind,
    pub value: u8,
}

impl CardSpec {
    pub fn new(kind: CardKind, value: u8) -> Self {
        Self { kind, value }
    }

    /// Checks that the spec describes a legal side card.
    pub fn validate(&self) -> Result<(), DeckError> {
        if !self.kind.is_side() {
            return Err(DeckError::MainCardInSideDeck);
        }
        if self.value == 0 || self.value > SIDE_CARD_MAX {
            return Err(DeckError::ValueOutOfRange {
                value: self.value,
                max: SIDE_CARD_MAX,
            });
        }
        Ok(())
    }

    pub fn to_card(self) -> Card {
        Card::side(self.kind, self.value)
    }
}

impl fmt::Display for CardSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CardKind::Main => write!(f, "{}", self.value),
            CardKind::Plus => write!(f, "+{}", self.value),
            CardKind::Minus => write!(f, "-{}", self.value),
            CardKind::PlusOrMinus => write!(f, "±{}", self.value),
        }
    }
}

impl FromStr for CardSpec {
    type Err = DeckError;

    /// Parses `+3`, `-2`, `±4`, `+-4` or `*4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let unparseable = || DeckError::Unparseable(s.to_string());
        let (kind, digits) = if let Some(rest) = s.strip_prefix("+-") {
            (CardKind::PlusOrMinus, rest)
        } else if let Some(rest) = s.strip_prefix('±') {
            (CardKind::PlusOrMinus, rest)
        } else if let Some(rest) = s.strip_prefix('*') {
            (CardKind::PlusOrMinus, rest)
        } else if let Some(rest) = s.strip_prefix('+') {
            (CardKind::Plus, rest)
        } else if let Some(rest) = s.strip_prefix('-') {
            (CardKind::Minus, rest)
        } else {
            return Err(unparseable());
        };
        let value: u8 = digits.parse().map_err(|_| unparseable())?;
        let spec = CardSpec { kind, value };
        spec.validate()?;
        Ok(spec)
    }
}

/// Every side card a deck can be built from: +1..+6, -1..-6, ±1..±6.
pub fn side_card_catalog() -> Vec<CardSpec> {
    let mut v = Vec::with_capacity(18);
    for kind in [CardKind::Plus, CardKind::Minus, CardKind::PlusOrMinus] {
        for value in 1..=SIDE_CARD_MAX {
            v.push(CardSpec { kind, value });
        }
    }
    v
}

/// Face values of a full draw pile: four copies of 1 through 10.
pub fn main_deck_values() -> Vec<u8> {
    let mut v = Vec::with_capacity(40);
    for value in 1..=MAIN_CARD_MAX {
        for _ in 0..4 {
            v.push(value);
        }
    }
    v
}
