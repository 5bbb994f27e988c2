//! The four personal cards each player brings to a match.
//!
//! Player decks are loaded from persisted `{kind, value}` lists; the computer
//! opponent gets a randomly generated deck that can always both add and
//! subtract.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{side_card_catalog, Card, CardId, CardKind, CardSpec, Sign};
use crate::errors::{DeckError, GameError};

pub const SIDE_DECK_SIZE: usize = 4;

/// Chance that an open slot of a generated deck is filled with a ± card.
const PLUS_OR_MINUS_FILL_CHANCE: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideDeck {
    cards: [Card; SIDE_DECK_SIZE],
}

impl SideDeck {
    pub fn from_specs(specs: &[CardSpec]) -> Result<Self, DeckError> {
        if specs.len() != SIDE_DECK_SIZE {
            return Err(DeckError::WrongLength {
                expected: SIDE_DECK_SIZE,
                actual: specs.len(),
            });
        }
        for spec in specs {
            spec.validate()?;
        }
        let cards: Vec<Card> = specs.iter().map(|s| s.to_card()).collect();
        let cards: [Card; SIDE_DECK_SIZE] =
            cards.try_into().map_err(|v: Vec<Card>| DeckError::WrongLength {
                expected: SIDE_DECK_SIZE,
                actual: v.len(),
            })?;
        Ok(Self { cards })
    }

    /// `+3, +4, -2, ±3`
    pub fn default_deck() -> Self {
        Self {
            cards: [
                Card::side(CardKind::Plus, 3),
                Card::side(CardKind::Plus, 4),
                Card::side(CardKind::Minus, 2),
                Card::side(CardKind::PlusOrMinus, 3),
            ],
        }
    }

    /// Builds a random opponent deck: one or two plus cards, one or two minus
    /// cards, the rest mostly ± cards. No catalogue card is picked twice.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let catalog = side_card_catalog();
        let mut by_kind = |kind: CardKind| {
            let mut v: Vec<CardSpec> = catalog.iter().copied().filter(|c| c.kind == kind).collect();
            v.shuffle(&mut *rng);
            v
        };
        let mut plus = by_kind(CardKind::Plus);
        let mut minus = by_kind(CardKind::Minus);
        let mut plus_or_minus = by_kind(CardKind::PlusOrMinus);

        let mut picked: Vec<CardSpec> = Vec::with_capacity(SIDE_DECK_SIZE);
        let n_plus = rng.random_range(1..=2);
        let n_minus = rng.random_range(1..=2);
        picked.extend(plus.drain(..n_plus));
        picked.extend(minus.drain(..n_minus));

        let mut leftovers: Vec<CardSpec> = plus.into_iter().chain(minus).collect();
        while picked.len() < SIDE_DECK_SIZE {
            if !plus_or_minus.is_empty() && rng.random_bool(PLUS_OR_MINUS_FILL_CHANCE) {
                let i = rng.random_range(0..plus_or_minus.len());
                picked.push(plus_or_minus.swap_remove(i));
                continue;
            }
            let total = leftovers.len() + plus_or_minus.len();
            let i = rng.random_range(0..total);
            if i < leftovers.len() {
                picked.push(leftovers.swap_remove(i));
            } else {
                picked.push(plus_or_minus.swap_remove(i - leftovers.len()));
            }
        }

        let cards: Vec<Card> = picked.into_iter().map(CardSpec::to_card).collect();
        match cards.try_into() {
            Ok(cards) => Self { cards },
            Err(_) => Self::default_deck(),
        }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn specs(&self) -> Vec<CardSpec> {
        self.cards.iter().map(Card::spec).collect()
    }

    pub fn available(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| !c.used)
    }

    pub fn has_available(&self) -> bool {
        self.cards.iter().any(|c| !c.used)
    }

    pub fn find_available(&self, id: CardId) -> Option<&Card> {
        self.available().find(|c| c.id == id)
    }

    /// Marks an unused card as used and returns the played copy.
    ///
    /// The sign is kept only for ± cards; other kinds ignore it.
    pub fn use_card(&mut self, id: CardId, sign: Option<Sign>) -> Result<Card, GameError> {
        let card = self
            .cards
            .iter_mut()
            .find(|c| c.id == id && !c.used)
            .ok_or(GameError::CardNotFound(id))?;
        card.used = true;
        let mut played = card.clone();
        played.sign = match played.kind {
            CardKind::PlusOrMinus => sign,
            _ => None,
        };
        Ok(played)
    }

    /// Makes every card playable again. Called at the start of each round.
    pub fn reset(&mut self) {
        for c in &mut self.cards {
            c.used = false;
        }
    }
}

impl Default for SideDeck {
    fn default() -> Self {
        Self::default_deck()
    }
}

/// Parses a persisted side deck (a JSON array of four `{kind, value}` objects).
pub fn parse_side_deck(json: &str) -> Result<SideDeck, DeckError> {
    let specs: Vec<CardSpec> =
        serde_json::from_str(json).map_err(|e| DeckError::Malformed(e.to_string()))?;
    SideDeck::from_specs(&specs)
}

/// Serializes a deck into the persisted format.
pub fn to_json(deck: &SideDeck) -> String {
    // CardSpec serializes infallibly
    serde_json::to_string(&deck.specs()).unwrap_or_else(|_| "[]".to_string())
}

/// Loads a stored deck, substituting the default deck for missing or invalid data.
pub fn load_or_default(raw: Option<&str>) -> SideDeck {
    let Some(raw) = raw else {
        return SideDeck::default_deck();
    };
    match parse_side_deck(raw) {
        Ok(deck) => deck,
        Err(e) => {
            tracing::warn!(error = %e, "stored side deck rejected, using default deck");
            SideDeck::default_deck()
        }
    }
}
