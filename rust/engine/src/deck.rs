use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{main_deck_values, Card};

/// The shared 40-card draw pile.
///
/// Cards are dealt from the back of `cards`. An empty pile refills itself with
/// a freshly shuffled set before the next draw, so [`DrawPile::draw`] never fails.
#[derive(Debug)]
pub struct DrawPile {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
    refills: u32,
}

impl DrawPile {
    pub fn new_with_seed(seed: u64) -> Self {
        let mut pile = Self {
            cards: Vec::with_capacity(40),
            rng: ChaCha20Rng::seed_from_u64(seed),
            refills: 0,
        };
        pile.fill();
        pile
    }

    /// A pile that deals `values` in the given order before falling back to
    /// seeded shuffles.
    pub fn with_order(seed: u64, values: &[u8]) -> Self {
        Self {
            cards: values.iter().rev().map(|&v| Card::main(v)).collect(),
            rng: ChaCha20Rng::seed_from_u64(seed),
            refills: 0,
        }
    }

    fn fill(&mut self) {
        self.cards = main_deck_values().into_iter().map(Card::main).collect();
        self.cards.shuffle(&mut self.rng);
    }

    pub fn draw(&mut self) -> Card {
        loop {
            if let Some(card) = self.cards.pop() {
                return card;
            }
            self.fill();
            self.refills += 1;
            tracing::debug!(refills = self.refills, "draw pile exhausted, reshuffled");
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Number of times the pile ran dry and was refilled.
    pub fn refills(&self) -> u32 {
        self.refills
    }
}
