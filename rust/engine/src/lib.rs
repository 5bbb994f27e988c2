//! # pazaak-engine: Pazaak Game Engine Core
//!
//! Rules and state machine for a best-of-five Pazaak match between a human
//! seat and a computer seat. Scores and flags are always recomputed from the
//! played cards, and every random choice flows through a seeded RNG so a match
//! can be replayed from its seed.
//!
//! ## Core Modules
//!
//! - [`cards`] - Main and side cards, signs, text and JSON forms
//! - [`deck`] - The shared 40-card draw pile, refilled when empty
//! - [`side_deck`] - Four-card side decks: validation, generation, persistence format
//! - [`player`] - One seat's board, flags and round wins
//! - [`rules`] - Scoring, round winner and bust recovery checks
//! - [`game`] - Seats, phases and match setup
//! - [`engine`] - Turn and round orchestration with observer notifications
//! - [`snapshot`] - Read-only views handed to observers
//! - [`logger`] - JSONL round records
//! - [`errors`] - Error types for game operations and deck data
//!
//! ## Quick Start
//!
//! ```rust
//! use pazaak_engine::engine::Engine;
//! use pazaak_engine::game::{MatchSetup, Seat};
//! use pazaak_engine::side_deck::SideDeck;
//!
//! let mut engine = Engine::new(Some(42));
//! engine.start_match(MatchSetup::new(SideDeck::default_deck()).first(Seat::Opponent));
//!
//! // The computer seat draws for itself
//! let card = engine.draw(Seat::Opponent).unwrap();
//! assert!(card.value >= 1 && card.value <= 10);
//! assert_eq!(engine.player(Seat::Opponent).played().len(), 2);
//!
//! // One draw per turn
//! assert!(engine.draw(Seat::Opponent).is_err());
//! ```
//!
//! ## Side Decks
//!
//! Side decks are stored as a JSON array of four `{kind, value}` objects:
//!
//! ```rust
//! use pazaak_engine::side_deck::parse_side_deck;
//!
//! let deck = parse_side_deck(
//!     r#"[{"kind":"plus","value":3},{"kind":"minus","value":2},
//!         {"kind":"plusminus","value":1},{"type":"plus","value":6}]"#,
//! )
//! .unwrap();
//! assert_eq!(deck.cards().len(), 4);
//! ```

pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod logger;
pub mod player;
pub mod rules;
pub mod side_deck;
pub mod snapshot;
