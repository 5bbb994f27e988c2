//! # pazaak-ai: Computer Opponents for Pazaak
//!
//! Plays whole turns for a computer-controlled seat through the engine's public
//! entry points only. An opponent never touches engine internals; anything the
//! engine rejects is logged and skipped.
//!
//! ## Core Components
//!
//! - [`AIOpponent`] - Trait every computer opponent implements
//! - [`baseline`] - Heuristic opponent: recover from busts, chase 20, stand by odds
//! - [`pacing`] - Pauses between turn stages, collapsible for tests
//! - [`create_ai`] - Factory for opponents by name
//!
//! ## Quick Start
//!
//! ```rust
//! use pazaak_ai::{create_ai, pacing::NoPacing};
//! use pazaak_engine::engine::Engine;
//! use pazaak_engine::game::{MatchSetup, Seat};
//! use pazaak_engine::side_deck::SideDeck;
//!
//! let mut ai = create_ai("baseline", Some(42), Box::new(NoPacing)).expect("known opponent");
//!
//! let mut engine = Engine::new(Some(42));
//! engine.start_match(MatchSetup::new(SideDeck::default_deck()).first(Seat::Opponent));
//!
//! let report = ai.take_turn(&mut engine, Seat::Opponent);
//! assert!(!report.actions.is_empty());
//! ```
//!
//! ## AI Types
//!
//! Currently supported AI types:
//! - `"baseline"` - The heuristic opponent

use pazaak_engine::cards::Card;
use pazaak_engine::engine::Engine;
use pazaak_engine::game::Seat;

pub mod baseline;
pub mod pacing;

use pacing::Pacer;

/// Names accepted by [`create_ai`].
pub const AI_TYPES: &[&str] = &["baseline"];

/// One step a computer opponent took during its turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnAction {
    Drew(Card),
    PlayedSideCard(Card),
    Stood,
    EndedTurn,
}

/// Everything an opponent did in one call to [`AIOpponent::take_turn`], in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TurnReport {
    pub actions: Vec<TurnAction>,
}

impl TurnReport {
    pub fn push(&mut self, action: TurnAction) {
        self.actions.push(action);
    }

    pub fn side_cards_played(&self) -> impl Iterator<Item = &Card> {
        self.actions.iter().filter_map(|a| match a {
            TurnAction::PlayedSideCard(card) => Some(card),
            _ => None,
        })
    }
}

/// Trait defining the interface for computer opponents.
///
/// # Example Implementation
///
/// ```rust
/// use pazaak_ai::{AIOpponent, TurnAction, TurnReport};
/// use pazaak_engine::engine::Engine;
/// use pazaak_engine::game::Seat;
///
/// struct AlwaysStand;
///
/// impl AIOpponent for AlwaysStand {
///     fn take_turn(&mut self, engine: &mut Engine, seat: Seat) -> TurnReport {
///         let mut report = TurnReport::default();
///         if engine.stand(seat).is_ok() {
///             report.push(TurnAction::Stood);
///         }
///         report
///     }
///
///     fn name(&self) -> &str {
///         "AlwaysStand"
///     }
/// }
/// ```
pub trait AIOpponent: Send + Sync {
    /// Plays one turn for `seat`.
    ///
    /// Returns an empty report when it is not `seat`'s turn. The turn may leave
    /// the engine on the same seat (free continuation), so drivers call this
    /// again while [`Engine::turn`] still names the seat.
    fn take_turn(&mut self, engine: &mut Engine, seat: Seat) -> TurnReport;

    fn name(&self) -> &str;
}

/// Creates an opponent by type name.
///
/// `seed` fixes the opponent's own random choices; `None` seeds from the OS.
/// Returns `None` for unknown names.
///
/// # Example
///
/// ```rust
/// use pazaak_ai::create_ai;
/// use pazaak_ai::pacing::NoPacing;
///
/// let ai = create_ai("baseline", None, Box::new(NoPacing)).unwrap();
/// assert_eq!(ai.name(), "BaselineAI");
/// assert!(create_ai("grandmaster", None, Box::new(NoPacing)).is_none());
/// ```
pub fn create_ai(
    ai_type: &str,
    seed: Option<u64>,
    pacer: Box<dyn Pacer>,
) -> Option<Box<dyn AIOpponent>> {
    match ai_type {
        "baseline" => {
            let ai = match seed {
                Some(seed) => baseline::BaselineAI::seeded(seed),
                None => baseline::BaselineAI::new(),
            };
            Some(Box::new(ai.with_pacer(pacer)))
        }
        _ => None,
    }
}
