use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::fmt;

use crate::cards::{Card, CardId, CardKind, Sign};
use crate::deck::DrawPile;
use crate::errors::GameError;
use crate::game::{MatchSetup, PendingSign, Phase, Seat};
use crate::player::Player;
use crate::rules::{self, RoundOutcome, ROUNDS_TO_WIN};
use crate::side_deck::SideDeck;
use crate::snapshot::{SeatView, Snapshot};

/// Callback invoked with a fresh snapshot after every state change.
pub type Observer = Box<dyn FnMut(&Snapshot)>;

/// What happened to a side card handed to [`Engine::play_side_card`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideCardPlay {
    /// The card is on the board
    Applied(Card),
    /// A ± card was selected without a sign; call [`Engine::choose_sign`]
    AwaitingSign(Card),
}

/// Round and match state machine for one human seat against one computer seat.
///
/// Every entry point checks the phase and whose turn it is first; a call made
/// at the wrong time returns a [`GameError`] and leaves the state untouched.
///
/// # Examples
///
/// ```
/// use pazaak_engine::engine::Engine;
/// use pazaak_engine::game::{MatchSetup, Phase, Seat};
/// use pazaak_engine::side_deck::SideDeck;
///
/// let mut engine = Engine::new(Some(7));
/// engine.start_match(MatchSetup::new(SideDeck::default_deck()).first(Seat::Player));
/// assert_eq!(engine.phase(), Phase::PlayerTurn);
///
/// // Acting out of turn is rejected
/// assert!(engine.end_turn(Seat::Opponent).is_err());
///
/// engine.stand(Seat::Player).unwrap();
/// assert_eq!(engine.phase(), Phase::OpponentTurn);
/// ```
pub struct Engine {
    seed: u64,
    rng: ChaCha20Rng,
    pile: DrawPile,
    players: [Player; 2],
    phase: Phase,
    round: u32,
    first: Seat,
    drawn_this_turn: bool,
    pending: Option<PendingSign>,
    last_outcome: Option<RoundOutcome>,
    observer: Option<Observer>,
}

impl Engine {
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        let pile = DrawPile::new_with_seed(rng.random());
        Self {
            seed,
            rng,
            pile,
            players: [
                Player::new(Seat::Player, SideDeck::default_deck()),
                Player::new(Seat::Opponent, SideDeck::default_deck()),
            ],
            phase: Phase::Waiting,
            round: 0,
            first: Seat::Player,
            drawn_this_turn: false,
            pending: None,
            last_outcome: None,
            observer: None,
        }
    }

    pub fn set_observer(&mut self, observer: Observer) {
        self.observer = Some(observer);
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn turn(&self) -> Option<Seat> {
        self.phase.active_seat()
    }
    pub fn round(&self) -> u32 {
        self.round
    }
    pub fn first(&self) -> Seat {
        self.first
    }
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }
    pub fn pending(&self) -> Option<&PendingSign> {
        self.pending.as_ref()
    }
    pub fn last_outcome(&self) -> Option<RoundOutcome> {
        self.last_outcome
    }
    /// Whether the active seat has already drawn this turn.
    pub fn has_drawn(&self) -> bool {
        self.drawn_this_turn
    }
    pub fn draw_pile(&self) -> &DrawPile {
        &self.pile
    }

    pub fn match_winner(&self) -> Option<Seat> {
        [Seat::Player, Seat::Opponent]
            .into_iter()
            .find(|s| self.players[s.index()].rounds_won() >= ROUNDS_TO_WIN)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            turn: self.turn(),
            round: self.round,
            first: self.first,
            player: SeatView::of(&self.players[Seat::Player.index()]),
            opponent: SeatView::of(&self.players[Seat::Opponent.index()]),
            pending: self.pending.as_ref().map(|p| p.card.clone()),
            last_outcome: self.last_outcome,
            match_winner: self.match_winner(),
            draw_pile_remaining: self.pile.remaining(),
        }
    }

    /// Starts a new match, discarding any match in progress.
    pub fn start_match(&mut self, setup: MatchSetup) {
        let MatchSetup {
            player_deck,
            opponent_deck,
            first,
            draw_pile,
        } = setup;
        let opponent_deck = opponent_deck.unwrap_or_else(|| SideDeck::generate(&mut self.rng));
        self.pile = draw_pile.unwrap_or_else(|| DrawPile::new_with_seed(self.rng.random()));
        self.players[Seat::Player.index()].reset_match(player_deck);
        self.players[Seat::Opponent.index()].reset_match(opponent_deck);
        self.first = first.unwrap_or_else(|| {
            if self.rng.random_bool(0.5) {
                Seat::Player
            } else {
                Seat::Opponent
            }
        });
        self.round = 1;
        tracing::info!(seed = self.seed, first = %self.first, "match started");
        self.begin_round();
    }

    /// Moves from `RoundOver` to the next round; the other seat opens it.
    pub fn next_round(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::RoundOver {
            return Err(GameError::RoundNotOver);
        }
        self.first = self.first.other();
        self.round += 1;
        self.begin_round();
        Ok(())
    }

    /// Draws the turn card for a seat that is not dealt one on hand-off.
    pub fn draw(&mut self, seat: Seat) -> Result<Card, GameError> {
        self.ensure_turn(seat)?;
        self.ensure_no_pending()?;
        if self.drawn_this_turn {
            return Err(GameError::AlreadyDrawn(seat));
        }
        let card = self.deal(seat)?;
        self.settle(seat)?;
        Ok(card)
    }

    /// Ends the active seat's turn without standing.
    ///
    /// A busted seat that ends its turn keeps the bust and loses the round. If
    /// the other seat is already done the active seat continues with a new card.
    /// The computer seat has to draw its turn card first.
    pub fn end_turn(&mut self, seat: Seat) -> Result<(), GameError> {
        self.ensure_turn(seat)?;
        self.ensure_no_pending()?;
        self.ensure_turn_card(seat)?;
        if self.players[seat.index()].is_busted() {
            tracing::debug!(seat = %seat, "turn ended while busted");
            self.end_round();
            return Ok(());
        }
        if !self.players[seat.other().index()].is_done() {
            return self.hand_off(seat.other());
        }
        tracing::debug!(seat = %seat, "other seat done, turn continues");
        if seat.draws_on_handoff() {
            self.deal(seat)?;
            return self.settle(seat);
        }
        self.drawn_this_turn = false;
        self.notify();
        Ok(())
    }

    pub fn stand(&mut self, seat: Seat) -> Result<(), GameError> {
        self.ensure_turn(seat)?;
        self.ensure_no_pending()?;
        self.ensure_turn_card(seat)?;
        let player = &mut self.players[seat.index()];
        if player.is_busted() {
            tracing::debug!(seat = %seat, "stood while busted");
            self.end_round();
            return Ok(());
        }
        player.stand();
        tracing::debug!(seat = %seat, score = player.score(), "stand");
        self.pass_turn_or_end(seat)
    }

    /// Plays an unused side card.
    ///
    /// A ± card with no sign becomes the pending card and nothing is applied
    /// until [`Engine::choose_sign`] is called.
    pub fn play_side_card(
        &mut self,
        seat: Seat,
        id: CardId,
        sign: Option<Sign>,
    ) -> Result<SideCardPlay, GameError> {
        self.ensure_turn(seat)?;
        self.ensure_no_pending()?;
        let player = &self.players[seat.index()];
        if !player.can_play_side_card() {
            return Err(GameError::SideCardUnavailable(seat));
        }
        let card = player
            .side_deck()
            .find_available(id)
            .cloned()
            .ok_or(GameError::CardNotFound(id))?;
        if card.kind == CardKind::PlusOrMinus && sign.is_none() {
            tracing::debug!(seat = %seat, card = %card, "waiting for sign");
            self.pending = Some(PendingSign {
                seat,
                card: card.clone(),
            });
            self.notify();
            return Ok(SideCardPlay::AwaitingSign(card));
        }
        self.apply_side_card(seat, id, sign)
            .map(SideCardPlay::Applied)
    }

    /// Resolves the pending ± card with the given sign.
    pub fn choose_sign(&mut self, seat: Seat, sign: Sign) -> Result<Card, GameError> {
        let pending = self.pending.as_ref().ok_or(GameError::NoPendingSign)?;
        if pending.seat != seat {
            return Err(GameError::NotYourTurn {
                expected: pending.seat,
                actual: seat,
            });
        }
        self.ensure_turn(seat)?;
        let id = pending.card.id;
        self.pending = None;
        self.apply_side_card(seat, id, Some(sign))
    }

    fn ensure_turn(&self, seat: Seat) -> Result<(), GameError> {
        match self.phase.active_seat() {
            Some(active) if active == seat => Ok(()),
            Some(active) => Err(GameError::NotYourTurn {
                expected: active,
                actual: seat,
            }),
            None => Err(GameError::NotActionable { phase: self.phase }),
        }
    }

    fn ensure_no_pending(&self) -> Result<(), GameError> {
        match self.pending {
            Some(_) => Err(GameError::SignPending),
            None => Ok(()),
        }
    }

    /// A seat that draws for itself must take its turn card before finishing.
    fn ensure_turn_card(&self, seat: Seat) -> Result<(), GameError> {
        if !self.drawn_this_turn && self.players[seat.index()].can_draw() {
            return Err(GameError::MustDraw(seat));
        }
        Ok(())
    }

    fn begin_round(&mut self) {
        for p in &mut self.players {
            p.reset_round();
        }
        self.pending = None;
        self.last_outcome = None;
        for seat in [Seat::Player, Seat::Opponent] {
            let card = self.pile.draw();
            self.players[seat.index()].add_card(card);
        }
        self.phase = Phase::turn_of(self.first);
        // the opening card counts as the first seat's turn card
        self.drawn_this_turn = self.first.draws_on_handoff();
        tracing::debug!(round = self.round, first = %self.first, "round started");
        self.notify();
    }

    fn deal(&mut self, seat: Seat) -> Result<Card, GameError> {
        let player = &mut self.players[seat.index()];
        if !player.can_draw() {
            return Err(GameError::SeatDone(seat));
        }
        let card = self.pile.draw();
        player.take_draw(card.clone())?;
        tracing::debug!(seat = %seat, card = %card, score = player.score(), "drew");
        self.drawn_this_turn = true;
        Ok(card)
    }

    fn apply_side_card(
        &mut self,
        seat: Seat,
        id: CardId,
        sign: Option<Sign>,
    ) -> Result<Card, GameError> {
        let player = &mut self.players[seat.index()];
        let card = player.play_side_card(id, sign)?;
        tracing::debug!(seat = %seat, card = %card, score = player.score(), "side card played");
        self.settle(seat)?;
        Ok(card)
    }

    /// Follows up on a card that just landed on `seat`'s board.
    fn settle(&mut self, seat: Seat) -> Result<(), GameError> {
        let actor = &self.players[seat.index()];
        if actor.is_busted() {
            if actor.can_recover() {
                self.notify();
                return Ok(());
            }
            // House rule: a bust the seat cannot undo ends the round at once.
            tracing::debug!(seat = %seat, score = actor.score(), "bust cannot be recovered");
            self.end_round();
            return Ok(());
        }
        if actor.is_done() {
            return self.pass_turn_or_end(seat);
        }
        self.notify();
        Ok(())
    }

    fn pass_turn_or_end(&mut self, seat: Seat) -> Result<(), GameError> {
        if self.players[seat.other().index()].is_done() {
            self.end_round();
            return Ok(());
        }
        self.hand_off(seat.other())
    }

    fn hand_off(&mut self, to: Seat) -> Result<(), GameError> {
        self.phase = Phase::turn_of(to);
        self.drawn_this_turn = false;
        tracing::debug!(seat = %to, "turn handed over");
        if to.draws_on_handoff() {
            self.deal(to)?;
            return self.settle(to);
        }
        self.notify();
        Ok(())
    }

    fn end_round(&mut self) {
        self.pending = None;
        let player = &self.players[Seat::Player.index()];
        let opponent = &self.players[Seat::Opponent.index()];
        let outcome = rules::round_outcome(player.final_hand(), opponent.final_hand());
        tracing::info!(
            round = self.round,
            outcome = ?outcome,
            player_score = player.score(),
            opponent_score = opponent.score(),
            "round over"
        );
        if let Some(winner) = outcome.winner() {
            self.players[winner.index()].win_round();
        }
        self.last_outcome = Some(outcome);
        self.phase = Phase::RoundOver;
        self.notify();

        if let Some(winner) = self.match_winner() {
            self.phase = Phase::MatchOver;
            tracing::info!(winner = %winner, "match over");
            self.notify();
        }
    }

    fn notify(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            let snapshot = self.snapshot();
            observer(&snapshot);
            self.observer = Some(observer);
        }
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("seed", &self.seed)
            .field("phase", &self.phase)
            .field("round", &self.round)
            .field("first", &self.first)
            .field("players", &self.players)
            .field("pending", &self.pending)
            .field("last_outcome", &self.last_outcome)
            .finish_non_exhaustive()
    }
}
