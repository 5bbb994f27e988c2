//! Heuristic opponent.
//!
//! A turn runs in fixed stages: draw, undo a bust, try one offensive side
//! card, then stand or pass. Each decision is a pure helper below so it can be
//! tested without an engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

use crate::pacing::{NoPacing, Pacer, SleepPacing, Stage};
use crate::{AIOpponent, TurnAction, TurnReport};
use pazaak_engine::cards::{Card, CardId, CardKind, Sign, SIDE_CARD_MAX};
use pazaak_engine::engine::{Engine, SideCardPlay};
use pazaak_engine::game::Seat;
use pazaak_engine::rules::TARGET_SCORE;
use pazaak_engine::snapshot::SeatView;

/// Lowest score at which the opponent considers standing or chasing 20.
const COMFORT_SCORE: i32 = 17;

/// A side card to play and, for ± cards, the sign to play it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SideCardChoice {
    pub id: CardId,
    pub sign: Option<Sign>,
}

impl SideCardChoice {
    fn of(card: &Card, sign: Sign) -> Self {
        Self {
            id: card.id,
            sign: (card.kind == CardKind::PlusOrMinus).then_some(sign),
        }
    }
}

/// Picks a card that brings a busted `score` back to 20 or less.
///
/// An exact landing on 20 wins, with a minus card preferred over a ± card.
/// Failing that, the card leaving the highest score under 20.
pub fn find_recovery(score: i32, available: &[Card]) -> Option<SideCardChoice> {
    let excess = score - TARGET_SCORE;
    if excess <= 0 {
        return None;
    }
    for kind in [CardKind::Minus, CardKind::PlusOrMinus] {
        if let Some(card) = available
            .iter()
            .find(|c| c.kind == kind && i32::from(c.value) == excess)
        {
            return Some(SideCardChoice::of(card, Sign::Minus));
        }
    }
    available
        .iter()
        .filter(|c| c.kind.can_subtract() && i32::from(c.value) >= excess)
        .min_by_key(|c| (c.value, c.kind != CardKind::Minus))
        .map(|c| SideCardChoice::of(c, Sign::Minus))
}

/// Finds a card adding exactly `needed`, plus cards before ± cards.
pub fn find_exact_boost(needed: i32, available: &[Card]) -> Option<SideCardChoice> {
    if needed < 1 || needed > i32::from(SIDE_CARD_MAX) {
        return None;
    }
    [CardKind::Plus, CardKind::PlusOrMinus]
        .into_iter()
        .find_map(|kind| {
            available
                .iter()
                .find(|c| c.kind == kind && i32::from(c.value) == needed)
        })
        .map(|c| SideCardChoice::of(c, Sign::Plus))
}

/// The one offensive side card worth playing this turn, if any.
pub fn choose_offense(own: i32, human: &SeatView, available: &[Card]) -> Option<SideCardChoice> {
    if (COMFORT_SCORE..TARGET_SCORE).contains(&own) {
        if let Some(choice) = find_exact_boost(TARGET_SCORE - own, available) {
            return Some(choice);
        }
    }
    // overtake a standing human by one point; over a human on 20 this busts
    if human.standing && !human.busted && human.score > own && human.score <= TARGET_SCORE {
        return find_exact_boost(human.score + 1 - own, available);
    }
    None
}

/// How the stand decision should be made.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StandOdds {
    Always,
    Never,
    /// Stand with this probability
    Chance(f64),
}

pub fn stand_odds(own: i32, human: &SeatView) -> StandOdds {
    if own >= TARGET_SCORE || human.busted {
        return StandOdds::Always;
    }
    if human.standing {
        let theirs = human.score;
        if own > theirs || (own >= theirs && own >= 18) || (own == theirs && own >= COMFORT_SCORE)
        {
            return StandOdds::Always;
        }
    }
    match own {
        19.. => StandOdds::Chance(0.85),
        18 => StandOdds::Chance(0.70),
        COMFORT_SCORE => StandOdds::Chance(0.50),
        _ => StandOdds::Never,
    }
}

/// Heuristic opponent with its own RNG for the probabilistic stand decision.
///
/// # Example
///
/// ```rust
/// use pazaak_ai::baseline::BaselineAI;
/// use pazaak_ai::AIOpponent;
///
/// let ai = BaselineAI::seeded(7);
/// assert_eq!(ai.name(), "BaselineAI");
/// ```
pub struct BaselineAI {
    rng: StdRng,
    pacer: Box<dyn Pacer>,
}

impl BaselineAI {
    /// OS-seeded opponent with the default pauses.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            pacer: Box::new(SleepPacing::default()),
        }
    }

    /// Reproducible opponent that does not pause.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            pacer: Box::new(NoPacing),
        }
    }

    pub fn with_pacer(mut self, pacer: Box<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    fn view(engine: &Engine, seat: Seat) -> Option<(SeatView, SeatView)> {
        let snap = engine.snapshot();
        if !snap.is_turn_of(seat) {
            return None;
        }
        Some((snap.seat(seat).clone(), snap.seat(seat.other()).clone()))
    }

    fn play(
        &mut self,
        engine: &mut Engine,
        seat: Seat,
        choice: SideCardChoice,
        report: &mut TurnReport,
    ) {
        match engine.play_side_card(seat, choice.id, choice.sign) {
            Ok(SideCardPlay::Applied(card)) => report.push(TurnAction::PlayedSideCard(card)),
            Ok(SideCardPlay::AwaitingSign(_)) => match engine.choose_sign(seat, Sign::Plus) {
                Ok(card) => report.push(TurnAction::PlayedSideCard(card)),
                Err(e) => tracing::debug!(seat = %seat, error = %e, "sign rejected"),
            },
            Err(e) => tracing::debug!(seat = %seat, error = %e, "side card rejected"),
        }
    }

    /// Undoes a bust if possible. False once the turn has left `seat`.
    fn recover(&mut self, engine: &mut Engine, seat: Seat, report: &mut TurnReport) -> bool {
        let Some((me, _)) = Self::view(engine, seat) else {
            return false;
        };
        if me.busted {
            self.pacer.pause(Stage::Recover);
            let available: Vec<Card> = me.available_side_cards().cloned().collect();
            match find_recovery(me.score, &available) {
                Some(choice) => {
                    tracing::debug!(seat = %seat, score = me.score, "recovering from bust");
                    self.play(engine, seat, choice, report);
                }
                None => tracing::debug!(seat = %seat, score = me.score, "no recovery card"),
            }
        }
        engine.turn() == Some(seat)
    }
}

impl Default for BaselineAI {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BaselineAI {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaselineAI").finish_non_exhaustive()
    }
}

impl AIOpponent for BaselineAI {
    fn take_turn(&mut self, engine: &mut Engine, seat: Seat) -> TurnReport {
        let mut report = TurnReport::default();
        if engine.turn() != Some(seat) {
            return report;
        }

        self.pacer.pause(Stage::Think);
        if !engine.has_drawn() {
            match engine.draw(seat) {
                Ok(card) => report.push(TurnAction::Drew(card)),
                Err(e) => tracing::debug!(seat = %seat, error = %e, "draw rejected"),
            }
        }
        if !self.recover(engine, seat, &mut report) {
            return report;
        }

        self.pacer.pause(Stage::Offense);
        let Some((me, human)) = Self::view(engine, seat) else {
            return report;
        };
        let available: Vec<Card> = me.available_side_cards().cloned().collect();
        if let Some(choice) = choose_offense(me.score, &human, &available) {
            tracing::debug!(seat = %seat, score = me.score, "offensive side card");
            self.play(engine, seat, choice, &mut report);
            self.pacer.pause(Stage::AfterPlay);
            if !self.recover(engine, seat, &mut report) {
                return report;
            }
        }

        let Some((me, human)) = Self::view(engine, seat) else {
            return report;
        };
        let odds = stand_odds(me.score, &human);
        let stand = match odds {
            StandOdds::Always => true,
            StandOdds::Never => false,
            StandOdds::Chance(p) => self.rng.random_bool(p),
        };
        tracing::debug!(seat = %seat, score = me.score, ?odds, stand, "stand decision");
        let (result, action) = if stand {
            (engine.stand(seat), TurnAction::Stood)
        } else {
            (engine.end_turn(seat), TurnAction::EndedTurn)
        };
        match result {
            Ok(()) => report.push(action),
            Err(e) => tracing::debug!(seat = %seat, error = %e, "turn end rejected"),
        }
        report
    }

    fn name(&self) -> &str {
        "BaselineAI"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn human(score: i32, standing: bool, busted: bool) -> SeatView {
        SeatView {
            score,
            played: Vec::new(),
            side_cards: Vec::new(),
            standing,
            busted,
            rounds_won: 0,
            can_play_side_card: false,
        }
    }

    fn cards(specs: &[(CardKind, u8)]) -> Vec<Card> {
        specs.iter().map(|&(k, v)| Card::side(k, v)).collect()
    }

    #[test]
    fn test_baseline_ai_creation() {
        let ai = BaselineAI::seeded(1);
        assert_eq!(ai.name(), "BaselineAI");
    }

    #[test]
    fn recovery_prefers_an_exact_landing() {
        let hand = cards(&[(CardKind::Minus, 2), (CardKind::PlusOrMinus, 3)]);
        let choice = find_recovery(23, &hand).unwrap();
        assert_eq!(choice.id, hand[1].id);
        assert_eq!(choice.sign, Some(Sign::Minus));
    }

    #[test]
    fn recovery_prefers_minus_over_plus_or_minus_of_same_value() {
        let hand = cards(&[(CardKind::PlusOrMinus, 2), (CardKind::Minus, 2)]);
        let choice = find_recovery(22, &hand).unwrap();
        assert_eq!(choice.id, hand[1].id);
        assert_eq!(choice.sign, None);
    }

    #[test]
    fn recovery_without_exact_card_keeps_the_highest_score() {
        let hand = cards(&[
            (CardKind::Minus, 6),
            (CardKind::PlusOrMinus, 4),
            (CardKind::Plus, 5),
        ]);
        // 22 - 4 = 18 beats 22 - 6 = 16
        assert_eq!(find_recovery(22, &hand).unwrap().id, hand[1].id);
    }

    #[test]
    fn recovery_needs_a_large_enough_card() {
        let hand = cards(&[(CardKind::Minus, 1), (CardKind::Plus, 6)]);
        assert_eq!(find_recovery(24, &hand), None);
        assert_eq!(find_recovery(20, &hand), None, "not busted");
    }

    #[test]
    fn boost_prefers_plus_cards() {
        let hand = cards(&[(CardKind::PlusOrMinus, 2), (CardKind::Plus, 2)]);
        let choice = find_exact_boost(2, &hand).unwrap();
        assert_eq!(choice.id, hand[1].id);
        assert_eq!(choice.sign, None);

        let only_pm = cards(&[(CardKind::PlusOrMinus, 2)]);
        assert_eq!(find_exact_boost(2, &only_pm).unwrap().sign, Some(Sign::Plus));
        assert_eq!(find_exact_boost(7, &hand), None);
        assert_eq!(find_exact_boost(0, &hand), None);
    }

    #[test]
    fn offense_chases_twenty_from_seventeen_up() {
        let hand = cards(&[(CardKind::Plus, 3), (CardKind::Plus, 1)]);
        let idle = human(10, false, false);
        assert_eq!(choose_offense(17, &idle, &hand).unwrap().id, hand[0].id);
        assert_eq!(choose_offense(19, &idle, &hand).unwrap().id, hand[1].id);
        assert_eq!(choose_offense(16, &idle, &hand), None);
    }

    #[test]
    fn offense_overtakes_a_standing_human_by_one() {
        let hand = cards(&[(CardKind::Plus, 5), (CardKind::Minus, 1)]);
        let standing = human(18, true, false);
        assert_eq!(choose_offense(14, &standing, &hand).unwrap().id, hand[0].id);
        // 18 + 1 - 12 = 7 is beyond any side card
        assert_eq!(choose_offense(12, &standing, &hand), None);
    }

    #[test]
    fn offense_chases_a_human_standing_on_twenty() {
        let hand = cards(&[(CardKind::Plus, 6), (CardKind::PlusOrMinus, 5)]);
        let at_twenty = human(20, true, false);
        let choice = choose_offense(15, &at_twenty, &hand).unwrap();
        assert_eq!(choice.id, hand[0].id);
        // 21 - 14 = 7 is beyond any side card
        assert_eq!(choose_offense(14, &at_twenty, &hand), None);
        assert_eq!(choose_offense(16, &at_twenty, &hand).unwrap().id, hand[1].id);
    }

    #[test]
    fn stand_rules_at_the_extremes() {
        let idle = human(12, false, false);
        assert_eq!(stand_odds(20, &idle), StandOdds::Always);
        assert_eq!(stand_odds(23, &idle), StandOdds::Always);
        assert_eq!(stand_odds(9, &human(24, false, true)), StandOdds::Always);
        assert_eq!(stand_odds(16, &idle), StandOdds::Never);
    }

    #[test]
    fn stand_rules_against_a_standing_human() {
        assert_eq!(stand_odds(15, &human(14, true, false)), StandOdds::Always);
        assert_eq!(stand_odds(18, &human(18, true, false)), StandOdds::Always);
        assert_eq!(stand_odds(17, &human(17, true, false)), StandOdds::Always);
        assert_eq!(stand_odds(16, &human(16, true, false)), StandOdds::Never);
        assert_eq!(stand_odds(17, &human(19, true, false)), StandOdds::Chance(0.50));
    }

    #[test]
    fn stand_probability_grows_with_score() {
        let idle = human(5, false, false);
        assert_eq!(stand_odds(19, &idle), StandOdds::Chance(0.85));
        assert_eq!(stand_odds(18, &idle), StandOdds::Chance(0.70));
        assert_eq!(stand_odds(17, &idle), StandOdds::Chance(0.50));
    }
}
