//! Simulation command: the computer plays both seats.
//!
//! Both seats get a freshly generated side deck every match and run the same
//! heuristic with pacing disabled. Only tallies are printed.

use std::io::Write;

use pazaak_ai::create_ai;
use pazaak_ai::pacing::NoPacing;
use pazaak_engine::engine::Engine;
use pazaak_engine::game::{MatchSetup, Phase, Seat};
use pazaak_engine::rules::RoundOutcome;
use pazaak_engine::side_deck::SideDeck;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::CliError;
use crate::ui;
use crate::validation::validate_matches;

/// Upper bound on engine steps per match before the run is declared stuck.
const MAX_STEPS_PER_MATCH: u32 = 10_000;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SimTally {
    pub matches: [u32; 2],
    pub rounds: [u32; 2],
    pub ties: u32,
}

/// Handle the sim command.
///
/// `seed` fixes the shuffle, both side decks and both opponents' choices.
pub fn handle_sim_command(
    matches: u32,
    seed: Option<u64>,
    ai_type: &str,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if let Err(msg) = validate_matches(matches) {
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }
    let seed = seed.unwrap_or_else(rand::random);
    let tally = simulate(matches, seed, ai_type)?;

    writeln!(out, "sim: matches={} seed={}", matches, seed)?;
    writeln!(
        out,
        "Matches: player {} - {} opponent",
        tally.matches[Seat::Player.index()],
        tally.matches[Seat::Opponent.index()]
    )?;
    writeln!(
        out,
        "Rounds: player {} - {} opponent ({} tied)",
        tally.rounds[Seat::Player.index()],
        tally.rounds[Seat::Opponent.index()],
        tally.ties
    )?;
    writeln!(out, "Simulated: {} matches", matches)?;
    Ok(())
}

pub fn simulate(matches: u32, seed: u64, ai_type: &str) -> Result<SimTally, CliError> {
    let unknown = || CliError::Config(format!("unknown ai '{}'", ai_type));
    let mut seats = [
        create_ai(ai_type, Some(seed.wrapping_add(1)), Box::new(NoPacing)).ok_or_else(unknown)?,
        create_ai(ai_type, Some(seed.wrapping_add(2)), Box::new(NoPacing)).ok_or_else(unknown)?,
    ];
    let mut deck_rng = StdRng::seed_from_u64(seed);
    let mut engine = Engine::new(Some(seed));
    let mut tally = SimTally::default();

    for m in 0..matches {
        engine.start_match(MatchSetup::new(SideDeck::generate(&mut deck_rng)));
        let mut steps = 0u32;
        loop {
            steps += 1;
            if steps > MAX_STEPS_PER_MATCH {
                return Err(CliError::Engine(format!("match {} did not finish", m + 1)));
            }
            match engine.phase() {
                Phase::PlayerTurn => {
                    seats[Seat::Player.index()].take_turn(&mut engine, Seat::Player);
                }
                Phase::OpponentTurn => {
                    seats[Seat::Opponent.index()].take_turn(&mut engine, Seat::Opponent);
                }
                Phase::RoundOver => {
                    count_round(&mut tally, engine.last_outcome());
                    engine.next_round()?;
                }
                Phase::MatchOver => {
                    count_round(&mut tally, engine.last_outcome());
                    if let Some(winner) = engine.match_winner() {
                        tally.matches[winner.index()] += 1;
                    }
                    break;
                }
                Phase::Waiting => {
                    return Err(CliError::Engine("match has not started".to_string()));
                }
            }
        }
        tracing::debug!(
            match_no = m + 1,
            player = tally.matches[0],
            opponent = tally.matches[1],
            "simulated match"
        );
    }
    Ok(tally)
}

fn count_round(tally: &mut SimTally, outcome: Option<RoundOutcome>) {
    match outcome {
        Some(RoundOutcome::Win(seat)) => tally.rounds[seat.index()] += 1,
        Some(RoundOutcome::Tie) => tally.ties += 1,
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulate_is_reproducible() {
        let a = simulate(5, 99, "baseline").unwrap();
        let b = simulate(5, 99, "baseline").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.matches[0] + a.matches[1], 5);
        // every match needs three wins for its winner
        assert!(a.rounds[0] + a.rounds[1] >= 15);
    }

    #[test]
    fn test_sim_output() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_sim_command(3, Some(7), "baseline", &mut out, &mut err).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("sim: matches=3 seed=7"));
        assert!(text.contains("Simulated: 3 matches"));
    }

    #[test]
    fn test_sim_rejects_zero_matches() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_sim_command(0, Some(7), "baseline", &mut out, &mut err);
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
    }
}
