//! # Play Command
//!
//! Interactive Pazaak against the computer opponent.
//!
//! The human seat is driven by lines read from stdin; the computer seat is
//! driven by the configured [`AIOpponent`]. Finished rounds and matches reach
//! this module through the engine's observer, which feeds a channel drained
//! after every action; each one updates the persisted statistics and the
//! optional round log.
//!
//! Typing `q` ends the session cleanly. Running out of input in the middle of
//! a match is reported as an interruption.

use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver};

use chrono::Utc;
use pazaak_ai::pacing::{NoPacing, Pacer, SleepPacing};
use pazaak_ai::{create_ai, AIOpponent};
use pazaak_engine::engine::{Engine, SideCardPlay};
use pazaak_engine::game::{MatchSetup, Phase, Seat};
use pazaak_engine::logger::{RoundLogger, RoundRecord};
use pazaak_engine::snapshot::Snapshot;

use crate::error::CliError;
use crate::formatters::{format_action, format_card, format_outcome, format_seat};
use crate::io_utils::read_stdin_line;
use crate::stats::Stats;
use crate::store::{DeckStore, StatsStore};
use crate::ui;
use crate::validation::{parse_turn_command, validate_matches, ParseResult, TurnCommand};

const HELP: &str = "\
Commands:
  e, end        end your turn
  s, stand      stand on your current score
  p N, play N   play side card N (1-4); a bare N works too
  +, -          pick the sign of a pending +/- card
  n, next       start the next round once a round is over
  h, help       show this help
  q, quit       leave the game";

/// Settings for one `play` session.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub seed: Option<u64>,
    pub matches: u32,
    /// Pause between opponent turn stages; 0 disables pacing
    pub delay_ms: u64,
    /// JSONL file receiving one record per finished round
    pub log: Option<String>,
    /// Opponent type name
    pub ai: String,
}

enum MatchEnd {
    Finished,
    Quit,
}

/// Results of finished rounds and matches, fed by the engine observer.
struct Session<'a> {
    events: Receiver<Snapshot>,
    store: &'a dyn StatsStore,
    stats: Stats,
    logger: RoundLogger,
    match_id: String,
    seed: u64,
}

impl Session<'_> {
    fn drain(&mut self, out: &mut dyn Write) -> Result<(), CliError> {
        while let Ok(snapshot) = self.events.try_recv() {
            match snapshot.phase {
                Phase::RoundOver => self.round_over(&snapshot, out)?,
                Phase::MatchOver => self.match_over(&snapshot, out)?,
                _ => {}
            }
        }
        Ok(())
    }

    fn round_over(&mut self, snapshot: &Snapshot, out: &mut dyn Write) -> Result<(), CliError> {
        let Some(outcome) = snapshot.last_outcome else {
            return Ok(());
        };
        self.stats.record_round(outcome);
        self.store.save_stats(&self.stats)?;
        self.logger
            .write(&RoundRecord::from_snapshot(&self.match_id, Some(self.seed), snapshot))?;

        writeln!(out)?;
        writeln!(out, "{}", format_seat(Seat::Opponent, &snapshot.opponent, true))?;
        writeln!(out, "{}", format_seat(Seat::Player, &snapshot.player, false))?;
        writeln!(
            out,
            "Round {} over: {}. You {} - {} Opponent",
            snapshot.round,
            format_outcome(outcome),
            snapshot.player.rounds_won,
            snapshot.opponent.rounds_won
        )?;
        Ok(())
    }

    fn match_over(&mut self, snapshot: &Snapshot, out: &mut dyn Write) -> Result<(), CliError> {
        let Some(winner) = snapshot.match_winner else {
            return Ok(());
        };
        let won = winner == Seat::Player;
        let loser_rounds = snapshot.seat(winner.other()).rounds_won;
        self.stats.record_match(won, snapshot.opponent.rounds_won);
        self.store.save_stats(&self.stats)?;
        let verdict = if won {
            "You win the match!"
        } else {
            "The opponent wins the match."
        };
        writeln!(
            out,
            "{} ({}-{})",
            verdict,
            snapshot.seat(winner).rounds_won,
            loser_rounds
        )?;
        Ok(())
    }
}

/// Handle the play command: interactive matches against the computer.
///
/// # Returns
///
/// * `Ok(())` when all matches finished or the user quit
/// * `Err(CliError::Interrupted)` when input ended mid-match
/// * `Err(CliError)` for invalid options, unknown opponents or I/O failures
pub fn handle_play_command(
    opts: &PlayOptions,
    decks: &dyn DeckStore,
    stats: &dyn StatsStore,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if let Err(msg) = validate_matches(opts.matches) {
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }

    let seed = opts.seed.unwrap_or_else(rand::random);
    let pacer: Box<dyn Pacer> = if opts.delay_ms == 0 {
        Box::new(NoPacing)
    } else {
        Box::new(SleepPacing::from_step_millis(opts.delay_ms))
    };
    let mut ai = create_ai(&opts.ai, Some(seed.wrapping_add(1)), pacer)
        .ok_or_else(|| CliError::Config(format!("unknown ai '{}'", opts.ai)))?;

    let logger = match &opts.log {
        Some(path) => RoundLogger::create(path)?,
        None => RoundLogger::detached(&Utc::now().format("%Y%m%d").to_string()),
    };

    let (tx, rx) = mpsc::channel();
    let mut engine = Engine::new(Some(seed));
    engine.set_observer(Box::new(move |s: &Snapshot| {
        if matches!(s.phase, Phase::RoundOver | Phase::MatchOver) {
            let _ = tx.send(s.clone());
        }
    }));

    let mut session = Session {
        events: rx,
        store: stats,
        stats: stats.load_stats(),
        logger,
        match_id: String::new(),
        seed,
    };

    writeln!(
        out,
        "play: matches={} seed={} opponent={}",
        opts.matches,
        seed,
        ai.name()
    )?;
    writeln!(out, "Type 'h' for help.")?;

    let mut played = 0u32;
    for m in 1..=opts.matches {
        session.match_id = session.logger.next_id();
        let deck = decks.load_deck();
        engine.start_match(MatchSetup::new(deck));
        writeln!(out)?;
        writeln!(
            out,
            "=== Match {}/{} ({}) ===",
            m, opts.matches, session.match_id
        )?;
        match play_match(&mut engine, ai.as_mut(), &mut session, out, err, stdin)? {
            MatchEnd::Finished => played += 1,
            MatchEnd::Quit => {
                writeln!(out, "Goodbye.")?;
                break;
            }
        }
    }

    writeln!(out, "Matches played: {}", played)?;
    Ok(())
}

fn play_match(
    engine: &mut Engine,
    ai: &mut dyn AIOpponent,
    session: &mut Session<'_>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<MatchEnd, CliError> {
    let mut shown: Option<Snapshot> = None;
    loop {
        session.drain(out)?;
        match engine.phase() {
            Phase::MatchOver => return Ok(MatchEnd::Finished),
            Phase::Waiting => {
                return Err(CliError::Engine("match has not started".to_string()));
            }
            Phase::RoundOver => {
                ui::prompt(out, "Press Enter or 'n' for the next round: ")?;
                let line = next_line(stdin)?;
                if line.is_empty() {
                    engine.next_round()?;
                    continue;
                }
                match parse_turn_command(&line) {
                    ParseResult::Command(TurnCommand::Next) => engine.next_round()?,
                    ParseResult::Command(TurnCommand::Help) => writeln!(out, "{}", HELP)?,
                    ParseResult::Quit => return Ok(MatchEnd::Quit),
                    _ => ui::write_error(err, "The round is over; enter 'n' to continue")?,
                }
            }
            Phase::OpponentTurn => {
                let report = ai.take_turn(engine, Seat::Opponent);
                if report.actions.is_empty() {
                    return Err(CliError::Engine(format!(
                        "{} made no move on its turn",
                        ai.name()
                    )));
                }
                for action in &report.actions {
                    writeln!(out, "Opponent {}", format_action(action))?;
                }
            }
            Phase::PlayerTurn => {
                let snapshot = engine.snapshot();
                if shown.as_ref() != Some(&snapshot) {
                    render(&snapshot, out)?;
                    shown = Some(snapshot.clone());
                }
                let prompt = match &snapshot.pending {
                    Some(card) => format!("Sign for {} (+/-): ", format_card(card)),
                    None => "Your move: ".to_string(),
                };
                ui::prompt(out, &prompt)?;
                match parse_turn_command(&next_line(stdin)?) {
                    ParseResult::Command(cmd) => {
                        if let Err(e) = apply_command(engine, &snapshot, cmd, out) {
                            ui::write_error(err, &e)?;
                        }
                    }
                    ParseResult::Quit => return Ok(MatchEnd::Quit),
                    ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
                }
            }
        }
    }
}

fn next_line(stdin: &mut dyn BufRead) -> Result<String, CliError> {
    read_stdin_line(stdin).ok_or_else(|| CliError::Interrupted("input ended mid-match".to_string()))
}

/// Applies a human command; the error string is shown to the user.
fn apply_command(
    engine: &mut Engine,
    snapshot: &Snapshot,
    cmd: TurnCommand,
    out: &mut dyn Write,
) -> Result<(), String> {
    let seat = Seat::Player;
    match cmd {
        TurnCommand::EndTurn => engine.end_turn(seat).map_err(|e| e.to_string()),
        TurnCommand::Stand => engine.stand(seat).map_err(|e| e.to_string()),
        TurnCommand::Play(slot) => {
            let card = snapshot
                .player
                .side_cards
                .get(slot - 1)
                .ok_or_else(|| format!("No side card in slot {}", slot))?;
            if card.used {
                return Err(format!("Side card {} was already played", slot));
            }
            match engine
                .play_side_card(seat, card.id, None)
                .map_err(|e| e.to_string())?
            {
                SideCardPlay::Applied(card) => {
                    writeln!(out, "You play {}", format_card(&card)).map_err(|e| e.to_string())
                }
                SideCardPlay::AwaitingSign(_) => Ok(()),
            }
        }
        TurnCommand::Sign(sign) => {
            let card = engine.choose_sign(seat, sign).map_err(|e| e.to_string())?;
            writeln!(out, "You play {}", format_card(&card)).map_err(|e| e.to_string())
        }
        TurnCommand::Next => Err("The round is still being played".to_string()),
        TurnCommand::Help => writeln!(out, "{}", HELP).map_err(|e| e.to_string()),
    }
}

fn render(snapshot: &Snapshot, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Round {}  |  You {} - {} Opponent  |  pile {}",
        snapshot.round,
        snapshot.player.rounds_won,
        snapshot.opponent.rounds_won,
        snapshot.draw_pile_remaining
    )?;
    writeln!(out, "{}", format_seat(Seat::Opponent, &snapshot.opponent, true))?;
    writeln!(out, "{}", format_seat(Seat::Player, &snapshot.player, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::io::Cursor;

    fn opts(seed: u64, matches: u32) -> PlayOptions {
        PlayOptions {
            seed: Some(seed),
            matches,
            delay_ms: 0,
            log: None,
            ai: "baseline".to_string(),
        }
    }

    fn run_script(opts: &PlayOptions, store: &MemoryStore, script: &str) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(script.as_bytes().to_vec());
        let res = handle_play_command(opts, store, store, &mut out, &mut err, &mut stdin);
        (
            res,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_zero_matches_rejected() {
        let store = MemoryStore::new();
        let (res, _, err) = run_script(&opts(1, 0), &store, "");
        assert!(matches!(res, Err(CliError::InvalidInput(_))));
        assert!(err.contains("matches must be >= 1"));
    }

    #[test]
    fn test_unknown_ai_rejected() {
        let store = MemoryStore::new();
        let mut o = opts(1, 1);
        o.ai = "grandmaster".into();
        let (res, _, _) = run_script(&o, &store, "");
        assert!(matches!(res, Err(CliError::Config(_))));
    }

    #[test]
    fn test_quit_immediately() {
        let store = MemoryStore::new();
        let (res, out, _) = run_script(&opts(3, 1), &store, "q\n");
        assert!(res.is_ok());
        assert!(out.contains("Goodbye."));
        assert!(out.contains("Matches played: 0"));
        assert_eq!(store.stats().total_matches, 0);
    }

    #[test]
    fn test_eof_mid_match_is_interrupted() {
        let store = MemoryStore::new();
        let (res, _, _) = run_script(&opts(5, 1), &store, "");
        assert!(matches!(res, Err(CliError::Interrupted(_))));
    }

    #[test]
    fn test_full_match_records_stats() {
        let store = MemoryStore::new();
        let script = "s\nn\n".repeat(80);
        let (res, out, _) = run_script(&opts(11, 1), &store, &script);
        assert!(res.is_ok(), "play failed: {:?}", res);
        assert!(out.contains("Matches played: 1"));
        assert!(out.contains("wins the match") || out.contains("win the match"));

        let stats = store.stats();
        assert_eq!(stats.total_matches, 1);
        assert_eq!(stats.matches_won + stats.matches_lost, 1);
        assert!(stats.rounds_won.max(stats.rounds_lost) == 3);
    }

    #[test]
    fn test_invalid_input_keeps_playing() {
        let store = MemoryStore::new();
        let script = format!("bogus\n{}", "s\nn\n".repeat(80));
        let (res, _, err) = run_script(&opts(11, 1), &store, &script);
        assert!(res.is_ok());
        assert!(err.contains("Error:"));
    }

    #[test]
    fn test_round_log_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("rounds.jsonl");
        let store = MemoryStore::new();
        let mut o = opts(21, 1);
        o.log = Some(path.to_string_lossy().into_owned());
        let (res, _, _) = run_script(&o, &store, &"s\nn\n".repeat(80));
        assert!(res.is_ok());

        let content = std::fs::read_to_string(&path).unwrap();
        let records: Vec<RoundRecord> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert!(records.len() >= 3);
        assert!(records.iter().all(|r| r.seed == Some(21) && r.ts.is_some()));
        assert!(records[0].match_id.ends_with("-000001"));
        assert_eq!(records[0].round, 1);
    }
}
