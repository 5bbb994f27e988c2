//! # Pazaak CLI Library
//!
//! Command-line front end for the Pazaak engine: interactive play against the
//! computer, computer-vs-computer simulation, side deck editing and lifetime
//! statistics.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["pazaak", "sim", "--matches", "10", "--seed", "42"];
//! let code = pazaak_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play best-of-five matches against the computer
//! - `sim`: Let the computer play both seats and print tallies
//! - `deck`: Show, list, save or reset the side deck
//! - `stats`: Show or reset lifetime statistics
//! - `cfg`: Display current configuration settings
//!
//! ## Data Directory
//!
//! The side deck (`deck.json`) and statistics (`stats.json`) live in the
//! configured data directory, `.pazaak` unless `PAZAAK_DATA_DIR` or the
//! config file says otherwise.

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod stats;
pub mod store;
pub mod ui;
pub mod validation;

use cli::{Commands, PazaakCli};
use commands::{
    handle_cfg_command, handle_deck_command, handle_play_command, handle_sim_command,
    handle_stats_command, PlayOptions,
};
use store::JsonFileStore;

pub use error::CliError;

/// Main entry point for the CLI application.
///
/// Parses command-line arguments and dispatches to the appropriate subcommand handler.
/// `play` reads its moves from the process stdin.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when input ends mid-match
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["pazaak", "deck", "options"];
/// let code = pazaak_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdin = std::io::stdin();
    let mut stdin_lock = stdin.lock();
    run_with_input(args, out, err, &mut stdin_lock)
}

/// Same as [`run`] with an explicit input stream for `play`.
pub fn run_with_input<I, S>(
    args: I,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn std::io::BufRead,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    const COMMANDS: &[&str] = &["play", "sim", "deck", "stats", "cfg"];
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match PazaakCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Pazaak CLI");
                    write_or_exit!(err, "Usage: pazaak <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: pazaak --help");
                    exit_code::ERROR
                }
            };
        }
    };

    if let Commands::Cfg = cli.cmd {
        return finish(handle_cfg_command(out, err), err);
    }

    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            return exit_code::ERROR;
        }
    };
    tracing::debug!(data_dir = %cfg.data_dir, ai = %cfg.ai, "configuration loaded");
    let store = JsonFileStore::new(&cfg.data_dir);

    let result = match cli.cmd {
        Commands::Play {
            seed,
            matches,
            delay_ms,
            log,
        } => {
            let delay_ms = delay_ms.unwrap_or(cfg.ai_delay_ms);
            if delay_ms > config::MAX_AI_DELAY_MS {
                Err(CliError::InvalidInput(format!(
                    "delay-ms must be <= {}",
                    config::MAX_AI_DELAY_MS
                )))
            } else {
                let opts = PlayOptions {
                    seed: seed.or(cfg.seed),
                    matches,
                    delay_ms,
                    log,
                    ai: cfg.ai.clone(),
                };
                handle_play_command(&opts, &store, &store, out, err, stdin)
            }
        }
        Commands::Sim { matches, seed } => {
            handle_sim_command(matches, seed.or(cfg.seed), &cfg.ai, out, err)
        }
        Commands::Deck { action } => handle_deck_command(&action, &store, out, err),
        Commands::Stats { json, reset } => handle_stats_command(json, reset, &store, out),
        Commands::Cfg => handle_cfg_command(out, err),
    };
    finish(result, err)
}

/// Maps a command result to an exit code, reporting errors on `err`.
fn finish(result: Result<(), CliError>, err: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(CliError::Interrupted(msg)) => {
            write_or_exit!(err, "Interrupted: {}", msg);
            exit_code::INTERRUPTED
        }
        Err(e) => {
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_args(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(Vec::new());
        let code = run_with_input(args.iter().copied(), &mut out, &mut err, &mut stdin);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_help_goes_to_stdout() {
        let (code, out, err) = run_args(&["pazaak", "--help"]);
        assert_eq!(code, exit_code::SUCCESS);
        assert!(out.contains("Usage"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_unknown_command_lists_commands() {
        let (code, _, err) = run_args(&["pazaak", "fold"]);
        assert_eq!(code, exit_code::ERROR);
        assert!(err.contains("Commands:"));
        for c in ["play", "sim", "deck", "stats", "cfg"] {
            assert!(err.contains(&format!("  {}", c)));
        }
    }

    #[test]
    fn test_finish_maps_errors() {
        let mut err = Vec::new();
        assert_eq!(finish(Ok(()), &mut err), exit_code::SUCCESS);
        assert_eq!(
            finish(Err(CliError::Interrupted("eof".into())), &mut err),
            exit_code::INTERRUPTED
        );
        assert_eq!(
            finish(Err(CliError::InvalidInput("bad".into())), &mut err),
            exit_code::ERROR
        );
        let text = String::from_utf8(err).unwrap();
        assert!(text.contains("Interrupted: eof"));
        assert!(text.contains("Error: Invalid input: bad"));
    }
}
