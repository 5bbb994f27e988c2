//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "pazaak",
    version,
    about = "Pazaak card game against a computer opponent"
)]
pub struct PazaakCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play best-of-five matches against the computer
    Play {
        /// Seed for the shuffle and the opponent (overrides PAZAAK_SEED)
        #[arg(long)]
        seed: Option<u64>,
        /// Number of matches to play
        #[arg(long, default_value_t = 1)]
        matches: u32,
        /// Pause between opponent actions in milliseconds (overrides PAZAAK_AI_DELAY_MS)
        #[arg(long = "delay-ms")]
        delay_ms: Option<u64>,
        /// Append one JSON line per finished round to this file
        #[arg(long)]
        log: Option<String>,
    },
    /// Let the computer play itself and print tallies
    Sim {
        #[arg(long, default_value_t = 100)]
        matches: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Inspect or edit your side deck
    Deck {
        #[command(subcommand)]
        action: DeckAction,
    },
    /// Show lifetime statistics
    Stats {
        /// Print as JSON
        #[arg(long)]
        json: bool,
        /// Reset all counters to zero
        #[arg(long)]
        reset: bool,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}

#[derive(Subcommand, Debug)]
pub enum DeckAction {
    /// Print the saved side deck
    Show,
    /// List every card a side deck can hold
    Options,
    /// Save a side deck of exactly four cards, e.g. `+3 -2 +-4 +1`
    Set {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        cards: Vec<String>,
    },
    /// Go back to the default side deck
    Reset,
}
