//! Lifetime win/loss statistics for the human seat.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use pazaak_engine::game::Seat;
use pazaak_engine::rules::RoundOutcome;

/// Persisted counters. Missing fields in stored data default to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub matches_won: u32,
    pub matches_lost: u32,
    pub rounds_won: u32,
    pub rounds_lost: u32,
    pub rounds_tied: u32,
    pub win_streak: u32,
    pub best_win_streak: u32,
    pub total_matches: u32,
    /// Matches won without dropping a round
    pub perfect_matches: u32,
    /// When the last match finished (RFC3339)
    pub last_played: Option<String>,
}

impl Stats {
    pub fn record_round(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Win(Seat::Player) => self.rounds_won += 1,
            RoundOutcome::Win(Seat::Opponent) => self.rounds_lost += 1,
            RoundOutcome::Tie => self.rounds_tied += 1,
        }
    }

    /// Records a finished match from the human seat's point of view.
    pub fn record_match(&mut self, won: bool, opponent_rounds: u8) {
        self.total_matches += 1;
        if won {
            self.matches_won += 1;
            self.win_streak += 1;
            self.best_win_streak = self.best_win_streak.max(self.win_streak);
            if opponent_rounds == 0 {
                self.perfect_matches += 1;
            }
        } else {
            self.matches_lost += 1;
            self.win_streak = 0;
        }
        self.last_played = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        tracing::debug!(
            won,
            total = self.total_matches,
            streak = self.win_streak,
            "match recorded"
        );
    }

    /// Match win rate as a whole percentage, 0 before any match.
    pub fn win_rate(&self) -> u32 {
        percent(self.matches_won, self.total_matches)
    }

    /// Share of decided rounds won, ties excluded.
    pub fn round_win_rate(&self) -> u32 {
        percent(self.rounds_won, self.rounds_won + self.rounds_lost)
    }
}

/// Rounds half up.
fn percent(part: u32, whole: u32) -> u32 {
    if whole == 0 {
        return 0;
    }
    let scaled = u64::from(part) * 200 + u64::from(whole);
    (scaled / (2 * u64::from(whole))) as u32
}
