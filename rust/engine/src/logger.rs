use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::cards::Card;
use crate::game::Seat;
use crate::rules::RoundOutcome;
use crate::snapshot::{SeatView, Snapshot};

/// Final state of one seat when the round ended.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct SeatRecord {
    /// Cards on the board, in play order
    pub cards: Vec<Card>,
    pub score: i32,
    pub standing: bool,
    pub busted: bool,
    /// Round wins after this round was scored
    pub rounds_won: u8,
}

impl From<&SeatView> for SeatRecord {
    fn from(view: &SeatView) -> Self {
        Self {
            cards: view.played.clone(),
            score: view.score,
            standing: view.standing,
            busted: view.busted,
            rounds_won: view.rounds_won,
        }
    }
}

/// One finished round, serialized as a single JSONL line.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Identifier of the match this round belongs to (format: YYYYMMDD-NNNNNN)
    pub match_id: String,
    /// Engine seed, for replaying the match
    pub seed: Option<u64>,
    pub round: u32,
    pub first: Seat,
    pub player: SeatRecord,
    pub opponent: SeatRecord,
    pub outcome: Option<RoundOutcome>,
    /// Timestamp when the round ended (RFC3339)
    #[serde(default)]
    pub ts: Option<String>,
}

impl RoundRecord {
    pub fn from_snapshot(match_id: &str, seed: Option<u64>, snapshot: &Snapshot) -> Self {
        Self {
            match_id: match_id.to_string(),
            seed,
            round: snapshot.round,
            first: snapshot.first,
            player: SeatRecord::from(&snapshot.player),
            opponent: SeatRecord::from(&snapshot.opponent),
            outcome: snapshot.last_outcome,
            ts: None,
        }
    }
}

pub fn format_match_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Appends [`RoundRecord`]s to a JSONL file and hands out match ids.
pub struct RoundLogger {
    writer: Option<BufWriter<File>>,
    date: String,
    seq: u32,
}

impl RoundLogger {
    /// Opens `path` for appending, creating parent directories as needed.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(f)),
            date: Utc::now().format("%Y%m%d").to_string(),
            seq: 0,
        })
    }

    /// A logger that writes nowhere, with a fixed date for its ids.
    pub fn detached(date: &str) -> Self {
        Self {
            writer: None,
            date: date.to_string(),
            seq: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.seq += 1;
        format_match_id(&self.date, self.seq)
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        if let Some(w) = &mut self.writer {
            w.write_all(line.as_bytes())?;
            w.write_all(b"\n")?;
            w.flush()?;
        }
        Ok(())
    }
}
