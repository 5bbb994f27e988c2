//! Persistence for the player's side deck and statistics.
//!
//! Commands only see the [`DeckStore`] and [`StatsStore`] traits. The binary
//! uses [`JsonFileStore`] under the configured data directory; tests use
//! [`MemoryStore`].

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use pazaak_engine::side_deck::{self, SideDeck};

use crate::error::CliError;
use crate::io_utils::{ensure_parent_dir, read_text};
use crate::stats::Stats;

pub const DECK_FILE: &str = "deck.json";
pub const STATS_FILE: &str = "stats.json";

pub trait DeckStore {
    /// Stored deck text, `None` if nothing was saved.
    fn load_deck_raw(&self) -> Result<Option<String>, CliError>;
    fn save_deck(&self, deck: &SideDeck) -> Result<(), CliError>;
    fn clear_deck(&self) -> Result<(), CliError>;

    /// The saved deck, or the default deck when none is saved or it is unreadable.
    fn load_deck(&self) -> SideDeck {
        match self.load_deck_raw() {
            Ok(raw) => side_deck::load_or_default(raw.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, "cannot read side deck, using default deck");
                SideDeck::default_deck()
            }
        }
    }
}

pub trait StatsStore {
    /// Stored statistics; missing or corrupt data yields zeroed stats.
    fn load_stats(&self) -> Stats;
    fn save_stats(&self, stats: &Stats) -> Result<(), CliError>;
}

/// JSON files in a data directory: `deck.json` and `stats.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn write(&self, name: &str, content: &str) -> Result<(), CliError> {
        let path = self.path(name);
        ensure_parent_dir(&path)?;
        std::fs::write(&path, content)?;
        Ok(())
    }
}

impl DeckStore for JsonFileStore {
    fn load_deck_raw(&self) -> Result<Option<String>, CliError> {
        Ok(read_text(&self.path(DECK_FILE))?)
    }

    fn save_deck(&self, deck: &SideDeck) -> Result<(), CliError> {
        self.write(DECK_FILE, &side_deck::to_json(deck))
    }

    fn clear_deck(&self) -> Result<(), CliError> {
        match std::fs::remove_file(self.path(DECK_FILE)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl StatsStore for JsonFileStore {
    fn load_stats(&self) -> Stats {
        let raw = match read_text(&self.path(STATS_FILE)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Stats::default(),
            Err(e) => {
                tracing::warn!(error = %e, "cannot read statistics, starting from zero");
                return Stats::default();
            }
        };
        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "corrupt statistics file, starting from zero");
            Stats::default()
        })
    }

    fn save_stats(&self, stats: &Stats) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(stats)
            .map_err(|e| CliError::InvalidInput(format!("cannot encode statistics: {}", e)))?;
        self.write(STATS_FILE, &json)
    }
}

/// In-memory store for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    deck: RwLock<Option<String>>,
    stats: RwLock<Stats>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding raw deck text, valid or not.
    pub fn with_deck_raw(raw: &str) -> Self {
        Self {
            deck: RwLock::new(Some(raw.to_string())),
            stats: RwLock::new(Stats::default()),
        }
    }

    pub fn stats(&self) -> Stats {
        self.load_stats()
    }
}

impl DeckStore for MemoryStore {
    fn load_deck_raw(&self) -> Result<Option<String>, CliError> {
        Ok(self.deck.read().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save_deck(&self, deck: &SideDeck) -> Result<(), CliError> {
        *self.deck.write().unwrap_or_else(|e| e.into_inner()) = Some(side_deck::to_json(deck));
        Ok(())
    }

    fn clear_deck(&self) -> Result<(), CliError> {
        *self.deck.write().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

impl StatsStore for MemoryStore {
    fn load_stats(&self) -> Stats {
        self.stats.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save_stats(&self, stats: &Stats) -> Result<(), CliError> {
        *self.stats.write().unwrap_or_else(|e| e.into_inner()) = stats.clone();
        Ok(())
    }
}
