//! Statistics command: prints lifetime results, or resets them.

use std::io::Write;

use crate::error::CliError;
use crate::stats::Stats;
use crate::store::StatsStore;

/// Handle the stats command.
///
/// With `reset`, zeroes the stored counters before printing. With `json`,
/// prints the stored counters plus both rates as a JSON object.
pub fn handle_stats_command(
    json: bool,
    reset: bool,
    store: &dyn StatsStore,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    if reset {
        store.save_stats(&Stats::default())?;
        writeln!(out, "Statistics reset.")?;
        if !json {
            return Ok(());
        }
    }
    let stats = store.load_stats();

    if json {
        let mut value = serde_json::to_value(&stats).map_err(std::io::Error::other)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert("win_rate".into(), stats.win_rate().into());
            obj.insert("round_win_rate".into(), stats.round_win_rate().into());
        }
        let json_str = serde_json::to_string_pretty(&value).map_err(std::io::Error::other)?;
        writeln!(out, "{}", json_str)?;
        return Ok(());
    }

    writeln!(
        out,
        "Matches: {} played, {} won, {} lost ({}% won)",
        stats.total_matches,
        stats.matches_won,
        stats.matches_lost,
        stats.win_rate()
    )?;
    writeln!(
        out,
        "Rounds: {} won, {} lost, {} tied ({}% of decided rounds won)",
        stats.rounds_won,
        stats.rounds_lost,
        stats.rounds_tied,
        stats.round_win_rate()
    )?;
    writeln!(
        out,
        "Win streak: {} (best {})",
        stats.win_streak, stats.best_win_streak
    )?;
    writeln!(out, "Perfect matches: {}", stats.perfect_matches)?;
    if let Some(ts) = &stats.last_played {
        writeln!(out, "Last played: {}", ts)?;
    }
    Ok(())
}
