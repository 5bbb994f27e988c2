//! Command handler modules for the Pazaak CLI.
//!
//! Each command lives in its own module with a consistent pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Dependency injection: output streams (`&mut dyn Write`), stdin and the
//!   deck/statistics stores are passed in as parameters
//! - Error propagation: all errors propagated via `CliError`

pub mod cfg;
pub mod deck;
pub mod play;
pub mod sim;
pub mod stats;

pub use cfg::handle_cfg_command;
pub use deck::handle_deck_command;
pub use play::{handle_play_command, PlayOptions};
pub use sim::handle_sim_command;
pub use stats::handle_stats_command;
