//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.

mod capacity;
mod extract;
mod hide;

pub use capacity::CapacityCommand;
pub use extract::ExtractCommand;
pub use hide::HideCommand;

use std::path::Path;

use anyhow::Result;
use stegim::config::Config;
use stegim::StegimError;

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self, config: &Config) -> Result<()>;
}

/// Rejects input paths that do not name an existing file.
fn require_file(path: &Path, what: &str) -> Result<(), StegimError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(StegimError::InvalidInput(format!(
            "{what} not found: {}",
            path.display()
        )))
    }
}
