mod config;
pub mod database;

pub use config::{AssistantConfig, Config, RemindersConfig, ThresholdsConfig};
pub use database::{keys, Database};

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the data directory, creating it if needed.
///
/// `HEARTHKEEP_DATA_DIR` wins when set. Otherwise `~/.config/hearthkeep`,
/// or `~/.config/hearthkeep-dev` when `HEARTHKEEP_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("HEARTHKEEP_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("HEARTHKEEP_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("hearthkeep-dev")
            } else {
                base_dir.join("hearthkeep")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
