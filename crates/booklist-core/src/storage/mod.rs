mod config;

pub use config::{Config, DisplayConfig, LoggingConfig, SeedConfig};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns `~/.config/booklist[-dev]/` based on BOOKLIST_ENV.
///
/// Set BOOKLIST_ENV=dev to use the development directory, or
/// BOOKLIST_CONFIG_DIR to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("BOOKLIST_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("BOOKLIST_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("booklist-dev")
            } else {
                base_dir.join("booklist")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DirUnavailable {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
