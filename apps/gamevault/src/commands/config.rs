//! # Config Command
//!
//! Shows the effective configuration (file + environment + defaults) and,
//! on request, writes it out as the new config file.

use std::path::PathBuf;

use tracing::debug;

use crate::config::{AppConfig, ConfigError};
use crate::error::AppResult;

/// Renders the effective configuration.
///
/// ## Behavior
/// - The API key is masked in the output, never in the written file
/// - With `write`, the unmasked config is saved to `path` (or the platform
///   config file) and the output ends with where it went
pub fn show_config(
    config: &AppConfig,
    write: bool,
    path: Option<PathBuf>,
    json: bool,
) -> AppResult<String> {
    debug!(write, "config command");

    let mut shown = config.clone();
    if !shown.catalog.api_key.is_empty() {
        shown.catalog.api_key = "********".to_string();
    }

    let mut output = if json {
        serde_json::to_string_pretty(&shown)?
    } else {
        toml::to_string_pretty(&shown).map_err(ConfigError::from)?
    };

    if write {
        let written = config.save(path)?;
        if !json {
            output.push_str(&format!("\n# written to {}", written.display()));
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_is_masked() {
        let mut config = AppConfig::default();
        config.catalog.api_key = "s3cret".into();

        let output = show_config(&config, false, None, false).unwrap();
        assert!(output.contains("[catalog]"));
        assert!(!output.contains("s3cret"));

        let output = show_config(&config, false, None, true).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["catalog"]["api_key"], "********");
    }

    #[test]
    fn test_write_saves_unmasked_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gamevault.toml");

        let mut config = AppConfig::default();
        config.catalog.api_key = "s3cret".into();
        config.auth.simulated_delay_ms = 0;

        let output = show_config(&config, true, Some(path.clone()), false).unwrap();
        assert!(output.ends_with(&format!("# written to {}", path.display())));

        let loaded = AppConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.catalog.api_key, "s3cret");
        assert_eq!(loaded.auth.simulated_delay_ms, 0);
    }
}
