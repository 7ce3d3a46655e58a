//! # Application Configuration
//!
//! Settings for the catalog source, the mock auth backend and storage.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     GAMEVAULT_API_KEY=...                                              │
//! │     GAMEVAULT_OVERLAP_POLICY=last_response                             │
//! │                                                                         │
//! │  2. TOML Config File (--config PATH, or)                               │
//! │     ~/.config/gamevault/gamevault.toml (Linux)                         │
//! │     ~/Library/Application Support/com.gamevault.gamevault/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     RAWG base URL, 20 items per page, 1000 ms auth delay               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # gamevault.toml
//! [catalog]
//! base_url = "https://api.rawg.io/api"
//! api_key = "your-rawg-key"
//! page_size = 20
//! request_timeout_secs = 10
//! overlap_policy = "latest_request"  # latest_request | last_response
//!
//! [auth]
//! simulated_delay_ms = 1000
//!
//! [storage]
//! database_path = "/tmp/gamevault.db"  # optional
//! namespace = "auth-storage"
//! ```

use directories::ProjectDirs;
use gamevault_client::catalog_source::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use gamevault_client::CatalogSourceConfig;
use gamevault_core::{OverlapPolicy, AUTH_STORAGE_NAMESPACE, DEFAULT_AUTH_DELAY_MS, DEFAULT_PAGE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Largest page the RAWG API serves.
pub const MAX_PAGE_SIZE: u32 = 40;

const CONFIG_FILE_NAME: &str = "gamevault.toml";
const DATABASE_FILE_NAME: &str = "gamevault.db";

// =============================================================================
// Errors
// =============================================================================

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    #[error("Failed to save config: {0}")]
    SaveFailed(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// No platform directory could be determined for this user.
    #[error("Could not determine the {0} directory")]
    NoProjectDir(&'static str),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::SaveFailed(err.to_string())
    }
}

// =============================================================================
// Catalog Settings
// =============================================================================

/// Where the catalog comes from and how overlapping fetches resolve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// RAWG API key. Empty means every request fails and the seed list
    /// is shown.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub overlap_policy: OverlapPolicy,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_request_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            base_url: default_base_url(),
            api_key: String::new(),
            page_size: default_page_size(),
            request_timeout_secs: default_request_timeout(),
            overlap_policy: OverlapPolicy::default(),
        }
    }
}

// =============================================================================
// Auth Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSettings {
    /// Artificial latency of the mock backend.
    #[serde(default = "default_auth_delay")]
    pub simulated_delay_ms: u64,
}

fn default_auth_delay() -> u64 {
    DEFAULT_AUTH_DELAY_MS
}

impl Default for AuthSettings {
    fn default() -> Self {
        AuthSettings {
            simulated_delay_ms: default_auth_delay(),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// SQLite file. Defaults to the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Key the auth snapshot is stored under.
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_namespace() -> String {
    AUTH_STORAGE_NAMESPACE.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            namespace: default_namespace(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub auth: AuthSettings,

    #[serde(default)]
    pub storage: StorageSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`gamevault.toml`)
    /// 3. Environment variables
    ///
    /// An explicitly given path must exist; the default path may be absent.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let explicit = config_path.is_some();
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else if explicit {
                return Err(ConfigError::LoadFailed(format!(
                    "{} does not exist",
                    path.display()
                )));
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Saves configuration to file and returns where it went.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoProjectDir("config"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        info!(?path, "Config saved");
        Ok(path)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let url = &self.catalog.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::Invalid(format!(
                "catalog.base_url must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.catalog.page_size == 0 || self.catalog.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::Invalid(format!(
                "catalog.page_size must be between 1 and {}",
                MAX_PAGE_SIZE
            )));
        }

        if self.catalog.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "catalog.request_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.storage.namespace.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage.namespace must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// production).
    fn apply_overrides<F>(&mut self, var: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = var("GAMEVAULT_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.base_url = url;
        }

        if let Some(key) = var("GAMEVAULT_API_KEY") {
            self.catalog.api_key = key;
        }

        if let Some(size) = var("GAMEVAULT_PAGE_SIZE") {
            match size.parse::<u32>() {
                Ok(n) => self.catalog.page_size = n,
                Err(_) => warn!(value = %size, "Ignoring non-numeric GAMEVAULT_PAGE_SIZE"),
            }
        }

        if let Some(policy) = var("GAMEVAULT_OVERLAP_POLICY") {
            match policy.parse::<OverlapPolicy>() {
                Ok(parsed) => {
                    debug!(policy = %parsed, "Overriding overlap policy from environment");
                    self.catalog.overlap_policy = parsed;
                }
                Err(e) => warn!(error = %e, "Ignoring GAMEVAULT_OVERLAP_POLICY"),
            }
        }

        if let Some(delay) = var("GAMEVAULT_AUTH_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => self.auth.simulated_delay_ms = ms,
                Err(_) => warn!(value = %delay, "Ignoring non-numeric GAMEVAULT_AUTH_DELAY_MS"),
            }
        }

        if let Some(path) = var("GAMEVAULT_DB_PATH") {
            self.storage.database_path = Some(PathBuf::from(path));
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Resolves the SQLite file location.
    ///
    /// ## Platform-Specific Defaults
    /// - **macOS**: `~/Library/Application Support/com.gamevault.gamevault/gamevault.db`
    /// - **Windows**: `%APPDATA%\gamevault\gamevault\data\gamevault.db`
    /// - **Linux**: `~/.local/share/gamevault/gamevault.db`
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(ConfigError::NoProjectDir("data"))?;
        Ok(dirs.data_dir().join(DATABASE_FILE_NAME))
    }

    /// Settings for the HTTP catalog source.
    pub fn source_config(&self) -> CatalogSourceConfig {
        CatalogSourceConfig::new(self.catalog.base_url.clone())
            .api_key(self.catalog.api_key.clone())
            .page_size(self.catalog.page_size)
            .timeout(Duration::from_secs(self.catalog.request_timeout_secs))
    }

    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth.simulated_delay_ms)
    }

    pub fn overlap_policy(&self) -> OverlapPolicy {
        self.catalog.overlap_policy
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "gamevault", "gamevault")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.catalog.base_url, "https://api.rawg.io/api");
        assert_eq!(config.catalog.page_size, 20);
        assert_eq!(config.catalog.overlap_policy, OverlapPolicy::LatestRequest);
        assert_eq!(config.auth_delay(), Duration::from_millis(1000));
        assert_eq!(config.storage.namespace, "auth-storage");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [catalog]
            api_key = "abc"
            overlap_policy = "last_response"
            "#,
        )
        .unwrap();

        assert_eq!(config.catalog.api_key, "abc");
        assert_eq!(config.catalog.overlap_policy, OverlapPolicy::LastResponse);
        assert_eq!(config.catalog.page_size, 20);
        assert_eq!(config.auth.simulated_delay_ms, 1000);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_overrides(vars(&[
            ("GAMEVAULT_CATALOG_URL", "http://localhost:9000/api"),
            ("GAMEVAULT_API_KEY", "k"),
            ("GAMEVAULT_PAGE_SIZE", "5"),
            ("GAMEVAULT_OVERLAP_POLICY", "lww"),
            ("GAMEVAULT_AUTH_DELAY_MS", "0"),
            ("GAMEVAULT_DB_PATH", "/tmp/gv.db"),
        ]));

        assert_eq!(config.catalog.base_url, "http://localhost:9000/api");
        assert_eq!(config.catalog.api_key, "k");
        assert_eq!(config.catalog.page_size, 5);
        assert_eq!(config.overlap_policy(), OverlapPolicy::LastResponse);
        assert_eq!(config.auth_delay(), Duration::ZERO);
        assert_eq!(config.database_path().unwrap(), PathBuf::from("/tmp/gv.db"));
    }

    #[test]
    fn test_malformed_env_values_are_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(vars(&[
            ("GAMEVAULT_PAGE_SIZE", "twenty"),
            ("GAMEVAULT_OVERLAP_POLICY", "whoever"),
        ]));

        assert_eq!(config.catalog.page_size, 20);
        assert_eq!(config.overlap_policy(), OverlapPolicy::LatestRequest);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        config.catalog.base_url = "ftp://games".into();
        assert!(config.validate().is_err());

        config.catalog.base_url = "http://localhost".into();
        config.catalog.page_size = 0;
        assert!(config.validate().is_err());

        config.catalog.page_size = MAX_PAGE_SIZE + 1;
        assert!(config.validate().is_err());

        config.catalog.page_size = MAX_PAGE_SIZE;
        assert!(config.validate().is_ok());

        config.storage.namespace = "  ".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("gamevault.toml");

        let mut config = AppConfig::default();
        config.catalog.api_key = "saved".into();
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[catalog]"));

        let loaded: AppConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_explicit_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ConfigError::LoadFailed(_))));
    }
}
