//! # GameVault Application Library
//!
//! Composition root for the `gamevault` binary: it loads configuration,
//! builds the two stores once, and routes commands to them.
//!
//! ## Module Organization
//! ```text
//! gamevault_app/
//! ├── lib.rs          ◄─── You are here (App, CLI, run)
//! ├── config.rs       ◄─── AppConfig (TOML + env)
//! ├── state/
//! │   ├── mod.rs      ◄─── Store exports
//! │   ├── auth.rs     ◄─── AuthStore (persisted session)
//! │   └── catalog.rs  ◄─── CatalogStore (fetch + fallback)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── auth.rs     ◄─── login / register / logout / profile
//! │   ├── catalog.rs  ◄─── games / game
//! │   └── config.rs   ◄─── config [--write]
//! └── error.rs        ◄─── AppError, ApiError
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use gamevault_client::{MockAuthBackend, RawgSource};
use gamevault_core::AUTH_SNAPSHOT_VERSION;
use gamevault_db::{Database, DbConfig, Persistence};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::AppConfig;
use error::{ApiError, AppResult};
use state::{AuthStore, CatalogStore};

// =============================================================================
// Command Line
// =============================================================================

/// Browse the game catalog and manage a demo account.
#[derive(Debug, Parser)]
#[command(name = "gamevault", version, about)]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in (demo account: demo@example.com / password)
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and sign in with it
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },

    /// Sign out
    Logout,

    /// Show the signed-in user
    Profile,

    /// List games
    Games {
        /// Case-insensitive name search
        #[arg(long)]
        search: Option<String>,

        /// Only games with this genre id
        #[arg(long)]
        genre: Option<u64>,
    },

    /// Show one game
    Game { id: u64 },

    /// Show the effective configuration
    Config {
        /// Also write it to the config file
        #[arg(long)]
        write: bool,
    },
}

// =============================================================================
// Application
// =============================================================================

/// Everything a command may need, built once per process.
#[derive(Debug)]
pub struct App {
    pub config: AppConfig,
    pub auth: AuthStore,
    pub catalog: CatalogStore,
    db: Database,
}

impl App {
    /// Opens storage and builds both stores.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. Resolve database path ── config / GAMEVAULT_DB_PATH / data dir     │
    /// │  2. Connect to database ──── SQLite, WAL mode, run migrations          │
    /// │  3. AuthStore::rehydrate ─── restore session from "auth-storage"       │
    /// │  4. CatalogStore::new ────── RAWG source + overlap policy              │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn start(config: AppConfig) -> AppResult<Self> {
        let db_path = config.database_path()?;
        info!(?db_path, "Database path determined");

        let db = Database::new(DbConfig::new(db_path)).await?;
        info!("Database connected and migrations applied");

        Self::with_database(config, db).await
    }

    /// Builds the stores over an already opened database.
    pub async fn with_database(config: AppConfig, db: Database) -> AppResult<Self> {
        let persistence = Persistence::new(
            Arc::new(db.storage()),
            config.storage.namespace.clone(),
            AUTH_SNAPSHOT_VERSION,
        );
        let backend = Arc::new(MockAuthBackend::new(config.auth_delay()));
        let auth = AuthStore::rehydrate(backend, Some(persistence)).await;

        let source = RawgSource::new(config.source_config())?;
        let catalog = CatalogStore::new(Arc::new(source), config.overlap_policy());

        info!(
            authenticated = auth.is_authenticated(),
            policy = %catalog.policy(),
            "State initialized"
        );

        Ok(App {
            config,
            auth,
            catalog,
            db,
        })
    }

    pub async fn shutdown(self) {
        self.db.close().await;
    }
}

// =============================================================================
// Entry Points
// =============================================================================

/// Runs one command and renders its result.
///
/// Returns the text to print; failures come back as [`ApiError`] so the
/// caller can render them the same way in both output modes.
pub async fn run(cli: Cli) -> Result<String, ApiError> {
    let config = AppConfig::load(cli.config.clone()).map_err(error::AppError::from)?;

    let app = App::start(config).await?;

    let output = execute(&app, cli.command, cli.json, cli.config).await;
    app.shutdown().await;
    Ok(output?)
}

async fn execute(
    app: &App,
    command: Command,
    json: bool,
    config_path: Option<PathBuf>,
) -> AppResult<String> {
    match command {
        Command::Login { email, password } => {
            render(&commands::auth::login(&app.auth, &email, &password).await?, json)
        }
        Command::Register {
            username,
            email,
            password,
            confirm_password,
        } => render(
            &commands::auth::register(&app.auth, &username, &email, &password, &confirm_password)
                .await?,
            json,
        ),
        Command::Logout => render(&commands::auth::logout(&app.auth).await, json),
        Command::Profile => render(&commands::auth::profile(&app.auth)?, json),
        Command::Games { search, genre } => render(
            &commands::catalog::list_games(&app.catalog, search.as_deref(), genre).await,
            json,
        ),
        Command::Game { id } => {
            render(&commands::catalog::game_details(&app.catalog, id).await?, json)
        }
        Command::Config { write } => {
            commands::config::show_config(&app.config, write, config_path, json)
        }
    }
}

fn render<T: Serialize + std::fmt::Display>(value: &T, json: bool) -> AppResult<String> {
    if json {
        Ok(serde_json::to_string_pretty(value)?)
    } else {
        Ok(value.to_string())
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays parseable.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=gamevault=trace` - Show trace for gamevault crates only
/// - Default: `info,gamevault=debug,sqlx=warn`
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,gamevault=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use gamevault_core::DEMO_PASSWORD;

    fn test_config(db_path: PathBuf) -> AppConfig {
        let mut config = AppConfig::default();
        config.auth.simulated_delay_ms = 0;
        config.catalog.base_url = "http://127.0.0.1:1/api".into();
        config.catalog.request_timeout_secs = 2;
        config.storage.database_path = Some(db_path);
        config
    }

    #[test]
    fn test_cli_parses_register() {
        let cli = Cli::try_parse_from([
            "gamevault",
            "--json",
            "register",
            "--username",
            "alice",
            "--email",
            "alice@example.com",
            "--password",
            "pw",
            "--confirm-password",
            "pw",
        ])
        .unwrap();

        assert!(cli.json);
        assert!(matches!(cli.command, Command::Register { .. }));
    }

    #[test]
    fn test_cli_parses_config_write() {
        let cli = Cli::try_parse_from(["gamevault", "config", "--write"]).unwrap();
        assert!(matches!(cli.command, Command::Config { write: true }));
    }

    #[test]
    fn test_cli_parses_games_filters() {
        let cli =
            Cli::try_parse_from(["gamevault", "games", "--search", "zelda", "--genre", "4"]).unwrap();
        match cli.command {
            Command::Games { search, genre } => {
                assert_eq!(search.as_deref(), Some("zelda"));
                assert_eq!(genre, Some(4));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_session_survives_process_restart() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("gamevault.db");

        let app = App::start(test_config(db_path.clone())).await.unwrap();
        execute(
            &app,
            Command::Login {
                email: "demo@example.com".into(),
                password: DEMO_PASSWORD.into(),
            },
            false,
            None,
        )
        .await
        .unwrap();
        app.shutdown().await;

        let app = App::start(test_config(db_path)).await.unwrap();
        let profile = execute(&app, Command::Profile, false, None).await.unwrap();
        assert!(profile.starts_with("demo\ndemo@example.com"));

        let profile = execute(&app, Command::Profile, true, None).await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&profile).unwrap();
        assert_eq!(json["username"], "demo");
        assert_eq!(json["id"], "1");

        execute(&app, Command::Logout, false, None).await.unwrap();
        let err = execute(&app, Command::Profile, false, None).await.unwrap_err();
        assert_eq!(ApiError::from(err).code, error::ErrorCode::Unauthenticated);
        app.shutdown().await;
    }

    #[tokio::test]
    async fn test_games_json_with_unreachable_source() {
        let dir = tempfile::tempdir().unwrap();
        let app = App::start(test_config(dir.path().join("gamevault.db")))
            .await
            .unwrap();

        let output = execute(
            &app,
            Command::Games {
                search: None,
                genre: None,
            },
            true,
            None,
        )
        .await
        .unwrap();

        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["outcome"]["outcome"], "fallback");
        assert!(json["notice"].is_string());
        assert!(!json["games"].as_array().unwrap().is_empty());
        app.shutdown().await;
    }
}
