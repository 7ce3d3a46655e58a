//! # Commands Module
//!
//! Every action the view layer can invoke, one module per store.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── auth.rs     ◄─── login, register, logout, profile
//! ├── catalog.rs  ◄─── list_games (home page), game_details
//! └── config.rs   ◄─── show_config (no store needed)
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  gamevault games --search witcher                                      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  commands::catalog::list_games(                                         │
//! │      &app.catalog,        ◄── only the store it needs                  │
//! │      Some("witcher"),     ◄── from CLI args                            │
//! │      None,                                                              │
//! │  ) -> GamesResponse                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  text (Display) or --json (Serialize)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod catalog;
pub mod config;
