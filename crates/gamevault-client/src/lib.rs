//! # gamevault-client: External Collaborators
//!
//! Everything the stores talk to outside their own state: the catalog data
//! source and the authentication backend. Both sit behind `async_trait`
//! seams so the stores can be driven by scripted implementations in tests.
//!
//! ## Modules
//!
//! - [`catalog_source`] - [`CatalogSource`] and the RAWG HTTP adapter
//! - [`wire`] - RAWG JSON DTOs and their mapping into `CatalogItem`
//! - [`auth_backend`] - [`AuthBackend`] and the mock with simulated latency
//! - [`error`] - [`ClientError`]
//!
//! ## Example
//!
//! ```rust,ignore
//! use gamevault_client::{CatalogSource, CatalogSourceConfig, RawgSource};
//!
//! let source = RawgSource::new(CatalogSourceConfig::default().api_key(key))?;
//! let games = source.fetch_games().await?;
//! ```

pub mod auth_backend;
pub mod catalog_source;
pub mod error;
pub mod wire;

pub use auth_backend::{AuthBackend, MockAuthBackend};
pub use catalog_source::{CatalogSource, CatalogSourceConfig, RawgSource};
pub use error::{ClientError, ClientResult};
