//! # Folio
//!
//! A portfolio backend with an admin back office and SEO controls, usable
//! both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! folio = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use folio::config::ServerConfig;
//! use folio::server::{AppState, create_router};
//! use folio::store::{SqliteStore, Store, seed::seed_defaults};
//!
//! let config = ServerConfig::default();
//! let store = SqliteStore::new(config.db_path()).unwrap();
//! store.initialize().unwrap();
//! seed_defaults(&store).unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store), config));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `folio` binary. Disable with `default-features = false`.

pub mod auth;
pub mod config;
pub mod error;
pub mod seo;
pub mod server;
pub mod store;
pub mod types;
pub mod uploads;
