//! Eat Rate Love - restaurant review client library
//!
//! This library talks to an Eat Rate Love backend: it analyzes review
//! sentiment, stores and lists reviews, searches restaurants, and manages a
//! persisted login session.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `api`: HTTP client for every backend endpoint and the wire types
//! - `session`: Session lifecycle (hydrate, login, signup, logout) and
//!   credential persistence
//! - `app`: View state and user flows (analyze, search, review paging)
//! - `pagination`: Offset/limit pager and the allowed page sizes
//! - `storage`: Small key/value store for the token and preferences
//! - `preferences`: Color theme preference
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//! - `commands`: Command handlers and the interactive shell
//!
//! # Example
//!
//! ```no_run
//! use eatratelove::{ApiClient, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/config.yaml", &Default::default())?;
//!     config.validate()?;
//!
//!     let api = ApiClient::new(&config.api)?;
//!     let analysis = api.analyze_sentiment("Amazing food and great service!").await?;
//!     println!("{} {:?}", analysis.sentiment, analysis.keywords);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod pagination;
pub mod preferences;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use api::ApiClient;
pub use app::App;
pub use config::Config;
pub use error::{ApiOperation, EatRateLoveError, Result};
pub use pagination::{PageSize, Pager};
pub use session::{Session, SessionStore};
