//! Command handlers for the CLI
//!
//! Each subcommand builds the backend client, hydrates the persisted session
//! and then performs one operation. The `shell` command drives the same
//! operations interactively through [`crate::app::App`].

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::{EatRateLoveError, Result};
use crate::preferences::Preferences;
use crate::session::{open_credential_store, SessionStore};
use crate::storage::LocalStorage;

pub mod auth;
pub mod render;
pub mod restaurants;
pub mod reviews;
pub mod shell;
pub mod shell_commands;
pub mod social;
pub mod theme;

/// Everything a command needs: the backend client, a hydrated session and
/// display preferences.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub api: ApiClient,
    pub session: SessionStore,
    pub preferences: Preferences,
}

impl Context {
    /// Build the client and reconcile the persisted session with the backend.
    pub async fn open(config: Config) -> Result<Self> {
        let context = Self::open_offline(config)?;
        context.session.hydrate().await;
        Ok(context)
    }

    /// Build the client without contacting the backend.
    pub fn open_offline(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config.api)?;
        let credentials = open_credential_store(&config.storage, api.base_url())?;
        let session = SessionStore::new(api.clone(), credentials);
        let preferences = Preferences::new(local_storage(&config)?);
        Ok(Self {
            config,
            api,
            session,
            preferences,
        })
    }

    pub fn palette(&self) -> render::Palette {
        self.preferences.theme().into()
    }

    /// Token of the hydrated session, or an error naming the action that
    /// needs a login.
    pub fn require_token(&self, action: &str) -> Result<String> {
        self.session.token().ok_or_else(|| {
            EatRateLoveError::Validation(format!(
                "{} requires a login; run `eatratelove login` first",
                action
            ))
            .into()
        })
    }
}

fn local_storage(config: &Config) -> Result<LocalStorage> {
    match &config.storage.path {
        Some(dir) => LocalStorage::new_with_path(dir),
        None => LocalStorage::new(),
    }
}
