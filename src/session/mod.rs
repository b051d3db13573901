//! Authentication session lifecycle
//!
//! [`SessionStore`] is the single source of truth for who is logged in. It
//! owns the bearer token, persists it through a [`CredentialStore`] and
//! publishes every change on a `tokio::sync::watch` channel so views can
//! subscribe once and drop the receiver on teardown.
//!
//! Lifecycle:
//!
//! - [`SessionStore::hydrate`] reconciles a persisted token with the backend
//!   at startup. A rejected token is cleared silently.
//! - [`SessionStore::login`] and [`SessionStore::signup`] persist the new
//!   token and then replace the in-memory session. A failed call leaves the
//!   session untouched.
//! - [`SessionStore::logout`] clears memory and storage without contacting
//!   the backend.

pub mod credentials;

pub use credentials::{
    open_credential_store, CredentialStore, FileCredentialStore, KeyringCredentialStore,
    MemoryCredentialStore,
};

use std::fmt;

use tokio::sync::watch;

use crate::api::{ApiClient, AuthResponse, UserSummary};
use crate::error::Result;

/// The client's belief about the current user.
///
/// A user is only ever present together with a token. A token without a user
/// exists only while [`SessionStore::hydrate`] is validating it.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: Option<String>,
    user: Option<UserSummary>,
}

impl Session {
    /// Logged-out session.
    pub fn empty() -> Self {
        Self::default()
    }

    fn pending(token: String) -> Self {
        Self {
            token: Some(token),
            user: None,
        }
    }

    pub(crate) fn authenticated(token: String, user: UserSummary) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&UserSummary> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.token.is_none()
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("user", &self.user)
            .finish()
    }
}

/// Owner of the authentication state
#[derive(Debug)]
pub struct SessionStore {
    api: ApiClient,
    credentials: Box<dyn CredentialStore>,
    state: watch::Sender<Session>,
}

impl SessionStore {
    /// Create a store with an empty session. Call [`hydrate`](Self::hydrate)
    /// to pick up a persisted token.
    pub fn new(api: ApiClient, credentials: Box<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(Session::empty());
        Self {
            api,
            credentials,
            state,
        }
    }

    /// Snapshot of the current session.
    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn user(&self) -> Option<UserSummary> {
        self.state.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Receive every subsequent session change. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Reconcile the persisted token with the backend.
    ///
    /// Never fails: an unreadable store, a rejected token or an unreachable
    /// backend all end in a cleared token and an empty session.
    pub async fn hydrate(&self) -> Session {
        let token = match self.credentials.load() {
            Ok(Some(token)) => token,
            Ok(None) => {
                tracing::debug!("No persisted session token");
                self.publish(Session::empty());
                return self.session();
            }
            Err(e) => {
                tracing::warn!("Failed to read persisted session token: {}", e);
                self.discard_persisted();
                self.publish(Session::empty());
                return self.session();
            }
        };

        self.publish(Session::pending(token.clone()));

        match self.api.auth_me(Some(&token)).await {
            Ok(user) => {
                tracing::info!("Restored session for {}", user.username);
                self.publish(Session::authenticated(token, user));
            }
            Err(e) => {
                tracing::info!("Persisted session rejected ({}), signing out", e);
                self.discard_persisted();
                self.publish(Session::empty());
            }
        }

        self.session()
    }

    /// Log in with username and password.
    ///
    /// # Errors
    ///
    /// Returns the normalized login failure ("Login failed") or a storage
    /// error if the token could not be persisted. The session is unchanged in
    /// both cases.
    pub async fn login(&self, username: &str, password: &str) -> Result<UserSummary> {
        let response = self.api.auth_login(username, password).await?;
        self.install(response)
    }

    /// Create an account; a successful signup is also a login.
    ///
    /// # Errors
    ///
    /// Same contract as [`login`](Self::login), with "Signup failed".
    pub async fn signup(&self, username: &str, email: &str, password: &str) -> Result<UserSummary> {
        let response = self.api.auth_signup(username, email, password).await?;
        self.install(response)
    }

    /// Clear the session and the persisted token.
    ///
    /// The in-memory session is cleared even when removing the persisted
    /// token fails; that failure is returned.
    pub fn logout(&self) -> Result<()> {
        self.publish(Session::empty());
        self.credentials.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    fn install(&self, response: AuthResponse) -> Result<UserSummary> {
        let AuthResponse { token, user } = response;
        self.credentials.save(&token)?;
        tracing::info!("Signed in as {}", user.username);
        self.publish(Session::authenticated(token, user.clone()));
        Ok(user)
    }

    fn discard_persisted(&self) {
        if let Err(e) = self.credentials.clear() {
            tracing::warn!("Failed to clear persisted session token: {}", e);
        }
    }

    fn publish(&self, session: Session) {
        self.state.send_replace(session);
    }
}
