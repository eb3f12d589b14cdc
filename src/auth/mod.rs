//! Authentication: ordered login strategies and session lifecycle calls.
//!
//! Login walks a list of [`AuthStrategy`] implementations in order and stops
//! at the first one that yields a token. The default list is
//! [`PrimaryLogin`] (`POST /auth/login/`) followed by [`LegacyTokenAuth`]
//! (the DRF `obtain_auth_token` endpoint next to the API root).

mod flows;
pub mod strategies;

pub use strategies::{LegacyTokenAuth, PrimaryLogin};

use crate::client::ApiClient;
use crate::types::user::User;
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// What the user typed into the login form. Either `email` or `username`
/// identifies the account.
#[derive(Clone, Default, PartialEq, Serialize)]
pub struct LoginCredentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub password: String,
}

impl LoginCredentials {
    pub fn with_username(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: Some(username.into()),
            email: None,
            password: password.into(),
        }
    }

    pub fn with_email(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: None,
            email: Some(email.into()),
            password: password.into(),
        }
    }

    /// Identifier for endpoints that only know `username`: email wins when both are set.
    pub fn identifier(&self) -> Option<&str> {
        self.email.as_deref().or(self.username.as_deref())
    }
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Normalized result of a successful login, whatever the endpoint returned.
#[derive(Clone)]
pub struct IssuedCredentials {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// The account, when the endpoint includes it.
    pub user: Option<User>,
    /// Name of the strategy that succeeded.
    pub strategy: &'static str,
    pub raw: serde_json::Value,
}

impl std::fmt::Debug for IssuedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IssuedCredentials")
            .field("access_token", &"<redacted>")
            .field("has_refresh_token", &self.refresh_token.is_some())
            .field("user", &self.user.as_ref().map(|u| u.id))
            .field("strategy", &self.strategy)
            .finish()
    }
}

/// One way of exchanging login credentials for a token.
///
/// Implementations must not touch the session; the client stores whatever the
/// winning strategy returns.
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    async fn authenticate(
        &self,
        client: &ApiClient,
        credentials: &LoginCredentials,
    ) -> Result<IssuedCredentials>;
}

pub fn default_strategies() -> Vec<Arc<dyn AuthStrategy>> {
    vec![Arc::new(PrimaryLogin), Arc::new(LegacyTokenAuth)]
}
