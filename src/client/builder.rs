use crate::auth::{default_strategies, AuthStrategy};
use crate::client::core::ApiClient;
use crate::config::{ClientConfig, RetryConfig};
use crate::session::navigator::noop_navigator;
use crate::session::{CredentialStore, LoginNavigator, Session};
use crate::transport::HttpTransport;
use crate::Result;
use std::sync::Arc;
use tracing::debug;

use super::policy::RetryPolicy;

/// Builder for creating clients with custom configuration.
///
/// Keep this surface area small and predictable: everything has a default,
/// so `ApiClientBuilder::new().build()` yields a working client.
pub struct ApiClientBuilder {
    config: ClientConfig,
    base_url_override: Option<String>,
    retry: Option<RetryConfig>,
    session: Option<Arc<Session>>,
    store: Option<Arc<dyn CredentialStore>>,
    navigator: Arc<dyn LoginNavigator>,
    strategies: Option<Vec<Arc<dyn AuthStrategy>>>,
}

impl Default for ApiClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClientBuilder {
    /// Start from the environment-derived configuration.
    pub fn new() -> Self {
        Self::with_config(ClientConfig::from_env())
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config,
            base_url_override: None,
            retry: None,
            session: None,
            store: None,
            navigator: noop_navigator(),
            strategies: None,
        }
    }

    /// Override the base URL (mock servers, staging).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    pub fn retry(mut self, retry: RetryConfig) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Share an existing session, e.g. between two clients.
    pub fn session(mut self, session: Arc<Session>) -> Self {
        self.session = Some(session);
        self
    }

    /// Back a new session with `store`. Ignored when [`session`](Self::session) is set.
    pub fn credential_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Hook invoked when the session ends and the user must log in again.
    pub fn navigator(mut self, navigator: Arc<dyn LoginNavigator>) -> Self {
        self.navigator = navigator;
        self
    }

    /// Replace the ordered login strategies.
    pub fn auth_strategies(mut self, strategies: Vec<Arc<dyn AuthStrategy>>) -> Self {
        self.strategies = Some(strategies);
        self
    }

    pub fn build(self) -> Result<ApiClient> {
        let mut config = self.config;
        if let Some(url) = self.base_url_override {
            config.base_url = url;
        }
        if let Some(retry) = self.retry {
            config.retry = retry;
        }
        config.validate()?;

        let transport = HttpTransport::new(&config)?;
        let session = match (self.session, self.store) {
            (Some(session), _) => session,
            (None, Some(store)) => Arc::new(Session::open(store)?),
            (None, None) => Arc::new(Session::in_memory()),
        };
        let strategies = self.strategies.unwrap_or_else(default_strategies);

        debug!(
            base_url = config.base_url.as_str(),
            store = session.store_name(),
            strategies = strategies.len(),
            "api client built"
        );

        Ok(ApiClient {
            policy: RetryPolicy::new(&config.retry),
            config: Arc::new(config),
            transport: Arc::new(transport),
            session,
            navigator: self.navigator,
            strategies: Arc::new(strategies),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Credentials, MemoryStore};

    #[test]
    fn test_build_with_override_normalizes_base_url() {
        let client = ApiClientBuilder::with_config(ClientConfig::default())
            .base_url("http://127.0.0.1:9000/api/")
            .build()
            .unwrap();
        assert_eq!(client.config().base_url, "http://127.0.0.1:9000/api");
        assert!(!client.is_authenticated());
    }

    #[test]
    fn test_build_rejects_bad_base_url() {
        let res = ApiClientBuilder::with_config(ClientConfig::default())
            .base_url("ftp://example.com")
            .build();
        assert!(res.is_err());
    }

    #[test]
    fn test_store_restores_session() {
        let store = Arc::new(MemoryStore::with_credentials(Credentials::new(
            "abc",
            Some("xyz".into()),
        )));
        let client = ApiClientBuilder::with_config(ClientConfig::default())
            .credential_store(store)
            .build()
            .unwrap();
        assert!(client.is_authenticated());
        assert_eq!(client.session().refresh_token().as_deref(), Some("xyz"));
    }

    #[test]
    fn test_shared_session() {
        let session = Arc::new(Session::in_memory());
        let a = ApiClientBuilder::with_config(ClientConfig::default())
            .session(session.clone())
            .build()
            .unwrap();
        let b = ApiClientBuilder::with_config(ClientConfig::default())
            .session(session.clone())
            .build()
            .unwrap();
        session.set_credentials("abc", None).unwrap();
        assert!(a.is_authenticated());
        assert!(b.is_authenticated());
    }
}
