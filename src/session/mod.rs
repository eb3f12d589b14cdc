//! Session state: the token pair, its durable store and the refresh gate.
//!
//! A [`Session`] is an owned object injected into the client rather than
//! ambient global state. Several clients (or a client and a UI status bar) can
//! share one session through an `Arc`.

pub mod navigator;
pub mod refresh;
pub mod store;

pub use navigator::{ChannelNavigator, LoginNavigator, LoginReason, NoopNavigator, RecordingNavigator};
pub use refresh::{RefreshCoordinator, RefreshOutcome};
pub use store::{CredentialStore, Credentials, FileStore, KeyringStore, MemoryStore};

use crate::Result;
use arc_swap::ArcSwap;
use std::sync::{Arc, Mutex};
use tracing::debug;

pub struct Session {
    store: Arc<dyn CredentialStore>,
    current: ArcSwap<Credentials>,
    // Serializes read-modify-write updates; reads stay lock-free.
    write_lock: Mutex<()>,
    refresh: RefreshCoordinator,
}

impl Session {
    /// Open a session backed by `store`, restoring any persisted tokens.
    pub fn open(store: Arc<dyn CredentialStore>) -> Result<Self> {
        let restored = store.load()?;
        debug!(
            store = store.name(),
            has_access = restored.access_token.is_some(),
            has_refresh = restored.refresh_token.is_some(),
            "session restored"
        );
        Ok(Self {
            store,
            current: ArcSwap::from_pointee(restored),
            write_lock: Mutex::new(()),
            refresh: RefreshCoordinator::new(),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            store: Arc::new(MemoryStore::new()),
            current: ArcSwap::from_pointee(Credentials::default()),
            write_lock: Mutex::new(()),
            refresh: RefreshCoordinator::new(),
        }
    }

    /// Snapshot of the current pair.
    pub fn credentials(&self) -> Arc<Credentials> {
        self.current.load_full()
    }

    pub fn current_access_token(&self) -> Option<String> {
        self.current.load().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.current.load().refresh_token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.load().access_token.is_some()
    }

    /// Store a new access token. The refresh token is replaced only when one
    /// is given; `None` keeps the existing one.
    pub fn set_credentials(
        &self,
        access_token: impl Into<String>,
        refresh_token: Option<String>,
    ) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let previous = self.current.load();
        let next = Credentials {
            access_token: Some(access_token.into()),
            refresh_token: refresh_token.or_else(|| previous.refresh_token.clone()),
        };
        self.commit(next)
    }

    /// Replace both tokens at once (login). A missing refresh token clears the
    /// previous one so nothing from an earlier session survives.
    pub fn replace_credentials(&self, credentials: Credentials) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.commit(credentials)
    }

    /// Remove both tokens from memory and durable storage.
    pub fn clear_credentials(&self) -> Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.current.store(Arc::new(Credentials::default()));
        self.store.clear()
    }

    pub fn refresh_coordinator(&self) -> &RefreshCoordinator {
        &self.refresh
    }

    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    fn commit(&self, next: Credentials) -> Result<()> {
        // Memory first: requests in flight must see the new pair even if the
        // durable write fails.
        self.current.store(Arc::new(next.clone()));
        self.store.persist(&next)
    }
}
