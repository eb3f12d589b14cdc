//! Durable credential stores.
//!
//! Tokens live under two keys, `authToken` and `refreshToken`, in whatever
//! backend the application picks: the OS keyring for desktop shells, a JSON
//! file for headless tools, or memory for tests and throwaway sessions.

use crate::{Error, ErrorContext, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

pub const ACCESS_TOKEN_KEY: &str = "authToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// The persisted token pair. Both tokens are opaque to the client.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(
        rename = "authToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub access_token: Option<String>,
    #[serde(
        rename = "refreshToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub refresh_token: Option<String>,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none() && self.refresh_token.is_none()
    }
}

// Tokens must never end up in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Key-value persistence for the token pair, surviving process restarts.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Credentials>;
    /// Replace the stored pair. A `None` token is removed from storage.
    fn persist(&self, credentials: &Credentials) -> Result<()>;
    fn clear(&self) -> Result<()>;
    fn name(&self) -> &'static str;
}

fn storage_error(store: &str, msg: impl Into<String>) -> Error {
    Error::storage_with_context(msg, ErrorContext::new().with_source(store.to_string()))
}

/// Process-local store.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Credentials>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            inner: RwLock::new(credentials),
        }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Result<Credentials> {
        self.inner
            .read()
            .map(|c| c.clone())
            .map_err(|_| storage_error("memory_store", "MemoryStore poisoned"))
    }

    fn persist(&self, credentials: &Credentials) -> Result<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| storage_error("memory_store", "MemoryStore poisoned"))?;
        *guard = credentials.clone();
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.persist(&Credentials::default())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// OS keyring store (Keychain, Secret Service, Windows Credential Manager).
pub struct KeyringStore {
    service: String,
}

impl KeyringStore {
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, key)
            .map_err(|e| storage_error("keyring_store", format!("keyring entry {}: {}", key, e)))
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(v) => Ok(Some(v)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(storage_error(
                "keyring_store",
                format!("read {}: {}", key, e),
            )),
        }
    }

    fn write(&self, key: &str, value: Option<&str>) -> Result<()> {
        let entry = self.entry(key)?;
        let res = match value {
            Some(v) => entry.set_password(v),
            None => match entry.delete_password() {
                Err(keyring::Error::NoEntry) => Ok(()),
                other => other,
            },
        };
        res.map_err(|e| storage_error("keyring_store", format!("write {}: {}", key, e)))
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new("physio-client")
    }
}

impl CredentialStore for KeyringStore {
    fn load(&self) -> Result<Credentials> {
        Ok(Credentials {
            access_token: self.read(ACCESS_TOKEN_KEY)?,
            refresh_token: self.read(REFRESH_TOKEN_KEY)?,
        })
    }

    fn persist(&self, credentials: &Credentials) -> Result<()> {
        self.write(ACCESS_TOKEN_KEY, credentials.access_token.as_deref())?;
        self.write(REFRESH_TOKEN_KEY, credentials.refresh_token.as_deref())
    }

    fn clear(&self) -> Result<()> {
        self.persist(&Credentials::default())
    }

    fn name(&self) -> &'static str {
        "keyring"
    }
}

/// JSON file store: `{"authToken": "...", "refreshToken": "..."}`.
///
/// Writes go to a sibling temp file first and are renamed into place.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileStore {
    fn load(&self) -> Result<Credentials> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Credentials::default())
            }
            Err(e) => {
                return Err(storage_error(
                    "file_store",
                    format!("read {}: {}", self.path.display(), e),
                ))
            }
        };
        if raw.trim().is_empty() {
            return Ok(Credentials::default());
        }
        serde_json::from_str(&raw).map_err(|e| {
            storage_error(
                "file_store",
                format!("parse {}: {}", self.path.display(), e),
            )
        })
    }

    fn persist(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    storage_error("file_store", format!("create {}: {}", parent.display(), e))
                })?;
            }
        }
        let body = serde_json::to_vec_pretty(credentials)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, body)
            .and_then(|_| std::fs::rename(&tmp, &self.path))
            .map_err(|e| {
                storage_error(
                    "file_store",
                    format!("write {}: {}", self.path.display(), e),
                )
            })
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(
                "file_store",
                format!("remove {}: {}", self.path.display(), e),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
