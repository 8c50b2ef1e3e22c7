//! Session - the logged-in user's auth token
//!
//! The session is an explicit handle created once at startup and passed to
//! every component that talks to the backend. Its token is persisted in a
//! [`TokenStore`] under [`AUTH_TOKEN_KEY`], so a later process starts
//! already logged in; logout removes the key again.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::RwLock;

use crate::error::ClientResult;

/// Key the auth token is stored under
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Durable key-value store for session state
pub trait TokenStore: Send + Sync + fmt::Debug {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

// ============================================================================
// File Store
// ============================================================================

/// JSON file holding a flat string map
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> ClientResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_map(&self, map: &HashMap<String, String>) -> ClientResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(map)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut map = self.read_map()?;
        if map.remove(key).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

// ============================================================================
// Memory Store
// ============================================================================

/// Process-local store, nothing survives a restart
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(key);
        Ok(())
    }
}

// ============================================================================
// Session
// ============================================================================

/// Session data held in memory during the client's lifecycle.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    /// Token for the `Authorization: Token <value>` header.
    pub token: Option<String>,
    /// Display name of the current user, once fetched.
    pub username: Option<String>,
}

/// Shared session handle
///
/// Cloning is cheap; all clones observe the same token.
#[derive(Clone)]
pub struct Session {
    data: Arc<RwLock<SessionData>>,
    store: Arc<dyn TokenStore>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session").field("store", &self.store).finish_non_exhaustive()
    }
}

impl Session {
    /// Restore the session persisted in `store` (logged out if none)
    pub fn restore(store: Arc<dyn TokenStore>) -> ClientResult<Self> {
        let token = store.get(AUTH_TOKEN_KEY)?;
        if token.is_some() {
            tracing::debug!("Restored persisted session token");
        }
        Ok(Self {
            data: Arc::new(RwLock::new(SessionData {
                token,
                username: None,
            })),
            store,
        })
    }

    /// Logged-out session backed by a [`MemoryTokenStore`]
    pub fn in_memory() -> Self {
        Self {
            data: Arc::new(RwLock::new(SessionData::default())),
            store: Arc::new(MemoryTokenStore::new()),
        }
    }

    /// Starts the session with a freshly issued token.
    pub async fn begin(&self, token: impl Into<String>) -> ClientResult<()> {
        let token = token.into();
        self.store.set(AUTH_TOKEN_KEY, &token)?;
        let mut data = self.data.write().await;
        data.token = Some(token);
        data.username = None;
        Ok(())
    }

    /// Ends the session: memory is cleared first, then the stored key.
    pub async fn end(&self) -> ClientResult<()> {
        {
            let mut data = self.data.write().await;
            data.token = None;
            data.username = None;
        }
        self.store.remove(AUTH_TOKEN_KEY)
    }

    pub async fn token(&self) -> Option<String> {
        self.data.read().await.token.clone()
    }

    /// Token presence only; validity is up to the backend.
    pub async fn is_authenticated(&self) -> bool {
        self.data.read().await.token.is_some()
    }

    pub async fn username(&self) -> Option<String> {
        self.data.read().await.username.clone()
    }

    pub async fn set_username(&self, username: impl Into<String>) {
        self.data.write().await.username = Some(username.into());
    }

    pub async fn snapshot(&self) -> SessionData {
        self.data.read().await.clone()
    }

    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }
}
