// turi-client/src/session.rs
// Session storage and expiry signalling

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;
use tracing::warn;

/// Stored bearer credential issued by the Auth Service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    #[serde(default)]
    pub username: Option<String>,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// Where the session credential lives
pub trait CredentialStore: Send + Sync + Debug {
    fn load(&self) -> Option<Credential>;
    fn save(&self, credential: &Credential) -> std::io::Result<()>;
    fn clear(&self) -> std::io::Result<()>;
}

/// JSON file credential store
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Option<Credential> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&json).ok()
    }

    fn save(&self, credential: &Credential) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(credential)?;
        fs::write(&self.path, json)
    }

    fn clear(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory credential store
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credential: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            credential: RwLock::new(Some(Credential::new(token))),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<Credential> {
        self.credential.read().ok().and_then(|c| c.clone())
    }

    fn save(&self, credential: &Credential) -> std::io::Result<()> {
        if let Ok(mut guard) = self.credential.write() {
            *guard = Some(credential.clone());
        }
        Ok(())
    }

    fn clear(&self) -> std::io::Result<()> {
        if let Ok(mut guard) = self.credential.write() {
            *guard = None;
        }
        Ok(())
    }
}

/// Session lifecycle notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// A request was rejected with 401; the credential is gone and the
    /// user has to log in again
    Expired,
}

/// Current session: credential lookup plus expiry broadcast
#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<dyn CredentialStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        let (events, _) = broadcast::channel(16);
        Self { store, events }
    }

    /// Session without any stored credential
    pub fn anonymous() -> Self {
        Self::new(Arc::new(MemoryCredentialStore::new()))
    }

    /// Bearer token, read from storage on every call
    pub fn token(&self) -> Option<String> {
        self.store.load().map(|c| c.token)
    }

    pub fn is_active(&self) -> bool {
        self.store.load().is_some()
    }

    /// Persist a credential obtained from the Auth Service
    pub fn sign_in(&self, credential: &Credential) -> std::io::Result<()> {
        self.store.save(credential)
    }

    /// Forget the credential without signalling expiry
    pub fn sign_out(&self) -> std::io::Result<()> {
        self.store.clear()
    }

    /// Clear the credential and notify subscribers
    pub fn expire(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear stored credential");
        }
        warn!("Session expired, credential cleared");
        // No subscribers is fine
        let _ = self.events.send(SessionEvent::Expired);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
