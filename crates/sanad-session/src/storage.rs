//! Persistent storage for the authentication session
//!
//! Uses JSON file storage in ~/.config/sanad/session.json holding the two
//! persisted keys: `auth_token` and `auth_user`.

use sanad_core::Customer;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Configuration directory not found")]
    NoConfigDir,
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// On-disk layout of the session file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredSession {
    #[serde(default)]
    auth_token: Option<String>,
    #[serde(default)]
    auth_user: Option<Customer>,
}

/// File-backed store for the session token and user profile.
///
/// The two keys are written and removed together; a file holding only one of
/// them is treated as empty on load.
pub struct SessionStorage {
    /// Path to the storage file
    path: PathBuf,
}

impl SessionStorage {
    /// Create a storage handle at the default path (~/.config/sanad/session.json)
    pub fn new() -> StorageResult<Self> {
        Ok(Self::with_path(Self::default_path()?))
    }

    /// Create a storage handle at a specific path
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Get the default storage path
    fn default_path() -> StorageResult<PathBuf> {
        let config_dir = dirs::config_dir().ok_or(StorageError::NoConfigDir)?;
        Ok(config_dir.join("sanad").join("session.json"))
    }

    /// Load the persisted token and user, if both are present and well-formed.
    ///
    /// Read or parse failures degrade to `None` rather than propagating, so a
    /// corrupt session file behaves like a logged-out state.
    pub fn load(&self) -> Option<(String, Customer)> {
        if !self.path.exists() {
            debug!("No session file at {:?}", self.path);
            return None;
        }
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read session file, treating as logged out: {}", e);
                return None;
            }
        };
        let stored: StoredSession = match serde_json::from_str(&contents) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Failed to parse session file, treating as logged out: {}", e);
                return None;
            }
        };
        match (stored.auth_token, stored.auth_user) {
            (Some(token), Some(user)) => {
                info!("Restored session for {}", user.email);
                Some((token, user))
            }
            (None, None) => None,
            _ => {
                warn!("Session file holds only one of token/user, treating as logged out");
                None
            }
        }
    }

    /// Persist both keys, creating the parent directory if needed.
    pub fn store(&self, token: &str, user: &Customer) -> StorageResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let stored = StoredSession {
            auth_token: Some(token.to_string()),
            auth_user: Some(user.clone()),
        };
        let json = serde_json::to_string_pretty(&stored)?;
        std::fs::write(&self.path, json)?;
        debug!("Saved session to {:?}", self.path);
        Ok(())
    }

    /// Remove both persisted keys. Safe to call when nothing is stored.
    pub fn clear(&self) -> StorageResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Removed persisted session");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether a session file currently exists on disk
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
