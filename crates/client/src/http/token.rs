//! Bearer token storage.
//!
//! The HTTP layer only ever reads the token. Writing it is the login flow's
//! job (CLI, tests), which is why the write helpers live on the concrete
//! stores rather than on the trait.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tokio::sync::RwLock;

/// Key (and file name) under which the bearer token is persisted.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Errors raised by a token store.
#[derive(Debug, Error)]
pub enum TokenStoreError {
    #[error("Token storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Token storage unavailable: {0}")]
    Unavailable(String),
}

/// Secure storage holding the session's bearer token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the current token, if any.
    ///
    /// # Errors
    ///
    /// Returns `TokenStoreError` if the underlying storage cannot be read.
    async fn read_token(&self) -> Result<Option<SecretString>, TokenStoreError>;
}

// =============================================================================
// In-memory store
// =============================================================================

/// Token store backed by process memory.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<SecretString>>,
}

impl MemoryTokenStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with `token`.
    #[must_use]
    pub fn with_token(token: SecretString) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }

    /// Replace the stored token.
    pub async fn set(&self, token: SecretString) {
        *self.token.write().await = Some(token);
    }

    /// Forget the stored token.
    pub async fn clear(&self) {
        *self.token.write().await = None;
    }
}

impl std::fmt::Debug for MemoryTokenStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryTokenStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn read_token(&self) -> Result<Option<SecretString>, TokenStoreError> {
        Ok(self.token.read().await.clone())
    }
}

// =============================================================================
// File store
// =============================================================================

/// Token store persisting the token in an `access_token` file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store keeping its file inside `dir`.
    #[must_use]
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(ACCESS_TOKEN_KEY),
        }
    }

    /// Path of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Persist `token`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns `TokenStoreError::Io` if the file cannot be written.
    pub async fn save(&self, token: &SecretString) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, token.expose_secret()).await?;
        Ok(())
    }

    /// Delete the token file. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns `TokenStoreError::Io` if the file exists but cannot be removed.
    pub async fn remove(&self) -> Result<(), TokenStoreError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn read_token(&self) -> Result<Option<SecretString>, TokenStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(SecretString::from(token)))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
