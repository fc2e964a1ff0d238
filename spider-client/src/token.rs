//! Durable storage for the credential token.
//!
//! The gateway keeps the token in memory and mirrors it into a
//! [`TokenStore`] so it survives restarts. A store holds exactly one entry,
//! keyed by [`TOKEN_STORAGE_KEY`].

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

/// Key of the single token entry.
pub const TOKEN_STORAGE_KEY: &str = "douyin_cookie";

#[derive(Debug, thiserror::Error)]
pub enum TokenStoreError {
    #[error("Token store I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Durable backing for the gateway's token.
///
/// `load` returns `Ok(None)` when nothing has been stored yet.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>, TokenStoreError>;

    async fn save(&self, token: &str) -> Result<(), TokenStoreError>;
}

/// Token persisted as a plain file named after [`TOKEN_STORAGE_KEY`].
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store the token inside `dir`. The directory is created on first save.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(TOKEN_STORAGE_KEY),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> TokenStoreError {
        TokenStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    /// Surrounding whitespace (a trailing newline from a hand-edited file)
    /// is dropped; a blank file counts as no token.
    async fn load(&self) -> Result<Option<String>, TokenStoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    async fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }
        tokio::fs::write(&self.path, token)
            .await
            .map_err(|e| self.io_error(e))?;
        tracing::debug!("Saved token to {}", self.path.display());
        Ok(())
    }
}

/// In-process store, for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    value: Mutex<Option<String>>,
    loads: AtomicUsize,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `token`, as if written by an earlier run.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(token.into())),
            loads: AtomicUsize::new(0),
        }
    }

    /// Number of `load` calls served so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn current(&self) -> Option<String> {
        self.value.lock().ok().and_then(|v| v.clone())
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn load(&self) -> Result<Option<String>, TokenStoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.current())
    }

    async fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Ok(mut value) = self.value.lock() {
            *value = Some(token.to_string());
        }
        Ok(())
    }
}
