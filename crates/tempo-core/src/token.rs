//! Credential storage and change notification.
//!
//! The bearer token is the only durable state in the client core. It lives
//! in a single-value store with a pluggable backend (file for production,
//! in-memory for tests) and a `watch` channel so the session controller,
//! the navigation guard, and the API boundary observe changes instead of
//! polling. Tokens are never logged or displayed in full.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Opaque bearer token string.
///
/// The contents are not validated or interpreted; `Debug` redacts the value.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw token for building an `Authorization` header.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(<{} bytes redacted>)", self.0.len())
    }
}

/// Persistence backend for the single credential slot.
pub trait TokenBackend: Send + Sync {
    fn load(&self) -> Result<Option<Credential>>;
    fn store(&self, token: &Credential) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// On-disk JSON file shape: `{"token": "..."}`.
#[derive(Serialize, Deserialize)]
struct TokenFile {
    token: Credential,
}

/// Durable backend writing `token.json` with restricted permissions (0600).
pub struct FileTokenBackend {
    path: PathBuf,
}

impl FileTokenBackend {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenBackend for FileTokenBackend {
    fn load(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read token from {}", self.path.display()))?;
        let file: TokenFile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse token file {}", self.path.display()))?;

        if file.token.is_empty() {
            return Ok(None);
        }
        Ok(Some(file.token))
    }

    fn store(&self, token: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(&TokenFile {
            token: token.clone(),
        })
        .context("Failed to serialize token")?;

        // Write with restricted permissions
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }
}

/// Volatile backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryTokenBackend {
    slot: Mutex<Option<Credential>>,
}

impl TokenBackend for MemoryTokenBackend {
    fn load(&self) -> Result<Option<Credential>> {
        Ok(self.slot.lock().expect("token slot poisoned").clone())
    }

    fn store(&self, token: &Credential) -> Result<()> {
        *self.slot.lock().expect("token slot poisoned") = Some(token.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.lock().expect("token slot poisoned") = None;
        Ok(())
    }
}

/// Single-value credential store with change notification.
///
/// Writes go to the backend first, then to the watch channel, so observers
/// only ever see a value that has been durably persisted.
pub struct TokenStore {
    backend: Box<dyn TokenBackend>,
    current: watch::Sender<Option<Credential>>,
}

impl TokenStore {
    /// Creates a store over `backend`, reading the initial value from it.
    pub fn new(backend: Box<dyn TokenBackend>) -> Result<Self> {
        let initial = backend.load()?;
        Ok(Self {
            backend,
            current: watch::Sender::new(initial),
        })
    }

    /// File-backed store at `path`.
    pub fn file(path: PathBuf) -> Result<Self> {
        Self::new(Box::new(FileTokenBackend::new(path)))
    }

    /// In-memory store starting empty.
    pub fn in_memory() -> Self {
        Self {
            backend: Box::new(MemoryTokenBackend::default()),
            current: watch::Sender::new(None),
        }
    }

    /// Returns the current credential, if any.
    pub fn get(&self) -> Option<Credential> {
        self.current.borrow().clone()
    }

    /// Persists `token` and notifies observers.
    pub fn set(&self, token: Credential) -> Result<()> {
        self.backend.store(&token)?;
        self.current.send_replace(Some(token));
        Ok(())
    }

    /// Removes the persisted credential and notifies observers.
    pub fn clear(&self) -> Result<()> {
        self.backend.clear()?;
        self.current.send_replace(None);
        Ok(())
    }

    /// Change notification stream. The receiver always starts at the
    /// current value.
    pub fn subscribe(&self) -> watch::Receiver<Option<Credential>> {
        self.current.subscribe()
    }
}
