// Credential Store - durable key-value slots for the Notion token
use super::Credential;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("credential file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("credential file {path} is not valid JSON: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct StoredCredential {
    pub credential: Credential,
    pub saved_at: DateTime<Utc>,
}

pub trait CredentialStore: Send + Sync {
    fn read(&self, slot: &str) -> Result<Option<StoredCredential>, CredentialStoreError>;

    fn write(&self, slot: &str, token: &str) -> Result<StoredCredential, CredentialStoreError>;

    /// Returns whether the slot held a value.
    fn remove(&self, slot: &str) -> Result<bool, CredentialStoreError>;
}

/// On-disk record. The token is kept as plain text, like a browser's
/// local storage entry, and the file is restricted to its owner.
#[derive(Debug, Serialize, Deserialize)]
struct SlotRecord {
    token: String,
    saved_at: DateTime<Utc>,
}

/// All slots live in one JSON object keyed by slot name.
pub struct FileCredentialStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, SlotRecord>, CredentialStoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => return Err(self.io_error(source)),
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| CredentialStoreError::Format {
            path: self.path.clone(),
            source,
        })
    }

    fn persist(&self, slots: &BTreeMap<String, SlotRecord>) -> Result<(), CredentialStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let json = serde_json::to_string_pretty(slots).map_err(|source| {
            CredentialStoreError::Format {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(|e| self.io_error(e))?;
        set_owner_only(&self.path).map_err(|e| self.io_error(e))?;

        debug!(path = %self.path.display(), slots = slots.len(), "Credential file written");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> CredentialStoreError {
        CredentialStoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn read(&self, slot: &str) -> Result<Option<StoredCredential>, CredentialStoreError> {
        let _guard = self.lock.lock();
        let slots = self.load()?;
        Ok(slots.get(slot).map(|record| StoredCredential {
            credential: Credential::new(record.token.clone()),
            saved_at: record.saved_at,
        }))
    }

    fn write(&self, slot: &str, token: &str) -> Result<StoredCredential, CredentialStoreError> {
        let _guard = self.lock.lock();
        let mut slots = self.load()?;
        let saved_at = Utc::now();
        slots.insert(
            slot.to_string(),
            SlotRecord {
                token: token.to_string(),
                saved_at,
            },
        );
        self.persist(&slots)?;
        Ok(StoredCredential {
            credential: Credential::new(token),
            saved_at,
        })
    }

    fn remove(&self, slot: &str) -> Result<bool, CredentialStoreError> {
        let _guard = self.lock.lock();
        let mut slots = self.load()?;
        if slots.remove(slot).is_none() {
            return Ok(false);
        }
        self.persist(&slots)?;
        Ok(true)
    }
}

fn set_owner_only(path: &Path) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    }

    #[cfg(not(unix))]
    {
        let _ = path;
    }

    Ok(())
}

/// Process-local store, lost on exit.
#[derive(Default)]
pub struct MemoryCredentialStore {
    slots: Mutex<HashMap<String, StoredCredential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn read(&self, slot: &str) -> Result<Option<StoredCredential>, CredentialStoreError> {
        Ok(self.slots.lock().get(slot).cloned())
    }

    fn write(&self, slot: &str, token: &str) -> Result<StoredCredential, CredentialStoreError> {
        let stored = StoredCredential {
            credential: Credential::new(token),
            saved_at: Utc::now(),
        };
        self.slots.lock().insert(slot.to_string(), stored.clone());
        Ok(stored)
    }

    fn remove(&self, slot: &str) -> Result<bool, CredentialStoreError> {
        Ok(self.slots.lock().remove(slot).is_some())
    }
}
