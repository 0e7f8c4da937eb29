// Credential Connector - configured/unconfigured state behind the "Connect Notion" dialog
use super::{Credential, CredentialStore, StoredCredential};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// What the UI is allowed to know about the credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConnectorStatus {
    pub slot: String,
    pub configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    pub fallback_available: bool,
}

pub struct CredentialConnector {
    store: Arc<dyn CredentialStore>,
    slot: String,
    stored: Option<StoredCredential>,
    fallback: Option<Credential>,
    input: String,
    dialog_open: bool,
}

impl CredentialConnector {
    /// Reads the slot once; a read failure leaves the connector unconfigured.
    pub fn new(store: Arc<dyn CredentialStore>, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let stored = match store.read(&slot) {
            Ok(stored) => stored.filter(|s| !s.credential.expose().is_empty()),
            Err(e) => {
                warn!(slot = %slot, error = %e, "Failed to read stored Notion credential");
                None
            }
        };

        Self {
            store,
            slot,
            stored,
            fallback: None,
            input: String::new(),
            dialog_open: false,
        }
    }

    /// Token used while nothing is stored in the slot.
    pub fn with_fallback(mut self, fallback: Option<Credential>) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    pub fn is_configured(&self) -> bool {
        self.stored.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.dialog_open
    }

    /// Pending, unsaved input. Never holds the stored secret.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn open(&mut self) {
        self.dialog_open = true;
    }

    pub fn close(&mut self) {
        self.dialog_open = false;
        self.input.clear();
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    /// Persists the pending input. Returns `false` when there was nothing to save.
    pub fn save(&mut self) -> bool {
        let token = self.input.trim().to_string();
        if token.is_empty() {
            return false;
        }

        let stored = match self.store.write(&self.slot, &token) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(slot = %self.slot, error = %e, "Failed to persist Notion credential");
                StoredCredential {
                    credential: Credential::new(token),
                    saved_at: Utc::now(),
                }
            }
        };

        info!(slot = %self.slot, "🔑 Notion credential saved");
        self.stored = Some(stored);
        self.input.clear();
        self.dialog_open = false;
        true
    }

    pub fn clear(&mut self) {
        if let Err(e) = self.store.remove(&self.slot) {
            warn!(slot = %self.slot, error = %e, "Failed to remove Notion credential");
        }
        info!(slot = %self.slot, "Notion credential cleared");
        self.stored = None;
        self.input.clear();
    }

    /// Credential to bind into tools: the stored one, else the fallback.
    pub fn credential(&self) -> Option<Credential> {
        self.stored
            .as_ref()
            .map(|stored| stored.credential.clone())
            .or_else(|| self.fallback.clone())
    }

    pub fn status(&self) -> ConnectorStatus {
        ConnectorStatus {
            slot: self.slot.clone(),
            configured: self.is_configured(),
            saved_at: self.stored.as_ref().map(|stored| stored.saved_at),
            fallback_available: self.fallback.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::{
        CredentialStoreError, FileCredentialStore, MemoryCredentialStore,
    };
    use tempfile::tempdir;

    const SLOT: &str = "notion_api_key";

    #[test]
    fn starts_unconfigured_and_closed() {
        let connector = CredentialConnector::new(Arc::new(MemoryCredentialStore::new()), SLOT);
        assert!(!connector.is_configured());
        assert!(!connector.is_open());
        assert_eq!(connector.input(), "");
        assert!(connector.credential().is_none());
    }

    #[test]
    fn saved_secret_survives_reinitialization() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("credentials.json");

        let mut connector = CredentialConnector::new(Arc::new(FileCredentialStore::new(&path)), SLOT);
        connector.open();
        connector.set_input("  secret_abc  ");
        assert!(connector.save());
        assert!(connector.is_configured());
        assert!(!connector.is_open());
        assert_eq!(connector.input(), "");

        let reloaded = CredentialConnector::new(Arc::new(FileCredentialStore::new(&path)), SLOT);
        assert!(reloaded.is_configured());
        assert_eq!(reloaded.credential().expect("credential").expose(), "secret_abc");
    }

    #[test]
    fn clear_resets_state_and_input() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("credentials.json");

        let mut connector = CredentialConnector::new(Arc::new(FileCredentialStore::new(&path)), SLOT);
        connector.set_input("secret_abc");
        connector.save();
        connector.set_input("typed but not saved");
        connector.clear();

        assert!(!connector.is_configured());
        assert_eq!(connector.input(), "");

        let reloaded = CredentialConnector::new(Arc::new(FileCredentialStore::new(&path)), SLOT);
        assert!(!reloaded.is_configured());
    }

    #[test]
    fn empty_input_is_not_saved() {
        let mut connector = CredentialConnector::new(Arc::new(MemoryCredentialStore::new()), SLOT);
        connector.set_input("   ");
        assert!(!connector.save());
        assert!(!connector.is_configured());
    }

    #[test]
    fn close_discards_pending_input() {
        let mut connector = CredentialConnector::new(Arc::new(MemoryCredentialStore::new()), SLOT);
        connector.open();
        connector.set_input("secret");
        connector.close();
        assert!(!connector.is_open());
        assert_eq!(connector.input(), "");
        assert!(!connector.is_configured());
    }

    #[test]
    fn fallback_is_used_only_without_stored_secret() {
        let mut connector = CredentialConnector::new(Arc::new(MemoryCredentialStore::new()), SLOT)
            .with_fallback(Some(Credential::new("env_token")));
        assert!(!connector.is_configured());
        assert_eq!(connector.credential().expect("fallback").expose(), "env_token");

        connector.set_input("stored_token");
        connector.save();
        assert_eq!(connector.credential().expect("stored").expose(), "stored_token");
        assert!(connector.status().fallback_available);
    }

    #[test]
    fn status_never_carries_the_secret() {
        let mut connector = CredentialConnector::new(Arc::new(MemoryCredentialStore::new()), SLOT);
        connector.set_input("secret_abc");
        connector.save();
        let rendered = serde_json::to_string(&connector.status()).expect("serialize");
        assert!(!rendered.contains("secret_abc"));
        assert!(rendered.contains("\"configured\":true"));
    }

    struct FailingStore;

    impl CredentialStore for FailingStore {
        fn read(&self, _slot: &str) -> Result<Option<StoredCredential>, CredentialStoreError> {
            Err(io_failure())
        }

        fn write(&self, _slot: &str, _token: &str) -> Result<StoredCredential, CredentialStoreError> {
            Err(io_failure())
        }

        fn remove(&self, _slot: &str) -> Result<bool, CredentialStoreError> {
            Err(io_failure())
        }
    }

    fn io_failure() -> CredentialStoreError {
        CredentialStoreError::Io {
            path: "unwritable".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        }
    }

    #[test]
    fn storage_failures_do_not_surface() {
        let mut connector = CredentialConnector::new(Arc::new(FailingStore), SLOT);
        assert!(!connector.is_configured());

        connector.set_input("secret");
        assert!(connector.save());
        assert!(connector.is_configured());

        connector.clear();
        assert!(!connector.is_configured());
    }
}
