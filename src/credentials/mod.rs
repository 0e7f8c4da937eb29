//! Notion credential handling.
//!
//! The credential is a single bearer token kept in a named slot of a
//! [`CredentialStore`]. The [`CredentialConnector`] holds the
//! configured/unconfigured state shown to the user and is the only place
//! the token enters or leaves the store.

pub mod connector;
pub mod store;

pub use connector::{ConnectorStatus, CredentialConnector};
pub use store::{
    CredentialStore, CredentialStoreError, FileCredentialStore, MemoryCredentialStore,
    StoredCredential,
};

use secrecy::{ExposeSecret, SecretString};
use std::fmt;
use std::sync::Arc;

/// Bearer token for the Notion API. Cheap to clone, redacted in `Debug`.
#[derive(Clone)]
pub struct Credential(Arc<SecretString>);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Arc::new(SecretString::from(token.into())))
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
