//! Agent identity
//!
//! One explicit `Identity` value is constructed at process start and
//! passed by reference into every component that needs the DID or the
//! signing key path. There is no module-scope singleton: components never
//! load key material themselves.

use std::path::{Path, PathBuf};

/// The agent's DID and the path to its signing key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    did: String,
    key_path: PathBuf,
}

impl Identity {
    pub fn new(did: impl Into<String>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            did: did.into(),
            key_path: key_path.into(),
        }
    }

    /// The agent DID string, e.g. `did:key:z6Mk...`
    pub fn did(&self) -> &str {
        &self.did
    }

    /// Path to the key file consumed by the external signer
    pub fn key_path(&self) -> &Path {
        &self.key_path
    }
}
