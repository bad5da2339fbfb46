//! Content publisher
//!
//! Persists proof artifacts under a fixed proofs directory with
//! atomic-replace semantics and pushes them to a content-addressed
//! store. A network failure after local writes must leave the local
//! artifacts intact and be reported with the artifact it concerns, so
//! callers can retry or degrade to local-only.

use crate::atomic::atomic_write;
use crate::store::ContentStore;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use veritrail_core::errors::{publish_error, Result, VeritrailError};

/// Publishes artifacts to the local proofs directory and a content store
#[derive(Debug, Clone)]
pub struct ContentPublisher {
    proofs_dir: PathBuf,
}

impl ContentPublisher {
    /// Create a publisher rooted at the given proofs directory
    pub fn new(proofs_dir: impl Into<PathBuf>) -> Self {
        Self {
            proofs_dir: proofs_dir.into(),
        }
    }

    pub fn proofs_dir(&self) -> &Path {
        &self.proofs_dir
    }

    /// Path a named artifact will be written to
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.proofs_dir.join(name)
    }

    /// Write a JSON document to a named local artifact (atomic replace)
    pub fn publish_local(&self, name: &str, document: &Value) -> Result<PathBuf> {
        let rendered =
            serde_json::to_string_pretty(document).map_err(|e| publish_error(name, e))?;
        self.publish_raw(name, &rendered)
    }

    /// Write pre-rendered text (e.g. a signed envelope) to a named artifact
    pub fn publish_raw(&self, name: &str, content: &str) -> Result<PathBuf> {
        let target = self.artifact_path(name);
        atomic_write(&target, content.as_bytes())?;
        tracing::debug!(artifact = name, "wrote local artifact");
        Ok(target)
    }

    /// Push local files to the content store, returning name → identifier.
    ///
    /// Fails on the first unreachable artifact, naming it; files already
    /// written locally are never removed by this path.
    pub fn publish_content_addressed(
        &self,
        store: &dyn ContentStore,
        paths: &[PathBuf],
    ) -> Result<BTreeMap<String, String>> {
        let mut cids = BTreeMap::new();
        for path in paths {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let cid = store.add(path).map_err(|e| match e {
                already_tagged @ VeritrailError::Publish { .. } => already_tagged,
                other => publish_error(&name, other),
            })?;
            cids.insert(name, cid);
        }
        Ok(cids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_publish_local_writes_pretty_json() {
        let temp_dir = TempDir::new().unwrap();
        let publisher = ContentPublisher::new(temp_dir.path());

        let path = publisher
            .publish_local("credential.json", &json!({"issuer": "did:key:z"}))
            .unwrap();

        let text = std::fs::read_to_string(path).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(back["issuer"], "did:key:z");
    }

    #[test]
    fn test_publish_raw_preserves_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let publisher = ContentPublisher::new(temp_dir.path());

        let envelope = "{\"proof\":{\"type\":\"Ed25519Signature2018\"}}\n";
        let path = publisher.publish_raw("inputRoot-abc.json", envelope).unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), envelope);
    }
}
