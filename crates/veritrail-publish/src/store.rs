//! Content-addressable store capability
//!
//! `ContentStore` is the injected boundary to whatever network assigns
//! content identifiers. Production uses the IPFS HTTP API; tests and
//! degraded local-only runs use the in-memory store, whose identifiers
//! are likewise pure functions of content.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Mutex;
use veritrail_core::digest::sha256_hex;
use veritrail_core::errors::{io_error, publish_error, Result};

/// Injected content-addressed publishing capability
pub trait ContentStore {
    /// Push one local file; returns the content identifier assigned to it
    fn add(&self, path: &Path) -> Result<String>;
}

/// Store backed by an IPFS node's HTTP API (`POST /api/v0/add`)
pub struct IpfsHttpStore {
    api_url: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct AddResponse {
    #[serde(rename = "Hash")]
    hash: String,
}

impl IpfsHttpStore {
    /// Connect to an IPFS HTTP API, e.g. `http://127.0.0.1:5001`
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl ContentStore for IpfsHttpStore {
    fn add(&self, path: &Path) -> Result<String> {
        let artifact = file_name(path);
        let form = reqwest::blocking::multipart::Form::new()
            .file("file", path)
            .map_err(|e| io_error("ipfs_add_open", e))?;

        let endpoint = format!("{}/api/v0/add", self.api_url.trim_end_matches('/'));
        let response = self
            .client
            .post(endpoint)
            .multipart(form)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| publish_error(&artifact, e))?;

        let body: AddResponse = response.json().map_err(|e| publish_error(&artifact, e))?;
        tracing::info!(artifact = %artifact, cid = %body.hash, "pushed to content-addressed store");
        Ok(body.hash)
    }
}

/// In-memory content store
///
/// Identifiers are derived from content alone, so the same bytes always
/// yield the same identifier -- the property the pipeline relies on.
#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch stored bytes back by identifier
    pub fn get(&self, cid: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(cid)
            .cloned()
    }

    /// Number of distinct objects held
    pub fn len(&self) -> usize {
        self.objects.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ContentStore for MemoryStore {
    fn add(&self, path: &Path) -> Result<String> {
        let content = fs::read(path).map_err(|e| io_error("memory_store_read", e))?;
        let cid = format!("im{}", sha256_hex(&content));
        self.objects
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(cid.clone(), content);
        Ok(cid)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_identifier_is_content_derived() {
        let temp_dir = TempDir::new().unwrap();
        let a = temp_dir.path().join("a.json");
        let b = temp_dir.path().join("b.json");
        fs::write(&a, b"same bytes").unwrap();
        fs::write(&b, b"same bytes").unwrap();

        let store = MemoryStore::new();
        assert_eq!(store.add(&a).unwrap(), store.add(&b).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("trace.json");
        fs::write(&path, b"[1,2,3]").unwrap();

        let store = MemoryStore::new();
        let cid = store.add(&path).unwrap();
        assert_eq!(store.get(&cid).unwrap(), b"[1,2,3]");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let store = MemoryStore::new();
        let err = store.add(Path::new("/no/such/file.json")).unwrap_err();
        assert!(matches!(err, veritrail_core::VeritrailError::Io { .. }));
    }
}
