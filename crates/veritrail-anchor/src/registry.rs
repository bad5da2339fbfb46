//! Claims-registry capability
//!
//! The registry is external and append-only from this system's view: we
//! write once per (subject, topic) per run and read back for
//! verification. Whether the contract overwrites or rejects repeat
//! claims per subject is its own business; this layer only carries the
//! two calls.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};
use veritrail_core::digest::sha256_hex;
use veritrail_core::errors::Result;

/// keccak256 of the subject DID
pub type ClaimId = [u8; 32];
/// keccak256 of the topic string
pub type TopicHash = [u8; 32];

/// One claim as stored by the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryClaim {
    pub topic: TopicHash,
    pub data: Vec<u8>,
    /// Submitting account address, `0x`-prefixed
    pub issuer: String,
    /// Registry-assigned unix timestamp (0 when no claim exists)
    pub timestamp: u64,
}

impl RegistryClaim {
    /// The zero-value claim a mapping returns for an unknown subject
    pub fn absent() -> Self {
        Self {
            topic: [0u8; 32],
            data: Vec::new(),
            issuer: format!("0x{}", "0".repeat(40)),
            timestamp: 0,
        }
    }
}

/// Injected registry call surface
pub trait RegistryClient {
    /// Submit a claim; returns the transaction identifier
    fn claim(&self, claim_id: ClaimId, topic: TopicHash, data: &[u8]) -> Result<String>;

    /// Read the last-written claim for a subject.
    ///
    /// Mirrors contract-mapping semantics: an unknown subject returns the
    /// zero-value claim, not an error.
    fn claims(&self, claim_id: ClaimId) -> Result<RegistryClaim>;
}

// A shared registry handle is itself a registry client
impl<R: RegistryClient + ?Sized> RegistryClient for &R {
    fn claim(&self, claim_id: ClaimId, topic: TopicHash, data: &[u8]) -> Result<String> {
        (**self).claim(claim_id, topic, data)
    }

    fn claims(&self, claim_id: ClaimId) -> Result<RegistryClaim> {
        (**self).claims(claim_id)
    }
}

/// In-memory registry with last-write-wins-per-subject semantics
#[derive(Debug)]
pub struct InMemoryRegistry {
    issuer: String,
    records: Mutex<HashMap<ClaimId, RegistryClaim>>,
}

impl InMemoryRegistry {
    pub fn new(issuer: impl Into<String>) -> Self {
        Self {
            issuer: issuer.into(),
            records: Mutex::new(HashMap::new()),
        }
    }

    /// Number of subjects with a recorded claim
    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RegistryClient for InMemoryRegistry {
    fn claim(&self, claim_id: ClaimId, topic: TopicHash, data: &[u8]) -> Result<String> {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let record = RegistryClaim {
            topic,
            data: data.to_vec(),
            issuer: self.issuer.clone(),
            timestamp,
        };
        self.records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(claim_id, record);

        // Synthetic but stable transaction identifier
        let mut preimage = Vec::with_capacity(64 + data.len());
        preimage.extend_from_slice(&claim_id);
        preimage.extend_from_slice(&topic);
        preimage.extend_from_slice(data);
        Ok(format!("0x{}", sha256_hex(&preimage)))
    }

    fn claims(&self, claim_id: ClaimId) -> Result<RegistryClaim> {
        Ok(self
            .records
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&claim_id)
            .cloned()
            .unwrap_or_else(RegistryClaim::absent))
    }
}
