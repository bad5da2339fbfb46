//! Anchor client
//!
//! Derives the registry keys from the subject DID and topic string
//! (keccak256 of each, matching the contract's keying) and submits the
//! claim through the injected registry. Submission is externally
//! effectful and not undoable; avoiding duplicate writes across retries
//! is the caller's responsibility.

use crate::registry::{ClaimId, RegistryClaim, RegistryClient, TopicHash};
use ethers::core::utils::keccak256;
use veritrail_core::errors::{Result, VeritrailError};

/// Registry key for a subject DID
pub fn claim_id_for(subject_did: &str) -> ClaimId {
    keccak256(subject_did.as_bytes())
}

/// Registry key for a topic string
pub fn topic_hash_for(topic: &str) -> TopicHash {
    keccak256(topic.as_bytes())
}

/// Writes claims to, and reads them back from, the claims registry
pub struct AnchorClient<R: RegistryClient> {
    registry: R,
}

impl<R: RegistryClient> AnchorClient<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Anchor `data` under `(subject_did, topic)`.
    ///
    /// Returns the transaction identifier. On failure nothing local has
    /// changed and `AnchorSubmission` names the topic.
    pub fn anchor(&self, subject_did: &str, topic: &str, data: &[u8]) -> Result<String> {
        let claim_id = claim_id_for(subject_did);
        let topic_hash = topic_hash_for(topic);
        tracing::info!(subject = subject_did, topic, bytes = data.len(), "anchoring claim");
        let tx = self
            .registry
            .claim(claim_id, topic_hash, data)
            .map_err(|e| match e {
                already_tagged @ VeritrailError::AnchorSubmission { .. } => already_tagged,
                other => VeritrailError::AnchorSubmission {
                    topic: topic.to_string(),
                    reason: other.to_string(),
                },
            })?;
        tracing::info!(topic, tx = %tx, "claim anchored");
        Ok(tx)
    }

    /// Read back the registry's last-written claim for a subject
    pub fn read_claim(&self, subject_did: &str) -> Result<RegistryClaim> {
        self.registry.claims(claim_id_for(subject_did))
    }
}
