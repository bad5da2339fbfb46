//! Attestation verification
//!
//! Recomputes the expected topic hash, reads the on-chain claim back,
//! and compares byte-for-byte. A mismatch is a valid, reportable result;
//! only failure to reach the registry is an error.
//!
//! Note the registry's per-subject semantics (last-write-wins vs. one
//! claim forever) are an external contract: "matches" means "matches
//! whatever the registry currently returns", nothing stronger.

use crate::anchor::{topic_hash_for, AnchorClient};
use crate::registry::RegistryClient;
use serde::Serialize;
use veritrail_core::errors::{Result, VeritrailError};

/// Structured verification outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationResult {
    /// On-chain topic equals keccak256 of the expected topic string
    pub match_topic: bool,
    /// On-chain data equals the expected bytes
    pub match_data: bool,
    /// Account that submitted the on-chain claim
    pub issuer: String,
    /// Registry-assigned timestamp (0 when no claim exists)
    pub timestamp: u64,
}

impl VerificationResult {
    pub fn is_valid(&self) -> bool {
        self.match_topic && self.match_data
    }
}

/// Compares anchored claims against independently recomputed expectations
pub struct AttestationVerifier<R: RegistryClient> {
    anchor: AnchorClient<R>,
}

impl<R: RegistryClient> AttestationVerifier<R> {
    pub fn new(registry: R) -> Self {
        Self {
            anchor: AnchorClient::new(registry),
        }
    }

    /// Verify that `(subject_did, topic)` currently resolves to
    /// `expected_data`. Never errors on mismatch.
    pub fn verify(
        &self,
        subject_did: &str,
        topic: &str,
        expected_data: &[u8],
    ) -> Result<VerificationResult> {
        let expected_topic = topic_hash_for(topic);

        let claim = self.anchor.read_claim(subject_did).map_err(|e| {
            VeritrailError::VerificationUnavailable {
                reason: e.to_string(),
            }
        })?;

        let result = VerificationResult {
            match_topic: claim.topic == expected_topic,
            match_data: claim.data == expected_data,
            issuer: claim.issuer,
            timestamp: claim.timestamp,
        };
        tracing::info!(
            subject = subject_did,
            topic,
            match_topic = result.match_topic,
            match_data = result.match_data,
            "verified attestation"
        );
        Ok(result)
    }
}
