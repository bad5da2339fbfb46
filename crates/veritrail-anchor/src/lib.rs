//! Veritrail Anchor - On-chain claim anchoring and verification
//!
//! Provides:
//! - The `RegistryClient` capability over the claims-registry call
//!   surface (`claim(id, topic, data)` / `claims(id)`)
//! - An ethers-backed implementation speaking to the deployed contract
//! - An in-memory registry for tests
//! - `AnchorClient` (keccak keying + submission) and
//!   `AttestationVerifier` (recompute-and-compare, mismatch as data)

pub mod anchor;
pub mod eth;
pub mod registry;
pub mod verify;

pub use anchor::{claim_id_for, topic_hash_for, AnchorClient};
pub use eth::EthRegistry;
pub use registry::{ClaimId, InMemoryRegistry, RegistryClaim, RegistryClient, TopicHash};
pub use verify::{AttestationVerifier, VerificationResult};
