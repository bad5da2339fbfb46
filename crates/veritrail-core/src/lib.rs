//! Veritrail Core - Attestation kernel for verifiable agent execution
//!
//! This crate provides the pure building blocks of the attestation pipeline:
//! - Canonical JSON digests over structured records
//! - An append-only, hash-stamped execution ledger
//! - Merkle commitments over ordered event digests
//! - Order-insensitive input-root computation over content digests
//! - Unsigned root credentials (W3C VC shape) for computed roots
//! - The agent `Identity` value and the external `Signer` capability
//!
//! Everything here is deterministic and free of I/O; publishing and
//! on-chain anchoring live in `veritrail-publish` and `veritrail-anchor`.

pub mod credential;
pub mod digest;
pub mod errors;
pub mod identity;
pub mod input_root;
pub mod ledger;
pub mod logging;
pub mod merkle;
pub mod signer;

// Re-export commonly used types
pub use credential::{build_credential, RootClaim, RootKind};
pub use digest::{canonical_json, digest_value, sha256_hex};
pub use errors::{Result, VeritrailError};
pub use identity::Identity;
pub use input_root::compute_input_root;
pub use ledger::{EventKind, ExecutionLedger, LedgerEvent};
pub use merkle::{build, MerkleTree};
pub use signer::{DidkitCliSigner, Signer};
