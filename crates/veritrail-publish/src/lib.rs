//! Veritrail Publish - Artifact persistence and content-addressed publishing
//!
//! Provides:
//! - Atomic local writes for proof artifacts (trace, tree, credentials)
//! - The `ContentStore` capability with an IPFS HTTP API implementation
//!   and an in-memory store for tests and degraded runs
//! - The finalize pipeline turning a ledger into trace/tree/CID artifacts

pub mod atomic;
pub mod pipeline;
pub mod publisher;
pub mod store;

pub use pipeline::{finalize_run, FinalizedRun, CID_FILE, TRACE_FILE, TREE_FILE};
pub use publisher::ContentPublisher;
pub use store::{ContentStore, IpfsHttpStore, MemoryStore};
