//! Finalize pipeline
//!
//! Turns a completed execution ledger into its durable proof artifacts:
//! the ordered trace, the Merkle layer structure, and the map of
//! content identifiers assigned by the store.

use crate::publisher::ContentPublisher;
use crate::store::ContentStore;
use serde_json::json;
use std::collections::BTreeMap;
use veritrail_core::errors::{publish_error, Result};
use veritrail_core::ledger::ExecutionLedger;
use veritrail_core::merkle::{self, MerkleTree};

/// Ordered array of ledger entries
pub const TRACE_FILE: &str = "execution_trace.json";
/// `{ "root": ..., "layers": [...] }`
pub const TREE_FILE: &str = "execution_tree.json";
/// Mapping from artifact filename to content identifier
pub const CID_FILE: &str = "execution_cids.json";

/// Everything finalization produced
#[derive(Debug, Clone, PartialEq)]
pub struct FinalizedRun {
    /// Execution root, `None` for an empty ledger
    pub root: Option<String>,
    /// The full commitment tree over the event digests
    pub tree: MerkleTree,
    /// Artifact filename → content identifier
    pub cids: BTreeMap<String, String>,
}

/// Finalize one execution run.
///
/// Writes `execution_trace.json` and `execution_tree.json` locally,
/// pushes both to the content store, and records the assigned
/// identifiers in `execution_cids.json`. A store failure surfaces after
/// the local artifacts are written; they stay on disk for retry.
pub fn finalize_run(
    ledger: &ExecutionLedger,
    publisher: &ContentPublisher,
    store: &dyn ContentStore,
) -> Result<FinalizedRun> {
    let entries = ledger.entries();
    let tree = merkle::build(&ledger.event_digests());

    let trace = serde_json::to_value(&entries).map_err(|e| publish_error(TRACE_FILE, e))?;
    publisher.publish_local(TRACE_FILE, &trace)?;

    let tree_doc = json!({ "root": tree.root, "layers": tree.layers });
    publisher.publish_local(TREE_FILE, &tree_doc)?;

    let paths = vec![
        publisher.artifact_path(TRACE_FILE),
        publisher.artifact_path(TREE_FILE),
    ];
    let cids = publisher.publish_content_addressed(store, &paths)?;
    let cid_doc = serde_json::to_value(&cids).map_err(|e| publish_error(CID_FILE, e))?;
    publisher.publish_local(CID_FILE, &cid_doc)?;

    tracing::info!(
        events = entries.len(),
        root = tree.root.as_deref().unwrap_or("<empty>"),
        "finalized execution run"
    );

    Ok(FinalizedRun {
        root: tree.root.clone(),
        tree,
        cids,
    })
}
