// Integration tests for the finalize pipeline
// Covers artifact layout, tree-file agreement with the ledger, CID index
// contents, and failure behavior that must leave local files intact

use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;
use veritrail_core::errors::VeritrailError;
use veritrail_core::ledger::ExecutionLedger;
use veritrail_core::merkle;
use veritrail_publish::{
    finalize_run, ContentPublisher, ContentStore, MemoryStore, CID_FILE, TRACE_FILE, TREE_FILE,
};

fn three_event_ledger() -> ExecutionLedger {
    let ledger = ExecutionLedger::new();
    ledger.log_text("prompt", "summarize the repo").unwrap();
    ledger.log_json("readme", &json!({"repo": "octocat/hello", "bytes": 512})).unwrap();
    ledger.log_text("summary", "a friendly greeting project").unwrap();
    ledger
}

#[test]
fn test_finalize_writes_all_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let publisher = ContentPublisher::new(temp_dir.path());
    let store = MemoryStore::new();
    let ledger = three_event_ledger();

    let outcome = finalize_run(&ledger, &publisher, &store).unwrap();

    assert!(temp_dir.path().join(TRACE_FILE).exists());
    assert!(temp_dir.path().join(TREE_FILE).exists());
    assert!(temp_dir.path().join(CID_FILE).exists());
    assert!(outcome.root.is_some());
    assert_eq!(outcome.cids.len(), 2);
}

#[test]
fn test_trace_file_is_ordered_event_array() {
    let temp_dir = TempDir::new().unwrap();
    let publisher = ContentPublisher::new(temp_dir.path());
    let ledger = three_event_ledger();

    finalize_run(&ledger, &publisher, &MemoryStore::new()).unwrap();

    let text = std::fs::read_to_string(temp_dir.path().join(TRACE_FILE)).unwrap();
    let trace: Vec<Value> = serde_json::from_str(&text).unwrap();
    assert_eq!(trace.len(), 3);
    assert_eq!(trace[0]["type"], "TEXT");
    assert_eq!(trace[1]["type"], "JSON");
    for (entry, event) in trace.iter().zip(ledger.entries()) {
        assert_eq!(entry["hash"], event.digest.as_str());
    }
}

#[test]
fn test_tree_file_matches_recomputed_commitment() {
    let temp_dir = TempDir::new().unwrap();
    let publisher = ContentPublisher::new(temp_dir.path());
    let ledger = three_event_ledger();

    let outcome = finalize_run(&ledger, &publisher, &MemoryStore::new()).unwrap();

    let text = std::fs::read_to_string(temp_dir.path().join(TREE_FILE)).unwrap();
    let tree_doc: Value = serde_json::from_str(&text).unwrap();

    let recomputed = merkle::build(&ledger.event_digests());
    assert_eq!(tree_doc["root"], recomputed.root.clone().unwrap());
    assert_eq!(outcome.root, recomputed.root);
    assert_eq!(
        tree_doc["layers"].as_array().unwrap().len(),
        recomputed.layers.len()
    );
}

#[test]
fn test_empty_ledger_finalizes_with_null_root() {
    let temp_dir = TempDir::new().unwrap();
    let publisher = ContentPublisher::new(temp_dir.path());

    let outcome = finalize_run(&ExecutionLedger::new(), &publisher, &MemoryStore::new()).unwrap();
    assert_eq!(outcome.root, None);

    let text = std::fs::read_to_string(temp_dir.path().join(TREE_FILE)).unwrap();
    let tree_doc: Value = serde_json::from_str(&text).unwrap();
    assert!(tree_doc["root"].is_null());
}

#[test]
fn test_cid_index_matches_returned_mapping() {
    let temp_dir = TempDir::new().unwrap();
    let publisher = ContentPublisher::new(temp_dir.path());
    let store = MemoryStore::new();

    let outcome = finalize_run(&three_event_ledger(), &publisher, &store).unwrap();

    let text = std::fs::read_to_string(temp_dir.path().join(CID_FILE)).unwrap();
    let index: std::collections::BTreeMap<String, String> =
        serde_json::from_str(&text).unwrap();
    assert_eq!(index, outcome.cids);
    assert!(index.contains_key(TRACE_FILE));
    assert!(index.contains_key(TREE_FILE));

    // Stored content is retrievable by its identifier
    let trace_cid = &index[TRACE_FILE];
    assert!(store.get(trace_cid).is_some());
}

/// Store that is always unreachable
struct UnreachableStore;

impl ContentStore for UnreachableStore {
    fn add(&self, path: &Path) -> veritrail_core::Result<String> {
        Err(veritrail_core::errors::publish_error(
            &path.file_name().unwrap().to_string_lossy(),
            "network unreachable",
        ))
    }
}

#[test]
fn test_store_failure_keeps_local_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let publisher = ContentPublisher::new(temp_dir.path());

    let err = finalize_run(&three_event_ledger(), &publisher, &UnreachableStore).unwrap_err();

    // The failure names the artifact that could not be pushed
    match err {
        VeritrailError::Publish { artifact, .. } => assert_eq!(artifact, TRACE_FILE),
        other => panic!("expected Publish error, got {other:?}"),
    }

    // Locally written artifacts survive for retry
    assert!(temp_dir.path().join(TRACE_FILE).exists());
    assert!(temp_dir.path().join(TREE_FILE).exists());
    assert!(!temp_dir.path().join(CID_FILE).exists());
}
