//! Append-only execution ledger
//!
//! Captures every observable agent event as an immutable entry stamped
//! with a canonical content digest at append time. The digest covers
//! `{payload, timestamp, type}` with sorted keys; the human-facing label
//! is deliberately excluded so relabeling an entry in a display layer
//! can never masquerade as a different execution.
//!
//! Appends are atomic: digest computation and log insertion happen under
//! one lock, so concurrent emitters can never interleave into a corrupt
//! or lossy sequence. Entry order equals append-completion order.

use crate::digest::{digest_value, to_canonical_value};
use crate::errors::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Mutex;

/// Classification of a logged event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventKind {
    Text,
    Json,
    Error,
}

/// One immutable ledger entry
///
/// Wire field names (`timestamp`, `type`, `label`, `payload`, `hash`) are
/// fixed for trace-file compatibility and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEvent {
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub label: String,
    pub payload: Value,
    #[serde(rename = "hash")]
    pub digest: String,
}

/// Compute the canonical digest of an event's hashed fields.
///
/// This is exactly the digest `append` stamps onto a new entry; it is
/// exposed so verifiers can recompute digests for tamper checks.
pub fn event_digest(timestamp: &str, kind: EventKind, payload: &Value) -> String {
    let canonical = json!({
        "payload": payload,
        "timestamp": timestamp,
        "type": kind,
    });
    digest_value(&canonical)
}

/// In-memory ordered log of typed events
///
/// Exclusively owned by one execution run; never shared across runs.
#[derive(Debug, Default)]
pub struct ExecutionLedger {
    entries: Mutex<Vec<LedgerEvent>>,
}

impl ExecutionLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event, stamping it with the current UTC time.
    ///
    /// Returns the stored entry. On serialization failure the ledger is
    /// unchanged and the error is local to this call.
    pub fn append<P: Serialize>(
        &self,
        kind: EventKind,
        label: &str,
        payload: &P,
    ) -> Result<LedgerEvent> {
        self.append_at(Utc::now(), kind, label, payload)
    }

    /// Append an event with an explicit timestamp.
    ///
    /// Used to replay a recorded sequence deterministically; normal
    /// emission paths go through [`ExecutionLedger::append`].
    pub fn append_at<P: Serialize>(
        &self,
        at: DateTime<Utc>,
        kind: EventKind,
        label: &str,
        payload: &P,
    ) -> Result<LedgerEvent> {
        let payload = to_canonical_value("ledger_append", payload)?;
        let timestamp = format_timestamp(at);

        // Digest and insertion form one indivisible step
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let entry = LedgerEvent {
            digest: event_digest(&timestamp, kind, &payload),
            timestamp,
            kind,
            label: label.to_string(),
            payload,
        };
        entries.push(entry.clone());
        tracing::debug!(label, kind = ?entry.kind, seq = entries.len(), "ledger append");
        Ok(entry)
    }

    /// Log a plain text observation
    pub fn log_text(&self, label: &str, text: &str) -> Result<LedgerEvent> {
        self.append(EventKind::Text, label, &json!({ "text": text }))
    }

    /// Log a structured observation
    pub fn log_json<P: Serialize>(&self, label: &str, payload: &P) -> Result<LedgerEvent> {
        self.append(EventKind::Json, label, payload)
    }

    /// Log an error observation
    pub fn log_error(&self, label: &str, error: &str) -> Result<LedgerEvent> {
        self.append(EventKind::Error, label, &json!({ "error": error }))
    }

    /// Read-only snapshot of all entries in insertion order
    pub fn entries(&self) -> Vec<LedgerEvent> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Ordered sequence of entry digests (the Merkle leaf sequence)
    pub fn event_digests(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .map(|e| e.digest.clone())
            .collect()
    }

    /// Number of entries logged so far
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Whether the ledger is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// ISO-8601 UTC timestamp with microsecond precision and 'Z' suffix
fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_format_is_z_suffixed() {
        let ledger = ExecutionLedger::new();
        let entry = ledger.log_text("greeting", "hello").unwrap();
        assert!(entry.timestamp.ends_with('Z'));
        assert!(entry.timestamp.contains('T'));
    }

    #[test]
    fn test_event_kind_wire_names() {
        assert_eq!(serde_json::to_value(EventKind::Text).unwrap(), "TEXT");
        assert_eq!(serde_json::to_value(EventKind::Json).unwrap(), "JSON");
        assert_eq!(serde_json::to_value(EventKind::Error).unwrap(), "ERROR");
    }

    #[test]
    fn test_digest_excludes_label() {
        let ledger = ExecutionLedger::new();
        let at = Utc::now();
        let a = ledger
            .append_at(at, EventKind::Text, "label-a", &json!({"text": "x"}))
            .unwrap();
        let b = ledger
            .append_at(at, EventKind::Text, "label-b", &json!({"text": "x"}))
            .unwrap();
        assert_eq!(a.digest, b.digest);
    }
}
