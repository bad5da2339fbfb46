//! Unsigned root credentials
//!
//! Packages a computed root into the fixed verifiable-credential shape
//! expected by the external signer. The document shape is frozen; this
//! module does not validate root format (callers are trusted to pass the
//! output of the merkle or input-root computations -- malformed input
//! propagates as malformed output, by contract).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fixed credential context URI
pub const CREDENTIAL_CONTEXT: &str = "https://www.w3.org/2018/credentials/v1";

/// Which root a credential attests to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootKind {
    ExecutionRoot,
    InputRoot,
}

impl RootKind {
    /// Credential type string, e.g. `"ExecutionRoot"`
    pub fn credential_type(&self) -> &'static str {
        match self {
            RootKind::ExecutionRoot => "ExecutionRoot",
            RootKind::InputRoot => "InputRoot",
        }
    }

    /// URN namespace fragment used in the credential id
    pub fn urn_fragment(&self) -> &'static str {
        match self {
            RootKind::ExecutionRoot => "executionroot",
            RootKind::InputRoot => "inputroot",
        }
    }

    /// Key under `credentialSubject` holding the root hex
    pub fn subject_key(&self) -> &'static str {
        match self {
            RootKind::ExecutionRoot => "executionRoot",
            RootKind::InputRoot => "inputRoot",
        }
    }

    /// Registry topic string this root is anchored under
    pub fn topic(&self) -> &'static str {
        // Topic strings match the subject keys; the registry stores
        // keccak256 of these
        self.subject_key()
    }

    /// Filename for the signed envelope, e.g. `inputRoot-<root>.json`
    pub fn envelope_file_name(&self, root_hex: &str) -> String {
        format!("{}-{}.json", self.subject_key(), root_hex)
    }
}

/// Unsigned root claim document (W3C VC shape)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RootClaim {
    #[serde(rename = "@context")]
    pub context: Vec<String>,
    pub id: String,
    #[serde(rename = "type")]
    pub types: Vec<String>,
    pub issuer: String,
    #[serde(rename = "issuanceDate")]
    pub issuance_date: String,
    #[serde(rename = "credentialSubject")]
    pub credential_subject: serde_json::Map<String, Value>,
}

impl RootClaim {
    /// Extract the root hex back out of the subject, if present
    pub fn root_hex(&self, kind: RootKind) -> Option<&str> {
        self.credential_subject
            .get(kind.subject_key())
            .and_then(Value::as_str)
    }
}

/// Build the unsigned claim for a computed root.
///
/// Pure and deterministic except for the injected `issued_at` value,
/// which is an explicit parameter so callers control (and tests can pin)
/// the issuance time.
pub fn build_credential(
    root_hex: &str,
    kind: RootKind,
    issuer_did: &str,
    issued_at: DateTime<Utc>,
) -> RootClaim {
    let mut subject = serde_json::Map::new();
    subject.insert(
        kind.subject_key().to_string(),
        Value::String(root_hex.to_string()),
    );

    RootClaim {
        context: vec![CREDENTIAL_CONTEXT.to_string()],
        id: format!("urn:{}:{}", kind.urn_fragment(), root_hex),
        types: vec![
            "VerifiableCredential".to_string(),
            kind.credential_type().to_string(),
        ],
        issuer: issuer_did.to_string(),
        issuance_date: issued_at.format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string(),
        credential_subject: subject,
    }
}
