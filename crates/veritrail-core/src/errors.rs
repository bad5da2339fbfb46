//! Error taxonomy for the attestation pipeline
//!
//! Each variant maps one-to-one onto a failure class a caller can act on:
//! serialization failures are local to a single append, publish and anchor
//! failures carry the artifact or topic they concern so the caller can
//! retry idempotently, and a verification *mismatch* is never an error --
//! only failure to read the registry back is.

use thiserror::Error;

/// Result type alias using VeritrailError
pub type Result<T> = std::result::Result<T, VeritrailError>;

/// Comprehensive error taxonomy for attestation operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VeritrailError {
    /// Payload could not be canonically serialized (append-local; ledger
    /// state is unchanged)
    #[error("Cannot canonicalize payload in {context}: {reason}")]
    Serialization { context: String, reason: String },

    /// Zero input digests were supplied; no input root can be defined
    #[error("Input root requires at least one content digest")]
    EmptyInputSet,

    /// Local write or content-addressed push failed for a named artifact
    #[error("Failed to publish {artifact}: {reason}")]
    Publish { artifact: String, reason: String },

    /// On-chain claim submission failed; no partial on-chain state exists
    /// from this system's view
    #[error("Anchor submission failed for topic {topic}: {reason}")]
    AnchorSubmission { topic: String, reason: String },

    /// On-chain state could not be read back (distinct from a mismatch,
    /// which is a reportable result, not an error)
    #[error("Could not read back on-chain claim: {reason}")]
    VerificationUnavailable { reason: String },

    /// The external signer rejected the credential or exited non-zero
    #[error("Credential signing failed: {reason}")]
    SigningFailed { reason: String },

    /// Filesystem failure, tagged with the operation that hit it
    #[error("IO failure during {op}: {reason}")]
    Io { op: String, reason: String },

    /// A required configuration value is missing or malformed
    #[error("Missing or invalid configuration value: {name}")]
    InvalidConfig { name: String },

    /// Registry client failure outside the anchor/verify paths
    #[error("Registry client error: {reason}")]
    Registry { reason: String },
}

/// Create a serialization error from a serde_json failure
pub fn serialization_error(context: &str, err: serde_json::Error) -> VeritrailError {
    VeritrailError::Serialization {
        context: context.to_string(),
        reason: err.to_string(),
    }
}

/// Create an IO error tagged with the failing operation
pub fn io_error(op: &str, err: std::io::Error) -> VeritrailError {
    VeritrailError::Io {
        op: op.to_string(),
        reason: err.to_string(),
    }
}

/// Create a publish error naming the affected artifact
pub fn publish_error(artifact: &str, reason: impl ToString) -> VeritrailError {
    VeritrailError::Publish {
        artifact: artifact.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_artifact() {
        let err = publish_error("execution_trace.json", "disk full");
        assert_eq!(
            err.to_string(),
            "Failed to publish execution_trace.json: disk full"
        );
    }

    #[test]
    fn test_empty_input_set_message() {
        assert_eq!(
            VeritrailError::EmptyInputSet.to_string(),
            "Input root requires at least one content digest"
        );
    }
}
