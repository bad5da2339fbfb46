//! Credential signing capability
//!
//! Signing itself is delegated to an external signer that accepts the
//! unsigned credential JSON on standard input and emits a signed
//! envelope on standard output. The `Signer` trait keeps that boundary
//! injectable so the pipeline can run against a fake in tests.

use crate::errors::{Result, VeritrailError};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Injected signing capability
pub trait Signer {
    /// Sign a credential document, returning the signed envelope JSON
    fn sign(&self, credential_json: &str) -> Result<String>;
}

/// Signer backed by the didkit CLI (`didkit vc-issue-credential -k <key>`)
#[derive(Debug, Clone)]
pub struct DidkitCliSigner {
    binary: String,
    key_path: PathBuf,
}

impl DidkitCliSigner {
    pub fn new(key_path: impl Into<PathBuf>) -> Self {
        Self {
            binary: "didkit".to_string(),
            key_path: key_path.into(),
        }
    }

    /// Override the signer binary (used by tests to substitute a stub)
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn key_path(&self) -> &Path {
        &self.key_path
    }
}

impl Signer for DidkitCliSigner {
    fn sign(&self, credential_json: &str) -> Result<String> {
        let mut child = Command::new(&self.binary)
            .arg("vc-issue-credential")
            .arg("-k")
            .arg(&self.key_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| VeritrailError::SigningFailed {
                reason: format!("could not launch {}: {}", self.binary, e),
            })?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin
                .write_all(credential_json.as_bytes())
                .map_err(|e| VeritrailError::SigningFailed {
                    reason: format!("could not feed credential to signer: {e}"),
                })?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| VeritrailError::SigningFailed {
                reason: format!("signer did not complete: {e}"),
            })?;

        if !output.status.success() {
            return Err(VeritrailError::SigningFailed {
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        String::from_utf8(output.stdout).map_err(|e| VeritrailError::SigningFailed {
            reason: format!("signer emitted non-UTF8 output: {e}"),
        })
    }
}
