//! Atomic write primitives
//!
//! Uses temp→rename so a failed write leaves the prior file version
//! untouched

use std::fs;
use std::path::Path;
use veritrail_core::errors::{io_error, Result};

/// Atomically write bytes to a file
///
/// Writes to a sibling temp file and renames over the target, creating
/// parent directories as needed.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_proofs_dir", e))?;
    }

    let temp_path = target_path.with_extension("tmp");

    fs::write(&temp_path, content).map_err(|e| io_error("write_artifact_temp", e))?;
    fs::rename(&temp_path, target_path).map_err(|e| io_error("rename_artifact_temp", e))?;

    Ok(())
}
