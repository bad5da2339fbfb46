//! Input-root computation over an unordered digest set
//!
//! External inputs arrive in whatever order the network produced them, so
//! the commitment here must not depend on fetch order: digests are sorted
//! lexicographically by hex string, concatenated, and hashed once.
//!
//! This is deliberately *not* the Merkle construction used for the
//! execution root. The execution root attests to event order; the input
//! root attests to a set. The flat construction also means no per-input
//! Merkle proofs exist for the input root -- a known asymmetry that is
//! preserved rather than silently "fixed".

use crate::digest::sha256_hex;
use crate::errors::{Result, VeritrailError};

/// Compute the input root over a set of content digests.
///
/// Order-insensitive: any permutation of the same digests produces the
/// same root. Zero inputs is a caller error (`EmptyInputSet`) -- a
/// meaningful input root requires at least one digest.
pub fn compute_input_root(digests: &[String]) -> Result<String> {
    if digests.is_empty() {
        return Err(VeritrailError::EmptyInputSet);
    }
    let mut sorted: Vec<&str> = digests.iter().map(String::as_str).collect();
    sorted.sort_unstable();
    Ok(sha256_hex(sorted.concat().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set_is_an_error() {
        assert_eq!(
            compute_input_root(&[]).unwrap_err(),
            VeritrailError::EmptyInputSet
        );
    }

    #[test]
    fn test_single_digest() {
        let digest = sha256_hex(b"readme");
        let root = compute_input_root(&[digest.clone()]).unwrap();
        assert_eq!(root, sha256_hex(digest.as_bytes()));
    }
}
