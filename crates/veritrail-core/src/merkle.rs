//! Merkle commitment over an ordered digest sequence
//!
//! Builds a binary hash tree whose layer 0 is the caller's digest
//! sequence unchanged (leaves are not re-hashed, so externally verifiable
//! leaf hashes stay comparable). Parent digests hash the concatenation of
//! the two child *hex strings*, not their decoded bytes, keeping the
//! scheme reproducible from any implementation that works over hex.
//!
//! The commitment is intentionally order-sensitive: the execution root
//! attests to event order as well as event content.

use crate::digest::sha256_hex;
use serde::{Deserialize, Serialize};

/// A fully materialized Merkle tree
///
/// Invariants: `layers[0] == leaves`; each subsequent layer has
/// `ceil(len(prev) / 2)` entries; `root` is the single entry of the last
/// layer, or `None` for an empty leaf sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleTree {
    pub leaves: Vec<String>,
    pub layers: Vec<Vec<String>>,
    pub root: Option<String>,
}

/// Build the commitment tree over an ordered sequence of hex digests.
///
/// Pure function of leaf order and content: two calls with the same
/// ordered sequence produce identical trees. An odd-length layer pairs
/// its final entry with itself (duplicate-last policy) rather than
/// promoting it unchanged. An empty input yields `root = None`.
pub fn build(leaf_digests: &[String]) -> MerkleTree {
    let leaves = leaf_digests.to_vec();
    let mut layers = vec![leaves.clone()];

    while layers
        .last()
        .map(|layer| layer.len() > 1)
        .unwrap_or(false)
    {
        let prev = layers.last().cloned().unwrap_or_default();
        let mut next = Vec::with_capacity(prev.len().div_ceil(2));
        for pair in prev.chunks(2) {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            next.push(combine(left, right));
        }
        layers.push(next);
    }

    let root = layers
        .last()
        .and_then(|layer| layer.first())
        .cloned();

    MerkleTree {
        leaves,
        layers,
        root,
    }
}

/// Parent digest of two child digests: SHA256 over the concatenated hex
fn combine(left: &str, right: &str) -> String {
    sha256_hex(format!("{left}{right}").as_bytes())
}
