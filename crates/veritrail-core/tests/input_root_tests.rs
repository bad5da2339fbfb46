// Test suite for input-root computation
// Covers order insensitivity, the empty-set error, and agreement with a
// by-hand sorted concatenation

use proptest::prelude::*;
use veritrail_core::digest::sha256_hex;
use veritrail_core::input_root::compute_input_root;
use veritrail_core::VeritrailError;

#[test]
fn test_matches_manual_sorted_concatenation() {
    let d1 = sha256_hex(b"readme-one");
    let d2 = sha256_hex(b"readme-two");
    let d3 = sha256_hex(b"readme-three");

    let mut sorted = vec![d1.clone(), d2.clone(), d3.clone()];
    sorted.sort();
    let expected = sha256_hex(sorted.concat().as_bytes());

    assert_eq!(compute_input_root(&[d1, d2, d3]).unwrap(), expected);
}

#[test]
fn test_permutation_yields_identical_root() {
    let digests: Vec<String> = (0u8..6).map(|i| sha256_hex(&[i])).collect();
    let mut shuffled = digests.clone();
    shuffled.reverse();
    shuffled.swap(0, 3);

    assert_eq!(
        compute_input_root(&digests).unwrap(),
        compute_input_root(&shuffled).unwrap()
    );
}

#[test]
fn test_zero_inputs_is_caller_error() {
    assert_eq!(
        compute_input_root(&[]).unwrap_err(),
        VeritrailError::EmptyInputSet
    );
}

#[test]
fn test_duplicate_digests_are_preserved() {
    // The computation commits to the multiset it was given; deduplication
    // is the caller's decision
    let d = sha256_hex(b"same");
    let once = compute_input_root(std::slice::from_ref(&d)).unwrap();
    let twice = compute_input_root(&[d.clone(), d]).unwrap();
    assert_ne!(once, twice);
}

proptest! {
    #[test]
    fn prop_order_insensitive(tags in prop::collection::vec("[a-z]{1,8}", 1..16)) {
        let digests: Vec<String> = tags.iter().map(|t| sha256_hex(t.as_bytes())).collect();
        let mut reversed = digests.clone();
        reversed.reverse();
        prop_assert_eq!(
            compute_input_root(&digests).unwrap(),
            compute_input_root(&reversed).unwrap()
        );
    }
}
