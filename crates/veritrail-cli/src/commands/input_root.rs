//! Input-root command
//!
//! Digests the given inputs and prints the order-insensitive input root.
//! An input that already looks like a 64-character hex digest is used as
//! supplied (the upstream fetcher hashed it); anything else is treated
//! as a local file and hashed here.

use clap::Args;
use veritrail_core::digest::sha256_hex;
use veritrail_core::input_root::compute_input_root;

#[derive(Debug, Args)]
pub struct InputRootArgs {
    /// Hex content digests or paths to local input files
    #[arg(required = true)]
    pub inputs: Vec<String>,
}

pub fn execute(args: InputRootArgs) -> Result<(), Box<dyn std::error::Error>> {
    let digests = digest_inputs(&args.inputs)?;
    for (input, digest) in args.inputs.iter().zip(&digests) {
        println!("  {input}: {digest}");
    }

    let root = compute_input_root(&digests)?;
    println!("Computed inputRoot: {root}");
    Ok(())
}

pub(crate) fn digest_inputs(inputs: &[String]) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    inputs
        .iter()
        .map(|input| {
            if is_hex_digest(input) {
                Ok(input.to_ascii_lowercase())
            } else {
                let content = std::fs::read(input)
                    .map_err(|e| format!("cannot read input {input}: {e}"))?;
                Ok(sha256_hex(&content))
            }
        })
        .collect()
}

fn is_hex_digest(input: &str) -> bool {
    input.len() == 64 && input.chars().all(|c| c.is_ascii_hexdigit())
}
