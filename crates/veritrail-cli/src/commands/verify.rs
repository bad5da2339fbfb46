//! Verify command
//!
//! Recomputes the expected topic hash and data for a claim, reads the
//! registry back, and reports the comparison. A mismatch is reported
//! with a non-zero summary line, not an error.

use super::{resolve_root, RootKindArg};
use crate::config::Config;
use clap::Args;
use std::path::PathBuf;
use veritrail_anchor::{AttestationVerifier, EthRegistry};

#[derive(Debug, Args)]
pub struct VerifyArgs {
    /// Root kind to verify
    #[arg(long, value_enum, conflicts_with = "topic")]
    pub kind: Option<RootKindArg>,

    /// Expected root hex value
    #[arg(long, conflicts_with = "tree")]
    pub root: Option<String>,

    /// Tree file to read the expected root from
    #[arg(long)]
    pub tree: Option<PathBuf>,

    /// Custom topic string (e.g. "foundational")
    #[arg(long, requires = "data")]
    pub topic: Option<String>,

    /// Expected hex-encoded claim data for a custom topic
    #[arg(long)]
    pub data: Option<String>,
}

pub fn execute(args: VerifyArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let identity = config.identity()?;
    let chain = config.chain()?;

    let (topic, expected) = expected_claim(&args)?;

    let registry = EthRegistry::connect(&chain.rpc_url, &chain.owner_key, &chain.registry_addr)?;
    let verifier = AttestationVerifier::new(registry);
    let result = verifier.verify(identity.did(), &topic, &expected)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    if result.is_valid() {
        println!("Attestation for topic {topic} is valid");
    } else {
        println!("Attestation for topic {topic} does NOT match expected values");
    }
    Ok(())
}

fn expected_claim(args: &VerifyArgs) -> Result<(String, Vec<u8>), Box<dyn std::error::Error>> {
    if let (Some(topic), Some(data)) = (&args.topic, &args.data) {
        return Ok((topic.clone(), hex::decode(data)?));
    }
    let Some(kind) = args.kind else {
        return Err("must specify either --kind or --topic/--data".into());
    };
    let root = resolve_root(args.root.clone(), args.tree.as_deref())?;
    Ok((kind.kind().topic().to_string(), hex::decode(&root)?))
}
