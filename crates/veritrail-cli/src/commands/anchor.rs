//! Anchor command
//!
//! Submits a claim to the on-chain registry: either a root claim
//! (execution or input, with the root bytes as data) or an arbitrary
//! topic with explicit hex data, which covers foundational claims.

use super::{resolve_root, RootKindArg};
use crate::config::Config;
use clap::Args;
use std::path::PathBuf;
use veritrail_anchor::{AnchorClient, EthRegistry};

#[derive(Debug, Args)]
pub struct AnchorArgs {
    /// Root kind to anchor
    #[arg(long, value_enum, conflicts_with = "topic")]
    pub kind: Option<RootKindArg>,

    /// Root hex value
    #[arg(long, conflicts_with = "tree")]
    pub root: Option<String>,

    /// Tree file to read the root from
    #[arg(long)]
    pub tree: Option<PathBuf>,

    /// Custom topic string (e.g. "foundational")
    #[arg(long, requires = "data")]
    pub topic: Option<String>,

    /// Hex-encoded claim data for a custom topic
    #[arg(long)]
    pub data: Option<String>,
}

pub fn execute(args: AnchorArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let identity = config.identity()?;
    let chain = config.chain()?;

    let (topic, data) = claim_payload(&args)?;

    let registry = EthRegistry::connect(&chain.rpc_url, &chain.owner_key, &chain.registry_addr)?;
    let client = AnchorClient::new(registry);
    let tx = client.anchor(identity.did(), &topic, &data)?;
    println!("Attestation tx: {tx}");
    Ok(())
}

fn claim_payload(args: &AnchorArgs) -> Result<(String, Vec<u8>), Box<dyn std::error::Error>> {
    if let (Some(topic), Some(data)) = (&args.topic, &args.data) {
        return Ok((topic.clone(), hex::decode(data)?));
    }
    let Some(kind) = args.kind else {
        return Err("must specify either --kind or --topic/--data".into());
    };
    let root = resolve_root(args.root.clone(), args.tree.as_deref())?;
    Ok((kind.kind().topic().to_string(), hex::decode(&root)?))
}
