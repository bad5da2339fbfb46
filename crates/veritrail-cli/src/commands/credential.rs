//! Credential command
//!
//! Builds the unsigned root credential for an execution or input root
//! and, with `--sign`, feeds it to the external signer and writes the
//! signed envelope next to it.

use super::{resolve_root, RootKindArg};
use crate::config::Config;
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use veritrail_core::credential::build_credential;
use veritrail_core::signer::{DidkitCliSigner, Signer};
use veritrail_publish::ContentPublisher;

#[derive(Debug, Args)]
pub struct CredentialArgs {
    /// Which root the credential attests to
    #[arg(long, value_enum)]
    pub kind: RootKindArg,

    /// Root hex value
    #[arg(long, conflicts_with = "tree")]
    pub root: Option<String>,

    /// Tree file to read the root from
    #[arg(long)]
    pub tree: Option<PathBuf>,

    /// Sign via the external signer and write the envelope file
    #[arg(long)]
    pub sign: bool,

    /// Unsigned credential filename (within the proofs directory)
    #[arg(long)]
    pub out: Option<String>,
}

pub fn execute(args: CredentialArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let identity = config.identity()?;
    let kind = args.kind.kind();
    let root = resolve_root(args.root, args.tree.as_deref())?;

    let claim = build_credential(&root, kind, identity.did(), Utc::now());
    let publisher = ContentPublisher::new(&config.proofs_dir);

    let unsigned_name = args.out.unwrap_or_else(|| match args.kind {
        RootKindArg::Execution => "execution_cred.json".to_string(),
        RootKindArg::Input => "input_cred.json".to_string(),
    });
    let unsigned_path = publisher.publish_local(&unsigned_name, &serde_json::to_value(&claim)?)?;
    println!("Wrote unsigned credential to {}", unsigned_path.display());

    if args.sign {
        let signer = DidkitCliSigner::new(identity.key_path());
        let envelope = signer.sign(&serde_json::to_string(&claim)?)?;
        let signed_path = publisher.publish_raw(&kind.envelope_file_name(&root), &envelope)?;
        println!("Signed credential saved to {}", signed_path.display());
    }

    Ok(())
}
