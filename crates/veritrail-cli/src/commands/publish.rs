//! Publish command
//!
//! Pushes already-written proof artifacts to the content-addressed store
//! and refreshes the CID index. This is also the retry path after a
//! finalize run that degraded to local-only.

use crate::config::Config;
use clap::Args;
use std::path::PathBuf;
use veritrail_publish::{ContentPublisher, IpfsHttpStore, CID_FILE, TRACE_FILE, TREE_FILE};

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Artifacts to push (defaults to the trace and tree files)
    pub files: Vec<PathBuf>,
}

pub fn execute(args: PublishArgs, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let publisher = ContentPublisher::new(&config.proofs_dir);
    let store = IpfsHttpStore::new(&config.ipfs_api);

    let paths = if args.files.is_empty() {
        vec![
            publisher.artifact_path(TRACE_FILE),
            publisher.artifact_path(TREE_FILE),
        ]
    } else {
        args.files
    };

    let cids = publisher.publish_content_addressed(&store, &paths)?;
    for (name, cid) in &cids {
        println!("  {name}: {cid}");
    }

    let index_path = publisher.publish_local(CID_FILE, &serde_json::to_value(&cids)?)?;
    println!("Wrote CID index to {}", index_path.display());
    Ok(())
}
