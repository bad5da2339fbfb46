//! CLI subcommands

pub mod anchor;
pub mod credential;
pub mod input_root;
pub mod publish;
pub mod verify;

use clap::ValueEnum;
use std::path::Path;
use veritrail_core::credential::RootKind;

/// CLI-facing root kind selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RootKindArg {
    Execution,
    Input,
}

impl RootKindArg {
    pub fn kind(self) -> RootKind {
        match self {
            RootKindArg::Execution => RootKind::ExecutionRoot,
            RootKindArg::Input => RootKind::InputRoot,
        }
    }
}

/// Resolve a root from an explicit hex value or a tree file.
///
/// The tree file is the `execution_tree.json` shape written at finalize
/// time (`{ "root": ..., "layers": [...] }`).
pub fn resolve_root(
    root: Option<String>,
    tree: Option<&Path>,
) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(root) = root {
        return Ok(root);
    }
    let Some(tree_path) = tree else {
        return Err("must specify either --root or --tree".into());
    };
    let text = std::fs::read_to_string(tree_path)?;
    let doc: serde_json::Value = serde_json::from_str(&text)?;
    doc.get("root")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| format!("{} has no root (empty ledger?)", tree_path.display()).into())
}
