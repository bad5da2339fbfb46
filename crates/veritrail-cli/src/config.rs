//! Process configuration
//!
//! All environment access happens here, once, at startup. The resulting
//! value is passed down by reference; core components never read the
//! environment themselves. Settings a command does not use may be absent
//! and only fail when that command asks for them.

use std::env;
use std::path::PathBuf;
use veritrail_core::errors::{Result, VeritrailError};
use veritrail_core::logging::Profile;
use veritrail_core::Identity;

/// Everything the CLI can be configured with
#[derive(Debug, Clone)]
pub struct Config {
    pub proofs_dir: PathBuf,
    pub ipfs_api: String,
    agent_did: Option<String>,
    key_path: PathBuf,
    rpc_url: Option<String>,
    owner_key: Option<String>,
    registry_addr: Option<String>,
}

/// Chain settings, required only by anchor/verify commands
#[derive(Debug, Clone)]
pub struct ChainConfig {
    pub rpc_url: String,
    pub owner_key: String,
    pub registry_addr: String,
}

impl Config {
    /// Assemble configuration from `.env` (if present) and the process
    /// environment; real environment variables win over `.env`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Assemble configuration from any name -> value lookup. Absent
    /// settings either take their default or stay lazily required.
    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            proofs_dir: get("PROOFS_DIR").unwrap_or_else(|| "proofs".into()).into(),
            ipfs_api: get("IPFS_API").unwrap_or_else(|| "http://127.0.0.1:5001".into()),
            agent_did: get("AGENT_DID"),
            key_path: get("AGENT_KEY_PATH")
                .unwrap_or_else(|| ".agent_key.jwk".into())
                .into(),
            rpc_url: get("RPC_URL"),
            owner_key: get("OWNER_KEY"),
            registry_addr: get("REGISTRY_ADDR"),
        })
    }

    /// The agent identity; requires `AGENT_DID`
    pub fn identity(&self) -> Result<Identity> {
        let did = self.agent_did.clone().ok_or_else(|| missing("AGENT_DID"))?;
        Ok(Identity::new(did, self.key_path.clone()))
    }

    pub fn chain(&self) -> Result<ChainConfig> {
        Ok(ChainConfig {
            rpc_url: self.rpc_url.clone().ok_or_else(|| missing("RPC_URL"))?,
            owner_key: self.owner_key.clone().ok_or_else(|| missing("OWNER_KEY"))?,
            registry_addr: self
                .registry_addr
                .clone()
                .ok_or_else(|| missing("REGISTRY_ADDR"))?,
        })
    }
}

/// Logging profile for this process; `VERITRAIL_ENV=production` switches
/// the subscriber to JSON output.
pub fn log_profile() -> Profile {
    dotenvy::dotenv().ok();
    profile_for(env::var("VERITRAIL_ENV").ok().as_deref())
}

fn profile_for(value: Option<&str>) -> Profile {
    match value {
        Some("production") => Profile::Production,
        _ => Profile::Development,
    }
}

fn missing(name: &str) -> VeritrailError {
    VeritrailError::InvalidConfig {
        name: name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<&str, &str> = pairs.iter().copied().collect();
        Config::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap()
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.proofs_dir, PathBuf::from("proofs"));
        assert_eq!(config.ipfs_api, "http://127.0.0.1:5001");
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let config = config_from(&[
            ("PROOFS_DIR", "/var/proofs"),
            ("IPFS_API", "http://ipfs.internal:5001"),
        ]);
        assert_eq!(config.proofs_dir, PathBuf::from("/var/proofs"));
        assert_eq!(config.ipfs_api, "http://ipfs.internal:5001");
    }

    #[test]
    fn test_identity_requires_agent_did() {
        let err = config_from(&[]).identity().unwrap_err();
        assert_eq!(
            err,
            VeritrailError::InvalidConfig {
                name: "AGENT_DID".into()
            }
        );
    }

    #[test]
    fn test_identity_carries_did_and_key_path() {
        let config = config_from(&[
            ("AGENT_DID", "did:key:z6MkExample"),
            ("AGENT_KEY_PATH", "/keys/agent.jwk"),
        ]);
        let identity = config.identity().unwrap();
        assert_eq!(identity.did(), "did:key:z6MkExample");
        assert_eq!(identity.key_path(), Path::new("/keys/agent.jwk"));
    }

    #[test]
    fn test_chain_names_each_missing_setting() {
        let full = [
            ("RPC_URL", "http://127.0.0.1:8545"),
            ("OWNER_KEY", "0xabc"),
            ("REGISTRY_ADDR", "0xdef"),
        ];
        for (absent, _) in full {
            let partial: Vec<_> = full.iter().copied().filter(|(n, _)| *n != absent).collect();
            let err = config_from(&partial).chain().unwrap_err();
            assert_eq!(
                err,
                VeritrailError::InvalidConfig {
                    name: absent.into()
                }
            );
        }
    }

    #[test]
    fn test_chain_complete_when_all_settings_present() {
        let chain = config_from(&[
            ("RPC_URL", "http://127.0.0.1:8545"),
            ("OWNER_KEY", "0xabc"),
            ("REGISTRY_ADDR", "0xdef"),
        ])
        .chain()
        .unwrap();
        assert_eq!(chain.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(chain.owner_key, "0xabc");
        assert_eq!(chain.registry_addr, "0xdef");
    }

    #[test]
    fn test_log_profile_selection() {
        assert_eq!(profile_for(Some("production")), Profile::Production);
        assert_eq!(profile_for(Some("development")), Profile::Development);
        assert_eq!(profile_for(None), Profile::Development);
    }
}
