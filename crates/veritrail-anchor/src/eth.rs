//! Ethers-backed registry client
//!
//! Speaks to the deployed claims-registry contract over JSON-RPC with a
//! locally configured signing account. The surface stays blocking: a
//! private current-thread runtime drives the async provider, so callers
//! (and the ledger's lock) never touch async machinery.

use crate::registry::{ClaimId, RegistryClaim, RegistryClient, TopicHash};
use ethers::contract::abigen;
use ethers::core::types::{Address, Bytes};
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use std::sync::Arc;
use veritrail_core::errors::{Result, VeritrailError};

abigen!(
    ClaimsRegistry,
    r#"[
        function claim(bytes32 claimId, bytes32 topic, bytes data)
        function claims(bytes32 claimId) view returns (bytes32 topic, bytes data, address issuer, uint256 timestamp)
    ]"#
);

type RegistryContract = ClaimsRegistry<SignerMiddleware<Provider<Http>, LocalWallet>>;

/// Registry client bound to one contract address and signing account
pub struct EthRegistry {
    contract: RegistryContract,
    runtime: tokio::runtime::Runtime,
}

impl EthRegistry {
    /// Connect to the registry.
    ///
    /// `owner_key` is the hex-encoded private key of the submitting
    /// account; the chain id is read from the node so signatures are
    /// replay-protected.
    pub fn connect(rpc_url: &str, owner_key: &str, registry_addr: &str) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| VeritrailError::Registry {
                reason: format!("could not start runtime: {e}"),
            })?;

        let provider = Provider::<Http>::try_from(rpc_url).map_err(|e| {
            VeritrailError::Registry {
                reason: format!("invalid RPC endpoint {rpc_url}: {e}"),
            }
        })?;

        let chain_id =
            runtime
                .block_on(provider.get_chainid())
                .map_err(|e| VeritrailError::Registry {
                    reason: format!("could not read chain id: {e}"),
                })?;

        let wallet: LocalWallet = owner_key.parse().map_err(|e| VeritrailError::Registry {
            reason: format!("invalid owner key: {e}"),
        })?;
        let wallet = wallet.with_chain_id(chain_id.as_u64());

        let address: Address = registry_addr.parse().map_err(|e| VeritrailError::Registry {
            reason: format!("invalid registry address {registry_addr}: {e}"),
        })?;

        let client = Arc::new(SignerMiddleware::new(provider, wallet));
        Ok(Self {
            contract: ClaimsRegistry::new(address, client),
            runtime,
        })
    }
}

impl RegistryClient for EthRegistry {
    fn claim(&self, claim_id: ClaimId, topic: TopicHash, data: &[u8]) -> Result<String> {
        let submission_error = |reason: String| VeritrailError::AnchorSubmission {
            topic: hex::encode(topic),
            reason,
        };

        let call = self.contract.claim(claim_id, topic, Bytes::from(data.to_vec()));
        self.runtime.block_on(async move {
            let pending = call.send().await.map_err(|e| submission_error(e.to_string()))?;
            let tx_hash = *pending;
            // Wait for inclusion so submission failures surface here, not
            // at some later read
            pending.await.map_err(|e| submission_error(e.to_string()))?;
            Ok(format!("{tx_hash:?}"))
        })
    }

    fn claims(&self, claim_id: ClaimId) -> Result<RegistryClaim> {
        let call = self.contract.claims(claim_id);
        let (topic, data, issuer, timestamp) =
            self.runtime
                .block_on(call.call())
                .map_err(|e| VeritrailError::Registry {
                    reason: e.to_string(),
                })?;

        Ok(RegistryClaim {
            topic,
            data: data.to_vec(),
            issuer: format!("{issuer:?}"),
            timestamp: timestamp.as_u64(),
        })
    }
}
