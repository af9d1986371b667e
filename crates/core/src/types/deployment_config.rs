use alloy::primitives::{Address, U256};
use std::time::Duration;

/// Everything the orchestrator needs to know about one run. Built once at
/// start-up and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct DeploymentConfig {
    pub network_id: u64,
    pub marketplace_contract: String,
    pub dao_contract: String,
    // Second constructor argument of the DAO, an externally deployed NFT collection.
    pub nft_contract: Address,
    // Wei attached to the DAO deployment.
    pub dao_value: U256,
    pub block_explorer: Option<String>,
}

impl DeploymentConfig {
    pub fn explorer_address_url(&self, address: Address) -> Option<String> {
        self.block_explorer
            .as_ref()
            .map(|base| format!("{}/address/{}", base, address))
    }
}

#[derive(Debug, Clone)]
pub struct NetworkSettings {
    pub rpc_url: String,
    pub poll_interval: Duration,
    pub confirmation_timeout: Duration,
}
