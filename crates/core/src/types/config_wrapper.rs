use super::deployment_config::{DeploymentConfig, NetworkSettings};
use alloy::primitives::{Address, utils::parse_ether};
use eyre::{Result, eyre};
use std::path::PathBuf;
use std::time::Duration;
use std::{env, fs};
use toml::Value;

const DEFAULT_CONFIG_PATH: &str = "config.toml";
const DEFAULT_MARKETPLACE_CONTRACT: &str = "FakeNFTMarketplace";
const DEFAULT_DAO_CONTRACT: &str = "ZeeCardsDAO";
const DEFAULT_DAO_VALUE: &str = "0.3";
const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";
const DEFAULT_POLL_INTERVAL_MS: u64 = 1_000;
const DEFAULT_CONFIRMATION_TIMEOUT_SECS: u64 = 300;

pub struct ConfigWrapper {
    raw_config: Value,
}

impl ConfigWrapper {
    pub fn new(raw_config: Value) -> Self {
        Self { raw_config }
    }

    pub fn from_file(path: Option<&str>) -> Result<Self> {
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
        let config_content = fs::read_to_string(path)
            .map_err(|e| eyre!("Failed to read config file {}: {}", path, e))?;
        Self::from_str(&config_content)
    }

    pub fn from_str(config_content: &str) -> Result<Self> {
        let raw_config = config_content.parse::<Value>()?;
        Ok(Self { raw_config })
    }

    pub fn get_default_network(&self) -> Result<u64> {
        self.raw_config
            .get("default_network")
            .and_then(|v| v.as_integer())
            .and_then(|v| u64::try_from(v).ok())
            .ok_or_else(|| eyre!("default_network not set, pass a network id explicitly"))
    }

    pub fn get_rpc_url(&self, network_id: u64) -> Result<String> {
        let url_str = self
            .raw_config
            .get("rpc_endpoints")
            .and_then(|r| r.get(&network_id.to_string()))
            .and_then(|v| v.as_str())
            .ok_or_else(|| eyre!("URL not found for network_id: {}", network_id))?;

        resolve_env(url_str)
    }

    pub fn get_block_explorer_url(&self, network_id: u64) -> Result<String> {
        let url_str = self
            .raw_config
            .get("block_explorers")
            .and_then(|b| b.get(&network_id.to_string()))
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                eyre!(
                    "Block explorer URL not found for network_id: {}",
                    network_id
                )
            })?;

        Ok(url_str.trim_end_matches('/').to_string())
    }

    pub fn get_nft_contract(&self, network_id: u64) -> Result<Address> {
        // Try network specific value first
        let network_value = self
            .raw_config
            .get("nft_contract")
            .and_then(|m| m.get(&network_id.to_string()))
            .and_then(|m| m.as_str());

        // Fallback to default if network specific not found
        let default_value = self
            .raw_config
            .get("nft_contract")
            .and_then(|m| m.get("default"))
            .and_then(|m| m.as_str());

        let address_str = network_value.or(default_value).ok_or_else(|| {
            eyre!("NFT contract address not found for network_id: {}", network_id)
        })?;

        address_str
            .parse()
            .map_err(|e| eyre!("Invalid NFT contract address {}: {}", address_str, e))
    }

    pub fn get_artifacts_dir(&self) -> PathBuf {
        PathBuf::from(self.get_deployment_str_or("artifacts_dir", DEFAULT_ARTIFACTS_DIR))
    }

    pub fn get_deployment_config(&self, network_id: u64) -> Result<DeploymentConfig> {
        let dao_value_str = self.get_deployment_str_or("dao_value", DEFAULT_DAO_VALUE);
        let dao_value = parse_ether(&dao_value_str)
            .map_err(|e| eyre!("Invalid dao_value {}: {}", dao_value_str, e))?;

        Ok(DeploymentConfig {
            network_id,
            marketplace_contract: self
                .get_deployment_str_or("marketplace_contract", DEFAULT_MARKETPLACE_CONTRACT),
            dao_contract: self.get_deployment_str_or("dao_contract", DEFAULT_DAO_CONTRACT),
            nft_contract: self.get_nft_contract(network_id)?,
            dao_value,
            block_explorer: self.get_block_explorer_url(network_id).ok(),
        })
    }

    pub fn get_network_settings(&self, network_id: u64) -> Result<NetworkSettings> {
        Ok(NetworkSettings {
            rpc_url: self.get_rpc_url(network_id)?,
            poll_interval: Duration::from_millis(
                self.get_deployment_u64_or("poll_interval_ms", DEFAULT_POLL_INTERVAL_MS)?,
            ),
            confirmation_timeout: Duration::from_secs(self.get_deployment_u64_or(
                "confirmation_timeout_secs",
                DEFAULT_CONFIRMATION_TIMEOUT_SECS,
            )?),
        })
    }

    fn get_deployment_value(&self, key: &str) -> Option<&Value> {
        self.raw_config.get("deployment").and_then(|d| d.get(key))
    }

    fn get_deployment_str_or(&self, key: &str, default: &str) -> String {
        self.get_deployment_value(key)
            .and_then(|v| v.as_str())
            .unwrap_or(default)
            .to_string()
    }

    fn get_deployment_u64_or(&self, key: &str, default: u64) -> Result<u64> {
        match self.get_deployment_value(key) {
            Some(v) => v
                .as_integer()
                .and_then(|i| u64::try_from(i).ok())
                .ok_or_else(|| eyre!("deployment.{} must be a non-negative integer", key)),
            None => Ok(default),
        }
    }
}

/// Values of the form `env:NAME` are read from the environment.
fn resolve_env(value: &str) -> Result<String> {
    match value.strip_prefix("env:") {
        Some(env_var) => {
            env::var(env_var).map_err(|_| eyre!("Environment variable {} not set", env_var))
        }
        None => Ok(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{U256, address};

    const CONFIG: &str = r#"
default_network = 11155111

[rpc_endpoints]
11155111 = "https://rpc.sepolia.example"
1 = "env:DEPLOY_CORE_TEST_UNSET_MAINNET_RPC"

[block_explorers]
11155111 = "https://sepolia.etherscan.io/"

[nft_contract]
default = "0x5F2F11ad8656439d5C14d9B351f8b09cDaC2A02d"
1 = "0xf0bb20865277aBd641a307eCe5Ee04E79073416C"

[deployment]
dao_value = "0.3"
poll_interval_ms = 250
"#;

    fn config() -> ConfigWrapper {
        ConfigWrapper::from_str(CONFIG).unwrap()
    }

    #[test]
    fn test_deployment_config_uses_defaults_and_fallbacks() -> Result<()> {
        let config = config();
        assert_eq!(config.get_default_network()?, 11155111);

        let deployment = config.get_deployment_config(11155111)?;
        assert_eq!(deployment.marketplace_contract, "FakeNFTMarketplace");
        assert_eq!(deployment.dao_contract, "ZeeCardsDAO");
        assert_eq!(
            deployment.nft_contract,
            address!("0x5F2F11ad8656439d5C14d9B351f8b09cDaC2A02d")
        );
        assert_eq!(deployment.dao_value, U256::from(300_000_000_000_000_000u64));
        assert_eq!(
            deployment.block_explorer.as_deref(),
            Some("https://sepolia.etherscan.io")
        );
        Ok(())
    }

    #[test]
    fn test_network_specific_nft_contract() -> Result<()> {
        assert_eq!(
            config().get_nft_contract(1)?,
            address!("0xf0bb20865277aBd641a307eCe5Ee04E79073416C")
        );
        Ok(())
    }

    #[test]
    fn test_network_settings() -> Result<()> {
        let settings = config().get_network_settings(11155111)?;
        assert_eq!(settings.rpc_url, "https://rpc.sepolia.example");
        assert_eq!(settings.poll_interval, Duration::from_millis(250));
        assert_eq!(
            settings.confirmation_timeout,
            Duration::from_secs(DEFAULT_CONFIRMATION_TIMEOUT_SECS)
        );
        Ok(())
    }

    #[test]
    fn test_missing_values_error() {
        let config = config();
        // Unset env var behind an `env:` endpoint.
        assert!(config.get_rpc_url(1).is_err());
        assert!(config.get_rpc_url(10).is_err());

        let empty = ConfigWrapper::from_str("").unwrap();
        assert!(empty.get_default_network().is_err());
        assert!(empty.get_deployment_config(1).is_err());
    }

    #[test]
    fn test_invalid_dao_value() {
        let config = ConfigWrapper::from_str(
            r#"
[nft_contract]
default = "0x5F2F11ad8656439d5C14d9B351f8b09cDaC2A02d"

[deployment]
dao_value = "zero point three"
"#,
        )
        .unwrap();
        assert!(config.get_deployment_config(1).is_err());
    }
}
