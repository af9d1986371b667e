use crate::artifacts::artifact_registry::ArtifactRegistry;
use crate::error::DeploymentError;
use crate::network::deployment_network::DeploymentNetwork;
use crate::types::deployment::{DeploymentReport, DeploymentRequest, DeploymentResult};
use crate::types::deployment_config::DeploymentConfig;
use alloy::dyn_abi::DynSolValue;
use alloy::primitives::Address;
use log::{debug, info};

/// Deploys the marketplace, then the DAO pointing at it. Strictly sequential:
/// the DAO request is only built from the marketplace's confirmed address.
pub struct Orchestrator<R, N> {
    config: DeploymentConfig,
    registry: R,
    network: N,
}

impl<R: ArtifactRegistry, N: DeploymentNetwork> Orchestrator<R, N> {
    pub fn new(config: DeploymentConfig, registry: R, network: N) -> Self {
        Self {
            config,
            registry,
            network,
        }
    }

    pub async fn run(&self) -> Result<DeploymentReport, DeploymentError> {
        debug!("Deploying to network {}", self.config.network_id);
        let marketplace = self.deploy_marketplace().await?;
        let dao = self.deploy_dao(marketplace.address).await?;
        Ok(DeploymentReport { marketplace, dao })
    }

    async fn deploy_marketplace(&self) -> Result<DeploymentResult, DeploymentError> {
        let factory = self
            .registry
            .get_factory(&self.config.marketplace_contract)?;
        let request = factory.deployment_request(Vec::new(), None)?;
        self.deploy(request).await
    }

    async fn deploy_dao(&self, marketplace: Address) -> Result<DeploymentResult, DeploymentError> {
        let factory = self.registry.get_factory(&self.config.dao_contract)?;
        let request = factory.deployment_request(
            vec![
                DynSolValue::Address(marketplace),
                DynSolValue::Address(self.config.nft_contract),
            ],
            Some(self.config.dao_value),
        )?;
        self.deploy(request).await
    }

    async fn deploy(&self, request: DeploymentRequest) -> Result<DeploymentResult, DeploymentError> {
        debug!(
            "Submitting {} ({} constructor arg(s), value {})",
            request.contract,
            request.constructor_args.len(),
            request.value()
        );
        let tx_hash = self.network.submit(&request).await?;
        let result = self
            .network
            .await_confirmation(&request.contract, tx_hash)
            .await?;

        info!("{} deployed to: {}", request.contract, result.address);
        if let Some(url) = self.config.explorer_address_url(result.address) {
            info!("  {}", url);
        }
        Ok(result)
    }
}
