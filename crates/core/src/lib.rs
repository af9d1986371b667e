use artifacts::hardhat_artifacts::HardhatArtifacts;
use dotenv::dotenv;
use eyre::Result;
use log::debug;
use network::rpc_network::{connect_http, signer_from_env};
use orchestrator::orchestrator::Orchestrator;
use types::config_wrapper::ConfigWrapper;
use types::deployment::DeploymentReport;

pub mod error;

pub mod artifacts {
    pub mod artifact_registry;
    pub mod hardhat_artifacts;
}

pub mod network {
    pub mod deployment_network;
    pub mod rpc_network;
}

pub mod orchestrator {
    #[allow(clippy::module_inception)]
    pub mod orchestrator;
}

pub mod types {
    pub mod config_wrapper;
    pub mod deployment;
    pub mod deployment_config;
}

pub use error::DeploymentError;

/// Deploys the marketplace and the DAO to `network_id` (or the configured
/// default network) using the config file at `config_path`.
pub async fn deploy_from_config(
    config_path: Option<&str>,
    network_id: Option<u64>,
) -> Result<DeploymentReport> {
    dotenv().ok(); // Load environment variables from .env file

    let config = ConfigWrapper::from_file(config_path)?;
    let network_id = match network_id {
        Some(id) => id,
        None => config.get_default_network()?,
    };

    let deployment_config = config.get_deployment_config(network_id)?;
    let settings = config.get_network_settings(network_id)?;
    let artifacts_dir = config.get_artifacts_dir();
    debug!("Reading artifacts from {}", artifacts_dir.display());

    let network = connect_http(&settings, signer_from_env()?)?;
    let orchestrator = Orchestrator::new(
        deployment_config,
        HardhatArtifacts::new(artifacts_dir),
        network,
    );

    Ok(orchestrator.run().await?)
}
