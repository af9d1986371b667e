use super::deployment_network::DeploymentNetwork;
use crate::error::DeploymentError;
use crate::types::deployment::{DeploymentRequest, DeploymentResult};
use crate::types::deployment_config::NetworkSettings;
use alloy::network::{EthereumWallet, ReceiptResponse, TransactionBuilder};
use alloy::primitives::TxHash;
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use async_trait::async_trait;
use eyre::{Result, eyre};
use log::debug;
use std::env;
use std::time::Duration;
use tokio::time::Instant;

pub const PRIVATE_KEY_ENV: &str = "PRIVATE_KEY";

/// Deploys through a JSON-RPC node, signing locally.
pub struct RpcNetwork<P> {
    provider: P,
    poll_interval: Duration,
    confirmation_timeout: Duration,
}

impl<P: Provider> RpcNetwork<P> {
    pub fn new(provider: P, poll_interval: Duration, confirmation_timeout: Duration) -> Self {
        Self {
            provider,
            poll_interval,
            confirmation_timeout,
        }
    }
}

pub fn connect_http(
    settings: &NetworkSettings,
    signer: PrivateKeySigner,
) -> Result<RpcNetwork<impl Provider + use<>>> {
    let url = settings
        .rpc_url
        .parse::<Url>()
        .map_err(|e| eyre!("Invalid RPC URL: {}", e))?;
    debug!("Deploying from {}", signer.address());
    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .on_http(url);

    Ok(RpcNetwork::new(
        provider,
        settings.poll_interval,
        settings.confirmation_timeout,
    ))
}

pub fn signer_from_env() -> Result<PrivateKeySigner> {
    let key = env::var(PRIVATE_KEY_ENV)
        .map_err(|_| eyre!("Environment variable {} not set", PRIVATE_KEY_ENV))?;
    key.trim()
        .parse::<PrivateKeySigner>()
        .map_err(|e| eyre!("Invalid {}: {}", PRIVATE_KEY_ENV, e))
}

#[async_trait]
impl<P: Provider> DeploymentNetwork for RpcNetwork<P> {
    async fn submit(&self, request: &DeploymentRequest) -> Result<TxHash, DeploymentError> {
        let tx = TransactionRequest::default()
            .with_deploy_code(request.init_code.clone())
            .with_value(request.value());

        let pending = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| DeploymentError::from_rpc(&request.contract, e))?;
        let tx_hash = *pending.tx_hash();
        debug!("{} deployment submitted in tx {}", request.contract, tx_hash);
        Ok(tx_hash)
    }

    async fn await_confirmation(
        &self,
        contract: &str,
        tx_hash: TxHash,
    ) -> Result<DeploymentResult, DeploymentError> {
        let started = Instant::now();
        loop {
            let receipt = self
                .provider
                .get_transaction_receipt(tx_hash)
                .await
                .map_err(|e| DeploymentError::from_rpc(contract, e))?;

            if let Some(receipt) = receipt {
                debug!(
                    "{} included in block {:?}",
                    tx_hash,
                    receipt.block_number()
                );
                return deployment_result(contract, tx_hash, &receipt);
            }

            check_deadline(contract, tx_hash, started.elapsed(), self.confirmation_timeout)?;
            debug!("Waiting for {} to be included", tx_hash);
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// Maps an included deployment transaction to the created contract.
fn deployment_result(
    contract: &str,
    tx_hash: TxHash,
    receipt: &impl ReceiptResponse,
) -> Result<DeploymentResult, DeploymentError> {
    if !receipt.status() {
        return Err(DeploymentError::TransactionReverted {
            contract: contract.to_string(),
            tx_hash,
        });
    }
    let address =
        receipt
            .contract_address()
            .ok_or_else(|| DeploymentError::MissingContractAddress {
                contract: contract.to_string(),
                tx_hash,
            })?;
    Ok(DeploymentResult { address, tx_hash })
}

fn check_deadline(
    contract: &str,
    tx_hash: TxHash,
    elapsed: Duration,
    timeout: Duration,
) -> Result<(), DeploymentError> {
    if elapsed >= timeout {
        return Err(DeploymentError::ConfirmationTimeout {
            contract: contract.to_string(),
            tx_hash,
            waited_secs: elapsed.as_secs(),
        });
    }
    Ok(())
}
