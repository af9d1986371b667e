use crate::error::DeploymentError;
use crate::types::deployment::{DeploymentRequest, DeploymentResult};
use alloy::primitives::TxHash;
use async_trait::async_trait;

/// The chain a deployment is submitted to. Submission and confirmation are
/// separate so callers can observe the transaction hash before it is mined.
#[async_trait]
pub trait DeploymentNetwork: Send + Sync {
    async fn submit(&self, request: &DeploymentRequest) -> Result<TxHash, DeploymentError>;

    /// Suspends until the deployment transaction is included.
    async fn await_confirmation(
        &self,
        contract: &str,
        tx_hash: TxHash,
    ) -> Result<DeploymentResult, DeploymentError>;
}
