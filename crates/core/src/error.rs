use alloy::primitives::TxHash;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a deployment run. The orchestrator never recovers
/// from any of these; they are surfaced to the caller as-is.
#[derive(Debug, Clone, Error)]
pub enum DeploymentError {
    #[error("artifact for {name} not found under {}", path.display())]
    ArtifactNotFound { name: String, path: PathBuf },

    #[error("artifact for {name} is invalid: {reason}")]
    InvalidArtifact { name: String, reason: String },

    #[error("invalid constructor arguments for {contract}: {reason}")]
    InvalidConstructorArgs { contract: String, reason: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("insufficient funds to deploy {contract}: {reason}")]
    InsufficientFunds { contract: String, reason: String },

    #[error("deployment of {contract} reverted in tx {tx_hash}")]
    TransactionReverted { contract: String, tx_hash: TxHash },

    #[error("no confirmation for {contract} (tx {tx_hash}) after {waited_secs}s")]
    ConfirmationTimeout {
        contract: String,
        tx_hash: TxHash,
        waited_secs: u64,
    },

    #[error("receipt for {contract} (tx {tx_hash}) carries no contract address")]
    MissingContractAddress { contract: String, tx_hash: TxHash },
}

// geth and anvil, then hardhat node.
const INSUFFICIENT_FUNDS_MESSAGES: [&str; 2] = ["insufficient funds", "doesn't have enough funds"];

impl DeploymentError {
    /// Maps a transport or RPC failure raised while deploying `contract`.
    /// Nodes only report a funding shortfall through the error message.
    pub fn from_rpc(contract: &str, err: impl std::fmt::Display) -> Self {
        let reason = err.to_string();
        let lowered = reason.to_lowercase();
        if INSUFFICIENT_FUNDS_MESSAGES
            .iter()
            .any(|m| lowered.contains(m))
        {
            DeploymentError::InsufficientFunds {
                contract: contract.to_string(),
                reason,
            }
        } else {
            DeploymentError::Network(reason)
        }
    }
}
