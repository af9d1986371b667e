use alloy::dyn_abi::DynSolValue;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use serde::Serialize;

/// A single contract deployment, ready to be submitted. Lives only until the
/// network layer has accepted it.
#[derive(Debug, Clone)]
pub struct DeploymentRequest {
    pub contract: String,
    pub constructor_args: Vec<DynSolValue>,
    pub value: Option<U256>,
    // Creation bytecode followed by the ABI encoded constructor arguments.
    pub init_code: Bytes,
}

impl DeploymentRequest {
    pub fn value(&self) -> U256 {
        self.value.unwrap_or(U256::ZERO)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeploymentResult {
    pub address: Address,
    pub tx_hash: TxHash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeploymentReport {
    pub marketplace: DeploymentResult,
    pub dao: DeploymentResult,
}
