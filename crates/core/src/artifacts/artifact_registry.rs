use crate::error::DeploymentError;
use crate::types::deployment::DeploymentRequest;
use alloy::dyn_abi::{DynSolValue, JsonAbiExt};
use alloy::json_abi::{ContractObject, JsonAbi, StateMutability};
use alloy::primitives::{Bytes, U256};

/// Resolves compiled contracts by name.
pub trait ArtifactRegistry: Send + Sync {
    fn get_factory(&self, name: &str) -> Result<ContractFactory, DeploymentError>;
}

/// A compiled contract that can produce deployment requests for itself.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    name: String,
    abi: JsonAbi,
    bytecode: Bytes,
}

impl ContractFactory {
    pub fn new(name: String, abi: JsonAbi, bytecode: Bytes) -> Self {
        Self {
            name,
            abi,
            bytecode,
        }
    }

    pub fn from_contract_object(
        name: &str,
        object: ContractObject,
    ) -> Result<Self, DeploymentError> {
        let bytecode = object
            .bytecode
            .filter(|b| !b.is_empty())
            .ok_or_else(|| DeploymentError::InvalidArtifact {
                name: name.to_string(),
                reason: "missing creation bytecode".to_string(),
            })?;
        Ok(Self::new(
            name.to_string(),
            object.abi.unwrap_or_default(),
            bytecode,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    /// Type checks `args` against the constructor in the ABI and appends their
    /// encoding to the creation bytecode.
    pub fn deployment_request(
        &self,
        args: Vec<DynSolValue>,
        value: Option<U256>,
    ) -> Result<DeploymentRequest, DeploymentError> {
        let invalid = |reason: String| DeploymentError::InvalidConstructorArgs {
            contract: self.name.clone(),
            reason,
        };

        let encoded_args = match &self.abi.constructor {
            Some(constructor) => {
                let sends_value = value.is_some_and(|v| !v.is_zero());
                if sends_value && constructor.state_mutability != StateMutability::Payable {
                    return Err(invalid(
                        "value attached to a non-payable constructor".to_string(),
                    ));
                }
                constructor
                    .abi_encode_input(&args)
                    .map_err(|e| invalid(e.to_string()))?
            }
            None if args.is_empty() && value.is_none_or(|v| v.is_zero()) => Vec::new(),
            None => {
                return Err(invalid(format!(
                    "contract has no constructor but got {} argument(s) and value {}",
                    args.len(),
                    value.unwrap_or_default()
                )));
            }
        };

        let mut init_code = self.bytecode.to_vec();
        init_code.extend_from_slice(&encoded_args);

        Ok(DeploymentRequest {
            contract: self.name.clone(),
            constructor_args: args,
            value,
            init_code: init_code.into(),
        })
    }
}
