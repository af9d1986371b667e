use super::artifact_registry::{ArtifactRegistry, ContractFactory};
use crate::error::DeploymentError;
use alloy::json_abi::ContractObject;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// Reads compiler output laid out as `<root>/contracts/<Name>.sol/<Name>.json`.
pub struct HardhatArtifacts {
    root: PathBuf,
}

impl HardhatArtifacts {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn artifact_path(&self, name: &str) -> Option<PathBuf> {
        let file_name = format!("{}.json", name);
        let direct = self
            .root
            .join("contracts")
            .join(format!("{}.sol", name))
            .join(&file_name);
        if direct.is_file() {
            return Some(direct);
        }
        // Contracts declared in a differently named source file, or nested folders.
        search(&self.root, &file_name)
    }
}

fn search(dir: &Path, file_name: &str) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if path.file_name().is_some_and(|n| n != "build-info") {
                subdirs.push(path);
            }
        } else if path.file_name().is_some_and(|n| n == file_name) {
            return Some(path);
        }
    }
    subdirs.sort();
    subdirs.iter().find_map(|d| search(d, file_name))
}

impl ArtifactRegistry for HardhatArtifacts {
    fn get_factory(&self, name: &str) -> Result<ContractFactory, DeploymentError> {
        let path = self
            .artifact_path(name)
            .ok_or_else(|| DeploymentError::ArtifactNotFound {
                name: name.to_string(),
                path: self.root.clone(),
            })?;
        debug!("Loading artifact for {} from {}", name, path.display());

        let invalid = |reason: String| DeploymentError::InvalidArtifact {
            name: name.to_string(),
            reason,
        };
        let content = fs::read_to_string(&path).map_err(|e| invalid(e.to_string()))?;
        let object: ContractObject =
            serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?;

        ContractFactory::from_contract_object(name, object)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::artifact_registry::test_utils::DAO_ABI;
    use alloy::primitives::Bytes;

    fn write_artifact(root: &Path, source: &str, name: &str, body: &str) {
        let dir = root.join("contracts").join(source);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.json", name)), body).unwrap();
    }

    fn artifact_json(name: &str, abi: &str, bytecode: &str) -> String {
        format!(
            r#"{{
                "_format": "hh-sol-artifact-1",
                "contractName": "{name}",
                "sourceName": "contracts/{name}.sol",
                "abi": {abi},
                "bytecode": "{bytecode}",
                "deployedBytecode": "0x6080",
                "linkReferences": {{}},
                "deployedLinkReferences": {{}}
            }}"#
        )
    }

    #[test]
    fn test_loads_hardhat_artifact() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(
            dir.path(),
            "ZeeCardsDAO.sol",
            "ZeeCardsDAO",
            &artifact_json("ZeeCardsDAO", DAO_ABI, "0x608060405234"),
        );

        let factory = HardhatArtifacts::new(dir.path())
            .get_factory("ZeeCardsDAO")
            .unwrap();
        assert_eq!(factory.name(), "ZeeCardsDAO");
        assert_eq!(
            factory.bytecode(),
            &Bytes::from_static(&[0x60, 0x80, 0x60, 0x40, 0x52, 0x34])
        );
    }

    #[test]
    fn test_finds_artifact_in_other_source_file() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(
            dir.path(),
            "Marketplace.sol",
            "FakeNFTMarketplace",
            &artifact_json("FakeNFTMarketplace", "[]", "0x6080"),
        );

        let factory = HardhatArtifacts::new(dir.path())
            .get_factory("FakeNFTMarketplace")
            .unwrap();
        assert_eq!(factory.name(), "FakeNFTMarketplace");
    }

    #[test]
    fn test_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = HardhatArtifacts::new(dir.path())
            .get_factory("ZeeCardsDAO")
            .unwrap_err();
        assert!(matches!(err, DeploymentError::ArtifactNotFound { ref name, .. } if name == "ZeeCardsDAO"));
    }

    #[test]
    fn test_invalid_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        write_artifact(dir.path(), "Broken.sol", "Broken", "not json");
        // Interfaces compile to empty bytecode.
        write_artifact(
            dir.path(),
            "IThing.sol",
            "IThing",
            &artifact_json("IThing", "[]", "0x"),
        );

        let registry = HardhatArtifacts::new(dir.path());
        assert!(matches!(
            registry.get_factory("Broken"),
            Err(DeploymentError::InvalidArtifact { .. })
        ));
        assert!(matches!(
            registry.get_factory("IThing"),
            Err(DeploymentError::InvalidArtifact { .. })
        ));
    }
}
