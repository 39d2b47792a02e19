//! Loading of compiled contract artifacts.
//!
//! Contract compilation is out of scope for these scripts: the ABI,
//! deployment bytecode, and flattened source of each contract are read
//! pre-compiled from `<artifacts-dir>/<Name>.json`.

use std::{fs, path::Path};

use ethers::{abi::Abi, types::Bytes};
use serde::Deserialize;

use crate::{constants::TEST_TOKEN_ARTIFACT, errors::ScriptError, types::Target};

/// The on-disk shape of a compiled artifact
#[derive(Deserialize)]
struct RawArtifact {
    /// The contract ABI
    abi: Abi,
    /// The deployment bytecode, as 0x-prefixed hex
    bytecode: Bytes,
    /// The flattened source text, used for verification publishing
    #[serde(default)]
    source: String,
}

/// A compiled contract ready to deploy
#[derive(Clone, Debug)]
pub struct ContractArtifact {
    /// The contract's symbolic name
    pub name: String,
    /// The contract ABI
    pub abi: Abi,
    /// The deployment bytecode
    pub bytecode: Bytes,
    /// The flattened source text
    pub source: String,
}

impl ContractArtifact {
    /// Parse an artifact from its JSON representation
    pub fn from_json(name: &str, raw: &str) -> Result<Self, ScriptError> {
        let raw: RawArtifact = serde_json::from_str(raw)
            .map_err(|e| ScriptError::ArtifactParsing(format!("{}: {}", name, e)))?;

        Ok(Self {
            name: name.to_string(),
            abi: raw.abi,
            bytecode: raw.bytecode,
            source: raw.source,
        })
    }
}

/// The artifacts of the four plan contracts plus the auxiliary test token
pub struct Artifacts {
    /// The governance contract artifact
    pub governance: ContractArtifact,
    /// The priority queue contract artifact
    pub priority_queue: ContractArtifact,
    /// The verifier contract artifact
    pub verifier: ContractArtifact,
    /// The rollup contract artifact
    pub rollup: ContractArtifact,
    /// The test ERC20 token artifact
    pub test_token: ContractArtifact,
}

impl Artifacts {
    /// Load all artifacts from the given directory
    pub fn load(dir: &Path) -> Result<Self, ScriptError> {
        let load_one = |name: &str| -> Result<ContractArtifact, ScriptError> {
            let path = dir.join(format!("{}.json", name));
            let contents = fs::read_to_string(&path)
                .map_err(|e| ScriptError::ReadFile(format!("{}: {}", path.display(), e)))?;
            ContractArtifact::from_json(name, &contents)
        };

        Ok(Self {
            governance: load_one(&Target::Governance.to_string())?,
            priority_queue: load_one(&Target::PriorityQueue.to_string())?,
            verifier: load_one(&Target::Verifier.to_string())?,
            rollup: load_one(&Target::Rollup.to_string())?,
            test_token: load_one(TEST_TOKEN_ARTIFACT)?,
        })
    }

    /// The artifact for a plan target
    pub fn for_target(&self, target: Target) -> &ContractArtifact {
        match target {
            Target::Governance => &self.governance,
            Target::PriorityQueue => &self.priority_queue,
            Target::Verifier => &self.verifier,
            Target::Rollup => &self.rollup,
        }
    }
}
