//! Loading of contract creation bytecode from Hardhat compilation artifacts

use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use alloy_primitives::Bytes;
use serde::Deserialize;

use crate::{
    constants::ARTIFACT_EXTENSION,
    errors::ScriptError,
    types::CreditStationContract,
};

/// The subset of a Hardhat artifact the scripts care about
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct HardhatArtifact {
    /// The name of the compiled contract
    contract_name: String,
    /// The hex-encoded creation bytecode
    bytecode: String,
}

/// A directory of compiled contract artifacts
#[derive(Debug, Clone)]
pub struct ContractArtifacts {
    /// The root of the artifacts tree
    dir: PathBuf,
}

impl ContractArtifacts {
    /// Point at an artifacts directory; nothing is read until bytecode is requested
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The creation bytecode of the given contract, without constructor arguments
    pub fn bytecode(&self, contract: CreditStationContract) -> Result<Bytes, ScriptError> {
        let path = find_artifact(&self.dir, contract.name())?.ok_or_else(|| {
            ScriptError::ArtifactParsing(format!(
                "no artifact for {} under {}",
                contract,
                self.dir.display()
            ))
        })?;

        let contents =
            fs::read_to_string(&path).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;
        parse_bytecode(&contents, contract)
    }
}

/// Recursively search `dir` for `<name>.json`
fn find_artifact(dir: &Path, name: &str) -> Result<Option<PathBuf>, ScriptError> {
    let file_name = format!("{name}.{ARTIFACT_EXTENSION}");
    let entries = fs::read_dir(dir).map_err(|e| {
        ScriptError::ArtifactParsing(format!("cannot read {}: {}", dir.display(), e))
    })?;

    for entry in entries {
        let path = entry
            .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?
            .path();

        if path.is_dir() {
            if let Some(found) = find_artifact(&path, name)? {
                return Ok(Some(found));
            }
            continue;
        }

        // Exact name matching also skips the `<name>.dbg.json` debug files
        if path.file_name().is_some_and(|f| f.to_string_lossy() == file_name) {
            return Ok(Some(path));
        }
    }

    Ok(None)
}

/// Parse the creation bytecode out of an artifact's JSON contents
fn parse_bytecode(contents: &str, contract: CreditStationContract) -> Result<Bytes, ScriptError> {
    let artifact: HardhatArtifact =
        serde_json::from_str(contents).map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    if artifact.contract_name != contract.name() {
        return Err(ScriptError::ArtifactParsing(format!(
            "expected artifact for {}, found {}",
            contract, artifact.contract_name
        )));
    }

    let bytecode = Bytes::from_str(&artifact.bytecode)
        .map_err(|e| ScriptError::ArtifactParsing(e.to_string()))?;

    // Abstract contracts and interfaces compile to empty bytecode
    if bytecode.is_empty() {
        return Err(ScriptError::ArtifactParsing(format!(
            "{contract} has no creation bytecode"
        )));
    }

    Ok(bytecode)
}
