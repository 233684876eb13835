//! Persistence of deployed contract addresses
//!
//! A record maps contract names to addresses in deployment order and is
//! written to `<data dir>/credit-station-<title>-contracts.json`, replacing
//! any record previously written under the same title.

use std::{
    fs,
    path::{Path, PathBuf},
};

use alloy_primitives::Address;
use indexmap::IndexMap;
use serde::{ser::SerializeMap, Deserialize, Serialize, Serializer};
use serde_json::ser::PrettyFormatter;
use tracing::info;

use crate::{
    constants::{RECORD_FILE_PREFIX, RECORD_FILE_SUFFIX, RECORD_INDENT},
    errors::ScriptError,
    types::ContractHandle,
};

/// An ordered mapping from contract name to deployed address
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct DeploymentRecord {
    /// The recorded addresses, keyed by contract name
    addresses: IndexMap<String, Address>,
}

impl DeploymentRecord {
    /// Pair up `names` with the addresses of `handles`.
    ///
    /// Fails if the two lists differ in length or a name repeats.
    pub fn from_handles(names: &[&str], handles: &[&ContractHandle]) -> Result<Self, ScriptError> {
        if names.len() != handles.len() {
            return Err(ScriptError::RecordMismatch(format!(
                "{} names for {} contracts",
                names.len(),
                handles.len()
            )));
        }

        let mut addresses = IndexMap::with_capacity(names.len());
        for (name, handle) in names.iter().zip(handles) {
            if addresses.insert(name.to_string(), handle.address()).is_some() {
                return Err(ScriptError::RecordMismatch(format!(
                    "duplicate contract name {name}"
                )));
            }
        }

        Ok(Self { addresses })
    }

    /// The address recorded under `name`
    pub fn get(&self, name: &str) -> Option<Address> {
        self.addresses.get(name).copied()
    }

    /// The recorded names and addresses, in deployment order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Address)> {
        self.addresses.iter().map(|(name, addr)| (name.as_str(), *addr))
    }

    /// The number of recorded contracts
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Whether the record is empty
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    /// Serialize the record as pretty JSON with four-space indentation
    pub fn to_json(&self) -> Result<Vec<u8>, ScriptError> {
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(RECORD_INDENT);
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)
            .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;
        Ok(buf)
    }
}

impl Serialize for DeploymentRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.addresses.len()))?;
        for (name, addr) in &self.addresses {
            map.serialize_entry(name, &addr.to_checksum(None))?;
        }
        map.end()
    }
}

/// The path of the record file for `title` under `data_dir`
pub fn record_path(data_dir: &Path, title: &str) -> PathBuf {
    data_dir.join(format!("{RECORD_FILE_PREFIX}{title}{RECORD_FILE_SUFFIX}"))
}

/// Record the addresses of `handles` under `names` and persist them keyed by `title`.
///
/// Returns the path written to.
pub fn record_addresses(
    names: &[&str],
    handles: &[&ContractHandle],
    title: &str,
    data_dir: &Path,
) -> Result<PathBuf, ScriptError> {
    let record = DeploymentRecord::from_handles(names, handles)?;
    write_deployment_record(&record, title, data_dir)
}

/// Write `record` keyed by `title`, overwriting any previous record
pub fn write_deployment_record(
    record: &DeploymentRecord,
    title: &str,
    data_dir: &Path,
) -> Result<PathBuf, ScriptError> {
    fs::create_dir_all(data_dir).map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;

    let path = record_path(data_dir, title);
    fs::write(&path, record.to_json()?)
        .map_err(|e| ScriptError::WriteDeployments(e.to_string()))?;

    info!("Stored {} addresses in {}", record.len(), path.display());
    Ok(path)
}

/// Read the record stored under `title`
pub fn read_deployment_record(
    title: &str,
    data_dir: &Path,
) -> Result<DeploymentRecord, ScriptError> {
    let path = record_path(data_dir, title);
    let contents = fs::read_to_string(&path).map_err(|e| {
        ScriptError::ReadDeployments(format!("failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&contents).map_err(|e| ScriptError::ReadDeployments(e.to_string()))
}

/// Read a single address from the record stored under `title`
pub fn read_deployment(key: &str, title: &str, data_dir: &Path) -> Result<Address, ScriptError> {
    read_deployment_record(title, data_dir)?
        .get(key)
        .ok_or_else(|| {
            ScriptError::ReadDeployments(format!("key {key} not found in {title} record"))
        })
}
