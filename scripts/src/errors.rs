//! Definitions of errors that can occur during the execution of the deployment scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deployment scripts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptError {
    /// Error initializing the RPC client
    ClientInitialization(String),
    /// Error locating or parsing a compilation artifact
    ArtifactParsing(String),
    /// Error constructing calldata or parsing an argument for a contract call
    CalldataConstruction(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error sending a transaction to, or reading from, a contract
    ContractInteraction(String),
    /// Error reading a deployment record
    ReadDeployments(String),
    /// Error writing a deployment record
    WriteDeployments(String),
    /// The inputs of an ownership transfer do not describe a valid transfer, e.g. the
    /// old holder lacks the admin role.
    /// Raised before any mutating transaction is sent.
    TransferPrecondition(String),
    /// A confirmed admin grant did not take effect. The previous admin was left in place.
    GrantNotEffective(String),
    /// A confirmed admin revocation did not take effect. Both accounts may hold the admin
    /// role and the registry needs manual inspection.
    RevokeNotEffective(String),
    /// The names and contracts handed to the address recorder do not line up
    RecordMismatch(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ClientInitialization(s) => write!(f, "error initializing client: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::CalldataConstruction(s) => write!(f, "error constructing calldata: {}", s),
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::ReadDeployments(s) => write!(f, "error reading deployments: {}", s),
            ScriptError::WriteDeployments(s) => write!(f, "error writing deployments: {}", s),
            ScriptError::TransferPrecondition(s) => {
                write!(f, "ownership transfer precondition failed: {}", s)
            }
            ScriptError::GrantNotEffective(s) => {
                write!(f, "ownership transfer failed at grant verification: {}", s)
            }
            ScriptError::RevokeNotEffective(s) => write!(
                f,
                "ownership transfer failed at revoke verification, manual intervention required: {}",
                s
            ),
            ScriptError::RecordMismatch(s) => write!(f, "error recording addresses: {}", s),
        }
    }
}

impl Error for ScriptError {}
