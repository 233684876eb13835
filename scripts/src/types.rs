//! Type definitions used throughout the scripts

use std::fmt::{self, Display};

use alloy_primitives::{hex, Address, Bytes};

use crate::constants::{
    ACCESS_MANAGER_CONTRACT_KEY, CREDIT_STATION_CONTRACT_KEY, LEDGER_CONTRACT_KEY,
};

/// The contracts that the scripts know how to deploy
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CreditStationContract {
    /// The access manager, which owns every role in a deployment
    CreditStationAccessManager,
    /// The payment intake contract on the single-chain topology
    CreditStation,
    /// The fulfillment ledger on the subchain topology
    Ledger,
}

impl CreditStationContract {
    /// The name of the contract, used both as the artifact name and as the
    /// key in the deployment record
    pub fn name(&self) -> &'static str {
        match self {
            CreditStationContract::CreditStationAccessManager => ACCESS_MANAGER_CONTRACT_KEY,
            CreditStationContract::CreditStation => CREDIT_STATION_CONTRACT_KEY,
            CreditStationContract::Ledger => LEDGER_CONTRACT_KEY,
        }
    }
}

impl Display for CreditStationContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A role id inside an access manager
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoleId(pub u64);

impl From<u64> for RoleId {
    fn from(id: u64) -> Self {
        RoleId(id)
    }
}

impl Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "role #{}", self.0)
    }
}

/// A contract whose creation transaction has been confirmed and whose code
/// was observed on-chain.
///
/// Handles are only produced by the deployer and move from step to step of a
/// deployment sequence.
#[derive(Debug, PartialEq, Eq)]
pub struct ContractHandle {
    /// Which contract this is
    contract: CreditStationContract,
    /// The address the contract was deployed at
    address: Address,
    /// The ABI-encoded constructor arguments, kept for source verification
    constructor_args: Bytes,
}

impl ContractHandle {
    /// Wrap a confirmed deployment
    pub(crate) fn new(
        contract: CreditStationContract,
        address: Address,
        constructor_args: Bytes,
    ) -> Self {
        Self {
            contract,
            address,
            constructor_args,
        }
    }

    /// Which contract this handle refers to
    pub fn contract(&self) -> CreditStationContract {
        self.contract
    }

    /// The on-chain address of the contract
    pub fn address(&self) -> Address {
        self.address
    }

    /// The ABI-encoded constructor arguments the contract was deployed with
    pub fn constructor_args(&self) -> &Bytes {
        &self.constructor_args
    }

    /// The constructor arguments as unprefixed hex, the form block explorers
    /// expect when verifying the contract's source
    pub fn verification_args(&self) -> String {
        hex::encode(&self.constructor_args)
    }
}

/// The deployment shapes supported by the sequencer
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Topology {
    /// An access manager and a credit station on the payment chain
    Mainnet,
    /// An access manager and a ledger on a subchain
    Schain,
}

impl Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topology::Mainnet => write!(f, "mainnet"),
            Topology::Schain => write!(f, "schain"),
        }
    }
}

/// Parameters of a single-chain deployment
#[derive(Debug, Clone, Default)]
pub struct MainnetParams {
    /// The account that ends up holding the admin role.
    /// Defaults to the deployer.
    pub owner: Option<Address>,
    /// The account receiving payments made to the credit station.
    /// Defaults to the deployer.
    pub receiver: Option<Address>,
    /// The version tag to set on the credit station, if any
    pub version: Option<String>,
}

/// Parameters of a subchain deployment
#[derive(Debug, Clone, Default)]
pub struct SchainParams {
    /// The account that ends up holding the admin role.
    /// Defaults to the deployer.
    pub owner: Option<Address>,
    /// The version tag to set on the ledger, if any
    pub version: Option<String>,
}

/// Parameters of a deployment, one variant per topology
#[derive(Debug, Clone)]
pub enum DeploymentParams {
    /// Single-chain parameters
    Mainnet(MainnetParams),
    /// Subchain parameters
    Schain(SchainParams),
}

impl DeploymentParams {
    /// The topology these parameters describe
    pub fn topology(&self) -> Topology {
        match self {
            DeploymentParams::Mainnet(_) => Topology::Mainnet,
            DeploymentParams::Schain(_) => Topology::Schain,
        }
    }
}

/// The contracts of a single-chain deployment
#[derive(Debug)]
pub struct MainnetDeployment {
    /// The access manager
    pub access_manager: ContractHandle,
    /// The credit station
    pub credit_station: ContractHandle,
}

/// The contracts of a subchain deployment
#[derive(Debug)]
pub struct SchainDeployment {
    /// The access manager
    pub access_manager: ContractHandle,
    /// The ledger
    pub ledger: ContractHandle,
}

/// A finished deployment of either topology
#[derive(Debug)]
pub enum Deployment {
    /// A single-chain deployment
    Mainnet(MainnetDeployment),
    /// A subchain deployment
    Schain(SchainDeployment),
}

impl Deployment {
    /// The access manager of the deployment
    pub fn access_manager(&self) -> &ContractHandle {
        match self {
            Deployment::Mainnet(d) => &d.access_manager,
            Deployment::Schain(d) => &d.access_manager,
        }
    }

    /// All contracts of the deployment, in deployment order
    pub fn contracts(&self) -> Vec<&ContractHandle> {
        match self {
            Deployment::Mainnet(d) => vec![&d.access_manager, &d.credit_station],
            Deployment::Schain(d) => vec![&d.access_manager, &d.ledger],
        }
    }
}

/// The stages of an admin role transfer.
///
/// `Aborted` is never stored; an abort surfaces as an error from the stage
/// that failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransferStage {
    /// Nothing has been checked or sent
    Start,
    /// The old holder was observed holding the admin role
    PreconditionChecked,
    /// The grant to the new holder was confirmed
    Granted,
    /// The new holder was observed holding the admin role
    Verified,
    /// The removal of the old holder was confirmed
    Revoked,
    /// The old holder was observed without the admin role
    Confirmed,
}

impl Display for TransferStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TransferStage::Start => "start",
            TransferStage::PreconditionChecked => "precondition checked",
            TransferStage::Granted => "granted",
            TransferStage::Verified => "verified",
            TransferStage::Revoked => "revoked",
            TransferStage::Confirmed => "confirmed",
        };
        write!(f, "{s}")
    }
}
