//! Deployment sequences for the supported topologies
//!
//! The access manager is always deployed first, with the deployer as its
//! initial admin, and every later contract is wired to it. Once all role
//! bindings and setters have been confirmed, the admin role is moved to the
//! requested owner if that is not the deployer.

use abi::ledger_fulfill_selector;
use alloy_primitives::{Address, Bytes};
use alloy_sol_types::{abi::TokenSeq, SolType, SolValue};
use tracing::{info, warn};

use crate::{
    chain::ChainClient,
    deployer::deploy_contract,
    errors::ScriptError,
    ownership::transfer_ownership,
    roles::bind_function_to_role,
    types::{
        ContractHandle, CreditStationContract, Deployment, DeploymentParams, MainnetDeployment,
        MainnetParams, SchainDeployment, SchainParams,
    },
};

/// Deploy the contracts of the topology described by `params`
pub async fn deploy_sequence(
    client: &impl ChainClient,
    params: DeploymentParams,
) -> Result<Deployment, ScriptError> {
    info!("Deploying {} topology", params.topology());
    match params {
        DeploymentParams::Mainnet(params) => {
            deploy_mainnet(client, params).await.map(Deployment::Mainnet)
        }
        DeploymentParams::Schain(params) => {
            deploy_schain(client, params).await.map(Deployment::Schain)
        }
    }
}

/// Deploy an access manager and a credit station paying out to the receiver
pub async fn deploy_mainnet(
    client: &impl ChainClient,
    params: MainnetParams,
) -> Result<MainnetDeployment, ScriptError> {
    let owner = require_nonzero(resolve_account(client, params.owner, "OWNER"), "OWNER")?;
    let receiver =
        require_nonzero(resolve_account(client, params.receiver, "RECEIVER"), "RECEIVER")?;

    let access_manager = deploy_access_manager(client).await?;

    let credit_station = deploy_contract(
        client,
        CreditStationContract::CreditStation,
        encode_args((access_manager.address(), receiver)),
    )
    .await?;

    if let Some(version) = params.version.as_deref() {
        set_version(client, &credit_station, version).await?;
    }

    hand_over_admin(client, &access_manager, owner).await?;

    Ok(MainnetDeployment {
        access_manager,
        credit_station,
    })
}

/// Deploy an access manager and a ledger whose `fulfill` is restricted to
/// fulfill agents
pub async fn deploy_schain(
    client: &impl ChainClient,
    params: SchainParams,
) -> Result<SchainDeployment, ScriptError> {
    let owner = require_nonzero(resolve_account(client, params.owner, "OWNER"), "OWNER")?;

    let access_manager = deploy_access_manager(client).await?;

    let ledger = deploy_contract(
        client,
        CreditStationContract::Ledger,
        encode_args((access_manager.address(),)),
    )
    .await?;

    let fulfill_agent_role = client.fulfill_agent_role(access_manager.address()).await?;
    bind_function_to_role(
        client,
        &access_manager,
        &ledger,
        &[ledger_fulfill_selector()],
        fulfill_agent_role,
    )
    .await?;

    if let Some(version) = params.version.as_deref() {
        set_version(client, &ledger, version).await?;
    }

    hand_over_admin(client, &access_manager, owner).await?;

    Ok(SchainDeployment {
        access_manager,
        ledger,
    })
}

/// Use `account` if given, otherwise fall back to the deployer and report it
pub fn resolve_account(
    client: &impl ChainClient,
    account: Option<Address>,
    label: &str,
) -> Address {
    match account {
        Some(account) => account,
        None => {
            let deployer = client.sender();
            warn!("{} is not set", label);
            warn!("Using deployer address: {}", deployer.to_checksum(None));
            deployer
        }
    }
}

/// Reject the zero address before anything is deployed
fn require_nonzero(account: Address, label: &str) -> Result<Address, ScriptError> {
    if account == Address::ZERO {
        return Err(ScriptError::CalldataConstruction(format!(
            "{label} must not be the zero address"
        )));
    }
    Ok(account)
}

/// Deploy an access manager administered by the deployer
async fn deploy_access_manager(client: &impl ChainClient) -> Result<ContractHandle, ScriptError> {
    deploy_contract(
        client,
        CreditStationContract::CreditStationAccessManager,
        encode_args((client.sender(),)),
    )
    .await
}

/// Set the version tag of a credit station or ledger
async fn set_version(
    client: &impl ChainClient,
    contract: &ContractHandle,
    version: &str,
) -> Result<(), ScriptError> {
    client.set_version(contract.address(), version).await?;
    info!("{} version set to {}", contract.contract(), version);
    Ok(())
}

/// Move the admin role from the deployer to `owner`, unless they are the same account
async fn hand_over_admin(
    client: &impl ChainClient,
    access_manager: &ContractHandle,
    owner: Address,
) -> Result<(), ScriptError> {
    let deployer = client.sender();
    if owner == deployer {
        info!("Deployer remains the admin of {}", access_manager.contract());
        return Ok(());
    }

    transfer_ownership(client, access_manager.address(), deployer, owner).await
}

/// ABI-encode constructor arguments
fn encode_args<T: SolValue>(args: T) -> Bytes
where
    for<'a> <T::SolType as SolType>::Token<'a>: TokenSeq<'a>,
{
    Bytes::from(args.abi_encode_params())
}
