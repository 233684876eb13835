//! Implementations of the various deploy scripts

use std::path::Path;

use tracing::info;

use crate::{
    chain::ChainClient,
    cli::{DeployMainnetArgs, DeploySchainArgs, TransferOwnershipArgs},
    errors::ScriptError,
    ownership::transfer_ownership,
    recorder::record_addresses,
    sequencer::deploy_sequence,
    types::{Deployment, DeploymentParams, MainnetParams, SchainParams},
    utils::parse_address,
};

/// Deploy the single-chain topology and record its addresses
pub async fn deploy_mainnet(
    args: DeployMainnetArgs,
    client: &impl ChainClient,
    data_dir: &Path,
) -> Result<(), ScriptError> {
    let params = MainnetParams {
        owner: args.owner.as_deref().map(parse_address).transpose()?,
        receiver: args.receiver.as_deref().map(parse_address).transpose()?,
        version: args.version,
    };

    let deployment = deploy_sequence(client, DeploymentParams::Mainnet(params)).await?;
    store_deployment(&deployment, &args.title, data_dir)
}

/// Deploy the subchain topology and record its addresses under the subchain name
pub async fn deploy_schain(
    args: DeploySchainArgs,
    client: &impl ChainClient,
    data_dir: &Path,
) -> Result<(), ScriptError> {
    let params = SchainParams {
        owner: args.owner.as_deref().map(parse_address).transpose()?,
        version: args.version,
    };

    let deployment = deploy_sequence(client, DeploymentParams::Schain(params)).await?;
    store_deployment(&deployment, &args.schain_name, data_dir)
}

/// Transfer the admin role of an existing access manager
pub async fn transfer_admin(
    args: TransferOwnershipArgs,
    client: &impl ChainClient,
) -> Result<(), ScriptError> {
    let access_manager = parse_address(&args.access_manager)?;
    let new_owner = parse_address(&args.new_owner)?;
    let old_owner = match args.old_owner.as_deref() {
        Some(old_owner) => parse_address(old_owner)?,
        None => client.sender(),
    };

    transfer_ownership(client, access_manager, old_owner, new_owner).await
}

/// Write the addresses of a finished deployment under `title`
fn store_deployment(
    deployment: &Deployment,
    title: &str,
    data_dir: &Path,
) -> Result<(), ScriptError> {
    info!("Storing addresses");
    let handles = deployment.contracts();
    let names: Vec<&str> = handles.iter().map(|h| h.contract().name()).collect();
    record_addresses(&names, &handles, title, data_dir)?;

    info!("Done");
    Ok(())
}
