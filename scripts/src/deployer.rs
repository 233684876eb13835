//! Deployment of a single contract

use alloy_primitives::Bytes;
use tracing::info;

use crate::{
    chain::ChainClient,
    errors::ScriptError,
    types::{ContractHandle, CreditStationContract},
};

/// Deploy `contract` with the given ABI-encoded constructor arguments.
///
/// Blocks until the creation transaction is confirmed and the contract's code
/// is observable at the new address. Failures are returned as-is; contracts
/// deployed by earlier steps are left in place.
pub async fn deploy_contract(
    client: &impl ChainClient,
    contract: CreditStationContract,
    constructor_args: Bytes,
) -> Result<ContractHandle, ScriptError> {
    info!("Deploying {}...", contract);
    let address = client.deploy_contract(contract, &constructor_args).await?;

    let code = client.code_at(address).await?;
    if code.is_empty() {
        return Err(ScriptError::ContractDeployment(format!(
            "no code found for {} at {:#x} after confirmation",
            contract, address
        )));
    }

    info!("{}: {}", contract, address.to_checksum(None));
    let handle = ContractHandle::new(contract, address, constructor_args);
    info!(
        "Verify {} at {:#x} with constructor arguments {}",
        contract,
        address,
        handle.verification_args()
    );
    Ok(handle)
}
