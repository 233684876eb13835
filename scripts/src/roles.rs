//! Binding of privileged contract functions to access manager roles

use alloy_primitives::Selector;
use itertools::Itertools;
use tracing::info;

use crate::{
    chain::ChainClient,
    errors::ScriptError,
    types::{ContractHandle, CreditStationContract, RoleId},
};

/// Restrict `selectors` on `target` to callers holding `role` in `registry`.
///
/// All selectors are bound in a single transaction, which is confirmed
/// before this returns.
pub async fn bind_function_to_role(
    client: &impl ChainClient,
    registry: &ContractHandle,
    target: &ContractHandle,
    selectors: &[Selector],
    role: RoleId,
) -> Result<(), ScriptError> {
    if registry.contract() != CreditStationContract::CreditStationAccessManager {
        return Err(ScriptError::CalldataConstruction(format!(
            "{} is not an access manager",
            registry.contract()
        )));
    }
    if selectors.is_empty() {
        return Err(ScriptError::CalldataConstruction(format!(
            "no selectors given to bind on {}",
            target.contract()
        )));
    }

    client
        .set_target_function_role(registry.address(), target.address(), selectors, role)
        .await?;

    info!(
        "Bound {}.[{}] to {}",
        target.contract(),
        selectors.iter().map(|s| s.to_string()).join(", "),
        role
    );
    Ok(())
}
