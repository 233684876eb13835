//! The chain client through which every deployment step reaches the network
//!
//! All writes block until their transaction receipt is available and fail if
//! the transaction reverted, so a returned `Ok` always reflects a confirmed
//! on-chain effect. Reads are never cached.

use abi::{AccessManager, CreditStation};
use alloy::{
    network::TransactionBuilder,
    providers::{DynProvider, Provider},
    rpc::types::TransactionRequest,
};
use alloy_primitives::{Address, Bytes, Selector};
use itertools::Itertools;
use tracing::debug;

use crate::{
    artifacts::ContractArtifacts,
    errors::ScriptError,
    types::{CreditStationContract, RoleId},
    utils::send_tx,
};

/// The operations the deployment steps need from a chain
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// The account that signs every transaction sent by this client
    fn sender(&self) -> Address;

    /// Submit a creation transaction for `contract` with the given
    /// ABI-encoded constructor arguments and wait for its receipt,
    /// returning the address of the created contract
    async fn deploy_contract(
        &self,
        contract: CreditStationContract,
        constructor_args: &Bytes,
    ) -> Result<Address, ScriptError>;

    /// The runtime code at `address`
    async fn code_at(&self, address: Address) -> Result<Bytes, ScriptError>;

    /// Read the admin role id from the access manager
    async fn admin_role(&self, registry: Address) -> Result<RoleId, ScriptError>;

    /// Read the fulfill agent role id from the access manager
    async fn fulfill_agent_role(&self, registry: Address) -> Result<RoleId, ScriptError>;

    /// Whether `account` is currently a member of `role`
    async fn has_role(
        &self,
        registry: Address,
        role: RoleId,
        account: Address,
    ) -> Result<bool, ScriptError>;

    /// Grant `role` to `account`
    async fn grant_role(
        &self,
        registry: Address,
        role: RoleId,
        account: Address,
        execution_delay: u32,
    ) -> Result<(), ScriptError>;

    /// Renounce `role` on behalf of the sender. `caller_confirmation` must be the sender.
    async fn renounce_role(
        &self,
        registry: Address,
        role: RoleId,
        caller_confirmation: Address,
    ) -> Result<(), ScriptError>;

    /// Revoke `role` from `account`
    async fn revoke_role(
        &self,
        registry: Address,
        role: RoleId,
        account: Address,
    ) -> Result<(), ScriptError>;

    /// Restrict the given selectors of `target` to `role`, in one transaction
    async fn set_target_function_role(
        &self,
        registry: Address,
        target: Address,
        selectors: &[Selector],
        role: RoleId,
    ) -> Result<(), ScriptError>;

    /// The role required to call `selector` on `target`
    async fn target_function_role(
        &self,
        registry: Address,
        target: Address,
        selector: Selector,
    ) -> Result<RoleId, ScriptError>;

    /// Set the version tag of a credit station or ledger
    async fn set_version(&self, target: Address, version: &str) -> Result<(), ScriptError>;
}

/// A [`ChainClient`] backed by an RPC provider with a local signer attached
#[derive(Clone)]
pub struct RpcChainClient {
    /// The signing provider
    provider: DynProvider,
    /// The address of the signer attached to the provider
    sender: Address,
    /// Where creation bytecode is read from
    artifacts: ContractArtifacts,
}

impl RpcChainClient {
    /// Wrap a signing provider
    pub fn new(provider: DynProvider, sender: Address, artifacts: ContractArtifacts) -> Self {
        Self {
            provider,
            sender,
            artifacts,
        }
    }

    /// The underlying provider
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// An access manager instance at `registry`
    fn access_manager(&self, registry: Address) -> AccessManager<DynProvider> {
        AccessManager::new(registry, self.provider.clone())
    }
}

impl ChainClient for RpcChainClient {
    fn sender(&self) -> Address {
        self.sender
    }

    async fn deploy_contract(
        &self,
        contract: CreditStationContract,
        constructor_args: &Bytes,
    ) -> Result<Address, ScriptError> {
        let bytecode = self.artifacts.bytecode(contract)?;
        let mut deploy_code = bytecode.to_vec();
        deploy_code.extend_from_slice(constructor_args);

        let tx = TransactionRequest::default()
            .with_from(self.sender)
            .with_deploy_code(deploy_code);

        let receipt = self
            .provider
            .send_transaction(tx)
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
            .get_receipt()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;
        debug!("{contract} creation included in tx {:#x}", receipt.transaction_hash);

        if !receipt.status() {
            return Err(ScriptError::ContractDeployment(format!(
                "{} creation reverted in tx {:#x}",
                contract, receipt.transaction_hash
            )));
        }

        receipt.contract_address.ok_or_else(|| {
            ScriptError::ContractDeployment(format!(
                "receipt for {} has no contract address",
                contract
            ))
        })
    }

    async fn code_at(&self, address: Address) -> Result<Bytes, ScriptError> {
        self.provider
            .get_code_at(address)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }

    async fn admin_role(&self, registry: Address) -> Result<RoleId, ScriptError> {
        let role = self
            .access_manager(registry)
            .ADMIN_ROLE()
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        Ok(RoleId(role))
    }

    async fn fulfill_agent_role(&self, registry: Address) -> Result<RoleId, ScriptError> {
        let role = self
            .access_manager(registry)
            .FULFILL_AGENT_ROLE()
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        Ok(RoleId(role))
    }

    async fn has_role(
        &self,
        registry: Address,
        role: RoleId,
        account: Address,
    ) -> Result<bool, ScriptError> {
        let membership = self
            .access_manager(registry)
            .hasRole(role.0, account)
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        Ok(membership.isMember)
    }

    async fn grant_role(
        &self,
        registry: Address,
        role: RoleId,
        account: Address,
        execution_delay: u32,
    ) -> Result<(), ScriptError> {
        let manager = self.access_manager(registry);
        send_tx(manager.grantRole(role.0, account, execution_delay)).await?;
        Ok(())
    }

    async fn renounce_role(
        &self,
        registry: Address,
        role: RoleId,
        caller_confirmation: Address,
    ) -> Result<(), ScriptError> {
        let manager = self.access_manager(registry);
        send_tx(manager.renounceRole(role.0, caller_confirmation)).await?;
        Ok(())
    }

    async fn revoke_role(
        &self,
        registry: Address,
        role: RoleId,
        account: Address,
    ) -> Result<(), ScriptError> {
        let manager = self.access_manager(registry);
        send_tx(manager.revokeRole(role.0, account)).await?;
        Ok(())
    }

    async fn set_target_function_role(
        &self,
        registry: Address,
        target: Address,
        selectors: &[Selector],
        role: RoleId,
    ) -> Result<(), ScriptError> {
        debug!(
            "restricting [{}] on {:#x} to {}",
            selectors.iter().map(|s| format!("{s}")).join(", "),
            target,
            role
        );
        let manager = self.access_manager(registry);
        send_tx(manager.setTargetFunctionRole(target, selectors.to_vec(), role.0)).await?;
        Ok(())
    }

    async fn target_function_role(
        &self,
        registry: Address,
        target: Address,
        selector: Selector,
    ) -> Result<RoleId, ScriptError> {
        let role = self
            .access_manager(registry)
            .getTargetFunctionRole(target, selector)
            .call()
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;
        Ok(RoleId(role))
    }

    async fn set_version(&self, target: Address, version: &str) -> Result<(), ScriptError> {
        // The credit station and the ledger share the `setVersion(string)` selector
        let contract = CreditStation::new(target, self.provider.clone());
        send_tx(contract.setVersion(version.to_string())).await?;
        Ok(())
    }
}
