//! Transfer of the admin role of an access manager from one account to another
//!
//! The transfer is a fixed sequence of stages, each write followed by a read
//! that checks its effect:
//!
//! `Start -> PreconditionChecked -> Granted -> Verified -> Revoked -> Confirmed`
//!
//! Any failure aborts the transfer where it stands. The old holder's admin
//! role is only touched after the new holder was observed holding it, so an
//! aborted transfer never leaves the access manager without an admin.

use alloy_primitives::Address;
use tracing::{info, warn};

use crate::{
    chain::ChainClient,
    constants::NO_EXECUTION_DELAY,
    errors::ScriptError,
    types::{RoleId, TransferStage},
};

/// Move the admin role of `registry` from `old_holder` to `new_holder`.
///
/// The client's sender performs every write. If the sender is `old_holder`
/// it renounces its own role, otherwise it revokes `old_holder`'s role and
/// must itself be an admin.
pub async fn transfer_ownership(
    client: &impl ChainClient,
    registry: Address,
    old_holder: Address,
    new_holder: Address,
) -> Result<(), ScriptError> {
    let admin_role = client.admin_role(registry).await?;
    let mut session = TransferSession {
        client,
        registry,
        old_holder,
        new_holder,
        admin_role,
        stage: TransferStage::Start,
    };

    session.check_precondition().await?;
    session.grant().await?;
    session.verify_grant().await?;
    session.revoke().await?;
    session.verify_revoke().await?;

    info!(
        "Admin role of {:#x} transferred from {:#x} to {:#x}",
        registry, old_holder, new_holder
    );
    Ok(())
}

/// The state of one admin role transfer
struct TransferSession<'a, C> {
    /// The client performing the transfer
    client: &'a C,
    /// The access manager whose admin role moves
    registry: Address,
    /// The current admin
    old_holder: Address,
    /// The admin after the transfer
    new_holder: Address,
    /// The admin role id, as read from the access manager
    admin_role: RoleId,
    /// The last stage reached
    stage: TransferStage,
}

impl<C: ChainClient> TransferSession<'_, C> {
    /// Move from `from` to `to`
    fn advance(&mut self, from: TransferStage, to: TransferStage) {
        debug_assert_eq!(self.stage, from, "ownership transfer stages out of order");
        self.stage = to;
        info!("Ownership transfer: {}", self.stage);
    }

    /// Whether `account` currently holds the admin role, read from the chain
    async fn is_admin(&self, account: Address) -> Result<bool, ScriptError> {
        self.client
            .has_role(self.registry, self.admin_role, account)
            .await
    }

    /// Check that the transfer is possible without sending anything
    async fn check_precondition(&mut self) -> Result<(), ScriptError> {
        if self.old_holder == self.new_holder {
            return Err(ScriptError::TransferPrecondition(format!(
                "old and new holder are both {:#x}",
                self.old_holder
            )));
        }

        // No key controls the zero address
        if self.new_holder == Address::ZERO {
            return Err(ScriptError::TransferPrecondition(format!(
                "refusing to transfer the admin role of {:#x} to the zero address",
                self.registry
            )));
        }

        if !self.is_admin(self.old_holder).await? {
            return Err(ScriptError::TransferPrecondition(format!(
                "{:#x} does not hold the admin role of {:#x}",
                self.old_holder, self.registry
            )));
        }

        let sender = self.client.sender();
        if sender != self.old_holder && !self.is_admin(sender).await? {
            return Err(ScriptError::TransferPrecondition(format!(
                "sender {:#x} does not hold the admin role of {:#x}",
                sender, self.registry
            )));
        }

        self.advance(TransferStage::Start, TransferStage::PreconditionChecked);
        Ok(())
    }

    /// Grant the admin role to the new holder
    async fn grant(&mut self) -> Result<(), ScriptError> {
        self.client
            .grant_role(
                self.registry,
                self.admin_role,
                self.new_holder,
                NO_EXECUTION_DELAY,
            )
            .await?;

        self.advance(TransferStage::PreconditionChecked, TransferStage::Granted);
        Ok(())
    }

    /// Check that the new holder now holds the admin role
    async fn verify_grant(&mut self) -> Result<(), ScriptError> {
        if !self.is_admin(self.new_holder).await? {
            return Err(ScriptError::GrantNotEffective(format!(
                "{:#x} does not hold the admin role of {:#x} after the grant; {:#x} keeps it",
                self.new_holder, self.registry, self.old_holder
            )));
        }

        self.advance(TransferStage::Granted, TransferStage::Verified);
        Ok(())
    }

    /// Remove the admin role from the old holder
    async fn revoke(&mut self) -> Result<(), ScriptError> {
        if self.client.sender() == self.old_holder {
            self.client
                .renounce_role(self.registry, self.admin_role, self.old_holder)
                .await?;
        } else {
            self.client
                .revoke_role(self.registry, self.admin_role, self.old_holder)
                .await?;
        }

        self.advance(TransferStage::Verified, TransferStage::Revoked);
        Ok(())
    }

    /// Check that the old holder no longer holds the admin role
    async fn verify_revoke(&mut self) -> Result<(), ScriptError> {
        if self.is_admin(self.old_holder).await? {
            warn!(
                "Both {:#x} and {:#x} hold the admin role of {:#x}",
                self.old_holder, self.new_holder, self.registry
            );
            return Err(ScriptError::RevokeNotEffective(format!(
                "{:#x} still holds the admin role of {:#x} after the revoke",
                self.old_holder, self.registry
            )));
        }

        self.advance(TransferStage::Revoked, TransferStage::Confirmed);
        Ok(())
    }
}
