use alloy_primitives::Address;
use eyre::Result;
use scripts::{errors::ScriptError, ownership::transfer_ownership};
use tests::{
    mock::{MockFaults, MockTx, MOCK_ADMIN_ROLE},
    utils::{account, deploy_access_manager, deployer, mock_chain},
};

// --------------------
// | SUCCESSFUL PATHS |
// --------------------

#[tokio::test]
async fn test_transfer_from_sender_renounces() -> Result<()> {
    let chain = mock_chain();
    let registry = deploy_access_manager(&chain, deployer()).await?.address();
    let owner = account(0xaa);

    transfer_ownership(&chain, registry, deployer(), owner).await?;

    assert!(chain.is_admin(registry, owner));
    assert!(!chain.is_admin(registry, deployer()));
    assert!(matches!(
        chain.txs().last(),
        Some(MockTx::RenounceRole { account, .. }) if *account == deployer()
    ));

    Ok(())
}

#[tokio::test]
async fn test_transfer_of_third_party_revokes() -> Result<()> {
    let chain = mock_chain();
    let old_owner = account(0x01);
    let new_owner = account(0x02);
    let registry = deploy_access_manager(&chain, old_owner).await?.address();
    chain.seed_role(registry, MOCK_ADMIN_ROLE, deployer());

    transfer_ownership(&chain, registry, old_owner, new_owner).await?;

    assert!(chain.is_admin(registry, new_owner));
    assert!(!chain.is_admin(registry, old_owner));
    assert!(matches!(
        chain.txs().last(),
        Some(MockTx::RevokeRole { account, .. }) if *account == old_owner
    ));

    Ok(())
}

#[tokio::test]
async fn test_grant_precedes_removal() -> Result<()> {
    let chain = mock_chain();
    let registry = deploy_access_manager(&chain, deployer()).await?.address();
    let owner = account(0xaa);

    transfer_ownership(&chain, registry, deployer(), owner).await?;

    // Deploy, grant, renounce
    let txs = chain.txs();
    assert_eq!(txs.len(), 3);
    assert!(matches!(&txs[1], MockTx::GrantRole { account, .. } if *account == owner));
    assert!(matches!(&txs[2], MockTx::RenounceRole { .. }));

    Ok(())
}

// -----------------------
// | PRECONDITION CHECKS |
// -----------------------

#[tokio::test]
async fn test_old_holder_without_admin_sends_nothing() -> Result<()> {
    let chain = mock_chain();
    let registry = deploy_access_manager(&chain, deployer()).await?.address();
    let txs_before = chain.txs().len();

    let res = transfer_ownership(&chain, registry, account(0x01), account(0x02)).await;

    assert!(matches!(res, Err(ScriptError::TransferPrecondition(_))));
    assert_eq!(chain.txs().len(), txs_before);
    assert!(chain.is_admin(registry, deployer()));

    Ok(())
}

#[tokio::test]
async fn test_transfer_to_self_rejected() -> Result<()> {
    let chain = mock_chain();
    let registry = deploy_access_manager(&chain, deployer()).await?.address();
    let txs_before = chain.txs().len();

    let res = transfer_ownership(&chain, registry, deployer(), deployer()).await;

    assert!(matches!(res, Err(ScriptError::TransferPrecondition(_))));
    assert_eq!(chain.txs().len(), txs_before);
    assert!(chain.is_admin(registry, deployer()));

    Ok(())
}

#[tokio::test]
async fn test_sender_without_admin_sends_nothing() -> Result<()> {
    let chain = mock_chain();
    let old_owner = account(0x01);
    let registry = deploy_access_manager(&chain, old_owner).await?.address();
    let txs_before = chain.txs().len();

    let res = transfer_ownership(&chain, registry, old_owner, account(0x02)).await;

    assert!(matches!(res, Err(ScriptError::TransferPrecondition(_))));
    assert_eq!(chain.txs().len(), txs_before);
    assert!(chain.is_admin(registry, old_owner));

    Ok(())
}

#[tokio::test]
async fn test_transfer_to_zero_address_rejected() -> Result<()> {
    let chain = mock_chain();
    let registry = deploy_access_manager(&chain, deployer()).await?.address();
    let txs_before = chain.txs().len();

    let res = transfer_ownership(&chain, registry, deployer(), Address::ZERO).await;

    assert!(matches!(res, Err(ScriptError::TransferPrecondition(_))));
    assert_eq!(chain.txs().len(), txs_before);
    assert!(chain.is_admin(registry, deployer()));
    assert!(!chain.is_admin(registry, Address::ZERO));

    Ok(())
}

// -------------------------
// | UNCONFIRMED MUTATIONS |
// -------------------------

#[tokio::test]
async fn test_ineffective_grant_never_revokes() -> Result<()> {
    let chain = mock_chain();
    let registry = deploy_access_manager(&chain, deployer()).await?.address();
    let owner = account(0xaa);
    chain.set_faults(MockFaults {
        ineffective_grant: true,
        ..Default::default()
    });

    let res = transfer_ownership(&chain, registry, deployer(), owner).await;

    assert!(matches!(res, Err(ScriptError::GrantNotEffective(_))));
    assert!(chain.is_admin(registry, deployer()));
    assert!(!chain.is_admin(registry, owner));
    assert!(!chain.txs().iter().any(|tx| matches!(
        tx,
        MockTx::RenounceRole { .. } | MockTx::RevokeRole { .. }
    )));

    Ok(())
}

#[tokio::test]
async fn test_ineffective_revoke_reports_anomaly() -> Result<()> {
    let chain = mock_chain();
    let registry = deploy_access_manager(&chain, deployer()).await?.address();
    let owner = account(0xaa);
    chain.set_faults(MockFaults {
        ineffective_revoke: true,
        ..Default::default()
    });

    let res = transfer_ownership(&chain, registry, deployer(), owner).await;

    assert!(matches!(res, Err(ScriptError::RevokeNotEffective(_))));
    assert!(chain.is_admin(registry, deployer()));
    assert!(chain.is_admin(registry, owner));

    Ok(())
}

#[tokio::test]
async fn test_ineffective_third_party_revoke_reports_anomaly() -> Result<()> {
    let chain = mock_chain();
    let old_owner = account(0x01);
    let new_owner = account(0x02);
    let registry = deploy_access_manager(&chain, old_owner).await?.address();
    chain.seed_role(registry, MOCK_ADMIN_ROLE, deployer());
    chain.set_faults(MockFaults {
        ineffective_revoke: true,
        ..Default::default()
    });

    let res = transfer_ownership(&chain, registry, old_owner, new_owner).await;

    assert!(matches!(res, Err(ScriptError::RevokeNotEffective(_))));
    assert!(matches!(
        chain.txs().last(),
        Some(MockTx::RevokeRole { account, .. }) if *account == old_owner
    ));
    assert!(chain.is_admin(registry, old_owner));
    assert!(chain.is_admin(registry, new_owner));

    Ok(())
}

#[tokio::test]
async fn test_unknown_registry_fails_before_writes() -> Result<()> {
    let chain = mock_chain();

    let res = transfer_ownership(&chain, account(0x77), deployer(), account(0xaa)).await;

    assert!(matches!(res, Err(ScriptError::ContractInteraction(_))));
    assert!(chain.txs().is_empty());

    Ok(())
}
