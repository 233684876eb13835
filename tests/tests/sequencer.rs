use std::str::FromStr;

use abi::ledger_fulfill_selector;
use alloy_primitives::Address;
use eyre::Result;
use scripts::{
    chain::ChainClient,
    errors::ScriptError,
    recorder::DeploymentRecord,
    sequencer::{deploy_mainnet, deploy_schain, deploy_sequence},
    types::{
        CreditStationContract, Deployment, DeploymentParams, MainnetParams, SchainParams,
    },
};
use tests::{
    mock::{MockChain, MockFaults, MockTx, MOCK_FULFILL_AGENT_ROLE},
    utils::{account, constructor_address, deployer, mock_chain},
};

/// Deploy both topologies on fresh chains
async fn deploy_both_topologies() -> Result<Vec<(MockChain, Deployment)>> {
    let mut res = Vec::new();
    for params in [
        DeploymentParams::Mainnet(MainnetParams {
            owner: Some(account(0xaa)),
            receiver: Some(account(0xbb)),
            version: Some("1.0.0".to_string()),
        }),
        DeploymentParams::Schain(SchainParams {
            owner: Some(account(0xaa)),
            version: Some("1.0.0".to_string()),
        }),
    ] {
        let chain = mock_chain();
        let deployment = deploy_sequence(&chain, params).await?;
        res.push((chain, deployment));
    }

    Ok(res)
}

// ----------------
// | WIRING ORDER |
// ----------------

#[tokio::test]
async fn test_access_manager_deployed_first_and_shared() -> Result<()> {
    for (chain, deployment) in deploy_both_topologies().await? {
        let deployments = chain.deployments();
        let (first, _, registry) = &deployments[0];
        assert_eq!(*first, CreditStationContract::CreditStationAccessManager);
        assert_eq!(*registry, deployment.access_manager().address());

        for (_, args, _) in &deployments[1..] {
            assert_eq!(constructor_address(args, 0), *registry);
        }
    }

    Ok(())
}

#[tokio::test]
async fn test_schain_write_order() -> Result<()> {
    let chain = mock_chain();
    let params = SchainParams {
        owner: Some(account(0xaa)),
        version: Some("2.1.0".to_string()),
    };

    deploy_schain(&chain, params).await?;

    let kinds: Vec<&str> = chain
        .txs()
        .iter()
        .map(|tx| match tx {
            MockTx::Deploy { .. } => "deploy",
            MockTx::SetTargetFunctionRole { .. } => "bind",
            MockTx::SetVersion { .. } => "version",
            MockTx::GrantRole { .. } => "grant",
            MockTx::RenounceRole { .. } => "renounce",
            MockTx::RevokeRole { .. } => "revoke",
        })
        .collect();
    assert_eq!(
        kinds,
        ["deploy", "deploy", "bind", "version", "grant", "renounce"]
    );

    Ok(())
}

// -------------------------
// | SINGLE-CHAIN TOPOLOGY |
// -------------------------

#[tokio::test]
async fn test_mainnet_with_explicit_owner_and_receiver() -> Result<()> {
    let chain = mock_chain();
    let owner = Address::from_str("0x0000000000000000000000000000000000000aaa")?;
    let receiver = Address::from_str("0x0000000000000000000000000000000000000bbb")?;
    let params = MainnetParams {
        owner: Some(owner),
        receiver: Some(receiver),
        version: None,
    };

    let deployment = deploy_mainnet(&chain, params).await?;
    let registry = deployment.access_manager.address();
    let station = deployment.credit_station.address();

    let record = DeploymentRecord::from_handles(
        &["CreditStationAccessManager", "CreditStation"],
        &[&deployment.access_manager, &deployment.credit_station],
    )?;
    assert_eq!(record.len(), 2);
    assert_eq!(record.get("CreditStationAccessManager"), Some(registry));
    assert_eq!(record.get("CreditStation"), Some(station));
    assert_ne!(registry, station);

    let args = deployment.credit_station.constructor_args();
    assert_eq!(constructor_address(args, 0), registry);
    assert_eq!(constructor_address(args, 1), receiver);
    let verification_args = deployment.credit_station.verification_args();
    assert_eq!(verification_args.len(), 128);
    assert!(verification_args.ends_with(&receiver.to_string()[2..].to_lowercase()));

    assert!(chain.is_admin(registry, owner));
    assert!(!chain.is_admin(registry, deployer()));
    assert_eq!(chain.version(station), None);

    Ok(())
}

#[tokio::test]
async fn test_mainnet_defaults_to_deployer() -> Result<()> {
    let chain = mock_chain();
    let params = MainnetParams {
        version: Some("1.0.0".to_string()),
        ..Default::default()
    };

    let deployment = deploy_mainnet(&chain, params).await?;
    let registry = deployment.access_manager.address();
    let station = deployment.credit_station.address();

    assert_eq!(
        constructor_address(deployment.credit_station.constructor_args(), 1),
        deployer()
    );
    assert!(chain.is_admin(registry, deployer()));
    assert_eq!(chain.version(station).as_deref(), Some("1.0.0"));
    assert!(!chain
        .txs()
        .iter()
        .any(|tx| matches!(tx, MockTx::GrantRole { .. } | MockTx::RenounceRole { .. })));

    Ok(())
}

// ---------------------
// | SUBCHAIN TOPOLOGY |
// ---------------------

#[tokio::test]
async fn test_schain_binds_fulfill_to_agent_role() -> Result<()> {
    let chain = mock_chain();
    let params = SchainParams {
        owner: Some(account(0xaa)),
        version: None,
    };

    let deployment = deploy_schain(&chain, params).await?;
    let registry = deployment.access_manager.address();
    let ledger = deployment.ledger.address();

    let role = chain
        .target_function_role(registry, ledger, ledger_fulfill_selector())
        .await?;
    assert_eq!(role, MOCK_FULFILL_AGENT_ROLE);
    assert!(chain.is_admin(registry, account(0xaa)));
    assert!(!chain.is_admin(registry, deployer()));

    Ok(())
}

#[tokio::test]
async fn test_schain_version_tag() -> Result<()> {
    let chain = mock_chain();
    let params = SchainParams {
        owner: None,
        version: Some("3.0.0".to_string()),
    };

    let deployment = deploy_schain(&chain, params).await?;

    assert_eq!(
        chain.version(deployment.ledger.address()).as_deref(),
        Some("3.0.0")
    );

    Ok(())
}

// ------------
// | FAILURES |
// ------------

#[tokio::test]
async fn test_failed_deploy_aborts_sequence() -> Result<()> {
    let chain = mock_chain();
    chain.set_faults(MockFaults {
        revert_deploy_of: Some(CreditStationContract::Ledger),
        ..Default::default()
    });

    let res = deploy_schain(&chain, SchainParams::default()).await;

    assert!(matches!(res, Err(ScriptError::ContractDeployment(_))));
    // The access manager stays deployed, nothing else was sent
    let txs = chain.txs();
    assert_eq!(txs.len(), 1);
    assert!(matches!(
        &txs[0],
        MockTx::Deploy {
            contract: CreditStationContract::CreditStationAccessManager,
            ..
        }
    ));

    Ok(())
}

#[tokio::test]
async fn test_missing_code_rejected() -> Result<()> {
    let chain = mock_chain();
    chain.set_faults(MockFaults {
        empty_code: true,
        ..Default::default()
    });

    let res = deploy_mainnet(&chain, MainnetParams::default()).await;

    assert!(matches!(res, Err(ScriptError::ContractDeployment(_))));
    assert_eq!(chain.deployments().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_zero_owner_rejected_before_deploying() -> Result<()> {
    let chain = mock_chain();
    let params = SchainParams {
        owner: Some(Address::ZERO),
        version: None,
    };

    let res = deploy_schain(&chain, params).await;

    assert!(matches!(res, Err(ScriptError::CalldataConstruction(_))));
    assert!(chain.txs().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_zero_receiver_rejected_before_deploying() -> Result<()> {
    let chain = mock_chain();
    let params = MainnetParams {
        receiver: Some(Address::ZERO),
        ..Default::default()
    };

    let res = deploy_mainnet(&chain, params).await;

    assert!(matches!(res, Err(ScriptError::CalldataConstruction(_))));
    assert!(chain.txs().is_empty());

    Ok(())
}

#[tokio::test]
async fn test_failed_handover_keeps_deployer_admin() -> Result<()> {
    let chain = mock_chain();
    chain.set_faults(MockFaults {
        ineffective_grant: true,
        ..Default::default()
    });
    let params = MainnetParams {
        owner: Some(account(0xaa)),
        ..Default::default()
    };

    let res = deploy_mainnet(&chain, params).await;

    assert!(matches!(res, Err(ScriptError::GrantNotEffective(_))));
    let registry = chain.deployments()[0].2;
    assert!(chain.is_admin(registry, deployer()));

    Ok(())
}
