//! Utilities for the deploy scripts.

use std::{path::Path, str::FromStr};

use abi::ICreditStationAccessManager::ICreditStationAccessManagerErrors;
use alloy::{
    contract::{CallBuilder, CallDecoder, Error as ContractError},
    network::Ethereum,
    providers::{DynProvider, Provider, ProviderBuilder},
    rpc::types::TransactionReceipt,
    signers::local::PrivateKeySigner,
    transports::{http::reqwest::Url, TransportError},
};
use alloy_primitives::Address;
use tracing::info;

use crate::{artifacts::ContractArtifacts, chain::RpcChainClient, errors::ScriptError};

/// The call builder type produced by the contract bindings
pub type ScriptCallBuilder<'a, C> = CallBuilder<&'a DynProvider, C, Ethereum>;

/// Sets up the signing client through which all deployment transactions are sent
pub async fn setup_client(
    priv_key: &str,
    rpc_url: &str,
    artifacts_dir: &Path,
) -> Result<RpcChainClient, ScriptError> {
    let signer = PrivateKeySigner::from_str(priv_key)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let sender = signer.address();

    let url = Url::parse(rpc_url).map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    let provider = DynProvider::new(ProviderBuilder::new().wallet(signer).connect_http(url));

    let chain_id = provider
        .get_chain_id()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;
    info!("Connected to chain {} as {:#x}", chain_id, sender);

    Ok(RpcChainClient::new(
        provider,
        sender,
        ContractArtifacts::new(artifacts_dir),
    ))
}

/// Parse a hex address given on the command line or in the environment
pub fn parse_address(address: &str) -> Result<Address, ScriptError> {
    Address::from_str(address.trim())
        .map_err(|e| ScriptError::CalldataConstruction(format!("invalid address {address}: {e}")))
}

/// Send a transaction and wait for its receipt, failing if it reverted
pub async fn send_tx<C: CallDecoder>(
    tx: ScriptCallBuilder<'_, C>,
) -> Result<TransactionReceipt, ScriptError> {
    let pending_tx = match tx.send().await {
        Ok(pending_tx) => pending_tx,
        Err(ContractError::TransportError(TransportError::ErrorResp(err_payload))) => {
            let decoded =
                err_payload.as_decoded_interface_error::<ICreditStationAccessManagerErrors>();

            let err_str = decoded.map(|e| format!("{e:?}")).unwrap_or_else(|| {
                let msg = err_payload.message;
                let data = err_payload.data.map(|d| d.to_string()).unwrap_or_default();
                format!("{msg} (data = {data})")
            });
            return Err(ScriptError::ContractInteraction(err_str));
        }
        Err(err) => return Err(ScriptError::ContractInteraction(err.to_string())),
    };

    let receipt = pending_tx
        .get_receipt()
        .await
        .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

    if !receipt.status() {
        return Err(ScriptError::ContractInteraction(format!(
            "transaction {:#x} reverted",
            receipt.transaction_hash
        )));
    }

    Ok(receipt)
}
