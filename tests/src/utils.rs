//! Helpers shared by the test suites

use alloy_primitives::{Address, Bytes};
use scripts::{
    deployer::deploy_contract,
    errors::ScriptError,
    types::{ContractHandle, CreditStationContract},
};

use crate::mock::MockChain;

/// The account that signs every transaction in the tests
pub fn deployer() -> Address {
    account(0xd0)
}

/// A distinct, deterministic test account
pub fn account(byte: u8) -> Address {
    Address::repeat_byte(byte)
}

/// A mock chain whose sender is [`deployer`]
pub fn mock_chain() -> MockChain {
    MockChain::new(deployer())
}

/// Deploy an access manager with `initial_admin` through the real deployer
pub async fn deploy_access_manager(
    chain: &MockChain,
    initial_admin: Address,
) -> Result<ContractHandle, ScriptError> {
    let mut args = [0u8; 32];
    args[12..].copy_from_slice(initial_admin.as_slice());
    deploy_contract(
        chain,
        CreditStationContract::CreditStationAccessManager,
        Bytes::copy_from_slice(&args),
    )
    .await
}

/// The address encoded in the `index`th static constructor argument
pub fn constructor_address(args: &Bytes, index: usize) -> Address {
    let word = &args[index * 32..(index + 1) * 32];
    Address::from_slice(&word[12..])
}
