//! Solidity bindings for the credit station contracts
//!
//! The access manager extends OpenZeppelin's `AccessManager`, so the role
//! management surface below mirrors that contract's ABI.

use alloy::{network::Ethereum, primitives::Selector, sol, sol_types::SolCall};

sol! {
    #![sol(all_derives)]
    #[allow(missing_docs, clippy::too_many_arguments)]
    #[sol(rpc)]
    interface ICreditStationAccessManager {
        function ADMIN_ROLE() external view returns (uint64);
        function PUBLIC_ROLE() external view returns (uint64);
        function FULFILL_AGENT_ROLE() external view returns (uint64);

        function hasRole(uint64 roleId, address account)
            external
            view
            returns (bool isMember, uint32 executionDelay);
        function grantRole(uint64 roleId, address account, uint32 executionDelay) external;
        function revokeRole(uint64 roleId, address account) external;
        function renounceRole(uint64 roleId, address callerConfirmation) external;

        function setTargetFunctionRole(address target, bytes4[] calldata selectors, uint64 roleId) external;
        function getTargetFunctionRole(address target, bytes4 selector) external view returns (uint64);

        event RoleGranted(uint64 indexed roleId, address indexed account, uint32 delay, uint48 since, bool newMember);
        event RoleRevoked(uint64 indexed roleId, address indexed account);
        event TargetFunctionRoleUpdated(address indexed target, bytes4 selector, uint64 indexed roleId);

        error AccessManagerUnauthorizedAccount(address msgsender, uint64 roleId);
        error AccessManagerBadConfirmation();
        error AccessManagerLockedRole(uint64 roleId);
        error AccessManagedUnauthorized(address caller);
    }
}

sol! {
    #![sol(all_derives)]
    #[allow(missing_docs, clippy::too_many_arguments)]
    #[sol(rpc)]
    interface ICreditStation {
        function setVersion(string calldata newVersion) external;
        function version() external view returns (string memory);
        function setPrice(address token, uint256 price) external;
        function getPrice(address token) external view returns (uint256);
        function receiver() external view returns (address);
    }
}

sol! {
    #![sol(all_derives)]
    #[allow(missing_docs, clippy::too_many_arguments)]
    #[sol(rpc)]
    interface ILedger {
        function setVersion(string calldata newVersion) external;
        function version() external view returns (string memory);
        function fulfill(uint256 paymentId, address to) external payable;
        function isFulfilled(uint256 paymentId) external view returns (bool);
    }
}

/// An access manager instance over the given provider
pub type AccessManager<P> =
    ICreditStationAccessManager::ICreditStationAccessManagerInstance<P, Ethereum>;
/// A credit station instance over the given provider
pub type CreditStation<P> = ICreditStation::ICreditStationInstance<P, Ethereum>;
/// A ledger instance over the given provider
pub type Ledger<P> = ILedger::ILedgerInstance<P, Ethereum>;

/// The selector of `Ledger.fulfill`, which only fulfill agents may call
pub fn ledger_fulfill_selector() -> Selector {
    Selector::from(ILedger::fulfillCall::SELECTOR)
}
