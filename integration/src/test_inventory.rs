//! Defines types and utilities for managing the inventory of integration tests

use std::{future::Future, path::PathBuf, pin::Pin};

use eyre::Result;
use scripts::chain::RpcChainClient;

/// The arguments provided to each integration test
#[derive(Clone)]
pub struct TestArgs {
    /// The signing chain client
    pub client: RpcChainClient,
    /// A scratch directory for deployment records
    pub data_dir: PathBuf,
}

/// The signature of an integration test
type TestFn = fn(TestArgs) -> Pin<Box<dyn Future<Output = Result<()>>>>;

/// A struct representing an integration test
pub struct IntegrationTest {
    /// The name of the test
    pub name: &'static str,
    /// What the test checks on the devnet, printed when it fails
    pub description: &'static str,
    /// The test function
    pub test_fn: TestFn,
}

// Collect the integration tests into an iterable
inventory::collect!(IntegrationTest);

/// Register an async `fn(TestArgs) -> Result<()>` with a description of
/// the on-chain state it checks
#[macro_export]
macro_rules! integration_test {
    ($test_fn:ident, $description:literal) => {
        inventory::submit!($crate::test_inventory::IntegrationTest {
            name: stringify!($test_fn),
            description: $description,
            test_fn: |args| std::boxed::Box::pin($test_fn(args)),
        });
    };
}
