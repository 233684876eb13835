//! Integration tests for the credit station deployment scripts.
//! These assume that a devnet node is already running and that the contract
//! artifacts have been compiled.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![deny(unsafe_code)]

mod test_inventory;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use eyre::{eyre, Result};
use scripts::utils::setup_client;
use test_inventory::{IntegrationTest, TestArgs};

/// The default private key for the tests, the first default account in an Anvil node
const DEFAULT_PKEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// The CLI arguments for the integration tests
#[derive(Debug, Clone, Parser)]
struct CliArgs {
    /// The private key to use for testing
    #[clap(short = 'p', long, default_value = DEFAULT_PKEY)]
    pkey: String,
    /// The RPC url to run the tests against
    #[clap(short = 'r', long, default_value = "http://127.0.0.1:8545")]
    rpc_url: String,
    /// The directory holding the compiled contract artifacts
    #[clap(short = 'a', long, env = "ARTIFACTS_DIR", default_value = "../artifacts")]
    artifacts_dir: PathBuf,

    // --- Test Harness Args --- //
    /// The test to run, all tests are run if unset
    #[arg(short, long, value_parser)]
    test: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let CliArgs {
        pkey,
        rpc_url,
        artifacts_dir,
        test,
    } = CliArgs::parse();

    tracing_subscriber::fmt().pretty().with_writer(std::io::stderr).init();

    let client = setup_client(&pkey, &rpc_url, &artifacts_dir).await?;
    let data_dir = tempfile::tempdir()?;
    let args = TestArgs {
        client,
        data_dir: data_dir.path().to_path_buf(),
    };

    let mut failed = 0;
    let mut ran = 0;
    for IntegrationTest {
        name,
        description,
        test_fn,
    } in inventory::iter::<IntegrationTest>
    {
        if test.as_deref().is_some_and(|t| t != *name) {
            continue;
        }

        ran += 1;
        match test_fn(args.clone()).await {
            Ok(()) => println!("{} {}", "✔".green(), name),
            Err(e) => {
                failed += 1;
                println!("{} {} ({}): {}", "✘".red(), name, description, e);
            }
        }
    }

    if ran == 0 {
        return Err(eyre!("no test matched {:?}", test));
    }
    if failed > 0 {
        return Err(eyre!("{failed} of {ran} tests failed"));
    }

    println!("{}", format!("{ran} tests passed").green().bold());
    Ok(())
}
