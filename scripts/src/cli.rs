//! Definitions of CLI arguments and commands for deploy scripts

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::{
    chain::ChainClient,
    commands::{deploy_mainnet, deploy_schain, transfer_admin},
    constants::{
        DEFAULT_ARTIFACTS_DIR, DEFAULT_DATA_DIR, DEFAULT_RPC_URL, DEFAULT_SCHAIN_TITLE,
        MAINNET_TITLE, OWNER_ENV_VAR, RECEIVER_ENV_VAR,
    },
    errors::ScriptError,
    utils::setup_client,
};

/// Deploy and administer the credit station contracts
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Private key of the deployer
    #[arg(short, long, env = "PRIVATE_KEY")]
    pub priv_key: String,

    /// Network RPC URL
    #[arg(short, long, env = "ENDPOINT", default_value = DEFAULT_RPC_URL)]
    pub rpc_url: String,

    /// Directory containing the Hardhat compilation artifacts
    #[arg(long, env = "ARTIFACTS_DIR", default_value = DEFAULT_ARTIFACTS_DIR)]
    pub artifacts_dir: PathBuf,

    /// Directory in which deployment records are written
    #[arg(long, env = "DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// The command to run
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Connect to the network and run the selected command
    pub async fn run(self) -> Result<(), ScriptError> {
        let client = setup_client(&self.priv_key, &self.rpc_url, &self.artifacts_dir).await?;
        self.command.run(&client, &self.data_dir).await
    }
}

/// The commands supported by the scripts
#[derive(Subcommand)]
pub enum Command {
    /// Deploy the single-chain topology
    DeployMainnet(DeployMainnetArgs),
    /// Deploy the subchain topology
    DeploySchain(DeploySchainArgs),
    /// Transfer the admin role of an access manager
    TransferOwnership(TransferOwnershipArgs),
}

impl Command {
    /// Run the command against the given client
    pub async fn run(self, client: &impl ChainClient, data_dir: &Path) -> Result<(), ScriptError> {
        match self {
            Command::DeployMainnet(args) => deploy_mainnet(args, client, data_dir).await,
            Command::DeploySchain(args) => deploy_schain(args, client, data_dir).await,
            Command::TransferOwnership(args) => transfer_admin(args, client).await,
        }
    }
}

/// Deploy the access manager and the credit station to the payment chain.
///
/// The deployer administers the access manager while the contracts are wired,
/// after which the admin role is transferred to the owner.
#[derive(Args)]
pub struct DeployMainnetArgs {
    /// Address of the account that will administer the deployment,
    /// defaults to the deployer
    #[arg(short, long, env = OWNER_ENV_VAR)]
    pub owner: Option<String>,

    /// Address receiving the payments made to the credit station,
    /// defaults to the deployer
    #[arg(long, env = RECEIVER_ENV_VAR)]
    pub receiver: Option<String>,

    /// Version tag to set on the credit station
    #[arg(long = "contracts-version", env = "VERSION")]
    pub version: Option<String>,

    /// Title under which the deployed addresses are recorded
    #[arg(long, default_value = MAINNET_TITLE)]
    pub title: String,
}

/// Deploy the access manager and the ledger to a subchain, restricting
/// `Ledger.fulfill` to fulfill agents
#[derive(Args)]
pub struct DeploySchainArgs {
    /// Address of the account that will administer the deployment,
    /// defaults to the deployer
    #[arg(short, long, env = OWNER_ENV_VAR)]
    pub owner: Option<String>,

    /// Version tag to set on the ledger
    #[arg(long = "contracts-version", env = "VERSION")]
    pub version: Option<String>,

    /// Name of the subchain, used as the title of the deployment record
    #[arg(long, env = "SCHAIN_NAME", default_value = DEFAULT_SCHAIN_TITLE)]
    pub schain_name: String,
}

/// Transfer the admin role of an existing access manager
#[derive(Args)]
pub struct TransferOwnershipArgs {
    /// Address of the access manager
    #[arg(short, long)]
    pub access_manager: String,

    /// Address of the account that will hold the admin role
    #[arg(short, long)]
    pub new_owner: String,

    /// Address of the account currently holding the admin role,
    /// defaults to the deployer
    #[arg(long)]
    pub old_owner: Option<String>,
}
