//! Constants used in the deploy scripts

/// The default RPC endpoint, a local devnet node
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";

/// The default directory holding the Hardhat compilation artifacts
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// The default directory in which deployment records are written
pub const DEFAULT_DATA_DIR: &str = "data";

/// The record title used for the single-chain topology
pub const MAINNET_TITLE: &str = "mainnet";

/// The record title used for the subchain topology when no subchain name is given
pub const DEFAULT_SCHAIN_TITLE: &str = "schain";

/// The prefix of every deployment record file name
pub const RECORD_FILE_PREFIX: &str = "credit-station-";

/// The suffix of every deployment record file name
pub const RECORD_FILE_SUFFIX: &str = "-contracts.json";

/// The indentation used when writing deployment records
pub const RECORD_INDENT: &[u8] = b"    ";

/// The deployment record key of the access manager contract
pub const ACCESS_MANAGER_CONTRACT_KEY: &str = "CreditStationAccessManager";

/// The deployment record key of the credit station contract
pub const CREDIT_STATION_CONTRACT_KEY: &str = "CreditStation";

/// The deployment record key of the ledger contract
pub const LEDGER_CONTRACT_KEY: &str = "Ledger";

/// The extension of a Hardhat artifact file
pub const ARTIFACT_EXTENSION: &str = "json";

/// The execution delay attached to the admin role when it is granted
pub const NO_EXECUTION_DELAY: u32 = 0;

/// The environment variable overriding the owner of a deployment
pub const OWNER_ENV_VAR: &str = "OWNER";

/// The environment variable overriding the payment receiver of a deployment
pub const RECEIVER_ENV_VAR: &str = "RECEIVER";

/// The process exit code on success
pub const SUCCESS_CODE: u8 = 0;

/// The process exit code on failure
pub const FAILURE_CODE: u8 = 1;
