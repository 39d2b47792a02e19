//! Definitions of CLI arguments for the deploy scripts.
//!
//! Every configuration input is a long flag backed by an environment
//! variable, read once at startup. The two mode switches are independent:
//! `--deploy` alone skips publication, `--publish` alone reuses previously
//! supplied addresses, and together they deploy then publish in one run.

use clap::Parser;

/// Deploy the rollup contracts and publish their sources for verification
#[derive(Parser)]
pub struct Cli {
    /// Deploy the contracts and initialize them
    #[arg(long)]
    pub deploy: bool,

    /// Publish contract sources to the verification backend
    #[arg(long)]
    pub publish: bool,

    /// Network RPC URL
    #[arg(long, env = "WEB3_URL", default_value = "http://localhost:8545")]
    pub web3_url: String,

    /// Network tag; `localhost` selects dev-loop polling and the local
    /// verification registry
    #[arg(long, env = "ETH_NETWORK", default_value = "localhost")]
    pub eth_network: String,

    /// Mnemonic of the operator (deployer) wallet
    #[arg(long, env = "MNEMONIC", hide_env_values = true)]
    pub mnemonic: String,

    /// Mnemonic of the funded test wallet
    #[arg(long, env = "TEST_MNEMONIC", hide_env_values = true)]
    pub test_mnemonic: String,

    /// On-chain address granted the validator role on Governance
    #[arg(long, env = "OPERATOR_ETH_ADDRESS")]
    pub operator_eth_address: String,

    /// Pre-existing Governance address, skipping its deployment
    #[arg(long, env = "GOVERNANCE_ADDR")]
    pub governance_addr: Option<String>,

    /// Pre-existing PriorityQueue address, skipping its deployment
    #[arg(long, env = "PRIORITY_QUEUE_ADDR")]
    pub priority_queue_addr: Option<String>,

    /// Pre-existing Verifier address, skipping its deployment
    #[arg(long, env = "VERIFIER_ADDR")]
    pub verifier_addr: Option<String>,

    /// Pre-existing Rollup address, skipping its deployment
    #[arg(long, env = "CONTRACT_ADDR")]
    pub contract_addr: Option<String>,

    /// Genesis state root for the rollup contract; defaults to all zeroes
    #[arg(long, env = "GENESIS_ROOT")]
    pub genesis_root: Option<String>,

    /// Directory holding the compiled contract artifacts
    #[arg(long, env = "ARTIFACTS_DIR", default_value = "build")]
    pub artifacts_dir: String,

    /// Base URL of the local verification registry
    #[arg(long, env = "TESSERACTS_URL", default_value = "http://localhost:8000")]
    pub tesseracts_url: String,

    /// Public explorer verification API endpoint
    #[arg(
        long,
        env = "ETHERSCAN_API_URL",
        default_value = "https://api.etherscan.io/api"
    )]
    pub etherscan_api_url: String,

    /// Public explorer API key
    #[arg(long, env = "ETHERSCAN_API_KEY", hide_env_values = true, default_value = "")]
    pub etherscan_api_key: String,
}
