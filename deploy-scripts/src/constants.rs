//! Constants used in the deploy scripts

/// The number of confirmations to wait for a contract deployment transaction
pub const NUM_DEPLOY_CONFIRMATIONS: usize = 0;

/// The provider polling interval to use against a localhost network, in milliseconds.
///
/// The default interval is tuned for public networks and makes the local
/// dev loop needlessly slow.
pub const LOCALHOST_POLLING_INTERVAL_MS: u64 = 200;

/// The network tag denoting a local development network
pub const LOCALHOST_NETWORK: &str = "localhost";

/// The derivation path of the operator (deployer) wallet
pub const OPERATOR_DERIVATION_PATH: &str = "m/44'/60'/0'/0/1";

/// The derivation path of the test wallet
pub const TEST_DERIVATION_PATH: &str = "m/44'/60'/0'/0/0";

/// The amount of native value, in whole ether, sent to the test wallet
/// after deployment
pub const SEED_VALUE_ETHER: &str = "10.0";

/// The quantity of test tokens, in whole (18-decimal) tokens, minted to
/// the test wallet after deployment
pub const TEST_TOKEN_MINT_AMOUNT: &str = "100.0";

/// The artifact name of the auxiliary test ERC20 token contract
pub const TEST_TOKEN_ARTIFACT: &str = "TestERC20";

/// The name of the Governance method granting the validator role
pub const SET_VALIDATOR_METHOD: &str = "setValidator";

/// The name of the Governance method registering a token
pub const ADD_TOKEN_METHOD: &str = "addToken";

/// The name of the test token's mint method
pub const MINT_METHOD: &str = "mint";

/// The timeout applied to verification-publishing HTTP requests, in seconds
pub const PUBLISH_TIMEOUT_SECS: u64 = 30;
