//! The mutable record of a run: identities, resolved addresses, and the
//! constructor arguments actually used for each deployment.

use std::collections::HashMap;

use ethers::{
    abi::Token,
    types::{Address, H256},
};

use crate::{
    errors::ScriptError,
    types::{Network, Target},
};

/// The state threaded through a deployment run.
///
/// Created once from configuration and external address overrides, mutated
/// in place by the sequential deployment steps, and read-only afterwards
/// (the verification publisher only reads it).
pub struct ExecutionContext {
    /// The network the run operates against
    pub network: Network,
    /// The operator (deployer) wallet address, used in constructor arguments
    pub operator_address: Address,
    /// The on-chain address granted the validator role on Governance
    pub validator_address: Address,
    /// The funded test wallet address
    pub test_address: Address,
    /// The genesis state root passed to the rollup contract
    pub genesis_root: H256,
    /// Resolved addresses, either supplied as overrides or produced by
    /// deployment steps
    addresses: HashMap<Target, Address>,
    /// The constructor argument tokens actually used to deploy each target
    /// in this run
    deploy_args: HashMap<Target, Vec<Token>>,
    /// The auxiliary test token address, once deployed
    pub test_token_address: Option<Address>,
}

impl ExecutionContext {
    /// Create a context with no resolved addresses
    pub fn new(
        network: Network,
        operator_address: Address,
        validator_address: Address,
        test_address: Address,
        genesis_root: H256,
    ) -> Self {
        Self {
            network,
            operator_address,
            validator_address,
            test_address,
            genesis_root,
            addresses: HashMap::new(),
            deploy_args: HashMap::new(),
            test_token_address: None,
        }
    }

    /// Record an externally supplied address for a target, enabling
    /// partial runs that skip its deployment
    pub fn set_override(&mut self, target: Target, address: Address) {
        self.addresses.insert(target, address);
    }

    /// Record a freshly deployed address along with the final constructor
    /// arguments used in the deploy call
    pub fn record_deployment(&mut self, target: Target, address: Address, args: Vec<Token>) {
        self.addresses.insert(target, address);
        self.deploy_args.insert(target, args);
    }

    /// The resolved address of a target, if any
    pub fn address_of(&self, target: Target) -> Option<Address> {
        self.addresses.get(&target).copied()
    }

    /// The resolved address of a target, failing if it is absent
    pub fn require_address(&self, target: Target) -> Result<Address, ScriptError> {
        self.address_of(target)
            .ok_or_else(|| ScriptError::MissingAddress(target.to_string()))
    }

    /// The constructor arguments used to deploy a target in this run, if it
    /// was deployed in this run
    pub fn final_args(&self, target: Target) -> Option<&[Token]> {
        self.deploy_args.get(&target).map(Vec::as_slice)
    }

    /// Whether every target in the plan has a resolved address
    pub fn all_addresses_resolved(&self) -> bool {
        Target::ALL
            .iter()
            .all(|target| self.addresses.contains_key(target))
    }
}
