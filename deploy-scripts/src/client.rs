//! The narrow remote-ledger seam consumed by the deploy scripts.
//!
//! Everything above this module treats "deploy a contract", "call a
//! state-mutating method", "transfer value", and "query deployed bytecode"
//! as opaque remote operations; [`EthersLedger`] is the production
//! implementation on top of an ethers middleware stack.

use std::sync::Arc;

use ethers::{
    abi::{Abi, Token},
    contract::ContractFactory,
    providers::Middleware,
    types::{Address, Bytes, TransactionRequest, U256},
};

use crate::{artifacts::ContractArtifact, constants::NUM_DEPLOY_CONFIRMATIONS, errors::ScriptError};

/// The remote operations the orchestration core depends on.
///
/// Each operation is synchronous from the caller's point of view: it
/// returns once the transaction is confirmed on chain, or fails. No
/// operation is retried internally; a failed state-mutating operation is
/// surfaced to the caller as-is.
#[allow(async_fn_in_trait)]
pub trait LedgerClient {
    /// Deploy a contract from its artifact and resolved constructor
    /// arguments, returning the deployed address
    async fn deploy(
        &self,
        artifact: &ContractArtifact,
        args: Vec<Token>,
    ) -> Result<Address, ScriptError>;

    /// Call a state-mutating contract method and await its confirmation
    async fn call(
        &self,
        address: Address,
        abi: &Abi,
        method: &str,
        args: Vec<Token>,
    ) -> Result<(), ScriptError>;

    /// Transfer native value from the signer to the given account
    async fn transfer_value(&self, to: Address, amount: U256) -> Result<(), ScriptError>;

    /// Query the bytecode deployed at an address
    async fn get_code(&self, address: Address) -> Result<Bytes, ScriptError>;
}

/// A [`LedgerClient`] backed by an ethers middleware stack.
///
/// The signer identity is the one attached to the middleware; the scripts
/// construct one instance per signer.
pub struct EthersLedger<M> {
    /// The underlying middleware, including the signer
    client: Arc<M>,
}

impl<M: Middleware + 'static> EthersLedger<M> {
    /// Wrap a middleware stack
    pub fn new(client: Arc<M>) -> Self {
        Self { client }
    }
}

impl<M: Middleware + 'static> LedgerClient for EthersLedger<M> {
    async fn deploy(
        &self,
        artifact: &ContractArtifact,
        args: Vec<Token>,
    ) -> Result<Address, ScriptError> {
        let factory = ContractFactory::new(
            artifact.abi.clone(),
            artifact.bytecode.clone(),
            self.client.clone(),
        );

        let contract = factory
            .deploy_tokens(args)
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?
            .confirmations(NUM_DEPLOY_CONFIRMATIONS)
            .send()
            .await
            .map_err(|e| ScriptError::ContractDeployment(e.to_string()))?;

        Ok(contract.address())
    }

    async fn call(
        &self,
        address: Address,
        abi: &Abi,
        method: &str,
        args: Vec<Token>,
    ) -> Result<(), ScriptError> {
        let function = abi
            .function(method)
            .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;
        let calldata = function
            .encode_input(&args)
            .map_err(|e| ScriptError::CalldataConstruction(e.to_string()))?;

        let tx = TransactionRequest::new().to(address).data(calldata);
        self.client
            .send_transaction(tx, None /* block */)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))?;

        Ok(())
    }

    async fn transfer_value(&self, to: Address, amount: U256) -> Result<(), ScriptError> {
        let tx = TransactionRequest::pay(to, amount);
        self.client
            .send_transaction(tx, None /* block */)
            .await
            .map_err(|e| ScriptError::ValueTransfer(e.to_string()))?
            .await
            .map_err(|e| ScriptError::ValueTransfer(e.to_string()))?;

        Ok(())
    }

    async fn get_code(&self, address: Address) -> Result<Bytes, ScriptError> {
        self.client
            .get_code(address, None /* block */)
            .await
            .map_err(|e| ScriptError::ContractInteraction(e.to_string()))
    }
}
