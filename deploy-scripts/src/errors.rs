//! Definitions of errors that can occur during the execution of the deploy scripts

use std::{
    error::Error,
    fmt::{self, Display, Formatter},
};

/// Errors that can occur during the execution of the deploy scripts
#[derive(Debug)]
pub enum ScriptError {
    /// Error initializing the RPC client or a signer
    ClientInitialization(String),
    /// Error reading a file from disk
    ReadFile(String),
    /// Error parsing a compiled contract artifact
    ArtifactParsing(String),
    /// Error constructing calldata or parsing a constructor argument
    CalldataConstruction(String),
    /// A constructor argument referenced a contract whose address
    /// has not been resolved
    MissingAddress(String),
    /// Error deploying a contract
    ContractDeployment(String),
    /// Error calling a contract method
    ContractInteraction(String),
    /// Error transferring native value between accounts
    ValueTransfer(String),
    /// Error publishing a contract's source for verification
    Publication(String),
}

impl Display for ScriptError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::ClientInitialization(s) => {
                write!(f, "error initializing client: {}", s)
            }
            ScriptError::ReadFile(s) => write!(f, "error reading file: {}", s),
            ScriptError::ArtifactParsing(s) => write!(f, "error parsing artifact: {}", s),
            ScriptError::CalldataConstruction(s) => {
                write!(f, "error constructing calldata: {}", s)
            }
            ScriptError::MissingAddress(s) => {
                write!(f, "no resolved address for contract: {}", s)
            }
            ScriptError::ContractDeployment(s) => write!(f, "error deploying contract: {}", s),
            ScriptError::ContractInteraction(s) => {
                write!(f, "error interacting with contract: {}", s)
            }
            ScriptError::ValueTransfer(s) => write!(f, "error transferring value: {}", s),
            ScriptError::Publication(s) => write!(f, "error publishing contract: {}", s),
        }
    }
}

impl Error for ScriptError {}
