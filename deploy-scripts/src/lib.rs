//! Scripts for deploying, initializing, and publishing the rollup contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
pub mod client;
pub mod commands;
pub mod constants;
pub mod context;
pub mod errors;
pub mod plan;
pub mod publish;
pub mod types;
pub mod utils;
