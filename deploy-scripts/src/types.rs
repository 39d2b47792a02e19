//! Type definitions used throughout the deploy scripts

use std::fmt::{self, Display};

use crate::constants::LOCALHOST_NETWORK;

/// The contracts in the fixed deployment plan
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    /// The governance contract
    Governance,
    /// The priority queue contract
    PriorityQueue,
    /// The verifier contract
    Verifier,
    /// The main rollup contract
    Rollup,
}

impl Target {
    /// All targets, in the fixed deployment order
    pub const ALL: [Target; 4] = [
        Target::Governance,
        Target::PriorityQueue,
        Target::Verifier,
        Target::Rollup,
    ];
}

impl Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Governance => write!(f, "Governance"),
            Target::PriorityQueue => write!(f, "PriorityQueue"),
            Target::Verifier => write!(f, "Verifier"),
            Target::Rollup => write!(f, "Rollup"),
        }
    }
}

/// The network a run operates against, derived from the environment tag.
///
/// The tag selects the provider polling behavior and the verification
/// publishing backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Network {
    /// A local development network
    Localhost,
    /// A named remote network, e.g. a public testnet
    Remote(String),
}

impl Network {
    /// Parse a network from its environment tag
    pub fn from_tag(tag: &str) -> Self {
        if tag == LOCALHOST_NETWORK {
            Network::Localhost
        } else {
            Network::Remote(tag.to_string())
        }
    }

    /// Whether this is a local development network
    pub fn is_localhost(&self) -> bool {
        matches!(self, Network::Localhost)
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Localhost => write!(f, "{}", LOCALHOST_NETWORK),
            Network::Remote(tag) => write!(f, "{}", tag),
        }
    }
}
