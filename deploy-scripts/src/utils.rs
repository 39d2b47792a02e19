//! Utilities for the deploy scripts: provider and signer setup, hex parsing.

use std::{str::FromStr, sync::Arc, time::Duration};

use ethers::{
    middleware::SignerMiddleware,
    providers::{Http, Middleware, Provider},
    signers::{coins_bip39::English, LocalWallet, MnemonicBuilder, Signer},
    types::{Address, H256},
};

use crate::{
    constants::LOCALHOST_POLLING_INTERVAL_MS,
    errors::ScriptError,
    types::Network,
};

/// Build the JSON-RPC provider for the run.
///
/// Against a localhost network the polling interval is shortened so
/// transaction confirmations land quickly in the dev loop.
pub fn setup_provider(rpc_url: &str, network: &Network) -> Result<Provider<Http>, ScriptError> {
    let mut provider = Provider::<Http>::try_from(rpc_url)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?;

    if network.is_localhost() {
        provider = provider.interval(Duration::from_millis(LOCALHOST_POLLING_INTERVAL_MS));
    }

    Ok(provider)
}

/// Derive a wallet from a mnemonic at the given derivation path
pub fn derive_wallet(mnemonic: &str, derivation_path: &str) -> Result<LocalWallet, ScriptError> {
    MnemonicBuilder::<English>::default()
        .phrase(mnemonic)
        .derivation_path(derivation_path)
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?
        .build()
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))
}

/// Attach a signer to the provider, binding it to the chain's id
pub async fn setup_client(
    provider: Provider<Http>,
    wallet: LocalWallet,
) -> Result<Arc<SignerMiddleware<Provider<Http>, LocalWallet>>, ScriptError> {
    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| ScriptError::ClientInitialization(e.to_string()))?
        .as_u64();

    Ok(Arc::new(SignerMiddleware::new(
        provider,
        wallet.with_chain_id(chain_id),
    )))
}

/// Parse a hex address, with or without a `0x` prefix
pub fn parse_address(raw: &str) -> Result<Address, ScriptError> {
    let raw = raw.strip_prefix("0x").unwrap_or(raw);
    Address::from_str(raw).map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
}

/// Parse a 32-byte hex value, with or without a `0x` prefix
pub fn parse_bytes32(raw: &str) -> Result<H256, ScriptError> {
    let raw = raw.strip_prefix("0x").unwrap_or(raw);
    H256::from_str(raw).map_err(|e| ScriptError::CalldataConstruction(e.to_string()))
}
