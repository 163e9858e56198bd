//! L1 action signer
//!
//! An action is never signed directly. Its action hash becomes the
//! `connectionId` of a fixed `Agent` struct, and that struct is signed as
//! EIP-712 typed data under the `Exchange` domain.

use crate::{
    error::{HyperliquidError, Result},
    signer::{
        action_hash::{action_hash, SignableAction},
        config::Config,
        typed_data::{hash_typed_data, Eip712Domain, TypedData, TypedDataField, Types},
    },
    types::{
        api::{ExchangeRequest, Signature},
        constants::eip712::*,
    },
};
use ethers::{
    signers::{LocalWallet, Signer},
    types::{Address, H256},
};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Domain used for every L1 action
pub fn exchange_domain() -> Eip712Domain {
    Eip712Domain {
        name: Some(DOMAIN_NAME.to_string()),
        version: Some(DOMAIN_VERSION.to_string()),
        chain_id: Some(DOMAIN_CHAIN_ID),
        verifying_contract: Some(VERIFYING_CONTRACT.to_string()),
    }
}

/// `Agent(string source,bytes32 connectionId)`
pub fn agent_types() -> Types {
    let mut types = Types::new();
    types.insert(
        AGENT_TYPE.to_string(),
        vec![
            TypedDataField::new("source", "string"),
            TypedDataField::new("connectionId", "bytes32"),
        ],
    );
    types
}

/// Agent typed data wrapping an action hash
pub fn agent_typed_data(connection_id: [u8; 32], is_testnet: bool) -> TypedData {
    let source = if is_testnet {
        TESTNET_SOURCE
    } else {
        MAINNET_SOURCE
    };
    TypedData {
        domain: exchange_domain(),
        types: agent_types(),
        primary_type: AGENT_TYPE.to_string(),
        message: serde_json::json!({
            "source": source,
            "connectionId": format!("0x{}", hex::encode(connection_id)),
        }),
    }
}

/// EIP-712 digest of the Agent struct for an action hash
pub fn agent_digest(connection_id: [u8; 32], is_testnet: bool) -> Result<[u8; 32]> {
    let typed = agent_typed_data(connection_id, is_testnet);
    hash_typed_data(&typed.domain, &typed.types, &typed.primary_type, &typed.message)
}

/// Sign an L1 action
///
/// Signing is deterministic (RFC6979): the same wallet, action, nonce and
/// options always give the same signature.
pub fn sign_l1_action<A: SignableAction + ?Sized>(
    wallet: &LocalWallet,
    action: &A,
    nonce: u64,
    is_testnet: bool,
    vault_address: Option<&Address>,
    expires_after: Option<u64>,
) -> Result<Signature> {
    let connection_id = action_hash(action, nonce, vault_address, expires_after)?;
    let digest = agent_digest(connection_id, is_testnet)?;
    debug!(digest = %hex::encode(digest), is_testnet, "Signing agent digest");

    let signature = wallet
        .sign_hash(H256::from(digest))
        .map_err(|e| HyperliquidError::signer(format!("Failed to sign digest: {}", e)))?;
    Ok(Signature::from(signature))
}

/// Signer bound to a configuration
///
/// Applies the configured network, vault and expiry to every action and
/// issues nonces.
#[derive(Debug)]
pub struct HyperliquidSigner {
    /// Configuration
    config: Config,
    /// Last nonce handed out
    last_nonce: AtomicU64,
}

impl Clone for HyperliquidSigner {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            last_nonce: AtomicU64::new(self.last_nonce.load(Ordering::SeqCst)),
        }
    }
}

impl HyperliquidSigner {
    /// Create a new signer
    pub fn new(config: Config) -> Self {
        Self {
            config,
            last_nonce: AtomicU64::new(0),
        }
    }

    /// Configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Signing address
    pub fn address(&self) -> Address {
        self.config.wallet.address()
    }

    /// Current timestamp in milliseconds
    fn current_timestamp_ms() -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }

    /// Next nonce: the current millisecond timestamp, bumped past the
    /// previous nonce when calls land in the same millisecond
    pub fn next_nonce(&self) -> u64 {
        let now = Self::current_timestamp_ms();
        let previous = self
            .last_nonce
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last + 1))
            })
            .unwrap_or_else(|last| last);
        now.max(previous + 1)
    }

    /// Sign an action with the configured network, vault and expiry
    pub fn sign_action<A: SignableAction + ?Sized>(
        &self,
        action: &A,
        nonce: u64,
    ) -> Result<Signature> {
        sign_l1_action(
            &self.config.wallet,
            action,
            nonce,
            self.config.is_testnet(),
            self.config.vault_address.as_ref(),
            self.config.expires_after,
        )
    }

    /// Sign an action and wrap it in an `/exchange` request
    pub fn build_request<'a, A: SignableAction>(
        &self,
        action: &'a A,
        nonce: u64,
    ) -> Result<ExchangeRequest<'a, A>> {
        let signature = self.sign_action(action, nonce)?;
        Ok(ExchangeRequest::new(action, signature, nonce)
            .with_vault_address(self.config.vault_address.as_ref())
            .with_expires_after(self.config.expires_after))
    }
}
