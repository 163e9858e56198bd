//! Signed request types

use crate::{
    error::{HyperliquidError, Result},
    signer::utils::decode_hex,
};
use ethers::types::{Address, H256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// ECDSA signature in the exchange's wire form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// `0x` + 64 hex digits, big-endian
    pub r: String,
    /// `0x` + 64 hex digits, big-endian
    pub s: String,
    /// Recovery id + 27
    pub v: u8,
}

impl Signature {
    /// 65-byte `0x r ‖ s ‖ v` rendering
    pub fn to_hex(&self) -> String {
        let r = self.r.trim_start_matches("0x");
        let s = self.s.trim_start_matches("0x");
        format!("0x{}{}{:02x}", r, s, self.v)
    }

    /// Recover the signer address from the signed 32-byte digest
    pub fn recover(&self, digest: [u8; 32]) -> Result<Address> {
        let sig = ethers::types::Signature::try_from(self)?;
        sig.recover(H256::from(digest))
            .map_err(|e| HyperliquidError::signer(format!("Failed to recover signer: {}", e)))
    }
}

impl From<ethers::types::Signature> for Signature {
    fn from(sig: ethers::types::Signature) -> Self {
        Self {
            r: u256_to_hex(&sig.r),
            s: u256_to_hex(&sig.s),
            v: sig.v as u8,
        }
    }
}

fn u256_to_hex(value: &U256) -> String {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}

impl TryFrom<&Signature> for ethers::types::Signature {
    type Error = HyperliquidError;

    fn try_from(sig: &Signature) -> Result<Self> {
        let r = decode_hex(&sig.r)?;
        let s = decode_hex(&sig.s)?;
        if r.len() != 32 {
            return Err(HyperliquidError::length_mismatch("signature.r", 32, r.len()));
        }
        if s.len() != 32 {
            return Err(HyperliquidError::length_mismatch("signature.s", 32, s.len()));
        }
        Ok(Self {
            r: U256::from_big_endian(&r),
            s: U256::from_big_endian(&s),
            v: sig.v as u64,
        })
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Body posted to `/exchange`
///
/// Serializes to `{action, signature, nonce[, vaultAddress][, expiresAfter]}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest<'a, A: Serialize> {
    /// The action exactly as it was signed
    pub action: &'a A,
    /// Signature over the action hash
    pub signature: Signature,
    /// Nonce used for signing
    pub nonce: u64,
    /// Vault the action was signed for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault_address: Option<String>,
    /// Expiry the action was signed with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_after: Option<u64>,
}

impl<'a, A: Serialize> ExchangeRequest<'a, A> {
    /// Assemble a request for a signed action
    pub fn new(action: &'a A, signature: Signature, nonce: u64) -> Self {
        Self {
            action,
            signature,
            nonce,
            vault_address: None,
            expires_after: None,
        }
    }

    /// Attach the vault address used when signing
    pub fn with_vault_address(mut self, vault_address: Option<&Address>) -> Self {
        self.vault_address = vault_address.map(crate::signer::utils::address_to_hex);
        self
    }

    /// Attach the expiry used when signing
    pub fn with_expires_after(mut self, expires_after: Option<u64>) -> Self {
        self.expires_after = expires_after;
        self
    }

    /// JSON body bytes
    pub fn to_body(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}
