//! Action hash: the `connectionId` signed inside the Agent message
//!
//! Preimage layout:
//!
//! ```text
//! msgpack(action) ‖ nonce (u64 BE) ‖ 0x00                      (no vault)
//!                                  ‖ 0x01 ‖ vault (20 bytes)   (vault)
//!                 [‖ 0x00 ‖ expires_after (u64 BE)]            (expiry only)
//! ```

use crate::{
    error::Result,
    signer::msgpack::{self, Value},
    types::{
        actions::Action,
        constants::action_hash::{EXPIRES_AFTER_PRESENT, VAULT_ABSENT, VAULT_PRESENT},
    },
};
use ethers::{types::Address, utils::keccak256};
use serde::Serialize;
use tracing::debug;

/// An action that can be hashed and submitted
///
/// `to_msgpack` must yield the same keys in the same order as the JSON
/// produced by `Serialize`, since the exchange re-derives the hash from the
/// JSON body.
pub trait SignableAction: Serialize {
    /// Ordered msgpack value of the action
    fn to_msgpack(&self) -> Result<Value>;
}

impl SignableAction for Action {
    fn to_msgpack(&self) -> Result<Value> {
        Ok(Action::to_msgpack(self))
    }
}

impl SignableAction for serde_json::Value {
    fn to_msgpack(&self) -> Result<Value> {
        Value::try_from(self)
    }
}

/// Hash an action together with its nonce, optional vault and optional expiry
pub fn action_hash<A: SignableAction + ?Sized>(
    action: &A,
    nonce: u64,
    vault_address: Option<&Address>,
    expires_after: Option<u64>,
) -> Result<[u8; 32]> {
    let mut preimage = msgpack::encode(&action.to_msgpack()?)?;
    preimage.reserve(8 + 21 + 9);
    preimage.extend_from_slice(&nonce.to_be_bytes());

    match vault_address {
        Some(vault) => {
            preimage.push(VAULT_PRESENT);
            preimage.extend_from_slice(vault.as_bytes());
        }
        None => preimage.push(VAULT_ABSENT),
    }

    if let Some(expires_after) = expires_after {
        preimage.push(EXPIRES_AFTER_PRESENT);
        preimage.extend_from_slice(&expires_after.to_be_bytes());
    }

    let hash = keccak256(&preimage);
    debug!(
        nonce,
        preimage_len = preimage.len(),
        hash = %hex::encode(hash),
        "Computed action hash"
    );
    Ok(hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        signer::utils::parse_address,
        types::actions::{CancelEntry, OrderEntry, TimeInForce},
    };

    const NONCE: u64 = 1_700_000_000_000;

    fn order(asset: u32, price: &str) -> OrderEntry {
        OrderEntry::limit(asset, true, price, "0.1", false, TimeInForce::Gtc, None).unwrap()
    }

    fn btc_order_action() -> Action {
        Action::order(vec![order(0, "30000")])
    }

    fn vault() -> Address {
        parse_address("0x1234567890123456789012345678901234567890").unwrap()
    }

    #[test]
    fn test_order_action_hash() {
        let hash = action_hash(&btc_order_action(), NONCE, None, None).unwrap();
        assert_eq!(
            hex::encode(hash),
            "537978eabdd2256c41877b65c24b9c9bfd0f205be97f00e127e74593b58ab5d3"
        );
    }

    #[test]
    fn test_vault_and_expiry_variants() {
        let action = btc_order_action();
        let vault = vault();

        assert_eq!(
            hex::encode(action_hash(&action, NONCE, Some(&vault), None).unwrap()),
            "b0b82732d809f367556ab6a9f6ab6d94f23507ac16bc80f8bef23530807c60fd"
        );
        assert_eq!(
            hex::encode(action_hash(&action, NONCE, None, Some(1_700_000_060_000)).unwrap()),
            "7a7da5cc3c4d6d2c09ebc32df09c378dcb869bd5f8a3d30d23b2baa5ebfbbd98"
        );
        assert_eq!(
            hex::encode(
                action_hash(&action, NONCE, Some(&vault), Some(1_700_000_060_000)).unwrap()
            ),
            "048b1d8d5359565d406ebd7de67c6108dfaaa385f1d68721193584bc5d287c89"
        );
    }

    #[test]
    fn test_cancel_action_hash() {
        let action = Action::cancel(vec![CancelEntry::new(3, 91490942)]);
        assert_eq!(
            hex::encode(action_hash(&action, NONCE, None, None).unwrap()),
            "3fa25a9b957b5ffa0c30ff79811162907f97dc1451099d8f629fbb6a6b5c1d25"
        );
    }

    #[test]
    fn test_hash_sensitivity() {
        let action = btc_order_action();
        let base = action_hash(&action, NONCE, None, None).unwrap();

        assert_ne!(base, action_hash(&action, NONCE + 1, None, None).unwrap());
        assert_ne!(base, action_hash(&action, NONCE, Some(&vault()), None).unwrap());
        assert_ne!(base, action_hash(&action, NONCE, None, Some(0)).unwrap());

        let forward = Action::order(vec![order(0, "30000"), order(1, "2000")]);
        let reversed = Action::order(vec![order(1, "2000"), order(0, "30000")]);
        assert_ne!(
            action_hash(&forward, NONCE, None, None).unwrap(),
            action_hash(&reversed, NONCE, None, None).unwrap()
        );
    }

    #[test]
    fn test_json_and_typed_paths_agree() {
        let typed = btc_order_action();
        let json = serde_json::json!({
            "type": "order",
            "orders": [{
                "a": 0,
                "b": true,
                "p": "30000",
                "s": "0.1",
                "r": false,
                "t": {"limit": {"tif": "Gtc"}}
            }],
            "grouping": "na"
        });

        assert_eq!(
            action_hash(&typed, NONCE, None, None).unwrap(),
            action_hash(&json, NONCE, None, None).unwrap()
        );

        // Same fields in a different key order is a different action
        let shuffled = serde_json::json!({
            "type": "order",
            "grouping": "na",
            "orders": json["orders"].clone()
        });
        assert_ne!(
            action_hash(&typed, NONCE, None, None).unwrap(),
            action_hash(&shuffled, NONCE, None, None).unwrap()
        );
    }
}
