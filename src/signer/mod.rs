//! Action encoding, hashing and signing

pub mod action_hash;
pub mod config;
pub mod msgpack;
pub mod signer;
pub mod typed_data;
pub mod utils;

pub use action_hash::{action_hash, SignableAction};
pub use config::{Config, Network};
pub use signer::{agent_digest, sign_l1_action, HyperliquidSigner};
pub use typed_data::{hash_typed_data, Eip712Domain, TypedData, TypedDataField, Types};
pub use utils::*;
