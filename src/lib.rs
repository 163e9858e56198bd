//! # Hyperliquid Native SDK
//!
//! Rust SDK for signing and submitting L1 actions to the Hyperliquid exchange.
//!
//! ## Features
//!
//! - **Canonical Encoding**: Deterministic msgpack encoding of order and cancel actions
//! - **EIP-712 Signing**: Typed-data hashing and deterministic secp256k1 signatures
//! - **Agent Architecture**: One interface combining the signer and the API client
//! - **Exact Decimals**: Prices and sizes never pass through binary floating point
//! - **Error Handling**: A single error type for encoding, signing and transport failures
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hyperliquid_native_sdk::{Agent, Config, OrderRequest, TimeInForce};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new(
//!         "your_private_key", // secp256k1 private key (hex)
//!         "testnet",          // network
//!         None,               // vault address
//!     )?;
//!
//!     let mut agent = Agent::new(config)?;
//!     agent.initialize_metadata().await?;
//!
//!     // Place a resting limit buy on BTC
//!     let btc = agent.asset_index("BTC")?;
//!     let response = agent
//!         .send_order(
//!             OrderRequest::new(btc, true, "30000", "0.1")
//!                 .with_time_in_force(TimeInForce::Gtc),
//!         )
//!         .await?;
//!
//!     println!("Order response: {}", response);
//!
//!     Ok(())
//! }
//! ```
//!
//! Signing without the network:
//!
//! ```rust
//! use hyperliquid_native_sdk::{sign_l1_action, Action, OrderEntry, TimeInForce};
//! use ethers::signers::LocalWallet;
//!
//! let wallet: LocalWallet = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80"
//!     .parse()
//!     .unwrap();
//! let order = OrderEntry::limit(0, true, "30000", "0.1", false, TimeInForce::Gtc, None).unwrap();
//! let action = Action::order(vec![order]);
//!
//! let signature = sign_l1_action(&wallet, &action, 1_700_000_000_000, false, None, None).unwrap();
//! assert_eq!(signature.v, 28);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod agent;
pub mod api;
pub mod error;
pub mod signer;
pub mod types;

// Re-exports for convenience
pub use agent::{Agent, CancelRequest, OrderRequest};
pub use api::ApiClient;
pub use error::{HyperliquidError, Result};
pub use signer::{sign_l1_action, Config, HyperliquidSigner, Network};
pub use types::*;
