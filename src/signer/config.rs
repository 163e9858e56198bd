//! Configuration for the Hyperliquid SDK

use crate::{
    error::{HyperliquidError, Result},
    signer::utils::{address_to_hex, parse_address},
    types::constants::endpoints::{MAINNET_API_URL, TESTNET_API_URL},
};
use ethers::{
    signers::{LocalWallet, Signer},
    types::Address,
};
use std::str::FromStr;
use url::Url;

/// Network the actions are signed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Network {
    /// Mainnet (production)
    Mainnet,
    /// Testnet
    Testnet,
}

impl Network {
    /// Default API base URL for this network
    pub fn default_api_url(&self) -> &'static str {
        match self {
            Network::Mainnet => MAINNET_API_URL,
            Network::Testnet => TESTNET_API_URL,
        }
    }
}

impl FromStr for Network {
    type Err = HyperliquidError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            _ => Err(HyperliquidError::config(
                "Invalid network. Use 'mainnet' or 'testnet'",
            )),
        }
    }
}

impl std::fmt::Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Testnet => write!(f, "testnet"),
        }
    }
}

/// Configuration for the exchange client
#[derive(Debug, Clone)]
pub struct Config {
    /// API base URL
    pub api_url: Url,

    /// Network (mainnet or testnet)
    pub network: Network,

    /// Signing wallet
    pub wallet: LocalWallet,

    /// Vault to trade on behalf of
    pub vault_address: Option<Address>,

    /// Expiry (ms timestamp) attached to every signed action
    pub expires_after: Option<u64>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Config {
    /// Create a new configuration
    ///
    /// # Arguments
    ///
    /// * `private_key` - secp256k1 private key as hex, with or without `0x`
    /// * `network` - Network name ("mainnet" or "testnet")
    /// * `vault_address` - Optional vault address (0x... format)
    pub fn new(private_key: &str, network: &str, vault_address: Option<&str>) -> Result<Self> {
        let network = Network::from_str(network)?;
        let api_url = Url::parse(network.default_api_url())
            .map_err(|e| HyperliquidError::config(format!("Invalid API URL: {}", e)))?;

        let key = private_key.trim();
        let wallet = LocalWallet::from_str(key.strip_prefix("0x").unwrap_or(key))
            .map_err(|e| HyperliquidError::invalid_key(e.to_string()))?;

        let vault_address = vault_address.map(parse_address).transpose()?;

        Ok(Self {
            api_url,
            network,
            wallet,
            vault_address,
            expires_after: None,
            timeout_secs: 30,
        })
    }

    /// Override the API base URL
    pub fn with_api_url(mut self, api_url: &str) -> Result<Self> {
        self.api_url = Url::parse(api_url)
            .map_err(|e| HyperliquidError::config(format!("Invalid API URL: {}", e)))?;
        Ok(self)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the expiry attached to signed actions
    pub fn with_expires_after(mut self, expires_after: Option<u64>) -> Self {
        self.expires_after = expires_after;
        self
    }

    /// Address derived from the private key
    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Lowercase 0x-hex address
    pub fn address_hex(&self) -> String {
        address_to_hex(&self.address())
    }

    /// Check if this is mainnet
    pub fn is_mainnet(&self) -> bool {
        self.network == Network::Mainnet
    }

    /// Check if this is testnet
    pub fn is_testnet(&self) -> bool {
        self.network == Network::Testnet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_config_defaults() {
        let config = Config::new(TEST_KEY, "testnet", None).unwrap();
        assert!(config.is_testnet());
        assert_eq!(config.api_url.as_str(), "https://api.hyperliquid-testnet.xyz/");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.vault_address.is_none());
        assert!(config.expires_after.is_none());
        assert_eq!(
            config.address_hex(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_config_prefixed_key_and_vault() {
        let config = Config::new(
            &format!("0x{}", TEST_KEY),
            "Mainnet",
            Some("0x1234567890123456789012345678901234567890"),
        )
        .unwrap()
        .with_timeout(5)
        .with_expires_after(Some(1_700_000_060_000));

        assert!(config.is_mainnet());
        assert_eq!(config.api_url.as_str(), "https://api.hyperliquid.xyz/");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.expires_after, Some(1_700_000_060_000));
        assert_eq!(
            address_to_hex(&config.vault_address.unwrap()),
            "0x1234567890123456789012345678901234567890"
        );
    }

    #[test]
    fn test_config_rejects_bad_input() {
        assert!(matches!(
            Config::new("not-a-key", "mainnet", None),
            Err(HyperliquidError::InvalidKey(_))
        ));
        assert!(matches!(
            Config::new(TEST_KEY, "kairos", None),
            Err(HyperliquidError::Config(_))
        ));
        assert!(matches!(
            Config::new(TEST_KEY, "mainnet", Some("0x1234")),
            Err(HyperliquidError::LengthMismatch { .. })
        ));
        assert!(Config::new(TEST_KEY, "mainnet", None)
            .unwrap()
            .with_api_url("not a url")
            .is_err());
    }

    #[test]
    fn test_network_display_roundtrip() {
        assert_eq!(Network::Mainnet.to_string(), "mainnet");
        assert_eq!("TESTNET".parse::<Network>().unwrap(), Network::Testnet);
    }
}
