//! Constants used throughout the SDK

/// Default API endpoints
pub mod endpoints {
    /// Mainnet API base URL
    pub const MAINNET_API_URL: &str = "https://api.hyperliquid.xyz";

    /// Testnet API base URL
    pub const TESTNET_API_URL: &str = "https://api.hyperliquid-testnet.xyz";

    /// Path for signed actions
    pub const EXCHANGE_PATH: &str = "/exchange";

    /// Path for public info queries
    pub const INFO_PATH: &str = "/info";
}

/// EIP-712 constants for L1 action signing
pub mod eip712 {
    /// Domain name
    pub const DOMAIN_NAME: &str = "Exchange";

    /// Domain version
    pub const DOMAIN_VERSION: &str = "1";

    /// Domain chain ID (fixed for L1 actions on both networks)
    pub const DOMAIN_CHAIN_ID: u64 = 1337;

    /// Verifying contract (zero address)
    pub const VERIFYING_CONTRACT: &str = "0x0000000000000000000000000000000000000000";

    /// Primary type of the signed message
    pub const AGENT_TYPE: &str = "Agent";

    /// `source` value for mainnet
    pub const MAINNET_SOURCE: &str = "a";

    /// `source` value for testnet
    pub const TESTNET_SOURCE: &str = "b";
}

/// Action hash preimage markers
pub mod action_hash {
    /// Follows the nonce when no vault address is given
    pub const VAULT_ABSENT: u8 = 0x00;

    /// Follows the nonce when a vault address is given, before the 20 address bytes
    pub const VAULT_PRESENT: u8 = 0x01;

    /// Precedes the 8-byte expiry; omitted with the expiry when none is given
    pub const EXPIRES_AFTER_PRESENT: u8 = 0x00;
}
