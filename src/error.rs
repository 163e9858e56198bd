//! Error types for the Hyperliquid native SDK

use thiserror::Error;

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, HyperliquidError>;

/// Main error type for SDK operations
#[derive(Error, Debug)]
pub enum HyperliquidError {
    /// A value that cannot be represented by the msgpack subset or by a typed-data field
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// A typed-data field type that is not a known EIP-712 type
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// A typed-data struct referenced but absent from the type dictionary
    #[error("Missing type: {0}")]
    MissingType(String),

    /// Fixed-size array or bytesN length violation
    #[error("Length mismatch for {ty}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Type being encoded
        ty: String,
        /// Declared length
        expected: usize,
        /// Length of the supplied value
        actual: usize,
    },

    /// Invalid bit/byte width in a sized type (uintN, intN, bytesN)
    #[error("Range error: {0}")]
    Range(String),

    /// Malformed private key
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// Non-2xx response from the exchange
    #[error("HTTP error {status}: {body}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// Network-level failure in the transport
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid parameter errors
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Asset/symbol not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Signing errors from the underlying ECDSA implementation
    #[error("Signer error: {0}")]
    Signer(String),
}

impl HyperliquidError {
    /// Create a new encoding error
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding(message.into())
    }

    /// Create a new unsupported type error
    pub fn unsupported_type(ty: impl Into<String>) -> Self {
        Self::UnsupportedType(ty.into())
    }

    /// Create a new missing type error
    pub fn missing_type(ty: impl Into<String>) -> Self {
        Self::MissingType(ty.into())
    }

    /// Create a new length mismatch error
    pub fn length_mismatch(ty: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::LengthMismatch {
            ty: ty.into(),
            expected,
            actual,
        }
    }

    /// Create a new range error
    pub fn range(message: impl Into<String>) -> Self {
        Self::Range(message.into())
    }

    /// Create a new invalid key error
    pub fn invalid_key(message: impl Into<String>) -> Self {
        Self::InvalidKey(message.into())
    }

    /// Create a new HTTP error
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new invalid parameter error
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter(message.into())
    }

    /// Create a new not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a new signer error
    pub fn signer(message: impl Into<String>) -> Self {
        Self::Signer(message.into())
    }
}
