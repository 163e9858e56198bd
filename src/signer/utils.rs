use crate::error::{HyperliquidError, Result};
use ethers::types::Address;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Decode a hex string, with or without the `0x` prefix
pub fn decode_hex(value: &str) -> Result<Vec<u8>> {
    let digits = value.strip_prefix("0x").unwrap_or(value);
    hex::decode(digits)
        .map_err(|e| HyperliquidError::encoding(format!("invalid hex '{}': {}", value, e)))
}

/// Parse a 20-byte address from 0x-hex
pub fn parse_address(value: &str) -> Result<Address> {
    let bytes = decode_hex(value)?;
    if bytes.len() != 20 {
        return Err(HyperliquidError::length_mismatch("address", 20, bytes.len()));
    }
    Ok(Address::from_slice(&bytes))
}

/// Lowercase 0x-hex rendering of an address
pub fn address_to_hex(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_bytes()))
}

/// Normalize a price or size to the exchange's canonical decimal string
///
/// Trailing fractional zeros are removed (`"0.10"` -> `"0.1"`,
/// `"30000.0"` -> `"30000"`). The value is parsed as an exact decimal and
/// never passes through binary floating point.
pub fn normalize_decimal(value: &str) -> Result<String> {
    let trimmed = value.trim();
    let parsed = Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| {
            HyperliquidError::invalid_parameter(format!("invalid decimal '{}': {}", value, e))
        })?;
    if parsed.is_sign_negative() && !parsed.is_zero() {
        return Err(HyperliquidError::invalid_parameter(format!(
            "decimal cannot be negative: {}",
            value
        )));
    }
    Ok(parsed.normalize().to_string())
}
