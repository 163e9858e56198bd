//! Perpetuals universe metadata from the info endpoint

use crate::error::{HyperliquidError, Result};
use serde::{Deserialize, Serialize};

/// One perpetual asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMeta {
    /// Coin name (e.g. "BTC")
    pub name: String,
    /// Size decimals
    pub sz_decimals: u32,
    /// Maximum leverage
    #[serde(default)]
    pub max_leverage: Option<u32>,
    /// Only isolated margin allowed
    #[serde(default)]
    pub only_isolated: Option<bool>,
}

/// Response of `{"type":"meta"}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Assets; the position in this list is the asset index
    pub universe: Vec<AssetMeta>,
}

impl Meta {
    /// Asset index for a coin name
    pub fn asset_index(&self, symbol: &str) -> Result<u32> {
        self.universe
            .iter()
            .position(|asset| asset.name.eq_ignore_ascii_case(symbol))
            .map(|idx| idx as u32)
            .ok_or_else(|| HyperliquidError::not_found(format!("Asset not found: {}", symbol)))
    }

    /// Metadata for an asset index
    pub fn asset(&self, index: u32) -> Option<&AssetMeta> {
        self.universe.get(index as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_parsing_and_lookup() {
        let meta: Meta = serde_json::from_str(
            r#"{"universe":[
                {"name":"BTC","szDecimals":5,"maxLeverage":40},
                {"name":"ETH","szDecimals":4,"maxLeverage":25,"onlyIsolated":false}
            ]}"#,
        )
        .unwrap();

        assert_eq!(meta.asset_index("BTC").unwrap(), 0);
        assert_eq!(meta.asset_index("eth").unwrap(), 1);
        assert_eq!(meta.asset(1).unwrap().sz_decimals, 4);
        assert!(matches!(
            meta.asset_index("DOGE"),
            Err(HyperliquidError::NotFound(_))
        ));
    }
}
