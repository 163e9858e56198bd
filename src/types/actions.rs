//! L1 action types: order and cancel batches
//!
//! Field declaration order matters twice: serde emits JSON keys in this
//! order for the request body, and `to_msgpack` writes the same order into
//! the bytes that get hashed. Keep the two in sync.

use crate::{
    error::{HyperliquidError, Result},
    signer::{msgpack::Value, utils::normalize_decimal},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Time in force for limit orders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Immediate or cancel
    #[default]
    Ioc,
    /// Good till cancel
    Gtc,
    /// Add liquidity only (post only)
    Alo,
}

impl TimeInForce {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Ioc => "Ioc",
            TimeInForce::Gtc => "Gtc",
            TimeInForce::Alo => "Alo",
        }
    }
}

impl std::fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeInForce {
    type Err = HyperliquidError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ioc" => Ok(TimeInForce::Ioc),
            "gtc" => Ok(TimeInForce::Gtc),
            "alo" => Ok(TimeInForce::Alo),
            _ => Err(HyperliquidError::invalid_parameter(format!(
                "Invalid time in force '{}'. Use 'Ioc', 'Gtc' or 'Alo'",
                s
            ))),
        }
    }
}

/// Limit order parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limit {
    /// Time in force
    pub tif: TimeInForce,
}

/// Order type, serialized as `{"limit":{"tif":"Gtc"}}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderType {
    /// Limit order
    Limit(Limit),
}

impl OrderType {
    /// Limit order with the given time in force
    pub fn limit(tif: TimeInForce) -> Self {
        OrderType::Limit(Limit { tif })
    }

    fn to_msgpack(self) -> Value {
        match self {
            OrderType::Limit(limit) => Value::map()
                .insert("limit", Value::map().insert("tif", limit.tif.as_str()).build())
                .build(),
        }
    }
}

/// One order of an order batch (wire keys `a,b,p,s,r,t,c`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    /// Asset index in the perpetuals universe
    #[serde(rename = "a")]
    pub asset: u32,
    /// Buy (true) or sell (false)
    #[serde(rename = "b")]
    pub is_buy: bool,
    /// Limit price, canonical decimal string
    #[serde(rename = "p")]
    pub price: String,
    /// Size, canonical decimal string
    #[serde(rename = "s")]
    pub size: String,
    /// Reduce only
    #[serde(rename = "r")]
    pub reduce_only: bool,
    /// Order type
    #[serde(rename = "t")]
    pub order_type: OrderType,
    /// Client order ID
    #[serde(rename = "c", skip_serializing_if = "Option::is_none", default)]
    pub cloid: Option<String>,
}

impl OrderEntry {
    /// Create a limit order entry; price and size are normalized to canonical decimals
    pub fn limit(
        asset: u32,
        is_buy: bool,
        price: &str,
        size: &str,
        reduce_only: bool,
        tif: TimeInForce,
        cloid: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            asset,
            is_buy,
            price: normalize_decimal(price)?,
            size: normalize_decimal(size)?,
            reduce_only,
            order_type: OrderType::limit(tif),
            cloid,
        })
    }

    /// Ordered msgpack representation
    pub fn to_msgpack(&self) -> Value {
        Value::map()
            .insert("a", self.asset)
            .insert("b", self.is_buy)
            .insert("p", self.price.as_str())
            .insert("s", self.size.as_str())
            .insert("r", self.reduce_only)
            .insert("t", self.order_type.to_msgpack())
            .insert_opt("c", self.cloid.clone())
            .build()
    }
}

/// One cancel of a cancel batch (wire keys `a,o`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelEntry {
    /// Asset index
    #[serde(rename = "a")]
    pub asset: u32,
    /// Exchange order ID
    #[serde(rename = "o")]
    pub oid: u64,
}

impl CancelEntry {
    /// Create a cancel entry
    pub fn new(asset: u32, oid: u64) -> Self {
        Self { asset, oid }
    }

    /// Ordered msgpack representation
    pub fn to_msgpack(&self) -> Value {
        Value::map()
            .insert("a", self.asset)
            .insert("o", self.oid)
            .build()
    }
}

/// Order grouping
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grouping {
    /// No grouping
    #[default]
    #[serde(rename = "na")]
    Na,
    /// Entry order with attached TP/SL
    #[serde(rename = "normalTpsl")]
    NormalTpsl,
    /// TP/SL on the whole position
    #[serde(rename = "positionTpsl")]
    PositionTpsl,
}

impl Grouping {
    /// Wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Grouping::Na => "na",
            Grouping::NormalTpsl => "normalTpsl",
            Grouping::PositionTpsl => "positionTpsl",
        }
    }
}

/// A signable L1 action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Action {
    /// Place a batch of orders
    Order {
        /// Orders in submission order
        orders: Vec<OrderEntry>,
        /// Grouping
        grouping: Grouping,
    },
    /// Cancel a batch of orders by exchange order ID
    Cancel {
        /// Cancels in submission order
        cancels: Vec<CancelEntry>,
    },
}

impl Action {
    /// Order batch with no grouping
    pub fn order(orders: Vec<OrderEntry>) -> Self {
        Action::Order {
            orders,
            grouping: Grouping::Na,
        }
    }

    /// Cancel batch
    pub fn cancel(cancels: Vec<CancelEntry>) -> Self {
        Action::Cancel { cancels }
    }

    /// Wire `type` tag
    pub fn type_name(&self) -> &'static str {
        match self {
            Action::Order { .. } => "order",
            Action::Cancel { .. } => "cancel",
        }
    }

    /// Ordered msgpack representation
    pub fn to_msgpack(&self) -> Value {
        match self {
            Action::Order { orders, grouping } => Value::map()
                .insert("type", self.type_name())
                .insert(
                    "orders",
                    orders.iter().map(OrderEntry::to_msgpack).collect::<Vec<_>>(),
                )
                .insert("grouping", grouping.as_str())
                .build(),
            Action::Cancel { cancels } => Value::map()
                .insert("type", self.type_name())
                .insert(
                    "cancels",
                    cancels.iter().map(CancelEntry::to_msgpack).collect::<Vec<_>>(),
                )
                .build(),
        }
    }
}
