//! Main Agent for the Hyperliquid SDK
//!
//! Combines the signer and the API client: every trading call issues a
//! nonce, signs the action, and posts it to `/exchange`.

use crate::{
    api::ApiClient,
    error::{HyperliquidError, Result},
    signer::{Config, HyperliquidSigner},
    types::{
        actions::{Action, CancelEntry, OrderEntry, TimeInForce},
        api::ExchangeRequest,
        market::Meta,
    },
};
use ethers::types::Address;
use serde_json::Value;
use tracing::info;

/// Parameters for a single limit order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Asset index
    pub asset: u32,
    /// Buy (true) or sell (false)
    pub is_buy: bool,
    /// Limit price as a decimal string
    pub price: String,
    /// Size as a decimal string
    pub size: String,
    /// Reduce only (default false)
    pub reduce_only: bool,
    /// Time in force (default Ioc)
    pub time_in_force: TimeInForce,
    /// Client order ID
    pub cloid: Option<String>,
}

impl OrderRequest {
    /// New limit order request with default options
    pub fn new(asset: u32, is_buy: bool, price: impl Into<String>, size: impl Into<String>) -> Self {
        Self {
            asset,
            is_buy,
            price: price.into(),
            size: size.into(),
            reduce_only: false,
            time_in_force: TimeInForce::default(),
            cloid: None,
        }
    }

    /// Set reduce only
    pub fn with_reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }

    /// Set time in force
    pub fn with_time_in_force(mut self, time_in_force: TimeInForce) -> Self {
        self.time_in_force = time_in_force;
        self
    }

    /// Set client order ID
    pub fn with_cloid(mut self, cloid: impl Into<String>) -> Self {
        self.cloid = Some(cloid.into());
        self
    }

    fn to_entry(&self) -> Result<OrderEntry> {
        OrderEntry::limit(
            self.asset,
            self.is_buy,
            &self.price,
            &self.size,
            self.reduce_only,
            self.time_in_force,
            self.cloid.clone(),
        )
    }
}

/// Parameters for a single cancel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelRequest {
    /// Asset index
    pub asset: u32,
    /// Exchange order ID
    pub oid: u64,
}

impl CancelRequest {
    /// New cancel request
    pub fn new(asset: u32, oid: u64) -> Self {
        Self { asset, oid }
    }
}

/// Main Agent for exchange operations
#[derive(Debug, Clone)]
pub struct Agent {
    /// API client for REST operations
    api: ApiClient,
    /// Action signer
    signer: HyperliquidSigner,
    /// Universe metadata, loaded by `initialize_metadata`
    meta: Option<Meta>,
}

impl Agent {
    /// Create a new Agent
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use hyperliquid_native_sdk::{Agent, Config};
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let config = Config::new("your_private_key", "testnet", None)?;
    ///
    ///     let mut agent = Agent::new(config)?;
    ///     agent.initialize_metadata().await?;
    ///     Ok(())
    /// }
    /// ```
    pub fn new(config: Config) -> Result<Self> {
        let api = ApiClient::new(&config)?;
        let signer = HyperliquidSigner::new(config);

        info!(
            "Agent initialized for {} on {} ({})",
            signer.config().address_hex(),
            signer.config().network,
            api.base_url()
        );

        Ok(Self {
            api,
            signer,
            meta: None,
        })
    }

    /// Signing address
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Configuration
    pub fn config(&self) -> &Config {
        self.signer.config()
    }

    /// API client
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    // === Metadata ===

    /// Load the perpetuals universe so assets can be looked up by name
    pub async fn initialize_metadata(&mut self) -> Result<()> {
        let meta = self.api.meta().await?;
        info!("Metadata initialized with {} assets", meta.universe.len());
        self.meta = Some(meta);
        Ok(())
    }

    /// Asset index for a coin name
    pub fn asset_index(&self, symbol: &str) -> Result<u32> {
        self.meta
            .as_ref()
            .ok_or_else(|| HyperliquidError::config("Metadata not initialized"))?
            .asset_index(symbol)
    }

    // === Signing ===

    /// Sign an action with an explicit nonce without sending it
    pub fn sign_action<'a>(
        &self,
        action: &'a Action,
        nonce: u64,
    ) -> Result<ExchangeRequest<'a, Action>> {
        self.signer.build_request(action, nonce)
    }

    /// Sign an action with a fresh nonce and submit it
    ///
    /// The exchange response is returned as-is; order statuses inside a
    /// 2xx body are not interpreted.
    pub async fn execute_action(&self, action: Action) -> Result<Value> {
        let nonce = self.signer.next_nonce();
        let request = self.sign_action(&action, nonce)?;
        info!("Submitting {} action with nonce {}", action.type_name(), nonce);
        self.api.post_exchange(&request).await
    }

    // === Trading ===

    /// Place a single order
    pub async fn send_order(&self, order: OrderRequest) -> Result<Value> {
        self.send_batch_orders(vec![order]).await
    }

    /// Place several orders in one signed action
    pub async fn send_batch_orders(&self, orders: Vec<OrderRequest>) -> Result<Value> {
        if orders.is_empty() {
            return Err(HyperliquidError::invalid_parameter(
                "Order batch must not be empty",
            ));
        }
        let entries = orders
            .iter()
            .map(OrderRequest::to_entry)
            .collect::<Result<Vec<_>>>()?;
        self.execute_action(Action::order(entries)).await
    }

    /// Limit buy
    pub async fn limit_buy(
        &self,
        asset: u32,
        price: &str,
        size: &str,
        time_in_force: TimeInForce,
    ) -> Result<Value> {
        let order = OrderRequest::new(asset, true, price, size).with_time_in_force(time_in_force);
        self.send_order(order).await
    }

    /// Limit sell
    pub async fn limit_sell(
        &self,
        asset: u32,
        price: &str,
        size: &str,
        time_in_force: TimeInForce,
    ) -> Result<Value> {
        let order = OrderRequest::new(asset, false, price, size).with_time_in_force(time_in_force);
        self.send_order(order).await
    }

    /// Cancel a single order
    pub async fn cancel_order(&self, asset: u32, oid: u64) -> Result<Value> {
        self.cancel_orders(vec![CancelRequest::new(asset, oid)]).await
    }

    /// Cancel several orders in one signed action
    pub async fn cancel_orders(&self, cancels: Vec<CancelRequest>) -> Result<Value> {
        if cancels.is_empty() {
            return Err(HyperliquidError::invalid_parameter(
                "Cancel batch must not be empty",
            ));
        }
        let entries = cancels
            .iter()
            .map(|c| CancelEntry::new(c.asset, c.oid))
            .collect();
        self.execute_action(Action::cancel(entries)).await
    }
}
