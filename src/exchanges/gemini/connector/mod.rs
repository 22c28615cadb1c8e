use crate::core::errors::ExchangeError;
use crate::core::traits::{AccountInfo, ExchangeConnector, MarketDataSource, OrderPlacer};
use crate::core::types::{
    Balance, OrderBook, OrderRequest, OrderResponse, Symbol, Ticker, Trade,
};
use crate::core::{config::ExchangeConfig, kernel::NonceProvider, kernel::RestClient};
use async_trait::async_trait;
use std::sync::Arc;

pub mod account;
pub mod market_data;
pub mod trading;

pub use account::Account;
pub use market_data::MarketData;
pub use trading::Trading;

/// Gemini connector that composes all sub-trait implementations
///
/// All three parts share one `NonceProvider`, so signed calls from any of
/// them stay monotonic for the API key.
pub struct GeminiConnector<R: RestClient> {
    pub market: MarketData<R>,
    pub trading: Trading<R>,
    pub account: Account<R>,
}

impl<R: RestClient + Clone + Send + Sync> GeminiConnector<R> {
    /// Create a new Gemini connector with the default system clock
    pub fn new(rest: R, config: &ExchangeConfig) -> Self {
        Self::with_nonce_provider(rest, config, Arc::new(NonceProvider::system()))
    }

    /// Create a new Gemini connector with an injected nonce provider
    pub fn with_nonce_provider(
        rest: R,
        config: &ExchangeConfig,
        nonces: Arc<NonceProvider>,
    ) -> Self {
        let can_authenticate = config.has_credentials();
        Self {
            market: MarketData::new(&rest, Arc::clone(&nonces)),
            trading: Trading::new(&rest, Arc::clone(&nonces), can_authenticate),
            account: Account::new(&rest, nonces, can_authenticate),
        }
    }
}

/// Implement MarketDataSource trait for the Gemini connector
#[async_trait]
impl<R: RestClient + Clone + Send + Sync> MarketDataSource for GeminiConnector<R> {
    async fn get_symbols(&self) -> Result<Vec<Symbol>, ExchangeError> {
        self.market.get_symbols().await
    }

    async fn get_ticker(&self, symbol: &Symbol) -> Result<Ticker, ExchangeError> {
        self.market.get_ticker(symbol).await
    }

    async fn get_order_book(
        &self,
        symbol: &Symbol,
        limit_bids: Option<u32>,
        limit_asks: Option<u32>,
    ) -> Result<OrderBook, ExchangeError> {
        self.market.get_order_book(symbol, limit_bids, limit_asks).await
    }
}

/// Implement OrderPlacer trait for the Gemini connector
#[async_trait]
impl<R: RestClient + Clone + Send + Sync> OrderPlacer for GeminiConnector<R> {
    async fn place_order(&self, order: OrderRequest) -> Result<OrderResponse, ExchangeError> {
        self.trading.place_order(order).await
    }

    async fn cancel_order(&self, order_id: &str) -> Result<OrderResponse, ExchangeError> {
        self.trading.cancel_order(order_id).await
    }

    async fn order_status(&self, order_id: &str) -> Result<OrderResponse, ExchangeError> {
        self.trading.order_status(order_id).await
    }

    async fn active_orders(&self) -> Result<Vec<OrderResponse>, ExchangeError> {
        self.trading.active_orders().await
    }
}

/// Implement AccountInfo trait for the Gemini connector
#[async_trait]
impl<R: RestClient + Clone + Send + Sync> AccountInfo for GeminiConnector<R> {
    async fn get_account_balance(&self) -> Result<Vec<Balance>, ExchangeError> {
        self.account.get_account_balance().await
    }

    async fn get_past_trades(
        &self,
        symbol: &Symbol,
        limit_trades: Option<u32>,
        timestamp: Option<i64>,
    ) -> Result<Vec<Trade>, ExchangeError> {
        self.account.get_past_trades(symbol, limit_trades, timestamp).await
    }
}

impl<R: RestClient + Clone + Send + Sync> ExchangeConnector for GeminiConnector<R> {}
