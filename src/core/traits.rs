use crate::core::{
    errors::ExchangeError,
    types::{Balance, OrderBook, OrderRequest, OrderResponse, Symbol, Ticker, Trade},
};
use async_trait::async_trait;

#[async_trait]
pub trait MarketDataSource {
    /// Get all tradable symbols
    async fn get_symbols(&self) -> Result<Vec<Symbol>, ExchangeError>;

    /// Get the current ticker for a symbol
    async fn get_ticker(&self, symbol: &Symbol) -> Result<Ticker, ExchangeError>;

    /// Get the current order book for a symbol
    async fn get_order_book(
        &self,
        symbol: &Symbol,
        limit_bids: Option<u32>,
        limit_asks: Option<u32>,
    ) -> Result<OrderBook, ExchangeError>;
}

#[async_trait]
pub trait OrderPlacer {
    /// Place a new order
    async fn place_order(&self, order: OrderRequest) -> Result<OrderResponse, ExchangeError>;

    /// Cancel a single order by exchange order id
    async fn cancel_order(&self, order_id: &str) -> Result<OrderResponse, ExchangeError>;

    /// Get the status of a single order
    async fn order_status(&self, order_id: &str) -> Result<OrderResponse, ExchangeError>;

    /// Get all live orders for this session's account
    async fn active_orders(&self) -> Result<Vec<OrderResponse>, ExchangeError>;
}

#[async_trait]
pub trait AccountInfo {
    /// Get available balances for all currencies
    async fn get_account_balance(&self) -> Result<Vec<Balance>, ExchangeError>;

    /// Get past trades for a symbol
    async fn get_past_trades(
        &self,
        symbol: &Symbol,
        limit_trades: Option<u32>,
        timestamp: Option<i64>,
    ) -> Result<Vec<Trade>, ExchangeError>;
}

/// Composite trait for callers that need the full surface at once
#[async_trait]
pub trait ExchangeConnector: MarketDataSource + OrderPlacer + AccountInfo {}
