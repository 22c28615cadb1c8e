use crate::core::{
    errors::ExchangeError,
    kernel::{NonceProvider, RestClient},
    traits::MarketDataSource,
    types::{OrderBook, Symbol, Ticker},
};
use crate::exchanges::gemini::{
    converters::{convert_gemini_book, convert_gemini_ticker},
    rest::GeminiRest,
    types::{GeminiOrderBook, GeminiTicker},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Market data implementation for Gemini
pub struct MarketData<R: RestClient> {
    rest: GeminiRest<R>,
}

impl<R: RestClient + Clone> MarketData<R> {
    pub fn new(rest: &R, nonces: Arc<NonceProvider>) -> Self {
        Self {
            rest: GeminiRest::new(rest.clone(), nonces),
        }
    }

    /// Get the raw exchange-side ticker for a symbol
    #[instrument(skip(self), fields(exchange = "gemini", symbol = %symbol))]
    pub async fn get_raw_ticker(&self, symbol: &str) -> Result<GeminiTicker, ExchangeError> {
        self.rest.get_ticker(symbol).await
    }

    /// Get the raw exchange-side order book for a symbol
    #[instrument(skip(self), fields(exchange = "gemini", symbol = %symbol))]
    pub async fn get_raw_order_book(
        &self,
        symbol: &str,
        limit_bids: Option<u32>,
        limit_asks: Option<u32>,
    ) -> Result<GeminiOrderBook, ExchangeError> {
        self.rest.get_order_book(symbol, limit_bids, limit_asks).await
    }
}

#[async_trait]
impl<R: RestClient + Clone> MarketDataSource for MarketData<R> {
    #[instrument(skip(self), fields(exchange = "gemini"))]
    async fn get_symbols(&self) -> Result<Vec<Symbol>, ExchangeError> {
        let symbols = self.rest.get_symbols().await?;
        Ok(symbols.iter().map(|s| Symbol::parse_lossy(s)).collect())
    }

    #[instrument(skip(self), fields(exchange = "gemini", symbol = %symbol))]
    async fn get_ticker(&self, symbol: &Symbol) -> Result<Ticker, ExchangeError> {
        let ticker = self.rest.get_ticker(&symbol.to_exchange_format()).await?;
        Ok(convert_gemini_ticker(symbol, &ticker))
    }

    #[instrument(skip(self), fields(exchange = "gemini", symbol = %symbol))]
    async fn get_order_book(
        &self,
        symbol: &Symbol,
        limit_bids: Option<u32>,
        limit_asks: Option<u32>,
    ) -> Result<OrderBook, ExchangeError> {
        let book = self
            .rest
            .get_order_book(&symbol.to_exchange_format(), limit_bids, limit_asks)
            .await?;
        Ok(convert_gemini_book(symbol, book))
    }
}
