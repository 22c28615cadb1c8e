use crate::core::{
    errors::ExchangeError,
    kernel::{NonceProvider, RestClient},
    traits::AccountInfo,
    types::{Balance, Symbol, Trade},
};
use crate::exchanges::gemini::{
    converters::{convert_gemini_balance, convert_gemini_trade},
    rest::GeminiRest,
    types::{GeminiHeartbeat, GeminiTradeVolume},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Account implementation for Gemini
pub struct Account<R: RestClient> {
    rest: GeminiRest<R>,
    can_authenticate: bool,
}

impl<R: RestClient + Clone> Account<R> {
    pub fn new(rest: &R, nonces: Arc<NonceProvider>, can_authenticate: bool) -> Self {
        Self {
            rest: GeminiRest::new(rest.clone(), nonces),
            can_authenticate,
        }
    }

    fn ensure_authenticated(&self) -> Result<(), ExchangeError> {
        if self.can_authenticate {
            Ok(())
        } else {
            Err(ExchangeError::AuthError(
                "Missing API credentials for account access".to_string(),
            ))
        }
    }

    /// Get 30-day trading volume, grouped per account then per symbol
    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn get_trade_volume(&self) -> Result<GeminiTradeVolume, ExchangeError> {
        self.ensure_authenticated()?;
        self.rest.trade_volume().await
    }

    /// Send a session heartbeat
    ///
    /// Only meaningful for API keys created with the heartbeat requirement;
    /// harmless otherwise.
    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn heartbeat(&self) -> Result<GeminiHeartbeat, ExchangeError> {
        self.ensure_authenticated()?;
        self.rest.heartbeat().await
    }
}

#[async_trait]
impl<R: RestClient + Clone> AccountInfo for Account<R> {
    #[instrument(skip(self), fields(exchange = "gemini"))]
    async fn get_account_balance(&self) -> Result<Vec<Balance>, ExchangeError> {
        self.ensure_authenticated()?;
        let balances = self.rest.balances().await?;
        Ok(balances.into_iter().map(convert_gemini_balance).collect())
    }

    #[instrument(skip(self), fields(exchange = "gemini", symbol = %symbol))]
    async fn get_past_trades(
        &self,
        symbol: &Symbol,
        limit_trades: Option<u32>,
        timestamp: Option<i64>,
    ) -> Result<Vec<Trade>, ExchangeError> {
        self.ensure_authenticated()?;
        let trades = self
            .rest
            .past_trades(symbol.to_exchange_format(), limit_trades, timestamp)
            .await?;
        Ok(trades
            .into_iter()
            .map(|trade| convert_gemini_trade(symbol, trade))
            .collect())
    }
}
