use crate::core::{
    errors::ExchangeError,
    kernel::{NonceProvider, RestClient},
    traits::OrderPlacer,
    types::{OrderRequest, OrderResponse},
};
use crate::exchanges::gemini::{
    converters::convert_gemini_order,
    rest::GeminiRest,
    types::{GeminiCancelAllResult, GeminiOrder},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Trading implementation for Gemini
pub struct Trading<R: RestClient> {
    rest: GeminiRest<R>,
    can_authenticate: bool,
}

impl<R: RestClient + Clone> Trading<R> {
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
                "Missing API credentials for trading".to_string(),
            ))
        }
    }

    /// Cancel all orders opened by this session, returning the raw result
    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn cancel_session_orders(&self) -> Result<GeminiCancelAllResult, ExchangeError> {
        self.ensure_authenticated()?;
        self.rest.cancel_session_orders().await
    }

    /// Cancel every active order for the account, returning the raw result
    #[instrument(skip(self), fields(exchange = "gemini"))]
    pub async fn cancel_all_orders(&self) -> Result<GeminiCancelAllResult, ExchangeError> {
        self.ensure_authenticated()?;
        self.rest.cancel_all_orders().await
    }

    /// Get the raw exchange-side order for a status query
    #[instrument(skip(self), fields(exchange = "gemini", order_id = %order_id))]
    pub async fn raw_order_status(&self, order_id: &str) -> Result<GeminiOrder, ExchangeError> {
        self.ensure_authenticated()?;
        self.rest.order_status(order_id.to_string()).await
    }
}

#[async_trait]
impl<R: RestClient + Clone> OrderPlacer for Trading<R> {
    #[instrument(skip(self), fields(exchange = "gemini", symbol = %order.symbol))]
    async fn place_order(&self, order: OrderRequest) -> Result<OrderResponse, ExchangeError> {
        self.ensure_authenticated()?;

        let placed = self
            .rest
            .new_order(
                order.symbol.to_exchange_format(),
                order.amount.to_string(),
                order.price.to_string(),
                order.side.as_str().to_string(),
                order.client_order_id,
                order.order_option.map(|option| option.as_str().to_string()),
            )
            .await?;

        Ok(convert_gemini_order(placed))
    }

    #[instrument(skip(self), fields(exchange = "gemini", order_id = %order_id))]
    async fn cancel_order(&self, order_id: &str) -> Result<OrderResponse, ExchangeError> {
        self.ensure_authenticated()?;
        let cancelled = self.rest.cancel_order(order_id.to_string()).await?;
        Ok(convert_gemini_order(cancelled))
    }

    #[instrument(skip(self), fields(exchange = "gemini", order_id = %order_id))]
    async fn order_status(&self, order_id: &str) -> Result<OrderResponse, ExchangeError> {
        self.ensure_authenticated()?;
        let order = self.rest.order_status(order_id.to_string()).await?;
        Ok(convert_gemini_order(order))
    }

    #[instrument(skip(self), fields(exchange = "gemini"))]
    async fn active_orders(&self) -> Result<Vec<OrderResponse>, ExchangeError> {
        self.ensure_authenticated()?;
        let orders = self.rest.active_orders().await?;
        Ok(orders.into_iter().map(convert_gemini_order).collect())
    }
}
