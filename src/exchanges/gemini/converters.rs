use super::types as gemini_types;
use crate::core::types::{
    Balance, OrderBook, OrderBookEntry, OrderResponse, OrderSide, Symbol, Ticker, Trade,
};

/// Convert a wire-side side string to the core enum
pub fn convert_order_side(side: &str) -> OrderSide {
    if side.eq_ignore_ascii_case("sell") {
        OrderSide::Sell
    } else {
        OrderSide::Buy
    }
}

/// Convert a Gemini order to the core order response type
pub fn convert_gemini_order(order: gemini_types::GeminiOrder) -> OrderResponse {
    OrderResponse {
        order_id: order.order_id,
        client_order_id: order.client_order_id,
        symbol: Symbol::parse_lossy(&order.symbol),
        side: convert_order_side(&order.side),
        price: order.price.map(crate::core::types::Price::new),
        original_amount: crate::core::types::Quantity::new(order.original_amount),
        executed_amount: crate::core::types::Quantity::new(order.executed_amount),
        remaining_amount: crate::core::types::Quantity::new(order.remaining_amount),
        avg_execution_price: order.avg_execution_price.map(crate::core::types::Price::new),
        is_live: order.is_live,
        is_cancelled: order.is_cancelled,
        timestamp_ms: order.timestampms,
    }
}

/// Convert a Gemini ticker to the core ticker type
pub fn convert_gemini_ticker(symbol: &Symbol, ticker: &gemini_types::GeminiTicker) -> Ticker {
    Ticker {
        symbol: symbol.clone(),
        bid: crate::core::types::Price::new(ticker.bid),
        ask: crate::core::types::Price::new(ticker.ask),
        last: crate::core::types::Price::new(ticker.last),
    }
}

/// Convert a Gemini order book to the core order book type
pub fn convert_gemini_book(symbol: &Symbol, book: gemini_types::GeminiOrderBook) -> OrderBook {
    let convert_entries = |entries: Vec<gemini_types::GeminiBookEntry>| {
        entries
            .into_iter()
            .map(|entry| OrderBookEntry {
                price: crate::core::types::Price::new(entry.price),
                quantity: crate::core::types::Quantity::new(entry.amount),
            })
            .collect()
    };

    OrderBook {
        symbol: symbol.clone(),
        bids: convert_entries(book.bids),
        asks: convert_entries(book.asks),
    }
}

/// Convert a Gemini past trade to the core trade type
pub fn convert_gemini_trade(symbol: &Symbol, trade: gemini_types::GeminiTrade) -> Trade {
    Trade {
        symbol: symbol.clone(),
        tid: trade.tid,
        order_id: trade.order_id,
        price: crate::core::types::Price::new(trade.price),
        quantity: crate::core::types::Quantity::new(trade.amount),
        side: convert_order_side(&trade.side),
        aggressor: trade.aggressor,
        fee_currency: trade.fee_currency,
        fee_amount: crate::core::types::Quantity::new(trade.fee_amount),
        timestamp_ms: trade.timestampms,
    }
}

/// Convert a Gemini balance to the core balance type
pub fn convert_gemini_balance(balance: gemini_types::GeminiBalance) -> Balance {
    Balance {
        currency: balance.currency,
        amount: crate::core::types::Quantity::new(balance.amount),
        available: crate::core::types::Quantity::new(balance.available),
        available_for_withdrawal: crate::core::types::Quantity::new(
            balance.available_for_withdrawal,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_convert_order_side() {
        assert_eq!(convert_order_side("buy"), OrderSide::Buy);
        assert_eq!(convert_order_side("Sell"), OrderSide::Sell);
    }

    #[test]
    fn test_convert_gemini_order() {
        let raw = r#"{
            "order_id": "44375901",
            "symbol": "btcusd",
            "exchange": "gemini",
            "side": "buy",
            "type": "exchange limit",
            "timestamp": "1494870642",
            "timestampms": 1494870642156,
            "is_live": false,
            "is_cancelled": false,
            "executed_amount": "3",
            "remaining_amount": "0",
            "original_amount": "3",
            "price": "400.00",
            "avg_execution_price": "400.00"
        }"#;
        let order: super::gemini_types::GeminiOrder = serde_json::from_str(raw).unwrap();
        let response = convert_gemini_order(order);

        assert_eq!(response.order_id, "44375901");
        assert_eq!(response.symbol.base, "btc");
        assert_eq!(response.side, OrderSide::Buy);
        assert_eq!(response.original_amount.value(), dec!(3));
        assert_eq!(response.timestamp_ms, 1_494_870_642_156);
    }
}
