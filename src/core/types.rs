use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TypesError {
    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),
    #[error("invalid decimal: {0}")]
    InvalidDecimal(#[from] rust_decimal::Error),
}

/// A trading pair, held as lowercase base and quote assets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub base: String,
    pub quote: String,
}

impl Symbol {
    pub fn new(base: impl Into<String>, quote: impl Into<String>) -> Result<Self, TypesError> {
        let base = base.into().to_lowercase();
        let quote = quote.into().to_lowercase();

        if base.is_empty() || quote.is_empty() {
            return Err(TypesError::InvalidSymbol(
                "base and quote assets cannot be empty".to_string(),
            ));
        }

        Ok(Symbol { base, quote })
    }

    /// Split an exchange-style concatenated pair like `"btcusd"`
    ///
    /// The exchange quotes every pair against a small set of counter
    /// currencies, so the quote is recognized by suffix.
    pub fn from_string(symbol: &str) -> Result<Self, TypesError> {
        const QUOTES: [&str; 6] = ["usd", "btc", "eth", "eur", "gbp", "sgd"];

        let symbol = symbol.to_lowercase();
        if symbol.len() < 6 {
            return Err(TypesError::InvalidSymbol(format!("too short: {}", symbol)));
        }

        for quote in QUOTES {
            if let Some(base) = symbol.strip_suffix(quote) {
                if !base.is_empty() {
                    return Symbol::new(base, quote);
                }
            }
        }

        Err(TypesError::InvalidSymbol(format!(
            "unrecognized quote currency: {}",
            symbol
        )))
    }

    /// Like `from_string`, but falls back to treating the whole string as a
    /// USD-quoted base asset; response conversion must not fail on a pair the
    /// exchange added after this list was written
    pub fn parse_lossy(symbol: &str) -> Self {
        Self::from_string(symbol).unwrap_or_else(|_| Symbol {
            base: symbol.to_lowercase(),
            quote: "usd".to_string(),
        })
    }

    /// The concatenated lowercase form the exchange expects in paths and
    /// payloads
    pub fn to_exchange_format(&self) -> String {
        format!("{}{}", self.base, self.quote)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

/// Decimal-string newtypes: the exchange transmits all numeric amounts as
/// quoted decimal strings, and they stay exact decimals end to end rather
/// than round-tripping through floats.
macro_rules! decimal_string_type {
    ($(#[$docs:meta])* $name:ident) => {
        $(#[$docs])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(#[serde(with = "rust_decimal::serde::str")] pub Decimal);

        impl $name {
            pub fn new(value: Decimal) -> Self {
                Self(value)
            }

            pub fn from_str(s: &str) -> Result<Self, TypesError> {
                Ok(Self(s.parse()?))
            }

            pub fn value(&self) -> Decimal {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

decimal_string_type!(
    /// Price of one unit of the base asset, in the quote asset
    Price
);
decimal_string_type!(
    /// Amount of the base asset
    Quantity
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Execution options accepted on order placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderOption {
    MakerOrCancel,
    ImmediateOrCancel,
    FillOrKill,
    AuctionOnly,
    IndicationOfInterest,
}

impl OrderOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MakerOrCancel => "maker-or-cancel",
            Self::ImmediateOrCancel => "immediate-or-cancel",
            Self::FillOrKill => "fill-or-kill",
            Self::AuctionOnly => "auction-only",
            Self::IndicationOfInterest => "indication-of-interest",
        }
    }
}

impl fmt::Display for OrderOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: Symbol,
    pub side: OrderSide,
    pub amount: Quantity,
    pub price: Price,
    pub client_order_id: Option<String>,
    pub order_option: Option<OrderOption>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order_id: String,
    pub client_order_id: Option<String>,
    pub symbol: Symbol,
    pub side: OrderSide,
    pub price: Option<Price>,
    pub original_amount: Quantity,
    pub executed_amount: Quantity,
    pub remaining_amount: Quantity,
    pub avg_execution_price: Option<Price>,
    pub is_live: bool,
    pub is_cancelled: bool,
    pub timestamp_ms: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticker {
    pub symbol: Symbol,
    pub bid: Price,
    pub ask: Price,
    pub last: Price,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookEntry {
    pub price: Price,
    pub quantity: Quantity,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBook {
    pub symbol: Symbol,
    pub bids: Vec<OrderBookEntry>,
    pub asks: Vec<OrderBookEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub symbol: Symbol,
    pub tid: i64,
    pub order_id: String,
    pub price: Price,
    pub quantity: Quantity,
    pub side: OrderSide,
    pub aggressor: bool,
    pub fee_currency: String,
    pub fee_amount: Quantity,
    pub timestamp_ms: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Balance {
    pub currency: String,
    pub amount: Quantity,
    pub available: Quantity,
    pub available_for_withdrawal: Quantity,
}
