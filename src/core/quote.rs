//! Quote records and the rate provider abstraction

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Display;

/// Currency every quote is expressed in.
pub const TARGET_CURRENCY: &str = "BRL";

/// Base currency used when a lookup does not name one.
pub const DEFAULT_BASE_CURRENCY: &str = "EUR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuoteSource {
    #[serde(rename = "API open.er-api.com")]
    ExternalProvider,
    #[serde(rename = "Manual")]
    Manual,
}

impl Display for QuoteSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                QuoteSource::ExternalProvider => "API open.er-api.com",
                QuoteSource::Manual => "Manual",
            }
        )
    }
}

/// A single currency to BRL observation. Fields are private so a record
/// cannot change after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    #[serde(rename = "moeda")]
    currency: String,
    #[serde(rename = "valor")]
    value: f64,
    #[serde(rename = "data")]
    timestamp: DateTime<Utc>,
    #[serde(rename = "fonte")]
    source: QuoteSource,
}

impl Quote {
    /// Builds a record stamped with the current time. The currency code is
    /// uppercased here so every stored record satisfies the same invariant.
    /// `value` must be finite and positive; callers validate it first.
    pub fn new(currency: &str, value: f64, source: QuoteSource) -> Self {
        debug_assert!(
            value.is_finite() && value > 0.0,
            "quote value must be finite and positive, got {value}"
        );
        Self {
            currency: currency.to_uppercase(),
            value,
            timestamp: Utc::now(),
            source,
        }
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn source(&self) -> QuoteSource {
        self.source
    }
}

#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Returns how many BRL one unit of `base` is worth.
    async fn fetch_brl_rate(&self, base: &str) -> Result<f64>;
}
