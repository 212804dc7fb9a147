//! Quote workflows shared by the HTTP handlers.

use crate::core::error::QuoteError;
use crate::core::quote::{DEFAULT_BASE_CURRENCY, Quote, QuoteProvider, QuoteSource};
use crate::store::QuoteHistory;
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

pub struct QuoteService {
    provider: Arc<dyn QuoteProvider>,
    history: QuoteHistory,
}

impl QuoteService {
    pub fn new(provider: Arc<dyn QuoteProvider>, history: QuoteHistory) -> Self {
        Self { provider, history }
    }

    /// Looks up the current BRL rate for `base` (EUR when absent or empty) and
    /// records it. Nothing is recorded when the provider fails.
    pub async fn fetch_quote(&self, base: Option<&str>) -> Result<Quote, QuoteError> {
        let base = base
            .filter(|b| !b.is_empty())
            .unwrap_or(DEFAULT_BASE_CURRENCY)
            .to_uppercase();

        let rate = self.provider.fetch_brl_rate(&base).await.map_err(|e| {
            error!(error = %e, base = %base, "Rate provider request failed");
            QuoteError::UpstreamUnavailable(format!("{e:#}"))
        })?;
        if !(rate.is_finite() && rate > 0.0) {
            error!(rate, base = %base, "Rate provider returned an unusable rate");
            return Err(QuoteError::UpstreamUnavailable(format!(
                "Invalid BRL rate {rate} for base currency: {base}"
            )));
        }

        let quote = Quote::new(&base, rate, QuoteSource::ExternalProvider);
        self.record(&quote).await;
        Ok(quote)
    }

    /// Records a manually supplied quote. `valor` may be a JSON number or a
    /// numeric string.
    pub async fn register_quote(
        &self,
        moeda: Option<&Value>,
        valor: Option<&Value>,
    ) -> Result<Quote, QuoteError> {
        let currency = parse_currency(moeda)?;
        let value = parse_value(valor)?;

        let quote = Quote::new(currency, value, QuoteSource::Manual);
        self.record(&quote).await;
        Ok(quote)
    }

    async fn record(&self, quote: &Quote) {
        let position = self.history.append(quote.clone()).await;
        info!(
            position,
            currency = %quote.currency(),
            value = quote.value(),
            source = %quote.source(),
            timestamp = %quote.timestamp().to_rfc3339(),
            "Recorded quote"
        );
    }

    pub async fn history(&self) -> Vec<Quote> {
        self.history.all().await
    }
}

fn parse_currency(moeda: Option<&Value>) -> Result<&str, QuoteError> {
    match moeda {
        Some(Value::String(code)) if !code.trim().is_empty() => Ok(code.trim()),
        Some(Value::String(_)) | Some(Value::Null) | None => Err(QuoteError::InvalidInput(
            "campo 'moeda' ausente ou vazio".to_string(),
        )),
        Some(_) => Err(QuoteError::InvalidInput(
            "campo 'moeda' deve ser um texto".to_string(),
        )),
    }
}

fn parse_value(valor: Option<&Value>) -> Result<f64, QuoteError> {
    let value = match valor {
        None | Some(Value::Null) => {
            return Err(QuoteError::InvalidInput(
                "campo 'valor' ausente".to_string(),
            ));
        }
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };

    match value {
        Some(v) if v.is_finite() && v > 0.0 => Ok(v),
        _ => Err(QuoteError::InvalidInput(
            "campo 'valor' deve ser um número positivo".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Provider stub that answers from a fixed outcome and records requested bases.
    struct StubProvider {
        rate: Option<f64>,
        requested: Mutex<Vec<String>>,
    }

    impl StubProvider {
        fn new(rate: Option<f64>) -> Arc<Self> {
            Arc::new(Self {
                rate,
                requested: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl QuoteProvider for StubProvider {
        async fn fetch_brl_rate(&self, base: &str) -> Result<f64> {
            self.requested.lock().unwrap().push(base.to_string());
            self.rate.ok_or_else(|| anyhow!("connection refused"))
        }
    }

    fn service_with(provider: Arc<StubProvider>) -> (QuoteService, QuoteHistory) {
        let history = QuoteHistory::new();
        (QuoteService::new(provider, history.clone()), history)
    }

    #[tokio::test]
    async fn test_fetch_quote_defaults_to_eur() {
        let provider = StubProvider::new(Some(6.2));
        let (service, history) = service_with(provider.clone());

        let quote = service.fetch_quote(None).await.unwrap();
        assert_eq!(quote.currency(), "EUR");
        assert_eq!(quote.value(), 6.2);
        assert_eq!(quote.source(), QuoteSource::ExternalProvider);

        service.fetch_quote(Some("")).await.unwrap();
        assert_eq!(*provider.requested.lock().unwrap(), vec!["EUR", "EUR"]);
        assert_eq!(history.all().await.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_quote_uppercases_base() {
        let provider = StubProvider::new(Some(5.0));
        let (service, history) = service_with(provider.clone());

        let quote = service.fetch_quote(Some("usd")).await.unwrap();
        assert_eq!(quote.currency(), "USD");
        assert_eq!(*provider.requested.lock().unwrap(), vec!["USD"]);
        assert_eq!(history.all().await.last(), Some(&quote));
    }

    #[tokio::test]
    async fn test_fetch_failure_records_nothing() {
        let (service, history) = service_with(StubProvider::new(None));

        let err = service.fetch_quote(Some("USD")).await.unwrap_err();
        assert_eq!(
            err,
            QuoteError::UpstreamUnavailable("connection refused".to_string())
        );
        assert!(history.all().await.is_empty());
    }

    #[tokio::test]
    async fn test_unusable_provider_rate_records_nothing() {
        for rate in [f64::NAN, f64::INFINITY, 0.0, -2.0] {
            let (service, history) = service_with(StubProvider::new(Some(rate)));

            let err = service.fetch_quote(Some("USD")).await.unwrap_err();
            assert!(
                matches!(err, QuoteError::UpstreamUnavailable(_)),
                "expected upstream failure for rate {rate}"
            );
            assert!(history.all().await.is_empty());
        }
    }

    #[tokio::test]
    async fn test_register_quote() {
        let (service, history) = service_with(StubProvider::new(None));

        let quote = service
            .register_quote(Some(&json!("usd")), Some(&json!(5.25)))
            .await
            .unwrap();
        assert_eq!(quote.currency(), "USD");
        assert_eq!(quote.value(), 5.25);
        assert_eq!(quote.source(), QuoteSource::Manual);
        assert_eq!(history.all().await, vec![quote]);
    }

    #[tokio::test]
    async fn test_register_quote_accepts_numeric_string() {
        let (service, _) = service_with(StubProvider::new(None));

        let quote = service
            .register_quote(Some(&json!("gbp")), Some(&json!(" 7.1 ")))
            .await
            .unwrap();
        assert_eq!(quote.currency(), "GBP");
        assert_eq!(quote.value(), 7.1);
    }

    #[tokio::test]
    async fn test_register_quote_rejects_invalid_input() {
        let (service, history) = service_with(StubProvider::new(None));

        let cases = [
            (None, Some(json!(5.25))),
            (Some(json!("")), Some(json!(5.25))),
            (Some(json!("   ")), Some(json!(5.25))),
            (Some(json!(42)), Some(json!(5.25))),
            (Some(json!("USD")), None),
            (Some(json!("USD")), Some(Value::Null)),
            (Some(json!("USD")), Some(json!("abc"))),
            (Some(json!("USD")), Some(json!("5.25abc"))),
            (Some(json!("USD")), Some(json!("NaN"))),
            (Some(json!("USD")), Some(json!("inf"))),
            (Some(json!("USD")), Some(json!(0))),
            (Some(json!("USD")), Some(json!(-1.5))),
            (Some(json!("USD")), Some(json!(true))),
            (Some(json!("USD")), Some(json!([5.25]))),
        ];

        for (moeda, valor) in cases {
            let result = service.register_quote(moeda.as_ref(), valor.as_ref()).await;
            assert!(
                matches!(result, Err(QuoteError::InvalidInput(_))),
                "expected invalid input for moeda={moeda:?} valor={valor:?}"
            );
        }
        assert!(history.all().await.is_empty());
    }
}
