use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::core::quote::{QuoteProvider, TARGET_CURRENCY};

/// Client for the open.er-api.com "latest rates" endpoint.
pub struct ExchangeRateApiProvider {
    base_url: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// `{base_url}/v6/latest/{base}`, with `base` kept as a single escaped segment.
    fn latest_rates_url(&self, base: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid provider base URL: {}", self.base_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow!("Provider base URL cannot hold a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(["v6", "latest", base]);
        Ok(url)
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    #[serde(default)]
    rates: HashMap<String, f64>,
}

#[async_trait]
impl QuoteProvider for ExchangeRateApiProvider {
    #[instrument(name = "ExchangeRateFetch", skip(self), fields(base = %base))]
    async fn fetch_brl_rate(&self, base: &str) -> Result<f64> {
        let url = self.latest_rates_url(base)?;
        debug!("Requesting latest rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent(concat!("cotacao/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for base currency: {}", e, base))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "HTTP error: {} for base currency: {}",
                response.status(),
                base
            ));
        }

        let text = response.text().await?;
        let data: LatestRatesResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("Failed to parse JSON response for {}: {}", base, e))?;

        let rate = data
            .rates
            .get(TARGET_CURRENCY)
            .copied()
            .filter(|rate| rate.is_finite() && *rate > 0.0)
            .ok_or_else(|| anyhow!("No {} rate found for base currency: {}", TARGET_CURRENCY, base))?;

        debug!(rate, "Received {} rate", TARGET_CURRENCY);
        Ok(rate)
    }
}
