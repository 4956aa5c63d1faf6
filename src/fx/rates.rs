//! Rate table source.
//!
//! `HttpRateSource` pulls the full table from an external pricing service
//! in one unauthenticated GET. The trait seam exists so the cache and
//! converter can be tested against a fixed table.

use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Instant;

use super::error::FxError;

/// Full conversion table against one base currency.
#[derive(Debug, Clone)]
pub struct RateTable {
    pub base: String,
    pub rates: HashMap<String, f64>,
    pub fetched_at: Instant,
}

impl RateTable {
    pub fn rate(&self, code: &str) -> Result<f64, FxError> {
        self.rates
            .get(code)
            .copied()
            .ok_or_else(|| FxError::UnknownCurrency(code.to_string()))
    }
}

#[async_trait]
pub trait RateSource: Send + Sync {
    async fn fetch(&self) -> Result<RateTable, FxError>;
}

/// Wire shape of the pricing service response.
#[derive(Debug, Deserialize)]
struct RatesBody {
    rates: HashMap<String, f64>,
}

pub struct HttpRateSource {
    client: reqwest::Client,
    url: String,
    base: String,
}

impl HttpRateSource {
    pub fn new(url: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            base: base.into(),
        }
    }
}

#[async_trait]
impl RateSource for HttpRateSource {
    async fn fetch(&self) -> Result<RateTable, FxError> {
        let body: RatesBody = self
            .client
            .get(&self.url)
            .query(&[("base", self.base.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::debug!(base = %self.base, currencies = body.rates.len(), "rate table fetched");

        Ok(RateTable {
            base: self.base.clone(),
            rates: body.rates,
            fetched_at: Instant::now(),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn fetch_parses_rates_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/latest").query_param("base", "RUB");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"base":"RUB","rates":{"USD":0.0132,"EUR":0.0121}}"#);
            })
            .await;

        let source = HttpRateSource::new(server.url("/latest"), "RUB");
        let table = source.fetch().await.unwrap();

        mock.assert_async().await;
        assert_eq!(table.base, "RUB");
        assert_eq!(table.rate("USD").unwrap(), 0.0132);
        assert!(matches!(
            table.rate("ZZZ"),
            Err(FxError::UnknownCurrency(code)) if code == "ZZZ"
        ));
    }

    #[tokio::test]
    async fn fetch_rejects_http_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/latest");
                then.status(502);
            })
            .await;

        let source = HttpRateSource::new(server.url("/latest"), "RUB");
        assert!(matches!(source.fetch().await, Err(FxError::Fetch(_))));
    }
}
