use crate::config::ProviderConfig;
use crate::fetcher::traits::PriceFetcher;
use crate::model::{FetchError, PriceRow};
use crate::normalizer::{normalize_all, RawPrice};
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info};

/// One page of the `/prices` endpoint.
#[derive(Debug, Deserialize)]
pub struct PricesPage {
    #[serde(default)]
    pub data: Vec<RawPrice>,
    #[serde(default = "first_page")]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

pub struct IntrinioClient {
    client: Client,
    api_key: String,
    base_url: String,
    frequency: String,
    page_size: u32,
    request_timeout: Duration,
}

impl IntrinioClient {
    pub fn new(cfg: &ProviderConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("dual-momentum/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(cfg.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key: cfg.api_key.clone(),
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            frequency: cfg.frequency.clone(),
            page_size: cfg.page_size,
            request_timeout: Duration::from_secs(cfg.timeout_seconds),
        })
    }

    fn build_url(&self) -> String {
        format!("{}/prices", self.base_url)
    }

    async fn fetch_page(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
        page_number: u32,
    ) -> Result<PricesPage, FetchError> {
        let query = [
            ("identifier", ticker.to_string()),
            ("start_date", start.to_string()),
            ("end_date", end.to_string()),
            ("frequency", self.frequency.clone()),
            ("page_size", self.page_size.to_string()),
            ("page_number", page_number.to_string()),
        ];

        // Bounds the whole exchange, body included
        let request = async {
            let response = self
                .client
                .get(self.build_url())
                .bearer_auth(&self.api_key)
                .query(&query)
                .send()
                .await
                .map_err(request_error)?;

            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status(status));
            }

            response.text().await.map_err(request_error)
        };

        let body = match timeout(self.request_timeout, request).await {
            Ok(result) => result?,
            Err(_) => return Err(FetchError::Timeout),
        };
        parse_page(&body)
    }
}

fn request_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Http(e)
    }
}

pub fn parse_page(body: &str) -> Result<PricesPage, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::InvalidResponse(e.to_string()))
}

#[async_trait::async_trait]
impl PriceFetcher for IntrinioClient {
    async fn fetch_prices(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PriceRow>, FetchError> {
        let mut rows = Vec::new();
        let mut page_number = 1;

        loop {
            let page = self.fetch_page(ticker, start, end, page_number).await?;
            debug!(
                "{}: page {}/{} with {} items",
                ticker,
                page_number,
                page.total_pages,
                page.data.len()
            );
            rows.extend(normalize_all(ticker, &page.data));

            if page_number >= page.total_pages {
                break;
            }
            page_number += 1;
        }

        info!("{}: fetched {} prices ({} .. {})", ticker, rows.len(), start, end);
        Ok(rows)
    }
}
