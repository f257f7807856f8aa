pub mod types;

use std::time::Duration;

use reqwest::Client;

use crate::error::SourceError;
use crate::http::{endpoint, fetch_json, http_client};
use crate::traits::MarketDataSource;
use types::{CmcListing, CmcListingsEnvelope, ListingSort};

pub const DEFAULT_CMC_API_URL: &str = "https://pro-api.coinmarketcap.com";
pub const API_KEY_HEADER: &str = "X-CMC_PRO_API_KEY";
pub const DEFAULT_LISTING_LIMIT: u32 = 500;

pub struct CmcClient {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl CmcClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, SourceError> {
        Ok(Self {
            http_client: http_client(timeout)?,
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl MarketDataSource for CmcClient {
    async fn get_listings(
        &self,
        sort: ListingSort,
        limit: u32,
    ) -> Result<Vec<CmcListing>, SourceError> {
        let mut url = endpoint(
            &self.base_url,
            &["v1", "cryptocurrency", "listings", "latest"],
        )?;
        url.query_pairs_mut()
            .append_pair("sort", &sort.to_string())
            .append_pair("limit", &limit.to_string());

        let request = self
            .http_client
            .get(url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "application/json");
        let envelope: CmcListingsEnvelope = fetch_json(request, &url).await?;

        if let Some(status) = envelope.status.as_ref().filter(|s| s.error_code.unwrap_or(0) != 0) {
            tracing::warn!(
                error_code = ?status.error_code,
                error_message = ?status.error_message,
                "CoinMarketCap reported an error status"
            );
        }

        Ok(envelope.data)
    }
}
