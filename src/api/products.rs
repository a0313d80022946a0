//! Client for the static product catalog endpoint.
//!
//! Every call issues exactly one GET: no retry, no timeout, no cache.
//! Failures are normalized into [`FetchError`] and logged before they are
//! returned.

use reqwest::Client;
use tracing::{debug, error};

use crate::error::FetchError;
use crate::product::Product;

const LOG_TARGET: &str = "product_list_tui::api";

#[derive(Clone)]
pub struct ProductClient {
    client: Client,
    url: String,
}

impl ProductClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the full product list.
    ///
    /// Nothing is sent until the returned future is polled, and dropping it
    /// abandons the request.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        let result = self.request().await;

        if let Err(err) = &result {
            error!(target: LOG_TARGET, url = %self.url, "{}", err);
        }

        result
    }

    async fn request(&self) -> Result<Vec<Product>, FetchError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(FetchError::transport)?;

        let status = response.status();
        let body = response.text().await.map_err(FetchError::transport)?;

        if !status.is_success() {
            return Err(FetchError::from_response(status, &body, &self.url));
        }

        debug!(target: LOG_TARGET, "All: {}", body);

        serde_json::from_str(&body).map_err(|_| FetchError::undecodable(status, &self.url))
    }
}
