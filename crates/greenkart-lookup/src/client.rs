//! HTTP client for the Open Food Facts product endpoint.
//!
//! One GET per call, no retry and no caching. [`OpenFoodFactsClient::lookup_product`]
//! is the entry point the rest of the application uses: it never fails and
//! reports "not found" and "call failed" the same way, as `None`.

use std::time::Duration;

use greenkart_core::{AppConfig, ProductRecord};
use reqwest::{Client, Url};

use crate::error::LookupError;
use crate::normalize::normalize_response;
use crate::types::OffProductResponse;

/// Client for the Open Food Facts product database.
///
/// Build one at startup and share it; [`reqwest::Client`] pools connections
/// internally and concurrent lookups need no coordination.
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    client: Client,
    base_url: Url,
}

impl OpenFoodFactsClient {
    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// See [`OpenFoodFactsClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, LookupError> {
        Self::with_base_url(
            &config.product_api_base_url,
            &config.user_agent,
            config.lookup_timeout_secs,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// `timeout_secs` of `None` keeps reqwest's default, which is no overall
    /// request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`LookupError::InvalidBaseUrl`] if `base_url` does not
    /// parse.
    pub fn with_base_url(
        base_url: &str,
        user_agent: &str,
        timeout_secs: Option<u64>,
    ) -> Result<Self, LookupError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| LookupError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Looks up a product by barcode.
    ///
    /// Returns `None` when the barcode is unknown upstream *and* when the
    /// request or response parsing fails; callers cannot tell the two apart.
    /// Failures are logged at `warn`.
    pub async fn lookup_product(&self, barcode: &str) -> Option<ProductRecord> {
        tracing::debug!(barcode = %barcode, "looking up product");

        match self.fetch_product(barcode).await {
            Ok(Some(record)) => {
                tracing::info!(barcode = %barcode, name = %record.name, "product found");
                Some(record)
            }
            Ok(None) => {
                tracing::info!(barcode = %barcode, "product not found");
                None
            }
            Err(e) => {
                tracing::warn!(barcode = %barcode, error = %e, "product lookup failed");
                None
            }
        }
    }

    /// Fetches and normalizes a product, keeping the failure cause.
    ///
    /// The HTTP status is not checked: upstream answers unknown barcodes
    /// with a JSON body that may carry a non-2xx status, so the body decides.
    ///
    /// # Errors
    ///
    /// - [`LookupError::Http`] on network failure or an unreadable body.
    /// - [`LookupError::Deserialize`] if the body is not the expected JSON.
    pub async fn fetch_product(&self, barcode: &str) -> Result<Option<ProductRecord>, LookupError> {
        let url = self.product_url(barcode);
        let response = self.client.get(url.as_str()).send().await?;
        let body = response.text().await?;

        let parsed: OffProductResponse =
            serde_json::from_str(&body).map_err(|e| LookupError::Deserialize {
                context: format!("product {barcode}"),
                source: e,
            })?;

        Ok(normalize_response(parsed))
    }

    /// Builds `{base}/api/v0/product/{barcode}.json`.
    ///
    /// The barcode is inserted as given; no format validation happens here.
    fn product_url(&self, barcode: &str) -> String {
        format!("{}api/v0/product/{barcode}.json", self.base_url)
    }
}
