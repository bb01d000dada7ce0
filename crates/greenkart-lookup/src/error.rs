use thiserror::Error;

/// Errors raised while talking to the product database.
///
/// Only [`crate::OpenFoodFactsClient::fetch_product`] surfaces these;
/// [`crate::OpenFoodFactsClient::lookup_product`] folds every variant into
/// "no record".
#[derive(Debug, Error)]
pub enum LookupError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected JSON shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid product API base URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}
