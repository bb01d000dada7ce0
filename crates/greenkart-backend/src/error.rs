use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("backend error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// An insert that should return the new row returned nothing.
    #[error("insert into {table} returned no rows")]
    EmptyResult { table: String },

    #[error("backend is not configured: {0}")]
    Config(#[from] greenkart_core::ConfigError),

    #[error("invalid backend URL '{base_url}': {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("unknown reward: {0}")]
    UnknownReward(String),

    #[error("not enough coins: need {needed} more (balance {balance})")]
    InsufficientCoins { needed: u32, balance: u32 },
}
