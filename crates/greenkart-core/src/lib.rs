//! Domain types, reward rules, and configuration shared by every greenkart crate.

pub mod app_config;
pub mod config;
pub mod products;
pub mod rewards;

use thiserror::Error;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use products::{remap_grade, ProductRecord, UNKNOWN_PRODUCT_NAME};
pub use rewards::{
    load_reward_catalog, resolve_reward, shortfall, string_or_number, RewardCatalog, RewardItem,
    REWARD_TIERS,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read rewards file {path}: {source}")]
    RewardsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse rewards file: {0}")]
    RewardsFileParse(#[from] serde_yaml::Error),

    #[error("rewards validation error: {0}")]
    Validation(String),
}
