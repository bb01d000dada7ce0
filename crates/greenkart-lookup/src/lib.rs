//! Barcode lookups against the Open Food Facts product database.

pub mod client;
pub mod error;
pub mod normalize;
pub mod types;

pub use client::OpenFoodFactsClient;
pub use error::LookupError;
pub use normalize::normalize_response;
pub use types::{OffProduct, OffProductResponse};
