//! Open Food Facts v0 product response types.
//!
//! Only the fields greenkart reads are modelled; everything else in the
//! payload is ignored by serde.

use serde::Deserialize;

/// Top-level envelope of `GET /api/v0/product/{barcode}.json`.
///
/// `status` is `1` when the barcode is known and `0` otherwise. A missing
/// `status` is treated as `0`.
#[derive(Debug, Deserialize)]
pub struct OffProductResponse {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub status_verbose: Option<String>,
    #[serde(default)]
    pub product: Option<OffProduct>,
}

impl OffProductResponse {
    /// Returns the product payload only when upstream reports it as found.
    #[must_use]
    pub fn into_found_product(self) -> Option<OffProduct> {
        if self.status == 1 {
            self.product
        } else {
            None
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct OffProduct {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub brands: Option<String>,
    #[serde(default)]
    pub image_front_url: Option<String>,
    #[serde(default)]
    pub categories: Option<String>,
    /// Raw grade letter, `"a"` through `"e"`, or values like `"unknown"`.
    #[serde(default)]
    pub ecoscore_grade: Option<String>,
}
