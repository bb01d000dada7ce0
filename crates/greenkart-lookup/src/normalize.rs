//! Conversion of Open Food Facts payloads into [`ProductRecord`]s.

use greenkart_core::{remap_grade, ProductRecord, UNKNOWN_PRODUCT_NAME};

use crate::types::{OffProduct, OffProductResponse};

/// Normalizes a full response envelope.
///
/// Returns `None` when `status != 1` or the product payload is missing,
/// regardless of any other field present.
#[must_use]
pub fn normalize_response(response: OffProductResponse) -> Option<ProductRecord> {
    response.into_found_product().map(normalize_product)
}

/// Converts a found product into a [`ProductRecord`].
///
/// A blank name becomes [`UNKNOWN_PRODUCT_NAME`]. Brand, image URL and
/// categories are copied verbatim. The eco-score letter is remapped to its
/// display grade; an empty grade counts as absent.
#[must_use]
pub fn normalize_product(product: OffProduct) -> ProductRecord {
    let name = product
        .product_name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_PRODUCT_NAME.to_string());

    let eco_score = product
        .ecoscore_grade
        .filter(|g| !g.is_empty())
        .map(|g| remap_grade(&g));

    ProductRecord {
        name,
        brand: product.brands,
        image_url: product.image_front_url,
        categories: product.categories,
        eco_score,
    }
}
