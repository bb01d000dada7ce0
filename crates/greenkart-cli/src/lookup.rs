//! Product lookup, award preview, and scan recording.

use anyhow::Context;
use greenkart_core::{resolve_reward, AppConfig, ProductRecord};
use greenkart_lookup::OpenFoodFactsClient;

/// Prints a product the way the product screen lays it out.
pub(crate) fn format_product(barcode: &str, product: &ProductRecord) -> String {
    let mut lines = vec![product.name.clone()];
    if let Some(brand) = &product.brand {
        lines.push(format!("  Brand:      {brand}"));
    }
    if let Some(categories) = &product.categories {
        lines.push(format!("  Categories: {categories}"));
    }
    if let Some(score) = &product.eco_score {
        lines.push(format!("  Eco-Score:  {score}"));
    }
    if let Some(image) = &product.image_url {
        lines.push(format!("  Image:      {image}"));
    }
    lines.push(format!("  Barcode:    {barcode}"));
    lines.join("\n")
}

/// Looks up every barcode concurrently and prints the results in argument
/// order.
///
/// # Errors
///
/// Returns an error if the lookup client cannot be built. Individual lookups
/// never fail; a missing or failed lookup prints "product not found".
pub(crate) async fn run_lookup(
    config: &AppConfig,
    barcodes: &[String],
    json: bool,
) -> anyhow::Result<()> {
    let client = OpenFoodFactsClient::from_config(config)?;

    let lookups = barcodes.iter().map(|b| client.lookup_product(b));
    let results = futures::future::join_all(lookups).await;

    for (barcode, result) in barcodes.iter().zip(results) {
        match (result, json) {
            (Some(product), true) => println!("{}", serde_json::to_string(&product)?),
            (Some(product), false) => println!("{}", format_product(barcode, &product)),
            (None, true) => println!("null"),
            (None, false) => println!("{barcode}: product not found"),
        }
    }

    Ok(())
}

pub(crate) fn award_message(grade: Option<&str>) -> String {
    let coins = resolve_reward(grade);
    format!("{} EcoCoins for grade {}", coins, grade.unwrap_or("(none)"))
}

/// Looks up `barcode`, resolves the award, and records the scan for `user`.
///
/// # Errors
///
/// Returns an error if the product cannot be found, the backend is not
/// configured, or the scan cannot be recorded. A failed record is not
/// retried or queued.
pub(crate) async fn run_scan(
    config: &AppConfig,
    barcode: &str,
    user: &str,
    dry_run: bool,
) -> anyhow::Result<()> {
    let client = OpenFoodFactsClient::from_config(config)?;
    let product = client
        .lookup_product(barcode)
        .await
        .ok_or_else(|| anyhow::anyhow!("could not find product details for barcode {barcode}"))?;

    println!("{}", format_product(barcode, &product));

    let coins = resolve_reward(product.eco_score.as_deref());
    println!("You earned {coins} EcoCoins for scanning {}!", product.name);

    if dry_run {
        println!("dry-run: scan not recorded");
        return Ok(());
    }

    let backend = greenkart_backend::SupabaseClient::from_config(config)?;
    greenkart_backend::record_scan(&backend, user, barcode, coins)
        .await
        .with_context(|| format!("failed to record scan of {barcode} for {user}"))?;
    println!("scan recorded for {user}");

    Ok(())
}
