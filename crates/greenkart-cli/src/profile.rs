//! Profile and scan-history commands.

use greenkart_backend::{CoinLedger, NewProfile, SupabaseClient};
use greenkart_core::AppConfig;

/// # Errors
///
/// Returns an error if the backend is unreachable, not configured, or the
/// reward catalog cannot be loaded.
pub(crate) async fn run_profile(
    config: &AppConfig,
    user: &str,
    username: Option<String>,
    email: Option<String>,
) -> anyhow::Result<()> {
    let backend = SupabaseClient::from_config(config)?;
    let catalog = greenkart_core::load_reward_catalog(&config.rewards_path)?;

    let props = NewProfile { username, email };
    let profile = greenkart_backend::create_or_get_profile(&backend, user, &props).await?;
    let scans = greenkart_backend::list_scans(&backend, user, None).await?;
    let redemptions = greenkart_backend::list_redemptions(&backend, user).await?;
    let ledger = CoinLedger::new(&scans, &redemptions, &catalog);

    println!("{}", profile.username.as_deref().unwrap_or(&profile.id));
    if let Some(email) = &profile.email {
        println!("{email}");
    }
    println!("EcoCoins:         {}", ledger.balance());
    println!("Products scanned: {}", ledger.scans);
    println!("Coins earned:     {}", ledger.coins_earned);
    println!("Coins spent:      {}", ledger.coins_spent);

    Ok(())
}

/// # Errors
///
/// Returns an error if the backend is unreachable or not configured.
pub(crate) async fn run_history(config: &AppConfig, user: &str, limit: u32) -> anyhow::Result<()> {
    let backend = SupabaseClient::from_config(config)?;
    let scans = greenkart_backend::list_scans(&backend, user, Some(limit)).await?;

    if scans.is_empty() {
        println!("no scans recorded for {user}");
        return Ok(());
    }

    println!("{:<22}{:<16}COINS", "SCANNED AT", "BARCODE");
    for scan in &scans {
        println!(
            "{:<22}{:<16}{}",
            scan.scanned_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            scan.barcode,
            scan.coins_awarded
        );
    }

    Ok(())
}
