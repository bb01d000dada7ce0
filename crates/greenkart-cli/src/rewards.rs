//! Reward catalog browsing and redemption.

use anyhow::Context;
use clap::Subcommand;
use greenkart_backend::{CoinLedger, SupabaseClient};
use greenkart_core::{shortfall, AppConfig, RewardItem};

use crate::DEFAULT_USER_ID;

#[derive(Debug, Subcommand)]
pub enum RewardsCommands {
    /// List rewards, marking which ones a balance can afford
    List {
        /// Balance to compare costs against
        #[arg(long)]
        balance: Option<u32>,

        /// Read rewards from the backend instead of the local catalog
        #[arg(long)]
        remote: bool,
    },
    /// Redeem a reward if the user's balance covers it
    Redeem {
        reward_id: String,

        #[arg(long, default_value = DEFAULT_USER_ID)]
        user: String,
    },
}

pub(crate) async fn run_rewards(config: &AppConfig, command: RewardsCommands) -> anyhow::Result<()> {
    match command {
        RewardsCommands::List { balance, remote } => {
            let rewards = if remote {
                let backend = SupabaseClient::from_config(config)?;
                greenkart_backend::list_rewards(&backend).await?
            } else {
                greenkart_core::load_reward_catalog(&config.rewards_path)?.rewards
            };
            for line in format_reward_list(&rewards, balance) {
                println!("{line}");
            }
            Ok(())
        }
        RewardsCommands::Redeem { reward_id, user } => {
            run_redeem(config, &reward_id, &user).await
        }
    }
}

pub(crate) fn format_reward_list(rewards: &[RewardItem], balance: Option<u32>) -> Vec<String> {
    if rewards.is_empty() {
        return vec!["no rewards available".to_string()];
    }

    rewards
        .iter()
        .map(|r| {
            let status = match balance.map(|b| shortfall(b, r.cost)) {
                None => String::new(),
                Some(None) => "  [available]".to_string(),
                Some(Some(needed)) => format!("  [need {needed} more]"),
            };
            format!("{:<4}{:<28}{:>5} EcoCoins{status}", r.id, r.name, r.cost)
        })
        .collect()
}

/// Checks the user's balance against the catalog cost, then records the
/// redemption. The check and the insert are separate requests.
async fn run_redeem(config: &AppConfig, reward_id: &str, user: &str) -> anyhow::Result<()> {
    let backend = SupabaseClient::from_config(config)?;
    let catalog = greenkart_core::load_reward_catalog(&config.rewards_path)?;

    let scans = greenkart_backend::list_scans(&backend, user, None).await?;
    let redemptions = greenkart_backend::list_redemptions(&backend, user).await?;
    let ledger = CoinLedger::new(&scans, &redemptions, &catalog);

    let item = greenkart_backend::check_redemption(&ledger, &catalog, reward_id)?;
    greenkart_backend::redeem_reward(&backend, user, reward_id)
        .await
        .with_context(|| format!("failed to redeem reward {reward_id} for {user}"))?;

    println!(
        "Redeemed \"{}\" for {} EcoCoins; remaining balance {}",
        item.name,
        item.cost,
        ledger.balance().saturating_sub(item.cost)
    );
    Ok(())
}
