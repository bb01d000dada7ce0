//! Coin balance derived from scan and redemption history.

use greenkart_core::{shortfall, RewardCatalog, RewardItem};

use crate::error::BackendError;
use crate::rewards::Redemption;
use crate::scans::ScanEvent;

/// A user's coin totals, computed on demand. Nothing here is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoinLedger {
    pub scans: usize,
    pub coins_earned: u32,
    pub coins_spent: u32,
}

impl CoinLedger {
    /// Totals coins earned by `scans` and coins spent on `redemptions`,
    /// priced from `catalog`. Redemptions of rewards missing from the
    /// catalog are counted as free and logged.
    #[must_use]
    pub fn new(scans: &[ScanEvent], redemptions: &[Redemption], catalog: &RewardCatalog) -> Self {
        let coins_earned = scans
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(s.coins_awarded));

        let coins_spent = redemptions.iter().fold(0u32, |acc, r| {
            if let Some(item) = catalog.find(&r.reward_id) {
                acc.saturating_add(item.cost)
            } else {
                tracing::warn!(
                    reward_id = %r.reward_id,
                    "redemption for reward missing from catalog"
                );
                acc
            }
        });

        Self {
            scans: scans.len(),
            coins_earned,
            coins_spent,
        }
    }

    /// Coins available to spend, floored at zero.
    #[must_use]
    pub fn balance(&self) -> u32 {
        self.coins_earned.saturating_sub(self.coins_spent)
    }
}

/// Checks that `reward_id` exists and that the ledger can afford it.
///
/// This is advisory: the balance can change between this check and the
/// redemption insert.
///
/// # Errors
///
/// - [`BackendError::UnknownReward`] if the catalog has no such reward.
/// - [`BackendError::InsufficientCoins`] if the balance is below the cost.
pub fn check_redemption<'a>(
    ledger: &CoinLedger,
    catalog: &'a RewardCatalog,
    reward_id: &str,
) -> Result<&'a RewardItem, BackendError> {
    let item = catalog
        .find(reward_id)
        .ok_or_else(|| BackendError::UnknownReward(reward_id.to_owned()))?;

    let balance = ledger.balance();
    if let Some(needed) = shortfall(balance, item.cost) {
        return Err(BackendError::InsufficientCoins { needed, balance });
    }

    Ok(item)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn catalog() -> RewardCatalog {
        RewardCatalog {
            rewards: vec![
                RewardItem {
                    id: "1".to_string(),
                    name: "10% Off Next Purchase".to_string(),
                    cost: 100,
                    description: None,
                },
                RewardItem {
                    id: "2".to_string(),
                    name: "Free Eco-Bag".to_string(),
                    cost: 200,
                    description: None,
                },
            ],
        }
    }

    fn scan(coins: u32) -> ScanEvent {
        ScanEvent {
            user_id: "user-123".to_string(),
            barcode: "123".to_string(),
            coins_awarded: coins,
            scanned_at: Utc.with_ymd_and_hms(2025, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    fn redemption(reward_id: &str) -> Redemption {
        Redemption {
            user_id: "user-123".to_string(),
            reward_id: reward_id.to_string(),
            redeemed_at: Utc.with_ymd_and_hms(2025, 5, 2, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn ledger_sums_earned_and_spent() {
        let scans = vec![scan(50), scan(30), scan(10), scan(0)];
        let ledger = CoinLedger::new(&scans, &[redemption("1")], &catalog());
        assert_eq!(ledger.scans, 4);
        assert_eq!(ledger.coins_earned, 90);
        assert_eq!(ledger.coins_spent, 100);
        assert_eq!(ledger.balance(), 0);
    }

    #[test]
    fn unknown_redemptions_cost_nothing() {
        let ledger = CoinLedger::new(&[scan(50)], &[redemption("99")], &catalog());
        assert_eq!(ledger.coins_spent, 0);
        assert_eq!(ledger.balance(), 50);
    }

    #[test]
    fn check_redemption_accepts_affordable_reward() {
        let scans: Vec<ScanEvent> = (0..4).map(|_| scan(50)).collect();
        let catalog = catalog();
        let ledger = CoinLedger::new(&scans, &[], &catalog);
        let item = check_redemption(&ledger, &catalog, "2").expect("affordable");
        assert_eq!(item.name, "Free Eco-Bag");
    }

    #[test]
    fn check_redemption_reports_shortfall() {
        let catalog = catalog();
        let ledger = CoinLedger::new(&[scan(30)], &[], &catalog);
        let result = check_redemption(&ledger, &catalog, "1");
        assert!(matches!(
            result,
            Err(BackendError::InsufficientCoins {
                needed: 70,
                balance: 30
            })
        ));
    }

    #[test]
    fn check_redemption_rejects_unknown_reward() {
        let catalog = catalog();
        let ledger = CoinLedger::default();
        let result = check_redemption(&ledger, &catalog, "nope");
        assert!(matches!(result, Err(BackendError::UnknownReward(ref id)) if id == "nope"));
    }
}
