//! Coin rewards: the per-scan award rule and the redeemable catalog.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::ConfigError;

/// Display grades that earn coins. Every other grade earns nothing.
pub const REWARD_TIERS: [(&str, u32); 3] = [("A+", 50), ("A", 30), ("B", 10)];

/// Coins awarded for scanning a product with the given display grade.
///
/// Input is trimmed and uppercased before matching, so `" a+ "` earns the
/// same as `"A+"`. Absent, empty, and unrecognised grades all yield `0`.
#[must_use]
pub fn resolve_reward(eco_score: Option<&str>) -> u32 {
    let Some(score) = eco_score else {
        return 0;
    };
    let normalized = score.trim().to_uppercase();
    REWARD_TIERS
        .iter()
        .find(|(grade, _)| *grade == normalized)
        .map_or(0, |(_, coins)| *coins)
}

/// Coins still needed to afford `cost`, or `None` if `balance` covers it.
#[must_use]
pub fn shortfall(balance: u32, cost: u32) -> Option<u32> {
    (balance < cost).then(|| cost - balance)
}

/// A reward a user can spend coins on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardItem {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    pub cost: u32,
    #[serde(default)]
    pub description: Option<String>,
}

/// Accepts an identifier written either as a string or as an integer.
///
/// Catalog files quote ids while backend tables commonly use integer keys.
///
/// # Errors
///
/// Fails when the value is neither a string nor an integer.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewardCatalog {
    pub rewards: Vec<RewardItem>,
}

impl RewardCatalog {
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&RewardItem> {
        self.rewards.iter().find(|r| r.id == id)
    }
}

/// Load and validate the reward catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_reward_catalog(path: &Path) -> Result<RewardCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::RewardsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: RewardCatalog = serde_yaml::from_str(&content)?;
    validate_catalog(&catalog)?;

    Ok(catalog)
}

fn validate_catalog(catalog: &RewardCatalog) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for reward in &catalog.rewards {
        if reward.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "reward id must be non-empty".to_string(),
            ));
        }

        if reward.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "reward '{}' must have a non-empty name",
                reward.id
            )));
        }

        if reward.cost == 0 {
            return Err(ConfigError::Validation(format!(
                "reward '{}' has cost 0; cost must be positive",
                reward.id
            )));
        }

        if !seen_ids.insert(reward.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate reward id: '{}'",
                reward.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "rewards_test.rs"]
mod tests;
