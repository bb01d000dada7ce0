//! Operations on the `rewards` and `redemptions` tables.

use chrono::{DateTime, Utc};
use greenkart_core::{string_or_number, RewardItem};
use serde::{Deserialize, Serialize};

use crate::client::SupabaseClient;
use crate::error::BackendError;

const REWARDS_TABLE: &str = "rewards";
const REDEMPTIONS_TABLE: &str = "redemptions";

/// A row from the `redemptions` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redemption {
    pub user_id: String,
    #[serde(deserialize_with = "string_or_number")]
    pub reward_id: String,
    pub redeemed_at: DateTime<Utc>,
}

/// Lists every reward in the backend's `rewards` table.
///
/// # Errors
///
/// Returns [`BackendError`] if the request fails or the response is malformed.
pub async fn list_rewards(client: &SupabaseClient) -> Result<Vec<RewardItem>, BackendError> {
    client.select(REWARDS_TABLE, &[("select", "*")]).await
}

/// Records that `user_id` redeemed `reward_id`.
///
/// Only the redemption row is written. No balance is checked or debited
/// here; see [`crate::check_redemption`] for the advisory check.
///
/// # Errors
///
/// Returns [`BackendError`] if the insert fails.
pub async fn redeem_reward(
    client: &SupabaseClient,
    user_id: &str,
    reward_id: &str,
) -> Result<Redemption, BackendError> {
    let row = Redemption {
        user_id: user_id.to_owned(),
        reward_id: reward_id.to_owned(),
        redeemed_at: Utc::now(),
    };

    let stored: Redemption = client.insert(REDEMPTIONS_TABLE, &[row]).await?;
    tracing::info!(user_id = %user_id, reward_id = %reward_id, "reward redemption recorded");
    Ok(stored)
}

/// Lists all of a user's redemptions, newest first, across every page.
///
/// # Errors
///
/// Returns [`BackendError`] if the request fails or the response is malformed.
pub async fn list_redemptions(
    client: &SupabaseClient,
    user_id: &str,
) -> Result<Vec<Redemption>, BackendError> {
    let filter = format!("eq.{user_id}");
    client
        .select_all(
            REDEMPTIONS_TABLE,
            &[
                ("user_id", filter.as_str()),
                ("select", "*"),
                ("order", "redeemed_at.desc"),
            ],
        )
        .await
}
