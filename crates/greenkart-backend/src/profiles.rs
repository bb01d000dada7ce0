//! Operations on the `profiles` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::SupabaseClient;
use crate::error::BackendError;

const TABLE: &str = "profiles";

/// A row from the `profiles` table. `id` is the auth user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Optional fields supplied when a profile is first created.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Serialize)]
struct ProfileInsert<'a> {
    id: &'a str,
    #[serde(flatten)]
    props: &'a NewProfile,
}

/// Fetches a profile by user id.
///
/// # Errors
///
/// Returns [`BackendError`] if the request fails or the response is malformed.
pub async fn get_profile(
    client: &SupabaseClient,
    user_id: &str,
) -> Result<Option<Profile>, BackendError> {
    let filter = format!("eq.{user_id}");
    let rows: Vec<Profile> = client
        .select(TABLE, &[("id", filter.as_str()), ("select", "*")])
        .await?;
    Ok(rows.into_iter().next())
}

/// Returns the existing profile for `user_id`, creating it from `props`
/// when none exists. `props` are ignored for an existing profile.
///
/// # Errors
///
/// Returns [`BackendError`] if either the select or the insert fails.
pub async fn create_or_get_profile(
    client: &SupabaseClient,
    user_id: &str,
    props: &NewProfile,
) -> Result<Profile, BackendError> {
    if let Some(existing) = get_profile(client, user_id).await? {
        tracing::debug!(user_id = %user_id, "existing profile retrieved");
        return Ok(existing);
    }

    tracing::info!(user_id = %user_id, "profile not found, creating");
    let row = ProfileInsert { id: user_id, props };
    client.insert(TABLE, &[row]).await
}
