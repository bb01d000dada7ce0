//! Operations on the `scans` table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::client::SupabaseClient;
use crate::error::BackendError;

const TABLE: &str = "scans";

/// A recorded scan and the coins it earned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEvent {
    pub user_id: String,
    pub barcode: String,
    pub coins_awarded: u32,
    pub scanned_at: DateTime<Utc>,
}

/// Records a scan, stamped with the current UTC time.
///
/// `coins` is whatever the reward rule produced; it is stored as given.
///
/// # Errors
///
/// Returns [`BackendError`] if the insert fails. The scan is not queued for
/// a later attempt.
pub async fn record_scan(
    client: &SupabaseClient,
    user_id: &str,
    barcode: &str,
    coins: u32,
) -> Result<ScanEvent, BackendError> {
    let row = ScanEvent {
        user_id: user_id.to_owned(),
        barcode: barcode.to_owned(),
        coins_awarded: coins,
        scanned_at: Utc::now(),
    };

    let stored: ScanEvent = client.insert(TABLE, &[row]).await?;
    tracing::info!(
        user_id = %user_id,
        barcode = %barcode,
        coins,
        "scan recorded"
    );
    Ok(stored)
}

/// Lists a user's scans, newest first. `limit` of `None` pages through
/// every row, so totals computed from the result are complete.
///
/// # Errors
///
/// Returns [`BackendError`] if the request fails or the response is malformed.
pub async fn list_scans(
    client: &SupabaseClient,
    user_id: &str,
    limit: Option<u32>,
) -> Result<Vec<ScanEvent>, BackendError> {
    let filter = format!("eq.{user_id}");
    let query = [
        ("user_id", filter.as_str()),
        ("select", "*"),
        ("order", "scanned_at.desc"),
    ];

    match limit {
        Some(l) => {
            let l = l.to_string();
            let mut limited = query.to_vec();
            limited.push(("limit", l.as_str()));
            client.select(TABLE, &limited).await
        }
        None => client.select_all(TABLE, &query).await,
    }
}
