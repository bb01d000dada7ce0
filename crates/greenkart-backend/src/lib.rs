//! Persistence for profiles, scan history, and reward redemptions, backed by
//! a Supabase (PostgREST) project.
//!
//! Operations are plain inserts and selects. Nothing here is transactional:
//! a redemption is recorded without atomically debiting a balance.

pub mod client;
pub mod error;
pub mod ledger;
pub mod profiles;
pub mod rewards;
pub mod scans;

pub use client::SupabaseClient;
pub use error::BackendError;
pub use ledger::{check_redemption, CoinLedger};
pub use profiles::{create_or_get_profile, get_profile, NewProfile, Profile};
pub use rewards::{list_redemptions, list_rewards, redeem_reward, Redemption};
pub use scans::{list_scans, record_scan, ScanEvent};
