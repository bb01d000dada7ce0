//! Thin PostgREST client: table selects and single-row inserts.

use greenkart_core::AppConfig;
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::BackendError;

/// Rows requested per page by [`SupabaseClient::select_all`]. Matches the
/// Supabase default for the server-side `max-rows` cap.
pub(crate) const PAGE_SIZE: usize = 1000;

/// Error body PostgREST returns alongside non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
struct PostgrestErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Client for a Supabase project's REST endpoint.
///
/// Construct once at startup from configuration and pass by reference to
/// the table functions in this crate.
#[derive(Clone)]
pub struct SupabaseClient {
    client: Client,
    rest_url: Url,
    anon_key: String,
}

impl std::fmt::Debug for SupabaseClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseClient")
            .field("rest_url", &self.rest_url.as_str())
            .field("anon_key", &"[redacted]")
            .finish_non_exhaustive()
    }
}

impl SupabaseClient {
    /// Creates a client for the project at `base_url`
    /// (e.g. `https://abc.supabase.co`).
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`BackendError::InvalidBaseUrl`] if `base_url` does not parse.
    pub fn new(base_url: &str, anon_key: &str, user_agent: &str) -> Result<Self, BackendError> {
        let client = Client::builder().user_agent(user_agent).build()?;

        let normalised = format!("{}/rest/v1/", base_url.trim_end_matches('/'));
        let rest_url = Url::parse(&normalised).map_err(|e| BackendError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            rest_url,
            anon_key: anon_key.to_owned(),
        })
    }

    /// Creates a client from application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Config`] naming the unset variable when the
    /// URL or key is missing, otherwise as [`SupabaseClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, BackendError> {
        let (url, key) = config.supabase_credentials()?;
        Self::new(url, key, &config.user_agent)
    }

    /// Selects rows from `table` filtered by PostgREST query pairs such as
    /// `("user_id", "eq.user-123")`.
    pub(crate) async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, BackendError> {
        let url = self.table_url(table, query);
        let response = self
            .authorized(self.client.get(url))
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        Self::read_rows(response, &format!("select from {table}")).await
    }

    /// Selects every matching row, paging with `limit`/`offset`.
    ///
    /// The server may cap a response below the requested `limit`, so paging
    /// stops only on an empty page rather than on a short one. `query`
    /// should carry an `order` so pages do not overlap.
    pub(crate) async fn select_all<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, &str)],
    ) -> Result<Vec<T>, BackendError> {
        let limit = PAGE_SIZE.to_string();
        let mut rows = Vec::new();

        loop {
            let offset = rows.len().to_string();
            let mut paged = query.to_vec();
            paged.push(("limit", limit.as_str()));
            paged.push(("offset", offset.as_str()));

            let page: Vec<T> = self.select(table, &paged).await?;
            if page.is_empty() {
                break;
            }
            tracing::debug!(
                table,
                fetched = page.len(),
                total = rows.len() + page.len(),
                "fetched page"
            );
            rows.extend(page);
        }

        Ok(rows)
    }

    /// Inserts one row and returns it as stored.
    pub(crate) async fn insert<B, T>(&self, table: &str, row: &B) -> Result<T, BackendError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.table_url(table, &[]);
        let response = self
            .authorized(self.client.post(url))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await?;

        let rows: Vec<T> = Self::read_rows(response, &format!("insert into {table}")).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| BackendError::EmptyResult {
                table: table.to_owned(),
            })
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
    }

    fn table_url(&self, table: &str, query: &[(&str, &str)]) -> Url {
        let mut url = self.rest_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(table);
        }
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        url
    }

    async fn read_rows<T: DeserializeOwned>(
        response: Response,
        context: &str,
    ) -> Result<Vec<T>, BackendError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let parsed: PostgrestErrorBody = serde_json::from_str(&body).unwrap_or_default();
            return Err(BackendError::Api {
                status: status.as_u16(),
                code: parsed.code.unwrap_or_default(),
                message: parsed.message.unwrap_or(body),
            });
        }

        serde_json::from_str(&body).map_err(|e| BackendError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> SupabaseClient {
        SupabaseClient::new(base_url, "anon", "greenkart-test/0.1")
            .expect("client construction should not fail")
    }

    #[test]
    fn table_url_appends_table_and_filters() {
        let client = test_client("https://abc.supabase.co/");
        let url = client.table_url("scans", &[("user_id", "eq.user-123"), ("select", "*")]);
        assert_eq!(
            url.as_str(),
            "https://abc.supabase.co/rest/v1/scans?user_id=eq.user-123&select=*"
        );
    }

    #[test]
    fn table_url_without_query_has_no_question_mark() {
        let client = test_client("https://abc.supabase.co");
        let url = client.table_url("rewards", &[]);
        assert_eq!(url.as_str(), "https://abc.supabase.co/rest/v1/rewards");
    }

    #[test]
    fn debug_output_redacts_key() {
        let client = SupabaseClient::new("https://abc.supabase.co", "secret-key", "ua").unwrap();
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("secret-key"));
    }

    #[test]
    fn from_config_names_missing_variable() {
        let config = AppConfig {
            env: greenkart_core::Environment::Test,
            log_level: "info".to_string(),
            product_api_base_url: "https://world.openfoodfacts.org".to_string(),
            user_agent: "ua".to_string(),
            lookup_timeout_secs: None,
            supabase_url: Some("https://abc.supabase.co".to_string()),
            supabase_anon_key: None,
            rewards_path: std::path::PathBuf::from("./config/rewards.yaml"),
        };
        let result = SupabaseClient::from_config(&config);
        assert!(matches!(
            result,
            Err(BackendError::Config(greenkart_core::ConfigError::MissingEnvVar(ref v)))
                if v == "SUPABASE_ANON_KEY"
        ));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = SupabaseClient::new("::nope::", "anon", "ua");
        assert!(matches!(result, Err(BackendError::InvalidBaseUrl { .. })));
    }
}
