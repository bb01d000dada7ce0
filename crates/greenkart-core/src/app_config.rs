use std::path::PathBuf;

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide settings, read once at startup and handed to client
/// constructors.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Host of the product database, without the `/api/v0/...` path.
    pub product_api_base_url: String,
    pub user_agent: String,
    /// `None` leaves the transport's default in place.
    pub lookup_timeout_secs: Option<u64>,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub rewards_path: PathBuf,
}

impl AppConfig {
    /// Returns the backend URL and anon key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] naming the first unset variable.
    pub fn supabase_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let url = self
            .supabase_url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("SUPABASE_URL".to_string()))?;
        let key = self
            .supabase_anon_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("SUPABASE_ANON_KEY".to_string()))?;
        Ok((url, key))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("product_api_base_url", &self.product_api_base_url)
            .field("user_agent", &self.user_agent)
            .field("lookup_timeout_secs", &self.lookup_timeout_secs)
            .field("supabase_url", &self.supabase_url)
            .field(
                "supabase_anon_key",
                &self.supabase_anon_key.as_ref().map(|_| "[redacted]"),
            )
            .field("rewards_path", &self.rewards_path)
            .finish()
    }
}
