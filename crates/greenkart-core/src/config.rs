use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

const DEFAULT_PRODUCT_API_BASE_URL: &str = "https://world.openfoodfacts.org";
const DEFAULT_USER_AGENT: &str = "greenkart/0.1 (eco-scanner)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Blank values count as unset so an empty line in `.env` does not
    // produce a half-configured client.
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let parse_optional_u64 = |var: &str| -> Result<Option<u64>, ConfigError> {
        optional(var)
            .map(|raw| {
                raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                    var: var.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    };

    let env = parse_environment(&or_default("GREENKART_ENV", "development"));
    let log_level = or_default("GREENKART_LOG_LEVEL", "info");

    let product_api_base_url =
        or_default("GREENKART_PRODUCT_API_BASE_URL", DEFAULT_PRODUCT_API_BASE_URL);
    if !product_api_base_url.starts_with("http://") && !product_api_base_url.starts_with("https://")
    {
        return Err(ConfigError::InvalidEnvVar {
            var: "GREENKART_PRODUCT_API_BASE_URL".to_string(),
            reason: format!("'{product_api_base_url}' is not an http(s) URL"),
        });
    }

    let user_agent = or_default("GREENKART_USER_AGENT", DEFAULT_USER_AGENT);
    let lookup_timeout_secs = parse_optional_u64("GREENKART_LOOKUP_TIMEOUT_SECS")?;
    if lookup_timeout_secs == Some(0) {
        return Err(ConfigError::InvalidEnvVar {
            var: "GREENKART_LOOKUP_TIMEOUT_SECS".to_string(),
            reason: "timeout must be greater than zero".to_string(),
        });
    }

    let supabase_url = optional("SUPABASE_URL");
    let supabase_anon_key = optional("SUPABASE_ANON_KEY");
    let rewards_path = PathBuf::from(or_default(
        "GREENKART_REWARDS_PATH",
        "./config/rewards.yaml",
    ));

    Ok(AppConfig {
        env,
        log_level,
        product_api_base_url,
        user_agent,
        lookup_timeout_secs,
        supabase_url,
        supabase_anon_key,
        rewards_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
