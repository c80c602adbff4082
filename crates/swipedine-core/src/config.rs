use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment, ProviderKind};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup, no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let google_api_key = require("GOOGLE_MAPS_API_KEY")?;

    let env = parse_environment(&or_default("SWIPEDINE_ENV", "development"));
    let log_level = or_default("SWIPEDINE_LOG_LEVEL", "info");
    let places_api = parse_provider_kind(&or_default("SWIPEDINE_PLACES_API", "modern"))?;

    let request_timeout_secs = parse_u64("SWIPEDINE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SWIPEDINE_USER_AGENT", "swipedine/0.1 (restaurant-discovery)");
    let max_search_pages = parse_usize("SWIPEDINE_MAX_SEARCH_PAGES", "5")?;
    let inter_page_delay_ms = parse_u64("SWIPEDINE_INTER_PAGE_DELAY_MS", "2000")?;
    let decisions_path = PathBuf::from(or_default("SWIPEDINE_DECISIONS_PATH", "./decisions.json"));

    Ok(AppConfig {
        env,
        log_level,
        google_api_key,
        places_api,
        request_timeout_secs,
        user_agent,
        max_search_pages,
        inter_page_delay_ms,
        decisions_path,
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

/// Parse a string into a `ProviderKind`.
///
/// Unlike environment parsing this rejects unknown values: silently searching
/// a different backend than the operator asked for would be worse than
/// refusing to start.
fn parse_provider_kind(s: &str) -> Result<ProviderKind, ConfigError> {
    match s {
        "legacy" => Ok(ProviderKind::Legacy),
        "modern" => Ok(ProviderKind::Modern),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SWIPEDINE_PLACES_API".to_string(),
            reason: format!("expected \"legacy\" or \"modern\", got \"{other}\""),
        }),
    }
}
