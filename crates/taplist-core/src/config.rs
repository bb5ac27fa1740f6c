use crate::app_config::{AppConfig, Environment};
use crate::window::{parse_time_of_day, RefreshWindow};
use crate::ConfigError;

/// Tap-list feed published by the store's ordering system.
pub const DEFAULT_BREWERY_FEED_URL: &str =
    "https://brevo.com.br/ss/bs/0001/hsys?ch=76914f2a9b15a60232d7b6006ccaf677&me=W";

/// Menu feed published by the store's ordering system.
pub const DEFAULT_PRODUCT_FEED_URL: &str =
    "https://brevo.com.br/ss/bs/0001/mppa?ch=76914f2a9b15a60232d7b6006ccaf677&me=W";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 6.0; Nexus 5 Build/MRA58N) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Mobile Safari/537.36";

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
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::time::Duration;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("TAPLIST_ENV", "development"));

    let bind_addr = or_default("TAPLIST_BIND_ADDR", "0.0.0.0:8000")
        .parse::<SocketAddr>()
        .map_err(|e| invalid("TAPLIST_BIND_ADDR", e.to_string()))?;
    let log_level = or_default("TAPLIST_LOG_LEVEL", "info");

    let brewery_feed_url = or_default("TAPLIST_BREWERY_FEED_URL", DEFAULT_BREWERY_FEED_URL);
    let product_feed_url = or_default("TAPLIST_PRODUCT_FEED_URL", DEFAULT_PRODUCT_FEED_URL);
    for (var, url) in [
        ("TAPLIST_BREWERY_FEED_URL", &brewery_feed_url),
        ("TAPLIST_PRODUCT_FEED_URL", &product_feed_url),
    ] {
        check_feed_url(url).map_err(|reason| invalid(var, reason))?;
    }

    let request_timeout_secs = parse_u64("TAPLIST_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("TAPLIST_USER_AGENT", DEFAULT_USER_AGENT);

    let window_start = parse_time_of_day(
        "TAPLIST_REFRESH_WINDOW_START",
        &or_default("TAPLIST_REFRESH_WINDOW_START", "10:00"),
    )?;
    let window_end = parse_time_of_day(
        "TAPLIST_REFRESH_WINDOW_END",
        &or_default("TAPLIST_REFRESH_WINDOW_END", "23:00"),
    )?;

    let refresh_interval_secs = parse_u64("TAPLIST_REFRESH_INTERVAL_SECS", "1800")?;
    if refresh_interval_secs == 0 {
        return Err(invalid(
            "TAPLIST_REFRESH_INTERVAL_SECS",
            "interval must be greater than zero".to_string(),
        ));
    }

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        brewery_feed_url,
        product_feed_url,
        request_timeout_secs,
        user_agent,
        refresh_window: RefreshWindow::new(window_start, window_end),
        refresh_interval: Duration::from_secs(refresh_interval_secs),
    })
}

/// Cheap sanity check that a feed URL is absolute HTTP(S).
fn check_feed_url(url: &str) -> Result<(), String> {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .ok_or_else(|| format!("\"{url}\" is not an http(s) URL"))?;
    if rest.split('/').next().is_none_or(str::is_empty) {
        return Err(format!("\"{url}\" has no host"));
    }
    Ok(())
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
