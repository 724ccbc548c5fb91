//! # Database Configuration
//!
//! Resolves the database configuration for the CLI from the environment and command-line overrides.

use migration::{load_config_from_env, DatabaseConfig};

/// Reads `WAREHOUSE_DATABASE_*` from the environment; a `--database-url` value takes precedence.
pub fn database_config(url_override: Option<&str>) -> DatabaseConfig {
    let config = load_config_from_env();
    match url_override {
        Some(url) if !url.trim().is_empty() => config.with_url(url),
        _ => config,
    }
}

/// Hides the password of a connection URL so it can be logged.
///
/// URLs without credentials are returned unchanged.
pub fn redact(url: &str) -> String {
    let Some(scheme_end) = url.find("://")
    else {
        return url.to_owned();
    };
    let rest = &url[scheme_end + 3..];
    let authority_end = rest.find('/').unwrap_or(rest.len());
    let Some(at) = rest[..authority_end].rfind('@')
    else {
        return url.to_owned();
    };
    let userinfo = &rest[..at];
    match userinfo.find(':') {
        Some(colon) => {
            format!(
                "{}{}:***{}",
                &url[..scheme_end + 3],
                &userinfo[..colon],
                &rest[at..]
            )
        },
        None => url.to_owned(),
    }
}
