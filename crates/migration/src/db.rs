//! # Database Connection Management
//!
//! This module provides database connection utilities and management functions
//! for establishing and maintaining connections using Sea-ORM.

use std::time::Duration;

use ::error::AppError;
use sea_orm::ConnectOptions;

use crate::SeaDb;

/// Database connection configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Full connection URL; overrides the individual PostgreSQL fields when set
    pub url:               Option<String>,
    /// Database host address
    pub host:              String,
    /// Database port number
    pub port:              u16,
    /// Database name
    pub database:          String,
    /// Database username
    pub username:          String,
    /// Database password
    pub password:          String,
    /// SSL mode for connection
    pub ssl_mode:          SslMode,
    /// Maximum connections in pool
    pub pool_size:         u32,
    /// Connection timeout in seconds
    pub connect_timeout:   u64,
    /// Statement timeout in seconds; a timed-out statement aborts its transaction
    pub statement_timeout: Option<u64>,
}

/// SSL mode options for PostgreSQL connections
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum SslMode {
    /// No SSL - only use for development
    #[default]
    Disable,
    /// Prefer SSL if available
    Prefer,
    /// Require SSL connection
    Require,
    /// Verify SSL certificate
    VerifyCa,
    /// Verify full SSL certificate chain
    VerifyFull,
}

impl SslMode {
    /// Converts the SSL mode to a PostgreSQL connection string value
    pub fn as_str(&self) -> &'static str {
        match self {
            SslMode::Disable => "disable",
            SslMode::Prefer => "prefer",
            SslMode::Require => "require",
            SslMode::VerifyCa => "verify-ca",
            SslMode::VerifyFull => "verify-full",
        }
    }

    /// Parses a connection string value, falling back to `Require`
    pub fn parse(value: &str) -> Self {
        match value {
            "disable" => SslMode::Disable,
            "prefer" => SslMode::Prefer,
            "verify-ca" => SslMode::VerifyCa,
            "verify-full" => SslMode::VerifyFull,
            _ => SslMode::Require,
        }
    }
}

impl DatabaseConfig {
    /// Creates a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self {
            url:               None,
            host:              "localhost".to_string(),
            port:              5432,
            database:          "warehouse".to_string(),
            username:          "warehouse".to_string(),
            password:          String::new(),
            ssl_mode:          SslMode::Require,
            pool_size:         10,
            connect_timeout:   30,
            statement_timeout: None,
        }
    }

    /// Sets a full connection URL (e.g. `sqlite://warehouse.db?mode=rwc`)
    #[must_use]
    pub fn with_url(mut self, url: &str) -> Self {
        self.url = Some(url.to_string());
        self
    }

    /// Sets the database host
    #[must_use]
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    /// Sets the database port
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the database name
    #[must_use]
    pub fn with_database(mut self, database: &str) -> Self {
        self.database = database.to_string();
        self
    }

    /// Sets the database username
    #[must_use]
    pub fn with_username(mut self, username: &str) -> Self {
        self.username = username.to_string();
        self
    }

    /// Sets the database password
    #[must_use]
    pub fn with_password(mut self, password: &str) -> Self {
        self.password = password.to_string();
        self
    }

    /// Sets the SSL mode
    #[must_use]
    pub fn with_ssl_mode(mut self, ssl_mode: SslMode) -> Self {
        self.ssl_mode = ssl_mode;
        self
    }

    /// Sets the connection pool size
    #[must_use]
    pub fn with_pool_size(mut self, pool_size: u32) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Sets the connection timeout in seconds
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: u64) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the statement timeout in seconds (None for no timeout)
    #[must_use]
    pub fn with_statement_timeout(mut self, timeout: Option<u64>) -> Self {
        self.statement_timeout = timeout;
        self
    }

    /// Builds the connection string
    ///
    /// An explicit URL wins; otherwise a PostgreSQL URL is assembled from the
    /// individual fields, carrying the statement timeout as a session option.
    #[must_use]
    pub fn build_connection_string(&self) -> String {
        if let Some(ref url) = self.url {
            return url.clone();
        }

        let mut url = format!(
            "postgres://{}:{}@{}:{}/{}?sslmode={}",
            encode_userinfo(&self.username),
            encode_userinfo(&self.password),
            self.host,
            self.port,
            self.database,
            self.ssl_mode.as_str()
        );
        if let Some(seconds) = self.statement_timeout {
            url.push_str(&format!("&options=-c%20statement_timeout%3D{}", seconds * 1000));
        }
        url
    }

    /// Pool options derived from this configuration
    #[must_use]
    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.build_connection_string());
        options
            .max_connections(self.pool_size)
            .connect_timeout(Duration::from_secs(self.connect_timeout))
            .acquire_timeout(Duration::from_secs(self.connect_timeout))
            .sqlx_logging(false);
        options
    }

    /// Creates a database connection from this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the connection fails.
    pub async fn connect(&self) -> Result<SeaDb, AppError> { SeaDb::connect_with(self.connect_options()).await }
}

impl Default for DatabaseConfig {
    fn default() -> Self { Self::new() }
}

/// Percent-encodes a username or password for the userinfo part of a URL.
///
/// Unreserved characters pass through; everything else is encoded byte by byte.
fn encode_userinfo(value: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut encoded = String::with_capacity(value.len().saturating_mul(3));
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            encoded.push(byte as char);
        }
        else {
            encoded.push('%');
            encoded.push(HEX[(byte >> 4) as usize] as char);
            encoded.push(HEX[(byte & 0x0f) as usize] as char);
        }
    }
    encoded
}

/// Loads database configuration from environment variables
///
/// Reads the following environment variables:
/// - `WAREHOUSE_DATABASE_URL` (optional, overrides the fields below)
/// - `WAREHOUSE_DATABASE_HOST` (default: "localhost")
/// - `WAREHOUSE_DATABASE_PORT` (default: "5432")
/// - `WAREHOUSE_DATABASE_NAME` (default: "warehouse")
/// - `WAREHOUSE_DATABASE_USER` (default: "warehouse")
/// - `WAREHOUSE_DATABASE_PASSWORD` (default: "")
/// - `WAREHOUSE_DATABASE_SSL_MODE` (default: "require")
/// - `WAREHOUSE_DATABASE_POOL_SIZE` (default: "10")
/// - `WAREHOUSE_DATABASE_CONNECT_TIMEOUT` (default: "30")
/// - `WAREHOUSE_DATABASE_STATEMENT_TIMEOUT` (optional)
#[must_use]
pub fn load_config_from_env() -> DatabaseConfig {
    let get_env = |key: &str, default: &str| std::env::var(key).unwrap_or_else(|_| default.to_string());

    let port = get_env("WAREHOUSE_DATABASE_PORT", "5432")
        .parse()
        .unwrap_or(5432);
    let pool_size = get_env("WAREHOUSE_DATABASE_POOL_SIZE", "10")
        .parse()
        .unwrap_or(10);
    let connect_timeout = get_env("WAREHOUSE_DATABASE_CONNECT_TIMEOUT", "30")
        .parse()
        .unwrap_or(30);
    let statement_timeout = std::env::var("WAREHOUSE_DATABASE_STATEMENT_TIMEOUT")
        .ok()
        .and_then(|v| v.parse().ok());

    let config = DatabaseConfig::new()
        .with_host(&get_env("WAREHOUSE_DATABASE_HOST", "localhost"))
        .with_port(port)
        .with_database(&get_env("WAREHOUSE_DATABASE_NAME", "warehouse"))
        .with_username(&get_env("WAREHOUSE_DATABASE_USER", "warehouse"))
        .with_password(&get_env("WAREHOUSE_DATABASE_PASSWORD", ""))
        .with_ssl_mode(SslMode::parse(&get_env("WAREHOUSE_DATABASE_SSL_MODE", "require")))
        .with_pool_size(pool_size)
        .with_connect_timeout(connect_timeout)
        .with_statement_timeout(statement_timeout);

    match std::env::var("WAREHOUSE_DATABASE_URL") {
        Ok(url) if !url.trim().is_empty() => config.with_url(url.trim()),
        _ => config,
    }
}

/// Creates a database connection using environment variables
///
/// # Errors
///
/// Returns an error if the connection fails.
pub async fn connect_from_env() -> Result<SeaDb, AppError> { load_config_from_env().connect().await }
