//! Runtime configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `USER_API_*` environment variables and an
//! optional configuration file, in that order of precedence.

use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::DEFAULT_POOL_MAX_SIZE;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

/// Configuration failures detected after loading.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("unknown storage backend {value:?}; expected `memory` or `postgres`")]
    UnknownStorage { value: String },
    #[error("invalid bind address {address}: {message}")]
    InvalidBindAddress { address: String, message: String },
    #[error("database setting `{field}` is required")]
    MissingDatabaseField { field: &'static str },
}

/// Which repository adapter backs the service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    #[default]
    Memory,
    Postgres,
}

impl FromStr for StorageBackend {
    type Err = SettingsError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "in-memory" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(SettingsError::UnknownStorage {
                value: value.to_owned(),
            }),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::Postgres => f.write_str("postgres"),
        }
    }
}

/// Top-level service settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_API")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// `memory` or `postgres`.
    pub storage: Option<String>,
    /// Seed the in-memory store with two demo users.
    #[ortho_config(default = false)]
    pub seed_demo_users: bool,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Full connection string; overrides the individual `db_*` fields.
    pub database_url: Option<String>,
    pub db_host: Option<String>,
    pub db_port: Option<String>,
    pub db_user: Option<String>,
    pub db_password: Option<String>,
    pub db_name: Option<String>,
    pub db_ssl_mode: Option<String>,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Resolve `host:port` to a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let address = format!("{}:{}", self.host(), self.port());
        let invalid = |message: String| SettingsError::InvalidBindAddress {
            address: address.clone(),
            message,
        };
        (self.host(), self.port())
            .to_socket_addrs()
            .map_err(|err| invalid(err.to_string()))?
            .next()
            .ok_or_else(|| invalid("host resolved to no addresses".to_owned()))
    }

    pub fn storage(&self) -> Result<StorageBackend, SettingsError> {
        self.storage
            .as_deref()
            .map_or(Ok(StorageBackend::default()), StorageBackend::from_str)
    }

    pub fn pool_max_size(&self) -> u32 {
        self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE)
    }

    /// Individual connection parameters as configured.
    pub fn database(&self) -> DatabaseSettings {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        DatabaseSettings {
            host: field(&self.db_host),
            port: field(&self.db_port),
            user: field(&self.db_user),
            password: field(&self.db_password),
            db_name: field(&self.db_name),
            ssl_mode: field(&self.db_ssl_mode),
        }
    }

    /// Connection string for the postgres backend.
    ///
    /// A non-blank `database_url` wins; otherwise every `db_*` field must be
    /// present.
    pub fn database_url(&self) -> Result<String, SettingsError> {
        if let Some(url) = self
            .database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
        {
            return Ok(url.to_owned());
        }
        let database = self.database();
        database.validate()?;
        Ok(database.dsn())
    }
}

/// PostgreSQL connection parameters.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: String,
    pub user: String,
    pub password: String,
    pub db_name: String,
    pub ssl_mode: String,
}

impl fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("db_name", &self.db_name)
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}

impl DatabaseSettings {
    /// Reject the first blank field, in connection-string order.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let fields = [
            ("host", &self.host),
            ("port", &self.port),
            ("user", &self.user),
            ("password", &self.password),
            ("db_name", &self.db_name),
            ("ssl_mode", &self.ssl_mode),
        ];
        match fields.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(SettingsError::MissingDatabaseField { field: *field }),
            None => Ok(()),
        }
    }

    /// libpq keyword/value connection string.
    ///
    /// # Examples
    /// ```
    /// use user_api::settings::DatabaseSettings;
    ///
    /// let db = DatabaseSettings {
    ///     host: "localhost".into(),
    ///     port: "5432".into(),
    ///     user: "app".into(),
    ///     password: "secret".into(),
    ///     db_name: "users".into(),
    ///     ssl_mode: "disable".into(),
    /// };
    /// assert_eq!(
    ///     db.dsn(),
    ///     "host=localhost port=5432 user=app password=secret dbname=users sslmode=disable"
    /// );
    /// ```
    pub fn dsn(&self) -> String {
        [
            ("host", &self.host),
            ("port", &self.port),
            ("user", &self.user),
            ("password", &self.password),
            ("dbname", &self.db_name),
            ("sslmode", &self.ssl_mode),
        ]
        .iter()
        .map(|(key, value)| format!("{key}={}", quote_value(value)))
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Quote a libpq value when it is empty or contains spaces, quotes or
/// backslashes.
fn quote_value(value: &str) -> String {
    let needs_quotes =
        value.is_empty() || value.contains(|c: char| c.is_whitespace() || c == '\'' || c == '\\');
    if !needs_quotes {
        return value.to_owned();
    }
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{escaped}'")
}
