use std::fmt;

use sqlx::mysql::MySqlConnectOptions;

/// Fixed capacity of the connection pool.
pub const MAX_CONNECTIONS: u32 = 10;

/// Database connection settings loaded from environment variables.
///
/// Defaults match a local MySQL install.
#[derive(Clone)]
pub struct DbConfig {
    /// Full `mysql://` URL. When set, the individual fields are ignored.
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub max_connections: u32,
}

impl DbConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var        | Default                 |
    /// |----------------|-------------------------|
    /// | `DATABASE_URL` | unset                   |
    /// | `DB_HOST`      | `localhost`             |
    /// | `DB_PORT`      | `3306`                  |
    /// | `DB_USER`      | `root`                  |
    /// | `DB_PASSWORD`  | empty                   |
    /// | `DB_NAME`      | `tccecossistemaescolar` |
    pub fn from_env() -> Self {
        let url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty());

        let port: u16 = std::env::var("DB_PORT")
            .unwrap_or_else(|_| "3306".into())
            .parse()
            .expect("DB_PORT must be a valid u16");

        Self {
            url,
            host: std::env::var("DB_HOST").unwrap_or_else(|_| "localhost".into()),
            port,
            user: std::env::var("DB_USER").unwrap_or_else(|_| "root".into()),
            password: std::env::var("DB_PASSWORD").unwrap_or_default(),
            database: std::env::var("DB_NAME").unwrap_or_else(|_| "tccecossistemaescolar".into()),
            max_connections: MAX_CONNECTIONS,
        }
    }

    /// Build sqlx connect options, preferring `url` when present.
    pub fn connect_options(&self) -> Result<MySqlConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return url.parse();
        }

        let mut opts = MySqlConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);
        if !self.password.is_empty() {
            opts = opts.password(&self.password);
        }
        Ok(opts)
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &self.url.as_ref().map(|_| "mysql://<redacted>@..."))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .finish()
    }
}
