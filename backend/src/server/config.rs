//! Server settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `SKY_*` environment variables, and config
//! files, in that order of precedence.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use sky_backend::outbound::persistence::PoolConfig;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 30;

/// Raised when a required setting is missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("database URL is not configured; set SKY_DATABASE_URL")]
    MissingDatabaseUrl,
}

/// Configuration values for the HTTP server and its database pool.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SKY")]
pub struct ServerSettings {
    /// Interface to listen on.
    pub host: Option<String>,
    /// Port to listen on.
    pub port: Option<u16>,
    /// PostgreSQL connection string.
    pub database_url: Option<String>,
    /// Upper bound on pooled connections.
    pub pool_max_size: Option<u32>,
    /// Connections kept open while idle.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub pool_timeout_secs: Option<u64>,
    /// Apply embedded migrations before serving.
    #[ortho_config(default = false)]
    pub run_migrations: bool,
}

impl ServerSettings {
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_HOST)
    }

    pub fn port(&self) -> u16 {
        self.port.unwrap_or(DEFAULT_PORT)
    }

    /// Database URL, which has no default.
    ///
    /// # Errors
    /// Returns [`SettingsError::MissingDatabaseUrl`] when unset or blank.
    pub fn database_url(&self) -> Result<&str, SettingsError> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .ok_or(SettingsError::MissingDatabaseUrl)
    }

    /// Pool configuration derived from these settings.
    ///
    /// # Errors
    /// Propagates [`ServerSettings::database_url`] failures.
    pub fn pool_config(&self) -> Result<PoolConfig, SettingsError> {
        let mut config = PoolConfig::new(self.database_url()?)
            .with_max_size(self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE))
            .with_connection_timeout(Duration::from_secs(
                self.pool_timeout_secs.unwrap_or(DEFAULT_POOL_TIMEOUT_SECS),
            ));
        if self.pool_min_idle.is_some() {
            config = config.with_min_idle(self.pool_min_idle);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for server settings parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 7] = [
        "SKY_HOST",
        "SKY_PORT",
        "SKY_DATABASE_URL",
        "SKY_POOL_MAX_SIZE",
        "SKY_POOL_MIN_IDLE",
        "SKY_POOL_TIMEOUT_SECS",
        "SKY_RUN_MIGRATIONS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_from_iter([OsString::from("sky-backend")])
            .expect("config should load")
    }

    #[rstest]
    fn defaults_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();

        assert_eq!(settings.host(), DEFAULT_HOST);
        assert_eq!(settings.port(), DEFAULT_PORT);
        assert!(!settings.run_migrations);
        assert_eq!(
            settings.database_url(),
            Err(SettingsError::MissingDatabaseUrl)
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("SKY_HOST", Some("127.0.0.1".to_owned())),
            ("SKY_PORT", Some("9090".to_owned())),
            (
                "SKY_DATABASE_URL",
                Some("postgres://sky@localhost/sky_take_out".to_owned()),
            ),
            ("SKY_POOL_MAX_SIZE", Some("4".to_owned())),
            ("SKY_POOL_MIN_IDLE", Some("1".to_owned())),
            ("SKY_POOL_TIMEOUT_SECS", Some("5".to_owned())),
            ("SKY_RUN_MIGRATIONS", Some("true".to_owned())),
        ]);

        let settings = load_from_empty_args();
        let pool = settings.pool_config().expect("database URL is set");

        assert_eq!(settings.host(), "127.0.0.1");
        assert_eq!(settings.port(), 9090);
        assert!(settings.run_migrations);
        assert_eq!(pool.database_url(), "postgres://sky@localhost/sky_take_out");
        assert_eq!(pool.max_size(), 4);
        assert_eq!(pool.min_idle(), Some(1));
        assert_eq!(pool.connection_timeout(), Duration::from_secs(5));
    }

    #[rstest]
    fn blank_database_url_counts_as_missing() {
        let _guard = lock_env([("SKY_DATABASE_URL", Some("   ".to_owned()))]);
        let settings = load_from_empty_args();
        assert!(settings.pool_config().is_err());
    }
}
