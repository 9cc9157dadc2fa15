use std::env;

use crate::errors::ConfigError;

const DEFAULT_HTTP_BIND: &str = "0.0.0.0:8080";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Runtime environment used by the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    fn from_str(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Development,
        }
    }
}

/// Service configuration read from the process environment.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    pub database_url: String,
    pub environment: Environment,
    pub http_bind: String,
    pub max_connections: u32,
}

impl CoreConfig {
    /// Loads configuration from the process environment.
    ///
    /// `DATABASE_URL` is required; the remaining keys use the `WAKTU_`
    /// namespace and fall back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".into()))?;

        Self::assemble(database_url, "WAKTU_")
    }

    /// Loads configuration from env vars prefixed with the provided value (e.g. `WAKTU_`).
    pub fn from_env_with_prefix(prefix: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let key = |suffix: &str| format!("{}{}", prefix, suffix);

        let db_key = key("DATABASE_URL");
        let database_url =
            env::var(&db_key).map_err(|_| ConfigError::MissingEnvVar(db_key.clone()))?;

        Self::assemble(database_url, prefix)
    }

    /// Tries the prefixed keys first and falls back to [`CoreConfig::from_env`]
    /// only when the prefixed database URL is absent. Any other error in the
    /// prefixed set is returned as is.
    pub fn from_env_with_fallback(prefix: &str) -> Result<Self, ConfigError> {
        match Self::from_env_with_prefix(prefix) {
            Err(ConfigError::MissingEnvVar(_)) => Self::from_env(),
            other => other,
        }
    }

    fn assemble(database_url: String, prefix: &str) -> Result<Self, ConfigError> {
        let key = |suffix: &str| format!("{}{}", prefix, suffix);
        let lookup = |suffix: &str| env::var(key(suffix)).ok();

        let environment = lookup("ENV")
            .map(|raw| Environment::from_str(&raw))
            .unwrap_or_default();

        let http_bind = lookup("HTTP_BIND").unwrap_or_else(|| DEFAULT_HTTP_BIND.to_string());

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|value| *value > 0)
                .ok_or(ConfigError::InvalidEnvVar {
                    key: key("DB_MAX_CONNECTIONS"),
                    value: raw,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url,
            environment,
            http_bind,
            max_connections,
        })
    }

    /// Returns the base Postgres URL.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Whether the service is running in production.
    pub fn is_production(&self) -> bool {
        matches!(self.environment, Environment::Production)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns a distinct prefix so parallel runs never share keys.

    #[test]
    fn prefixed_config_uses_defaults() {
        std::env::set_var("CFGTEST_A_DATABASE_URL", "postgres://example");
        let cfg = CoreConfig::from_env_with_prefix("CFGTEST_A_").expect("config should load");
        assert_eq!(cfg.database_url(), "postgres://example");
        assert_eq!(cfg.environment, Environment::Development);
        assert_eq!(cfg.http_bind, "0.0.0.0:8080");
        assert_eq!(cfg.max_connections, 5);
        assert!(!cfg.is_production());
    }

    #[test]
    fn prefixed_config_reads_overrides() {
        std::env::set_var("CFGTEST_B_DATABASE_URL", "postgres://db/waktu");
        std::env::set_var("CFGTEST_B_ENV", "prod");
        std::env::set_var("CFGTEST_B_HTTP_BIND", "127.0.0.1:9000");
        std::env::set_var("CFGTEST_B_DB_MAX_CONNECTIONS", "12");
        let cfg = CoreConfig::from_env_with_prefix("CFGTEST_B_").expect("config should load");
        assert!(cfg.is_production());
        assert_eq!(cfg.http_bind, "127.0.0.1:9000");
        assert_eq!(cfg.max_connections, 12);
    }

    #[test]
    fn missing_database_url_is_reported() {
        let err = CoreConfig::from_env_with_prefix("CFGTEST_C_").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(key) if key == "CFGTEST_C_DATABASE_URL"));
    }

    #[test]
    fn invalid_prefixed_value_is_not_masked_by_fallback() {
        std::env::set_var("CFGTEST_E_DATABASE_URL", "postgres://example");
        std::env::set_var("CFGTEST_E_DB_MAX_CONNECTIONS", "abc");
        match CoreConfig::from_env_with_fallback("CFGTEST_E_").unwrap_err() {
            ConfigError::InvalidEnvVar { key, value } => {
                assert_eq!(key, "CFGTEST_E_DB_MAX_CONNECTIONS");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn complete_prefixed_set_needs_no_fallback() {
        std::env::set_var("CFGTEST_F_DATABASE_URL", "postgres://prefixed");
        let cfg = CoreConfig::from_env_with_fallback("CFGTEST_F_").expect("config should load");
        assert_eq!(cfg.database_url(), "postgres://prefixed");
    }

    #[test]
    fn rejects_zero_pool_size() {
        std::env::set_var("CFGTEST_D_DATABASE_URL", "postgres://example");
        std::env::set_var("CFGTEST_D_DB_MAX_CONNECTIONS", "0");
        let err = CoreConfig::from_env_with_prefix("CFGTEST_D_").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar { .. }));
    }
}
