use thiserror::Error;

/// Result type used across the waktu core crate.
pub type Result<T> = std::result::Result<T, WaktuError>;

/// Canonical error representation shared by the service crates.
#[derive(Debug, Error)]
pub enum WaktuError {
    #[error("storage error: {0}")]
    StorageError(String),

    #[error("record {0} already exists")]
    DuplicateRecord(i32),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("general error: {0}")]
    GeneralError(String),
}

impl From<sqlx::Error> for WaktuError {
    fn from(err: sqlx::Error) -> Self {
        WaktuError::StorageError(err.to_string())
    }
}

/// Dedicated configuration error used by the configuration module.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {key}: {value}")]
    InvalidEnvVar { key: String, value: String },
}

impl From<ConfigError> for WaktuError {
    fn from(value: ConfigError) -> Self {
        WaktuError::ConfigError(value.to_string())
    }
}
