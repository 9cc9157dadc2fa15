//! Core shared library for the waktu service.
//!
//! Exposes the primitives the HTTP service and the record gateway build
//! on: the canonical error type, environment configuration, the Postgres
//! pool wrapper and logging setup.

pub mod config;
pub mod db;
pub mod errors;
pub mod logging;

pub use config::CoreConfig;
pub use db::DatabasePool;
pub use errors::{ConfigError, WaktuError};
