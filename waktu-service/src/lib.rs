//! HTTP ingestion service for timestamped records.
//!
//! `POST /waktu` takes a JSON batch, validates every record, normalizes
//! each `kapan` datetime to UTC and stores the batch through a
//! [`RecordGateway`]. `GET /waktu/:id` reads a record back.

pub mod api;
pub mod error;
pub mod gateway;

pub use api::WaktuApiBuilder;
pub use error::{AppError, AppResult};
pub use gateway::{PgRecordGateway, RecordGateway};
