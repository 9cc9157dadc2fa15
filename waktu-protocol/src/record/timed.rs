use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A validated record whose `when` is the UTC civil datetime of the
/// submitted instant. `None` means the client sent an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedRecord {
    pub id: i32,
    pub note: String,
    #[serde(rename = "ukuran")]
    pub size: i32,
    #[serde(rename = "kapan")]
    pub when: Option<NaiveDateTime>,
}
