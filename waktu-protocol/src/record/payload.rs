use serde::{Deserialize, Serialize};

/// A record as it arrives on the wire, before any checks.
///
/// Every field is optional so the validator can report all missing
/// values of a batch at once instead of failing on the first one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordPayload {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, rename = "ukuran")]
    pub size: Option<i32>,
    #[serde(default, rename = "kapan")]
    pub when: Option<String>,
}

/// A record that passed field validation; `when` is still the raw wire text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedRecord {
    pub id: i32,
    pub note: String,
    pub size: i32,
    pub when: String,
}
