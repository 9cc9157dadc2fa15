use std::fmt;

use thiserror::Error;

use crate::record::{CheckedRecord, RecordPayload};

/// Why a field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationReason {
    Empty,
    Missing,
}

impl ViolationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationReason::Empty => "empty",
            ViolationReason::Missing => "missing",
        }
    }
}

impl fmt::Display for ViolationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rejected field of one record in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub index: usize,
    pub field: &'static str,
    pub reason: ViolationReason,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}].{}: {}", self.index, self.field, self.reason)
    }
}

/// Every field violation found in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("batch rejected with {} field violation(s)", .violations.len())]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

/// Checks every record of the batch and accepts it only when all pass.
///
/// An empty `when` string is accepted here; its emptiness is resolved by
/// the timestamp normalizer.
pub fn validate_batch(batch: Vec<RecordPayload>) -> Result<Vec<CheckedRecord>, ValidationError> {
    let mut violations = Vec::new();
    let mut checked = Vec::with_capacity(batch.len());

    for (index, payload) in batch.into_iter().enumerate() {
        let mut reject = |field, reason| {
            violations.push(FieldViolation {
                index,
                field,
                reason,
            })
        };

        if payload.id.is_none() {
            reject("id", ViolationReason::Missing);
        }
        if payload.note.as_deref().map_or(true, str::is_empty) {
            reject("note", ViolationReason::Empty);
        }
        if payload.size.is_none() {
            reject("size", ViolationReason::Missing);
        }
        if payload.when.is_none() {
            reject("when", ViolationReason::Missing);
        }

        if let (Some(id), Some(note), Some(size), Some(when)) =
            (payload.id, payload.note, payload.size, payload.when)
        {
            if !note.is_empty() {
                checked.push(CheckedRecord {
                    id,
                    note,
                    size,
                    when,
                });
            }
        }
    }

    if violations.is_empty() {
        Ok(checked)
    } else {
        Err(ValidationError { violations })
    }
}
