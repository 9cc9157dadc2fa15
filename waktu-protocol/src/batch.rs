use thiserror::Error;

use crate::record::{RecordPayload, TimedRecord};
use crate::timestamp::{normalize_when, NormalizationError};
use crate::validation::{validate_batch, ValidationError};

/// Failure of the decode-to-storage pipeline for a batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("record {index}: {source}")]
    Normalization {
        index: usize,
        #[source]
        source: NormalizationError,
    },
}

/// Validates the whole batch, then normalizes each record's `when`.
///
/// Nothing is returned unless every record survives both steps, so a
/// caller that persists the result never writes part of a bad batch.
pub fn prepare_batch(batch: Vec<RecordPayload>) -> Result<Vec<TimedRecord>, BatchError> {
    validate_batch(batch)?
        .into_iter()
        .enumerate()
        .map(|(index, checked)| {
            let when = normalize_when(&checked.when)
                .map_err(|source| BatchError::Normalization { index, source })?;
            Ok::<_, BatchError>(TimedRecord {
                id: checked.id,
                note: checked.note,
                size: checked.size,
                when,
            })
        })
        .collect()
}
