mod payload;
mod timed;

pub use payload::{CheckedRecord, RecordPayload};
pub use timed::TimedRecord;
