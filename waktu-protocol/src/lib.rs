pub mod batch;
pub mod record;
pub mod timestamp;
pub mod validation;
