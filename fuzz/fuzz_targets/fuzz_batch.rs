// Fuzz target feeding arbitrary bodies through batch decoding and normalization.
#![no_main]

use chrono::Datelike;
use libfuzzer_sys::fuzz_target;
use waktu_protocol::batch::prepare_batch;
use waktu_protocol::record::RecordPayload;
use waktu_protocol::timestamp::{format_when, normalize_when};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        // Offsets can push year 0000 or 9999 outside the four-digit range.
        if let Ok(Some(value)) = normalize_when(text) {
            if !(0..=9999).contains(&value.year()) {
                return;
            }
            let rendered = format_when(&value);
            assert_eq!(normalize_when(&rendered), Ok(Some(value)));
        }
    }

    if let Ok(batch) = serde_json::from_slice::<Vec<RecordPayload>>(data) {
        let submitted = batch.len();
        if let Ok(records) = prepare_batch(batch) {
            assert_eq!(records.len(), submitted);
        }
    }
});
