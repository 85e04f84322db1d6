//! Fuzz target for source document parsing and conversion.
//!
//! Arbitrary bytes are parsed as a COCO document; anything that parses is
//! pushed through the full in-memory pipeline. Errors are fine, panics
//! are not.
//!
//! Run with:
//!   cargo +nightly fuzz run coco_record_parse

#![no_main]

use dentyolo::conversion::convert_record;
use dentyolo::ir::io_coco_json::from_coco_slice;
use dentyolo::{LabelAllocator, SingletonPolicy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // 10MB is generous for a single-image annotation document.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    if let Ok(record) = from_coco_slice(data) {
        let mut labels = LabelAllocator::new();
        let _ = convert_record(&record, SingletonPolicy::Always, &mut labels);
    }
});
