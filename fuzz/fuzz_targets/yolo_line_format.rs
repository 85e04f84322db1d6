//! Fuzz target for YOLO label line formatting.
//!
//! Run with:
//!   cargo +nightly fuzz run yolo_line_format

#![no_main]

use dentyolo::ir::io_yolo::fuzz_format_label_line;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 40 {
        return;
    }

    let mut coords = [0.0f64; 4];
    for (i, chunk) in data[..32].chunks_exact(8).enumerate() {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        coords[i] = f64::from_le_bytes(bytes);
    }
    let width = u32::from_le_bytes([data[32], data[33], data[34], data[35]]);
    let height = u32::from_le_bytes([data[36], data[37], data[38], data[39]]);

    let _ = fuzz_format_label_line(coords, width, height);
});
