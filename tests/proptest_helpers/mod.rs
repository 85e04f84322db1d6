#![allow(dead_code)]

use dentyolo::ir::{BBoxXYXY, ToothId};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Tooth numbers as they appear on real charts (quadrants 1-8, positions 1-8),
/// with the occasional out-of-range value.
pub fn arb_tooth_id() -> impl Strategy<Value = ToothId> {
    prop_oneof![
        9 => (1i64..=8, 1i64..=8).prop_map(|(q, p)| ToothId::new(q * 10 + p)),
        1 => (-50i64..150).prop_map(ToothId::new),
    ]
}

pub fn arb_tooth_ids(max_len: usize) -> impl Strategy<Value = Vec<ToothId>> {
    prop::collection::vec(arb_tooth_id(), 0..=max_len)
}

/// Corner+size boxes with non-negative size, inside a 4K frame.
pub fn arb_xywh() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    (0.0f64..4000.0, 0.0f64..3000.0, 0.0f64..500.0, 0.0f64..500.0)
}

pub fn arb_bbox() -> impl Strategy<Value = BBoxXYXY> {
    arb_xywh().prop_map(|(x, y, w, h)| BBoxXYXY::from_xywh(x, y, w, h))
}

/// A box fully inside an image of the returned size.
pub fn arb_bbox_in_image() -> impl Strategy<Value = (BBoxXYXY, u32, u32)> {
    (1u32..5000, 1u32..5000)
        .prop_flat_map(|(w, h)| {
            let (wf, hf) = (f64::from(w), f64::from(h));
            (0.0..=wf, 0.0..=wf, 0.0..=hf, 0.0..=hf, Just(w), Just(h))
        })
        .prop_map(|(x1, x2, y1, y2, w, h)| {
            (
                BBoxXYXY::from_xyxy(x1.min(x2), y1.min(y2), x1.max(x2), y1.max(y2)),
                w,
                h,
            )
        })
}
