//! Criterion microbenches for the conversion core.
//!
//! Run with: `cargo bench`
//!
//! These benchmarks measure:
//! - COCO document parsing (from_coco_str)
//! - tooth grouping over a full-mouth chart
//! - record-to-label conversion with a warm label allocator

use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use std::hint::black_box;

use dentyolo::conversion::convert_record;
use dentyolo::grouping::{group_teeth, SingletonPolicy};
use dentyolo::ir::io_coco_json::from_coco_str;
use dentyolo::ir::ToothId;
use dentyolo::LabelAllocator;

// Include test fixtures at compile time (no file I/O during benchmark)
const SAMPLE_FIXTURE: &str = include_str!("../tests/fixtures/sample_xray.json");

/// All 32 permanent teeth, quadrants 1-4.
fn full_mouth() -> Vec<ToothId> {
    (1..=4)
        .flat_map(|q| (1..=8).map(move |p| ToothId::new(q * 10 + p)))
        .collect()
}

fn bench_coco_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("coco_parse");
    group.throughput(Throughput::Bytes(SAMPLE_FIXTURE.len() as u64));

    group.bench_function("from_coco_str", |b| {
        b.iter(|| {
            let record = from_coco_str(black_box(SAMPLE_FIXTURE)).unwrap();
            black_box(record)
        })
    });

    group.finish();
}

fn bench_grouping(c: &mut Criterion) {
    let teeth = full_mouth();
    let mut group = c.benchmark_group("grouping");
    group.throughput(Throughput::Elements(teeth.len() as u64));

    group.bench_function("group_teeth_full_mouth", |b| {
        b.iter(|| {
            let groups = group_teeth(black_box(teeth.iter().copied()), SingletonPolicy::Isolated);
            black_box(groups)
        })
    });

    group.finish();
}

/// The allocator is warmed once outside the timed region, so every
/// iteration measures the lookup path rather than allocation.
fn bench_convert_record(c: &mut Criterion) {
    let record = from_coco_str(SAMPLE_FIXTURE).expect("Failed to parse sample fixture");
    let mut labels = LabelAllocator::new();
    convert_record(&record, SingletonPolicy::Isolated, &mut labels).unwrap();

    let mut group = c.benchmark_group("convert_record");
    group.throughput(Throughput::Elements(record.annotations.len() as u64));

    group.bench_function("convert_record", |b| {
        b.iter(|| {
            let out =
                convert_record(black_box(&record), SingletonPolicy::Isolated, &mut labels).unwrap();
            black_box(out)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_coco_parse, bench_grouping, bench_convert_record);
criterion_main!(benches);
