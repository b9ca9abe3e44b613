//! Benchmarks for a single click voice.

use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion};
use metrognome::dsp::ClickVoice;

use crate::BLOCK_SIZES;

pub fn bench_click(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/click");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Fresh click: hold phase, then into the decay
        group.bench_with_input(BenchmarkId::new("sounding", size), &size, |b, _| {
            b.iter_batched(
                || ClickVoice::new(48_000.0, 1000.0, 0.03),
                |mut voice| voice.render_add(black_box(&mut buffer)),
                BatchSize::SmallInput,
            )
        });

        // Waiting out its start offset
        let mut delayed = ClickVoice::new(48_000.0, 600.0, 0.03).with_delay(u32::MAX);
        group.bench_with_input(BenchmarkId::new("delayed", size), &size, |b, _| {
            b.iter(|| {
                delayed.render_add(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
