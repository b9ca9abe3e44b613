//! Benchmarks for the sample-accurate click renderer.

use std::collections::VecDeque;
use std::hint::black_box;

use criterion::{BatchSize, BenchmarkId, Criterion};
use metrognome::dsp::ClickRenderer;
use metrognome::ToneRequest;

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f32 = 48_000.0;

/// `count` clicks starting inside the first block
fn burst(count: usize, block: usize) -> VecDeque<ToneRequest> {
    let span = block as f64 / SAMPLE_RATE as f64;
    (0..count)
        .map(|i| ToneRequest {
            frequency: [1000.0, 600.0, 400.0][i % 3],
            start_time: span * i as f64 / count as f64,
            duration: 0.03,
        })
        .collect()
}

pub fn bench_renderer(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/renderer");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Silence: nothing queued, the common case between clicks
        let mut idle = ClickRenderer::new(VecDeque::new(), SAMPLE_RATE);
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                idle.render(black_box(&mut buffer));
            })
        });

        // One click starting mid-block
        group.bench_with_input(BenchmarkId::new("one_click", size), &size, |b, &size| {
            b.iter_batched(
                || ClickRenderer::new(burst(1, size), SAMPLE_RATE),
                |mut renderer| renderer.render(black_box(&mut buffer)),
                BatchSize::SmallInput,
            )
        });

        // Overlapping clicks, as at the tempo ceiling with a deep subdivision
        group.bench_with_input(BenchmarkId::new("sixteen_clicks", size), &size, |b, &size| {
            b.iter_batched(
                || ClickRenderer::new(burst(16, size), SAMPLE_RATE),
                |mut renderer| renderer.render(black_box(&mut buffer)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}
