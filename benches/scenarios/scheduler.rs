//! Benchmarks for filling the lookahead window.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use metrognome::{ManualClock, PulseQueue, Scheduler, SchedulerConfig};

const WAKE: f64 = 0.025;

pub fn bench_scheduler(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/scheduler");

    // (tempo, subdivision): typical practice to the configured ceiling
    for (tempo, subdivision) in [(120.0, 1), (240.0, 4), (2000.0, 64)] {
        let config = SchedulerConfig {
            tempo_bpm: tempo,
            subdivision,
            ..SchedulerConfig::default()
        };
        let mut scheduler = Scheduler::with_config(ManualClock::new(), PulseQueue::new(), config)
            .expect("bench config is valid");
        scheduler.start().expect("manual clock starts");

        let id = format!("{tempo}bpm_x{subdivision}");
        group.bench_function(BenchmarkId::new("wake", id), |b| {
            b.iter(|| {
                let scheduled = scheduler.advance();
                scheduler.clock_mut().advance(WAKE);
                // Keep the recorders from growing without bound
                scheduler.clock_mut().take_tones();
                scheduler.listener_mut().clear();
                black_box(scheduled)
            })
        });
    }

    group.finish();
}
