//! Scheduler benchmarks.
//!
//! A wake-up has to finish well inside the lookahead period, so these
//! measure one full window fill against a simulated clock.

mod scheduler;

pub use scheduler::bench_scheduler;
