//! Benchmarks for the audio-thread click path.

mod click;
mod renderer;

pub use click::bench_click;
pub use renderer::bench_renderer;
