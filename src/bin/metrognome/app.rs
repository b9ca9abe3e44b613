//! Metrognome - application builder and runners

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use std::thread;
use std::time::{Duration, Instant};

use metrognome::{
    CpalClock, ManualClock, PulseEvent, PulseListener, PulseQueue, Scheduler, SchedulerConfig,
    TimeSignature,
};

use super::ui::UiApp;

/// Main application builder
pub struct Metrognome {
    config: SchedulerConfig,
    time_signature: TimeSignature,
}

impl Metrognome {
    pub fn new(config: SchedulerConfig, time_signature: TimeSignature) -> Self {
        Self {
            config,
            time_signature,
        }
    }

    /// Run the interactive TUI (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        let scheduler = Scheduler::with_config(CpalClock::new(), PulseQueue::new(), self.config)?;
        let mut app = UiApp::new(scheduler, self.time_signature);

        let mut terminal = ratatui::init();
        let result = app.run(&mut terminal);
        ratatui::restore();

        result
    }

    /// Click without a UI until `duration` elapses (or forever)
    pub fn run_headless(self, duration: Option<f64>) -> EyreResult<()> {
        let wake_period = self.config.wake_period;
        let ring_out = self.config.schedule_ahead + self.config.tone_duration;

        let mut scheduler = Scheduler::with_config(CpalClock::new(), LogPulses, self.config)?;
        scheduler
            .start()
            .wrap_err("failed to start the audio clock")?;

        println!("=== Metrognome ===");
        println!("BPM: {}", scheduler.tempo());
        println!("Time signature: {}", self.time_signature);
        println!("Subdivision: {}", scheduler.subdivision());
        if let Some(rate) = scheduler.clock().sample_rate() {
            println!("Sample rate: {} Hz", rate);
        }
        match duration {
            Some(seconds) => println!("Playing for {seconds}s..."),
            None => println!("Playing... Press Ctrl+C to stop"),
        }
        println!();

        let started = Instant::now();
        loop {
            scheduler.poll()?;

            if duration.is_some_and(|limit| started.elapsed().as_secs_f64() >= limit) {
                break;
            }

            thread::sleep(scheduler.time_until_wake().unwrap_or(wake_period));
        }

        scheduler.stop();
        // Clicks already handed to the device still play
        thread::sleep(Duration::from_secs_f64(ring_out));

        Ok(())
    }

    /// Print the schedule a real run would produce, against a simulated clock
    pub fn dry_run(self, seconds: f64) -> EyreResult<()> {
        let step = self.config.wake_period.as_secs_f64();
        let mut scheduler =
            Scheduler::with_config(ManualClock::new(), Vec::<PulseEvent>::new(), self.config)?;
        scheduler.start()?;

        let mut wakes = 0usize;
        while scheduler.clock_time()? < seconds {
            scheduler.advance()?;
            scheduler.clock_mut().advance(step);
            wakes += 1;
        }
        scheduler.stop();

        println!(
            "{} BPM  {}  subdivision {}",
            scheduler.tempo(),
            self.time_signature,
            scheduler.subdivision()
        );
        println!("{:>5}  {:>10}  {:<13} {:>6}  {}", "pulse", "time", "kind", "hz", "color");
        for event in scheduler.listener() {
            println!(
                "{:>5}  {:>10.6}  {:<13} {:>6}  {}",
                event.index,
                event.time,
                format!("{:?}", event.kind),
                event.kind.frequency(),
                event.kind.color()
            );
        }
        println!();
        println!(
            "{} pulses over {} wake-ups",
            scheduler.listener().len(),
            wakes
        );

        Ok(())
    }
}

/// Logs every scheduled pulse
struct LogPulses;

impl PulseListener for LogPulses {
    fn on_pulse(&mut self, event: &PulseEvent) {
        log::info!(
            "pulse {:>3} {:?} at {:.4}s ({} Hz)",
            event.index,
            event.kind,
            event.time,
            event.kind.frequency()
        );
    }
}
