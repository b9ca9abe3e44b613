//! metrognome - terminal click track
//!
//! Run with: cargo run -- --tempo 96 --time-signature 6/8 --subdivision 2

mod app;
mod ui;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use metrognome::{SchedulerConfig, TimeSignature};

use app::Metrognome;

#[derive(Parser, Debug)]
#[command(name = "metrognome")]
#[command(version, about = "Drift-free metronome for the terminal", long_about = None)]
struct Cli {
    /// Tempo in beats per minute
    #[arg(short, long, default_value_t = 120.0)]
    tempo: f64,

    /// Time signature; only the numerator changes the click
    #[arg(short = 's', long, default_value = "4/4")]
    time_signature: TimeSignature,

    /// Clicks per beat (2 = eighths, 3 = triplets, 4 = sixteenths)
    #[arg(short = 'd', long, default_value_t = 1)]
    subdivision: u32,

    /// Scheduler wake-up period in milliseconds
    #[arg(long, default_value_t = 25)]
    lookahead_ms: u64,

    /// Seconds of audio scheduled ahead on every wake-up
    #[arg(long, default_value_t = 0.1)]
    schedule_ahead: f64,

    /// Click without the TUI, logging each pulse
    #[arg(long)]
    headless: bool,

    /// Stop after this many seconds (headless only)
    #[arg(long, value_name = "SECONDS", requires = "headless")]
    duration: Option<f64>,

    /// Print the schedule for this many seconds against a simulated clock,
    /// without opening an audio device
    #[arg(long, value_name = "SECONDS", conflicts_with = "headless")]
    dry_run: Option<f64>,

    /// Write logs to this file (the TUI otherwise discards them)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            tempo_bpm: self.tempo,
            beats_per_measure: self.time_signature.beats_per_measure,
            subdivision: self.subdivision,
            wake_period: Duration::from_millis(self.lookahead_ms),
            schedule_ahead: self.schedule_ahead,
            ..SchedulerConfig::default()
        }
    }
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    // The TUI owns the terminal; only log to stderr when it is not running
    let tui = !cli.headless && cli.dry_run.is_none();
    init_logging(cli.log_file.as_deref(), !tui)?;

    let config = cli.scheduler_config();
    config.validate().wrap_err("invalid metronome settings")?;

    let app = Metrognome::new(config, cli.time_signature);

    if let Some(seconds) = cli.dry_run {
        app.dry_run(seconds)
    } else if cli.headless {
        app.run_headless(cli.duration)
    } else {
        app.run()
    }
}

fn init_logging(log_file: Option<&Path>, to_stderr: bool) -> EyreResult<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if let Some(path) = log_file {
        let file = File::create(path)
            .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    } else if !to_stderr {
        return Ok(());
    }

    builder.init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_scheduler_defaults() {
        let cli = Cli::parse_from(["metrognome"]);
        assert_eq!(cli.scheduler_config(), SchedulerConfig::default());
    }

    #[test]
    fn time_signature_sets_beats_per_measure() {
        let cli = Cli::parse_from(["metrognome", "-s", "7/8", "-d", "2", "-t", "140"]);
        let config = cli.scheduler_config();
        assert_eq!(config.beats_per_measure, 7);
        assert_eq!(config.subdivision, 2);
        assert_eq!(config.tempo_bpm, 140.0);
    }

    #[test]
    fn rejects_bad_time_signature() {
        assert!(Cli::try_parse_from(["metrognome", "-s", "seven"]).is_err());
    }

    #[test]
    fn duration_requires_headless() {
        assert!(Cli::try_parse_from(["metrognome", "--duration", "5"]).is_err());
        assert!(Cli::try_parse_from(["metrognome", "--headless", "--duration", "5"]).is_ok());
    }
}
