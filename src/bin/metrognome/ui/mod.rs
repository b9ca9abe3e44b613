//! TUI module for metrognome
//!
//! Drives the scheduler from the UI thread and lights the beat display in
//! step with the audio clock.

mod beat_dots;
pub mod state;
mod transport;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    DefaultTerminal, Frame,
};
use std::time::{Duration, Instant};

use metrognome::{
    sequencing::config::MAX_TEMPO_BPM, CpalClock, PulseEvent, PulseQueue, Scheduler, TapTempo,
    TimeSignature,
};

use beat_dots::render_beat_dots;
use state::{next_subdivision, Action, Status, TransportView};
use transport::render_transport;

/// Redraw interval (~60fps)
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Lowest tempo reachable with the tempo keys
const MIN_UI_TEMPO: f64 = 20.0;

/// UI application state
pub struct UiApp {
    scheduler: Scheduler<CpalClock, PulseQueue>,
    /// Shown signature; its numerator is the scheduler's meter
    time_signature: TimeSignature,
    tap: TapTempo,
    /// Tap timestamps are milliseconds since this instant
    epoch: Instant,
    /// Most recent pulse that has sounded
    highlighted: Option<PulseEvent>,
    status: Status,
    should_quit: bool,
}

impl UiApp {
    pub fn new(scheduler: Scheduler<CpalClock, PulseQueue>, time_signature: TimeSignature) -> Self {
        Self {
            scheduler,
            time_signature,
            tap: TapTempo::new(),
            epoch: Instant::now(),
            highlighted: None,
            status: Status::info("Press Space to start"),
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_scheduler();
            self.poll_pulses();

            terminal.draw(|frame| self.render(frame))?;

            // Wake for the scheduler or the next frame, whichever comes first
            let timeout = self
                .scheduler
                .time_until_wake()
                .map_or(FRAME_INTERVAL, |wait| wait.min(FRAME_INTERVAL));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        if let Some(action) = Action::from_key(key.code) {
                            self.apply(action);
                        }
                    }
                }
            }
        }

        self.scheduler.stop();
        Ok(())
    }

    /// Fill the lookahead window if a wake-up is due
    fn poll_scheduler(&mut self) {
        if let Err(err) = self.scheduler.poll() {
            // Scheduler has already stopped itself
            self.status = Status::error(err.to_string());
            self.highlighted = None;
            self.scheduler.listener_mut().clear();
        }
    }

    /// Light the latest pulse that has started sounding
    fn poll_pulses(&mut self) {
        if self.scheduler.listener().is_empty() {
            return;
        }
        let Ok(now) = self.scheduler.clock_time() else {
            return;
        };
        if let Some(event) = self.scheduler.listener_mut().pop_due(now) {
            self.highlighted = Some(event);
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::TogglePlayback => self.toggle_playback(),
            Action::NudgeTempo(delta) => {
                let bpm = (self.scheduler.tempo() + delta).clamp(MIN_UI_TEMPO, MAX_TEMPO_BPM);
                self.set_tempo(bpm);
            }
            Action::Tap => self.tap(),
            Action::NextTimeSignature => {
                let next = self.time_signature.next_preset();
                match self.scheduler.set_meter(next.beats_per_measure) {
                    Ok(()) => {
                        self.time_signature = next;
                        self.status = Status::info(format!("Time signature {next}"));
                    }
                    Err(err) => self.status = Status::error(err.to_string()),
                }
            }
            Action::NextSubdivision => {
                let next = next_subdivision(self.scheduler.subdivision());
                match self.scheduler.set_subdivision(next) {
                    Ok(()) => self.status = Status::info(format!("Subdivision {next}")),
                    Err(err) => self.status = Status::error(err.to_string()),
                }
            }
            Action::Quit => self.should_quit = true,
        }
    }

    fn toggle_playback(&mut self) {
        if self.scheduler.is_running() {
            self.scheduler.stop();
            self.scheduler.listener_mut().clear();
            self.highlighted = None;
            self.status = Status::info("Stopped");
            return;
        }

        match self.scheduler.start() {
            Ok(()) => {
                self.highlighted = None;
                self.status = Status::info("Playing");
            }
            Err(err) => {
                log::error!("start failed: {err}");
                self.status = Status::error(err.to_string());
            }
        }
    }

    fn tap(&mut self) {
        let at_ms = self.epoch.elapsed().as_secs_f64() * 1000.0;
        match self.tap.tap(at_ms) {
            // Whole BPM, like the tempo keys
            Some(bpm) => self.set_tempo(bpm.round().clamp(1.0, MAX_TEMPO_BPM)),
            None => self.status = Status::info("Tap again..."),
        }
    }

    fn set_tempo(&mut self, bpm: f64) {
        match self.scheduler.set_tempo(bpm) {
            Ok(()) => self.status = Status::info(format!("Tempo {bpm:.0} BPM")),
            Err(err) => self.status = Status::error(err.to_string()),
        }
    }

    fn transport_view(&self) -> TransportView {
        let running = self.scheduler.is_running();
        TransportView {
            bpm: self.scheduler.tempo(),
            is_playing: running,
            beats_per_measure: self.scheduler.beats_per_measure(),
            note_value: self.time_signature.note_value,
            subdivision: self.scheduler.subdivision(),
            clock_time: if running {
                self.scheduler.clock_time().ok()
            } else {
                None
            },
            sample_rate: self.scheduler.clock().sample_rate(),
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        // Main layout: transport, beats, status, help
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Transport bar
                Constraint::Min(5),    // Beat display
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        render_transport(frame, chunks[0], &self.transport_view());

        let beats_block = Block::default().title(" Beats ").borders(Borders::ALL);
        let beats_inner = beats_block.inner(chunks[1]);
        frame.render_widget(beats_block, chunks[1]);
        render_beat_dots(
            frame,
            beats_inner,
            self.scheduler.meter(),
            self.highlighted.as_ref(),
        );

        let status_style = if self.status.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Gray)
        };
        let status = Paragraph::new(format!(" {}", self.status.message)).style(status_style);
        frame.render_widget(status, chunks[2]);

        let help = Paragraph::new(
            " [Space] Start/Stop  [↑/↓] ±1  [PgUp/PgDn] ±10  [T] Tap  [M] Meter  [S] Subdivision  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
