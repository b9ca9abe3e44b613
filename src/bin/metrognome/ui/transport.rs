//! Transport bar widget - shows BPM, play state, meter and the audio clock

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::state::TransportView;

/// Render the transport bar
pub fn render_transport(frame: &mut Frame, area: Rect, view: &TransportView) {
    let block = Block::default().title(" metrognome ").borders(Borders::ALL);

    let play_symbol = if view.is_playing { "▶" } else { "⏸" };
    let play_state_str = if view.is_playing { "Playing" } else { "Stopped" };

    let mut spans = vec![
        Span::styled(
            format!(" BPM: {:.0}  ", view.bpm),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{} {}  ", play_symbol, play_state_str),
            Style::default().fg(if view.is_playing {
                Color::Green
            } else {
                Color::Yellow
            }),
        ),
        Span::styled(
            format!("{}/{}  ", view.beats_per_measure, view.note_value),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("x{}  ", view.subdivision),
            Style::default().fg(Color::White),
        ),
    ];

    if let Some(time) = view.clock_time {
        spans.push(Span::styled(
            format!("t={:.2}s  ", time),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(rate) = view.sample_rate {
        // e.g. 48000 -> "48.0kHz"
        spans.push(Span::styled(
            format!("{:.1}kHz", rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(block);
    frame.render_widget(paragraph, area);
}
