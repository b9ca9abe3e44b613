//! Beat display - one dot per pulse of the measure, the sounding one lit

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use metrognome::{Meter, PulseEvent, PulseKind};

/// Terminal color for a pulse class
pub fn pulse_color(kind: PulseKind) -> Color {
    let rgb = kind.color();
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

/// Index of the dot to light for `event` under the current meter
pub fn lit_dot(meter: Meter, event: &PulseEvent) -> u32 {
    event.index % meter.pulses_per_measure()
}

/// Render the measure as a row of dots
pub fn render_beat_dots(
    frame: &mut Frame,
    area: Rect,
    meter: Meter,
    highlighted: Option<&PulseEvent>,
) {
    if area.height == 0 {
        return;
    }

    let lit = highlighted.map(|event| (lit_dot(meter, event), event.kind));

    let mut spans = Vec::new();
    for index in 0..meter.pulses_per_measure() {
        let kind = meter.classify(index);
        let glyph = match kind {
            PulseKind::Subdivision => "•",
            _ => "●",
        };

        let style = match lit {
            Some((dot, lit_kind)) if dot == index => Style::default()
                .fg(pulse_color(lit_kind))
                .add_modifier(Modifier::BOLD),
            _ => Style::default().fg(Color::DarkGray),
        };

        spans.push(Span::styled(glyph, style));
        spans.push(Span::raw(" "));
    }

    let label = match highlighted {
        Some(event) => format!(
            "beat {} of {}",
            meter.beat_of(lit_dot(meter, event)) + 1,
            meter.beats_per_measure
        ),
        None => String::from("-"),
    };

    let lines = vec![
        Line::from(spans),
        Line::from(""),
        Line::from(Span::styled(label, Style::default().fg(Color::White))),
    ];

    // Vertically center the three lines
    let top = area.height.saturating_sub(lines.len() as u16) / 2;
    let inner = Rect {
        y: area.y + top,
        height: area.height - top,
        ..area
    };

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}
