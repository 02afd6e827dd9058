//! Header bar: game, level, score, and countdown.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use parley_games::SessionSnapshot;

/// Seconds left at which the countdown turns red.
const LOW_TIME: u32 = 10;

/// Draw the header for `snap`.
pub fn draw(frame: &mut Frame, snap: &SessionSnapshot, area: Rect) {
    let title = snap.variant_name.as_deref().unwrap_or("Chat Games");

    let mut spans = vec![
        Span::styled(title.to_string(), Style::default().fg(Color::Cyan).bold()),
    ];
    if let Some(level) = &snap.level {
        spans.push(Span::styled(
            format!("  [{level}]"),
            Style::default().fg(Color::Magenta),
        ));
    }
    if snap.variant.is_some() {
        spans.push(Span::raw(format!("  Score: {}", snap.score)));
    }
    if let Some(secs) = snap.time_remaining {
        let color = if secs <= LOW_TIME {
            Color::Red
        } else {
            Color::Green
        };
        spans.push(Span::styled(
            format!("  Time: {secs}s"),
            Style::default().fg(color).bold(),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(header, area);
}
