//! Scrolling message log, newest line at the bottom.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::shared::OutputLine;

/// Draw the tail of `lines` that fits in `area`.
pub fn draw(frame: &mut Frame, lines: &[OutputLine], area: Rect) {
    let visible = usize::from(area.height.saturating_sub(2));
    let start = lines.len().saturating_sub(visible);
    let text: Vec<Line> = lines[start..].iter().map(OutputLine::to_line).collect();

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .title(" Messages ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
