//! Shared utilities for views: the message log, layout helpers, and the help popup.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Visual style for a log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// Something the player entered (yellow, "> " prefix).
    Command,
    /// A right answer or a win (green).
    Success,
    /// A wrong answer, a loss, or a rejected command (red).
    Error,
    /// Neutral notices such as "game started" (cyan).
    System,
}

/// A single line of the message log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    /// Visual style of this line.
    pub style: OutputStyle,
    /// The text content.
    pub text: String,
}

impl OutputLine {
    /// Render as a styled ratatui line.
    pub fn to_line(&self) -> Line<'_> {
        let (prefix, color, modifier) = match self.style {
            OutputStyle::Command => ("> ", Color::Yellow, Modifier::BOLD),
            OutputStyle::Success => ("", Color::Green, Modifier::empty()),
            OutputStyle::Error => ("", Color::Red, Modifier::empty()),
            OutputStyle::System => ("", Color::Cyan, Modifier::ITALIC),
        };
        Line::from(Span::styled(
            format!("{prefix}{}", self.text),
            Style::default().fg(color).add_modifier(modifier),
        ))
    }
}

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Draw the key reference over the current screen.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());

    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().bold()),
        Line::from(""),
        Line::from("Choosing a game:"),
        Line::from("  j / k       Move down / up"),
        Line::from("  1-3         Pick a game directly"),
        Line::from("  Enter       Select / start"),
        Line::from("  Esc         Back to the game list"),
        Line::from(""),
        Line::from("Playing:"),
        Line::from("  1-9         Answer a trivia question"),
        Line::from("  A-Z         Guess a letter (Word Chain)"),
        Line::from("  Enter       Submit a phrase (Emoji Pictionary)"),
        Line::from("  Ctrl+R      Restart"),
        Line::from("  Esc         Leave the game"),
        Line::from(""),
        Line::from("Game over:"),
        Line::from("  r           Play again"),
        Line::from(""),
        Line::from("  ?           Toggle this help"),
        Line::from("  q / Ctrl+C  Close"),
    ];

    let popup = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(60, 70, outer);
        assert!(inner.x >= outer.x && inner.right() <= outer.right());
        assert!(inner.y >= outer.y && inner.bottom() <= outer.bottom());
        assert_eq!(inner.width, 60);
    }

    #[test]
    fn command_lines_are_prefixed() {
        let line = OutputLine {
            style: OutputStyle::Command,
            text: "guess A".into(),
        };
        assert_eq!(line.to_line().to_string(), "> guess A");
    }
}
