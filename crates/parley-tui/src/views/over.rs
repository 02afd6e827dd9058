//! Result screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use parley_games::{Outcome, SessionSnapshot};

/// Headline for a finished session.
///
/// A loss that still earned points gets encouragement rather than
/// consolation.
fn headline(snap: &SessionSnapshot) -> (&'static str, Color) {
    match snap.outcome {
        Outcome::Won => ("Congratulations, you won!", Color::Green),
        _ if snap.score > 0 => ("You can do it, keep it up!", Color::Yellow),
        _ => ("No worries, best of luck next time!", Color::Red),
    }
}

/// Draw the final score and outcome.
pub fn draw(frame: &mut Frame, snap: &SessionSnapshot, area: Rect) {
    let (headline, color) = headline(snap);

    let mut text = vec![
        Line::from(Span::styled(headline, Style::default().fg(color).bold())),
        Line::from(""),
        Line::from(format!("Final score: {}", snap.score)),
    ];
    if let Some(word) = &snap.revealed_word {
        text.push(Line::from(format!("The word was: {word}")));
    }
    text.push(Line::from(""));
    text.push(Line::from(Span::styled(
        "Press r to play again, Esc to choose another game",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(paragraph, area);
}
