//! The running game: question, hidden word, or emoji phrase.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use parley_games::PlayView;

use crate::app::GameApp;

/// Draw the play screen.
pub fn draw(frame: &mut Frame, app: &GameApp, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    match &app.snapshot().view {
        Some(PlayView::Trivia {
            question,
            options,
            number,
            total,
        }) => {
            let block = block.title(format!(" Question {number}/{total} "));
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(2), Constraint::Min(1)])
                .split(inner);

            frame.render_widget(
                Paragraph::new(question.as_str())
                    .style(Style::default().bold())
                    .wrap(Wrap { trim: true }),
                chunks[0],
            );
            let items: Vec<ListItem> = options
                .iter()
                .enumerate()
                .map(|(i, o)| ListItem::new(format!("{}. {o}", i + 1)))
                .collect();
            let list = List::new(items).highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
            let mut state = ListState::default();
            state.select(Some(app.cursor));
            frame.render_stateful_widget(list, chunks[1], &mut state);
        }
        Some(PlayView::WordChain {
            category,
            masked,
            guesses_left,
            max_guesses,
        }) => {
            let spaced: String = masked
                .chars()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            let guessed: String = app
                .snapshot()
                .guessed_letters
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            let text = vec![
                Line::from(format!("Category: {category}")),
                Line::from(""),
                Line::from(Span::styled(spaced, Style::default().fg(Color::Yellow).bold())),
                Line::from(""),
                Line::from(format!("Guessed: {guessed}")),
                Line::from(format!("Guesses left: {guesses_left}/{max_guesses}")),
            ];
            frame.render_widget(
                Paragraph::new(text).block(block.title(" Guess the Word ")),
                area,
            );
        }
        Some(PlayView::EmojiPictionary {
            emoji,
            number,
            total,
        }) => {
            let block = block.title(format!(" Phrase {number}/{total} "));
            let inner = block.inner(area);
            frame.render_widget(block, area);
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(3)])
                .split(inner);

            frame.render_widget(
                Paragraph::new(emoji.as_str()).alignment(Alignment::Center),
                chunks[0],
            );
            let input = Paragraph::new(format!("> {}", app.input_text)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Yellow)),
            );
            frame.render_widget(input, chunks[1]);

            let width = u16::try_from(app.input_text.chars().count()).unwrap_or(u16::MAX);
            let cursor_x = chunks[1].x.saturating_add(3).saturating_add(width);
            if cursor_x < chunks[1].right().saturating_sub(1) {
                frame.set_cursor_position(Position::new(cursor_x, chunks[1].y + 1));
            }
        }
        None => frame.render_widget(Paragraph::new("").block(block), area),
    }
}
