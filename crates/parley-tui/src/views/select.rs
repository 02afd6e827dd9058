//! Variant picker and level/start screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};

use parley_games::{Status, VariantSummary};

use crate::app::GameApp;

fn highlight() -> Style {
    Style::default()
        .bg(Color::DarkGray)
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Draw the list of games.
pub fn draw_variants(frame: &mut Frame, app: &GameApp, area: Rect) {
    let items: Vec<ListItem> = app
        .variants()
        .iter()
        .enumerate()
        .map(|(i, v)| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(v.name.clone(), Style::default().bold()),
                    Span::styled(
                        format!("  {} pts, {}s", v.points_per_unit, v.time_limit_seconds),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("   {}", v.description),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Choose a Game ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(highlight());

    let mut state = ListState::default();
    state.select(Some(app.cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Draw level choice (word chain) and the start prompt.
pub fn draw_setup(frame: &mut Frame, app: &GameApp, area: Rect) {
    let snap = app.snapshot();
    let levels = app.level_names();
    let title = format!(" {} ", snap.variant_name.as_deref().unwrap_or("Game"));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let summary = app.variants().iter().find(|v| Some(v.id) == snap.variant);
    let description = summary.map(|v| v.description.clone()).unwrap_or_default();
    let rules = Line::from(Span::styled(
        summary.map(rules_line).unwrap_or_default(),
        Style::default().fg(Color::DarkGray),
    ));

    if levels.is_empty() {
        let text = vec![
            Line::from(description),
            rules,
            Line::from(""),
            Line::from(Span::styled(
                "Press Enter to start",
                Style::default().fg(Color::Green).bold(),
            )),
        ];
        frame.render_widget(Paragraph::new(text).block(block).wrap(Wrap { trim: true }), area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(description).wrap(Wrap { trim: true }), chunks[0]);
    frame.render_widget(Paragraph::new(rules), chunks[1]);

    let items: Vec<ListItem> = levels
        .iter()
        .map(|name| {
            let marker = if snap.level.as_deref() == Some(name.as_str()) {
                "* "
            } else {
                "  "
            };
            ListItem::new(format!("{marker}{name}"))
        })
        .collect();
    let mut state = ListState::default();
    state.select(Some(app.cursor));
    frame.render_stateful_widget(List::new(items).highlight_style(highlight()), chunks[2], &mut state);

    let prompt = if snap.status == Status::ReadyToStart {
        Span::styled("Press Enter to start", Style::default().fg(Color::Green).bold())
    } else {
        Span::styled("Choose a level", Style::default().fg(Color::Yellow))
    };
    frame.render_widget(Paragraph::new(Line::from(prompt)), chunks[3]);
}

fn rules_line(summary: &VariantSummary) -> String {
    let mut line = format!(
        "Points per correct: {} | Time: {}s",
        summary.points_per_unit, summary.time_limit_seconds
    );
    if let Some(max) = summary.max_guesses {
        line.push_str(&format!(" | Max guesses: {max}"));
    }
    line
}
