//! Screen rendering, one module per screen.

pub mod log;
pub mod over;
pub mod play;
pub mod select;
pub mod status;

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use parley_games::Status;

use crate::app::GameApp;

/// Draw the whole widget.
pub fn draw(frame: &mut Frame, app: &GameApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Status header
            Constraint::Min(8),    // Screen
            Constraint::Length(8), // Message log
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    status::draw(frame, app.snapshot(), chunks[0]);

    match app.snapshot().status {
        Status::NoneSelected => select::draw_variants(frame, app, chunks[1]),
        Status::AwaitingLevel | Status::ReadyToStart => select::draw_setup(frame, app, chunks[1]),
        Status::Running => play::draw(frame, app, chunks[1]),
        Status::Over => over::draw(frame, app.snapshot(), chunks[1]),
    }

    log::draw(frame, &app.log, chunks[2]);

    let hint = Paragraph::new(app.status_hint())
        .style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(hint, chunks[3]);

    if app.show_help {
        crate::shared::draw_help_popup(frame);
    }
}
