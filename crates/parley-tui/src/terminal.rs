//! Terminal setup, teardown, and the event loop.
//!
//! Key events arrive on crossterm's async event stream and countdown ticks
//! on a channel; both are handled one at a time. Pending input is always drained before a tick, so an
//! answer typed just before the deadline is judged before the timeout.

use std::io;

use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, error};

use parley_games::SessionId;

use crate::app::GameApp;
use crate::views;

/// Launch the widget on the current terminal.
///
/// `ticks` is the receiving end of the controller's countdown channel.
pub async fn run(
    mut app: GameApp,
    ticks: mpsc::UnboundedReceiver<SessionId>,
) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let result = run_loop(&mut terminal, &mut app, EventStream::new(), ticks).await;

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Main event loop.
async fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut GameApp,
    mut events: impl Stream<Item = io::Result<Event>> + Unpin,
    mut ticks: mpsc::UnboundedReceiver<SessionId>,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|frame| views::draw(frame, app))
            .map_err(|e| format!("draw error: {e}"))?;

        if app.should_quit() {
            return Ok(());
        }

        tokio::select! {
            biased;
            event = events.next() => match event {
                Some(Ok(event)) => handle_event(app, event),
                Some(Err(e)) => {
                    error!(error = %e, "terminal input failed");
                    return Err(format!("event error: {e}"));
                }
                None => return Err("terminal input closed".to_string()),
            },
            Some(session) = ticks.recv() => app.handle_tick(session),
        }
    }
}

/// Handle a crossterm event.
fn handle_event(app: &mut GameApp, event: Event) {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
        Event::Resize(width, height) => debug!(width, height, "terminal resized"),
        _ => {}
    }
}
