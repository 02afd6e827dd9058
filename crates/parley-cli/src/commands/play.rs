use std::path::Path;

use parley_games::{Command, GameError, SessionController, TokioScheduler};
use parley_tui::GameApp;

pub fn run(
    catalog: Option<&Path>,
    variant: Option<&str>,
    level: Option<&str>,
    seed: Option<u64>,
) -> Result<(), String> {
    let catalog = super::load_catalog(catalog)?;

    // Reject bad presets before the terminal is taken over.
    if let Some(name) = variant {
        let def = catalog.find(name).map_err(|e| e.to_string())?;
        if let Some(level) = level
            && def.level(level).is_none()
        {
            let err = match def.levels() {
                Some(_) => GameError::InvalidLevel {
                    variant: def.id(),
                    level: level.to_string(),
                },
                None => GameError::InvalidVariant(def.id()),
            };
            return Err(err.to_string());
        }
    }

    let runtime = tokio::runtime::Runtime::new().map_err(|e| format!("runtime error: {e}"))?;
    let (scheduler, ticks) = TokioScheduler::channel(runtime.handle().clone());
    let controller = SessionController::new(
        catalog,
        Box::new(scheduler),
        super::controller_config(seed),
    );

    let mut app = GameApp::new(controller);
    if let Some(name) = variant {
        app.apply(Command::Select(name.to_string()));
    }
    if let Some(level) = level {
        app.apply(Command::Level(level.to_string()));
    }

    runtime.block_on(parley_tui::run(app, ticks))
}
