//! Headless command replay.
//!
//! Each non-empty line is parsed as a [`Command`] and applied to a controller
//! whose countdown only advances on explicit `tick` lines. Lines starting
//! with `#` are comments.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parley_games::{Command, ManualScheduler, SessionController};
use serde_json::json;
use tracing::debug;

pub fn run(
    catalog: Option<&Path>,
    file: Option<&Path>,
    seed: Option<u64>,
    strict: bool,
) -> Result<(), String> {
    let catalog = super::load_catalog(catalog)?;
    let source = read_source(file)?;

    let mut controller = SessionController::new(
        catalog,
        Box::new(ManualScheduler::new()),
        super::controller_config(seed),
    );
    let closed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&closed);
    controller.on_close(move || flag.store(true, Ordering::SeqCst));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut rejected = 0usize;

    for (index, raw) in source.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let result = text
            .parse::<Command>()
            .and_then(|command| controller.apply(command));
        let record = match result {
            Ok(reply) => json!({
                "line": index + 1,
                "command": text,
                "ok": true,
                "reply": reply,
                "snapshot": controller.snapshot(),
            }),
            Err(e) => {
                rejected += 1;
                debug!(line = index + 1, error = %e, "command rejected");
                json!({
                    "line": index + 1,
                    "command": text,
                    "ok": false,
                    "error": e.to_string(),
                    "snapshot": controller.snapshot(),
                })
            }
        };
        writeln!(out, "{record}").map_err(|e| format!("cannot write output: {e}"))?;

        if closed.load(Ordering::SeqCst) {
            break;
        }
    }

    if strict && rejected > 0 {
        return Err(format!(
            "{rejected} command{} rejected",
            if rejected == 1 { " was" } else { "s were" }
        ));
    }
    Ok(())
}

fn read_source(file: Option<&Path>) -> Result<String, String> {
    match file {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display())),
        _ => {
            let mut source = String::new();
            io::stdin()
                .read_to_string(&mut source)
                .map_err(|e| format!("cannot read stdin: {e}"))?;
            Ok(source)
        }
    }
}
