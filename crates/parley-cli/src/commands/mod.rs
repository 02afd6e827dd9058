pub mod analyze;
pub mod list;
pub mod play;
pub mod script;
pub mod show;

use std::path::Path;
use std::sync::Arc;

use parley_games::{ControllerConfig, GameCatalog};
use tracing::info;

/// Load the catalog at `path`, or the built-in one.
fn load_catalog(path: Option<&Path>) -> Result<Arc<GameCatalog>, String> {
    let catalog = match path {
        Some(path) => {
            let catalog = GameCatalog::from_path(path).map_err(|e| e.to_string())?;
            info!(path = %path.display(), variants = catalog.len(), "catalog loaded");
            catalog
        }
        None => GameCatalog::builtin(),
    };
    Ok(Arc::new(catalog))
}

/// Controller settings from the command line.
fn controller_config(seed: Option<u64>) -> ControllerConfig {
    match seed {
        Some(seed) => ControllerConfig::default().with_seed(seed),
        None => ControllerConfig::default(),
    }
}
