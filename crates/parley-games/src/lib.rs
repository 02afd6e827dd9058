//! Mini-games for a chat app: Trivia, Word Chain, and Emoji Pictionary.
//!
//! Provides a read-only game catalog, a session controller that runs one
//! game at a time under a countdown, per-variant answer evaluation, and a
//! serializable snapshot for whatever front end draws the widget.

pub mod catalog;
pub mod command;
pub mod config;
pub mod countdown;
pub mod error;
pub mod session;

pub use catalog::{GameCatalog, GameDefinition, VariantId, VariantSummary};
pub use command::{Command, Reply};
pub use config::ControllerConfig;
pub use countdown::{CountdownHandle, ManualScheduler, TickScheduler, TokioScheduler};
pub use error::{CatalogError, CatalogResult, GameError, GameResult};
pub use session::{
    Feedback, Outcome, PlayView, SessionController, SessionId, SessionSnapshot, Status,
    TickResult, Verdict,
};
