//! Chat-side boundary of the Parley game widget.
//!
//! Composes outgoing messages for the host chat client and talks to the
//! optional emotion advisory service. Nothing in here is read by the game
//! core.

pub mod emotion;
pub mod error;
pub mod message;

pub use emotion::{EmotionAnalysis, EmotionClient};
pub use error::{ChatError, ChatResult};
pub use message::{JsonLinesSink, MessageSink, OutgoingMessage, Outbox};
