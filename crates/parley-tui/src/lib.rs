//! Terminal front end for the Parley game widget.
//!
//! Wraps a [`parley_games::SessionController`] in a ratatui screen: pick a
//! game, choose a level, play against the countdown, and see the result.

pub mod app;
pub mod shared;
pub mod terminal;
pub mod views;

pub use app::{GameApp, InputMode};
pub use terminal::run;
