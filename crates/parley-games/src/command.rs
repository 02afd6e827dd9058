//! One-line text commands and their replies.

use std::str::FromStr;

use serde::Serialize;

use crate::error::GameError;
use crate::session::{Feedback, SessionId, Status, TickResult};

/// A player or host command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `select <variant>`
    Select(String),
    /// `level <name>`
    Level(String),
    /// `start`
    Start,
    /// `answer <option>`
    Answer(String),
    /// `guess <letter>`
    Guess(char),
    /// `phrase <text>`
    Phrase(String),
    /// `tick`
    Tick,
    /// `restart`
    Restart,
    /// `exit`
    Exit,
    /// `close`
    Close,
}

impl Command {
    /// The command verb.
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Select(_) => "select",
            Command::Level(_) => "level",
            Command::Start => "start",
            Command::Answer(_) => "answer",
            Command::Guess(_) => "guess",
            Command::Phrase(_) => "phrase",
            Command::Tick => "tick",
            Command::Restart => "restart",
            Command::Exit => "exit",
            Command::Close => "close",
        }
    }
}

impl FromStr for Command {
    type Err = GameError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let (verb, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (trimmed, ""),
        };
        let unknown = || GameError::UnknownCommand(trimmed.to_string());
        let argument = || {
            if rest.is_empty() {
                Err(unknown())
            } else {
                Ok(rest.to_string())
            }
        };

        match verb.to_lowercase().as_str() {
            "select" => argument().map(Command::Select),
            "level" => argument().map(Command::Level),
            "answer" => argument().map(Command::Answer),
            "phrase" => argument().map(Command::Phrase),
            "guess" => {
                let mut chars = rest.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Command::Guess(c)),
                    _ => Err(unknown()),
                }
            }
            "start" if rest.is_empty() => Ok(Command::Start),
            "tick" if rest.is_empty() => Ok(Command::Tick),
            "restart" if rest.is_empty() => Ok(Command::Restart),
            "exit" if rest.is_empty() => Ok(Command::Exit),
            "close" if rest.is_empty() => Ok(Command::Close),
            _ => Err(unknown()),
        }
    }
}

/// What an applied command produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reply", rename_all = "kebab-case")]
pub enum Reply {
    /// The session moved to this status.
    Status {
        /// New status.
        status: Status,
    },
    /// A play-through began.
    Started {
        /// Its identifier.
        session: SessionId,
    },
    /// A player input was judged.
    Feedback(Feedback),
    /// A countdown tick was processed.
    Tick(TickResult),
    /// The widget asked its host to close.
    Closed,
}
