//! Read-only views of a session for rendering.

use serde::Serialize;

use crate::catalog::VariantId;
use crate::session::state::{Outcome, SessionId, Status};

/// The variant-specific part of the play screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PlayView {
    /// The current trivia question.
    #[serde(rename_all = "camelCase")]
    Trivia {
        /// Question text.
        question: String,
        /// Options in display order.
        options: Vec<String>,
        /// One-based question number.
        number: usize,
        /// Number of questions.
        total: usize,
    },
    /// The hidden word.
    #[serde(rename_all = "camelCase")]
    WordChain {
        /// Category hint.
        category: String,
        /// Word with unguessed letters as `_`.
        masked: String,
        /// Wrong guesses left.
        guesses_left: u32,
        /// Wrong guesses allowed.
        max_guesses: u32,
    },
    /// The current emoji phrase.
    #[serde(rename_all = "camelCase")]
    EmojiPictionary {
        /// Emoji glyphs.
        emoji: String,
        /// One-based phrase number.
        number: usize,
        /// Number of phrases.
        total: usize,
    },
}

/// Everything a front end needs to draw the widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    /// Lifecycle status.
    pub status: Status,
    /// Selected variant.
    pub variant: Option<VariantId>,
    /// Display name of the selected variant.
    pub variant_name: Option<String>,
    /// Selected word-chain level, canonical spelling.
    pub level: Option<String>,
    /// Points so far.
    pub score: u32,
    /// Seconds left; set only while ready or running.
    pub time_remaining: Option<u32>,
    /// Play screen content; set only while running.
    pub view: Option<PlayView>,
    /// Word-chain letters guessed so far, sorted.
    pub guessed_letters: Vec<char>,
    /// Result of the session.
    pub outcome: Outcome,
    /// The hidden word, once a word-chain session is over.
    pub revealed_word: Option<String>,
    /// The current play-through.
    pub session: Option<SessionId>,
}

impl SessionSnapshot {
    /// Snapshot of a controller with nothing selected.
    pub fn idle() -> Self {
        Self {
            status: Status::NoneSelected,
            variant: None,
            variant_name: None,
            level: None,
            score: 0,
            time_remaining: None,
            view: None,
            guessed_letters: Vec::new(),
            outcome: Outcome::Undetermined,
            revealed_word: None,
            session: None,
        }
    }

    /// Whether the controller is accepting player input.
    pub fn is_running(&self) -> bool {
        self.status == Status::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_snapshot_serializes() {
        let value = serde_json::to_value(SessionSnapshot::idle()).unwrap();
        assert_eq!(value["status"], "none-selected");
        assert_eq!(value["outcome"], "undetermined");
        assert!(value["timeRemaining"].is_null());
    }

    #[test]
    fn view_is_tagged() {
        let view = PlayView::WordChain {
            category: "Animals".into(),
            masked: "C__".into(),
            guesses_left: 5,
            max_guesses: 6,
        };
        let value = serde_json::to_value(view).unwrap();
        assert_eq!(value["kind"], "word-chain");
        assert_eq!(value["guessesLeft"], 5);
    }
}
