//! Emoji pictionary: name each phrase from its emojis.

use std::collections::VecDeque;

use crate::catalog::Phrase;
use crate::session::state::{Feedback, Outcome, Score, Verdict};

/// Progress through an emoji phrase queue.
#[derive(Debug, Clone)]
pub struct EmojiRound {
    queue: VecDeque<Phrase>,
    total: usize,
    points_per_unit: u32,
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

impl EmojiRound {
    /// A round over `phrases`, front to back.
    pub fn new(phrases: &[Phrase], points_per_unit: u32) -> Self {
        Self {
            queue: phrases.iter().cloned().collect(),
            total: phrases.len(),
            points_per_unit,
        }
    }

    /// The phrase being guessed.
    pub fn current(&self) -> Option<&Phrase> {
        self.queue.front()
    }

    /// One-based position of the current phrase.
    pub fn number(&self) -> usize {
        self.total - self.queue.len() + 1
    }

    /// Number of phrases in the round.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Compare `text` to the current phrase, ignoring case and outer whitespace.
    ///
    /// A wrong guess leaves the phrase in place; a right one moves on.
    pub fn submit(&mut self, text: &str, score: &mut Score) -> Feedback {
        let Some(phrase) = self.queue.front() else {
            return Feedback::finished(Verdict::Incorrect, 0, Outcome::Won);
        };
        if normalize(text) != normalize(&phrase.answer) {
            return Feedback::pending(Verdict::Incorrect, 0);
        }

        self.queue.pop_front();
        score.award(self.points_per_unit);
        if self.queue.is_empty() {
            Feedback::finished(Verdict::Correct, self.points_per_unit, Outcome::Won)
        } else {
            Feedback::pending(Verdict::Correct, self.points_per_unit)
        }
    }
}
