//! Trivia: answer the questions in order; win by answering all correctly.

use std::collections::VecDeque;

use crate::catalog::Question;
use crate::session::state::{Feedback, Outcome, Score, Verdict};

/// Progress through a trivia question queue.
#[derive(Debug, Clone)]
pub struct TriviaRound {
    queue: VecDeque<Question>,
    total: usize,
    points_per_unit: u32,
}

impl TriviaRound {
    /// A round over `questions`, front to back.
    pub fn new(questions: &[Question], points_per_unit: u32) -> Self {
        Self {
            queue: questions.iter().cloned().collect(),
            total: questions.len(),
            points_per_unit,
        }
    }

    /// The question awaiting an answer.
    pub fn current(&self) -> Option<&Question> {
        self.queue.front()
    }

    /// One-based position of the current question.
    pub fn number(&self) -> usize {
        self.total - self.queue.len() + 1
    }

    /// Number of questions in the round.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Score needed to win: every question answered correctly.
    pub fn perfect_score(&self) -> u32 {
        let total = u32::try_from(self.total).unwrap_or(u32::MAX);
        self.points_per_unit.saturating_mul(total)
    }

    /// Judge `choice` against the current question and advance.
    pub fn answer(&mut self, choice: &str, score: &mut Score) -> Feedback {
        let Some(question) = self.queue.pop_front() else {
            return Feedback::finished(Verdict::Incorrect, 0, self.outcome(*score));
        };

        let (verdict, points) = if choice == question.answer {
            score.award(self.points_per_unit);
            (Verdict::Correct, self.points_per_unit)
        } else {
            (Verdict::Incorrect, 0)
        };

        if self.queue.is_empty() {
            Feedback::finished(verdict, points, self.outcome(*score))
        } else {
            Feedback::pending(verdict, points)
        }
    }

    fn outcome(&self, score: Score) -> Outcome {
        if score.value() == self.perfect_score() {
            Outcome::Won
        } else {
            Outcome::Lost
        }
    }
}
