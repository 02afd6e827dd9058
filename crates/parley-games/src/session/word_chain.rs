//! Word chain: reveal a hidden word one letter at a time.

use std::collections::BTreeSet;

use crate::session::state::{Feedback, Outcome, Score, Verdict};

/// Normalize a guess to an upper-case ASCII letter.
pub fn normalize_letter(c: char) -> Option<char> {
    c.is_ascii_alphabetic().then(|| c.to_ascii_uppercase())
}

/// A hidden word and the letters guessed so far.
#[derive(Debug, Clone)]
pub struct WordChainRound {
    target: String,
    category: String,
    guessed: BTreeSet<char>,
    max_guesses: u32,
    points_per_unit: u32,
}

impl WordChainRound {
    /// A round hiding `target`, an upper-case word.
    pub fn new(
        target: impl Into<String>,
        category: impl Into<String>,
        max_guesses: u32,
        points_per_unit: u32,
    ) -> Self {
        Self {
            target: target.into(),
            category: category.into(),
            guessed: BTreeSet::new(),
            max_guesses,
            points_per_unit,
        }
    }

    /// The hidden word.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Category hint of the level the word came from.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Letters guessed so far, sorted.
    pub fn guessed(&self) -> &BTreeSet<char> {
        &self.guessed
    }

    /// Allowed wrong guesses.
    pub fn max_guesses(&self) -> u32 {
        self.max_guesses
    }

    /// Guessed letters that are not in the word.
    pub fn wrong_guesses(&self) -> u32 {
        let wrong = self
            .guessed
            .iter()
            .filter(|c| !self.target.contains(**c))
            .count();
        u32::try_from(wrong).unwrap_or(u32::MAX)
    }

    /// Wrong guesses left before the round is lost.
    pub fn guesses_left(&self) -> u32 {
        self.max_guesses.saturating_sub(self.wrong_guesses())
    }

    /// The word with unguessed letters shown as `_`.
    pub fn masked(&self) -> String {
        self.target
            .chars()
            .map(|c| if self.guessed.contains(&c) { c } else { '_' })
            .collect()
    }

    /// Whether every letter of the word has been guessed.
    pub fn is_solved(&self) -> bool {
        self.target.chars().all(|c| self.guessed.contains(&c))
    }

    /// Record a guess of an already-normalized letter.
    pub fn guess(&mut self, letter: char, score: &mut Score) -> Feedback {
        if !self.guessed.insert(letter) {
            return Feedback::pending(Verdict::AlreadyGuessed, 0);
        }

        let verdict = if self.target.contains(letter) {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };

        if self.is_solved() {
            score.award(self.points_per_unit);
            Feedback::finished(verdict, self.points_per_unit, Outcome::Won)
        } else if self.wrong_guesses() >= self.max_guesses {
            Feedback::finished(verdict, 0, Outcome::Lost)
        } else {
            Feedback::pending(verdict, 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_letters() {
        assert_eq!(normalize_letter('c'), Some('C'));
        assert_eq!(normalize_letter('Q'), Some('Q'));
        assert_eq!(normalize_letter('3'), None);
        assert_eq!(normalize_letter('é'), None);
    }

    #[test]
    fn solving_awards_points_once() {
        let mut round = WordChainRound::new("CAT", "Animals", 6, 15);
        let mut score = Score::default();

        assert_eq!(round.guess('C', &mut score), Feedback::pending(Verdict::Correct, 0));
        assert_eq!(round.masked(), "C__");
        round.guess('A', &mut score);
        let last = round.guess('T', &mut score);

        assert_eq!(last, Feedback::finished(Verdict::Correct, 15, Outcome::Won));
        assert_eq!(score.value(), 15);
        assert_eq!(round.masked(), "CAT");
    }

    #[test]
    fn repeated_letter_changes_nothing() {
        let mut round = WordChainRound::new("DOG", "Animals", 2, 15);
        let mut score = Score::default();

        round.guess('Z', &mut score);
        let again = round.guess('Z', &mut score);
        assert_eq!(again, Feedback::pending(Verdict::AlreadyGuessed, 0));
        assert_eq!(round.guesses_left(), 1);
        assert_eq!(round.guessed().len(), 1);
    }

    #[test]
    fn running_out_of_guesses_loses() {
        let mut round = WordChainRound::new("CAT", "Animals", 3, 15);
        let mut score = Score::default();

        round.guess('X', &mut score);
        round.guess('Y', &mut score);
        let last = round.guess('Z', &mut score);

        assert_eq!(last, Feedback::finished(Verdict::Incorrect, 0, Outcome::Lost));
        assert_eq!(round.guesses_left(), 0);
        assert_eq!(score.value(), 0);
    }

    #[test]
    fn correct_guesses_do_not_cost() {
        let mut round = WordChainRound::new("BIRD", "Animals", 1, 15);
        let mut score = Score::default();
        round.guess('B', &mut score);
        round.guess('I', &mut score);
        assert_eq!(round.wrong_guesses(), 0);
        assert_eq!(round.guesses_left(), 1);
    }

    #[test]
    fn repeated_letters_in_word_revealed_together() {
        let mut round = WordChainRound::new("ALGORITHM", "Programming", 6, 15);
        let mut score = Score::default();
        round.guess('O', &mut score);
        assert_eq!(round.masked(), "___O_____");
        let mut round = WordChainRound::new("CANADA", "Countries", 6, 15);
        round.guess('A', &mut score);
        assert_eq!(round.masked(), "_A_A_A");
    }
}
