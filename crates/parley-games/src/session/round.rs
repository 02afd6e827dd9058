//! The per-variant state of a running session.

use rand::Rng;

use crate::catalog::{GameDefinition, VariantRules};
use crate::error::{GameError, GameResult};
use crate::session::emoji::EmojiRound;
use crate::session::snapshot::PlayView;
use crate::session::trivia::TriviaRound;
use crate::session::word_chain::WordChainRound;

/// Variant-specific progress, one arm per variant.
#[derive(Debug, Clone)]
pub enum Round {
    /// Trivia question queue.
    Trivia(TriviaRound),
    /// Word-chain hidden word.
    WordChain(WordChainRound),
    /// Emoji phrase queue.
    EmojiPictionary(EmojiRound),
}

impl Round {
    /// Set up a fresh round from a definition.
    ///
    /// Word chain draws its target uniformly from `level`'s words.
    pub fn draw(
        definition: &GameDefinition,
        level: Option<&str>,
        rng: &mut impl Rng,
    ) -> GameResult<Self> {
        let ppu = definition.points_per_unit;
        match &definition.rules {
            VariantRules::Trivia { questions } => Ok(Round::Trivia(TriviaRound::new(questions, ppu))),
            VariantRules::EmojiPictionary { phrases } => {
                Ok(Round::EmojiPictionary(EmojiRound::new(phrases, ppu)))
            }
            VariantRules::WordChain { max_guesses, .. } => {
                let id = definition.id();
                let name = level.ok_or(GameError::MissingLevel(id))?;
                let level = definition
                    .level(name)
                    .filter(|l| !l.words.is_empty())
                    .ok_or_else(|| GameError::InvalidLevel {
                        variant: id,
                        level: name.to_string(),
                    })?;
                let word = &level.words[rng.random_range(0..level.words.len())];
                Ok(Round::WordChain(WordChainRound::new(
                    word.as_str(),
                    level.category.as_str(),
                    *max_guesses,
                    ppu,
                )))
            }
        }
    }

    /// What the player sees while the round is running.
    pub fn view(&self) -> Option<PlayView> {
        match self {
            Round::Trivia(round) => round.current().map(|q| PlayView::Trivia {
                question: q.question.clone(),
                options: q.options.clone(),
                number: round.number(),
                total: round.total(),
            }),
            Round::WordChain(round) => Some(PlayView::WordChain {
                category: round.category().to_string(),
                masked: round.masked(),
                guesses_left: round.guesses_left(),
                max_guesses: round.max_guesses(),
            }),
            Round::EmojiPictionary(round) => round.current().map(|p| PlayView::EmojiPictionary {
                emoji: p.emoji.clone(),
                number: round.number(),
                total: round.total(),
            }),
        }
    }

    /// Sorted guessed letters; empty outside word chain.
    pub fn guessed_letters(&self) -> Vec<char> {
        match self {
            Round::WordChain(round) => round.guessed().iter().copied().collect(),
            _ => Vec::new(),
        }
    }

    /// The hidden word, for word chain.
    pub fn target_word(&self) -> Option<&str> {
        match self {
            Round::WordChain(round) => Some(round.target()),
            _ => None,
        }
    }
}
