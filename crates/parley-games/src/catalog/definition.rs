//! Game definitions: variant identifiers, rules, and content.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Identifies one of the playable game variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantId {
    /// Multiple-choice questions answered in order.
    Trivia,
    /// Guess a hidden word letter by letter.
    WordChain,
    /// Name the phrase shown as emojis.
    EmojiPictionary,
}

impl VariantId {
    /// All variants in display order.
    pub const ALL: [VariantId; 3] = [
        VariantId::Trivia,
        VariantId::WordChain,
        VariantId::EmojiPictionary,
    ];

    /// The stable identifier string.
    pub fn as_str(self) -> &'static str {
        match self {
            VariantId::Trivia => "trivia",
            VariantId::WordChain => "word-chain",
            VariantId::EmojiPictionary => "emoji-pictionary",
        }
    }

    /// Whether sessions of this variant need a difficulty level.
    pub fn requires_level(self) -> bool {
        matches!(self, VariantId::WordChain)
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantId {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "trivia" | "trivia-battle" => Ok(VariantId::Trivia),
            "word-chain" | "wordchain" => Ok(VariantId::WordChain),
            "emoji-pictionary" | "emoji-picto" | "emoji" => Ok(VariantId::EmojiPictionary),
            _ => Err(GameError::NotFound(s.trim().to_string())),
        }
    }
}

/// A multiple-choice trivia question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// The question text.
    pub question: String,
    /// Answer options in display order.
    pub options: Vec<String>,
    /// The correct option, matched exactly.
    pub answer: String,
}

/// One word-chain difficulty level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordLevel {
    /// Level name shown to the player (e.g. "Easy").
    pub name: String,
    /// Category hint for the words (e.g. "Animals").
    pub category: String,
    /// Candidate words, upper-case ASCII letters.
    pub words: Vec<String>,
}

/// An emoji phrase to be named.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    /// The emoji glyphs shown to the player.
    pub emoji: String,
    /// The phrase they stand for.
    pub answer: String,
}

/// Variant-specific rules and content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum VariantRules {
    /// Trivia questions, answered front to back.
    Trivia {
        /// The question queue.
        questions: Vec<Question>,
    },
    /// Hidden-word guessing.
    #[serde(rename_all = "camelCase")]
    WordChain {
        /// Wrong letters allowed before the session is lost.
        max_guesses: u32,
        /// Difficulty levels in declared order.
        levels: Vec<WordLevel>,
    },
    /// Emoji phrases, solved front to back.
    EmojiPictionary {
        /// The phrase queue.
        phrases: Vec<Phrase>,
    },
}

impl VariantRules {
    /// The variant these rules describe.
    pub fn id(&self) -> VariantId {
        match self {
            VariantRules::Trivia { .. } => VariantId::Trivia,
            VariantRules::WordChain { .. } => VariantId::WordChain,
            VariantRules::EmojiPictionary { .. } => VariantId::EmojiPictionary,
        }
    }
}

/// Immutable description of one playable variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameDefinition {
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Points per correct question, solved word, or solved phrase.
    pub points_per_unit: u32,
    /// Countdown length in seconds.
    pub time_limit_seconds: u32,
    /// Variant-specific payload.
    pub rules: VariantRules,
}

impl GameDefinition {
    /// The variant identifier.
    pub fn id(&self) -> VariantId {
        self.rules.id()
    }

    /// Word-chain levels, or `None` for other variants.
    pub fn levels(&self) -> Option<&[WordLevel]> {
        match &self.rules {
            VariantRules::WordChain { levels, .. } => Some(levels),
            _ => None,
        }
    }

    /// Find a level by name, ignoring case.
    pub fn level(&self, name: &str) -> Option<&WordLevel> {
        let name = name.trim();
        self.levels()?
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(name))
    }

    /// Word-chain wrong-guess limit, or `None` for other variants.
    pub fn max_guesses(&self) -> Option<u32> {
        match &self.rules {
            VariantRules::WordChain { max_guesses, .. } => Some(*max_guesses),
            _ => None,
        }
    }

    /// Summary row for variant selection.
    pub fn summary(&self) -> VariantSummary {
        VariantSummary {
            id: self.id(),
            name: self.name.clone(),
            description: self.description.clone(),
            points_per_unit: self.points_per_unit,
            time_limit_seconds: self.time_limit_seconds,
            requires_level: self.id().requires_level(),
            max_guesses: self.max_guesses(),
        }
    }
}

/// What the variant picker shows for one variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSummary {
    /// Variant identifier.
    pub id: VariantId,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Points per unit.
    pub points_per_unit: u32,
    /// Countdown length in seconds.
    pub time_limit_seconds: u32,
    /// Whether a level must be chosen before starting.
    pub requires_level: bool,
    /// Wrong guesses allowed, for word chain.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_guesses: Option<u32>,
}
