//! Content rules checked when a catalog is loaded.

use std::collections::HashSet;

use crate::catalog::definition::{GameDefinition, Phrase, Question, VariantRules, WordLevel};
use crate::catalog::VariantId;
use crate::error::{CatalogError, CatalogResult};

/// Check every definition and reject duplicate variants.
pub fn validate_catalog(definitions: &[GameDefinition]) -> CatalogResult<()> {
    let mut seen = HashSet::new();
    for def in definitions {
        if !seen.insert(def.id()) {
            return Err(CatalogError::DuplicateVariant(def.id()));
        }
        validate_definition(def)?;
    }
    Ok(())
}

/// Check one definition's rules and content.
pub fn validate_definition(def: &GameDefinition) -> CatalogResult<()> {
    let id = def.id();
    if def.time_limit_seconds == 0 {
        return Err(CatalogError::invalid(id, "time limit must be positive"));
    }

    match &def.rules {
        VariantRules::Trivia { questions } => validate_questions(id, questions),
        VariantRules::WordChain {
            max_guesses,
            levels,
        } => {
            if *max_guesses == 0 {
                return Err(CatalogError::invalid(id, "max guesses must be positive"));
            }
            validate_levels(id, levels)
        }
        VariantRules::EmojiPictionary { phrases } => validate_phrases(id, phrases),
    }
}

fn validate_questions(id: VariantId, questions: &[Question]) -> CatalogResult<()> {
    if questions.is_empty() {
        return Err(CatalogError::invalid(id, "no questions"));
    }
    for (i, q) in questions.iter().enumerate() {
        let n = i + 1;
        if q.options.is_empty() {
            return Err(CatalogError::invalid(id, format!("question {n} has no options")));
        }
        let mut options = HashSet::new();
        for opt in &q.options {
            if !options.insert(opt.as_str()) {
                return Err(CatalogError::invalid(
                    id,
                    format!("question {n} repeats option \"{opt}\""),
                ));
            }
        }
        if !options.contains(q.answer.as_str()) {
            return Err(CatalogError::invalid(
                id,
                format!("question {n}: answer \"{}\" is not an option", q.answer),
            ));
        }
    }
    Ok(())
}

fn validate_levels(id: VariantId, levels: &[WordLevel]) -> CatalogResult<()> {
    if levels.is_empty() {
        return Err(CatalogError::invalid(id, "no levels"));
    }
    let mut names = HashSet::new();
    for level in levels {
        if !names.insert(level.name.to_lowercase()) {
            return Err(CatalogError::invalid(
                id,
                format!("duplicate level \"{}\"", level.name),
            ));
        }
        if level.words.is_empty() {
            return Err(CatalogError::invalid(
                id,
                format!("level \"{}\" has no words", level.name),
            ));
        }
        if let Some(word) = level.words.iter().find(|w| !is_upper_alpha(w)) {
            return Err(CatalogError::invalid(
                id,
                format!(
                    "level \"{}\": \"{word}\" is not an upper-case word",
                    level.name
                ),
            ));
        }
    }
    Ok(())
}

fn validate_phrases(id: VariantId, phrases: &[Phrase]) -> CatalogResult<()> {
    if phrases.is_empty() {
        return Err(CatalogError::invalid(id, "no phrases"));
    }
    if let Some(i) = phrases.iter().position(|p| p.answer.trim().is_empty()) {
        return Err(CatalogError::invalid(
            id,
            format!("phrase {} has an empty answer", i + 1),
        ));
    }
    Ok(())
}

fn is_upper_alpha(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_uppercase())
}
