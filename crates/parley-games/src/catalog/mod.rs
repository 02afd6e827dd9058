//! The read-only registry of playable variants.
//!
//! A [`GameCatalog`] is loaded once, validated, and then shared between
//! sessions behind an `Arc`. Nothing in it is ever mutated; sessions copy
//! the content they consume.

pub mod definition;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

pub use definition::{
    GameDefinition, Phrase, Question, VariantId, VariantRules, VariantSummary, WordLevel,
};

use crate::error::{CatalogError, CatalogResult, GameError, GameResult};

/// The content shipped with the widget.
const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.json");

/// On-disk catalog layout.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    variants: Vec<GameDefinition>,
}

/// Immutable registry of game definitions.
#[derive(Debug, Clone)]
pub struct GameCatalog {
    definitions: Vec<Arc<GameDefinition>>,
}

impl GameCatalog {
    /// The built-in catalog: Trivia Battle, Word Chain, Emoji Pictionary.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_CATALOG).expect("built-in catalog is valid")
    }

    /// Build a catalog from definitions, validating them.
    pub fn from_definitions(definitions: Vec<GameDefinition>) -> CatalogResult<Self> {
        validate::validate_catalog(&definitions)?;
        Ok(Self {
            definitions: definitions.into_iter().map(Arc::new).collect(),
        })
    }

    /// Parse and validate a catalog from JSON text.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Self::from_definitions(file.variants)
    }

    /// Read, parse, and validate a catalog file.
    pub fn from_path(path: &Path) -> CatalogResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Summaries of every variant, in catalog order.
    pub fn list_variants(&self) -> Vec<VariantSummary> {
        self.definitions.iter().map(|d| d.summary()).collect()
    }

    /// Look up a variant by identifier.
    pub fn get_variant(&self, id: VariantId) -> GameResult<Arc<GameDefinition>> {
        self.definitions
            .iter()
            .find(|d| d.id() == id)
            .cloned()
            .ok_or_else(|| GameError::NotFound(id.to_string()))
    }

    /// Look up a variant by a user-supplied name such as `"word-chain"`.
    pub fn find(&self, name: &str) -> GameResult<Arc<GameDefinition>> {
        let id: VariantId = name.parse()?;
        self.get_variant(id)
    }

    /// Difficulty levels of a variant. Only word chain has levels.
    pub fn get_levels(&self, id: VariantId) -> GameResult<Vec<WordLevel>> {
        let def = self.get_variant(id)?;
        def.levels()
            .map(<[WordLevel]>::to_vec)
            .ok_or(GameError::InvalidVariant(id))
    }

    /// Number of variants.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Whether the catalog has no variants.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for GameCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_three_variants_in_order() {
        let catalog = GameCatalog::builtin();
        let ids: Vec<VariantId> = catalog.list_variants().iter().map(|s| s.id).collect();
        assert_eq!(ids, VariantId::ALL.to_vec());
    }

    #[test]
    fn builtin_catalog_content() {
        let catalog = GameCatalog::builtin();

        let trivia = catalog.get_variant(VariantId::Trivia).unwrap();
        assert_eq!(trivia.points_per_unit, 10);
        assert_eq!(trivia.time_limit_seconds, 30);

        let words = catalog.get_variant(VariantId::WordChain).unwrap();
        assert_eq!(words.points_per_unit, 15);
        assert_eq!(words.time_limit_seconds, 60);
        assert_eq!(words.max_guesses(), Some(6));

        let emoji = catalog.get_variant(VariantId::EmojiPictionary).unwrap();
        assert_eq!(emoji.points_per_unit, 20);
        assert_eq!(emoji.time_limit_seconds, 45);
        match &emoji.rules {
            VariantRules::EmojiPictionary { phrases } => assert_eq!(phrases.len(), 4),
            other => panic!("unexpected rules: {other:?}"),
        }
    }

    #[test]
    fn levels_keep_declared_order() {
        let catalog = GameCatalog::builtin();
        let levels = catalog.get_levels(VariantId::WordChain).unwrap();
        let names: Vec<&str> = levels.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["Easy", "Medium", "Hard"]);
        assert_eq!(levels[0].category, "Animals");
    }

    #[test]
    fn levels_of_other_variants_rejected() {
        let catalog = GameCatalog::builtin();
        assert_eq!(
            catalog.get_levels(VariantId::Trivia),
            Err(GameError::InvalidVariant(VariantId::Trivia))
        );
    }

    #[test]
    fn find_by_name() {
        let catalog = GameCatalog::builtin();
        assert_eq!(catalog.find("WORD_CHAIN").unwrap().name, "Word Chain");
        assert_eq!(
            catalog.find("hangman").unwrap_err(),
            GameError::NotFound("hangman".to_string())
        );
    }

    #[test]
    fn missing_variant_is_not_found() {
        let json = r#"{ "variants": [{
            "name": "Only Emoji",
            "description": "",
            "pointsPerUnit": 5,
            "timeLimitSeconds": 10,
            "rules": { "kind": "emoji-pictionary", "phrases": [{ "emoji": "🌈", "answer": "Rainbow" }] }
        }] }"#;
        let catalog = GameCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.get_variant(VariantId::Trivia).unwrap_err(),
            GameError::NotFound("trivia".to_string())
        );
        assert_eq!(
            catalog.get_levels(VariantId::WordChain).unwrap_err(),
            GameError::NotFound("word-chain".to_string())
        );
    }

    #[test]
    fn invalid_json_rejected() {
        let err = GameCatalog::from_json("{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, BUILTIN_CATALOG).unwrap();
        let catalog = GameCatalog::from_path(&path).unwrap();
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn from_path_missing_file() {
        let err = GameCatalog::from_path(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
