//! # Vocabulary Module
//!
//! The language data the parser depends on: quantity words and the unit
//! catalog. A Polish vocabulary is embedded from `config/vocabulary_pl.json`;
//! another one can be loaded from disk without touching code.

use crate::parser_errors::ConfigError;
use crate::quantity_extractor::{QuantityExtractor, QuantityWords};
use crate::unit_catalog::{ProductUnit, UnitCatalog};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Embedded default vocabulary
pub const DEFAULT_VOCABULARY_JSON: &str = include_str!("../config/vocabulary_pl.json");

lazy_static! {
    static ref POLISH_VOCABULARY: Vocabulary = Vocabulary::from_json(DEFAULT_VOCABULARY_JSON)
        .expect("Embedded vocabulary should be valid");
}

/// On-disk shape of a vocabulary file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VocabularyFile {
    #[serde(default)]
    pub quantity_words: HashMap<String, f64>,
    pub units: Vec<ProductUnit>,
}

/// Validated, immutable vocabulary shared by all parse calls
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    pub quantities: QuantityExtractor,
    pub units: UnitCatalog,
}

impl Vocabulary {
    pub fn new(quantity_words: QuantityWords, units: UnitCatalog) -> Self {
        Self {
            quantities: QuantityExtractor::new(quantity_words),
            units,
        }
    }

    /// The embedded Polish vocabulary
    pub fn polish() -> Self {
        POLISH_VOCABULARY.clone()
    }

    /// Build a vocabulary from its file representation, validating every entry
    pub fn from_file_contents(file: VocabularyFile) -> Result<Self, ConfigError> {
        let words = QuantityWords::new(file.quantity_words)?;
        let units = UnitCatalog::new(file.units)?;
        debug!(
            "Vocabulary built with {} quantity words and {} units",
            words.len(),
            units.len()
        );
        Ok(Self::new(words, units))
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: VocabularyFile = serde_json::from_str(json)?;
        Self::from_file_contents(file)
    }

    /// Load a vocabulary JSON file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        info!("Loading vocabulary from {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&content)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::polish()
    }
}
