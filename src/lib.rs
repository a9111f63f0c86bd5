//! # Nutrilog Ingredient Parser
//!
//! Turns free-text Polish ingredient lines ("2 szklanki mąki", "pół łyżeczki
//! soli", "jajko") into structured products with a quantity, a canonical unit
//! and a name, ready for shopping-list aggregation.

pub mod ingredient_model;
pub mod ingredient_parser;
pub mod measurement_patterns;
pub mod measurement_types;
pub mod parser_config;
pub mod parser_errors;
pub mod quantity_extractor;
pub mod unit_catalog;
pub mod vocabulary;

// Re-export types for easier access
pub use ingredient_model::{ParsedDocument, ParsedProduct, ParsingResult};
pub use ingredient_parser::IngredientParser;
pub use parser_config::ParserConfig;
pub use parser_errors::{ConfigError, ParseError};
pub use vocabulary::Vocabulary;
