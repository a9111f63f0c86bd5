//! # Parsed Product Data Model
//!
//! This module defines the structured records produced by the ingredient
//! parser: a single `ParsedProduct` per line and a `ParsedDocument` for a whole
//! ingredient list (spreadsheet column, pasted recipe, ...).
//!
//! ## Core Concepts
//!
//! - **ParsedProduct**: name, quantity and unit of one ingredient, plus the verbatim input
//! - **Custom unit**: no catalog unit matched; the raw token stays in the name and the
//!   product is flagged for review
//! - **ParsedDocument**: ordered per-line outcomes of a batch, with summary counters
//!
//! ## Usage
//!
//! ```rust
//! use nutrilog_parser::ingredient_model::ParsedProduct;
//!
//! let flour = ParsedProduct::new("mąki", 2.0, "szklanka", "2 szklanki mąki");
//! assert!(!flour.has_custom_unit);
//! assert_eq!(flour.to_string(), "2 szklanka mąki");
//! ```

use crate::parser_errors::ParseError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of resolving a single ingredient line
pub type ParsingResult = Result<ParsedProduct, ParseError>;

/// A structured ingredient resolved from one line of text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedProduct {
    /// Ingredient name (e.g. "mąki pszennej")
    pub name: String,

    /// Finite, non-negative quantity; 1.0 when the line carried none
    pub quantity: f64,

    /// Canonical unit code, or an empty string when no unit was recognised
    pub unit: String,

    /// The input line exactly as received
    pub original: String,

    /// True when no catalog unit matched and the product needs review
    pub has_custom_unit: bool,
}

impl ParsedProduct {
    /// A product whose unit was found in the catalog
    pub fn new(name: &str, quantity: f64, unit: &str, original: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            quantity,
            unit: unit.to_string(),
            original: original.to_string(),
            has_custom_unit: false,
        }
    }

    /// A best-effort product without a recognised unit
    pub fn with_custom_unit(name: &str, quantity: f64, original: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            quantity,
            unit: String::new(),
            original: original.to_string(),
            has_custom_unit: true,
        }
    }

    pub fn has_unit(&self) -> bool {
        !self.unit.is_empty()
    }
}

/// Outcome recorded for one line of a document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LineOutcome {
    Parsed { product: ParsedProduct },
    Failed { error: String },
}

/// One non-blank line of a document and what became of it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedLine {
    /// 1-based line number in the source text
    pub line_number: usize,
    #[serde(flatten)]
    pub outcome: LineOutcome,
}

impl ParsedLine {
    pub fn from_result(line_number: usize, result: ParsingResult) -> Self {
        let outcome = match result {
            Ok(product) => LineOutcome::Parsed { product },
            Err(err) => LineOutcome::Failed {
                error: err.to_string(),
            },
        };
        Self {
            line_number,
            outcome,
        }
    }

    pub fn product(&self) -> Option<&ParsedProduct> {
        match &self.outcome {
            LineOutcome::Parsed { product } => Some(product),
            LineOutcome::Failed { .. } => None,
        }
    }
}

/// Results of parsing a whole ingredient list, in source order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Original raw text that was parsed
    pub source: String,

    /// One entry per non-blank source line
    pub lines: Vec<ParsedLine>,

    /// When the document was parsed
    pub parsed_at: DateTime<Utc>,
}

impl ParsedDocument {
    pub fn new(source: String) -> Self {
        Self {
            source,
            lines: Vec::new(),
            parsed_at: Utc::now(),
        }
    }

    pub fn push(&mut self, line: ParsedLine) {
        self.lines.push(line);
    }

    /// Successfully parsed products, in source order
    pub fn products(&self) -> impl Iterator<Item = &ParsedProduct> {
        self.lines.iter().filter_map(ParsedLine::product)
    }

    /// Line numbers and messages of failed lines
    pub fn failures(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().filter_map(|line| match &line.outcome {
            LineOutcome::Failed { error } => Some((line.line_number, error.as_str())),
            LineOutcome::Parsed { .. } => None,
        })
    }

    pub fn parsed_count(&self) -> usize {
        self.products().count()
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// Products parsed on a best-effort basis that a human should check
    pub fn needs_review_count(&self) -> usize {
        self.products().filter(|p| p.has_custom_unit).count()
    }

    /// Share of lines that produced a product
    pub fn success_rate(&self) -> f32 {
        if self.lines.is_empty() {
            return 1.0;
        }
        self.parsed_count() as f32 / self.lines.len() as f32
    }
}

impl fmt::Display for ParsedProduct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // f64 `Display` already prints whole values without a fraction
        write!(f, "{}", self.quantity)?;
        if self.has_unit() {
            write!(f, " {}", self.unit)?;
        }
        if !self.name.is_empty() {
            write!(f, " {}", self.name)?;
        }
        if self.has_custom_unit {
            write!(f, " (?)")?;
        }
        Ok(())
    }
}

impl fmt::Display for ParsedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Parsed products ({} parsed, {} to review, {} failed, {:.1}% success):",
            self.parsed_count(),
            self.needs_review_count(),
            self.failed_count(),
            self.success_rate() * 100.0
        )?;

        for line in &self.lines {
            match &line.outcome {
                LineOutcome::Parsed { product } => {
                    writeln!(f, "  {:>3}. {}", line.line_number, product)?
                }
                LineOutcome::Failed { error } => {
                    writeln!(f, "  {:>3}! {}", line.line_number, error)?
                }
            }
        }

        Ok(())
    }
}
