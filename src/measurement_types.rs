//! # Measurement Types Module
//!
//! This module defines the intermediate types passed between the quantity
//! extractor, the unit detector and the product resolver.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of scanning an ingredient line for a leading quantity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantityInfo {
    /// Whether a quantity was recognised at all
    pub success: bool,
    /// The parsed quantity, present only when `success` is true
    pub quantity: Option<f64>,
    /// The token right after the quantity, a candidate for unit matching
    pub potential_unit: Option<String>,
    /// Everything after the quantity and the candidate unit, trimmed
    pub remaining_text: String,
}

impl QuantityInfo {
    /// A successful extraction
    pub fn found(quantity: f64, potential_unit: Option<String>, remaining_text: &str) -> Self {
        Self {
            success: true,
            quantity: Some(quantity),
            potential_unit,
            remaining_text: remaining_text.trim().to_string(),
        }
    }

    /// No quantity could be recognised; the whole line is kept as remaining text
    pub fn not_found(line: &str) -> Self {
        Self {
            success: false,
            quantity: None,
            potential_unit: None,
            remaining_text: line.trim().to_string(),
        }
    }
}

/// Category of a catalog unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Weight,
    Volume,
    Piece,
    Other,
}

impl UnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Weight => "weight",
            UnitType::Volume => "volume",
            UnitType::Piece => "piece",
            UnitType::Other => "other",
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of looking a candidate token up in the unit catalog
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UnitDetectionResult {
    /// Canonical unit code, set only on a match
    pub unit: Option<String>,
    /// Unit category, set only on a match
    #[serde(rename = "type")]
    pub unit_type: Option<UnitType>,
    /// Whether the candidate matched a cataloged unit
    #[serde(rename = "match")]
    pub matched: bool,
}

impl UnitDetectionResult {
    pub fn matched(unit: &str, unit_type: UnitType) -> Self {
        Self {
            unit: Some(unit.to_string()),
            unit_type: Some(unit_type),
            matched: true,
        }
    }

    pub fn no_match() -> Self {
        Self::default()
    }
}

/// A quantity expressed in the base unit of its category (e.g. grams, millilitres)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseQuantity {
    pub quantity: f64,
    pub unit: String,
}

impl fmt::Display for BaseQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.quantity, self.unit)
    }
}
