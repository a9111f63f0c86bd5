//! # Unit Catalog
//!
//! A read-only table of measurement units. Every canonical code and every
//! surface synonym ("szklanka", "szklanki", "szkl", ...) is indexed in
//! lower case, so detection is a single hash lookup. Adding a unit is a
//! vocabulary change, not a code change.

use crate::measurement_types::{BaseQuantity, UnitDetectionResult, UnitType};
use crate::parser_errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

/// A catalog entry describing one canonical unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUnit {
    /// Canonical code (e.g. "g", "szklanka")
    pub value: String,
    /// Display name
    pub label: String,
    /// Unit category
    #[serde(rename = "type")]
    pub unit_type: UnitType,
    /// Base unit of the category, when the unit converts to one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_unit: Option<String>,
    /// Multiplier from this unit to `base_unit`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversion_factor: Option<f64>,
    /// Alternative spellings and inflected forms
    #[serde(default)]
    pub synonyms: Vec<String>,
}

/// Unit lookup table keyed by lower-cased surface form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UnitCatalog {
    units: Vec<ProductUnit>,
    index: HashMap<String, usize>,
}

impl UnitCatalog {
    /// Build the catalog, validating entries and indexing every surface form
    pub fn new(units: Vec<ProductUnit>) -> Result<Self, ConfigError> {
        if units.is_empty() {
            return Err(ConfigError::Validation("units cannot be empty".to_string()));
        }

        let mut index: HashMap<String, usize> = HashMap::new();
        for (position, unit) in units.iter().enumerate() {
            validate_unit(unit)?;

            let forms = std::iter::once(&unit.value).chain(unit.synonyms.iter());
            for form in forms {
                let key = form.trim().to_lowercase();
                match index.get(&key) {
                    Some(&existing) if existing != position => {
                        return Err(ConfigError::Validation(format!(
                            "synonym '{}' maps to both '{}' and '{}'",
                            key, units[existing].value, unit.value
                        )));
                    }
                    _ => {
                        index.insert(key, position);
                    }
                }
            }
        }

        Ok(Self { units, index })
    }

    /// Look a candidate token up and report the canonical unit
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrilog_parser::vocabulary::Vocabulary;
    ///
    /// let vocabulary = Vocabulary::polish();
    /// let result = vocabulary.units.detect_unit(" Szklanki ");
    /// assert!(result.matched);
    /// assert_eq!(result.unit.as_deref(), Some("szklanka"));
    /// ```
    pub fn detect_unit(&self, candidate: &str) -> UnitDetectionResult {
        match self.lookup(candidate) {
            Some(unit) => {
                trace!("Unit candidate '{}' -> '{}'", candidate, unit.value);
                UnitDetectionResult::matched(&unit.value, unit.unit_type)
            }
            None => {
                trace!("Unit candidate '{}' not cataloged", candidate);
                UnitDetectionResult::no_match()
            }
        }
    }

    /// Catalog entry for any surface form
    ///
    /// Abbreviations written with a trailing period ("łyż.") fall back to the
    /// form without it when the dotted form is not cataloged.
    pub fn lookup(&self, candidate: &str) -> Option<&ProductUnit> {
        let key = candidate.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }

        let position = self.index.get(&key).or_else(|| {
            let stripped = key.trim_end_matches('.');
            if stripped.is_empty() || stripped.len() == key.len() {
                None
            } else {
                self.index.get(stripped)
            }
        })?;
        self.units.get(*position)
    }

    /// Catalog entry for a canonical code
    pub fn get(&self, value: &str) -> Option<&ProductUnit> {
        self.units.iter().find(|unit| unit.value == value)
    }

    /// Convert a quantity expressed in `unit` to its base unit
    pub fn to_base_unit(&self, quantity: f64, unit: &str) -> Option<BaseQuantity> {
        let entry = self.lookup(unit)?;
        let base_unit = entry.base_unit.as_ref()?;
        let factor = entry.conversion_factor?;
        Some(BaseQuantity {
            quantity: quantity * factor,
            unit: base_unit.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

fn validate_unit(unit: &ProductUnit) -> Result<(), ConfigError> {
    if unit.value.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "unit '{}' has an empty value",
            unit.label
        )));
    }

    for (i, synonym) in unit.synonyms.iter().enumerate() {
        if synonym.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "{}.synonyms[{}] cannot be empty",
                unit.value, i
            )));
        }
        if synonym.chars().any(|c| c.is_control()) {
            return Err(ConfigError::Validation(format!(
                "{}.synonyms[{}] '{}' contains control characters",
                unit.value, i, synonym
            )));
        }
    }

    if let Some(factor) = unit.conversion_factor {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ConfigError::Validation(format!(
                "unit '{}' has invalid conversion factor {}",
                unit.value, factor
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(value: &str, unit_type: UnitType, factor: Option<f64>, synonyms: &[&str]) -> ProductUnit {
        ProductUnit {
            value: value.to_string(),
            label: value.to_string(),
            unit_type,
            base_unit: factor.map(|_| match unit_type {
                UnitType::Weight => "g".to_string(),
                _ => "ml".to_string(),
            }),
            conversion_factor: factor,
            synonyms: synonyms.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn create_catalog() -> UnitCatalog {
        UnitCatalog::new(vec![
            unit("g", UnitType::Weight, Some(1.0), &["gram", "gramy", "gr"]),
            unit("kg", UnitType::Weight, Some(1000.0), &["kilogram", "kilo"]),
            unit("szklanka", UnitType::Volume, Some(250.0), &["szklanki", "szkl"]),
            unit("łyżka", UnitType::Volume, Some(15.0), &["łyżki", "łyż"]),
            unit("szczypta", UnitType::Other, None, &["szczypty"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_detect_canonical_and_synonyms() {
        let catalog = create_catalog();
        for candidate in ["g", "gram", "GRAMY", " gr "] {
            let result = catalog.detect_unit(candidate);
            assert!(result.matched, "candidate '{}'", candidate);
            assert_eq!(result.unit.as_deref(), Some("g"));
            assert_eq!(result.unit_type, Some(UnitType::Weight));
        }
    }

    #[test]
    fn test_detect_polish_uppercase() {
        let catalog = create_catalog();
        let result = catalog.detect_unit("ŁYŻKI");
        assert_eq!(result.unit.as_deref(), Some("łyżka"));
    }

    #[test]
    fn test_detect_trailing_period_abbreviation() {
        let catalog = create_catalog();
        assert_eq!(catalog.detect_unit("szkl.").unit.as_deref(), Some("szklanka"));
        assert_eq!(catalog.detect_unit("łyż.").unit.as_deref(), Some("łyżka"));
        assert!(!catalog.detect_unit(".").matched);
    }

    #[test]
    fn test_detect_miss() {
        let catalog = create_catalog();
        let result = catalog.detect_unit("foobar");
        assert!(!result.matched);
        assert_eq!(result.unit, None);
        assert_eq!(result.unit_type, None);
        assert!(!catalog.detect_unit("").matched);
    }

    #[test]
    fn test_to_base_unit() {
        let catalog = create_catalog();
        let base = catalog.to_base_unit(2.0, "szklanka").unwrap();
        assert_eq!(base.quantity, 500.0);
        assert_eq!(base.unit, "ml");

        let base = catalog.to_base_unit(1.5, "kg").unwrap();
        assert_eq!(base.quantity, 1500.0);
        assert_eq!(base.unit, "g");

        assert_eq!(catalog.to_base_unit(1.0, "szczypta"), None);
        assert_eq!(catalog.to_base_unit(1.0, "foobar"), None);
    }

    #[test]
    fn test_get_by_canonical_value() {
        let catalog = create_catalog();
        assert_eq!(catalog.get("kg").map(|u| u.conversion_factor), Some(Some(1000.0)));
        assert!(catalog.get("kilo").is_none());
        assert_eq!(catalog.len(), 5);
    }

    #[test]
    fn test_conflicting_synonyms_rejected() {
        let result = UnitCatalog::new(vec![
            unit("g", UnitType::Weight, Some(1.0), &["gr"]),
            unit("garść", UnitType::Other, None, &["gr"]),
        ]);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_invalid_entries_rejected() {
        assert!(UnitCatalog::new(vec![]).is_err());
        assert!(UnitCatalog::new(vec![unit("g", UnitType::Weight, Some(0.0), &[])]).is_err());
        assert!(UnitCatalog::new(vec![unit("g", UnitType::Weight, None, &[" "])]).is_err());
        assert!(UnitCatalog::new(vec![unit("g", UnitType::Weight, None, &["g\n"])]).is_err());
        assert!(UnitCatalog::new(vec![unit(" ", UnitType::Weight, None, &[])]).is_err());
    }

    #[test]
    fn test_repeated_synonym_within_unit_is_allowed() {
        let catalog = UnitCatalog::new(vec![unit("g", UnitType::Weight, None, &["g", "G"])]);
        assert!(catalog.is_ok());
    }
}
