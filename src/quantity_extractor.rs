//! # Quantity Extractor
//!
//! Recognises the leading quantity of an ingredient line. Supported forms, in
//! order of precedence:
//!
//! - quantity words from the vocabulary ("pół", "półtorej", "dwa", ...)
//! - ranges ("2-3", "1,5 - 2"), reduced to their mean
//! - fractions ("1/2")
//! - mixed numbers ("1 1/2")
//! - Unicode vulgar fractions ("½", "1½")
//! - plain decimals with a dot or a comma ("2.5", "2,5")
//!
//! Malformed numbers never produce an error: they are reported as "no match".

use crate::measurement_patterns::{
    vulgar_fraction_value, DECIMAL_REGEX, FRACTION_REGEX, GLUED_UNIT_REGEX, MIXED_NUMBER_REGEX,
    RANGE_REGEX, TOKEN_REGEX, VULGAR_FRACTION_REGEX,
};
use crate::measurement_types::QuantityInfo;
use crate::parser_errors::ConfigError;
use regex::Match;
use std::collections::HashMap;
use tracing::trace;

/// A quantity never spans more than four tokens ("1 1 / 2")
const MAX_QUANTITY_TOKENS: usize = 4;

/// Table of quantity words and their numeric values, keyed by lower-cased word
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuantityWords {
    words: HashMap<String, f64>,
}

impl QuantityWords {
    /// Build the table, normalising keys and rejecting unusable values
    pub fn new(words: HashMap<String, f64>) -> Result<Self, ConfigError> {
        let mut normalized = HashMap::with_capacity(words.len());
        for (word, value) in words {
            let key = word.trim().to_lowercase();
            if key.is_empty() {
                return Err(ConfigError::Validation(
                    "quantity word cannot be empty".to_string(),
                ));
            }
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "quantity word '{}' has invalid value {}",
                    key, value
                )));
            }
            normalized.insert(key, value);
        }
        Ok(Self { words: normalized })
    }

    pub fn get(&self, word: &str) -> Option<f64> {
        self.words.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Parses quantities from isolated tokens and from full ingredient lines
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QuantityExtractor {
    words: QuantityWords,
}

impl QuantityExtractor {
    pub fn new(words: QuantityWords) -> Self {
        Self { words }
    }

    pub fn words(&self) -> &QuantityWords {
        &self.words
    }

    /// Parse an isolated quantity token
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrilog_parser::vocabulary::Vocabulary;
    ///
    /// let vocabulary = Vocabulary::polish();
    /// let extractor = &vocabulary.quantities;
    /// assert_eq!(extractor.parse_quantity("2,5"), Some(2.5));
    /// assert_eq!(extractor.parse_quantity("1 1/2"), Some(1.5));
    /// assert_eq!(extractor.parse_quantity("pół"), Some(0.5));
    /// assert_eq!(extractor.parse_quantity("3/0"), None);
    /// ```
    pub fn parse_quantity(&self, input: &str) -> Option<f64> {
        let cleaned = input.trim().to_lowercase();
        if cleaned.is_empty() {
            return None;
        }

        if let Some(value) = self.words.get(&cleaned) {
            trace!("Quantity word '{}' -> {}", cleaned, value);
            return Some(value);
        }

        let value = if let Some(caps) = RANGE_REGEX.captures(&cleaned) {
            let min = parse_decimal(&caps[1])?;
            let max = parse_decimal(&caps[2])?;
            (min + max) / 2.0
        } else if let Some(caps) = FRACTION_REGEX.captures(&cleaned) {
            divide(&caps[1], &caps[2])?
        } else if let Some(caps) = MIXED_NUMBER_REGEX.captures(&cleaned) {
            parse_decimal(&caps[1])? + divide(&caps[2], &caps[3])?
        } else if let Some(caps) = VULGAR_FRACTION_REGEX.captures(&cleaned) {
            let whole = match caps.get(1) {
                Some(m) => parse_decimal(m.as_str())?,
                None => 0.0,
            };
            let fraction = caps[2].chars().next().and_then(vulgar_fraction_value)?;
            whole + fraction
        } else if DECIMAL_REGEX.is_match(&cleaned) {
            parse_decimal(&cleaned)?
        } else {
            return None;
        };

        trace!("Parsed quantity '{}' -> {}", cleaned, value);
        Some(value).filter(|v| v.is_finite())
    }

    /// Find the quantity at the start of a full ingredient line
    ///
    /// The token following the quantity becomes the unit candidate and the
    /// rest of the line is returned as remaining text.
    pub fn extract_quantity(&self, line: &str) -> QuantityInfo {
        let tokens: Vec<Match> = TOKEN_REGEX.find_iter(line).collect();
        let Some(first) = tokens.first() else {
            return QuantityInfo::not_found(line);
        };

        for len in (1..=MAX_QUANTITY_TOKENS.min(tokens.len())).rev() {
            let quantity_end = tokens[len - 1].end();
            let Some(quantity) = self.parse_quantity(&line[first.start()..quantity_end]) else {
                continue;
            };

            let info = match tokens.get(len) {
                Some(unit) => QuantityInfo::found(
                    quantity,
                    Some(unit.as_str().to_string()),
                    &line[unit.end()..],
                ),
                None => QuantityInfo::found(quantity, None, ""),
            };
            trace!("Extracted {:?} from '{}'", info, line);
            return info;
        }

        if let Some(caps) = GLUED_UNIT_REGEX.captures(first.as_str()) {
            if let Some(quantity) = self.parse_quantity(&caps[1]) {
                trace!("Split glued quantity '{}'", first.as_str());
                return QuantityInfo::found(
                    quantity,
                    Some(caps[2].to_string()),
                    &line[first.end()..],
                );
            }
        }

        QuantityInfo::not_found(line)
    }
}

fn parse_decimal(text: &str) -> Option<f64> {
    text.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn divide(numerator: &str, denominator: &str) -> Option<f64> {
    let numerator = parse_decimal(numerator)?;
    let denominator = parse_decimal(denominator)?;
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}
