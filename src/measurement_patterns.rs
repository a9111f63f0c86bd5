//! # Measurement Patterns Module
//!
//! This module contains the regex patterns used to recognise quantities in
//! ingredient text. Every pattern is anchored and is applied to a trimmed,
//! lower-cased candidate string.

use lazy_static::lazy_static;
use regex::Regex;

/// Numeric range such as "2-3", "1,5 - 2" or "2–3"
pub const RANGE_PATTERN: &str = r"^(\d+(?:[.,]\d+)?)\s*[-–—]\s*(\d+(?:[.,]\d+)?)$";

/// Simple fraction such as "1/2" or "3 / 4"
pub const FRACTION_PATTERN: &str = r"^(\d+)\s*[/⁄]\s*(\d+)$";

/// Whole number followed by a fraction, e.g. "1 1/2"
pub const MIXED_NUMBER_PATTERN: &str = r"^(\d+)\s+(\d+)\s*[/⁄]\s*(\d+)$";

/// Unicode vulgar fraction, optionally after a whole number: "½", "1½", "1 ½"
pub const VULGAR_FRACTION_PATTERN: &str = r"^(?:(\d+)\s*)?([½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞])$";

/// Plain number with either a dot or a comma as decimal separator
pub const DECIMAL_PATTERN: &str = r"^(?:\d+(?:[.,]\d+)?|[.,]\d+)$";

/// Number written directly against its unit, e.g. "500g" or "1,5kg"
pub const GLUED_UNIT_PATTERN: &str = r"^(\d+(?:[.,]\d+)?)(\p{L}+\.?)$";

lazy_static! {
    pub static ref RANGE_REGEX: Regex =
        Regex::new(RANGE_PATTERN).expect("Range pattern should be valid");
    pub static ref FRACTION_REGEX: Regex =
        Regex::new(FRACTION_PATTERN).expect("Fraction pattern should be valid");
    pub static ref MIXED_NUMBER_REGEX: Regex =
        Regex::new(MIXED_NUMBER_PATTERN).expect("Mixed number pattern should be valid");
    pub static ref VULGAR_FRACTION_REGEX: Regex =
        Regex::new(VULGAR_FRACTION_PATTERN).expect("Vulgar fraction pattern should be valid");
    pub static ref DECIMAL_REGEX: Regex =
        Regex::new(DECIMAL_PATTERN).expect("Decimal pattern should be valid");
    pub static ref GLUED_UNIT_REGEX: Regex =
        Regex::new(GLUED_UNIT_PATTERN).expect("Glued unit pattern should be valid");
    /// Whitespace-delimited tokens of an ingredient line
    pub static ref TOKEN_REGEX: Regex = Regex::new(r"\S+").expect("Token pattern should be valid");
}

/// Numeric value of a single Unicode vulgar fraction character
pub fn vulgar_fraction_value(c: char) -> Option<f64> {
    let value = match c {
        '½' => 1.0 / 2.0,
        '⅓' => 1.0 / 3.0,
        '⅔' => 2.0 / 3.0,
        '¼' => 1.0 / 4.0,
        '¾' => 3.0 / 4.0,
        '⅕' => 1.0 / 5.0,
        '⅖' => 2.0 / 5.0,
        '⅗' => 3.0 / 5.0,
        '⅘' => 4.0 / 5.0,
        '⅙' => 1.0 / 6.0,
        '⅚' => 5.0 / 6.0,
        '⅛' => 1.0 / 8.0,
        '⅜' => 3.0 / 8.0,
        '⅝' => 5.0 / 8.0,
        '⅞' => 7.0 / 8.0,
        _ => return None,
    };
    Some(value)
}
