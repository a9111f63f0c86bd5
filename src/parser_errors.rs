//! # Parser Error Types Module
//!
//! This module defines the error types returned by the ingredient parser and by
//! vocabulary/configuration loading. Parsing never panics on user input: every
//! failure is surfaced as one of these values.

/// Errors that can occur while resolving a single ingredient line
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The line was empty, whitespace-only or missing altogether
    BlankInput,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::BlankInput => {
                write!(f, "Ingredient line is empty: nothing to parse")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Errors raised while loading or validating parser configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// The configuration source could not be read
    Read(String),
    /// The configuration source is not valid JSON for the expected shape
    Parse(String),
    /// The configuration was read but violates a constraint
    Validation(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Read(msg) => write!(f, "Configuration read error: {msg}"),
            ConfigError::Parse(msg) => write!(f, "Configuration parse error: {msg}"),
            ConfigError::Validation(msg) => write!(f, "Configuration validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
