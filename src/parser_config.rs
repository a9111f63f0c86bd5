//! # Parser Configuration Module
//!
//! Runtime settings for the batch parser, read from environment variables
//! (optionally populated from a `.env` file by the binary).

use crate::parser_errors::ConfigError;
use crate::vocabulary::Vocabulary;
use std::path::PathBuf;
use std::str::FromStr;

pub const VOCABULARY_PATH_VAR: &str = "NUTRILOG_VOCABULARY_PATH";
pub const WORKERS_VAR: &str = "NUTRILOG_PARSER_WORKERS";
pub const OUTPUT_FORMAT_VAR: &str = "NUTRILOG_OUTPUT_FORMAT";
pub const LOG_FORMAT_VAR: &str = "NUTRILOG_LOG_FORMAT";

pub const DEFAULT_WORKERS: usize = 1;

/// How parsed documents are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(ConfigError::Validation(format!(
                "{} must be 'json' or 'text', got '{}'",
                OUTPUT_FORMAT_VAR, other
            ))),
        }
    }
}

/// How log records are written to stderr
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ConfigError::Validation(format!(
                "{} must be 'text' or 'json', got '{}'",
                LOG_FORMAT_VAR, other
            ))),
        }
    }
}

/// Configuration structure for batch parsing
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParserConfig {
    /// Vocabulary file to load instead of the embedded Polish one
    pub vocabulary_path: Option<PathBuf>,
    /// Worker threads used for batch parsing
    pub workers: usize,
    pub output_format: OutputFormat,
    pub log_format: LogFormat,
}

impl ParserConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let workers = match lookup(WORKERS_VAR) {
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| {
                ConfigError::Validation(format!("{} '{}' is not a number: {}", WORKERS_VAR, raw, e))
            })?,
            None => DEFAULT_WORKERS,
        };

        let config = Self {
            vocabulary_path: lookup(VOCABULARY_PATH_VAR).map(PathBuf::from),
            workers,
            output_format: lookup(OUTPUT_FORMAT_VAR)
                .map(|raw| raw.parse::<OutputFormat>())
                .transpose()?
                .unwrap_or_default(),
            log_format: lookup(LOG_FORMAT_VAR)
                .map(|raw| raw.parse::<LogFormat>())
                .transpose()?
                .unwrap_or_default(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Validation(format!(
                "{} must be greater than 0",
                WORKERS_VAR
            )));
        }

        if let Some(path) = &self.vocabulary_path {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{} cannot be empty if provided",
                    VOCABULARY_PATH_VAR
                )));
            }
        }

        Ok(())
    }

    /// The configured vocabulary, or the embedded one when no path is set
    pub fn load_vocabulary(&self) -> Result<Vocabulary, ConfigError> {
        match &self.vocabulary_path {
            Some(path) => Vocabulary::load(path),
            None => Ok(Vocabulary::polish()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ParserConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.vocabulary_path, None);
        assert_eq!(config.workers, DEFAULT_WORKERS);
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn test_all_values_read() {
        let config = ParserConfig::from_lookup(lookup_from(&[
            (VOCABULARY_PATH_VAR, "/etc/nutrilog/vocabulary.json"),
            (WORKERS_VAR, " 4 "),
            (OUTPUT_FORMAT_VAR, "TEXT"),
            (LOG_FORMAT_VAR, "json"),
        ]))
        .unwrap();
        assert_eq!(
            config.vocabulary_path,
            Some(PathBuf::from("/etc/nutrilog/vocabulary.json"))
        );
        assert_eq!(config.workers, 4);
        assert_eq!(config.output_format, OutputFormat::Text);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_rejected() {
        for pairs in [
            [(WORKERS_VAR, "0")],
            [(WORKERS_VAR, "many")],
            [(OUTPUT_FORMAT_VAR, "xml")],
            [(LOG_FORMAT_VAR, "yaml")],
            [(VOCABULARY_PATH_VAR, "")],
        ] {
            let result = ParserConfig::from_lookup(lookup_from(&pairs));
            assert!(
                matches!(result, Err(ConfigError::Validation(_))),
                "expected validation error for {:?}",
                pairs
            );
        }
    }

    #[test]
    fn test_load_embedded_vocabulary() {
        let config = ParserConfig {
            workers: 1,
            ..Default::default()
        };
        let vocabulary = config.load_vocabulary().unwrap();
        assert!(vocabulary.units.detect_unit("szklanki").matched);
    }
}
