//! # Ingredient Parser
//!
//! This module turns raw ingredient lines into structured products. Each line
//! goes through three stages:
//!
//! 1. quantity extraction (`QuantityExtractor`)
//! 2. unit detection on the token after the quantity (`UnitCatalog`)
//! 3. product resolution with fallbacks for missing quantity or unknown unit
//!
//! Only blank input is a failure. Everything else resolves to a product, with
//! `has_custom_unit` marking best-effort results.
//!
//! ## Usage
//!
//! ```rust
//! use nutrilog_parser::ingredient_parser::parse_ingredient_list;
//!
//! let text = "2 szklanki mąki\n1 1/2 łyżki cukru\njajko";
//! let document = parse_ingredient_list(text);
//!
//! for product in document.products() {
//!     println!("{}", product);
//! }
//! ```

use crate::ingredient_model::{ParsedDocument, ParsedLine, ParsedProduct, ParsingResult};
use crate::measurement_types::{QuantityInfo, UnitDetectionResult};
use crate::parser_errors::ParseError;
use crate::vocabulary::Vocabulary;
use lazy_static::lazy_static;
use std::num::NonZeroUsize;
use std::thread;
use tracing::{debug, info, trace};

/// Quantity assumed when a line carries none
pub const DEFAULT_QUANTITY: f64 = 1.0;

lazy_static! {
    static ref DEFAULT_PARSER: IngredientParser = IngredientParser::default();
}

/// Parse a single ingredient line with the embedded Polish vocabulary
pub fn parse_ingredient_line(line: &str) -> ParsingResult {
    DEFAULT_PARSER.resolve(line)
}

/// Parse a full ingredient list with the embedded Polish vocabulary
pub fn parse_ingredient_list(text: &str) -> ParsedDocument {
    DEFAULT_PARSER.parse_document(text)
}

/// Resolves ingredient lines against an immutable vocabulary
///
/// The parser holds no mutable state and can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct IngredientParser {
    vocabulary: Vocabulary,
}

impl IngredientParser {
    pub fn new(vocabulary: Vocabulary) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn parse_quantity(&self, input: &str) -> Option<f64> {
        self.vocabulary.quantities.parse_quantity(input)
    }

    pub fn extract_quantity(&self, line: &str) -> QuantityInfo {
        self.vocabulary.quantities.extract_quantity(line)
    }

    pub fn detect_unit(&self, candidate: &str) -> UnitDetectionResult {
        self.vocabulary.units.detect_unit(candidate)
    }

    /// Resolve one ingredient line into a product
    ///
    /// # Examples
    ///
    /// ```rust
    /// use nutrilog_parser::ingredient_parser::IngredientParser;
    ///
    /// let parser = IngredientParser::default();
    ///
    /// let flour = parser.resolve("2 szklanki mąki").unwrap();
    /// assert_eq!(flour.quantity, 2.0);
    /// assert_eq!(flour.unit, "szklanka");
    /// assert_eq!(flour.name, "mąki");
    ///
    /// let egg = parser.resolve("jajko").unwrap();
    /// assert_eq!(egg.quantity, 1.0);
    /// assert!(egg.has_custom_unit);
    ///
    /// assert!(parser.resolve("   ").is_err());
    /// ```
    pub fn resolve(&self, original: &str) -> ParsingResult {
        if original.trim().is_empty() {
            debug!("Rejecting blank ingredient line");
            return Err(ParseError::BlankInput);
        }

        let info = self.extract_quantity(original);
        let Some(quantity) = info.quantity.filter(|_| info.success) else {
            trace!("No quantity in '{}', defaulting to {}", original, DEFAULT_QUANTITY);
            return Ok(ParsedProduct::with_custom_unit(
                original.trim(),
                DEFAULT_QUANTITY,
                original,
            ));
        };

        let potential_unit = info.potential_unit.as_deref().unwrap_or("");
        let detection = self.detect_unit(potential_unit);

        let product = match detection.unit {
            Some(unit) if detection.matched => {
                ParsedProduct::new(&info.remaining_text, quantity, &unit, original)
            }
            _ => {
                let name = format!("{} {}", potential_unit, info.remaining_text);
                ParsedProduct::with_custom_unit(&name, quantity, original)
            }
        };

        trace!("Resolved '{}' -> {:?}", original, product);
        Ok(product)
    }

    /// Resolve a cell that may be missing altogether
    pub fn resolve_optional(&self, original: Option<&str>) -> ParsingResult {
        match original {
            Some(line) => self.resolve(line),
            None => Err(ParseError::BlankInput),
        }
    }

    /// Resolve every line, keeping input order and one result per line
    pub fn parse_lines<'a, I>(&self, lines: I) -> Vec<ParsingResult>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines.into_iter().map(|line| self.resolve(line)).collect()
    }

    /// Same output as [`parse_lines`](Self::parse_lines), spread over worker threads
    ///
    /// Lines are split into contiguous chunks, one per worker, and the chunk
    /// results are concatenated in order.
    pub fn parse_lines_parallel(&self, lines: &[&str], workers: usize) -> Vec<ParsingResult> {
        let workers = worker_count(workers, lines.len());
        if workers == 1 {
            return self.parse_lines(lines.iter().copied());
        }

        let chunk_size = lines.len().div_ceil(workers);
        debug!(
            "Parsing {} lines on {} workers ({} lines per chunk)",
            lines.len(),
            workers,
            chunk_size
        );

        thread::scope(|scope| {
            let handles: Vec<_> = lines
                .chunks(chunk_size)
                .map(|chunk| scope.spawn(move || self.parse_lines(chunk.iter().copied())))
                .collect();

            handles
                .into_iter()
                .flat_map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect()
        })
    }

    /// Parse a multi-line ingredient list, skipping blank lines
    pub fn parse_document(&self, text: &str) -> ParsedDocument {
        self.parse_document_with_workers(text, 1)
    }

    /// Parse a multi-line ingredient list on up to `workers` threads
    pub fn parse_document_with_workers(&self, text: &str, workers: usize) -> ParsedDocument {
        let (line_numbers, lines): (Vec<usize>, Vec<&str>) = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| (i + 1, line))
            .unzip();

        let results = self.parse_lines_parallel(&lines, workers);

        let mut document = ParsedDocument::new(text.to_string());
        for (line_number, result) in line_numbers.into_iter().zip(results) {
            document.push(ParsedLine::from_result(line_number, result));
        }

        info!(
            "Parsed {} products ({} to review), {} failed lines, {:.1}% success",
            document.parsed_count(),
            document.needs_review_count(),
            document.failed_count(),
            document.success_rate() * 100.0
        );

        document
    }
}

/// Threads actually spawned: at least one, never more than the lines or the
/// cores available
fn worker_count(requested: usize, lines: usize) -> usize {
    let cores = thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1);
    requested.min(cores).min(lines).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_parser() -> IngredientParser {
        IngredientParser::new(Vocabulary::polish())
    }

    #[test]
    fn test_parse_cup_of_flour() {
        let product = create_parser().resolve("2 szklanki mąki").unwrap();
        assert_eq!(product.quantity, 2.0);
        assert_eq!(product.unit, "szklanka");
        assert_eq!(product.name, "mąki");
        assert_eq!(product.original, "2 szklanki mąki");
        assert!(!product.has_custom_unit);
    }

    #[test]
    fn test_parse_without_quantity() {
        let product = create_parser().resolve("jajko").unwrap();
        assert_eq!(product.quantity, 1.0);
        assert_eq!(product.name, "jajko");
        assert_eq!(product.unit, "");
        assert!(product.has_custom_unit);
    }

    #[test]
    fn test_parse_mixed_number() {
        let product = create_parser().resolve("1 1/2 łyżki cukru").unwrap();
        assert_eq!(product.quantity, 1.5);
        assert_eq!(product.unit, "łyżka");
        assert_eq!(product.name, "cukru");
    }

    #[test]
    fn test_unknown_unit_folded_into_name() {
        let product = create_parser().resolve("3 foobar mleka").unwrap();
        assert_eq!(product.quantity, 3.0);
        assert_eq!(product.unit, "");
        assert_eq!(product.name, "foobar mleka");
        assert!(product.has_custom_unit);
    }

    #[test]
    fn test_quantity_with_noun_only() {
        let product = create_parser().resolve("3 jajka").unwrap();
        assert_eq!(product.quantity, 3.0);
        assert_eq!(product.name, "jajka");
        assert!(product.has_custom_unit);
    }

    #[test]
    fn test_blank_input_fails() {
        let parser = create_parser();
        for input in ["", "   ", "\t\n"] {
            let err = parser.resolve(input).unwrap_err();
            assert_eq!(err, ParseError::BlankInput);
            assert!(!err.to_string().is_empty());
        }
        assert!(parser.resolve_optional(None).is_err());
        assert!(parser.resolve_optional(Some("jajko")).is_ok());
    }

    #[test]
    fn test_original_is_kept_verbatim() {
        let product = create_parser().resolve("  2 szklanki  mąki ").unwrap();
        assert_eq!(product.original, "  2 szklanki  mąki ");
        assert_eq!(product.name, "mąki");

        let product = create_parser().resolve(" jajko ").unwrap();
        assert_eq!(product.original, " jajko ");
        assert_eq!(product.name, "jajko");
    }

    #[test]
    fn test_zero_denominator_falls_back_to_default_quantity() {
        let product = create_parser().resolve("3/0 szklanki mąki").unwrap();
        assert_eq!(product.quantity, 1.0);
        assert_eq!(product.name, "3/0 szklanki mąki");
        assert!(product.has_custom_unit);
    }

    #[test]
    fn test_parse_lines_keeps_order() {
        let results = create_parser().parse_lines(vec!["2 g soli", "", "jajko"]);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().unit, "g");
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().name, "jajko");
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parser = create_parser();
        let lines = vec![
            "2 szklanki mąki",
            "1 1/2 łyżki cukru",
            "",
            "jajko",
            "500g masła",
            "pół szklanki mleka",
            "3 foobar mleka",
        ];
        let sequential = parser.parse_lines(lines.iter().copied());
        for workers in [0, 1, 2, 3, 16] {
            assert_eq!(parser.parse_lines_parallel(&lines, workers), sequential);
        }
        assert!(parser.parse_lines_parallel(&[], 4).is_empty());
    }

    #[test]
    fn test_worker_count_is_bounded() {
        let cores = thread::available_parallelism().map(NonZeroUsize::get).unwrap_or(1);
        assert_eq!(worker_count(0, 10), 1);
        assert_eq!(worker_count(4, 0), 1);
        assert_eq!(worker_count(100_000, 3), cores.min(3));
        assert_eq!(worker_count(100_000, 1_000_000), cores);
    }

    #[test]
    fn test_oversized_worker_request_matches_sequential() {
        let parser = create_parser();
        let lines: Vec<String> = (0..2_000).map(|i| format!("{} g cukru", i)).collect();
        let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
        let sequential = parser.parse_lines(lines.iter().copied());
        assert_eq!(parser.parse_lines_parallel(&lines, 100_000), sequential);
    }

    #[test]
    fn test_parse_document_skips_blank_lines() {
        let document = create_parser().parse_document("2 szklanki mąki\n\n  \njajko\n");
        assert_eq!(document.lines.len(), 2);
        assert_eq!(document.lines[0].line_number, 1);
        assert_eq!(document.lines[1].line_number, 4);
        assert_eq!(document.parsed_count(), 2);
        assert_eq!(document.needs_review_count(), 1);
    }

    #[test]
    fn test_free_functions_use_polish_vocabulary() {
        let product = parse_ingredient_line("2 łyżeczki soli").unwrap();
        assert_eq!(product.unit, "łyżeczka");

        let document = parse_ingredient_list("1 kg ziemniaków\n2 l wody");
        let units: Vec<&str> = document.products().map(|p| p.unit.as_str()).collect();
        assert_eq!(units, vec!["kg", "l"]);
    }
}
