// src/extractors/record.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::extractors::composition::{self, CompositionRow};
use crate::extractors::numeric;

// --- Label Constants ---
// Fixed markers of the XP Advisor report layout. The layout is controlled
// by a third party; these labels are the only stable anchors in it.
const TOTAL_LABEL: &str = "PATRIMÔNIO TOTAL BRUTO";
const SUMMARY_LABEL: &str = "Portf";
const BENCHMARK_PREFIX: &str = "ANO";
const COMPOSITION_HEADER: &str = "COMPOSIÇÃO";
const COMPOSITION_FOOTER: &str = "RENTABILIDADE";

// --- Regex Patterns (Lazy Static) ---
// Portfolio code embedded in the file name: marker, optional dash, digits.
static CODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"XPerformance\s*-\s*(\d+)").expect("Failed to compile CODE_RE")
});

// Percentage token as printed in the reports: digits, comma, digits, '%'.
static PERCENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+,\d+%").expect("Failed to compile PERCENT_RE")
});

// Currency token: dot-grouped digits with exactly two comma decimals,
// after an "R$" prefix. Only the numeric part is captured.
static CURRENCY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"R\$\s*([\d\.]+,\d{2})").expect("Failed to compile CURRENCY_RE")
});

// --- Data Structures ---

/// Everything extracted from one report document. Immutable once the
/// scan completes; percentage fields keep the report's own formatting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractionRecord {
    /// Opaque document identifier as supplied by the caller (file name).
    pub source_name: String,
    /// Portfolio code parsed from the identifier, empty when absent.
    pub code: String,
    /// Monthly return percentage as printed, e.g. "1,23%".
    pub monthly_return: Option<String>,
    /// Yearly return percentage as printed.
    pub yearly_return: Option<String>,
    /// Yearly return as a percentage of the CDI benchmark.
    pub benchmark_ratio_yearly: Option<String>,
    /// Composition table rows, in source order.
    pub composition: Vec<CompositionRow>,
    /// Buffered composition lines that did not yield a row.
    pub rows_discarded: usize,
}

impl ExtractionRecord {
    /// True when the scan produced at least one populated field.
    pub fn has_any_field(&self) -> bool {
        !self.code.is_empty()
            || self.monthly_return.is_some()
            || self.yearly_return.is_some()
            || self.benchmark_ratio_yearly.is_some()
            || !self.composition.is_empty()
    }
}

/// Capture state for the composition block. A line containing the section
/// header enters `InComposition`; a line containing the closing label
/// leaves it. Neither boundary line is buffered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Normal,
    InComposition,
}

// --- Main Extractor Structure ---
pub struct ReportExtractor;

impl ReportExtractor {
    pub fn new() -> Self {
        Self {}
    }

    /// Scans one document's text and returns its record. The scan is a
    /// single pass in source line order and never fails: missing labels
    /// or malformed tokens leave the corresponding fields absent.
    pub fn extract(&self, source_name: &str, text: &str) -> ExtractionRecord {
        let code = parse_code(source_name);

        let mut monthly_return: Option<String> = None;
        let mut yearly_return: Option<String> = None;
        let mut benchmark_ratio_yearly: Option<String> = None;
        let mut portfolio_total = 0.0_f64;
        let mut composition_lines: Vec<String> = Vec::new();
        let mut state = ScanState::Normal;

        for line in text.lines() {
            let upper = line.to_uppercase();

            // The per-line checks below are independent of one another and
            // of the capture state; a single line may satisfy several.

            if upper.contains(TOTAL_LABEL) {
                if let Some(caps) = CURRENCY_RE.captures(line) {
                    if let Some(total) = numeric::parse_decimal_br(&caps[1]) {
                        portfolio_total = total;
                        tracing::debug!(
                            "Found portfolio total {} in {}",
                            portfolio_total,
                            source_name
                        );
                    }
                }
            }

            if line.contains(SUMMARY_LABEL) {
                let tokens = percent_tokens(line);
                if tokens.len() >= 2 {
                    monthly_return = Some(tokens[0].clone());
                    yearly_return = Some(tokens[1].clone());
                }
            }

            if line.trim_start().starts_with(BENCHMARK_PREFIX) {
                let tokens = percent_tokens(line);
                if tokens.len() >= 2 {
                    benchmark_ratio_yearly = Some(tokens[1].clone());
                }
            }

            state = match state {
                ScanState::Normal => {
                    if upper.contains(COMPOSITION_HEADER) {
                        ScanState::InComposition
                    } else {
                        ScanState::Normal
                    }
                }
                ScanState::InComposition => {
                    if upper.contains(COMPOSITION_HEADER) {
                        // A repeated section header is still a header, not
                        // table data.
                        ScanState::InComposition
                    } else if upper.contains(COMPOSITION_FOOTER) {
                        ScanState::Normal
                    } else {
                        composition_lines.push(line.trim().to_string());
                        ScanState::InComposition
                    }
                }
            };
        }

        let (composition, rows_discarded) =
            composition::build_rows(&composition_lines, portfolio_total);

        if rows_discarded > 0 {
            tracing::debug!(
                "Discarded {} composition line(s) in {}",
                rows_discarded,
                source_name
            );
        }

        ExtractionRecord {
            source_name: source_name.to_string(),
            code,
            monthly_return,
            yearly_return,
            benchmark_ratio_yearly,
            composition,
            rows_discarded,
        }
    }
}

/// Pulls the portfolio code out of the document identifier. The code is
/// the digit group after the literal marker; anything else leaves it
/// empty. Body text is never consulted.
fn parse_code(source_name: &str) -> String {
    CODE_RE
        .captures(source_name)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default()
}

/// All percentage tokens on a line, left to right.
fn percent_tokens(line: &str) -> Vec<String> {
    PERCENT_RE
        .find_iter(line)
        .map(|m| m.as_str().to_string())
        .collect()
}
