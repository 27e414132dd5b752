// src/extractors/composition.rs

// --- Imports ---
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::extractors::numeric;

// Sentinel shown when the portfolio total is unknown or zero and the
// share cannot be computed.
const SHARE_UNAVAILABLE: &str = "-";

// Minimum number of whitespace-delimited segments for a line to count as
// a table row; anything shorter is page noise or a sub-header.
const MIN_SEGMENTS: usize = 5;

// --- Regex Patterns (Lazy Static) ---
// Column boundary: two or more consecutive whitespace characters. Single
// spaces are intra-field (strategy names, formatted numbers).
static COLUMN_SPLIT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s{2,}").expect("Failed to compile COLUMN_SPLIT_RE")
});

// Parenthetical suffix on a strategy label, e.g. " (Pós)".
static PAREN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s*\(.*\)").expect("Failed to compile PAREN_RE")
});

// --- Data Structures ---

/// One row of the portfolio composition table. Column values other than
/// the strategy label are kept verbatim for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompositionRow {
    /// Strategy label with any parenthetical annotation stripped.
    pub strategy: String,
    /// Share of the document's total portfolio value, or `-` when the
    /// total is unknown.
    pub share_of_portfolio: String,
    /// Gross balance column, verbatim (e.g. "R$ 250.000,00").
    pub gross_balance: String,
    /// Current-month column, verbatim.
    pub month_figure: String,
    /// Year-to-date column, verbatim.
    pub year_figure: String,
}

/// Builds the ordered composition rows from the buffered block lines.
/// Returns the rows plus the count of non-empty lines that were dropped
/// for not matching the table-row shape.
pub fn build_rows(lines: &[String], portfolio_total: f64) -> (Vec<CompositionRow>, usize) {
    let mut rows = Vec::new();
    let mut discarded = 0usize;

    for line in lines {
        match build_row(line, portfolio_total) {
            Some(row) => rows.push(row),
            None => {
                if !line.trim().is_empty() {
                    discarded += 1;
                    tracing::debug!("Dropped composition line: {:?}", line);
                }
            }
        }
    }

    (rows, discarded)
}

/// Reconstructs one row, or `None` when the line does not have the row
/// shape or its balance column is not a number. Segments past the fourth
/// are present in well-formed rows but carry no data we keep.
fn build_row(line: &str, portfolio_total: f64) -> Option<CompositionRow> {
    let segments: Vec<&str> = COLUMN_SPLIT_RE.split(line).collect();
    if segments.len() < MIN_SEGMENTS {
        return None;
    }

    let strategy = PAREN_RE.replace_all(segments[0], "").trim().to_string();
    let balance = numeric::parse_decimal_br(segments[1])?;

    let share_of_portfolio = if portfolio_total > 0.0 {
        numeric::format_percent_br(balance / portfolio_total * 100.0)
    } else {
        SHARE_UNAVAILABLE.to_string()
    };

    Some(CompositionRow {
        strategy,
        share_of_portfolio,
        gross_balance: segments[1].to_string(),
        month_figure: segments[2].to_string(),
        year_figure: segments[3].to_string(),
    })
}
