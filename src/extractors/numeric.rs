// src/extractors/numeric.rs
//
// Locale conversion for the pt-BR number format used throughout the
// reports: dot-grouped thousands, comma decimal separator, "R$" currency
// prefix, "%" suffix. Everything else in the crate goes through these two
// directions and never touches the separators directly.

/// Parses a monetary or plain decimal token such as `"R$ 1.234.567,89"`
/// or `"1.234,56"` into an `f64`. Returns `None` when the cleaned token
/// is not a number.
pub fn parse_decimal_br(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().trim_start_matches("R$").trim();
    if cleaned.is_empty() {
        return None;
    }
    let normalized = cleaned.replace('.', "").replace(',', ".");
    normalized.parse::<f64>().ok()
}

/// Parses a percentage token such as `"12,34%"` into an `f64` (here
/// `12.34`). The `%` suffix is optional.
pub fn parse_percent_br(raw: &str) -> Option<f64> {
    let cleaned = raw.trim().trim_end_matches('%').trim();
    if cleaned.is_empty() {
        return None;
    }
    let normalized = cleaned.replace('.', "").replace(',', ".");
    normalized.parse::<f64>().ok()
}

/// Formats a numeric value as a pt-BR percentage string with two decimal
/// places, e.g. `12.34` becomes `"12,34%"`.
pub fn format_percent_br(value: f64) -> String {
    format!("{:.2}", value).replace('.', ",") + "%"
}
