// src/view/mod.rs
//
// Presentation-side helpers: numeric readings of the formatted percentage
// fields, the benchmark filter, the default ordering and the stdout
// table. Nothing here feeds back into extraction.

use std::cmp::Ordering;

use clap::ValueEnum;

use crate::extractors::numeric;
use crate::extractors::ExtractionRecord;

/// Filter over the yearly benchmark ratio, against the 100% threshold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BenchmarkFilter {
    /// Keep every record.
    Todos,
    /// Keep records strictly above 100% of the benchmark.
    Acima,
    /// Keep records at or below 100% of the benchmark.
    Abaixo,
}

/// Numeric reading of the monthly return, used for ordering.
pub fn monthly_reading(record: &ExtractionRecord) -> Option<f64> {
    record
        .monthly_return
        .as_deref()
        .and_then(numeric::parse_percent_br)
}

/// Numeric reading of the yearly benchmark ratio, used for filtering.
pub fn benchmark_reading(record: &ExtractionRecord) -> Option<f64> {
    record
        .benchmark_ratio_yearly
        .as_deref()
        .and_then(numeric::parse_percent_br)
}

/// Applies the benchmark filter. Records without a benchmark reading are
/// excluded from both threshold variants since they cannot be compared.
pub fn apply_filter(
    records: Vec<ExtractionRecord>,
    filter: BenchmarkFilter,
) -> Vec<ExtractionRecord> {
    match filter {
        BenchmarkFilter::Todos => records,
        BenchmarkFilter::Acima => records
            .into_iter()
            .filter(|r| benchmark_reading(r).map(|v| v > 100.0).unwrap_or(false))
            .collect(),
        BenchmarkFilter::Abaixo => records
            .into_iter()
            .filter(|r| benchmark_reading(r).map(|v| v <= 100.0).unwrap_or(false))
            .collect(),
    }
}

/// Sorts by monthly return, highest first. The sort is stable and
/// records without a reading go last, so reruns give identical output.
pub fn sort_by_monthly_desc(records: &mut [ExtractionRecord]) {
    records.sort_by(|a, b| match (monthly_reading(a), monthly_reading(b)) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Renders the scalar fields as a fixed-width text table for stdout.
pub fn render_table(records: &[ExtractionRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<40} {:<10} {:<12} {:<12} {:<10}\n",
        "Arquivo", "Código", "Rent. Mês", "Rent. Ano", "%CDI Ano"
    ));

    for record in records {
        out.push_str(&format!(
            "{:<40} {:<10} {:<12} {:<12} {:<10}\n",
            record.source_name,
            record.code,
            record.monthly_return.as_deref().unwrap_or(""),
            record.yearly_return.as_deref().unwrap_or(""),
            record.benchmark_ratio_yearly.as_deref().unwrap_or(""),
        ));
    }

    out
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, monthly: Option<&str>, benchmark: Option<&str>) -> ExtractionRecord {
        ExtractionRecord {
            source_name: name.to_string(),
            code: String::new(),
            monthly_return: monthly.map(|s| s.to_string()),
            yearly_return: None,
            benchmark_ratio_yearly: benchmark.map(|s| s.to_string()),
            composition: Vec::new(),
            rows_discarded: 0,
        }
    }

    #[test]
    fn sorts_by_monthly_return_descending() {
        let mut records = vec![
            record("baixo.pdf", Some("0,50%"), None),
            record("alto.pdf", Some("2,10%"), None),
            record("sem_valor.pdf", None, None),
            record("medio.pdf", Some("1,00%"), None),
        ];
        sort_by_monthly_desc(&mut records);

        let names: Vec<&str> = records.iter().map(|r| r.source_name.as_str()).collect();
        assert_eq!(names, vec!["alto.pdf", "medio.pdf", "baixo.pdf", "sem_valor.pdf"]);
    }

    #[test]
    fn filter_acima_keeps_strictly_above_threshold() {
        let records = vec![
            record("a.pdf", None, Some("105,50%")),
            record("b.pdf", None, Some("100,00%")),
            record("c.pdf", None, None),
        ];
        let kept = apply_filter(records, BenchmarkFilter::Acima);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].source_name, "a.pdf");
    }

    #[test]
    fn filter_abaixo_keeps_at_or_below_threshold() {
        let records = vec![
            record("a.pdf", None, Some("105,50%")),
            record("b.pdf", None, Some("100,00%")),
            record("c.pdf", None, Some("98,70%")),
            record("d.pdf", None, None),
        ];
        let kept = apply_filter(records, BenchmarkFilter::Abaixo);
        let names: Vec<&str> = kept.iter().map(|r| r.source_name.as_str()).collect();
        assert_eq!(names, vec!["b.pdf", "c.pdf"]);
    }

    #[test]
    fn filter_todos_keeps_everything() {
        let records = vec![record("a.pdf", None, None), record("b.pdf", None, None)];
        assert_eq!(apply_filter(records, BenchmarkFilter::Todos).len(), 2);
    }

    #[test]
    fn table_has_header_and_one_line_per_record() {
        let records = vec![
            record("a.pdf", Some("1,00%"), Some("101,00%")),
            record("b.pdf", None, None),
        ];
        let table = render_table(&records);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Arquivo"));
        assert!(lines[1].contains("1,00%"));
    }
}
